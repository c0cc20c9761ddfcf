use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use clap::{Parser, Subcommand};

mod charts;
mod clean;
mod columns;
mod models;
mod report;
mod stats;

use models::{DerivedRecord, Pathway};

#[derive(Parser)]
#[command(name = "study-stress-survey")]
#[command(
    about = "Cleans a study-habits survey export and runs the JC vs Poly stress analysis",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the cleaned, analysis-ready CSV exports
    Clean {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "cleaned_data")]
        out_dir: PathBuf,
    },
    /// Run descriptive statistics and both hypothesis tests, write the summary
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "cleaned_data")]
        out_dir: PathBuf,
        /// Also write a machine-readable summary.json
        #[arg(long)]
        json: bool,
    },
    /// Render the report figures as PNGs
    Charts {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "cleaned_data")]
        out_dir: PathBuf,
    },
}

/// Everything downstream steps need, derived in one pass over the input.
struct Pipeline {
    raw_rows: usize,
    analysis: Vec<DerivedRecord>,
    jc: Vec<DerivedRecord>,
    poly: Vec<DerivedRecord>,
}

fn load(input: &Path) -> anyhow::Result<Pipeline> {
    ensure!(
        input.is_file(),
        "input file {} does not exist",
        input.display()
    );
    let mut reader =
        csv::Reader::from_path(input).with_context(|| format!("opening {}", input.display()))?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .with_context(|| format!("reading {}", input.display()))?;

    // required columns must resolve before anything is derived or written
    let columns = columns::resolve_all(&headers)?;
    let records = clean::build_records(&rows, &columns);
    let analysis = clean::analysis_rows(&records);
    let jc = clean::group_rows(&analysis, Pathway::Jc);
    let poly = clean::group_rows(&analysis, Pathway::Poly);

    Ok(Pipeline {
        raw_rows: rows.len(),
        analysis,
        jc,
        poly,
    })
}

fn prepare_out_dir(out_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Clean { input, out_dir } => {
            let pipeline = load(&input)?;
            prepare_out_dir(&out_dir)?;

            let all = out_dir.join(report::ALL_CSV);
            let poly_only = out_dir.join(report::POLY_CSV);
            let two_group = out_dir.join(report::JC_VS_POLY_CSV);
            report::write_csv(&all, &pipeline.analysis)?;
            report::write_csv(&poly_only, &pipeline.poly)?;
            report::write_csv(&two_group, &pipeline.analysis)?;

            println!("Saved:");
            for path in [&all, &poly_only, &two_group] {
                println!("- {}", path.display());
            }
        }
        Commands::Report {
            input,
            out_dir,
            json,
        } => {
            let pipeline = load(&input)?;
            let summary = report::build_summary(
                pipeline.raw_rows,
                pipeline.analysis.len(),
                &clean::weekly_hours(&pipeline.jc),
                &clean::weekly_hours(&pipeline.poly),
            )?;

            prepare_out_dir(&out_dir)?;
            let text_path = out_dir.join(report::SUMMARY_TXT);
            report::write_summary_text(&text_path, &summary)?;
            println!("Summary written to {}.", text_path.display());

            if json {
                let json_path = out_dir.join(report::SUMMARY_JSON);
                report::write_summary_json(&json_path, &summary)?;
                println!("JSON summary written to {}.", json_path.display());
            }

            print!("{}", report::render_summary(&summary));
        }
        Commands::Charts { input, out_dir } => {
            let pipeline = load(&input)?;
            prepare_out_dir(&out_dir)?;

            let bar = out_dir.join(charts::PATHWAY_BAR_PNG);
            let hist = out_dir.join(charts::DAILY_HIST_PNG);
            let boxplot = out_dir.join(charts::WEEKLY_BOX_PNG);

            charts::pathway_bar(&bar, pipeline.jc.len(), pipeline.poly.len())?;
            let daily: Vec<f64> = pipeline
                .analysis
                .iter()
                .filter_map(|record| record.study_hours_daily_normal)
                .collect();
            charts::daily_hours_histogram(&hist, &daily)?;
            charts::weekly_hours_boxplot(
                &boxplot,
                &clean::weekly_hours(&pipeline.jc),
                &clean::weekly_hours(&pipeline.poly),
            )?;

            println!("Saved charts:");
            for path in [&bar, &hist, &boxplot] {
                println!("- {}", path.display());
            }
        }
    }

    Ok(())
}
