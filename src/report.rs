use std::fmt::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::models::{DerivedRecord, GroupSummary, TestResult};
use crate::stats;

pub const ALL_CSV: &str = "clean_presentable_all.csv";
pub const POLY_CSV: &str = "clean_presentable_poly_only.csv";
pub const JC_VS_POLY_CSV: &str = "clean_presentable_jc_vs_poly.csv";
pub const SUMMARY_TXT: &str = "summary.txt";
pub const SUMMARY_JSON: &str = "summary.json";

/// Report-ready column shape for the cleaned CSV exports.
#[derive(Serialize)]
struct ExportRow {
    #[serde(rename = "RespondentID")]
    respondent_id: usize,
    #[serde(rename = "Pathway")]
    pathway: String,
    #[serde(rename = "StudyHours_Daily_Normal")]
    study_hours_daily_normal: Option<f64>,
    #[serde(rename = "StudyHours_Weekly_Normal")]
    study_hours_weekly_normal: Option<f64>,
    #[serde(rename = "StudyHours_Daily_Exam")]
    study_hours_daily_exam: Option<f64>,
    #[serde(rename = "StressLevel")]
    stress_level: Option<f64>,
    #[serde(rename = "StressReason_Raw")]
    stress_reason_raw: String,
    #[serde(rename = "Flag_MissingPathway")]
    missing_pathway: bool,
    #[serde(rename = "Flag_MissingDaily")]
    missing_daily: bool,
    #[serde(rename = "Flag_OutlierDaily")]
    outlier_daily: bool,
    #[serde(rename = "Flag_VeryHighDaily")]
    very_high_daily: bool,
}

impl From<&DerivedRecord> for ExportRow {
    fn from(record: &DerivedRecord) -> Self {
        ExportRow {
            respondent_id: record.respondent_id,
            pathway: record
                .pathway
                .map(|pathway| pathway.to_string())
                .unwrap_or_default(),
            study_hours_daily_normal: record.study_hours_daily_normal,
            study_hours_weekly_normal: record.study_hours_weekly_normal,
            study_hours_daily_exam: record.study_hours_daily_exam,
            stress_level: record.stress_level,
            stress_reason_raw: record.stress_reason_raw.clone(),
            missing_pathway: record.missing_pathway,
            missing_daily: record.missing_daily,
            outlier_daily: record.outlier_daily,
            very_high_daily: record.very_high_daily,
        }
    }
}

fn render_csv(records: &[DerivedRecord]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(ExportRow::from(record))?;
    }
    Ok(writer.into_inner()?)
}

pub fn write_csv(path: &Path, records: &[DerivedRecord]) -> anyhow::Result<()> {
    let data = render_csv(records)?;
    std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Everything the summary report states, in one serializable shape.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub raw_rows: usize,
    pub analysis_rows: usize,
    pub jc: GroupSummary,
    pub poly: GroupSummary,
    pub benchmark_weekly_hours: f64,
    pub one_sample_poly_vs_benchmark: TestResult,
    pub welch_jc_greater_than_poly: TestResult,
}

pub fn build_summary(
    raw_rows: usize,
    analysis_rows: usize,
    jc_weekly: &[f64],
    poly_weekly: &[f64],
) -> anyhow::Result<Summary> {
    let jc = stats::summarize("JC", jc_weekly)?;
    let poly = stats::summarize("Poly", poly_weekly)?;
    let one_sample = stats::one_sample_t_test(&poly, stats::BENCHMARK_WEEKLY_HOURS)?;
    let welch = stats::welch_t_test(&jc, &poly)?;

    Ok(Summary {
        raw_rows,
        analysis_rows,
        jc,
        poly,
        benchmark_weekly_hours: stats::BENCHMARK_WEEKLY_HOURS,
        one_sample_poly_vs_benchmark: one_sample,
        welch_jc_greater_than_poly: welch,
    })
}

/// Plain-text rendering with a fixed line order, for the report appendix.
pub fn render_summary(summary: &Summary) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Study Habits & Stress Survey Summary");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "Rows: {} raw, {} analysis-ready (JC {}, Poly {})",
        summary.raw_rows, summary.analysis_rows, summary.jc.n, summary.poly.n
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Weekly study hours outside school (normal week)");
    for (label, group) in [("JC", &summary.jc), ("Poly", &summary.poly)] {
        let _ = writeln!(
            output,
            "- {}: n={}, mean={:.2}, sd={:.2}",
            label, group.n, group.mean, group.sd
        );
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "## Hypothesis tests");
    let one = &summary.one_sample_poly_vs_benchmark;
    let _ = writeln!(
        output,
        "One-sample (Poly vs benchmark {:.1} h/week): t={:.3}, df={:.0}, p(two-tailed)={:.4}",
        summary.benchmark_weekly_hours, one.statistic, one.df, one.p_value
    );
    let welch = &summary.welch_jc_greater_than_poly;
    let _ = writeln!(
        output,
        "Welch two-sample (JC > Poly): t={:.3}, df={:.2}, p(one-tailed)={:.4}",
        welch.statistic, welch.df, welch.p_value
    );

    output
}

pub fn write_summary_text(path: &Path, summary: &Summary) -> anyhow::Result<()> {
    std::fs::write(path, render_summary(summary))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn write_summary_json(path: &Path, summary: &Summary) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
