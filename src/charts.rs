use std::path::Path;

use anyhow::ensure;
use plotters::prelude::*;

pub const PATHWAY_BAR_PNG: &str = "fig_pathway_bar.png";
pub const DAILY_HIST_PNG: &str = "fig_hist_daily_overall.png";
pub const WEEKLY_BOX_PNG: &str = "fig_box_weekly_jc_vs_poly.png";

const FIGURE_SIZE: (u32, u32) = (800, 600);

fn pathway_label(segment: &SegmentValue<u32>) -> String {
    match segment {
        SegmentValue::Exact(0) | SegmentValue::CenterOf(0) => "JC".to_string(),
        SegmentValue::Exact(1) | SegmentValue::CenterOf(1) => "Poly".to_string(),
        _ => String::new(),
    }
}

/// Respondent count per pathway over the analysis-ready rows.
pub fn pathway_bar(path: &Path, jc_count: usize, poly_count: usize) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = (jc_count.max(poly_count) as u32 + 1).max(2);
    let mut chart = ChartBuilder::on(&root)
        .caption("Respondents by Pathway (JC vs Poly)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d((0u32..2u32).into_segmented(), 0u32..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Pathway")
        .y_desc("Count")
        .x_label_formatter(&pathway_label)
        .disable_x_mesh()
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.filled())
            .margin(40)
            .data([(0u32, jc_count as u32), (1u32, poly_count as u32)]),
    )?;

    root.present()?;
    Ok(())
}

/// Histogram of daily study hours, unit bins across the plausible range.
pub fn daily_hours_histogram(path: &Path, daily_hours: &[f64]) -> anyhow::Result<()> {
    ensure!(
        !daily_hours.is_empty(),
        "daily-hours histogram needs at least one observation"
    );
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    // one bin per whole hour across the plausible [0, 12] daily range; an
    // exact 12 lands in the last bin
    let mut counts = [0u32; 13];
    for hours in daily_hours {
        let bin = (hours.floor() as usize).min(12);
        counts[bin] += 1;
    }
    let y_max = counts.iter().copied().max().unwrap_or(1) + 1;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Daily Study Hours Outside School (Normal Week)",
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d((0u32..13u32).into_segmented(), 0u32..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Hours/day")
        .y_desc("Frequency")
        .disable_x_mesh()
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.filled())
            .data(
                counts
                    .iter()
                    .enumerate()
                    .map(|(bin, count)| (bin as u32, *count)),
            ),
    )?;

    root.present()?;
    Ok(())
}

/// Boxplot of weekly study hours per group.
pub fn weekly_hours_boxplot(
    path: &Path,
    jc_weekly: &[f64],
    poly_weekly: &[f64],
) -> anyhow::Result<()> {
    ensure!(
        !jc_weekly.is_empty() && !poly_weekly.is_empty(),
        "weekly-hours boxplot needs observations in both groups"
    );
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = jc_weekly
        .iter()
        .chain(poly_weekly)
        .fold(0f32, |acc, value| acc.max(*value as f32))
        + 7.0;

    let groups = ["JC", "Poly"];
    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Weekly Study Hours Outside School (Normal Week)",
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(groups[..].into_segmented(), 0f32..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Pathway")
        .y_desc("Hours/week")
        .disable_x_mesh()
        .draw()?;

    chart.draw_series(vec![
        Boxplot::new_vertical(SegmentValue::CenterOf(&"JC"), &Quartiles::new(jc_weekly)),
        Boxplot::new_vertical(SegmentValue::CenterOf(&"Poly"), &Quartiles::new(poly_weekly)),
    ])?;

    root.present()?;
    Ok(())
}
