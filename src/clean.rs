use std::sync::OnceLock;

use regex::Regex;

use crate::columns::ResolvedColumns;
use crate::models::{DerivedRecord, Pathway};

/// Daily hours outside [0, 12] are implausible for this survey and excluded
/// from analysis; hours above 8 are only flagged for discussion.
const DAILY_HOURS_MIN: f64 = 0.0;
const DAILY_HOURS_MAX: f64 = 12.0;
const VERY_HIGH_DAILY: f64 = 8.0;

const WEEKLY_FACTOR: f64 = 7.0;

fn range_pattern() -> &'static Regex {
    static RANGE: OnceLock<Regex> = OnceLock::new();
    RANGE.get_or_init(|| Regex::new(r"\d+\s*-\s*\d+").unwrap())
}

fn number_pattern() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| Regex::new(r"\d+(\.\d+)?").unwrap())
}

/// Case-insensitive substring match; "jc"/"junior" wins over "poly" when a
/// string somehow contains both.
pub fn normalize_pathway(raw: &str) -> Option<Pathway> {
    let value = raw.trim().to_lowercase();
    if value.is_empty() {
        return None;
    }
    if value.contains("jc") || value.contains("junior") {
        return Some(Pathway::Jc);
    }
    if value.contains("poly") || value.contains("polytechnic") {
        return Some(Pathway::Poly);
    }
    None
}

/// Extract the first numeric token from free text ("3 hours" -> 3.0).
/// Free-text ranges like "6-7" are rejected outright rather than misread as a
/// single number.
pub fn parse_number(raw: &str) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if range_pattern().is_match(value) {
        return None;
    }
    number_pattern()
        .find(value)
        .and_then(|token| token.as_str().parse::<f64>().ok())
}

/// Present but outside the plausible [0, 12] hours/day range.
pub fn is_outlier_daily(hours: f64) -> bool {
    !(DAILY_HOURS_MIN..=DAILY_HOURS_MAX).contains(&hours)
}

fn cell<'a>(row: &'a csv::StringRecord, index: usize) -> &'a str {
    row.get(index).unwrap_or("")
}

fn optional_cell<'a>(row: &'a csv::StringRecord, index: Option<usize>) -> &'a str {
    index.map(|i| cell(row, i)).unwrap_or("")
}

/// Normalize one raw row. Respondent ids are 1-based row positions; a
/// normalizer returning missing is expected, never an error.
pub fn build_record(
    row: &csv::StringRecord,
    columns: &ResolvedColumns,
    position: usize,
) -> DerivedRecord {
    let pathway = normalize_pathway(cell(row, columns.pathway));
    let daily = parse_number(cell(row, columns.daily_hours));
    let outlier_daily = daily.map(is_outlier_daily).unwrap_or(false);

    DerivedRecord {
        respondent_id: position + 1,
        pathway,
        study_hours_daily_normal: daily,
        study_hours_weekly_normal: daily.map(|hours| hours * WEEKLY_FACTOR),
        study_hours_daily_exam: parse_number(optional_cell(row, columns.exam_daily_hours)),
        stress_level: parse_number(optional_cell(row, columns.stress_level)),
        stress_reason_raw: optional_cell(row, columns.stress_reason).trim().to_string(),
        missing_pathway: pathway.is_none(),
        missing_daily: daily.is_none(),
        outlier_daily,
        very_high_daily: daily.map(|hours| hours > VERY_HIGH_DAILY).unwrap_or(false),
    }
}

pub fn build_records(
    rows: &[csv::StringRecord],
    columns: &ResolvedColumns,
) -> Vec<DerivedRecord> {
    rows.iter()
        .enumerate()
        .map(|(position, row)| build_record(row, columns, position))
        .collect()
}

/// Rows usable for analysis: a known pathway, a parsed daily value, and no
/// out-of-range outlier. Very-high daily hours stay in.
pub fn is_analysis_ready(record: &DerivedRecord) -> bool {
    record.pathway.is_some() && record.study_hours_daily_normal.is_some() && !record.outlier_daily
}

pub fn analysis_rows(records: &[DerivedRecord]) -> Vec<DerivedRecord> {
    records
        .iter()
        .filter(|record| is_analysis_ready(record))
        .cloned()
        .collect()
}

pub fn group_rows(records: &[DerivedRecord], pathway: Pathway) -> Vec<DerivedRecord> {
    records
        .iter()
        .filter(|record| record.pathway == Some(pathway))
        .cloned()
        .collect()
}

pub fn weekly_hours(records: &[DerivedRecord]) -> Vec<f64> {
    records
        .iter()
        .filter_map(|record| record.study_hours_weekly_normal)
        .collect()
}
