use std::fmt;

use serde::Serialize;

/// Educational track of a respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pathway {
    Jc,
    Poly,
}

impl fmt::Display for Pathway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pathway::Jc => write!(f, "JC"),
            Pathway::Poly => write!(f, "Poly"),
        }
    }
}

/// One cleaned survey response. Respondent ids are positional (1-based) and
/// reassigned on every run.
#[derive(Debug, Clone)]
pub struct DerivedRecord {
    pub respondent_id: usize,
    pub pathway: Option<Pathway>,
    pub study_hours_daily_normal: Option<f64>,
    pub study_hours_weekly_normal: Option<f64>,
    pub study_hours_daily_exam: Option<f64>,
    pub stress_level: Option<f64>,
    pub stress_reason_raw: String,
    pub missing_pathway: bool,
    pub missing_daily: bool,
    pub outlier_daily: bool,
    pub very_high_daily: bool,
}

/// Per-group descriptive statistics over weekly study hours.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub n: usize,
    pub mean: f64,
    pub sd: f64,
}

/// Outcome of a single hypothesis test.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub statistic: f64,
    pub df: f64,
    pub p_value: f64,
}
