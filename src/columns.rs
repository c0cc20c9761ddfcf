use anyhow::bail;

/// Accepted header variants per logical field, highest priority first.
/// Matching is exact: no case folding, no fuzzing. Edit these lists if the
/// survey form's question wording changes.
pub const PATHWAY_CANDIDATES: &[&str] = &[
    "Are you from JC or Poly?",
    "Are you from JC or Poly",
    "JC or Poly",
    "Pathway",
];

pub const DAILY_HOURS_CANDIDATES: &[&str] = &[
    "On Average, how many hours do you study per day outside of school (number only)",
    "On average, how many hours do you study per day outside of school (number only)",
    "Daily study hours (normal week)",
    "StudyHours_Daily_Normal",
];

pub const EXAM_DAILY_HOURS_CANDIDATES: &[&str] = &[
    "During exam season, how many hours do you study per day outside of school (number only)",
    "Daily study hours (exam season)",
    "StudyHours_Daily_Exam",
];

pub const STRESS_LEVEL_CANDIDATES: &[&str] = &[
    "On a scale of 1-10, how stressed are you?",
    "On a scale of 1-10, how stressed are you",
    "Stress level (1-10)",
    "StressLevel",
];

pub const STRESS_REASON_CANDIDATES: &[&str] = &[
    "Why did you choose that stress level?",
    "Stress reason",
    "StressReason",
];

/// Index of each logical field in the raw header row. Required fields are
/// resolved or the whole run aborts; optional fields degrade to all-missing.
#[derive(Debug, Clone)]
pub struct ResolvedColumns {
    pub pathway: usize,
    pub daily_hours: usize,
    pub exam_daily_hours: Option<usize>,
    pub stress_level: Option<usize>,
    pub stress_reason: Option<usize>,
}

/// First candidate present in `headers` wins; earlier candidates take priority.
pub fn resolve(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| headers.iter().position(|header| header == candidate))
}

pub fn resolve_all(headers: &[String]) -> anyhow::Result<ResolvedColumns> {
    let pathway = require(headers, "pathway", PATHWAY_CANDIDATES)?;
    let daily_hours = require(headers, "daily study hours", DAILY_HOURS_CANDIDATES)?;

    Ok(ResolvedColumns {
        pathway,
        daily_hours,
        exam_daily_hours: resolve(headers, EXAM_DAILY_HOURS_CANDIDATES),
        stress_level: resolve(headers, STRESS_LEVEL_CANDIDATES),
        stress_reason: resolve(headers, STRESS_REASON_CANDIDATES),
    })
}

fn require(headers: &[String], field: &str, candidates: &[&str]) -> anyhow::Result<usize> {
    match resolve(headers, candidates) {
        Some(index) => Ok(index),
        None => bail!(
            "no column found for required field '{field}' (tried {candidates:?}); \
             available headers: {headers:?}"
        ),
    }
}
