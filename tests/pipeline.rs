use std::path::Path;
use std::process::{Command, Output};

const PATHWAY_HEADER: &str = "Are you from JC or Poly?";
const DAILY_HEADER: &str =
    "On Average, how many hours do you study per day outside of school (number only)";
const STRESS_HEADER: &str = "On a scale of 1-10, how stressed are you?";
const REASON_HEADER: &str = "Why did you choose that stress level?";

// The real form headers contain commas, so the fixture goes through
// csv::Writer to get them quoted.
fn survey_csv() -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([PATHWAY_HEADER, DAILY_HEADER, STRESS_HEADER, REASON_HEADER])
        .unwrap();
    let rows = [
        ["JC", "3", "7", "a levels"],
        ["Junior College", "4", "8", "mugging season"],
        ["JC", "5", "6", "projects piling up"],
        ["Poly", "2", "4", "manageable workload"],
        ["poly", "2.5", "5", "internship applications"],
        ["I'm from POLY", "3 hours", "5", "deadlines"],
        ["Poly", "15", "9", "typo probably"],
        ["unsure", "4", "6", ""],
    ];
    for row in rows {
        writer.write_record(row).unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

#[test]
fn fixture_rows_all_parse_to_four_fields() {
    let bytes = survey_csv().into_bytes();
    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    assert_eq!(reader.headers().unwrap().len(), 4);
    for record in reader.records() {
        assert_eq!(record.unwrap().len(), 4);
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_study-stress-survey"))
        .args(args)
        .output()
        .expect("binary should run")
}

fn write_input(dir: &Path, contents: &str) -> String {
    let input = dir.join("survey.csv");
    std::fs::write(&input, contents).unwrap();
    input.to_str().unwrap().to_string()
}

#[test]
fn clean_writes_three_exports() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), &survey_csv());
    let out_dir = dir.path().join("cleaned");

    let output = run(&["clean", "--input", &input, "--out-dir", out_dir.to_str().unwrap()]);
    assert!(output.status.success(), "{:?}", output);

    let all = std::fs::read_to_string(out_dir.join("clean_presentable_all.csv")).unwrap();
    let lines: Vec<&str> = all.lines().collect();
    // 8 raw rows, minus the unknown pathway, the 15 h/day outlier
    assert_eq!(lines.len(), 1 + 6);
    assert!(lines[0].starts_with("RespondentID,Pathway,StudyHours_Daily_Normal"));
    assert!(lines[1].starts_with("1,JC,3.0,21.0"));

    let poly = std::fs::read_to_string(out_dir.join("clean_presentable_poly_only.csv")).unwrap();
    assert_eq!(poly.lines().count(), 1 + 3);
    assert!(out_dir.join("clean_presentable_jc_vs_poly.csv").is_file());
}

#[test]
fn report_runs_both_tests_and_writes_summaries() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), &survey_csv());
    let out_dir = dir.path().join("cleaned");

    let output = run(&[
        "report",
        "--input",
        &input,
        "--out-dir",
        out_dir.to_str().unwrap(),
        "--json",
    ]);
    assert!(output.status.success(), "{:?}", output);

    let summary = std::fs::read_to_string(out_dir.join("summary.txt")).unwrap();
    assert!(summary.contains("Rows: 8 raw, 6 analysis-ready (JC 3, Poly 3)"));
    assert!(summary.contains("One-sample (Poly vs benchmark 15.5 h/week): t="));
    assert!(summary.contains("Welch two-sample (JC > Poly): t="));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join("summary.json")).unwrap())
            .unwrap();
    assert_eq!(json["jc"]["n"], 3);
    assert_eq!(json["poly"]["n"], 3);
    let p = json["welch_jc_greater_than_poly"]["p_value"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&p));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Hypothesis tests"));
}

#[test]
fn missing_required_column_aborts_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "Timestamp,Favourite subject\n2026-01-05,Mathematics\n",
    );
    let out_dir = dir.path().join("cleaned");

    let output = run(&["clean", "--input", &input, "--out-dir", out_dir.to_str().unwrap()]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("pathway"));
    assert!(stderr.contains("Favourite subject"));
    assert!(!out_dir.exists(), "no output may be written on a fatal config error");
}

#[test]
fn missing_input_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nope.csv");

    let output = run(&[
        "report",
        "--input",
        input.to_str().unwrap(),
        "--out-dir",
        dir.path().join("cleaned").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("does not exist"));
}
