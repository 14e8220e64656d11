//! Integration tests for slidestyle CLI

use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

fn run_slidestyle(args: &[&str]) -> (String, String, bool) {
    let mut cmd_args = vec!["run", "-p", "slidestyle", "--"];
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn write_job(job: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create job file");
    write!(file, "{}", job).expect("Failed to write job file");
    file
}

fn profit_job(rules: serde_json::Value) -> NamedTempFile {
    write_job(&serde_json::json!({
        "table": {"columns": [
            {"name": "region", "type": "text", "values": ["North", "South", "East", "West"]},
            {"name": "profit", "type": "currency", "values": [300000, 400000, 400000, 500000]}
        ]},
        "rules": rules
    }))
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Invalid JSON output")
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_slidestyle(&["--help"]);

    assert!(success);
    assert!(stdout.contains("slidestyle"));
    assert!(stdout.contains("apply"));
    assert!(stdout.contains("palette"));
    assert!(stdout.contains("scale"));
    assert!(stdout.contains("convert"));
    assert!(stdout.contains("scheme"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_slidestyle(&["--version"]);

    assert!(success);
    assert!(stdout.contains("slidestyle"));
}

// ============================================================================
// Apply command tests
// ============================================================================

#[test]
fn test_apply_table_output() {
    let job = profit_job(serde_json::json!([
        {"type": "color_scale", "column": "profit", "min_color": "F8696B", "max_color": "63BE7B"}
    ]));
    let path = job.path().to_str().unwrap();
    let (stdout, _, success) = run_slidestyle(&["apply", path]);

    assert!(success);
    assert!(stdout.contains("region"));
    assert!(stdout.contains("$300,000"));
    assert!(stdout.contains("fill=F8696B"));
    assert!(stdout.contains("fill=63BE7B"));
}

#[test]
fn test_apply_json_output() {
    let job = profit_job(serde_json::json!([
        {"type": "color_scale", "column": "profit", "min_color": "F8696B", "max_color": "63BE7B"},
        {"type": "top_bottom", "column": "profit", "rank": 1, "font_color": "FFFFFF"}
    ]));
    let path = job.path().to_str().unwrap();
    let (stdout, _, success) = run_slidestyle(&["apply", path, "--output", "json"]);

    assert!(success);
    let parsed = parse_json(&stdout);
    let cells = parsed.as_array().expect("expected a list of cells");
    assert_eq!(cells.len(), 4);
    assert_eq!(cells[0]["row"], 0);
    assert_eq!(cells[0]["column"], "profit");
    assert_eq!(cells[0]["fill_color"], "F8696B");
    assert_eq!(cells[1]["fill_color"], cells[2]["fill_color"]);
    // the font-only top rule keeps the scale's fill
    assert_eq!(cells[3]["fill_color"], "63BE7B");
    assert_eq!(cells[3]["font_color"], "FFFFFF");
}

#[test]
fn test_apply_start_row() {
    let job = profit_job(serde_json::json!([{"type": "data_bar", "column": "profit"}]));
    let path = job.path().to_str().unwrap();
    let (stdout, _, success) =
        run_slidestyle(&["apply", path, "--start-row", "1", "--output", "json"]);

    assert!(success);
    let parsed = parse_json(&stdout);
    let cells = parsed.as_array().expect("expected a list of cells");
    assert_eq!(cells.len(), 3);
    assert!(cells.iter().all(|c| c["row"].as_u64() >= Some(1)));
    assert_eq!(cells[0]["bar_fraction"], 0.0);
    assert_eq!(cells[2]["bar_fraction"], 1.0);
}

#[test]
fn test_apply_table_output_is_plain_text() {
    let job = profit_job(serde_json::json!([{"type": "data_bar", "column": "profit"}]));
    let path = job.path().to_str().unwrap();
    let (stdout, _, success) = run_slidestyle(&["apply", path]);

    assert!(success);
    assert!(stdout.contains("region"));
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn test_apply_unknown_column() {
    let job = profit_job(serde_json::json!([{"type": "data_bar", "column": "margin"}]));
    let path = job.path().to_str().unwrap();
    let (_, stderr, success) = run_slidestyle(&["apply", path]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("margin"));
}

#[test]
fn test_apply_unknown_rule_type() {
    let job = profit_job(serde_json::json!([{"type": "sparkline", "column": "profit"}]));
    let path = job.path().to_str().unwrap();
    let (_, stderr, success) = run_slidestyle(&["apply", path]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("sparkline"));
}

#[test]
fn test_apply_missing_job_file() {
    let (_, stderr, success) = run_slidestyle(&["apply", "/nonexistent/job.json"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_apply_verbose_keeps_stdout_clean() {
    let job = profit_job(serde_json::json!([{"type": "data_bar", "column": "profit"}]));
    let path = job.path().to_str().unwrap();
    let (stdout, _, success) = run_slidestyle(&["apply", path, "-v", "--output", "json"]);

    assert!(success);
    assert_eq!(parse_json(&stdout).as_array().map(Vec::len), Some(4));
}

// ============================================================================
// Color command tests
// ============================================================================

#[test]
fn test_palette_json_output() {
    let (stdout, _, success) = run_slidestyle(&[
        "palette", "4472C4", "--count", "4", "--mode", "triadic", "--output", "json",
    ]);

    assert!(success);
    let parsed = parse_json(&stdout);
    assert_eq!(parsed["mode"], "triadic");
    let colors = parsed["colors"].as_array().expect("expected colors");
    assert_eq!(colors.len(), 4);
    assert_eq!(colors[0], "4472C4");
}

#[test]
fn test_palette_table_output() {
    let (stdout, _, success) = run_slidestyle(&["palette", "#4472c4"]);

    assert!(success);
    assert!(stdout.contains("monochromatic"));
    assert!(stdout.contains("4472C4"));
    assert!(stdout.contains("5."));
}

#[test]
fn test_palette_invalid_color() {
    let (_, stderr, success) = run_slidestyle(&["palette", "blue"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_palette_invalid_mode() {
    let (_, _, success) = run_slidestyle(&["palette", "4472C4", "--mode", "tetradic"]);

    assert!(!success);
}

#[test]
fn test_scale_output() {
    let (stdout, _, success) =
        run_slidestyle(&["scale", "F8696B", "63BE7B", "--mid", "FFEB84", "--steps", "3"]);

    assert!(success);
    assert!(stdout.contains("F8696B"));
    assert!(stdout.contains("FFEB84"));
    assert!(stdout.contains("63BE7B"));
}

#[test]
fn test_convert_output() {
    let (stdout, _, success) = run_slidestyle(&["convert", "F00"]);

    assert!(success);
    assert!(stdout.contains("FF0000"));
    assert!(stdout.contains("255, 0, 0"));
    assert!(stdout.contains("00FFFF"));
}

#[test]
fn test_scheme_list_and_lookup() {
    let (stdout, _, success) = run_slidestyle(&["scheme"]);
    assert!(success);
    assert!(stdout.contains("financial"));
    assert!(stdout.contains("pastel"));

    let (stdout, _, success) = run_slidestyle(&["scheme", "Financial", "--output", "json"]);
    assert!(success);
    let parsed = parse_json(&stdout);
    assert_eq!(parsed["schemes"][0]["colors"][0], "3366CC");
}

#[test]
fn test_scheme_unknown() {
    let (_, stderr, success) = run_slidestyle(&["scheme", "neon"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}
