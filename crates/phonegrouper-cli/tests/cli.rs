use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn run_raw(home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("phonegrouper")
        .env("XDG_CONFIG_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run command")
}

fn run_cmd(home: &Path, args: &[&str]) -> String {
    let output = run_raw(home, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(home: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run_raw(home, &full);
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn write_input(temp: &TempDir, name: &str, contents: &str) -> String {
    let path = temp.path().join(name);
    fs::write(&path, contents).expect("write input");
    path.to_str().expect("input path").to_string()
}

#[test]
fn cli_groups_plain_numbers() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(
        &temp,
        "numbers.txt",
        "+1 (555) 123-4567\n555-123-4567\tAda\n555.999.0000\nabc\n",
    );

    let report = run_cmd_json(temp.path(), &["group", &input]);
    assert_eq!(report["records"], 4);
    assert_eq!(report["group_count"], 2);
    assert_eq!(report["groups"][0]["key"], "5551234567");
    assert_eq!(report["groups"][0]["size"], 2);
    assert_eq!(report["groups"][0]["members"][1]["text"], "555-123-4567\tAda");
    assert_eq!(report["groups"][1]["key"], "5559990000");
    assert_eq!(report["unclassifiable"][0]["id"], 4);
}

#[test]
fn cli_writes_text_report_to_file() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "numbers.txt", "555-123-4567\n(555) 123 4567\n");
    let output = temp.path().join("output.txt");

    let stdout = run_cmd(
        temp.path(),
        &["group", &input, "--output", output.to_str().expect("output path")],
    );
    assert!(stdout.contains("Processed 2 record(s) into 1 group(s)"));

    let report = fs::read_to_string(&output).expect("read report");
    assert!(report.starts_with("Groups: 1\n\nGroup 1 (5551234567)\n555-123-4567\n"));
}

#[test]
fn cli_links_columns_and_keeps_multi_record_groups() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(
        &temp,
        "rows.csv",
        "\"1111111\";\"2222222\";\"3333333\"\n\"4444444\";\"2222222\";\"\"\n\"5555555\";\"6666666\";\"7777777\"\n\"8888888\";\"\";\"3333333\"\n\"12a\";\"9999999\"\n",
    );

    let report = run_cmd_json(
        temp.path(),
        &[
            "group",
            &input,
            "--format",
            "columns",
            "--no-country-code",
            "--min-group-size",
            "2",
            "--order",
            "size-desc",
            "--unclassified",
            "report",
        ],
    );
    assert_eq!(report["group_count"], 1);
    let ids: Vec<u64> = report["groups"][0]["members"]
        .as_array()
        .expect("members")
        .iter()
        .map(|m| m["id"].as_u64().expect("id"))
        .collect();
    assert_eq!(ids, vec![1, 2, 4]);
    assert_eq!(report["rejected"][0]["id"], 5);
}

#[test]
fn cli_suffix_rule_merges_country_variants() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "numbers.txt", "+44 555 123 4567\n123-4567\n");

    let report = run_cmd_json(
        temp.path(),
        &["group", &input, "--rule", "suffix", "--suffix-digits", "7"],
    );
    assert_eq!(report["group_count"], 1);
    assert_eq!(report["groups"][0]["key"], "1234567");
}

#[test]
fn cli_reads_config_file() {
    let temp = TempDir::new().expect("temp dir");
    let config_dir = temp.path().join("phonegrouper");
    fs::create_dir_all(&config_dir).expect("config dir");
    fs::write(
        config_dir.join("config.toml"),
        "[normalize]\nminimum_digit_count = 10\n",
    )
    .expect("write config");
    let input = write_input(&temp, "numbers.txt", "555-1234\n555-123-4567\n");

    let report = run_cmd_json(temp.path(), &["group", &input]);
    assert_eq!(report["group_count"], 1);
    assert_eq!(report["unclassifiable"][0]["text"], "555-1234");
}

#[test]
fn cli_rule_flag_uses_configured_suffix_digits() {
    let temp = TempDir::new().expect("temp dir");
    let config_dir = temp.path().join("phonegrouper");
    fs::create_dir_all(&config_dir).expect("config dir");
    fs::write(config_dir.join("config.toml"), "[grouping]\nsuffix_digits = 4\n")
        .expect("write config");
    let input = write_input(&temp, "numbers.txt", "555-111-4567\n555-222-4567\n");

    let exact = run_cmd_json(temp.path(), &["group", &input]);
    assert_eq!(exact["group_count"], 2);

    let suffix = run_cmd_json(temp.path(), &["group", &input, "--rule", "suffix"]);
    assert_eq!(suffix["group_count"], 1);
    assert_eq!(suffix["groups"][0]["key"], "4567");
    assert_eq!(suffix["groups"][0]["size"], 2);
}

#[test]
fn cli_suffix_digits_without_suffix_rule_is_invalid() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(&temp, "numbers.txt", "555-123-4567\n");

    let output = run_raw(
        temp.path(),
        &["group", &input, "--rule", "exact", "--suffix-digits", "4"],
    );
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("--suffix-digits requires the suffix rule"));
}

#[test]
fn cli_report_counts_records_in_filtered_groups() {
    let temp = TempDir::new().expect("temp dir");
    let input = write_input(
        &temp,
        "numbers.txt",
        "555-123-4567\n555.999.0000\n(555) 123 4567\n",
    );

    let report = run_cmd_json(temp.path(), &["group", &input, "--min-group-size", "2"]);
    assert_eq!(report["records"], 3);
    assert_eq!(report["group_count"], 1);
    assert_eq!(report["filtered"], 1);

    let output = temp.path().join("report.json");
    let summary = run_cmd_json(
        temp.path(),
        &[
            "group",
            &input,
            "--min-group-size",
            "2",
            "--output",
            output.to_str().expect("output path"),
        ],
    );
    assert_eq!(summary["records"], 3);
    let written: Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("read report")).expect("json");
    assert_eq!(written["records"], summary["records"]);
}

#[test]
fn cli_rejects_negative_minimum_before_reading_input() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("missing.txt");

    let output = run_raw(
        temp.path(),
        &[
            "group",
            missing.to_str().expect("path"),
            "--min-digits",
            "-1",
        ],
    );
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("invalid minimum digit count"));
}

#[test]
fn cli_missing_input_is_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("missing.txt");
    let output = run_raw(temp.path(), &["group", missing.to_str().expect("path")]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_rejects_unknown_config_keys() {
    let temp = TempDir::new().expect("temp dir");
    let config = temp.path().join("custom.toml");
    fs::write(&config, "[grouping]\nmode = \"fuzzy\"\n").expect("write config");
    let output = run_raw(
        temp.path(),
        &["--config", config.to_str().expect("path"), "normalize", "555-123-4567"],
    );
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_normalize_prints_canonical_numbers() {
    let temp = TempDir::new().expect("temp dir");
    let stdout = run_cmd(temp.path(), &["normalize", "+1 (555) 123-4567"]);
    assert_eq!(stdout, "+1 (555) 123-4567\t5551234567\n");

    let output = run_raw(temp.path(), &["--json", "normalize", "555-123-4567", "abc"]);
    assert_eq!(output.status.code(), Some(3));
    let results: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(results[0]["canonical"], "5551234567");
    assert!(results[1]["canonical"].is_null());
    assert!(results[1]["error"]
        .as_str()
        .expect("error")
        .contains("invalid number format"));
}

#[test]
fn cli_emits_completions() {
    let temp = TempDir::new().expect("temp dir");
    let stdout = run_cmd(temp.path(), &["completions", "bash"]);
    assert!(stdout.contains("phonegrouper"));
}
