//! Integration tests for the eid CLI
//!
//! These tests run the binary against the fixture packs and check exit codes
//! and output. Stdout is not a terminal here, so output carries no ANSI codes.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Run eid from an empty temp dir so no eid.toml is discovered by accident.
fn eid(args: &[&str]) -> Output {
    let cwd = tempfile::TempDir::new().expect("should create temp dir");
    Command::new(env!("CARGO_BIN_EXE_eid"))
        .args(args)
        .current_dir(cwd.path())
        .env("XDG_CONFIG_HOME", cwd.path())
        .env_remove("EID_LOG")
        .output()
        .expect("should run eid")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn base_pack() -> String {
    fixtures().join("packs/base.json5").display().to_string()
}

#[test]
fn test_crafting_merged_and_full() {
    let output = eid(&["crafting", "1", "1", "1", "2", "2", "3", "3", "3"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "3{{Crafting3}}2{{Crafting2}}3{{Crafting1}}");

    let output = eid(&["crafting", "--full", "2", "8"]);
    assert_eq!(stdout(&output).trim(), "{{Crafting8}}{{Crafting2}}");
}

#[test]
fn test_crafting_rejects_out_of_range() {
    let output = eid(&["crafting", "9"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_width_counts_icons() {
    let output = eid(&["width", "a{{Heart}}"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "14");
}

#[test]
fn test_fit_prints_markup_lines() {
    let output = eid(&["fit", "aaa aaa aaa", "--width", "35"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "aaa aaa\naaa\n");
}

#[test]
fn test_render_plain_output() {
    let output = eid(&["render", "{{ColorRed}}hot{{CR}} {{Heart}}", "--no-color"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "hot [Heart]\n");
}

#[test]
fn test_render_json_lines() {
    let output = eid(&["render", "aaa aaa aaa", "--json", "-w", "35"]);
    let lines: Vec<String> = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(lines, vec!["aaa aaa", "aaa"]);
}

#[test]
fn test_describe_with_pack() {
    let pack = base_pack();
    let output = eid(&["describe", "collectible", "12", "--pack", &pack, "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let obj: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(obj["name"], "Magic Mushroom");
    assert_eq!(obj["transformation_label"], "Fun Guy, Guppy");
}

#[test]
fn test_describe_language_override() {
    let pack = base_pack();
    let output = eid(&["describe", "collectible", "1", "-p", &pack, "-l", "de", "--no-color"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Die traurige Zwiebel\n"), "{}", text);
    assert!(text.contains("[ArrowUp]"));
}

#[test]
fn test_describe_missing_entry() {
    let output = eid(&["describe", "trinket", "5", "--no-color"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("(No Description available)"));
}

#[test]
fn test_describe_invalid_entity_id() {
    let output = eid(&["describe", "entity", "5.100"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_config_file_packs_and_width() {
    let config = fixtures().join("eid.toml");
    let config = config.display().to_string();
    let output = eid(&["describe", "collectible", "1", "--config", &config, "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let obj: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(obj["language"], "de");
}

#[test]
fn test_strict_pack_failure() {
    let broken = fixtures().join("packs/broken.json5").display().to_string();

    let lenient = eid(&["width", "x", "-p", &broken]);
    assert!(lenient.status.success());
    assert!(String::from_utf8_lossy(&lenient.stderr).contains("Warning"));

    let strict = eid(&["width", "x", "-p", &broken, "--strict"]);
    assert_eq!(strict.status.code(), Some(1));
}
