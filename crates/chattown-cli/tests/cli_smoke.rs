use std::fs;
use std::path::PathBuf;
use std::process::Command;
use uuid::Uuid;

fn chattown_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_chattown"))
}

fn minimal_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/minimal.json")
}

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chattown-cli-test-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

#[test]
fn list_minimal_shows_summaries_and_counters() {
    let output = Command::new(chattown_bin())
        .arg("list")
        .arg(minimal_fixture())
        .output()
        .expect("failed to run chattown list");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // conv-1 has a real title; conv-2 falls back to its first user message.
    assert!(stdout.contains("Rust borrow checker help"));
    assert!(stdout.contains("Summarize the plan for the week"));
    assert!(stdout.contains("2 of 3 record(s) normalized."));
}

#[test]
fn info_minimal_reports_skipped_record() {
    let output = Command::new(chattown_bin())
        .arg("info")
        .arg(minimal_fixture())
        .output()
        .expect("failed to run chattown info");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Records:      3"));
    assert!(stdout.contains("Processed:    2"));
    assert!(stdout.contains("Skipped:      1"));
}

#[test]
fn search_matches_message_content() {
    let output = Command::new(chattown_bin())
        .arg("search")
        .arg(minimal_fixture())
        .arg("closure")
        .output()
        .expect("failed to run chattown search");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("conv-1"));
    assert!(!stdout.contains("conv-2"));
}

#[test]
fn export_all_round_trips_original_records() {
    let dir = temp_dir();

    let output = Command::new(chattown_bin())
        .arg("export")
        .arg(minimal_fixture())
        .arg("--all")
        .arg("--output-dir")
        .arg(&dir)
        .output()
        .expect("failed to run chattown export");

    assert!(output.status.success());
    let exported = dir.join("selected_collection.json");
    assert!(exported.exists());

    let contents = fs::read_to_string(&exported).expect("failed to read export");
    let records: serde_json::Value =
        serde_json::from_str(&contents).expect("export is not valid JSON");
    let records = records.as_array().expect("export is not an array");
    // The skipped record is not part of the normalized set, so only two
    // conversations round-trip.
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "conv-1");
    // Hidden nodes survive in the original data even though they are
    // excluded from the normalized transcript.
    assert!(contents.contains("internal system preamble"));
}

#[test]
fn export_with_empty_selection_writes_nothing() {
    let dir = temp_dir();

    let output = Command::new(chattown_bin())
        .arg("export")
        .arg(minimal_fixture())
        .arg("--output-dir")
        .arg(&dir)
        .output()
        .expect("failed to run chattown export");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Nothing to export"));
    assert!(!dir.join("selected_collection.json").exists());
}

#[test]
fn export_unselected_writes_complement() {
    let dir = temp_dir();

    let output = Command::new(chattown_bin())
        .arg("export")
        .arg(minimal_fixture())
        .arg("--ids")
        .arg("conv-1")
        .arg("--unselected")
        .arg("--output-dir")
        .arg(&dir)
        .output()
        .expect("failed to run chattown export");

    assert!(output.status.success());
    let exported = dir.join("unselected_conversations.json");
    let contents = fs::read_to_string(&exported).expect("failed to read export");
    let records: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], "conv-2");
}

#[test]
fn transcript_writes_role_prefixed_document() {
    let dir = temp_dir();

    let output = Command::new(chattown_bin())
        .arg("transcript")
        .arg(minimal_fixture())
        .arg("conv-1")
        .arg("--output-dir")
        .arg(&dir)
        .output()
        .expect("failed to run chattown transcript");

    assert!(output.status.success());
    let path = dir.join("ChatTown_Obsidian_Rust_borrow_checker_help.txt");
    assert!(path.exists());

    let contents = fs::read_to_string(&path).expect("failed to read transcript");
    assert!(contents.contains("\n---\n"));
    assert!(contents.contains("USER: Why does the borrow checker reject this closure?"));
    assert!(contents.contains("ASSISTANT: Because the mutable borrow is still live"));
    // Hidden nodes never reach the transcript.
    assert!(!contents.contains("internal system preamble"));
}
