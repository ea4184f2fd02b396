use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const COMMENTS: &str = r#"{
    "comments": [
        {
            "user": {"name": "Alice", "avatar": "https://img/a.png"},
            "text": "Total points: 50",
            "replyCount": 1,
            "commentId": {"resourceId": "c1"}
        },
        {
            "user": {"name": "Bob", "avatar": "https://img/b.png"},
            "text": "I got 10 points",
            "replyCount": 0,
            "commentId": {"resourceId": "c2"}
        },
        {
            "user": {"name": "Carol"},
            "text": "lovely chapter"
        }
    ]
}"#;

const REPLIES_C1: &str = r#"{"comments": [{"user": {"name": "Bob"}, "text": "actually 12.5 pts"}]}"#;

fn leaderboard(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("leaderboard").unwrap();
    cmd.arg("--no-color")
        .arg("--config")
        .arg(temp.path().join("config.toml"))
        .env_remove("LEADERBOARD_CONFIG");
    cmd
}

fn write_fixtures(dir: &Path) {
    fs::write(dir.join("comments.json"), COMMENTS).unwrap();
    fs::create_dir_all(dir.join("replies")).unwrap();
    fs::write(dir.join("replies/c1.json"), REPLIES_C1).unwrap();
}

#[test]
fn test_help() {
    let temp = TempDir::new().unwrap();
    leaderboard(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("parse"));
}

#[test]
fn test_parse_argument() {
    let temp = TempDir::new().unwrap();
    leaderboard(&temp)
        .args(["parse", "Total points for August: 1634"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1634 points"));
}

#[test]
fn test_parse_no_points() {
    let temp = TempDir::new().unwrap();
    leaderboard(&temp)
        .args(["parse", "I loved this chapter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No points found"));
}

#[test]
fn test_parse_stdin_json() {
    let temp = TempDir::new().unwrap();
    leaderboard(&temp)
        .args(["parse", "--json"])
        .write_stdin("Reading: 20\nBonus: 4\n= 24\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"maxPoints\": 24.0"))
        .stdout(predicate::str::contains("\"pointsFound\": true"));
}

#[test]
fn test_parse_explain() {
    let temp = TempDir::new().unwrap();
    leaderboard(&temp)
        .args(["parse", "--explain", "5 points and 12 pts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 points"))
        .stdout(predicate::str::contains("direct"));
}

#[test]
fn test_build_text_with_replies() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path());

    leaderboard(&temp)
        .arg("build")
        .arg("--comments")
        .arg(temp.path().join("comments.json"))
        .arg("--replies-dir")
        .arg(temp.path().join("replies"))
        .args(["--reply-delay", "0", "--format", "text", "--no-cache"])
        .assert()
        .success()
        .stdout("1. Alice: 50 points\n2. Bob: 12.5 points\n")
        .stderr(predicate::str::contains("Ranked 2 readers"));
}

#[test]
fn test_build_include_unscored() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path());

    leaderboard(&temp)
        .arg("build")
        .arg("--comments")
        .arg(temp.path().join("comments.json"))
        .args(["--format", "text", "--no-cache", "--include-unscored"])
        .assert()
        .success()
        .stdout("1. Alice: 50 points\n2. Bob: 10 points\n3. Carol: 0 points\n");
}

#[test]
fn test_build_json_envelope() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path());

    leaderboard(&temp)
        .arg("build")
        .arg("--comments")
        .arg(temp.path().join("comments.json"))
        .args(["--format", "json", "--no-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"))
        .stdout(predicate::str::contains("\"avatarUrl\": \"https://img/a.png\""));
}

#[test]
fn test_build_writes_output_file() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path());
    let output = temp.path().join("out/board");

    leaderboard(&temp)
        .arg("build")
        .arg("--comments")
        .arg(temp.path().join("comments.json"))
        .args(["--format", "markdown", "--no-cache", "--output"])
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(temp.path().join("out/board.md")).unwrap();
    assert!(content.contains("| 1 | Alice | 50 |"));
}

#[test]
fn test_build_reuses_cache() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path());
    let cache_dir = temp.path().join("store");

    let run = || {
        let mut cmd = leaderboard(&temp);
        cmd.arg("build")
            .arg("--comments")
            .arg(temp.path().join("comments.json"))
            .arg("--cache-dir")
            .arg(&cache_dir)
            .args(["--format", "text"]);
        cmd
    };

    run()
        .assert()
        .success()
        .stderr(predicate::str::contains("Ranked 2 readers"));
    assert!(cache_dir.join("cache/leaderboard.json").exists());

    run()
        .assert()
        .success()
        .stdout("1. Alice: 50 points\n2. Bob: 10 points\n")
        .stderr(predicate::str::contains("Using cached leaderboard"));

    run()
        .arg("--refresh")
        .assert()
        .success()
        .stderr(predicate::str::contains("Ranked 2 readers"));
}

#[test]
fn test_build_cache_follows_ranking_flags() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path());
    let cache_dir = temp.path().join("store");

    let run = || {
        let mut cmd = leaderboard(&temp);
        cmd.arg("build")
            .arg("--comments")
            .arg(temp.path().join("comments.json"))
            .arg("--cache-dir")
            .arg(&cache_dir)
            .args(["--format", "text", "--reply-delay", "0"]);
        cmd
    };
    let with_replies = || {
        let mut cmd = run();
        cmd.arg("--include-unscored")
            .arg("--replies-dir")
            .arg(temp.path().join("replies"));
        cmd
    };

    run()
        .assert()
        .success()
        .stdout("1. Alice: 50 points\n2. Bob: 10 points\n");

    with_replies()
        .assert()
        .success()
        .stdout("1. Alice: 50 points\n2. Bob: 12.5 points\n3. Carol: 0 points\n")
        .stderr(predicate::str::contains("Ranked 3 readers"));

    with_replies()
        .assert()
        .success()
        .stdout("1. Alice: 50 points\n2. Bob: 12.5 points\n3. Carol: 0 points\n")
        .stderr(predicate::str::contains("Using cached leaderboard"));

    fs::write(
        temp.path().join("replies/c1.json"),
        r#"{"comments": [{"user": {"name": "Bob"}, "text": "Bob: 99 points"}]}"#,
    )
    .unwrap();

    with_replies()
        .assert()
        .success()
        .stdout("1. Bob: 99 points\n2. Alice: 50 points\n3. Carol: 0 points\n")
        .stderr(predicate::str::contains("Ranked 3 readers"));

    run()
        .assert()
        .success()
        .stdout("1. Alice: 50 points\n2. Bob: 10 points\n")
        .stderr(predicate::str::contains("Ranked 2 readers"));
}

#[test]
fn test_build_missing_comments_file() {
    let temp = TempDir::new().unwrap();
    leaderboard(&temp)
        .arg("build")
        .arg("--comments")
        .arg(temp.path().join("absent.json"))
        .arg("--no-cache")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_cache_status_and_clear() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path());
    let cache_dir = temp.path().join("store");

    leaderboard(&temp)
        .args(["cache", "status", "--cache-dir"])
        .arg(&cache_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No cached leaderboard"));

    leaderboard(&temp)
        .arg("build")
        .arg("--comments")
        .arg(temp.path().join("comments.json"))
        .arg("--cache-dir")
        .arg(&cache_dir)
        .assert()
        .success();

    leaderboard(&temp)
        .args(["cache", "status", "--cache-dir"])
        .arg(&cache_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Next refresh in"));

    leaderboard(&temp)
        .args(["cache", "show", "--cache-dir"])
        .arg(&cache_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Alice: 50 points"))
        .stdout(predicate::str::contains("rainbow-bookclub-september-2025"));

    leaderboard(&temp)
        .args(["cache", "clear", "--cache-dir"])
        .arg(&cache_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache cleared"));

    assert!(!cache_dir.join("cache/leaderboard.json").exists());
}

#[test]
fn test_config_path_and_show() {
    let temp = TempDir::new().unwrap();

    leaderboard(&temp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    leaderboard(&temp)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"chapter_id\": \"1573385572\""));
}

#[test]
fn test_config_reset_and_validate() {
    let temp = TempDir::new().unwrap();

    leaderboard(&temp)
        .args(["config", "reset", "--force"])
        .assert()
        .success();
    assert!(temp.path().join("config.toml").exists());

    leaderboard(&temp)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All values are usable"));
}

#[test]
fn test_invalid_config_fails_build() {
    let temp = TempDir::new().unwrap();
    write_fixtures(temp.path());
    fs::write(
        temp.path().join("config.toml"),
        "[cache]\nrefresh_interval_secs = 0\n",
    )
    .unwrap();

    leaderboard(&temp)
        .arg("build")
        .arg("--comments")
        .arg(temp.path().join("comments.json"))
        .arg("--no-cache")
        .assert()
        .failure()
        .stderr(predicate::str::contains("refresh_interval_secs"));
}
