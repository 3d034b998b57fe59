use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// Config lookups stay inside a scratch dir so tests never touch real config.
fn subtrans(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("subtrans").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd.env("HOME", config_home.path());
    cmd
}

#[test]
fn languages_lists_the_fixed_target_set() {
    let home = TempDir::new().unwrap();
    subtrans(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("English (en)"))
        .stdout(predicate::str::contains("Indonesian (id)"))
        .stdout(predicate::str::contains("Hindi (hi)"))
        .stdout(predicate::str::contains("Spanish (es)"));
}

#[test]
fn config_show_displays_defaults() {
    let home = TempDir::new().unwrap();
    subtrans(&home)
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtitle Language: ko"));
}

#[test]
fn translate_rejects_url_without_marker_before_any_network_call() {
    let home = TempDir::new().unwrap();
    subtrans(&home)
        .args(["translate", "https://example.com/video/1", "--to", "es", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid YouTube URL"));
}

#[test]
fn translate_requires_a_target_language() {
    let home = TempDir::new().unwrap();
    subtrans(&home)
        .args(["translate", "https://youtube.com/watch?v=ABC"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--to"));
}

#[test]
fn unknown_target_language_is_rejected() {
    let home = TempDir::new().unwrap();
    subtrans(&home)
        .args(["translate", "https://youtube.com/watch?v=ABC", "--to", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
