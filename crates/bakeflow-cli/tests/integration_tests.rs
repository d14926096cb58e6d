//! End-to-end tests for the bakeflow binary, built-in recipes only.

use assert_cmd::Command;
use predicates::prelude::*;

fn bakeflow() -> Command {
    let mut cmd = Command::cargo_bin("bakeflow").unwrap();
    // Keep ANSI codes out of assertions.
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_flag() {
    bakeflow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bakeflow"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("scale"));
}

#[test]
fn version_flag() {
    bakeflow()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn list_shows_builtin_recipes() {
    bakeflow()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("chocolate-chip-cookies"))
        .stdout(predicate::str::contains("vanilla-cupcakes"));
}

#[test]
fn list_format_list_is_one_id_per_line() {
    bakeflow()
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chocolate-chip-cookies\n"));
}

#[test]
fn list_format_json_is_parseable() {
    let output = bakeflow()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(parsed.as_array().unwrap().len() >= 2);
}

#[test]
fn show_renders_steps_with_substituted_params() {
    bakeflow()
        .args(["show", "chocolate-chip-cookies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chocolate Chip Cookies"))
        .stdout(predicate::str::contains("Preheat the oven to 375°F"))
        .stdout(predicate::str::contains("Bake at 375°F for 10 minutes"));
}

#[test]
fn show_json_round_trips() {
    let output = bakeflow()
        .args(["show", "chocolate-chip-cookies", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["id"], "chocolate-chip-cookies");
}

#[test]
fn scale_renames_and_scales() {
    bakeflow()
        .args(["scale", "chocolate-chip-cookies", "--servings", "48"])
        .assert()
        .success()
        // 48 servings from a base of 24 doubles every amount.
        .stdout(predicate::str::contains("(48 servings)"))
        .stdout(predicate::str::contains("4.5 cups All-Purpose Flour"));
}

#[test]
fn check_reports_success_with_a_full_pantry() {
    bakeflow()
        .args([
            "check",
            "chocolate-chip-cookies",
            "--have",
            "flour=5",
            "--have",
            "baking-soda=2",
            "--have",
            "salt=2",
            "--have",
            "butter=2",
            "--have",
            "sugar=2",
            "--have",
            "brown-sugar=2",
            "--have",
            "eggs=4",
            "--have",
            "vanilla=2",
            "--have",
            "chocolate-chips=3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("You can make"));
}

#[test]
fn check_reports_shortfalls() {
    bakeflow()
        .args(["check", "chocolate-chip-cookies", "--have", "flour=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("more All-Purpose Flour"))
        .stdout(predicate::str::contains("Chocolate Chips"));
}

#[test]
fn custom_recipe_document_is_loaded() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"{
            "recipes": [{
                "id": "shortbread",
                "metadata": {
                    "name": "Shortbread",
                    "baseServings": 8,
                    "difficulty": "easy",
                    "bakingTime": 45
                },
                "steps": [
                    { "template": "preheat", "params": { "temp": 325 } },
                    { "template": "bake", "params": { "temp": 325, "time": 45 } }
                ]
            }]
        }"#,
    )
    .unwrap();

    bakeflow()
        .args(["list", "--format", "list"])
        .arg("--recipes")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("shortbread"))
        .stdout(predicate::str::contains("chocolate-chip-cookies").not());
}
