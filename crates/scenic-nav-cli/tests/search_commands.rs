mod common;

use predicates::prelude::*;
use predicates::str::contains;

use common::{cli, sample_command};

#[test]
fn search_by_category_accepts_either_language() {
    sample_command()
        .args(["search", "--category", "石刻"])
        .assert()
        .success()
        .stdout(contains("七星石"))
        .stdout(contains("三音石"))
        .stdout(contains("2 spot(s)"));

    sample_command()
        .args(["--lang", "en", "search", "--category", "stone-carving"])
        .assert()
        .success()
        .stdout(contains("[stone_carving]"))
        .stdout(contains("2 spot(s)"));
}

#[test]
fn unknown_category_is_rejected_by_the_parser() {
    sample_command()
        .args(["search", "--category", "museum"])
        .assert()
        .failure()
        .stderr(contains("unknown spot category"));
}

#[test]
fn accessible_only_hides_the_bridge() {
    sample_command()
        .args(["search", "--accessible-only"])
        .assert()
        .success()
        .stdout(contains("丹陛桥").not())
        .stdout(contains("9 spot(s)"));
}

#[test]
fn fuzzy_search_tolerates_typos() {
    sample_command()
        .args(["--lang", "en", "search", "--text", "Echo Wal", "--fuzzy"])
        .assert()
        .success()
        .stdout(contains("Echo Wall"))
        .stdout(contains("1 spot(s)"));
}

#[test]
fn sorted_by_popularity_lists_the_hall_first() {
    let output = sample_command()
        .args(["--format", "json", "search", "--sort", "popularity"])
        .output()
        .expect("run search");
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("search output is JSON");
    let spots = value.as_array().expect("spot array");
    assert_eq!(spots.len(), 10);
    assert_eq!(spots[0]["id"], 1);
    assert_eq!(spots[1]["id"], 9);
}

#[test]
fn init_writes_sample_and_refuses_to_overwrite() {
    let dir = tempfile::tempdir().expect("create temp dir");
    cli()
        .arg("--data-dir")
        .arg(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Sample data written"));
    assert!(dir.path().join("spots.json").exists());
    assert!(dir.path().join("graph.csv").exists());

    cli()
        .arg("--data-dir")
        .arg(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(contains("pass --force to overwrite"));

    cli()
        .arg("--data-dir")
        .arg(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();

    cli()
        .arg("--data-dir")
        .arg(dir.path())
        .args(["route", "--from", "1", "--to", "2"])
        .assert()
        .success()
        .stdout(contains("cost: 650.0"));
}
