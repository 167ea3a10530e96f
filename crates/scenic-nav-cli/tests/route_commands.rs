mod common;

use predicates::prelude::*;
use predicates::str::contains;

use common::{cli, disconnected_data, sample_command};

#[test]
fn route_prints_shortest_path_with_totals() {
    sample_command()
        .args(["--lang", "en", "route", "--from", "1", "--to", "2"])
        .assert()
        .success()
        .stdout(contains(
            "Hall of Prayer for Good Harvests -> Circular Mound Altar (dijkstra, distance):",
        ))
        .stdout(contains(" 2. Imperial Vault of Heaven (3)"))
        .stdout(contains(" 3. Circular Mound Altar (2)"))
        .stdout(contains("stops: 3  cost: 650.0"));
}

#[test]
fn a_star_agrees_with_dijkstra_on_the_sample() {
    sample_command()
        .args(["route", "--from", "9", "--to", "6", "--algorithm", "a-star"])
        .assert()
        .success()
        .stdout(contains("(a-star, distance)"))
        .stdout(contains(" 2. 祈年殿 (1)"))
        .stdout(contains("cost: 800.0"));
}

#[test]
fn avoiding_crowds_reports_the_inflated_cost() {
    sample_command()
        .args(["route", "--from", "9", "--to", "1", "--avoid-crowds"])
        .assert()
        .success()
        .stdout(contains("avoid-crowds"))
        .stdout(contains("cost: 750.0"));
}

#[test]
fn route_json_output_is_machine_readable() {
    let output = sample_command()
        .args(["--format", "json", "route", "--from", "1", "--to", "2"])
        .output()
        .expect("run route");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("route output is JSON");
    assert_eq!(value["found"], true);
    assert_eq!(value["algorithm"], "dijkstra");
    let ids: Vec<u64> = value["path"]["stops"]
        .as_array()
        .expect("stops array")
        .iter()
        .map(|stop| stop["id"].as_u64().expect("numeric id"))
        .collect();
    assert_eq!(ids, vec![1, 3, 2]);
}

#[test]
fn unreachable_target_exits_with_failure() {
    let data = disconnected_data();
    cli()
        .arg("--data-dir")
        .arg(data.path())
        .args(["--lang", "en", "route", "--from", "1", "--to", "2"])
        .assert()
        .failure()
        .code(1)
        .stdout(contains("No route from North Gate to South Gate"));
}

#[test]
fn unknown_spot_is_an_error() {
    sample_command()
        .args(["route", "--from", "1", "--to", "99"])
        .assert()
        .failure()
        .stderr(contains("unknown spot id 99"));
}

#[test]
fn missing_data_directory_names_the_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    cli()
        .arg("--data-dir")
        .arg(dir.path())
        .args(["route", "--from", "1", "--to", "2"])
        .assert()
        .failure()
        .stderr(contains("spots.json"));
}

#[test]
fn paths_are_ranked_cheapest_first() {
    sample_command()
        .args(["paths", "--from", "1", "--to", "2", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("Path 1:"))
        .stdout(contains("cost: 650.0"))
        .stdout(contains("Path 2:").not())
        .stdout(predicate::str::is_match(r"1 of \d+ path\(s\) shown").expect("valid regex"));
}
