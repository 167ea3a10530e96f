mod common;

use scenic_nav_lib::dataset::{read_edges, read_spots, write_edges, write_spots};
use scenic_nav_lib::{
    construct_path, dijkstra, seed_graph, Category, Dataset, EdgeRecord, EdgeType,
    EffectiveWeight, SeedReport,
};

use common::{ids, spot, temple_of_heaven};

fn record(from: i64, to: i64, weight: f64, crowded: bool) -> EdgeRecord {
    EdgeRecord {
        from,
        to,
        weight,
        kind: EdgeType::Walking,
        crowded,
    }
}

#[test]
fn mirror_rows_merge_instead_of_duplicating() {
    let edges = [record(1, 2, 10.0, false), record(2, 1, 10.0, true)];
    let (graph, report) = seed_graph(false, [spot(1), spot(2)], &edges);

    assert_eq!(
        report,
        SeedReport {
            added: 1,
            skipped: 0,
            merged: 1
        }
    );
    assert_eq!(graph.edge_count(), 2);
    assert!(!graph.edge_between(1, 2).unwrap().crowded);
    assert!(graph.edge_between(2, 1).unwrap().crowded);
}

#[test]
fn unknown_endpoints_are_skipped() {
    let edges = [record(1, 2, 10.0, false), record(1, 77, 5.0, false)];
    let (graph, report) = seed_graph(true, [spot(1), spot(2)], &edges);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.added, 1);
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.is_directed());
}

#[test]
fn sample_graph_carries_per_direction_crowding() {
    let dataset = temple_of_heaven();
    let graph = &dataset.graph;

    let gate = graph.edge_between(9, 1).expect("east gate connects to the hall");
    assert!(gate.crowded);
    assert_eq!(gate.effective_weight(), 750.0);
    assert_eq!(graph.edge_between(3, 4).unwrap().kind, EdgeType::Stairs);

    let tree = dijkstra(graph, 1, &EffectiveWeight);
    assert_eq!(ids(&construct_path(graph, &tree, 2)), vec![1, 3, 2]);
    assert_eq!(graph.spot(6).unwrap().category, Category::Palace);
}

#[test]
fn directed_sample_keeps_listed_rows_only() {
    let dataset = Dataset::sample(true).expect("sample loads directed");
    assert_eq!(dataset.graph.edge_count(), 24);
    assert_eq!(dataset.report.added, 24);
    assert_eq!(dataset.report.merged, 0);
}

#[test]
fn saved_files_reload_to_the_same_graph() {
    let dataset = temple_of_heaven();

    let mut spots_out = Vec::new();
    write_spots(&mut spots_out, dataset.spots.iter()).expect("spots encode");
    let mut edges_out = Vec::new();
    write_edges(&mut edges_out, &dataset.graph).expect("edges encode");

    let header = std::str::from_utf8(&edges_out)
        .expect("utf-8 csv")
        .lines()
        .next()
        .map(str::to_string);
    assert_eq!(header.as_deref(), Some("FromId,ToId,Weight,Type,IsCrowded"));

    let reloaded =
        Dataset::from_readers(spots_out.as_slice(), edges_out.as_slice(), false).expect("reload");
    assert_eq!(reloaded.spots.len(), dataset.spots.len());
    // Adjacency order may differ after a reload; the set of edges may not.
    let sorted = |mut records: Vec<EdgeRecord>| {
        records.sort_by_key(|r| (r.from, r.to));
        records
    };
    assert_eq!(
        sorted(reloaded.graph.edge_records()),
        sorted(dataset.graph.edge_records())
    );

    let hall = reloaded.spots.find_by_id(1).expect("hall present");
    assert_eq!(hall.name_en, "Hall of Prayer for Good Harvests");
    assert_eq!(hall.popularity(), 95);
    assert_eq!(hall.image_path.as_deref(), Some("/images/spots/qiniandian.jpg"));
}

#[test]
fn duplicate_spot_ids_are_rejected() {
    let json = r#"[
        {"id":1,"nameZh":"a","nameEn":"a","x":0,"y":0,"category":"建筑"},
        {"id":1,"nameZh":"b","nameEn":"b","x":1,"y":1,"category":"亭子"}
    ]"#;
    let err = read_spots(json.as_bytes()).expect_err("duplicate id");
    assert!(err.to_string().contains("duplicate spot id 1"));
}

#[test]
fn malformed_csv_rows_report_their_line() {
    let csv = "FromId,ToId,Weight,Type,IsCrowded\n1,2,3,WALKING,false\nx,2,3,WALKING,false\n";
    let err = read_edges(csv.as_bytes()).expect_err("bad id");
    assert!(err.to_string().contains("edge row 3"));
}

#[test]
fn written_edges_follow_vertex_then_adjacency_order() {
    // Records arrive out of vertex order; the saver lists by source vertex.
    let edges = [
        record(3, 1, 5.0, false),
        record(1, 2, 7.0, false),
        record(2, 3, 4.0, true),
        record(1, 3, 9.0, false),
    ];
    let (graph, _) = seed_graph(true, [spot(1), spot(2), spot(3)], &edges);

    let mut out = Vec::new();
    write_edges(&mut out, &graph).expect("edges encode");
    let text = String::from_utf8(out).expect("utf-8 csv");
    let pairs: Vec<(&str, &str)> = text
        .lines()
        .skip(1)
        .map(|line| {
            let mut fields = line.split(',');
            (
                fields.next().expect("from column"),
                fields.next().expect("to column"),
            )
        })
        .collect();

    assert_eq!(
        pairs,
        vec![("1", "2"), ("1", "3"), ("2", "3"), ("3", "1")]
    );
    assert!(text.lines().nth(3).expect("row 2-3").ends_with("true"));
}
