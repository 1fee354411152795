use hexscale::{Config, HexScaleError, HierarchyBuilder, Node, RewardGraph};

const NODES: &str = "address,name,lat,lng,reward_scale_correct,status\n\
    11aa,quiet-lime-owl,37.7749,-122.4194,0.5,online\n\
    11bb,loud-red-cat,37.7749,-122.4194,0.5,online\n\
    11cc,brave-blue-fox,40.7128,-74.0060,1.0,offline\n";

fn write_nodes(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("nodes.csv");
    std::fs::write(&path, contents).expect("write node file");
    path
}

#[test]
fn test_scales_from_node_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_nodes(&dir, NODES);

    let graph = RewardGraph::from_csv(&path, Config::default()).unwrap();
    assert_eq!(graph.len(), 3);

    let scales = graph.compute_reward_scales().unwrap();
    // two nodes share a res-10 cell capped at one
    assert_eq!(scales["11aa"], 0.5);
    assert_eq!(scales["11bb"], 0.5);
    assert_eq!(scales["11cc"], 1.0);

    for node in graph.nodes() {
        assert_eq!(node.reward_scale_correct, Some(scales[&node.id]));
        assert_eq!(node.attributes.len(), 1);
    }
}

#[test]
fn test_graph_materializes_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_nodes(&dir, NODES);
    let graph = RewardGraph::from_csv(&path, Config::default()).unwrap();

    assert!(!graph.is_computed());
    let first = graph.reward_scale("11aa").unwrap();
    assert!(graph.is_computed());
    let second = graph.reward_scale("11bb").unwrap();
    assert_eq!(first, second);
    assert_eq!(graph.hierarchy().unwrap().generation(), 1);
}

#[test]
fn test_hierarchy_behind_graph() {
    let mut graph = HierarchyBuilder::new().build_graph().unwrap();
    graph
        .add_node(Node::new("a", "alpha", 37.7749, -122.4194).with_address("a"))
        .unwrap();
    graph.geo_to_node(37.7749, -122.4194, Some("b")).unwrap();

    let hierarchy = graph.hierarchy().unwrap();
    assert_eq!(hierarchy.resident_count(), 2);
    let base = hierarchy.cells_at(11);
    assert_eq!(base.len(), 1);
    assert_eq!(base[0].residents, vec!["alpha", "b"]);
}

#[test]
fn test_unknown_node_and_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_nodes(&dir, "name,lat,lng\nowl,north,1.0\n");

    assert!(matches!(
        RewardGraph::from_csv(&path, Config::default()),
        Err(HexScaleError::InvalidRecord { line: 2, .. })
    ));
    assert!(matches!(
        RewardGraph::from_csv(dir.path().join("missing.csv"), Config::default()),
        Err(HexScaleError::Io(_))
    ));

    let graph = RewardGraph::new(Config::default()).unwrap();
    assert!(matches!(
        graph.reward_scale("nobody"),
        Err(HexScaleError::UnknownNode(_))
    ));
}

#[test]
fn test_empty_graph_computes_nothing() {
    let graph = RewardGraph::new(Config::default()).unwrap();
    assert!(graph.compute_reward_scales().unwrap().is_empty());
    assert!(graph.hierarchy().unwrap().is_materialized());
}

#[cfg(feature = "geojson")]
#[test]
fn test_export_graph_level() {
    let mut graph = RewardGraph::new(Config::default()).unwrap();
    graph.geo_to_node(37.7749, -122.4194, Some("a")).unwrap();

    let text = hexscale::hierarchy_to_geojson(graph.hierarchy().unwrap(), 10).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["features"].as_array().map(Vec::len), Some(1));
}
