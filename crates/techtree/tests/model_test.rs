use std::path::{Path, PathBuf};
use techtree::{Domain, Error, Model, Node, Position, Status, layout};

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> String {
    let path = repo_root().join("fixtures").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

#[test]
fn model_parses_json_documents() {
    let model = Model::from_json_str(&fixture("basic.json")).unwrap();
    assert!(model.domains.is_empty());
    assert_eq!(model.nodes.len(), 4);

    let c = &model.nodes[2];
    assert_eq!(c.title, "Type checker");
    assert_eq!(c.status, Status::InProgress);
    assert_eq!(c.progress, Some(0.5));
    assert_eq!(model.nodes[3].dependencies, vec!["b", "c"]);
    assert!(model.nodes[0].is_root());
    model.validate().unwrap();
}

#[test]
fn model_parses_yaml_documents() {
    let model = Model::from_yaml_str(&fixture("roadmap.yaml")).unwrap();
    assert_eq!(
        model.domains[1],
        Domain {
            id: "storage".to_string(),
            parent: Some("platform".to_string()),
        }
    );
    let wal = &model.nodes[1];
    assert_eq!(wal.parent_domain.as_deref(), Some("storage"));
    assert_eq!(wal.details.as_deref(), Some("Durable append-only journal."));
    assert_eq!(model.nodes[4].icon.as_deref(), Some("sync"));
    model.validate().unwrap();

    let result = layout(&model.nodes).unwrap();
    assert_eq!(result.position_of("compaction"), Some(Position::new(2, 0)));
    assert_eq!(result.position_of("replication"), Some(Position::new(2, 1)));
    assert_eq!(result.lines.len(), 5);
}

#[test]
fn model_domains_are_optional() {
    let model =
        Model::from_json_str(r#"{ "nodes": [{ "id": "a", "title": "A", "status": 1 }] }"#).unwrap();
    assert!(model.domains.is_empty());
    assert_eq!(model.nodes[0].status, Status::Planned);
    assert!(model.nodes[0].dependencies.is_empty());
}

#[test]
fn model_rejects_out_of_range_status() {
    let err = Model::from_json_str(r#"{ "nodes": [{ "id": "a", "title": "A", "status": 7 }] }"#)
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(
        err.to_string()
            .contains("expected status to be between 1 and 4 but received 7 instead"),
        "{err}"
    );
}

#[test]
fn model_accepts_whole_number_status_written_as_floats() {
    let model = Model::from_json_str(
        r#"{ "nodes": [
            { "id": "a", "title": "A", "status": 1.0 },
            { "id": "b", "title": "B", "status": 3, "dependencies": ["a"] }
        ] }"#,
    )
    .unwrap();
    assert_eq!(model.nodes[0].status, Status::Planned);
    assert_eq!(model.nodes[1].status, Status::InProgress);

    let model = Model::from_yaml_str("nodes:\n  - id: a\n    title: A\n    status: 4.0\n").unwrap();
    assert_eq!(model.nodes[0].status, Status::Done);
}

#[test]
fn model_rejects_fractional_status() {
    let err = Model::from_json_str(r#"{ "nodes": [{ "id": "a", "title": "A", "status": 2.5 }] }"#)
        .unwrap_err();
    assert!(
        err.to_string()
            .contains("expected status to be between 1 and 4 but received 2.5 instead"),
        "{err}"
    );
}

#[test]
fn model_requires_ids_titles_and_status() {
    for doc in [
        r#"{ "nodes": [{ "title": "A", "status": 1 }] }"#,
        r#"{ "nodes": [{ "id": "a", "status": 1 }] }"#,
        r#"{ "nodes": [{ "id": "a", "title": "A" }] }"#,
        r#"{ "nodes": [{ "id": 3, "title": "A", "status": 1 }] }"#,
        r#"{ "nodes": [{ "id": "a", "title": "A", "status": 1, "dependencies": "b" }] }"#,
        r#"{ "domains": [] }"#,
    ] {
        assert!(
            matches!(Model::from_json_str(doc), Err(Error::Json(_))),
            "accepted {doc}"
        );
    }
}

#[test]
fn model_rejects_malformed_yaml() {
    let err = Model::from_yaml_str("nodes:\n  - id: a\n    title: [unterminated\n").unwrap_err();
    assert!(matches!(err, Error::Yaml(_)));
}

#[test]
fn model_status_serializes_as_its_code() {
    let node = Node::new("a", "A").with_status(Status::Soon);
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["status"], 2);
    assert_eq!(json["dependencies"], serde_json::json!([]));
    assert!(json.get("progress").is_none());
}

#[test]
fn model_validation_rejects_duplicate_ids() {
    let model = Model {
        domains: vec![],
        nodes: vec![Node::new("a", "A"), Node::new("a", "again")],
    };
    assert!(matches!(
        model.validate(),
        Err(Error::DuplicateNodeId { id }) if id == "a"
    ));

    let model = Model {
        domains: vec![
            Domain {
                id: "d".to_string(),
                parent: None,
            },
            Domain {
                id: "d".to_string(),
                parent: None,
            },
        ],
        nodes: vec![],
    };
    assert!(matches!(
        model.validate(),
        Err(Error::DuplicateDomainId { id }) if id == "d"
    ));
}

#[test]
fn model_validation_rejects_unknown_domains() {
    let model = Model {
        domains: vec![Domain {
            id: "child".to_string(),
            parent: Some("missing".to_string()),
        }],
        nodes: vec![],
    };
    assert!(matches!(
        model.validate(),
        Err(Error::UnknownDomain { owner, domain }) if owner == "child" && domain == "missing"
    ));

    let model = Model {
        domains: vec![],
        nodes: vec![Node::new("a", "A").with_parent_domain("nowhere")],
    };
    assert!(matches!(
        model.validate(),
        Err(Error::UnknownDomain { owner, .. }) if owner == "a"
    ));
}

#[test]
fn model_validation_rejects_out_of_range_progress() {
    for progress in [-0.1, 1.5, f64::NAN] {
        let model = Model {
            domains: vec![],
            nodes: vec![
                Node::new("a", "A")
                    .with_status(Status::InProgress)
                    .with_progress(progress),
            ],
        };
        assert!(
            matches!(model.validate(), Err(Error::InvalidProgress { .. })),
            "accepted progress {progress}"
        );
    }
}

#[test]
fn model_validation_leaves_unknown_dependencies_to_the_layout() {
    let model = Model {
        domains: vec![],
        nodes: vec![
            Node::new("a", "A"),
            Node::new("b", "B").with_dependencies(["ghost"]),
        ],
    };
    model.validate().unwrap();
    assert!(matches!(
        layout(&model.nodes),
        Err(Error::Unsatisfiable { .. })
    ));
}

#[test]
fn placed_nodes_serialize_with_their_coordinates() {
    let model = Model::from_json_str(&fixture("basic.json")).unwrap();
    let result = layout(&model.nodes).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    let d = json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == "d")
        .unwrap();
    assert_eq!(d["row"], 2);
    assert_eq!(d["column"], 0);
    assert_eq!(d["title"], "Code generation");
    assert_eq!(json["lines"][0]["from"], serde_json::json!({ "row": 0, "column": 0 }));
    assert_eq!(json["lines"][0]["status"], 4);
}
