use std::collections::HashSet;
use std::path::Path;

use flexinfer::layout::{ContainerIds, contains, optimize_design, process_node_relationships, rect_of};
use flexinfer::{Config, Design, LayoutConfig, PositionedNode, optimize_json, parse_design};

fn load_fixture(name: &str) -> Design {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_design(&input).expect("parse failed")
}

fn collect_ids(design: &Design) -> HashSet<String> {
    let mut ids = HashSet::new();
    for root in &design.nodes {
        root.visit(&mut |node| {
            ids.insert(node.id.clone());
        });
    }
    ids
}

fn find<'a>(design: &'a Design, id: &str) -> &'a PositionedNode {
    let mut found = None;
    for root in &design.nodes {
        root.visit(&mut |node| {
            if node.id == id {
                found = Some(node);
            }
        });
    }
    found.unwrap_or_else(|| panic!("node {id} missing"))
}

fn assert_tree_invariants(input: &Design, output: &Design, fixture: &str) {
    let input_ids = collect_ids(input);
    let output_ids = collect_ids(output);
    for id in &input_ids {
        assert!(output_ids.contains(id), "{fixture}: lost node {id}");
    }
    assert_eq!(
        output.node_count(),
        output_ids.len(),
        "{fixture}: duplicate ids in output"
    );

    for root in &output.nodes {
        root.visit(&mut |node| {
            if input_ids.contains(&node.id) {
                return;
            }
            assert_eq!(node.node_type, "FRAME", "{fixture}: {}", node.id);
            assert_eq!(node.style_str("display"), Some("flex"), "{fixture}: {}", node.id);
            if let Some(bounds) = rect_of(node) {
                for child in node.children() {
                    if let Some(child_rect) = rect_of(child) {
                        assert!(
                            contains(&bounds, &child_rect),
                            "{fixture}: {} escapes {}",
                            child.id,
                            node.id
                        );
                    }
                }
            }
        });
    }
}

#[test]
fn optimize_all_fixtures() {
    let config = LayoutConfig::default();
    // Keep this list explicit so new fixtures must be added intentionally.
    let fixtures = [
        "toolbar.json",
        "sidebar.json",
        "cards.json",
        "scattered.json",
        "nested.json5",
        "flat_page.json",
    ];
    for fixture in fixtures {
        let input = load_fixture(fixture);
        let output = optimize_design(input.clone(), &config);
        assert_tree_invariants(&input, &output, fixture);
    }
}

#[test]
fn toolbar_frame_becomes_row() {
    let input = load_fixture("toolbar.json");
    assert_eq!(input.name, "Toolbar");
    let output = optimize_design(input, &LayoutConfig::default());
    let toolbar = &output.nodes[0];
    assert_eq!(toolbar.style_str("display"), Some("flex"));
    assert_eq!(toolbar.style_str("flexDirection"), Some("row"));
    assert_eq!(toolbar.style_str("gap"), Some("10px"));
    assert_eq!(toolbar.style_str("backgroundColor"), Some("#ffffff"));

    let title = find(&output, "1:3");
    assert_eq!(title.extra.get("text").and_then(|v| v.as_str()), Some("Inbox"));
    assert_eq!(title.style("fontWeight").map(|v| v.as_px()), Some(600.0));
}

#[test]
fn sidebar_group_becomes_column() {
    let output = optimize_design(load_fixture("sidebar.json"), &LayoutConfig::default());
    let sidebar = &output.nodes[0];
    assert_eq!(sidebar.style_str("flexDirection"), Some("column"));
    assert_eq!(sidebar.style_str("gap"), Some("10px"));
    assert_eq!(sidebar.style_str("alignItems"), Some("flex-start"));
    assert_eq!(sidebar.child_count(), 3);
}

#[test]
fn card_bands_are_wrapped() {
    let output = optimize_design(load_fixture("cards.json"), &LayoutConfig::default());
    let list = &output.nodes[0];
    assert_eq!(list.style_str("flexDirection"), Some("row"));
    assert!(list.style("gap").is_none());

    let groups: Vec<Vec<&str>> = list
        .children()
        .iter()
        .map(|group| group.children().iter().map(|c| c.id.as_str()).collect())
        .collect();
    assert_eq!(groups, [vec!["3:2", "3:3"], vec!["3:4", "3:5"]]);
    assert_eq!(list.children()[0].id, "container-1-group-0");
    assert_eq!(list.children()[1].name, "Layout Container group-1");
}

#[test]
fn scattered_children_are_untouched() {
    let input = load_fixture("scattered.json");
    let output = optimize_design(input.clone(), &LayoutConfig::default());
    assert_eq!(input, output);
}

#[test]
fn nested_json5_is_optimized_bottom_up() {
    let output = optimize_design(load_fixture("nested.json5"), &LayoutConfig::default());
    let page = find(&output, "5:1");
    assert_eq!(page.style_str("flexDirection"), Some("column"));
    assert_eq!(page.style_str("gap"), Some("20px"));

    let header = find(&output, "5:2");
    assert_eq!(header.style_str("flexDirection"), Some("row"));
    assert_eq!(header.style_str("gap"), Some("16px"));

    let body = find(&output, "5:5");
    assert!(body.style("display").is_none());
}

#[test]
fn flat_page_resolves_containment() {
    let input = load_fixture("flat_page.json");
    let nested = process_node_relationships(input.nodes);
    let roots: Vec<&str> = nested.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(roots, ["6:1", "6:4"]);
    let children: Vec<&str> = nested[0].children().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(children, ["6:2", "6:3"]);

    let output = optimize_design(Design::from_nodes(nested), &LayoutConfig::default());
    assert_eq!(output.nodes[0].style_str("flexDirection"), Some("row"));
    assert_eq!(output.nodes[0].style_str("gap"), Some("10px"));
}

#[test]
fn reruns_produce_identical_json() {
    let input = std::fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cards.json"),
    )
    .expect("fixture read failed");
    let config = Config::default();
    let first = optimize_json(&input, &config).expect("optimize failed");
    let second = optimize_json(&input, &config).expect("optimize failed");
    assert_eq!(first, second);
}

#[test]
fn minted_ids_avoid_input_ids() {
    let rect = |id: &str, left: f32, top: f32| {
        PositionedNode::new(id, id, "RECTANGLE").with_box(left, top, 40.0, 20.0)
    };
    let design = Design::from_nodes(vec![
        PositionedNode::new("container-1-group-0", "Cards", "INSTANCE").with_children(vec![
            rect("a", 0.0, 0.0),
            rect("b", 50.0, 0.0),
            rect("c", 100.0, 30.0),
            rect("d", 150.0, 30.0),
        ]),
    ]);
    let mut ids = ContainerIds::for_nodes("container", &design.nodes);
    let output = flexinfer::layout::optimize_design_with(design, &LayoutConfig::default(), &mut ids);
    let minted: Vec<&str> = output.nodes[0].children().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(minted, ["container-2-group-0", "container-3-group-1"]);
    assert_eq!(ids.minted(), 2);
}
