use crate::ir::{Design, PositionedNode};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub name: String,
    pub input_nodes: usize,
    pub output_nodes: usize,
    pub flex_containers: usize,
    pub synthesized_containers: usize,
    pub nodes: Vec<NodeDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    pub name: String,
    pub node_type: String,
    pub depth: usize,
    pub synthesized: bool,
    pub direction: Option<String>,
    pub gap: Option<String>,
    pub justify_content: Option<String>,
    pub align_items: Option<String>,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub children: usize,
}

impl LayoutDump {
    /// Summarizes `optimized`; nodes whose id was absent from `input` are
    /// reported as synthesized.
    pub fn from_designs(input: &Design, optimized: &Design) -> Self {
        let mut input_ids = std::collections::HashSet::new();
        for root in &input.nodes {
            root.visit(&mut |node| {
                input_ids.insert(node.id.as_str());
            });
        }

        let mut nodes = Vec::new();
        for root in &optimized.nodes {
            collect(root, 0, &input_ids, &mut nodes);
        }

        LayoutDump {
            name: optimized.name.clone(),
            input_nodes: input.node_count(),
            output_nodes: optimized.node_count(),
            flex_containers: nodes.iter().filter(|n| n.direction.is_some()).count(),
            synthesized_containers: nodes.iter().filter(|n| n.synthesized).count(),
            nodes,
        }
    }
}

fn collect(
    node: &PositionedNode,
    depth: usize,
    input_ids: &std::collections::HashSet<&str>,
    out: &mut Vec<NodeDump>,
) {
    let owned = |key: &str| node.style_str(key).map(str::to_string);
    out.push(NodeDump {
        id: node.id.clone(),
        name: node.name.clone(),
        node_type: node.node_type.clone(),
        depth,
        synthesized: !input_ids.contains(node.id.as_str()),
        direction: owned("flexDirection"),
        gap: owned("gap"),
        justify_content: owned("justifyContent"),
        align_items: owned("alignItems"),
        left: node.style_px("left"),
        top: node.style_px("top"),
        width: node.style_px("width"),
        height: node.style_px("height"),
        children: node.child_count(),
    });
    for child in node.children() {
        collect(child, depth + 1, input_ids, out);
    }
}

pub fn write_layout_dump(path: &Path, input: &Design, optimized: &Design) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_designs(input, optimized);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
