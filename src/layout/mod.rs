mod alignment;
mod classify;
mod container;
pub(crate) mod geometry;
mod grouping;
mod spatial;
pub(crate) mod types;
pub use alignment::*;
pub use classify::*;
pub use container::*;
pub use geometry::*;
pub use grouping::*;
pub use spatial::*;
pub use types::*;

use log::debug;

use crate::config::LayoutConfig;
use crate::ir::{Design, PositionedNode};

/// Optimizes every root of a design with a fresh id allocator.
pub fn optimize_design(design: Design, config: &LayoutConfig) -> Design {
    let mut ids = ContainerIds::for_nodes(config.container_id_prefix.clone(), &design.nodes);
    optimize_design_with(design, config, &mut ids)
}

pub fn optimize_design_with(design: Design, config: &LayoutConfig, ids: &mut ContainerIds) -> Design {
    Design {
        nodes: optimize_nodes(design.nodes, config, ids),
        ..design
    }
}

pub fn optimize_nodes(
    nodes: Vec<PositionedNode>,
    config: &LayoutConfig,
    ids: &mut ContainerIds,
) -> Vec<PositionedNode> {
    nodes
        .into_iter()
        .map(|node| optimize_node_tree(node, config, ids))
        .collect()
}

/// Bottom-up rewrite: children first, then the node itself.
pub fn optimize_node_tree(
    mut node: PositionedNode,
    config: &LayoutConfig,
    ids: &mut ContainerIds,
) -> PositionedNode {
    let Some(children) = node.children.take() else {
        return node;
    };
    if children.is_empty() {
        node.children = Some(children);
        return node;
    }
    node.children = Some(optimize_nodes(children, config, ids));
    optimize_container(node, config, ids)
}

/// Turns `node` into a flex container when its children line up.
///
/// Container types take the flex styles directly. Other nodes have their
/// children split into bands first; multi-member bands get wrapped in
/// synthesized containers flowing along the orthogonal axis.
pub fn optimize_container(
    mut node: PositionedNode,
    config: &LayoutConfig,
    ids: &mut ContainerIds,
) -> PositionedNode {
    if node.child_count() <= 1 {
        return node;
    }

    let decision = classify_nodes(node.children(), config);
    debug!(
        target: "flexinfer::optimize",
        "{} ({}): {} children -> {:?}",
        node.id,
        node.name,
        node.child_count(),
        decision.direction
    );
    let Some(main) = decision.direction.main_axis() else {
        return node;
    };

    if node.is_container_type(&config.container_types) {
        apply_flex(&mut node, &decision, true);
        return node;
    }

    let children = node.children.take().unwrap_or_default();
    let total = children.len();
    let groups = group_children_by_layout(children, main, config.group_split_threshold);

    if groups.len() == 1 && groups[0].len() == total {
        node.children = groups.into_iter().next();
        apply_flex(&mut node, &decision, true);
        return node;
    }

    debug!(
        target: "flexinfer::optimize",
        "{} ({}): split {} children into {} groups",
        node.id,
        node.name,
        total,
        groups.len()
    );
    let inner = decision.direction.orthogonal();
    let grouped = groups
        .into_iter()
        .enumerate()
        .flat_map(|(index, mut group)| {
            if group.len() == 1 {
                group.pop()
            } else {
                let name = format!("group-{index}");
                Some(create_layout_container(&name, inner, group, config, ids))
            }
        })
        .collect();
    node.children = Some(grouped);
    apply_flex(&mut node, &decision, false);
    node
}

fn apply_flex(node: &mut PositionedNode, decision: &LayoutDecision, with_gap: bool) {
    let Some(direction) = decision.direction.css_value() else {
        return;
    };
    node.set_style("display", "flex");
    node.set_style("flexDirection", direction);
    if with_gap && decision.gap > 0.0 {
        node.set_style("gap", format!("{}px", decision.gap.round() as i64));
    }
    if let Some(justify) = decision.justify {
        node.set_style("justifyContent", justify.css_value());
    }
    if let Some(align) = decision.align {
        node.set_style("alignItems", align.css_value());
    }
}
