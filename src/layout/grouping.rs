use crate::ir::PositionedNode;

use super::types::Axis;

fn leading(node: &PositionedNode, axis: Axis) -> f32 {
    match axis {
        Axis::Horizontal => node.style_px("left"),
        Axis::Vertical => node.style_px("top"),
    }
}

/// Partitions siblings flowing along `main` into bands.
///
/// Siblings are swept by their cross-axis leading coordinate and a new band
/// starts whenever it jumps by more than `split_threshold`. Each band is then
/// ordered along the main axis. Every input node lands in exactly one band;
/// missing coordinates read as 0.
pub fn group_children_by_layout(
    nodes: Vec<PositionedNode>,
    main: Axis,
    split_threshold: f32,
) -> Vec<Vec<PositionedNode>> {
    if nodes.len() <= 1 {
        return vec![nodes];
    }
    let cross = main.cross();

    let mut keyed: Vec<(f32, f32, PositionedNode)> = nodes
        .into_iter()
        .map(|node| (leading(&node, cross), leading(&node, main), node))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut groups: Vec<Vec<(f32, PositionedNode)>> = Vec::new();
    let mut previous_cross: Option<f32> = None;
    for (cross_pos, main_pos, node) in keyed {
        let split = previous_cross
            .map(|prev| (cross_pos - prev).abs() > split_threshold)
            .unwrap_or(true);
        if split {
            groups.push(Vec::new());
        }
        if let Some(group) = groups.last_mut() {
            group.push((main_pos, node));
        }
        previous_cross = Some(cross_pos);
    }

    groups
        .into_iter()
        .map(|mut group| {
            group.sort_by(|a, b| a.0.total_cmp(&b.0));
            group.into_iter().map(|(_, node)| node).collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, left: f32, top: f32) -> PositionedNode {
        PositionedNode::new(id, id, "RECTANGLE").with_box(left, top, 40.0, 30.0)
    }

    fn ids(groups: &[Vec<PositionedNode>]) -> Vec<Vec<&str>> {
        groups
            .iter()
            .map(|g| g.iter().map(|n| n.id.as_str()).collect())
            .collect()
    }

    #[test]
    fn splits_where_cross_axis_jumps() {
        let nodes = vec![
            node("a", 0.0, 0.0),
            node("b", 50.0, 0.0),
            node("c", 0.0, 40.0),
            node("d", 50.0, 40.0),
        ];
        let groups = group_children_by_layout(nodes, Axis::Horizontal, 20.0);
        assert_eq!(ids(&groups), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn small_offsets_stay_in_one_band() {
        let nodes = vec![node("c", 100.0, 12.0), node("a", 0.0, 0.0), node("b", 50.0, 6.0)];
        let groups = group_children_by_layout(nodes, Axis::Horizontal, 20.0);
        assert_eq!(ids(&groups), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn columns_split_on_left() {
        let nodes = vec![
            node("a", 0.0, 0.0),
            node("b", 0.0, 40.0),
            node("c", 100.0, 0.0),
        ];
        let groups = group_children_by_layout(nodes, Axis::Vertical, 20.0);
        assert_eq!(ids(&groups), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn unpositioned_nodes_are_kept() {
        let nodes = vec![node("a", 0.0, 50.0), PositionedNode::new("t", "t", "TEXT")];
        let groups = group_children_by_layout(nodes, Axis::Horizontal, 20.0);
        assert_eq!(ids(&groups), vec![vec!["t"], vec!["a"]]);
    }
}
