use log::debug;

use crate::config::LayoutConfig;
use crate::ir::PositionedNode;

use super::container::{ContainerIds, create_layout_container};
use super::geometry::{Rect, contains, rect_of};
use super::types::{Axis, Direction};

/// Strict containment: identical boxes are siblings, never nested.
fn strictly_contains(a: &Rect, b: &Rect) -> bool {
    contains(a, b) && !contains(b, a)
}

/// Parent index for every rect: the innermost rect strictly containing it.
///
/// A candidate that strictly contains another candidate is a transitive edge
/// and is dropped. Among the remaining candidates the first in input order
/// wins.
pub fn resolve_parents(rects: &[Rect]) -> Vec<Option<usize>> {
    (0..rects.len())
        .map(|child| {
            let candidates: Vec<usize> = (0..rects.len())
                .filter(|&i| i != child && strictly_contains(&rects[i], &rects[child]))
                .collect();
            candidates.iter().copied().find(|&candidate| {
                !candidates.iter().any(|&other| {
                    other != candidate && strictly_contains(&rects[candidate], &rects[other])
                })
            })
        })
        .collect()
}

/// Rebuilds nesting for a flat node list from box containment.
///
/// Nodes not contained by any other node become roots, in input order.
/// Contained nodes are appended to their parent's existing children. When any
/// node has no usable box the input is returned as is.
pub fn process_node_relationships(nodes: Vec<PositionedNode>) -> Vec<PositionedNode> {
    if nodes.len() <= 1 {
        return nodes;
    }
    let rects: Vec<Rect> = nodes.iter().filter_map(rect_of).collect();
    if rects.len() != nodes.len() {
        debug!(
            target: "flexinfer::spatial",
            "skipping containment: {} of {} nodes have no box",
            nodes.len() - rects.len(),
            nodes.len()
        );
        return nodes;
    }

    let parents = resolve_parents(&rects);
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut roots = Vec::new();
    for (index, parent) in parents.iter().enumerate() {
        match parent {
            Some(parent) => children_of[*parent].push(index),
            None => roots.push(index),
        }
    }

    let mut slots: Vec<Option<PositionedNode>> = nodes.into_iter().map(Some).collect();
    roots
        .into_iter()
        .filter_map(|root| build_subtree(root, &children_of, &mut slots))
        .collect()
}

fn build_subtree(
    index: usize,
    children_of: &[Vec<usize>],
    slots: &mut [Option<PositionedNode>],
) -> Option<PositionedNode> {
    let mut node = slots[index].take()?;
    if !children_of[index].is_empty() {
        let resolved: Vec<PositionedNode> = children_of[index]
            .iter()
            .filter_map(|&child| build_subtree(child, children_of, slots))
            .collect();
        node.children.get_or_insert_with(Vec::new).extend(resolved);
    }
    Some(node)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionLine {
    pub position: f32,
    pub axis: Axis,
    /// Rects whose span on `axis` covers `position`, edges included.
    pub node_indices: Vec<usize>,
}

fn split_coordinates(rects: &[Rect], axis: Axis, tolerance: f32) -> Vec<f32> {
    let mut coords: Vec<f32> = rects
        .iter()
        .flat_map(|rect| [axis.leading(rect), axis.trailing(rect)])
        .collect();
    coords.sort_by(f32::total_cmp);
    let mut unique: Vec<f32> = Vec::with_capacity(coords.len());
    for coord in coords {
        if unique.last().is_none_or(|last| (coord - last).abs() > tolerance) {
            unique.push(coord);
        }
    }
    unique
}

/// Edge coordinates on `axis`, deduplicated within `tolerance`.
pub fn projection_lines(rects: &[Rect], axis: Axis, tolerance: f32) -> Vec<ProjectionLine> {
    split_coordinates(rects, axis, tolerance)
        .into_iter()
        .map(|position| ProjectionLine {
            position,
            axis,
            node_indices: rects
                .iter()
                .enumerate()
                .filter(|(_, rect)| {
                    position >= axis.leading(rect) && position <= axis.trailing(rect)
                })
                .map(|(index, _)| index)
                .collect(),
        })
        .collect()
}

/// Sweeps `axis` and returns node indices per band.
///
/// A node belongs to the band between two consecutive split coordinates when
/// its span fits inside it. A node spanning several bands joins the band its
/// leading edge falls in. Nodes without a box form a trailing band.
fn sweep_bands(nodes: &[PositionedNode], axis: Axis, tolerance: f32) -> Vec<Vec<usize>> {
    let boxed: Vec<(usize, Rect)> = nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| rect_of(node).map(|rect| (index, rect)))
        .collect();
    if boxed.is_empty() {
        return vec![(0..nodes.len()).collect()];
    }

    let rects: Vec<Rect> = boxed.iter().map(|(_, rect)| *rect).collect();
    let coords = split_coordinates(&rects, axis, tolerance);
    if coords.len() < 2 {
        let mut result = vec![boxed.iter().map(|(index, _)| *index).collect::<Vec<_>>()];
        let unboxed: Vec<usize> = (0..nodes.len())
            .filter(|index| !boxed.iter().any(|(i, _)| i == index))
            .collect();
        if !unboxed.is_empty() {
            result.push(unboxed);
        }
        return result;
    }
    let mut bands: Vec<Vec<usize>> = vec![Vec::new(); coords.len().saturating_sub(1)];
    let mut placed = vec![false; boxed.len()];

    for (band, pair) in coords.windows(2).enumerate() {
        let (start, end) = (pair[0], pair[1]);
        for (slot, (index, rect)) in boxed.iter().enumerate() {
            if !placed[slot]
                && axis.leading(rect) >= start - tolerance
                && axis.trailing(rect) <= end + tolerance
            {
                bands[band].push(*index);
                placed[slot] = true;
            }
        }
    }

    for (slot, (index, rect)) in boxed.iter().enumerate() {
        if placed[slot] {
            continue;
        }
        let lead = axis.leading(rect);
        let band = coords
            .windows(2)
            .position(|pair| lead >= pair[0] - tolerance && lead < pair[1])
            .unwrap_or(0);
        match bands.get_mut(band) {
            Some(members) => members.push(*index),
            None => bands.push(vec![*index]),
        }
    }

    let mut result: Vec<Vec<usize>> = bands.into_iter().filter(|b| !b.is_empty()).collect();
    let unboxed: Vec<usize> = (0..nodes.len())
        .filter(|index| !boxed.iter().any(|(i, _)| i == index))
        .collect();
    if !unboxed.is_empty() {
        result.push(unboxed);
    }
    if result.is_empty() {
        result.push((0..nodes.len()).collect());
    }
    result
}

fn take_bands(
    nodes: Vec<PositionedNode>,
    bands: Vec<Vec<usize>>,
) -> Vec<Vec<PositionedNode>> {
    let mut slots: Vec<Option<PositionedNode>> = nodes.into_iter().map(Some).collect();
    bands
        .into_iter()
        .map(|band| band.into_iter().filter_map(|i| slots[i].take()).collect())
        .collect()
}

/// Rows from a horizontal-line sweep, each ordered left to right.
pub fn group_nodes_by_rows(nodes: Vec<PositionedNode>, tolerance: f32) -> Vec<Vec<PositionedNode>> {
    let bands = sweep_bands(&nodes, Axis::Vertical, tolerance);
    let mut rows = take_bands(nodes, bands);
    for row in &mut rows {
        row.sort_by(|a, b| a.style_px("left").total_cmp(&b.style_px("left")));
    }
    rows
}

/// Columns from a vertical-line sweep over one row, input order kept.
pub fn group_row_nodes_by_columns(
    row: Vec<PositionedNode>,
    tolerance: f32,
) -> Vec<Vec<PositionedNode>> {
    let bands = sweep_bands(&row, Axis::Horizontal, tolerance);
    take_bands(row, bands)
}

pub type GridRow = Vec<Vec<PositionedNode>>;

/// Rows, then columns within each row.
pub fn project_grid(nodes: Vec<PositionedNode>, tolerance: f32) -> Vec<GridRow> {
    group_nodes_by_rows(nodes, tolerance)
        .into_iter()
        .map(|row| group_row_nodes_by_columns(row, tolerance))
        .collect()
}

/// Turns a projected grid into flex containers: multi-node columns become
/// column containers and multi-column rows become row containers.
pub fn build_grid_layout(
    nodes: Vec<PositionedNode>,
    tolerance: f32,
    config: &LayoutConfig,
    ids: &mut ContainerIds,
) -> Vec<PositionedNode> {
    let grid = project_grid(nodes, tolerance);
    let mut result = Vec::with_capacity(grid.len());
    for (row_index, row) in grid.into_iter().enumerate() {
        let mut cells: Vec<PositionedNode> = Vec::with_capacity(row.len());
        for (column_index, mut column) in row.into_iter().enumerate() {
            if column.len() == 1 {
                cells.append(&mut column);
            } else {
                let name = format!("row-{row_index}-column-{column_index}");
                cells.push(create_layout_container(&name, Direction::Column, column, config, ids));
            }
        }
        if cells.len() == 1 {
            result.append(&mut cells);
        } else {
            let name = format!("row-{row_index}");
            result.push(create_layout_container(&name, Direction::Row, cells, config, ids));
        }
    }
    result
}
