use std::collections::HashSet;

use log::debug;

use crate::config::LayoutConfig;
use crate::ir::{PositionedNode, px};

use super::classify::classify_rects;
use super::geometry::{bounding_rect, valid_rects};
use super::types::Direction;

pub const SYNTHETIC_NODE_TYPE: &str = "FRAME";

/// Mints ids for synthesized containers.
///
/// One allocator per optimization run: a fresh allocator over the same input
/// yields the same ids. Ids already present in the input are never minted.
#[derive(Debug, Clone)]
pub struct ContainerIds {
    prefix: String,
    next: usize,
    minted: usize,
    reserved: HashSet<String>,
}

impl ContainerIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
            minted: 0,
            reserved: HashSet::new(),
        }
    }

    pub fn for_nodes(prefix: impl Into<String>, nodes: &[PositionedNode]) -> Self {
        let mut ids = Self::new(prefix);
        for node in nodes {
            node.visit(&mut |n| ids.reserve(&n.id));
        }
        ids
    }

    pub fn reserve(&mut self, id: &str) {
        self.reserved.insert(id.to_string());
    }

    pub fn mint(&mut self, name: &str) -> String {
        loop {
            let candidate = format!("{}-{}-{}", self.prefix, self.next, name);
            self.next += 1;
            if self.reserved.insert(candidate.clone()) {
                self.minted += 1;
                return candidate;
            }
        }
    }

    pub fn minted(&self) -> usize {
        self.minted
    }
}

/// Wraps `children` in a new flex container flowing in `direction`.
///
/// The container is absolutely positioned at the bounding box of the
/// children that have geometry. With no such child it falls back to a
/// full-width, auto-height box.
pub fn create_layout_container(
    name: &str,
    direction: Direction,
    children: Vec<PositionedNode>,
    config: &LayoutConfig,
    ids: &mut ContainerIds,
) -> PositionedNode {
    let rects = valid_rects(&children);
    let id = ids.mint(name);
    let mut container =
        PositionedNode::new(id, format!("Layout Container {name}"), SYNTHETIC_NODE_TYPE);
    container.set_style("display", "flex");
    if let Some(value) = direction.css_value() {
        container.set_style("flexDirection", value);
    }

    match bounding_rect(&rects) {
        Some(bounds) => {
            container.set_style("position", "absolute");
            container.set_style("left", px(bounds.left));
            container.set_style("top", px(bounds.top));
            container.set_style("width", px(bounds.width));
            container.set_style("height", px(bounds.height));
            let decision = classify_rects(&rects, config);
            if let Some(justify) = decision.justify {
                container.set_style("justifyContent", justify.css_value());
            }
            if let Some(align) = decision.align {
                container.set_style("alignItems", align.css_value());
            }
        }
        None => {
            container.set_style("width", "100%");
            container.set_style("height", "auto");
        }
    }

    debug!(
        target: "flexinfer::container",
        "synthesized {} ({:?}) around {} children",
        container.id,
        direction,
        children.len()
    );
    container.children = Some(children);
    container
}
