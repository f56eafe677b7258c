use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::PositionedNode;

use super::types::Relationship;

static LEADING_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

/// Parses the leading number of a CSS length such as `"12.5px"`.
/// Anything unparseable reads as 0.
pub fn parse_px(value: &str) -> f32 {
    LEADING_NUMBER_RE
        .find(value)
        .and_then(|m| m.as_str().trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Box of a node, or `None` when its width or height is not positive.
pub fn rect_of(node: &PositionedNode) -> Option<Rect> {
    let rect = Rect::new(
        node.style_px("left"),
        node.style_px("top"),
        node.style_px("width"),
        node.style_px("height"),
    );
    rect.is_valid().then_some(rect)
}

pub fn valid_rects(nodes: &[PositionedNode]) -> Vec<Rect> {
    nodes.iter().filter_map(rect_of).collect()
}

/// `b` lies inside `a`, shared edges included.
pub fn contains(a: &Rect, b: &Rect) -> bool {
    a.left <= b.left && a.top <= b.top && a.right() >= b.right() && a.bottom() >= b.bottom()
}

/// Boxes overlap with positive area; touching edges do not count.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.left || b.right() <= a.left || a.bottom() <= b.top || b.bottom() <= a.top)
}

pub fn intersection(a: &Rect, b: &Rect) -> Option<Rect> {
    if !intersects(a, b) {
        return None;
    }
    let left = a.left.max(b.left);
    let top = a.top.max(b.top);
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());
    Some(Rect::new(left, top, right - left, bottom - top))
}

pub fn relationship(a: &Rect, b: &Rect) -> Relationship {
    if contains(a, b) || contains(b, a) {
        Relationship::Contains
    } else if intersects(a, b) {
        Relationship::Intersects
    } else {
        Relationship::Separate
    }
}

/// Every value lies within `tolerance` of the first one.
pub fn values_aligned(values: &[f32], tolerance: f32) -> bool {
    let Some(first) = values.first() else {
        return true;
    };
    values.iter().all(|v| (v - first).abs() <= tolerance)
}

pub fn bounding_rect(rects: &[Rect]) -> Option<Rect> {
    let first = rects.first()?;
    let mut min_left = first.left;
    let mut min_top = first.top;
    let mut max_right = first.right();
    let mut max_bottom = first.bottom();
    for rect in &rects[1..] {
        min_left = min_left.min(rect.left);
        min_top = min_top.min(rect.top);
        max_right = max_right.max(rect.right());
        max_bottom = max_bottom.max(rect.bottom());
    }
    Some(Rect::new(
        min_left,
        min_top,
        max_right - min_left,
        max_bottom - min_top,
    ))
}
