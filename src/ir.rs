use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::layout::parse_px;

pub type CssStyles = BTreeMap<String, StyleValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(serde_json::Number),
    Text(String),
}

impl StyleValue {
    pub fn as_px(&self) -> f32 {
        match self {
            StyleValue::Number(val) => val.as_f64().map(|v| v as f32).unwrap_or(0.0),
            StyleValue::Text(val) => parse_px(val),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(val) => Some(val),
            StyleValue::Number(_) => None,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

/// A design node carrying pixel geometry in its `cssStyles` map.
///
/// Keys this crate does not understand are kept in `extra` and written back
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub css_styles: CssStyles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PositionedNode>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PositionedNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type: node_type.into(),
            css_styles: CssStyles::new(),
            children: None,
            extra: BTreeMap::new(),
        }
    }

    /// Builder used by tests and fixtures: absolute box in pixels.
    pub fn with_box(mut self, left: f32, top: f32, width: f32, height: f32) -> Self {
        self.set_style("left", px(left));
        self.set_style("top", px(top));
        self.set_style("width", px(width));
        self.set_style("height", px(height));
        self
    }

    pub fn with_children(mut self, children: Vec<PositionedNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn style(&self, key: &str) -> Option<&StyleValue> {
        self.css_styles.get(key)
    }

    pub fn style_str(&self, key: &str) -> Option<&str> {
        self.style(key).and_then(StyleValue::as_str)
    }

    /// Lenient pixel lookup: missing or non-numeric values read as 0.
    pub fn style_px(&self, key: &str) -> f32 {
        self.style(key).map(StyleValue::as_px).unwrap_or(0.0)
    }

    pub fn set_style(&mut self, key: &str, value: impl Into<StyleValue>) {
        self.css_styles.insert(key.to_string(), value.into());
    }

    pub fn children(&self) -> &[PositionedNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    pub fn is_container_type(&self, container_types: &[String]) -> bool {
        container_types.iter().any(|ty| ty == &self.node_type)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children().iter().map(PositionedNode::subtree_len).sum::<usize>()
    }

    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a PositionedNode)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_modified: String,
    #[serde(default)]
    pub thumbnail_url: String,
    pub nodes: Vec<PositionedNode>,
}

impl Design {
    pub fn from_nodes(nodes: Vec<PositionedNode>) -> Self {
        Self {
            name: String::new(),
            last_modified: String::new(),
            thumbnail_url: String::new(),
            nodes,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(PositionedNode::subtree_len).sum()
    }
}

pub fn px(value: f32) -> String {
    format!("{value}px")
}

/// Reading order: top to bottom, then left to right. Recurses into children.
pub fn sort_nodes_by_position(nodes: &mut [PositionedNode]) {
    nodes.sort_by(|a, b| {
        let (a_top, b_top) = (a.style_px("top"), b.style_px("top"));
        a_top
            .partial_cmp(&b_top)
            .filter(|ord| *ord != Ordering::Equal)
            .unwrap_or_else(|| {
                a.style_px("left")
                    .partial_cmp(&b.style_px("left"))
                    .unwrap_or(Ordering::Equal)
            })
    });
    for node in nodes.iter_mut() {
        if let Some(children) = node.children.as_mut() {
            sort_nodes_by_position(children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_round_trip() {
        let input = r##"{
            "id": "1:2",
            "name": "Title",
            "type": "TEXT",
            "text": "Hello",
            "cssStyles": {"left": "4px", "fontWeight": 700, "lineHeight": "1.5"},
            "fills": [{"type": "SOLID", "color": "#fff"}]
        }"##;
        let node: PositionedNode = serde_json::from_str(input).unwrap();
        assert_eq!(node.node_type, "TEXT");
        assert_eq!(node.style_px("left"), 4.0);
        assert!(node.extra.contains_key("text"));
        assert!(node.extra.contains_key("fills"));

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["cssStyles"]["fontWeight"], serde_json::json!(700));
        assert_eq!(value["text"], "Hello");
        assert!(value.get("children").is_none());
    }

    #[test]
    fn missing_geometry_reads_as_zero() {
        let mut node = PositionedNode::new("a", "a", "RECTANGLE");
        assert_eq!(node.style_px("width"), 0.0);
        node.set_style("width", "auto");
        assert_eq!(node.style_px("width"), 0.0);
        node.set_style("width", "100%");
        assert_eq!(node.style_px("width"), 100.0);
    }

    #[test]
    fn sorts_top_then_left() {
        let mut nodes = vec![
            PositionedNode::new("c", "c", "RECTANGLE").with_box(0.0, 40.0, 10.0, 10.0),
            PositionedNode::new("b", "b", "RECTANGLE").with_box(30.0, 0.0, 10.0, 10.0),
            PositionedNode::new("a", "a", "RECTANGLE").with_box(0.0, 0.0, 10.0, 10.0),
        ];
        sort_nodes_by_position(&mut nodes);
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn px_formats_without_trailing_zero() {
        assert_eq!(px(10.0), "10px");
        assert_eq!(px(10.5), "10.5px");
    }
}
