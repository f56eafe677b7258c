use serde::{Deserialize, Serialize};

use super::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    pub fn leading(self, rect: &Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.left,
            Axis::Vertical => rect.top,
        }
    }

    pub fn extent(self, rect: &Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.width,
            Axis::Vertical => rect.height,
        }
    }

    pub fn trailing(self, rect: &Rect) -> f32 {
        self.leading(rect) + self.extent(rect)
    }

    pub fn center(self, rect: &Rect) -> f32 {
        self.leading(rect) + self.extent(rect) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Row,
    Column,
    None,
}

impl Direction {
    /// Axis the children flow along, `None` has no main axis.
    pub fn main_axis(self) -> Option<Axis> {
        match self {
            Direction::Row => Some(Axis::Horizontal),
            Direction::Column => Some(Axis::Vertical),
            Direction::None => None,
        }
    }

    pub fn orthogonal(self) -> Self {
        match self {
            Direction::Row => Direction::Column,
            Direction::Column => Direction::Row,
            Direction::None => Direction::None,
        }
    }

    pub fn css_value(self) -> Option<&'static str> {
        match self {
            Direction::Row => Some("row"),
            Direction::Column => Some("column"),
            Direction::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Right,
    Top,
    Bottom,
    Center,
    None,
}

impl Alignment {
    pub fn leading(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Alignment::Left,
            Axis::Vertical => Alignment::Top,
        }
    }

    pub fn trailing(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Alignment::Right,
            Axis::Vertical => Alignment::Bottom,
        }
    }

    pub fn is_none(self) -> bool {
        self == Alignment::None
    }

    /// Main-axis mapping. Unaligned siblings default to `Between`.
    pub fn justify(self) -> Justify {
        match self {
            Alignment::Left | Alignment::Top => Justify::Start,
            Alignment::Right | Alignment::Bottom => Justify::End,
            Alignment::Center => Justify::Center,
            Alignment::None => Justify::Between,
        }
    }

    /// Cross-axis mapping. Unaligned siblings get no `align-items`.
    pub fn align(self) -> Option<Align> {
        match self {
            Alignment::Left | Alignment::Top => Some(Align::Start),
            Alignment::Right | Alignment::Bottom => Some(Align::End),
            Alignment::Center => Some(Align::Center),
            Alignment::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    Start,
    End,
    Center,
    Between,
}

impl Justify {
    pub fn css_value(self) -> &'static str {
        match self {
            Justify::Start => "flex-start",
            Justify::End => "flex-end",
            Justify::Center => "center",
            Justify::Between => "space-between",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Start,
    End,
    Center,
}

impl Align {
    pub fn css_value(self) -> &'static str {
        match self {
            Align::Start => "flex-start",
            Align::End => "flex-end",
            Align::Center => "center",
        }
    }
}

/// Outcome of classifying a sibling set. Folded into a node's styles, never
/// stored on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutDecision {
    pub direction: Direction,
    pub gap: f32,
    pub justify: Option<Justify>,
    pub align: Option<Align>,
}

impl LayoutDecision {
    pub fn none() -> Self {
        Self {
            direction: Direction::None,
            gap: 0.0,
            justify: None,
            align: None,
        }
    }

    pub fn is_detected(&self) -> bool {
        self.direction != Direction::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    Contains,
    Intersects,
    Separate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignmentStrategy {
    /// Fixed tolerance, gap-distribution plus alignment bonus scoring.
    #[default]
    Scored,
    /// Tolerance relative to the siblings' extent, gap-consistency justify.
    Relative,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TolerancePolicy {
    Fixed(f32),
    Relative { min: f32, ratio: f32 },
}

impl TolerancePolicy {
    /// Tolerance for values spread over `extent` pixels.
    pub fn tolerance(self, extent: f32) -> f32 {
        match self {
            TolerancePolicy::Fixed(value) => value,
            TolerancePolicy::Relative { min, ratio } => min.max(extent * ratio),
        }
    }
}
