use super::geometry::{Rect, bounding_rect, values_aligned};
use super::types::{Alignment, Axis, TolerancePolicy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentAnalysis {
    pub horizontal: Alignment,
    pub vertical: Alignment,
    pub horizontal_gap: f32,
    pub vertical_gap: f32,
}

impl AlignmentAnalysis {
    pub fn alignment(&self, axis: Axis) -> Alignment {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    pub fn gap(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal_gap,
            Axis::Vertical => self.vertical_gap,
        }
    }
}

pub fn analyze_alignment(rects: &[Rect], policy: TolerancePolicy) -> AlignmentAnalysis {
    let bounds = bounding_rect(rects);
    let tolerance = |axis: Axis| {
        let extent = bounds.map(|b| axis.extent(&b)).unwrap_or(0.0);
        policy.tolerance(extent)
    };
    AlignmentAnalysis {
        horizontal: axis_alignment(rects, Axis::Horizontal, tolerance(Axis::Horizontal)),
        vertical: axis_alignment(rects, Axis::Vertical, tolerance(Axis::Vertical)),
        horizontal_gap: average_gap(rects, Axis::Horizontal),
        vertical_gap: average_gap(rects, Axis::Vertical),
    }
}

/// Leading edges win over trailing edges, which win over centers.
pub fn axis_alignment(rects: &[Rect], axis: Axis, tolerance: f32) -> Alignment {
    let edges = |f: fn(Axis, &Rect) -> f32| rects.iter().map(|r| f(axis, r)).collect::<Vec<_>>();
    if values_aligned(&edges(Axis::leading), tolerance) {
        Alignment::leading(axis)
    } else if values_aligned(&edges(Axis::trailing), tolerance) {
        Alignment::trailing(axis)
    } else if values_aligned(&edges(Axis::center), tolerance) {
        Alignment::Center
    } else {
        Alignment::None
    }
}

pub fn sorted_along(rects: &[Rect], axis: Axis) -> Vec<Rect> {
    let mut sorted = rects.to_vec();
    sorted.sort_by(|a, b| axis.leading(a).total_cmp(&axis.leading(b)));
    sorted
}

/// Gaps between neighbours after sorting by leading edge.
pub fn gaps_along(rects: &[Rect], axis: Axis) -> Vec<f32> {
    sorted_along(rects, axis)
        .windows(2)
        .map(|pair| axis.leading(&pair[1]) - axis.trailing(&pair[0]))
        .collect()
}

/// Mean of the positive neighbour gaps; touching and overlapping pairs are
/// skipped. 0 when no pair is spaced apart.
pub fn average_gap(rects: &[Rect], axis: Axis) -> f32 {
    let spaced: Vec<f32> = gaps_along(rects, axis)
        .into_iter()
        .filter(|gap| *gap > 0.0)
        .collect();
    mean(&spaced)
}

/// Share of neighbour gaps that fall in `[0, max_gap]`.
pub fn distribution_score(rects: &[Rect], axis: Axis, max_gap: f32) -> f32 {
    let gaps = gaps_along(rects, axis);
    if gaps.is_empty() {
        return 0.0;
    }
    let close = gaps.iter().filter(|gap| (0.0..=max_gap).contains(*gap)).count();
    close as f32 / gaps.len() as f32
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

fn variance(values: &[f32]) -> f32 {
    if values.len() <= 1 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f32>() / values.len() as f32
}

/// Per-axis statistics with a tolerance scaled to the siblings' extent.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisStats {
    pub distribution: f32,
    pub leading_aligned: bool,
    pub trailing_aligned: bool,
    pub center_aligned: bool,
    pub gaps: Vec<f32>,
    pub average_gap: f32,
    pub gap_consistency: f32,
}

impl AxisStats {
    pub fn aligned(&self) -> bool {
        self.leading_aligned || self.trailing_aligned || self.center_aligned
    }
}

pub fn axis_stats(rects: &[Rect], axis: Axis, policy: TolerancePolicy) -> AxisStats {
    let all_gaps = gaps_along(rects, axis);
    let gaps: Vec<f32> = all_gaps.iter().copied().filter(|gap| *gap >= 0.0).collect();
    let distribution = if all_gaps.is_empty() {
        0.0
    } else {
        gaps.len() as f32 / all_gaps.len() as f32
    };

    let extent = bounding_rect(rects).map(|b| axis.extent(&b)).unwrap_or(0.0);
    let tolerance = policy.tolerance(extent);
    let edges = |f: fn(Axis, &Rect) -> f32| rects.iter().map(|r| f(axis, r)).collect::<Vec<_>>();

    let average_gap = mean(&gaps);
    let gap_consistency = if gaps.len() > 1 {
        1.0 - variance(&gaps) / (average_gap * average_gap + 0.1)
    } else {
        0.0
    };

    AxisStats {
        distribution,
        leading_aligned: values_aligned(&edges(Axis::leading), tolerance),
        trailing_aligned: values_aligned(&edges(Axis::trailing), tolerance),
        center_aligned: values_aligned(&edges(Axis::center), tolerance),
        gaps,
        average_gap,
        gap_consistency,
    }
}
