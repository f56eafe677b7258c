use log::trace;

use crate::config::LayoutConfig;
use crate::ir::PositionedNode;

use super::alignment::{analyze_alignment, axis_stats, distribution_score, AxisStats};
use super::geometry::{Rect, valid_rects};
use super::types::{
    Align, AlignmentStrategy, Axis, Direction, Justify, LayoutDecision, TolerancePolicy,
};

pub fn classify_nodes(nodes: &[PositionedNode], config: &LayoutConfig) -> LayoutDecision {
    classify_rects(&valid_rects(nodes), config)
}

pub fn classify_rects(rects: &[Rect], config: &LayoutConfig) -> LayoutDecision {
    if rects.len() < 2 {
        return LayoutDecision::none();
    }
    match config.strategy {
        AlignmentStrategy::Scored => classify_scored(rects, config),
        AlignmentStrategy::Relative => classify_relative(rects, config),
    }
}

/// Strict on both sides, so equal scores detect nothing.
fn pick_direction(row_score: f32, column_score: f32, threshold: f32) -> Direction {
    if row_score > column_score && row_score > threshold {
        Direction::Row
    } else if column_score > row_score && column_score > threshold {
        Direction::Column
    } else {
        Direction::None
    }
}

fn classify_scored(rects: &[Rect], config: &LayoutConfig) -> LayoutDecision {
    let analysis = analyze_alignment(rects, TolerancePolicy::Fixed(config.alignment_tolerance));

    let score = |main: Axis| {
        let distribution = distribution_score(rects, main, config.max_distribution_gap);
        let bonus = if analysis.alignment(main.cross()).is_none() {
            0.0
        } else {
            config.alignment_bonus
        };
        distribution * config.distribution_weight + bonus
    };
    let row_score = score(Axis::Horizontal);
    let column_score = score(Axis::Vertical);
    let direction = pick_direction(row_score, column_score, config.detection_threshold);
    trace!(
        target: "flexinfer::classify",
        "scored {} rects: row {row_score:.2}, column {column_score:.2} -> {direction:?}",
        rects.len()
    );

    let Some(main) = direction.main_axis() else {
        return LayoutDecision::none();
    };
    LayoutDecision {
        direction,
        gap: analysis.gap(main),
        justify: Some(analysis.alignment(main).justify()),
        align: analysis.alignment(main.cross()).align(),
    }
}

fn classify_relative(rects: &[Rect], config: &LayoutConfig) -> LayoutDecision {
    let policy = config.tolerance_policy();
    let horizontal = axis_stats(rects, Axis::Horizontal, policy);
    let vertical = axis_stats(rects, Axis::Vertical, policy);

    let score = |main: &AxisStats, cross: &AxisStats| {
        let bonus = if cross.aligned() { config.alignment_bonus } else { 0.0 };
        main.distribution * config.distribution_weight + bonus
    };
    let row_score = score(&horizontal, &vertical);
    let column_score = score(&vertical, &horizontal);
    let direction = pick_direction(row_score, column_score, config.detection_threshold);
    trace!(
        target: "flexinfer::classify",
        "relative {} rects: row {row_score:.2}, column {column_score:.2} -> {direction:?}",
        rects.len()
    );

    let (main, cross) = match direction {
        Direction::Row => (&horizontal, &vertical),
        Direction::Column => (&vertical, &horizontal),
        Direction::None => return LayoutDecision::none(),
    };

    let justify = if main.trailing_aligned {
        Justify::End
    } else if main.center_aligned {
        Justify::Center
    } else if !main.gaps.is_empty() && main.gap_consistency > config.gap_consistency_threshold {
        Justify::Between
    } else {
        Justify::Start
    };
    let align = if cross.trailing_aligned {
        Align::End
    } else if cross.center_aligned {
        Align::Center
    } else {
        Align::Start
    };

    LayoutDecision {
        direction,
        gap: main.average_gap,
        justify: Some(justify),
        align: Some(align),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, left: f32, top: f32, width: f32, height: f32) -> PositionedNode {
        PositionedNode::new(id, id, "RECTANGLE").with_box(left, top, width, height)
    }

    #[test]
    fn detects_row() {
        let nodes = vec![
            node("a", 0.0, 0.0, 40.0, 20.0),
            node("b", 50.0, 0.0, 40.0, 20.0),
            node("c", 100.0, 0.0, 40.0, 20.0),
        ];
        let decision = classify_nodes(&nodes, &LayoutConfig::default());
        assert_eq!(decision.direction, Direction::Row);
        assert!((decision.gap - 10.0).abs() < 1e-4);
        assert_eq!(decision.align, Some(Align::Start));
        assert_eq!(decision.justify, Some(Justify::Between));
    }

    #[test]
    fn detects_column() {
        let nodes = vec![
            node("a", 0.0, 0.0, 20.0, 40.0),
            node("b", 0.0, 50.0, 20.0, 40.0),
            node("c", 0.0, 100.0, 20.0, 40.0),
        ];
        let decision = classify_nodes(&nodes, &LayoutConfig::default());
        assert_eq!(decision.direction, Direction::Column);
        assert!((decision.gap - 10.0).abs() < 1e-4);
        assert_eq!(decision.align, Some(Align::Start));
    }

    #[test]
    fn scattered_nodes_have_no_layout() {
        let nodes = vec![
            node("a", 0.0, 0.0, 30.0, 30.0),
            node("b", 17.0, 41.0, 30.0, 30.0),
            node("c", 53.0, 9.0, 30.0, 30.0),
        ];
        assert_eq!(
            classify_nodes(&nodes, &LayoutConfig::default()),
            LayoutDecision::none()
        );
    }

    #[test]
    fn tie_detects_nothing() {
        // 2x2 grid: both axes score the same.
        let nodes = vec![
            node("a", 0.0, 0.0, 40.0, 30.0),
            node("b", 50.0, 0.0, 40.0, 30.0),
            node("c", 0.0, 40.0, 40.0, 30.0),
            node("d", 50.0, 40.0, 40.0, 30.0),
        ];
        assert!(!classify_nodes(&nodes, &LayoutConfig::default()).is_detected());
    }

    #[test]
    fn needs_two_valid_rects() {
        let nodes = vec![
            node("a", 0.0, 0.0, 40.0, 20.0),
            node("b", 50.0, 0.0, 0.0, 20.0),
            PositionedNode::new("c", "c", "TEXT"),
        ];
        assert!(!classify_nodes(&nodes, &LayoutConfig::default()).is_detected());
    }

    #[test]
    fn relative_strategy_prefers_space_between_for_even_gaps() {
        let config = LayoutConfig {
            strategy: AlignmentStrategy::Relative,
            ..LayoutConfig::default()
        };
        let nodes = vec![
            node("a", 0.0, 0.0, 40.0, 20.0),
            node("b", 50.0, 3.0, 40.0, 40.0),
            node("c", 100.0, 1.0, 40.0, 10.0),
        ];
        let decision = classify_nodes(&nodes, &config);
        assert_eq!(decision.direction, Direction::Row);
        assert_eq!(decision.justify, Some(Justify::Between));
        assert_eq!(decision.align, Some(Align::Start));
        assert!((decision.gap - 10.0).abs() < 1e-4);
    }
}
