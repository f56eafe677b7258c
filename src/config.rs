use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::layout::{AlignmentStrategy, TolerancePolicy};

const DEFAULT_CONTAINER_TYPES: [&str; 2] = ["FRAME", "GROUP"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub alignment_tolerance: f32,
    pub max_distribution_gap: f32,
    pub distribution_weight: f32,
    pub alignment_bonus: f32,
    pub detection_threshold: f32,
    pub group_split_threshold: f32,
    pub strategy: AlignmentStrategy,
    pub relative_tolerance_min: f32,
    pub relative_tolerance_ratio: f32,
    pub gap_consistency_threshold: f32,
    pub container_types: Vec<String>,
    pub container_id_prefix: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            alignment_tolerance: 2.0,
            max_distribution_gap: 50.0,
            distribution_weight: 0.7,
            alignment_bonus: 0.3,
            detection_threshold: 0.4,
            group_split_threshold: 20.0,
            strategy: AlignmentStrategy::Scored,
            relative_tolerance_min: 5.0,
            relative_tolerance_ratio: 0.01,
            gap_consistency_threshold: 0.7,
            container_types: DEFAULT_CONTAINER_TYPES
                .iter()
                .map(|value| value.to_string())
                .collect(),
            container_id_prefix: "container".to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn tolerance_policy(&self) -> TolerancePolicy {
        match self.strategy {
            AlignmentStrategy::Scored => TolerancePolicy::Fixed(self.alignment_tolerance),
            AlignmentStrategy::Relative => TolerancePolicy::Relative {
                min: self.relative_tolerance_min,
                ratio: self.relative_tolerance_ratio,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub tolerance: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self { tolerance: 1.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
    pub sort_siblings: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            sort_siblings: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub projection: ProjectionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    alignment_tolerance: Option<f32>,
    max_distribution_gap: Option<f32>,
    distribution_weight: Option<f32>,
    alignment_bonus: Option<f32>,
    detection_threshold: Option<f32>,
    group_split_threshold: Option<f32>,
    strategy: Option<AlignmentStrategy>,
    relative_tolerance_min: Option<f32>,
    relative_tolerance_ratio: Option<f32>,
    gap_consistency_threshold: Option<f32>,
    container_types: Option<Vec<String>>,
    container_id_prefix: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ProjectionConfigFile {
    tolerance: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct OutputConfigFile {
    pretty: Option<bool>,
    sort_siblings: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    layout: Option<LayoutConfigFile>,
    projection: Option<ProjectionConfigFile>,
    output: Option<OutputConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Accepts strict JSON first and falls back to JSON5 for hand-edited files.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents).map_err(|json5_err| {
            anyhow::anyhow!("invalid config: {json_err} (as JSON5: {json5_err})")
        })?,
    };

    let mut config = Config::default();

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.alignment_tolerance {
            target.alignment_tolerance = v;
        }
        if let Some(v) = layout.max_distribution_gap {
            target.max_distribution_gap = v;
        }
        if let Some(v) = layout.distribution_weight {
            target.distribution_weight = v;
        }
        if let Some(v) = layout.alignment_bonus {
            target.alignment_bonus = v;
        }
        if let Some(v) = layout.detection_threshold {
            target.detection_threshold = v;
        }
        if let Some(v) = layout.group_split_threshold {
            target.group_split_threshold = v;
        }
        if let Some(v) = layout.strategy {
            target.strategy = v;
        }
        if let Some(v) = layout.relative_tolerance_min {
            target.relative_tolerance_min = v;
        }
        if let Some(v) = layout.relative_tolerance_ratio {
            target.relative_tolerance_ratio = v;
        }
        if let Some(v) = layout.gap_consistency_threshold {
            target.gap_consistency_threshold = v;
        }
        if let Some(v) = layout.container_types {
            target.container_types = v;
        }
        if let Some(v) = layout.container_id_prefix {
            if v.trim().is_empty() {
                return Err(anyhow::anyhow!("containerIdPrefix must not be empty"));
            }
            target.container_id_prefix = v;
        }
    }

    if let Some(projection) = parsed.projection
        && let Some(v) = projection.tolerance
    {
        config.projection.tolerance = v;
    }

    if let Some(output) = parsed.output {
        if let Some(v) = output.pretty {
            config.output.pretty = v;
        }
        if let Some(v) = output.sort_siblings {
            config.output.sort_siblings = v;
        }
    }

    Ok(config)
}
