use flexinfer::layout::{AlignmentStrategy, process_node_relationships};
use flexinfer::{Config, optimize_design, parse_design};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeOptions {
    strategy: Option<AlignmentStrategy>,
    detection_threshold: Option<f32>,
    group_split_threshold: Option<f32>,
    container_types: Option<Vec<String>>,
    resolve_nesting: Option<bool>,
    sort_siblings: Option<bool>,
    pretty: Option<bool>,
}

fn build_config(options: &OptimizeOptions) -> Config {
    let mut config = Config::default();
    if let Some(strategy) = options.strategy {
        config.layout.strategy = strategy;
    }
    if let Some(threshold) = options.detection_threshold {
        config.layout.detection_threshold = threshold;
    }
    if let Some(threshold) = options.group_split_threshold {
        config.layout.group_split_threshold = threshold;
    }
    if let Some(types) = &options.container_types {
        config.layout.container_types = types.clone();
    }
    if let Some(sort) = options.sort_siblings {
        config.output.sort_siblings = sort;
    }
    config.output.pretty = options.pretty.unwrap_or(false);
    config
}

fn optimize_with_options(input: &str, options: &OptimizeOptions) -> Result<String, String> {
    let config = build_config(options);
    let mut design = parse_design(input).map_err(|error| error.to_string())?;
    if config.output.sort_siblings {
        flexinfer::ir::sort_nodes_by_position(&mut design.nodes);
    }
    if options.resolve_nesting.unwrap_or(false) {
        let nodes = std::mem::take(&mut design.nodes);
        design.nodes = process_node_relationships(nodes);
    }
    let optimized = optimize_design(design, &config.layout);
    flexinfer::parser::design_to_string(&optimized, config.output.pretty)
        .map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn optimize(input: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<OptimizeOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        OptimizeOptions::default()
    };
    optimize_with_options(input, &options).map_err(|error| JsValue::from_str(&error))
}
