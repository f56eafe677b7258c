#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, ProjectionConfig, load_config};
pub use error::InputError;
pub use ir::{Design, PositionedNode, StyleValue};
pub use layout::{ContainerIds, optimize_design, optimize_nodes};
pub use parser::parse_design;

/// Parses `input`, optimizes it with `config` and returns the JSON result.
pub fn optimize_json(input: &str, config: &Config) -> Result<String, InputError> {
    let mut design = parse_design(input)?;
    if config.output.sort_siblings {
        ir::sort_nodes_by_position(&mut design.nodes);
    }
    let optimized = optimize_design(design, &config.layout);
    parser::design_to_string(&optimized, config.output.pretty)
}
