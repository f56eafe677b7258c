use crate::config::{Config, load_config};
use crate::ir::{Design, sort_nodes_by_position};
use crate::layout::{
    ContainerIds, build_grid_layout, optimize_design_with, optimize_nodes, process_node_relationships,
};
use crate::layout_dump::write_layout_dump;
use crate::parser::{design_to_string, parse_design};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "flexinfer",
    version,
    about = "Infer flexbox layout from absolutely positioned design nodes"
)]
pub struct Args {
    /// Input file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file (thresholds, strategy, output options)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Pipeline to run on the input nodes
    #[arg(short = 'm', long = "mode", value_enum, default_value = "optimize")]
    pub mode: Mode,

    /// Sort siblings top-to-bottom, left-to-right before running
    #[arg(long = "sort")]
    pub sort: bool,

    /// Write a JSON summary of the resulting tree to this path
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long = "compact")]
    pub compact: bool,

    /// Log classification decisions to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Rewrite each node tree bottom-up into flex containers
    Optimize,
    /// Rebuild nesting of the root nodes from box containment, then optimize
    Resolve,
    /// Optimize each root's subtree, then group the roots into rows and
    /// columns by edge projection
    Grid,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if args.sort {
        config.output.sort_siblings = true;
    }
    if args.compact {
        config.output.pretty = false;
    }

    let input = read_input(args.input.as_deref())?;
    let design = parse_design(&input)?;
    let optimized = run_pipeline(design.clone(), args.mode, &config);

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &design, &optimized)?;
    }
    let out = design_to_string(&optimized, config.output.pretty)?;
    write_output(&out, args.output.as_deref())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "flexinfer=debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

pub fn run_pipeline(mut design: Design, mode: Mode, config: &Config) -> Design {
    if config.output.sort_siblings {
        sort_nodes_by_position(&mut design.nodes);
    }
    let mut ids = ContainerIds::for_nodes(config.layout.container_id_prefix.clone(), &design.nodes);
    match mode {
        Mode::Optimize => optimize_design_with(design, &config.layout, &mut ids),
        Mode::Resolve => {
            let nodes = std::mem::take(&mut design.nodes);
            design.nodes = process_node_relationships(nodes);
            optimize_design_with(design, &config.layout, &mut ids)
        }
        Mode::Grid => {
            let nodes = optimize_nodes(std::mem::take(&mut design.nodes), &config.layout, &mut ids);
            design.nodes =
                build_grid_layout(nodes, config.projection.tolerance, &config.layout, &mut ids);
            design
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(out: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, out)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{out}")?;
        }
    }
    Ok(())
}
