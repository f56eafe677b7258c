use serde::Deserialize;

use crate::error::InputError;
use crate::ir::{Design, PositionedNode};

/// Shapes accepted on input: a design document, a bare node list, or a
/// single node.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DesignInput {
    Design(Design),
    Nodes(Vec<PositionedNode>),
    Node(Box<PositionedNode>),
}

impl From<DesignInput> for Design {
    fn from(input: DesignInput) -> Self {
        match input {
            DesignInput::Design(design) => design,
            DesignInput::Nodes(nodes) => Design::from_nodes(nodes),
            DesignInput::Node(node) => Design::from_nodes(vec![*node]),
        }
    }
}

pub fn parse_design(input: &str) -> Result<Design, InputError> {
    let parsed: DesignInput = match serde_json::from_str(input) {
        Ok(parsed) => parsed,
        Err(json_err) => match json5::from_str(input) {
            Ok(parsed) => parsed,
            Err(json5_err) => {
                return Err(InputError::Malformed {
                    json: json_err,
                    json5: json5_err,
                });
            }
        },
    };
    let design = Design::from(parsed);
    if design.nodes.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(design)
}

pub fn design_to_string(design: &Design, pretty: bool) -> Result<String, InputError> {
    let out = if pretty {
        serde_json::to_string_pretty(design)?
    } else {
        serde_json::to_string(design)?
    };
    Ok(out)
}
