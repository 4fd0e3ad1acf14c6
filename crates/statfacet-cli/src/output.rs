use console::style;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Write as _;

use statfacet_core::models::{GeographicLevel, LocationOptionNode};

/// Output format mode
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Human
            },
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    pub fn success(&self, message: impl Display) {
        if let OutputFormat::Human = self.format {
            println!("{} {}", style("✓").green().bold(), message);
        }
    }
}

/// Render a per-level option forest as an indented tree.
///
/// Group nodes are annotated with the ancestor level they stand for;
/// leaves show their disambiguated label and effective value.
pub fn render_forest(forest: &BTreeMap<GeographicLevel, Vec<LocationOptionNode>>) -> String {
    let mut rendered = String::new();
    for (level, nodes) in forest {
        let _ = writeln!(rendered, "{}", level.name());
        render_nodes(&mut rendered, nodes, 1);
    }
    rendered
}

fn render_nodes(rendered: &mut String, nodes: &[LocationOptionNode], depth: usize) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        let _ = match node.level {
            Some(level) => writeln!(
                rendered,
                "{}{} ({}) [{}]",
                indent, node.label, node.value, level
            ),
            None => writeln!(rendered, "{}{} ({})", indent, node.label, node.value),
        };
        if let Some(children) = &node.options {
            render_nodes(rendered, children, depth + 1);
        }
    }
}
