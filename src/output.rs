//! Rendering of search results and structure trees
use crate::context::ContextLine;
use crate::search::MatchResult;
use crate::structure::StructureNode;
use byte_unit::{Byte, UnitType};
use clap::ValueEnum;
use colored::*;
use std::fmt;
use std::path::Path;

/// Output format types
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn format_matches(matches: &[MatchResult], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(format_matches_text(matches)),
        OutputFormat::Json => serde_json::to_string_pretty(matches),
    }
}

pub fn format_structure(tree: &StructureNode, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(format_structure_text(tree)),
        OutputFormat::Json => serde_json::to_string_pretty(tree),
    }
}

fn format_matches_text(matches: &[MatchResult]) -> String {
    let mut output = Vec::new();
    let mut current_file: Option<&Path> = None;

    for m in matches {
        if current_file != Some(m.path.as_path()) {
            output.push(format!("\n{} {}:", "File".green().bold(), m.path.display()));
            current_file = Some(m.path.as_path());
        }
        output.push("-".repeat(80).dimmed().to_string());

        for line in &m.context.before {
            output.push(context_line(line));
        }

        let matched = &m.context.matched;
        let highlighted = match matched.split_match() {
            Some((before, hit, after)) => format!("{}{}{}", before, hit.yellow().bold(), after),
            None => matched.content.clone(),
        };
        for (offset, text) in highlighted.split('\n').enumerate() {
            let gutter = if offset == 0 { "→" } else { " " };
            output.push(format!(
                "{} {} │ {}",
                gutter,
                (matched.line_number + offset).to_string().yellow().bold(),
                text
            ));
        }

        for line in &m.context.after {
            output.push(context_line(line));
        }
    }

    output.join("\n")
}

fn context_line(line: &ContextLine) -> String {
    format!(
        "  {} │ {}",
        line.line_number.to_string().dimmed(),
        line.content.dimmed()
    )
}

fn format_structure_text(tree: &StructureNode) -> String {
    let mut output = Vec::new();
    push_node(tree, 0, &mut output);
    output.join("\n")
}

fn push_node(node: &StructureNode, depth: usize, output: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match node {
        StructureNode::Directory { name, children } => {
            output.push(format!("{}{}/", indent, name.blue().bold()));
            for child in children {
                push_node(child, depth + 1, output);
            }
        }
        StructureNode::File { name, size } => {
            let adjusted = Byte::from_u64(*size).get_appropriate_unit(UnitType::Binary);
            output.push(format!(
                "{}{} {}",
                indent,
                name,
                format!("({:.2} {})", adjusted.get_value(), adjusted.get_unit()).dimmed()
            ));
        }
    }
}
