//! Inspect command - render the channel hierarchy of a snapshot.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use warden_guild::warden_tree::Node;

use crate::OutputFormat;
use crate::snapshot::Snapshot;

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Path to the snapshot file
    #[arg(required = true)]
    pub snapshot: PathBuf,

    /// Show permission override counts per channel
    #[arg(long)]
    pub overrides: bool,
}

/// Execute the inspect command.
pub fn execute(args: InspectArgs, format: OutputFormat) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let hierarchy = snapshot.hierarchy()?;

    match format {
        OutputFormat::Human => {
            let total: usize = hierarchy.len()
                + hierarchy.iter().map(|n| n.children().len()).sum::<usize>();
            println!(
                "guild {} - {} channels, {} roles",
                snapshot.guild.id,
                total,
                snapshot.guild.roles.len()
            );
            for node in &hierarchy {
                print_node(node, 0, args.overrides);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&hierarchy)?);
        }
        OutputFormat::JsonCompact => {
            println!("{}", serde_json::to_string(&hierarchy)?);
        }
    }

    Ok(())
}

fn print_node(node: &Node, depth: usize, show_overrides: bool) {
    let indent = "  ".repeat(depth);
    let mut line = format!("{indent}{} '{}'", node.kind, node.name);
    if show_overrides && !node.overrides.is_empty() {
        line.push_str(&format!(" [{} overrides]", node.overrides.len()));
    }
    println!("{line}");

    for child in node.children() {
        print_node(child, depth + 1, show_overrides);
    }
}
