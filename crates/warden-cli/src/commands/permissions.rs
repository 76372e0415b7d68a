//! Permissions command - per-member effective permissions for a channel.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;

use warden_guild::warden_acl::{Permission, effective_permissions, members_with_flag};
use warden_guild::warden_report::member_permission_table;
use warden_guild::warden_tree::Node;

use crate::OutputFormat;
use crate::snapshot::Snapshot;

/// Arguments for the permissions command.
#[derive(Args)]
pub struct PermissionsArgs {
    /// Path to the snapshot file
    #[arg(required = true)]
    pub snapshot: PathBuf,

    /// Name of the channel to resolve against
    #[arg(long)]
    pub channel: String,

    /// Bit position to mark in the rendered bit strings
    #[arg(long)]
    pub mark: Option<usize>,

    /// Only list members whose effective permissions contain this flag
    /// (e.g. VIEW_CHANNEL)
    #[arg(long)]
    pub can: Option<String>,
}

#[derive(Debug, Serialize)]
struct MemberPermissions {
    member: String,
    effective: Vec<&'static str>,
}

/// Execute the permissions command.
pub fn execute(args: PermissionsArgs, format: OutputFormat, default_mark: Option<usize>) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let hierarchy = snapshot.hierarchy()?;

    let channel = find_channel(&hierarchy, &args.channel)
        .with_context(|| format!("could not find channel with name '{}'", args.channel))?;

    if let Some(flag_name) = &args.can {
        let Some(flag) = Permission::from_name(flag_name) else {
            bail!("unknown permission flag '{flag_name}'");
        };
        let matching = members_with_flag(
            &snapshot.guild,
            &channel.overrides,
            &snapshot.members,
            flag,
        )?;

        match format {
            OutputFormat::Human => {
                println!(
                    "{} of {} members have {} in '{}':",
                    matching.len(),
                    snapshot.members.len(),
                    flag,
                    channel.name
                );
                for member in matching {
                    println!("  - {}", member.name);
                }
            }
            OutputFormat::Json | OutputFormat::JsonCompact => {
                let names: Vec<&str> = matching.iter().map(|m| m.name.as_str()).collect();
                println!("{}", serde_json::to_string(&names)?);
            }
        }
        return Ok(());
    }

    match format {
        OutputFormat::Human => {
            let table = member_permission_table(
                &snapshot.guild,
                &channel.overrides,
                &snapshot.members,
                args.mark.or(default_mark),
            )?;
            println!("{table}");
        }
        OutputFormat::Json | OutputFormat::JsonCompact => {
            let mut rows = Vec::with_capacity(snapshot.members.len());
            for member in &snapshot.members {
                let resolved =
                    effective_permissions(&snapshot.guild, &channel.overrides, member)?;
                rows.push(MemberPermissions {
                    member: member.name.clone(),
                    effective: resolved.flag_names(),
                });
            }
            let json = if matches!(format, OutputFormat::JsonCompact) {
                serde_json::to_string(&rows)?
            } else {
                serde_json::to_string_pretty(&rows)?
            };
            println!("{json}");
        }
    }

    Ok(())
}

/// Find a channel by name anywhere in the hierarchy.
fn find_channel<'a>(nodes: &'a [Node], name: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.name == name {
            return Some(node);
        }
        if let Some(found) = find_channel(node.children(), name) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_guild::warden_acl::Id;
    use warden_guild::warden_tree::NodeKind;

    fn leaf(id: u64, name: &str) -> Node {
        Node {
            id: Id(id),
            kind: NodeKind::Text,
            name: name.to_string(),
            position: 0,
            overrides: Vec::new(),
            children: None,
        }
    }

    #[test]
    fn test_find_channel_searches_nested_levels() {
        let nodes = vec![
            leaf(1, "top"),
            Node {
                id: Id(10),
                kind: NodeKind::Category,
                name: "general".to_string(),
                position: 0,
                overrides: Vec::new(),
                children: Some(vec![leaf(11, "nested")]),
            },
        ];

        assert_eq!(find_channel(&nodes, "top").unwrap().id, Id(1));
        assert_eq!(find_channel(&nodes, "nested").unwrap().id, Id(11));
        assert!(find_channel(&nodes, "missing").is_none());
    }
}
