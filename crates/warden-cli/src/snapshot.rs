//! Snapshot files: already-fetched guild data on disk.
//!
//! The core never talks to the remote service; whatever fetched the guild
//! writes the result as JSON, and the CLI replays it from here.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use warden_guild::warden_acl::{Guild, Member};
use warden_guild::warden_tree::{Node, RawChannel, nest};

/// One fully fetched view of a guild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub guild: Guild,
    pub channels: Vec<RawChannel>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Snapshot {
    /// Read and parse a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot file {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse snapshot file {}", path.display()))?;

        debug!(
            channels = snapshot.channels.len(),
            members = snapshot.members.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Assemble the nested channel hierarchy from the flat channel list.
    pub fn hierarchy(&self) -> Result<Vec<Node>> {
        nest(self.channels.clone()).context("failed to assemble channel hierarchy")
    }
}
