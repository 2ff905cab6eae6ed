//! Output units of the pipeline: artifacts, the generation log, and the
//! final project bundle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::prioritizer::Tier;

/// A generated file: final path and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileArtifact {
    pub path: String,
    pub content: String,
}

impl FileArtifact {
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// One completed batch recorded in the generation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationLogEntry {
    /// Tier name ("critical", "core", "supporting", "config")
    pub phase: String,
    /// Zero-based batch index within the tier
    pub batch: usize,
    /// Number of artifacts produced by this batch
    pub count: usize,
    pub status: String,
}

impl GenerationLogEntry {
    /// Record a fully settled batch.
    #[must_use]
    pub fn completed(tier: Tier, batch: usize, count: usize) -> Self {
        Self {
            phase: tier.as_str().to_string(),
            batch,
            count,
            status: "completed".to_string(),
        }
    }
}

/// The complete, deployable output of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectBundle {
    pub name: String,
    pub files: Vec<FileArtifact>,
    /// Package name to version-spec, deterministic iteration order
    pub dependencies: BTreeMap<String, String>,
    pub install_command: String,
    pub start_command: String,
    pub generation_log: Vec<GenerationLogEntry>,
    pub generated_at: DateTime<Utc>,
}

impl ProjectBundle {
    /// Assemble a bundle with the fixed install/start commands.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        files: Vec<FileArtifact>,
        dependencies: BTreeMap<String, String>,
        generation_log: Vec<GenerationLogEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            files,
            dependencies,
            install_command: crate::scaffold::INSTALL_COMMAND.to_string(),
            start_command: crate::scaffold::START_COMMAND.to_string(),
            generation_log,
            generated_at: Utc::now(),
        }
    }

    /// Look up a file by exact path.
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&FileArtifact> {
        self.files.iter().find(|f| f.path == path)
    }
}
