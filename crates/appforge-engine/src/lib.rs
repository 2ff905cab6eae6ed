//! Tiered project-generation pipeline
//!
//! The engine turns an [`Architecture`](architecture::Architecture) into a
//! complete [`ProjectBundle`](bundle::ProjectBundle): the prioritizer plans
//! files into four tiers, the scheduler walks tiers batch by batch, the
//! generator dispatches each planned file to a content strategy (backed by
//! the generative service or a deterministic renderer), and the assembler
//! merges everything with the dependency rule table.
//!
//! Per-file failures never escape the generator; the only error this crate
//! surfaces is a fatal orchestration failure, and then no partial bundle is
//! returned.

pub mod architecture;
pub mod assembler;
pub mod bundle;
pub mod generator;
pub mod orchestrator;
pub mod prioritizer;
pub mod scaffold;

pub use architecture::Architecture;
pub use bundle::{FileArtifact, GenerationLogEntry, ProjectBundle};
pub use generator::{FALLBACK_MARKER, FileGenerator};
pub use orchestrator::{BatchScheduler, DEFAULT_BATCH_SIZE};
pub use prioritizer::{FileKind, FileSpec, GenerationManifest, Tier, build_manifest};

pub use appforge_utils::error::EngineError;
