//! appforge — declarative architecture in, deployable scaffold out
//!
//! The library surface is the [`ProjectService`]: construct one per
//! process (injecting the backend, cache, and rate limiter, or via
//! [`ProjectService::from_config`]) and call
//! [`generate_project_tiered`](ProjectService::generate_project_tiered)
//! for the full pipeline or
//! [`generate_project_basic`](ProjectService::generate_project_basic) for
//! the legacy capped pass. The pipeline itself lives in
//! [`appforge_engine`]; shared primitives (cache, rate limiter, errors)
//! in [`appforge_utils`].

pub mod cli;
pub mod service;

pub use service::{GenerateRequest, ProjectService};

pub use appforge_config::Config;
pub use appforge_engine::{Architecture, FileArtifact, ProjectBundle};
pub use appforge_utils::error::{AppForgeError, ServiceError};
