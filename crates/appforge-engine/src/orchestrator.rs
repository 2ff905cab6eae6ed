//! Tier-by-tier, batch-by-batch pipeline execution
//!
//! The scheduler emits the static file set first, then walks the manifest
//! in fixed tier order. Within a tier, specs whose target path was already
//! produced are dropped, the remainder is split into fixed-size batches,
//! and each batch is generated concurrently and awaited fully before the
//! next begins. Batch size — not a timeout — bounds peak concurrency
//! against the backend, and the produced-path set and output list are only
//! mutated between batches, so they need no synchronization.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::{debug, info};

use appforge_utils::error::EngineError;

use crate::architecture::Architecture;
use crate::assembler;
use crate::bundle::{GenerationLogEntry, ProjectBundle};
use crate::generator::FileGenerator;
use crate::prioritizer::{self, FileSpec, Tier};
use crate::scaffold;

/// Default number of files generated concurrently within one batch.
pub const DEFAULT_BATCH_SIZE: usize = 6;

/// Drives one pipeline run from architecture to assembled bundle.
pub struct BatchScheduler {
    generator: FileGenerator,
    batch_size: usize,
}

impl BatchScheduler {
    /// Create a scheduler over the given generator.
    #[must_use]
    pub fn new(generator: FileGenerator, batch_size: usize) -> Self {
        Self {
            generator,
            batch_size: batch_size.max(1),
        }
    }

    /// Run the full tiered pipeline.
    ///
    /// Per-file failures are absorbed inside the generator and never abort
    /// the run; the bundle always contains every planned path.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Orchestration` only for unexpected internal
    /// failures (a duplicate path surviving dedup), in which case no
    /// partial bundle is returned.
    pub async fn run(&self, arch: &Architecture) -> Result<ProjectBundle, EngineError> {
        let static_files = scaffold::static_artifacts(arch);
        let mut produced: HashSet<String> =
            static_files.iter().map(|f| f.path.clone()).collect();

        let manifest = prioritizer::build_manifest(arch);
        debug!(
            project = %arch.name,
            planned = manifest.total_len(),
            static_count = static_files.len(),
            "Built generation manifest"
        );

        let mut dynamic_files = Vec::new();
        let mut generation_log = Vec::new();

        for tier in Tier::ORDER {
            // Dedup against everything produced so far, including within
            // this tier: a later spec never regenerates a path an earlier
            // batch or static file already wrote.
            let mut pending: Vec<&FileSpec> = Vec::new();
            for spec in manifest.tier(tier) {
                if produced.insert(spec.target_path.clone()) {
                    pending.push(spec);
                }
            }

            if pending.is_empty() {
                debug!(tier = tier.as_str(), "No new files for tier");
                continue;
            }

            for (batch_index, batch) in pending.chunks(self.batch_size).enumerate() {
                let artifacts = join_all(
                    batch
                        .iter()
                        .map(|spec| self.generator.generate(spec, arch)),
                )
                .await;

                let count = artifacts.len();
                dynamic_files.extend(artifacts);
                generation_log.push(GenerationLogEntry::completed(tier, batch_index, count));

                debug!(
                    tier = tier.as_str(),
                    batch = batch_index,
                    count,
                    "Batch settled"
                );
            }
        }

        let bundle = assembler::assemble(static_files, dynamic_files, arch, generation_log);

        // Invariant: paths are unique across the whole bundle. Dedup above
        // guarantees this; a violation is an internal bug, not a per-file
        // failure, and propagates as a fatal pipeline error.
        let mut seen = HashSet::new();
        for file in &bundle.files {
            if !seen.insert(file.path.as_str()) {
                return Err(EngineError::Orchestration(format!(
                    "duplicate output path: {}",
                    file.path
                )));
            }
        }

        info!(
            project = %arch.name,
            files = bundle.files.len(),
            batches = bundle.generation_log.len(),
            "Pipeline run complete"
        );

        Ok(bundle)
    }
}
