//! Exposed service operations
//!
//! `ProjectService` is the transport-agnostic surface of the system: it
//! holds the injected backend, the shared content cache, and the rate
//! limiter, and exposes the two generation operations. The tiered operation
//! is admission-checked and fails fast when no backend is configured; the
//! legacy basic operation is ungated and silently degrades to placeholders.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{Instrument, info, warn};

use appforge_config::Config;
use appforge_engine::bundle::GenerationLogEntry;
use appforge_engine::{
    Architecture, BatchScheduler, FileGenerator, FileSpec, ProjectBundle, build_manifest, scaffold,
};
use appforge_llm::LlmBackend;
use appforge_utils::cache::ContentCache;
use appforge_utils::error::ServiceError;
use appforge_utils::logging::pipeline_span;
use appforge_utils::rate_limit::RateLimiter;

/// A generation request as it arrives at the service boundary.
///
/// The architecture is optional because callers may omit it; both
/// operations reject such requests with
/// [`ServiceError::MissingArchitecture`] before doing any work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub architecture: Option<Architecture>,
    /// Client identity used for rate limiting (e.g., originating address)
    pub client_key: String,
}

impl GenerateRequest {
    #[must_use]
    pub fn new(architecture: Architecture, client_key: impl Into<String>) -> Self {
        Self {
            architecture: Some(architecture),
            client_key: client_key.into(),
        }
    }
}

/// The service surface over the generation pipeline.
///
/// Backend, cache, and limiter are constructor-injected and shared for the
/// process lifetime; the service itself is cheap to clone per request.
#[derive(Clone)]
pub struct ProjectService {
    backend: Option<Arc<dyn LlmBackend>>,
    cache: Arc<ContentCache>,
    limiter: Arc<RateLimiter>,
    config: Config,
}

impl ProjectService {
    /// Create a service from explicitly constructed collaborators.
    ///
    /// `backend = None` means the generative capability is unavailable.
    #[must_use]
    pub fn new(
        backend: Option<Arc<dyn LlmBackend>>,
        cache: Arc<ContentCache>,
        limiter: Arc<RateLimiter>,
        config: Config,
    ) -> Self {
        Self {
            backend,
            cache,
            limiter,
            config,
        }
    }

    /// Create a service from configuration.
    ///
    /// A backend construction failure is not fatal: the service runs
    /// without a backend, the tiered operation reports unavailable, and
    /// the basic operation degrades to placeholders.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let backend = match appforge_llm::from_config(&config) {
            Ok(backend) => Some(Arc::from(backend)),
            Err(err) => {
                warn!(error = %err, "Generative backend unavailable");
                None
            }
        };

        let cache = Arc::new(ContentCache::new(
            config.cache.capacity,
            Duration::from_secs(config.cache.ttl_secs),
        ));
        let limiter = Arc::new(RateLimiter::new(
            config.rate_limit.max_requests,
            Duration::from_secs(config.rate_limit.window_secs),
        ));

        Self::new(backend, cache, limiter, config)
    }

    /// Whether a generative backend is configured.
    #[must_use]
    pub fn backend_available(&self) -> bool {
        self.backend.is_some()
    }

    fn generator(&self) -> FileGenerator {
        FileGenerator::new(
            self.backend.clone(),
            self.cache.clone(),
            Duration::from_secs(self.config.generation.request_timeout_secs),
        )
    }

    /// Legacy single-pass generation, capped to a small number of dynamic
    /// files.
    ///
    /// Ungated and best-effort: no rate limiting, no fail-fast on a missing
    /// backend (placeholders are emitted instead), and an empty dependency
    /// map in the result.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::MissingArchitecture`] when the request
    /// carries no architecture.
    pub async fn generate_project_basic(
        &self,
        request: GenerateRequest,
    ) -> Result<ProjectBundle, ServiceError> {
        let arch = request
            .architecture
            .ok_or(ServiceError::MissingArchitecture)?;

        let span = pipeline_span(&arch.name, "basic");
        async {
            let static_files = scaffold::static_artifacts(&arch);
            let mut produced: HashSet<String> =
                static_files.iter().map(|f| f.path.clone()).collect();

            // Front of the tiered manifest, so the cap keeps the most
            // valuable files.
            let manifest = build_manifest(&arch);
            let specs: Vec<&FileSpec> = manifest
                .iter()
                .filter(|spec| produced.insert(spec.target_path.clone()))
                .take(self.config.generation.basic_file_cap)
                .collect();

            let generator = self.generator();
            let dynamic_files =
                join_all(specs.iter().map(|spec| generator.generate(spec, &arch))).await;

            let count = dynamic_files.len();
            let mut files = static_files;
            files.extend(dynamic_files);

            let log = vec![GenerationLogEntry {
                phase: "basic".to_string(),
                batch: 0,
                count,
                status: "completed".to_string(),
            }];

            info!(project = %arch.name, files = files.len(), "Basic generation complete");
            Ok(ProjectBundle::new(
                &arch.name,
                files,
                std::collections::BTreeMap::new(),
                log,
            ))
        }
        .instrument(span)
        .await
    }

    /// Full tiered pipeline run.
    ///
    /// Admission-checked against the rate limiter by client key, and fails
    /// fast before any file work when no backend is configured. A
    /// configured backend whose calls fail still yields a complete bundle
    /// of fallback-marked files.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::RateLimited`] when the client's window is full
    /// - [`ServiceError::MissingArchitecture`] when no architecture is given
    /// - [`ServiceError::Unavailable`] when no backend is configured
    /// - [`ServiceError::Engine`] for a fatal orchestration failure
    pub async fn generate_project_tiered(
        &self,
        request: GenerateRequest,
    ) -> Result<ProjectBundle, ServiceError> {
        self.limiter.check(&request.client_key)?;

        let arch = request
            .architecture
            .ok_or(ServiceError::MissingArchitecture)?;

        if self.backend.is_none() {
            return Err(ServiceError::Unavailable);
        }

        let span = pipeline_span(&arch.name, "tiered");
        let scheduler = BatchScheduler::new(self.generator(), self.config.generation.batch_size);
        let bundle = scheduler.run(&arch).instrument(span).await?;
        Ok(bundle)
    }
}
