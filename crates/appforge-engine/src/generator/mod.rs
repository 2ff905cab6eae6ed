//! Per-file content production strategies
//!
//! `FileGenerator::generate` never fails from the caller's point of view:
//! every per-file error is absorbed here and converted into marked fallback
//! content, so batches and tiers always settle. Dispatch is a closed match
//! over `FileKind` — adding a kind is a compile-checked extension.

pub mod content;
pub mod prompts;

pub use content::FALLBACK_MARKER;

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use appforge_llm::{LlmBackend, LlmInvocation, Message, strip_code_fences};
use appforge_utils::cache::{ContentCache, content_signature};

use crate::architecture::Architecture;
use crate::bundle::FileArtifact;
use crate::prioritizer::FileSpec;

/// Dispatches a FileSpec to its content-production strategy.
///
/// AI-backed strategies consult the shared content cache, make at most one
/// backend call, and fall back to deterministic content on any error.
/// Static strategies render locally and cannot fail.
#[derive(Clone)]
pub struct FileGenerator {
    backend: Option<Arc<dyn LlmBackend>>,
    cache: Arc<ContentCache>,
    request_timeout: Duration,
}

impl FileGenerator {
    /// Create a generator.
    ///
    /// `backend = None` means the generative capability is unavailable:
    /// AI-backed kinds then produce placeholders immediately, with no call
    /// attempted.
    #[must_use]
    pub fn new(
        backend: Option<Arc<dyn LlmBackend>>,
        cache: Arc<ContentCache>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            backend,
            cache,
            request_timeout,
        }
    }

    /// Whether a generative backend is configured.
    #[must_use]
    pub fn backend_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Produce the artifact for one FileSpec. Never raises for the caller.
    pub async fn generate(&self, spec: &FileSpec, arch: &Architecture) -> FileArtifact {
        let text = if spec.kind.is_ai_backed() {
            self.generate_ai(spec, arch).await
        } else {
            content::static_content(spec, arch)
        };

        FileArtifact::new(&spec.target_path, text)
    }

    async fn generate_ai(&self, spec: &FileSpec, arch: &Architecture) -> String {
        let Some(backend) = &self.backend else {
            return content::placeholder(spec, arch);
        };

        let signature = spec_signature(spec, arch);
        if let Some(cached) = self.cache.get(&signature) {
            debug!(path = %spec.target_path, "Content cache hit");
            return cached;
        }

        let payload = prompts::context_payload(spec, arch);
        let invocation = LlmInvocation::new(
            &arch.name,
            &spec.target_path,
            "",
            self.request_timeout,
            vec![
                Message::system(prompts::SYSTEM_PROMPT),
                Message::user(payload),
            ],
        );

        match backend.invoke(invocation).await {
            Ok(result) => {
                let text = strip_code_fences(&result.raw_response);
                if text.is_empty() {
                    warn!(
                        path = %spec.target_path,
                        "Backend returned empty content; substituting fallback"
                    );
                    return content::fallback(spec, arch);
                }
                self.cache.set(&signature, &text);
                text
            }
            Err(err) => {
                warn!(
                    path = %spec.target_path,
                    error = %err,
                    "File generation failed; substituting fallback content"
                );
                content::fallback(spec, arch)
            }
        }
    }
}

/// Stable signature of the inputs to one file generation.
///
/// Keyed on the kind, target path, project name, and the metadata slice so
/// two architectures with the same page list share cache entries only when
/// the inputs genuinely match.
fn spec_signature(spec: &FileSpec, arch: &Architecture) -> String {
    let kind = serde_json::to_string(&spec.kind).unwrap_or_default();
    let metadata = spec
        .metadata
        .as_ref()
        .and_then(|m| serde_json::to_string(m).ok())
        .unwrap_or_default();
    content_signature(&[&kind, &spec.target_path, &arch.name, &metadata])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::architecture::Page;
    use crate::prioritizer::{FileKind, SpecMetadata, Tier};
    use appforge_utils::error::LlmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmBackend for CountingBackend {
        async fn invoke(
            &self,
            inv: LlmInvocation,
        ) -> Result<appforge_llm::LlmResult, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(appforge_llm::LlmResult::new(
                format!("```tsx\n// generated {}\n```", inv.target),
                "mock",
                "mock-model",
            ))
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl LlmBackend for FailingBackend {
        async fn invoke(
            &self,
            _inv: LlmInvocation,
        ) -> Result<appforge_llm::LlmResult, LlmError> {
            Err(LlmError::ProviderOutage("mock outage".to_string()))
        }
    }

    fn page_spec() -> FileSpec {
        FileSpec {
            kind: FileKind::Page,
            target_path: "src/pages/Home.tsx".to_string(),
            tier: Tier::Core,
            priority: 80,
            metadata: Some(SpecMetadata::Page(Page::new("Home"))),
        }
    }

    #[tokio::test]
    async fn test_no_backend_yields_placeholder_without_calls() {
        let generator = FileGenerator::new(
            None,
            Arc::new(ContentCache::with_defaults()),
            Duration::from_secs(5),
        );
        let arch = Architecture::new("storefront");

        let artifact = generator.generate(&page_spec(), &arch).await;
        assert_eq!(artifact.path, "src/pages/Home.tsx");
        assert!(!artifact.content.is_empty());
        assert!(!artifact.content.contains(FALLBACK_MARKER));
        assert!(!generator.backend_available());
    }

    #[tokio::test]
    async fn test_successful_generation_is_fence_stripped_and_cached() {
        let backend = Arc::new(CountingBackend {
            calls: AtomicUsize::new(0),
        });
        let generator = FileGenerator::new(
            Some(backend.clone()),
            Arc::new(ContentCache::with_defaults()),
            Duration::from_secs(5),
        );
        let arch = Architecture::new("storefront");

        let first = generator.generate(&page_spec(), &arch).await;
        assert_eq!(first.content, "// generated src/pages/Home.tsx");

        // Second generation of the same spec is served from the cache
        let second = generator.generate(&page_spec(), &arch).await;
        assert_eq!(second.content, first.content);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_backend_error_yields_marked_fallback() {
        let generator = FileGenerator::new(
            Some(Arc::new(FailingBackend)),
            Arc::new(ContentCache::with_defaults()),
            Duration::from_secs(5),
        );
        let arch = Architecture::new("storefront");

        let artifact = generator.generate(&page_spec(), &arch).await;
        assert!(artifact.content.contains(FALLBACK_MARKER));
        assert!(!artifact.content.is_empty());
    }

    #[tokio::test]
    async fn test_static_kinds_never_touch_the_backend() {
        let backend = Arc::new(CountingBackend {
            calls: AtomicUsize::new(0),
        });
        let generator = FileGenerator::new(
            Some(backend.clone()),
            Arc::new(ContentCache::with_defaults()),
            Duration::from_secs(5),
        );
        let arch = Architecture::new("storefront");

        let spec = FileSpec {
            kind: FileKind::Stylesheet,
            target_path: "src/styles/globals.css".to_string(),
            tier: Tier::Critical,
            priority: 100,
            metadata: None,
        };

        let artifact = generator.generate(&spec, &arch).await;
        assert!(!artifact.content.is_empty());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_spec_signature_distinguishes_projects_and_paths() {
        let arch_a = Architecture::new("storefront");
        let arch_b = Architecture::new("dashboard");
        let spec = page_spec();

        assert_eq!(spec_signature(&spec, &arch_a), spec_signature(&spec, &arch_a));
        assert_ne!(spec_signature(&spec, &arch_a), spec_signature(&spec, &arch_b));

        let mut other = page_spec();
        other.target_path = "src/pages/About.tsx".to_string();
        assert_ne!(spec_signature(&spec, &arch_a), spec_signature(&other, &arch_a));
    }
}
