//! Integration tests for the tiered generation pipeline
//!
//! These tests drive the pipeline through `ProjectService` with mock
//! backends and verify its documented properties: unique output paths, the
//! static-file guarantee, total degradation safety, tier ordering of the
//! generation log, the batch-size bound, and the concrete tier-count
//! scenario. No API keys or network access required.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use proptest::prelude::*;

use appforge::{Architecture, GenerateRequest, ProjectService};
use appforge_config::Config;
use appforge_engine::FALLBACK_MARKER;
use appforge_engine::architecture::{
    AuthProvider, Component, DataFetching, DataStore, Page, StateManagement,
};
use appforge_llm::{LlmBackend, LlmInvocation, LlmResult};
use appforge_utils::cache::ContentCache;
use appforge_utils::error::LlmError;
use appforge_utils::rate_limit::RateLimiter;

/// Backend that answers every invocation with deterministic content.
struct EchoBackend {
    calls: AtomicUsize,
}

impl EchoBackend {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LlmBackend for EchoBackend {
    async fn invoke(&self, inv: LlmInvocation) -> Result<LlmResult, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(LlmResult::new(
            format!("```tsx\n// generated {}\n```", inv.target),
            "mock",
            "mock-model",
        ))
    }
}

/// Backend whose every call fails, forcing per-file fallback.
struct OutageBackend;

#[async_trait]
impl LlmBackend for OutageBackend {
    async fn invoke(&self, _inv: LlmInvocation) -> Result<LlmResult, LlmError> {
        Err(LlmError::ProviderOutage("simulated outage".to_string()))
    }
}

fn service_with(backend: Arc<dyn LlmBackend>) -> ProjectService {
    ProjectService::new(
        Some(backend),
        Arc::new(ContentCache::with_defaults()),
        Arc::new(RateLimiter::with_defaults()),
        Config::minimal_for_testing(),
    )
}

/// The concrete scenario from the design discussion: 2 pages, 3 components
/// (1 atomic), one data store, managed-backend auth.
fn scenario_architecture() -> Architecture {
    let mut arch = Architecture::new("storefront");
    arch.stack.state_management = StateManagement::Zustand;
    arch.stack.data_fetching = DataFetching::ReactQuery;
    arch.auth.provider = AuthProvider::Supabase;
    arch.pages = vec![Page::new("Home"), Page::new("Checkout")];
    arch.components = vec![
        Component::new("Button", true),
        Component::new("ProductCard", false),
        Component::new("CartDrawer", false),
    ];
    arch.stores = vec![DataStore::new("cart")];
    arch
}

const STATIC_PATHS: [&str; 10] = [
    "package.json",
    "index.html",
    "vite.config.ts",
    "tsconfig.json",
    "tsconfig.node.json",
    "tailwind.config.js",
    "postcss.config.js",
    "README.md",
    ".env.example",
    ".gitignore",
];

#[tokio::test]
async fn test_concrete_scenario_tier_counts() {
    let service = service_with(Arc::new(EchoBackend::new()));
    let bundle = service
        .generate_project_tiered(GenerateRequest::new(scenario_architecture(), "test"))
        .await
        .expect("tiered generation should succeed");

    // critical 7 + core 2 + supporting 7 + config 1 (doc trio dedupes
    // against the static set) = 17 dynamic files, plus 10 static
    assert_eq!(bundle.files.len(), 27);

    let dynamic_count: usize = bundle.generation_log.iter().map(|e| e.count).sum();
    assert_eq!(dynamic_count, 17);

    assert!(bundle.file("src/context/AuthContext.tsx").is_some());
    assert!(bundle.file("src/store/cartStore.ts").is_some());
    assert!(
        bundle
            .file("supabase/migrations/001_initial_schema.sql")
            .is_some()
    );
}

#[tokio::test]
async fn test_all_paths_are_unique() {
    let service = service_with(Arc::new(EchoBackend::new()));
    let bundle = service
        .generate_project_tiered(GenerateRequest::new(scenario_architecture(), "test"))
        .await
        .unwrap();

    let paths: HashSet<&str> = bundle.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths.len(), bundle.files.len());
}

#[tokio::test]
async fn test_static_files_always_present() {
    let service = service_with(Arc::new(OutageBackend));
    let bundle = service
        .generate_project_tiered(GenerateRequest::new(scenario_architecture(), "test"))
        .await
        .unwrap();

    for path in STATIC_PATHS {
        assert!(bundle.file(path).is_some(), "missing static file {path}");
    }
}

#[tokio::test]
async fn test_total_degradation_safety() {
    // Every backend call fails; the run must still return a complete
    // bundle with non-empty, fallback-marked content for AI-backed files.
    let service = service_with(Arc::new(OutageBackend));
    let bundle = service
        .generate_project_tiered(GenerateRequest::new(scenario_architecture(), "test"))
        .await
        .expect("pipeline must not fail on per-file errors");

    assert_eq!(bundle.files.len(), 27);
    for file in &bundle.files {
        assert!(!file.content.is_empty(), "{} is empty", file.path);
    }

    let page = bundle.file("src/pages/Home.tsx").unwrap();
    assert!(page.content.contains(FALLBACK_MARKER));

    // Static and statically rendered files are never marked
    let hook = bundle.file("src/hooks/useAuth.ts").unwrap();
    assert!(!hook.content.contains(FALLBACK_MARKER));
    assert!(!bundle.file("package.json").unwrap().content.contains(FALLBACK_MARKER));
}

#[tokio::test]
async fn test_generation_log_is_in_tier_order() {
    let service = service_with(Arc::new(EchoBackend::new()));
    let bundle = service
        .generate_project_tiered(GenerateRequest::new(scenario_architecture(), "test"))
        .await
        .unwrap();

    let tier_rank = |phase: &str| match phase {
        "critical" => 0,
        "core" => 1,
        "supporting" => 2,
        "config" => 3,
        other => panic!("unexpected phase {other}"),
    };

    let ranks: Vec<usize> = bundle
        .generation_log
        .iter()
        .map(|entry| tier_rank(&entry.phase))
        .collect();
    let mut sorted = ranks.clone();
    sorted.sort_unstable();
    assert_eq!(ranks, sorted, "a later tier preceded an earlier one");
    assert_eq!(tier_rank(&bundle.generation_log[0].phase), 0);
}

#[tokio::test]
async fn test_no_batch_exceeds_the_batch_size() {
    let service = service_with(Arc::new(EchoBackend::new()));
    let bundle = service
        .generate_project_tiered(GenerateRequest::new(scenario_architecture(), "test"))
        .await
        .unwrap();

    for entry in &bundle.generation_log {
        assert!(
            entry.count <= 6,
            "batch {} in {} processed {} files",
            entry.batch,
            entry.phase,
            entry.count
        );
    }
}

#[tokio::test]
async fn test_dependency_table_follows_selections() {
    let service = service_with(Arc::new(EchoBackend::new()));
    let bundle = service
        .generate_project_tiered(GenerateRequest::new(scenario_architecture(), "test"))
        .await
        .unwrap();

    assert_eq!(bundle.dependencies.get("react"), Some(&"^18.2.0".to_string()));
    assert!(bundle.dependencies.contains_key("zustand"));
    assert!(bundle.dependencies.contains_key("@tanstack/react-query"));
    assert!(bundle.dependencies.contains_key("@supabase/supabase-js"));
    assert_eq!(bundle.install_command, "npm install");
    assert_eq!(bundle.start_command, "npm run dev");
}

#[tokio::test]
async fn test_successful_content_is_fence_stripped() {
    let service = service_with(Arc::new(EchoBackend::new()));
    let bundle = service
        .generate_project_tiered(GenerateRequest::new(scenario_architecture(), "test"))
        .await
        .unwrap();

    let page = bundle.file("src/pages/Home.tsx").unwrap();
    assert_eq!(page.content, "// generated src/pages/Home.tsx");
}

#[tokio::test]
async fn test_cache_avoids_repeat_backend_calls_across_runs() {
    let backend = Arc::new(EchoBackend::new());
    let service = service_with(backend.clone());
    let arch = scenario_architecture();

    service
        .generate_project_tiered(GenerateRequest::new(arch.clone(), "test"))
        .await
        .unwrap();
    // Only AI-backed specs reach the backend: 6 critical (the stylesheet
    // renders locally) + 2 pages + 3 components
    let first_run_calls = backend.calls.load(Ordering::SeqCst);
    assert_eq!(first_run_calls, 11);

    // Same architecture again: every AI-backed file is served from cache
    service
        .generate_project_tiered(GenerateRequest::new(arch, "test"))
        .await
        .unwrap();
    assert_eq!(backend.calls.load(Ordering::SeqCst), first_run_calls);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Unique paths hold for arbitrary page/component/store name lists,
    /// including colliding and empty names.
    #[test]
    fn prop_bundle_paths_are_unique_for_any_architecture(
        pages in proptest::collection::vec("[a-zA-Z ]{0,12}", 0..8),
        components in proptest::collection::vec("[a-zA-Z ]{0,12}", 0..8),
        stores in proptest::collection::vec("[a-zA-Z ]{0,6}", 0..4),
        managed_auth in any::<bool>(),
    ) {
        let mut arch = Architecture::new("proptest");
        arch.stack.state_management = StateManagement::Zustand;
        arch.auth.provider = if managed_auth {
            AuthProvider::Supabase
        } else {
            AuthProvider::None
        };
        arch.pages = pages.iter().map(Page::new).collect();
        arch.components = components.iter().map(|n| Component::new(n, false)).collect();
        arch.stores = stores.iter().map(DataStore::new).collect();

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let bundle = rt
            .block_on(
                service_with(Arc::new(EchoBackend::new()))
                    .generate_project_tiered(GenerateRequest::new(arch, "prop")),
            )
            .unwrap();

        let paths: HashSet<&str> = bundle.files.iter().map(|f| f.path.as_str()).collect();
        prop_assert_eq!(paths.len(), bundle.files.len());

        for path in STATIC_PATHS {
            prop_assert!(bundle.file(path).is_some());
        }
    }
}
