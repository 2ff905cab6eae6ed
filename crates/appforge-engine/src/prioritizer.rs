//! File prioritization: Architecture -> tiered generation manifest
//!
//! A pure, deterministic mapping. The manifest groups planned files into
//! four tiers generated strictly in order; within a tier the architecture's
//! declared order is preserved. Priorities are informational ordering hints
//! only — scheduling is by tier and batch, never by priority.

use serde::{Deserialize, Serialize};

use crate::architecture::{
    Architecture, Component, DataStore, Page, StateManagement, camel_ident, pascal_ident,
};

/// Generation tier, in fixed execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Critical,
    Core,
    Supporting,
    Config,
}

impl Tier {
    /// Fixed execution order: critical, core, supporting, config.
    pub const ORDER: [Self; 4] = [Self::Critical, Self::Core, Self::Supporting, Self::Config];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Core => "core",
            Self::Supporting => "supporting",
            Self::Config => "config",
        }
    }
}

/// Kind of file to generate; selects the generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    EntryPoint,
    Router,
    TypeDefs,
    ApiClient,
    Stylesheet,
    AuthContext,
    StateStore,
    Page,
    Component,
    Hook,
    Utility,
    Readme,
    EnvTemplate,
    IgnoreFile,
    Migration,
}

impl FileKind {
    /// Whether this kind is produced by the generative backend (as opposed
    /// to a pure renderer).
    #[must_use]
    pub fn is_ai_backed(self) -> bool {
        matches!(
            self,
            Self::EntryPoint
                | Self::Router
                | Self::TypeDefs
                | Self::ApiClient
                | Self::AuthContext
                | Self::StateStore
                | Self::Page
                | Self::Component
        )
    }
}

/// Slice of the architecture a FileSpec refers back to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SpecMetadata {
    Page(Page),
    Component(Component),
    Store(DataStore),
    /// Named fixed file within a kind (e.g., the "useAuth" hook)
    Named(String),
}

/// A planned-but-not-yet-generated file descriptor. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSpec {
    pub kind: FileKind,
    pub target_path: String,
    pub tier: Tier,
    pub priority: u32,
    pub metadata: Option<SpecMetadata>,
}

impl FileSpec {
    fn new(kind: FileKind, target_path: impl Into<String>, tier: Tier, priority: u32) -> Self {
        Self {
            kind,
            target_path: target_path.into(),
            tier,
            priority,
            metadata: None,
        }
    }

    fn with_metadata(mut self, metadata: SpecMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Ordered grouping of FileSpecs by tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationManifest {
    pub critical: Vec<FileSpec>,
    pub core: Vec<FileSpec>,
    pub supporting: Vec<FileSpec>,
    pub config: Vec<FileSpec>,
}

impl GenerationManifest {
    /// Specs for one tier, in declared order.
    #[must_use]
    pub fn tier(&self, tier: Tier) -> &[FileSpec] {
        match tier {
            Tier::Critical => &self.critical,
            Tier::Core => &self.core,
            Tier::Supporting => &self.supporting,
            Tier::Config => &self.config,
        }
    }

    /// Total number of planned files across all tiers.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.critical.len() + self.core.len() + self.supporting.len() + self.config.len()
    }

    /// All specs flattened in tier order.
    pub fn iter(&self) -> impl Iterator<Item = &FileSpec> {
        Tier::ORDER.iter().flat_map(|tier| self.tier(*tier).iter())
    }
}

/// Build the tiered manifest for an architecture.
///
/// Critical always holds the five fixed infrastructure files, plus an auth
/// context when a provider is selected, plus one store file per data store
/// unless state management is context-only. Core holds one file per page.
/// Supporting holds one file per component plus the fixed hook/utility set.
/// Config holds the fixed documentation/environment/ignore files plus a
/// migration when the auth provider is a managed schema-backed backend.
#[must_use]
pub fn build_manifest(arch: &Architecture) -> GenerationManifest {
    let mut manifest = GenerationManifest::default();

    manifest.critical.push(FileSpec::new(
        FileKind::EntryPoint,
        "src/main.tsx",
        Tier::Critical,
        100,
    ));
    manifest.critical.push(FileSpec::new(
        FileKind::Router,
        "src/App.tsx",
        Tier::Critical,
        100,
    ));
    manifest.critical.push(FileSpec::new(
        FileKind::TypeDefs,
        "src/types/index.ts",
        Tier::Critical,
        100,
    ));
    manifest.critical.push(FileSpec::new(
        FileKind::ApiClient,
        "src/services/api.ts",
        Tier::Critical,
        100,
    ));
    manifest.critical.push(FileSpec::new(
        FileKind::Stylesheet,
        "src/styles/globals.css",
        Tier::Critical,
        100,
    ));

    if arch.auth.provider.is_enabled() {
        manifest.critical.push(FileSpec::new(
            FileKind::AuthContext,
            "src/context/AuthContext.tsx",
            Tier::Critical,
            90,
        ));
    }

    if arch.stack.state_management != StateManagement::ContextOnly {
        for store in &arch.stores {
            manifest.critical.push(
                FileSpec::new(
                    FileKind::StateStore,
                    format!("src/store/{}Store.ts", camel_ident(&store.name)),
                    Tier::Critical,
                    90,
                )
                .with_metadata(SpecMetadata::Store(store.clone())),
            );
        }
    }

    for page in &arch.pages {
        manifest.core.push(
            FileSpec::new(
                FileKind::Page,
                format!("src/pages/{}.tsx", pascal_ident(&page.name)),
                Tier::Core,
                80,
            )
            .with_metadata(SpecMetadata::Page(page.clone())),
        );
    }

    for component in &arch.components {
        // Atomic components are cheap leaves; the priority split is
        // informational ordering only.
        let priority = if component.atomic { 60 } else { 50 };
        manifest.supporting.push(
            FileSpec::new(
                FileKind::Component,
                format!("src/components/{}.tsx", pascal_ident(&component.name)),
                Tier::Supporting,
                priority,
            )
            .with_metadata(SpecMetadata::Component(component.clone())),
        );
    }

    for hook in ["useAuth", "useFetch"] {
        manifest.supporting.push(
            FileSpec::new(
                FileKind::Hook,
                format!("src/hooks/{hook}.ts"),
                Tier::Supporting,
                40,
            )
            .with_metadata(SpecMetadata::Named(hook.to_string())),
        );
    }

    for utility in ["formatters", "validators"] {
        manifest.supporting.push(
            FileSpec::new(
                FileKind::Utility,
                format!("src/utils/{utility}.ts"),
                Tier::Supporting,
                40,
            )
            .with_metadata(SpecMetadata::Named(utility.to_string())),
        );
    }

    manifest.config.push(FileSpec::new(
        FileKind::Readme,
        "README.md",
        Tier::Config,
        20,
    ));
    manifest.config.push(FileSpec::new(
        FileKind::EnvTemplate,
        ".env.example",
        Tier::Config,
        20,
    ));
    manifest.config.push(FileSpec::new(
        FileKind::IgnoreFile,
        ".gitignore",
        Tier::Config,
        20,
    ));

    if arch.auth.provider.is_managed_backend() {
        manifest.config.push(FileSpec::new(
            FileKind::Migration,
            "supabase/migrations/001_initial_schema.sql",
            Tier::Config,
            20,
        ));
    }

    manifest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::architecture::{AuthProvider, DataFetching};

    fn sample_architecture() -> Architecture {
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

    #[test]
    fn test_manifest_tier_counts_for_sample_scenario() {
        let manifest = build_manifest(&sample_architecture());

        // 5 fixed infra + 1 auth context + 1 store
        assert_eq!(manifest.critical.len(), 7);
        // 2 pages
        assert_eq!(manifest.core.len(), 2);
        // 3 components + 2 hooks + 2 utilities
        assert_eq!(manifest.supporting.len(), 7);
        // 3 fixed doc/env/ignore + 1 migration
        assert_eq!(manifest.config.len(), 4);
        assert_eq!(manifest.total_len(), 20);
    }

    #[test]
    fn test_minimal_architecture_skips_conditional_specs() {
        let manifest = build_manifest(&Architecture::new("bare"));

        assert_eq!(manifest.critical.len(), 5);
        assert!(manifest.core.is_empty());
        // Fixed hooks and utilities are architecture-independent
        assert_eq!(manifest.supporting.len(), 4);
        assert_eq!(manifest.config.len(), 3);
    }

    #[test]
    fn test_context_only_state_produces_no_store_specs() {
        let mut arch = sample_architecture();
        arch.stack.state_management = StateManagement::ContextOnly;
        let manifest = build_manifest(&arch);

        assert!(
            !manifest
                .critical
                .iter()
                .any(|spec| spec.kind == FileKind::StateStore)
        );
        assert_eq!(manifest.critical.len(), 6);
    }

    #[test]
    fn test_non_managed_auth_has_no_migration() {
        let mut arch = sample_architecture();
        arch.auth.provider = AuthProvider::Auth0;
        let manifest = build_manifest(&arch);

        assert!(
            !manifest
                .config
                .iter()
                .any(|spec| spec.kind == FileKind::Migration)
        );
        // Auth context is still generated for any enabled provider
        assert!(
            manifest
                .critical
                .iter()
                .any(|spec| spec.kind == FileKind::AuthContext)
        );
    }

    #[test]
    fn test_declared_order_is_preserved_within_tiers() {
        let manifest = build_manifest(&sample_architecture());

        let pages: Vec<&str> = manifest
            .core
            .iter()
            .map(|spec| spec.target_path.as_str())
            .collect();
        assert_eq!(pages, vec!["src/pages/Home.tsx", "src/pages/Checkout.tsx"]);

        let components: Vec<&str> = manifest
            .supporting
            .iter()
            .filter(|spec| spec.kind == FileKind::Component)
            .map(|spec| spec.target_path.as_str())
            .collect();
        assert_eq!(
            components,
            vec![
                "src/components/Button.tsx",
                "src/components/ProductCard.tsx",
                "src/components/CartDrawer.tsx",
            ]
        );
    }

    #[test]
    fn test_component_priority_differs_by_atomic_flag() {
        let manifest = build_manifest(&sample_architecture());
        let atomic = manifest
            .supporting
            .iter()
            .find(|spec| spec.target_path.ends_with("Button.tsx"))
            .unwrap();
        let complex = manifest
            .supporting
            .iter()
            .find(|spec| spec.target_path.ends_with("ProductCard.tsx"))
            .unwrap();
        assert!(atomic.priority > complex.priority);
    }

    #[test]
    fn test_determinism() {
        let arch = sample_architecture();
        let a = build_manifest(&arch);
        let b = build_manifest(&arch);
        let paths_a: Vec<_> = a.iter().map(|s| s.target_path.clone()).collect();
        let paths_b: Vec<_> = b.iter().map(|s| s.target_path.clone()).collect();
        assert_eq!(paths_a, paths_b);
    }

    #[test]
    fn test_ai_backed_classification() {
        assert!(FileKind::Page.is_ai_backed());
        assert!(FileKind::StateStore.is_ai_backed());
        assert!(!FileKind::Stylesheet.is_ai_backed());
        assert!(!FileKind::Migration.is_ai_backed());
        assert!(!FileKind::Hook.is_ai_backed());
    }
}
