//! Declarative project architecture consumed by the pipeline
//!
//! The architecture is the caller-supplied description of the project to
//! generate: tech-stack selections, pages, components, data stores, auth,
//! database schema, and API surface. It is deserialized once per request
//! and treated as read-only everywhere downstream.

use serde::{Deserialize, Serialize};

/// Immutable project description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Architecture {
    /// Project name; also the generated package name
    pub name: String,
    #[serde(default)]
    pub stack: TechStack,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub stores: Vec<DataStore>,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseSchema,
    #[serde(default)]
    pub api: Vec<ApiEndpoint>,
    #[serde(default)]
    pub performance: PerformancePrefs,
}

impl Architecture {
    /// Create an architecture with the given name and defaults elsewhere.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stack: TechStack::default(),
            pages: Vec::new(),
            components: Vec::new(),
            stores: Vec::new(),
            auth: AuthConfig::default(),
            database: DatabaseSchema::default(),
            api: Vec::new(),
            performance: PerformancePrefs::default(),
        }
    }
}

/// Tech-stack selections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechStack {
    #[serde(default)]
    pub state_management: StateManagement,
    #[serde(default)]
    pub data_fetching: DataFetching,
    /// Styling approach, informational (e.g., "tailwind")
    pub styling: Option<String>,
}

/// State-management approach. `ContextOnly` is the simplest option and
/// produces no store files and no extra dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateManagement {
    #[default]
    ContextOnly,
    Zustand,
    Redux,
}

/// Data-fetching/caching strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataFetching {
    #[default]
    None,
    ReactQuery,
    Swr,
}

/// Authentication provider selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthProvider {
    #[default]
    None,
    Supabase,
    Auth0,
    Firebase,
}

impl AuthProvider {
    /// Whether any provider is selected.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self != Self::None
    }

    /// Whether the provider implies a managed, schema-backed backend that
    /// needs a database migration file.
    #[must_use]
    pub fn is_managed_backend(self) -> bool {
        self == Self::Supabase
    }
}

/// A page in the generated application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    /// Route path; derived from the name when absent
    pub route: Option<String>,
    pub description: Option<String>,
}

impl Page {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route: None,
            description: None,
        }
    }
}

/// A UI component, flagged atomic (presentational leaf) or complex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(default)]
    pub atomic: bool,
    pub description: Option<String>,
}

impl Component {
    #[must_use]
    pub fn new(name: impl Into<String>, atomic: bool) -> Self {
        Self {
            name: name.into(),
            atomic,
            description: None,
        }
    }
}

/// A client-side data store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataStore {
    pub name: String,
    pub description: Option<String>,
}

impl DataStore {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// Authentication settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub provider: AuthProvider,
    /// Enabled flows (e.g., "password", "oauth", "magic-link")
    #[serde(default)]
    pub flows: Vec<String>,
    /// Where tokens are kept client-side (e.g., "local-storage", "cookie")
    pub token_storage: Option<String>,
}

/// Database schema description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSchema {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// A database table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// A table column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
}

/// A foreign-key relationship between tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Referencing table
    pub from: String,
    /// Referenced table
    pub to: String,
    /// Column on the referencing table; `<to>_id` when absent
    pub column: Option<String>,
}

/// One API endpoint consumed by the generated client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEndpoint {
    pub method: String,
    pub path: String,
    pub description: Option<String>,
}

/// Performance and caching preferences, informational for generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformancePrefs {
    #[serde(default)]
    pub caching: bool,
    #[serde(default)]
    pub lazy_loading: bool,
}

/// Turn a display name into a PascalCase identifier usable in a path
/// (`"user profile" -> "UserProfile"`).
#[must_use]
pub fn pascal_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if upper_next {
                out.extend(ch.to_uppercase());
                upper_next = false;
            } else {
                out.push(ch);
            }
        } else {
            upper_next = true;
        }
    }
    out
}

/// Turn a display name into a camelCase identifier
/// (`"user profile" -> "userProfile"`).
#[must_use]
pub fn camel_ident(name: &str) -> String {
    let pascal = pascal_ident(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => pascal,
    }
}

/// Turn a display name into a snake_case identifier for SQL
/// (`"Order Items" -> "order_items"`).
#[must_use]
pub fn snake_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() && prev_lower {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower = ch.is_lowercase() || ch.is_numeric();
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
            prev_lower = false;
        }
    }
    out.trim_end_matches('_').to_string()
}
