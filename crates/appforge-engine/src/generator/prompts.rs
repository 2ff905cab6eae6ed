//! Kind-specific context payloads for backend invocations
//!
//! Each AI-backed strategy sends one user message: an instruction naming
//! the file to produce plus the slice of the architecture relevant to that
//! kind, serialized as JSON. The system prompt is shared across kinds.

use serde_json::json;

use crate::architecture::Architecture;
use crate::prioritizer::{FileKind, FileSpec, SpecMetadata};

/// Shared system prompt for all AI-backed strategies.
pub const SYSTEM_PROMPT: &str = "You generate single source files for web application \
scaffolds. Respond with only the raw file contents. Do not wrap the response in Markdown \
code fences and do not add commentary.";

/// Build the user message for one file generation call.
#[must_use]
pub fn context_payload(spec: &FileSpec, arch: &Architecture) -> String {
    let context = match spec.kind {
        FileKind::EntryPoint => json!({
            "project": arch.name,
            "stack": arch.stack,
            "auth_enabled": arch.auth.provider.is_enabled(),
        }),
        FileKind::Router => json!({
            "project": arch.name,
            "pages": arch.pages,
            "auth_enabled": arch.auth.provider.is_enabled(),
        }),
        FileKind::TypeDefs => json!({
            "project": arch.name,
            "database": arch.database,
            "stores": arch.stores,
            "api": arch.api,
        }),
        FileKind::ApiClient => json!({
            "project": arch.name,
            "api": arch.api,
            "data_fetching": arch.stack.data_fetching,
            "performance": arch.performance,
        }),
        FileKind::AuthContext => json!({
            "project": arch.name,
            "auth": arch.auth,
        }),
        FileKind::StateStore => json!({
            "project": arch.name,
            "state_management": arch.stack.state_management,
            "store": metadata_json(spec),
        }),
        FileKind::Page => json!({
            "project": arch.name,
            "page": metadata_json(spec),
            "components": arch.components.iter().map(|c| c.name.clone()).collect::<Vec<_>>(),
            "stack": arch.stack,
        }),
        FileKind::Component => json!({
            "project": arch.name,
            "component": metadata_json(spec),
            "stack": arch.stack,
        }),
        // Static kinds never reach the backend; keep a uniform payload for
        // completeness.
        _ => json!({ "project": arch.name }),
    };

    format!(
        "Generate `{path}` ({kind}) for the project described below.\n\nContext:\n{context}",
        path = spec.target_path,
        kind = kind_label(spec.kind),
        context = serde_json::to_string_pretty(&context).unwrap_or_else(|_| "{}".to_string()),
    )
}

fn metadata_json(spec: &FileSpec) -> serde_json::Value {
    match &spec.metadata {
        Some(SpecMetadata::Page(page)) => json!(page),
        Some(SpecMetadata::Component(component)) => json!(component),
        Some(SpecMetadata::Store(store)) => json!(store),
        Some(SpecMetadata::Named(name)) => json!({ "name": name }),
        None => json!(null),
    }
}

fn kind_label(kind: FileKind) -> &'static str {
    match kind {
        FileKind::EntryPoint => "application entry point",
        FileKind::Router => "top-level router",
        FileKind::TypeDefs => "shared type definitions",
        FileKind::ApiClient => "API client",
        FileKind::Stylesheet => "global stylesheet",
        FileKind::AuthContext => "authentication context",
        FileKind::StateStore => "state store",
        FileKind::Page => "page",
        FileKind::Component => "component",
        FileKind::Hook => "hook",
        FileKind::Utility => "utility module",
        FileKind::Readme => "readme",
        FileKind::EnvTemplate => "environment template",
        FileKind::IgnoreFile => "ignore file",
        FileKind::Migration => "database migration",
    }
}
