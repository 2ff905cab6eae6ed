//! Deterministic content: static strategies and fallback placeholders
//!
//! Static strategies (hooks, utilities, stylesheet, readme, env template,
//! ignore file, migration) are pure functions of the architecture and
//! cannot fail. Placeholders stand in for AI-backed files when no backend
//! is configured; fallbacks are placeholders with an explicit marker,
//! emitted when a backend call fails.

use crate::architecture::{Architecture, AuthProvider, pascal_ident, snake_ident};
use crate::prioritizer::{FileKind, FileSpec, SpecMetadata};

/// Marker prefixed to content substituted after a failed generation call.
pub const FALLBACK_MARKER: &str = "Fallback content: automatic generation failed for this file.";

/// Render a static-strategy file. Pure function of the architecture.
///
/// Only call for non-AI-backed kinds; AI-backed kinds fall back to
/// [`placeholder`] content instead.
#[must_use]
pub fn static_content(spec: &FileSpec, arch: &Architecture) -> String {
    match spec.kind {
        FileKind::Hook => hook(named(spec), arch),
        FileKind::Utility => utility(named(spec)),
        FileKind::Stylesheet => stylesheet(arch),
        FileKind::Readme => readme(arch),
        FileKind::EnvTemplate => env_template(arch),
        FileKind::IgnoreFile => ignore_file(),
        FileKind::Migration => migration(arch),
        _ => placeholder(spec, arch),
    }
}

/// Minimal deterministic placeholder for an AI-backed file.
#[must_use]
pub fn placeholder(spec: &FileSpec, arch: &Architecture) -> String {
    match spec.kind {
        FileKind::EntryPoint => entry_point_placeholder(),
        FileKind::Router => router_placeholder(arch),
        FileKind::TypeDefs => type_defs_placeholder(arch),
        FileKind::ApiClient => api_client_placeholder(arch),
        FileKind::AuthContext => auth_context_placeholder(),
        FileKind::StateStore => state_store_placeholder(spec),
        FileKind::Page => page_placeholder(spec),
        FileKind::Component => component_placeholder(spec),
        _ => static_content(spec, arch),
    }
}

/// Placeholder content carrying the explicit fallback marker.
///
/// Used when a backend call fails; the marker makes degraded files easy to
/// find in the output.
#[must_use]
pub fn fallback(spec: &FileSpec, arch: &Architecture) -> String {
    let body = placeholder(spec, arch);
    match comment_style(&spec.target_path) {
        CommentStyle::Block => format!("/* {FALLBACK_MARKER} */\n{body}"),
        CommentStyle::Dashes => format!("-- {FALLBACK_MARKER}\n{body}"),
        CommentStyle::Hash => format!("# {FALLBACK_MARKER}\n{body}"),
        CommentStyle::Slashes => format!("// {FALLBACK_MARKER}\n{body}"),
    }
}

enum CommentStyle {
    Slashes,
    Block,
    Dashes,
    Hash,
}

fn comment_style(path: &str) -> CommentStyle {
    if path.ends_with(".css") {
        CommentStyle::Block
    } else if path.ends_with(".sql") {
        CommentStyle::Dashes
    } else if path.ends_with(".md") || path.ends_with(".example") || path.ends_with(".gitignore") {
        CommentStyle::Hash
    } else {
        CommentStyle::Slashes
    }
}

fn named(spec: &FileSpec) -> &str {
    match &spec.metadata {
        Some(SpecMetadata::Named(name)) => name,
        _ => "",
    }
}

fn metadata_name(spec: &FileSpec) -> String {
    match &spec.metadata {
        Some(SpecMetadata::Page(page)) => pascal_ident(&page.name),
        Some(SpecMetadata::Component(component)) => pascal_ident(&component.name),
        Some(SpecMetadata::Store(store)) => pascal_ident(&store.name),
        Some(SpecMetadata::Named(name)) => pascal_ident(name),
        None => file_stem(&spec.target_path),
    }
}

fn file_stem(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.split('.').next().unwrap_or(name).to_string()
}

fn entry_point_placeholder() -> String {
    r#"import React from 'react'
import ReactDOM from 'react-dom/client'
import App from './App'
import './styles/globals.css'

ReactDOM.createRoot(document.getElementById('root')!).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>,
)
"#
    .to_string()
}

fn router_placeholder(arch: &Architecture) -> String {
    let mut imports = String::new();
    let mut routes = String::new();
    for page in &arch.pages {
        let name = pascal_ident(&page.name);
        let route = page
            .route
            .clone()
            .unwrap_or_else(|| format!("/{}", crate::architecture::camel_ident(&page.name)));
        imports.push_str(&format!("import {name} from './pages/{name}'\n"));
        routes.push_str(&format!(
            "        <Route path=\"{route}\" element={{<{name} />}} />\n"
        ));
    }

    format!(
        r#"import {{ BrowserRouter, Routes, Route }} from 'react-router-dom'
{imports}
export default function App() {{
  return (
    <BrowserRouter>
      <Routes>
{routes}      </Routes>
    </BrowserRouter>
  )
}}
"#
    )
}

fn type_defs_placeholder(arch: &Architecture) -> String {
    let mut out = String::from("// Shared type definitions\n\n");
    for table in &arch.database.tables {
        out.push_str(&format!("export interface {} {{\n", pascal_ident(&table.name)));
        for column in &table.columns {
            let ts_type = match column.column_type.as_str() {
                "integer" | "bigint" | "numeric" | "float" | "double" => "number",
                "boolean" => "boolean",
                _ => "string",
            };
            let optional = if column.nullable { "?" } else { "" };
            out.push_str(&format!(
                "  {}{optional}: {ts_type}\n",
                crate::architecture::camel_ident(&column.name)
            ));
        }
        out.push_str("}\n\n");
    }
    if arch.database.tables.is_empty() {
        out.push_str("export type Id = string\n");
    }
    out
}

fn api_client_placeholder(arch: &Architecture) -> String {
    let mut out = String::from(
        r#"const BASE_URL = import.meta.env.VITE_API_BASE_URL ?? '/api'

async function request<T>(path: string, init?: RequestInit): Promise<T> {
  const response = await fetch(`${BASE_URL}${path}`, init)
  if (!response.ok) {
    throw new Error(`Request failed: ${response.status}`)
  }
  return response.json() as Promise<T>
}
"#,
    );
    for endpoint in &arch.api {
        out.push_str(&format!(
            "\n// {} {}\n",
            endpoint.method.to_uppercase(),
            endpoint.path
        ));
    }
    out.push_str("\nexport { request }\n");
    out
}

fn auth_context_placeholder() -> String {
    r#"import { createContext, useContext, useState, type ReactNode } from 'react'

interface AuthState {
  user: unknown | null
  signIn: (email: string, password: string) => Promise<void>
  signOut: () => Promise<void>
}

const AuthContext = createContext<AuthState | null>(null)

export function AuthProvider({ children }: { children: ReactNode }) {
  const [user, setUser] = useState<unknown | null>(null)

  const signIn = async (_email: string, _password: string) => {
    setUser(null)
  }

  const signOut = async () => {
    setUser(null)
  }

  return (
    <AuthContext.Provider value={{ user, signIn, signOut }}>
      {children}
    </AuthContext.Provider>
  )
}

export function useAuthContext(): AuthState {
  const ctx = useContext(AuthContext)
  if (!ctx) {
    throw new Error('useAuthContext must be used within AuthProvider')
  }
  return ctx
}
"#
    .to_string()
}

fn state_store_placeholder(spec: &FileSpec) -> String {
    let name = metadata_name(spec);
    format!(
        r#"import {{ create }} from 'zustand'

interface {name}State {{
  items: unknown[]
  reset: () => void
}}

export const use{name}Store = create<{name}State>((set) => ({{
  items: [],
  reset: () => set({{ items: [] }}),
}}))
"#
    )
}

fn page_placeholder(spec: &FileSpec) -> String {
    let name = metadata_name(spec);
    format!(
        r#"export default function {name}() {{
  return (
    <main>
      <h1>{name}</h1>
    </main>
  )
}}
"#
    )
}

fn component_placeholder(spec: &FileSpec) -> String {
    let name = metadata_name(spec);
    format!(
        r#"interface {name}Props {{
  children?: React.ReactNode
}}

export default function {name}({{ children }}: {name}Props) {{
  return <div>{{children}}</div>
}}
"#
    )
}

fn hook(name: &str, arch: &Architecture) -> String {
    match name {
        "useAuth" => {
            let provider = match arch.auth.provider {
                AuthProvider::None => "none",
                AuthProvider::Supabase => "supabase",
                AuthProvider::Auth0 => "auth0",
                AuthProvider::Firebase => "firebase",
            };
            format!(
                r#"import {{ useState, useEffect }} from 'react'

// Auth provider: {provider}
export function useAuth() {{
  const [user, setUser] = useState<unknown | null>(null)
  const [loading, setLoading] = useState(true)

  useEffect(() => {{
    setLoading(false)
  }}, [])

  return {{ user, loading, isAuthenticated: user !== null }}
}}
"#
            )
        }
        _ => r#"import { useState, useEffect } from 'react'

export function useFetch<T>(url: string) {
  const [data, setData] = useState<T | null>(null)
  const [error, setError] = useState<Error | null>(null)
  const [loading, setLoading] = useState(true)

  useEffect(() => {
    let cancelled = false
    fetch(url)
      .then((res) => res.json())
      .then((json) => {
        if (!cancelled) setData(json)
      })
      .catch((err) => {
        if (!cancelled) setError(err)
      })
      .finally(() => {
        if (!cancelled) setLoading(false)
      })
    return () => {
      cancelled = true
    }
  }, [url])

  return { data, error, loading }
}
"#
        .to_string(),
    }
}

fn utility(name: &str) -> String {
    match name {
        "formatters" => r#"export function formatCurrency(value: number, currency = 'USD'): string {
  return new Intl.NumberFormat(undefined, { style: 'currency', currency }).format(value)
}

export function formatDate(value: string | Date): string {
  const date = typeof value === 'string' ? new Date(value) : value
  return new Intl.DateTimeFormat(undefined, { dateStyle: 'medium' }).format(date)
}

export function truncate(text: string, max = 80): string {
  return text.length > max ? `${text.slice(0, max - 1)}…` : text
}
"#
        .to_string(),
        _ => r#"export function isEmail(value: string): boolean {
  return /^[^\s@]+@[^\s@]+\.[^\s@]+$/.test(value)
}

export function isNonEmpty(value: string): boolean {
  return value.trim().length > 0
}

export function clamp(value: number, min: number, max: number): number {
  return Math.min(Math.max(value, min), max)
}
"#
        .to_string(),
    }
}

fn stylesheet(arch: &Architecture) -> String {
    if arch.stack.styling.as_deref() == Some("tailwind") {
        r#"@tailwind base;
@tailwind components;
@tailwind utilities;

:root {
  color-scheme: light dark;
}

body {
  margin: 0;
  font-family: system-ui, sans-serif;
}
"#
        .to_string()
    } else {
        r#"*,
*::before,
*::after {
  box-sizing: border-box;
}

:root {
  color-scheme: light dark;
}

body {
  margin: 0;
  font-family: system-ui, sans-serif;
  line-height: 1.5;
}
"#
        .to_string()
    }
}

fn readme(arch: &Architecture) -> String {
    let mut out = format!("# {}\n\nGenerated project scaffold.\n", arch.name);

    if !arch.pages.is_empty() {
        out.push_str("\n## Pages\n\n");
        for page in &arch.pages {
            out.push_str(&format!("- {}\n", page.name));
        }
    }

    if !arch.components.is_empty() {
        out.push_str("\n## Components\n\n");
        for component in &arch.components {
            out.push_str(&format!("- {}\n", component.name));
        }
    }

    out.push_str("\n## Getting started\n\n```bash\nnpm install\nnpm run dev\n```\n");
    out
}

fn env_template(arch: &Architecture) -> String {
    let mut out = String::from("VITE_API_BASE_URL=http://localhost:3000/api\n");
    match arch.auth.provider {
        AuthProvider::Supabase => {
            out.push_str("VITE_SUPABASE_URL=\nVITE_SUPABASE_ANON_KEY=\n");
        }
        AuthProvider::Auth0 => {
            out.push_str("VITE_AUTH0_DOMAIN=\nVITE_AUTH0_CLIENT_ID=\n");
        }
        AuthProvider::Firebase => {
            out.push_str("VITE_FIREBASE_API_KEY=\nVITE_FIREBASE_PROJECT_ID=\n");
        }
        AuthProvider::None => {}
    }
    out
}

fn ignore_file() -> String {
    r#"node_modules/
dist/
.env
.env.local
*.log
.DS_Store
"#
    .to_string()
}

fn migration(arch: &Architecture) -> String {
    let mut out = String::from("-- Initial schema\n\n");

    for table in &arch.database.tables {
        let table_name = snake_ident(&table.name);
        out.push_str(&format!("create table if not exists {table_name} (\n"));
        let mut lines = Vec::new();
        if !table.columns.iter().any(|c| c.primary_key) {
            lines.push("  id uuid primary key default gen_random_uuid()".to_string());
        }
        for column in &table.columns {
            let mut line = format!("  {} {}", snake_ident(&column.name), column.column_type);
            if column.primary_key {
                line.push_str(" primary key");
            } else if !column.nullable {
                line.push_str(" not null");
            }
            lines.push(line);
        }
        out.push_str(&lines.join(",\n"));
        out.push_str("\n);\n\n");
    }

    for rel in &arch.database.relationships {
        let from = snake_ident(&rel.from);
        let to = snake_ident(&rel.to);
        let column = rel
            .column
            .clone()
            .map(|c| snake_ident(&c))
            .unwrap_or_else(|| format!("{to}_id"));
        out.push_str(&format!(
            "alter table {from} add column if not exists {column} uuid references {to} (id);\n"
        ));
    }

    if arch.database.tables.is_empty() {
        out.push_str("-- No tables declared in the architecture\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::architecture::{Column, DataStore, Page, Table};
    use crate::prioritizer::Tier;

    fn spec(kind: FileKind, path: &str) -> FileSpec {
        FileSpec {
            kind,
            target_path: path.to_string(),
            tier: Tier::Critical,
            priority: 100,
            metadata: None,
        }
    }

    #[test]
    fn test_static_strategies_are_deterministic_and_non_empty() {
        let mut arch = Architecture::new("storefront");
        arch.pages.push(Page::new("Home"));
        arch.auth.provider = AuthProvider::Supabase;

        for (kind, path) in [
            (FileKind::Hook, "src/hooks/useAuth.ts"),
            (FileKind::Utility, "src/utils/formatters.ts"),
            (FileKind::Stylesheet, "src/styles/globals.css"),
            (FileKind::Readme, "README.md"),
            (FileKind::EnvTemplate, ".env.example"),
            (FileKind::IgnoreFile, ".gitignore"),
            (FileKind::Migration, "supabase/migrations/001_initial_schema.sql"),
        ] {
            let s = spec(kind, path);
            let first = static_content(&s, &arch);
            let second = static_content(&s, &arch);
            assert!(!first.is_empty(), "{kind:?} produced empty content");
            assert_eq!(first, second, "{kind:?} is not deterministic");
        }
    }

    #[test]
    fn test_placeholders_are_non_empty_for_all_ai_kinds() {
        let mut arch = Architecture::new("storefront");
        arch.pages.push(Page::new("Home"));

        for (kind, path) in [
            (FileKind::EntryPoint, "src/main.tsx"),
            (FileKind::Router, "src/App.tsx"),
            (FileKind::TypeDefs, "src/types/index.ts"),
            (FileKind::ApiClient, "src/services/api.ts"),
            (FileKind::AuthContext, "src/context/AuthContext.tsx"),
            (FileKind::StateStore, "src/store/cartStore.ts"),
            (FileKind::Page, "src/pages/Home.tsx"),
            (FileKind::Component, "src/components/Button.tsx"),
        ] {
            let content = placeholder(&spec(kind, path), &arch);
            assert!(!content.is_empty(), "{kind:?} placeholder is empty");
        }
    }

    #[test]
    fn test_fallback_is_marked_with_matching_comment_style() {
        let arch = Architecture::new("storefront");

        let tsx = fallback(&spec(FileKind::Page, "src/pages/Home.tsx"), &arch);
        assert!(tsx.starts_with(&format!("// {FALLBACK_MARKER}")));

        let css = fallback(&spec(FileKind::Stylesheet, "src/styles/globals.css"), &arch);
        assert!(css.starts_with(&format!("/* {FALLBACK_MARKER} */")));

        let sql = fallback(
            &spec(FileKind::Migration, "supabase/migrations/001_initial_schema.sql"),
            &arch,
        );
        assert!(sql.starts_with(&format!("-- {FALLBACK_MARKER}")));
    }

    #[test]
    fn test_store_placeholder_uses_store_name() {
        let mut s = spec(FileKind::StateStore, "src/store/cartStore.ts");
        s.metadata = Some(SpecMetadata::Store(DataStore::new("cart")));
        let content = placeholder(&s, &Architecture::new("storefront"));
        assert!(content.contains("useCartStore"));
    }

    #[test]
    fn test_router_placeholder_lists_declared_pages() {
        let mut arch = Architecture::new("storefront");
        arch.pages = vec![Page::new("Home"), Page::new("Checkout")];
        let content = placeholder(&spec(FileKind::Router, "src/App.tsx"), &arch);
        assert!(content.contains("import Home from './pages/Home'"));
        assert!(content.contains("import Checkout from './pages/Checkout'"));
        assert!(content.contains("react-router-dom"));
    }

    #[test]
    fn test_migration_renders_tables_and_relationships() {
        let mut arch = Architecture::new("storefront");
        arch.database.tables = vec![
            Table {
                name: "users".to_string(),
                columns: vec![Column {
                    name: "email".to_string(),
                    column_type: "text".to_string(),
                    nullable: false,
                    primary_key: false,
                }],
            },
            Table {
                name: "orders".to_string(),
                columns: vec![],
            },
        ];
        arch.database.relationships = vec![crate::architecture::Relationship {
            from: "orders".to_string(),
            to: "users".to_string(),
            column: None,
        }];

        let sql = migration(&arch);
        assert!(sql.contains("create table if not exists users"));
        assert!(sql.contains("email text not null"));
        assert!(sql.contains("alter table orders add column if not exists users_id"));
    }

    #[test]
    fn test_env_template_varies_by_provider() {
        let mut arch = Architecture::new("storefront");
        arch.auth.provider = AuthProvider::Supabase;
        assert!(env_template(&arch).contains("VITE_SUPABASE_URL"));

        arch.auth.provider = AuthProvider::Auth0;
        assert!(env_template(&arch).contains("VITE_AUTH0_DOMAIN"));

        arch.auth.provider = AuthProvider::None;
        let content = env_template(&arch);
        assert!(!content.contains("SUPABASE"));
        assert!(content.contains("VITE_API_BASE_URL"));
    }

    #[test]
    fn test_stylesheet_respects_tailwind_selection() {
        let mut arch = Architecture::new("storefront");
        arch.stack.styling = Some("tailwind".to_string());
        assert!(stylesheet(&arch).contains("@tailwind base"));

        arch.stack.styling = None;
        assert!(!stylesheet(&arch).contains("@tailwind"));
    }
}
