//! Static scaffold files and the dependency rule table
//!
//! Everything here is derivable from the architecture without an external
//! call. The static set is emitted first by the orchestrator and seeds the
//! produced-path set, so later tiers never regenerate these paths.

use std::collections::BTreeMap;

use serde_json::json;

use crate::architecture::{
    Architecture, AuthProvider, DataFetching, StateManagement, snake_ident,
};
use crate::bundle::FileArtifact;
use crate::generator::content;
use crate::prioritizer::{FileKind, FileSpec, Tier};

/// Fixed install command for generated projects.
pub const INSTALL_COMMAND: &str = "npm install";

/// Fixed start command for generated projects.
pub const START_COMMAND: &str = "npm run dev";

/// Compute the dependency manifest from the architecture's selections.
///
/// Base front-end libraries are always included; each recognized
/// state-management, data-fetching, and auth selection adds its entries.
/// Absent selections contribute nothing.
#[must_use]
pub fn dependency_map(arch: &Architecture) -> BTreeMap<String, String> {
    let mut deps = BTreeMap::new();
    deps.insert("react".to_string(), "^18.2.0".to_string());
    deps.insert("react-dom".to_string(), "^18.2.0".to_string());
    deps.insert("react-router-dom".to_string(), "^6.20.0".to_string());

    match arch.stack.state_management {
        StateManagement::ContextOnly => {}
        StateManagement::Zustand => {
            deps.insert("zustand".to_string(), "^4.4.0".to_string());
        }
        StateManagement::Redux => {
            deps.insert("@reduxjs/toolkit".to_string(), "^2.0.0".to_string());
            deps.insert("react-redux".to_string(), "^9.0.0".to_string());
        }
    }

    match arch.stack.data_fetching {
        DataFetching::None => {}
        DataFetching::ReactQuery => {
            deps.insert("@tanstack/react-query".to_string(), "^5.0.0".to_string());
        }
        DataFetching::Swr => {
            deps.insert("swr".to_string(), "^2.2.0".to_string());
        }
    }

    match arch.auth.provider {
        AuthProvider::None => {}
        AuthProvider::Supabase => {
            deps.insert("@supabase/supabase-js".to_string(), "^2.38.0".to_string());
        }
        AuthProvider::Auth0 => {
            deps.insert("@auth0/auth0-react".to_string(), "^2.2.0".to_string());
        }
        AuthProvider::Firebase => {
            deps.insert("firebase".to_string(), "^10.7.0".to_string());
        }
    }

    deps
}

/// Render the fixed static file set for an architecture.
///
/// Ten files, all pure functions of the architecture: package manifest,
/// build/tool configs, the HTML shell, and the documentation trio that the
/// config tier later dedupes against.
#[must_use]
pub fn static_artifacts(arch: &Architecture) -> Vec<FileArtifact> {
    vec![
        FileArtifact::new("package.json", package_json(arch)),
        FileArtifact::new("index.html", index_html(arch)),
        FileArtifact::new("vite.config.ts", VITE_CONFIG.to_string()),
        FileArtifact::new("tsconfig.json", TSCONFIG.to_string()),
        FileArtifact::new("tsconfig.node.json", TSCONFIG_NODE.to_string()),
        FileArtifact::new("tailwind.config.js", tailwind_config()),
        FileArtifact::new("postcss.config.js", POSTCSS_CONFIG.to_string()),
        FileArtifact::new("README.md", config_tier_content(FileKind::Readme, "README.md", arch)),
        FileArtifact::new(
            ".env.example",
            config_tier_content(FileKind::EnvTemplate, ".env.example", arch),
        ),
        FileArtifact::new(
            ".gitignore",
            config_tier_content(FileKind::IgnoreFile, ".gitignore", arch),
        ),
    ]
}

/// The doc/env/ignore files are shared between the static set and the
/// config tier; rendering through the same strategy keeps them identical
/// wherever they are produced.
fn config_tier_content(kind: FileKind, path: &str, arch: &Architecture) -> String {
    let spec = FileSpec {
        kind,
        target_path: path.to_string(),
        tier: Tier::Config,
        priority: 20,
        metadata: None,
    };
    content::static_content(&spec, arch)
}

fn package_json(arch: &Architecture) -> String {
    let manifest = json!({
        "name": snake_ident(&arch.name).replace('_', "-"),
        "private": true,
        "version": "0.1.0",
        "type": "module",
        "scripts": {
            "dev": "vite",
            "build": "tsc && vite build",
            "preview": "vite preview",
        },
        "dependencies": dependency_map(arch),
        "devDependencies": {
            "@types/react": "^18.2.0",
            "@types/react-dom": "^18.2.0",
            "@vitejs/plugin-react": "^4.2.0",
            "autoprefixer": "^10.4.0",
            "postcss": "^8.4.0",
            "tailwindcss": "^3.4.0",
            "typescript": "^5.3.0",
            "vite": "^5.0.0",
        },
    });

    let mut rendered = serde_json::to_string_pretty(&manifest)
        .unwrap_or_else(|_| "{}".to_string());
    rendered.push('\n');
    rendered
}

fn index_html(arch: &Architecture) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{}</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.tsx"></script>
  </body>
</html>
"#,
        arch.name
    )
}

const VITE_CONFIG: &str = r#"import { defineConfig } from 'vite'
import react from '@vitejs/plugin-react'

export default defineConfig({
  plugins: [react()],
})
"#;

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2020",
    "useDefineForClassFields": true,
    "lib": ["ES2020", "DOM", "DOM.Iterable"],
    "module": "ESNext",
    "skipLibCheck": true,
    "moduleResolution": "bundler",
    "allowImportingTsExtensions": true,
    "resolveJsonModule": true,
    "isolatedModules": true,
    "noEmit": true,
    "jsx": "react-jsx",
    "strict": true
  },
  "include": ["src"],
  "references": [{ "path": "./tsconfig.node.json" }]
}
"#;

const TSCONFIG_NODE: &str = r#"{
  "compilerOptions": {
    "composite": true,
    "skipLibCheck": true,
    "module": "ESNext",
    "moduleResolution": "bundler",
    "allowSyntheticDefaultImports": true
  },
  "include": ["vite.config.ts"]
}
"#;

fn tailwind_config() -> String {
    r#"/** @type {import('tailwindcss').Config} */
export default {
  content: ['./index.html', './src/**/*.{ts,tsx}'],
  theme: {
    extend: {},
  },
  plugins: [],
}
"#
    .to_string()
}

const POSTCSS_CONFIG: &str = r#"export default {
  plugins: {
    tailwindcss: {},
    autoprefixer: {},
  },
}
"#;
