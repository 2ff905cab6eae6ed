//! CLI argument definitions and dispatch
//!
//! `run()` parses arguments, loads configuration, creates the tokio
//! runtime, and drives the chosen generation operation. It handles all
//! error output itself; `main.rs` only maps the returned code to a process
//! exit.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Component, Path, PathBuf};

use appforge_config::Config;
use appforge_engine::{Architecture, ProjectBundle};
use appforge_utils::error::{AppForgeError, exit_codes};
use appforge_utils::logging;

use crate::service::{GenerateRequest, ProjectService};

/// appforge - tiered project scaffold generation
#[derive(Parser)]
#[command(name = "appforge")]
#[command(about = "Generate a deployable project scaffold from a declarative architecture")]
#[command(long_about = r#"
appforge turns a declarative architecture document (pages, components, data
stores, auth, database schema) into a complete project scaffold. Interesting
files are produced by a generative backend in prioritized, bounded batches;
everything else is rendered deterministically. When the backend is missing
or a call fails, clearly marked fallback content is substituted so a run
always terminates with a usable output.

EXAMPLES:
  # Generate a project from an architecture document
  appforge generate --architecture storefront.json --out ./storefront

  # Legacy single-pass generation, capped to a few dynamic files
  appforge generate --architecture storefront.json --out ./storefront --basic

CONFIGURATION:
  Configuration is TOML; pass an explicit path with --config. Every value
  has a default, so the flag is optional. The [llm.anthropic] section
  selects the backend model and API key environment variable.
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a project from an architecture document
    Generate {
        /// Path to the architecture JSON document
        #[arg(long)]
        architecture: PathBuf,

        /// Directory the generated files are written into
        #[arg(long, default_value = "generated")]
        out: PathBuf,

        /// Use the legacy single-pass basic operation
        #[arg(long)]
        basic: bool,
    },
}

/// Main CLI execution function.
///
/// Returns `Err(exit_code)` after printing the error; on success all
/// output has already been written.
pub fn run() -> Result<(), i32> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(err) => {
                let err = AppForgeError::from(err);
                eprintln!("✗ {err}");
                return Err(err.to_exit_code());
            }
        },
        None => Config::default(),
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("✗ Failed to create async runtime: {e}");
            return Err(exit_codes::FAILURE);
        }
    };

    match cli.command {
        Commands::Generate {
            architecture,
            out,
            basic,
        } => rt.block_on(generate(config, &architecture, &out, basic)),
    }
}

async fn generate(
    config: Config,
    architecture_path: &Path,
    out: &Path,
    basic: bool,
) -> Result<(), i32> {
    let arch = match load_architecture(architecture_path) {
        Ok(arch) => arch,
        Err(err) => {
            eprintln!("✗ {err}");
            return Err(err.to_exit_code());
        }
    };

    let service = ProjectService::from_config(config);
    let request = GenerateRequest::new(arch, "cli");

    let result = if basic {
        service.generate_project_basic(request).await
    } else {
        service.generate_project_tiered(request).await
    };

    let bundle = match result {
        Ok(bundle) => bundle,
        Err(err) => {
            let err = AppForgeError::from(err);
            eprintln!("✗ {err}");
            return Err(err.to_exit_code());
        }
    };

    if let Err(e) = write_bundle(&bundle, out) {
        eprintln!("✗ Failed to write output: {e:#}");
        return Err(exit_codes::FAILURE);
    }

    print_summary(&bundle, out);
    Ok(())
}

fn load_architecture(path: &Path) -> Result<Architecture, AppForgeError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| AppForgeError::InvalidArchitecture(format!("{}: {e}", path.display())))
}

/// Write every artifact under `out`, creating parent directories.
///
/// Artifact paths are bundle-relative; absolute paths or paths containing
/// `..` are rejected rather than written outside the output directory.
fn write_bundle(bundle: &ProjectBundle, out: &Path) -> anyhow::Result<()> {
    for file in &bundle.files {
        let relative = Path::new(&file.path);
        let traversal = relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if traversal {
            anyhow::bail!("artifact path escapes the output directory: {}", file.path);
        }

        let target = out.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&target, &file.content)
            .with_context(|| format!("writing {}", target.display()))?;
    }

    // Machine-readable run record alongside the artifacts: everything in
    // the bundle except the file contents themselves.
    let manifest = serde_json::json!({
        "name": bundle.name,
        "files": bundle.files.iter().map(|f| f.path.as_str()).collect::<Vec<_>>(),
        "dependencies": bundle.dependencies,
        "install_command": bundle.install_command,
        "start_command": bundle.start_command,
        "generation_log": bundle.generation_log,
        "generated_at": bundle.generated_at,
    });
    let manifest_path = out.join("appforge.manifest.json");
    std::fs::write(
        &manifest_path,
        format!("{}\n", serde_json::to_string_pretty(&manifest)?),
    )
    .with_context(|| format!("writing {}", manifest_path.display()))?;

    Ok(())
}

fn print_summary(bundle: &ProjectBundle, out: &Path) {
    println!("✓ Generated {} ({} files)", bundle.name, bundle.files.len());
    for entry in &bundle.generation_log {
        println!(
            "  {} batch {}: {} files ({})",
            entry.phase, entry.batch, entry.count, entry.status
        );
    }
    println!("  Output: {}", out.display());
    println!("  Install: {}", bundle.install_command);
    println!("  Start:   {}", bundle.start_command);
}
