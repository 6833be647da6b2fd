// zapgen/src/cli/generate.rs
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use tracing::{debug, error, warn};
use zapgen_common::config::Config;
use zapgen_common::error::{Result, ZapgenError};
use zapgen_common::model::CaskRecord;
use zapgen_core::{extract, render, script_filename};
use zapgen_net::fetch_cask_record;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Generate for a single application by name
    #[arg(long, conflicts_with_all = ["files", "json"])]
    pub app: Option<String>,

    /// Generate for explicit catalog files instead of scanning the apps directory
    #[arg(long, num_args = 1.., conflicts_with = "json")]
    pub files: Vec<PathBuf>,

    /// Generate from one literal cask record passed as JSON, without fetching
    #[arg(long)]
    pub json: Option<String>,

    /// Directory the scripts are written into
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Directory holding the local application catalog
    #[arg(long)]
    pub apps_dir: Option<PathBuf>,
}

/// What happened to one application during a batch run.
enum Outcome {
    Generated(PathBuf),
    Skipped,
}

impl GenerateArgs {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let mut config = config.clone();
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dir) = &self.apps_dir {
            config.apps_dir = dir.clone();
        }

        fs::create_dir_all(config.output_dir()).map_err(|e| {
            ZapgenError::IoError(format!(
                "Failed to create output directory {}: {}",
                config.output_dir().display(),
                e
            ))
        })?;

        let mut generated = 0usize;
        let mut skipped = 0usize;
        let mut errors: Vec<(String, ZapgenError)> = Vec::new();

        if let Some(literal) = &self.json {
            let label = "<literal json>".to_string();
            match process_literal(literal, config.output_dir()) {
                Ok(outcome) => tally(&label, outcome, &mut generated, &mut skipped),
                Err(e) => {
                    error!("✖ Failed to process literal record: {}", e);
                    errors.push((label, e));
                }
            }
        } else if let Some(app) = &self.app {
            match process_app(app, &config).await {
                Ok(outcome) => tally(app, outcome, &mut generated, &mut skipped),
                Err(e) => {
                    error!("✖ Failed to process '{}': {}", app.cyan(), e);
                    errors.push((app.clone(), e));
                }
            }
        } else {
            let files = if self.files.is_empty() {
                catalog_files(config.apps_dir())?
            } else {
                self.files.clone()
            };
            println!(
                "Generating uninstall scripts for {} application(s)...",
                files.len()
            );
            for file in &files {
                let label = file.display().to_string();
                match process_catalog_file(file, &config).await {
                    Ok(outcome) => tally(&label, outcome, &mut generated, &mut skipped),
                    Err(e) => {
                        error!("✖ Failed to process {}: {}", label.cyan(), e);
                        errors.push((label, e));
                    }
                }
            }
        }

        println!(
            "\nGenerated {} script(s) in '{}', skipped {}, {} error(s)",
            generated.to_string().green(),
            config.output_dir().display(),
            skipped,
            errors.len()
        );

        if errors.is_empty() {
            Ok(())
        } else {
            for (label, e) in &errors {
                eprintln!("- {}: {}", label.cyan(), e.to_string().red());
            }
            Err(ZapgenError::Generic(
                "Script generation failed for one or more applications.".to_string(),
            ))
        }
    }
}

fn tally(label: &str, outcome: Outcome, generated: &mut usize, skipped: &mut usize) {
    match outcome {
        Outcome::Generated(path) => {
            println!("✓ {} -> {}", label.green(), path.display());
            *generated += 1;
        }
        Outcome::Skipped => {
            println!("- {} (no removal actions, skipped)", label.yellow());
            *skipped += 1;
        }
    }
}

/// Read a local catalog record, then fetch the cask data its name points at.
/// The catalog name, not the remote one, titles the script.
async fn process_catalog_file(path: &Path, config: &Config) -> Result<Outcome> {
    let local = read_catalog_record(path)?;
    let app_name = require_name(&local)?;
    process_app(&app_name, config).await
}

async fn process_app(app_name: &str, config: &Config) -> Result<Outcome> {
    let record = fetch_cask_record(app_name, config).await?;
    generate_script(app_name, &record, config.output_dir())
}

fn process_literal(literal: &str, output_dir: &Path) -> Result<Outcome> {
    let record: CaskRecord = serde_json::from_str(literal)?;
    let app_name = require_name(&record)?;
    generate_script(&app_name, &record, output_dir)
}

fn generate_script(app_name: &str, record: &CaskRecord, output_dir: &Path) -> Result<Outcome> {
    let actions = extract(record);
    if actions.is_empty() {
        warn!("No removal actions found for '{}'", app_name);
        return Ok(Outcome::Skipped);
    }
    debug!(
        "Rendering {} removal action(s) for '{}'",
        actions.len(),
        app_name
    );

    let script = render(app_name, &actions);
    let path = output_dir.join(script_filename(app_name));
    write_executable(&path, &script)?;
    Ok(Outcome::Generated(path))
}

pub(crate) fn read_catalog_record(path: &Path) -> Result<CaskRecord> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ZapgenError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&contents)?)
}

pub(crate) fn require_name(record: &CaskRecord) -> Result<String> {
    let name = record.display_name();
    if name.is_empty() {
        return Err(ZapgenError::Generic(
            "Record carries no application name".to_string(),
        ));
    }
    Ok(name)
}

/// Every `*.json` in the catalog directory, in stable order.
fn catalog_files(apps_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(apps_dir).map_err(|e| {
        ZapgenError::IoError(format!(
            "Failed to read apps directory {}: {}",
            apps_dir.display(),
            e
        ))
    })?;
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

/// Scripts are regenerated and overwritten on every run; no diffing, no
/// versioning. The file must end up executable.
fn write_executable(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| {
        ZapgenError::IoError(format!("Failed to write {}: {}", path.display(), e))
    })?;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}
