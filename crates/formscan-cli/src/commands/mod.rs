//! Command implementations

mod config;
mod extract;
mod template;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use formscan_core::models::{NewTemplate, Template, TemplateId};
use formscan_store::{HttpTemplateStore, TemplateStore};
use std::fs;
use std::path::Path;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Extract(args) => extract::execute(args, &config, &output).await,
        Commands::Template(args) => template::execute(args.action, &config, &output).await,
        Commands::Config => config::execute(&config, &output),
    }
}

/// Template store on the configured server
fn remote_store(server_url: &str) -> HttpTemplateStore {
    tracing::debug!(server = %server_url, "Using remote template store");
    HttpTemplateStore::new(server_url)
}

fn parse_id(raw: &str) -> Result<TemplateId> {
    raw.parse::<TemplateId>().with_context(|| format!("'{}' is not a template ID", raw))
}

/// Read a template file.
///
/// Accepts both a stored template (as returned by the server) and a bare
/// creation request; either way every field is validated.
fn read_template_file(path: &Path) -> Result<Template> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read template file {}", path.display()))?;

    if let Ok(template) = serde_json::from_str::<Template>(&content) {
        let (id, created_at, updated_at) = (template.id, template.created_at, template.updated_at);
        return Template::from_new(template.into(), id, created_at)
            .map(|validated| Template { updated_at, ..validated })
            .with_context(|| format!("Invalid template in {}", path.display()));
    }

    let request: NewTemplate = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse template file {}", path.display()))?;
    Template::from_new(request, TemplateId::new(), chrono::Utc::now())
        .with_context(|| format!("Invalid template in {}", path.display()))
}

/// Resolve `--template`: an existing file wins, otherwise it must be a stored template ID
async fn resolve_template(reference: &str, server_url: &str) -> Result<Template> {
    let path = Path::new(reference);
    if path.is_file() {
        return read_template_file(path);
    }

    let id = parse_id(reference)
        .with_context(|| format!("No template file named '{}' either", reference))?;
    remote_store(server_url)
        .get(id)
        .await
        .with_context(|| format!("Failed to fetch template {}", id))
}
