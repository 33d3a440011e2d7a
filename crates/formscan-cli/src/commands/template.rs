//! Template command implementation

use crate::cli::TemplateAction;
use crate::output::OutputWriter;
use crate::output_types::{format_timestamp, DeleteOutput, FieldRow, TemplateRow, ValidateOutput};
use anyhow::{Context, Result};
use formscan_core::config::LayeredConfig;
use formscan_core::models::{NewTemplate, Template};
use formscan_store::TemplateStore;
use std::path::Path;

use super::{parse_id, read_template_file, remote_store};

pub async fn execute(action: TemplateAction, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let server = config.server_url.value.as_str();

    match action {
        TemplateAction::Validate { file } => validate(&file, output),
        TemplateAction::Create { file } => create(&file, server, output).await,
        TemplateAction::List => list(server, output).await,
        TemplateAction::Show { id } => show(&id, server, output).await,
        TemplateAction::Delete { id } => delete(&id, server, output).await,
    }
}

fn validate(file: &Path, output: &OutputWriter) -> Result<()> {
    let template = read_template_file(file)?;

    if output.is_json() {
        return output.result(ValidateOutput {
            file: file.display().to_string(),
            name: template.name,
            language: template.language.to_string(),
            field_count: template.fields.len(),
        });
    }

    output.success(format!(
        "{} is a valid template: '{}' with {} field(s)",
        file.display(),
        template.name,
        template.fields.len()
    ));
    Ok(())
}

async fn create(file: &Path, server: &str, output: &OutputWriter) -> Result<()> {
    let request = NewTemplate::from(read_template_file(file)?);
    let created = remote_store(server).create(request).await.context("Failed to create template")?;

    if output.is_json() {
        return output.result(&created);
    }
    output.success(format!("Created template '{}' ({})", created.name, created.id));
    Ok(())
}

async fn list(server: &str, output: &OutputWriter) -> Result<()> {
    let mut templates = remote_store(server).list().await.context("Failed to list templates")?;
    templates.sort_by(|a, b| a.name.cmp(&b.name));

    if output.is_json() {
        return output.result(&templates);
    }

    output.section("Templates");
    output.table(
        templates
            .iter()
            .map(|t| TemplateRow {
                id: t.id.to_string(),
                name: t.name.clone(),
                language: t.language.to_string(),
                fields: t.fields.len(),
                updated_at: format_timestamp(t.updated_at),
            })
            .collect(),
    );
    Ok(())
}

async fn show(id: &str, server: &str, output: &OutputWriter) -> Result<()> {
    let id = parse_id(id)?;
    let template = remote_store(server)
        .get(id)
        .await
        .with_context(|| format!("Failed to fetch template {}", id))?;

    if output.is_json() {
        return output.result(&template);
    }
    print_template(&template, output);
    Ok(())
}

async fn delete(id: &str, server: &str, output: &OutputWriter) -> Result<()> {
    let id = parse_id(id)?;
    remote_store(server)
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete template {}", id))?;

    if output.is_json() {
        return output.result(DeleteOutput { id: id.to_string(), deleted: true });
    }
    output.success(format!("Deleted template {}", id));
    Ok(())
}

fn print_template(template: &Template, output: &OutputWriter) {
    output.section(&template.name);
    output.kv("ID", template.id);
    output.kv("Language", format!("{} ({})", template.language, template.language.display_name()));
    if let Some(description) = &template.description {
        output.kv("Description", description);
    }
    output.kv("Created", format_timestamp(template.created_at));
    output.kv("Updated", format_timestamp(template.updated_at));

    output.section("Fields");
    output.table(
        template
            .fields
            .iter()
            .map(|f| FieldRow {
                name: f.name.clone(),
                kind: format!("{:?}", f.kind).to_uppercase(),
                x: format!("{:.4}", f.x),
                y: format!("{:.4}", f.y),
                width: format!("{:.4}", f.width),
                height: format!("{:.4}", f.height),
            })
            .collect(),
    );
}
