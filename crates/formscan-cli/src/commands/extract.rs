//! Extract command implementation

use crate::cli::ExtractArgs;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use formscan_core::config::LayeredConfig;
use formscan_core::models::OcrResult;
use formscan_extract::{export, ExportFormat, ExtractionMapper, MapperOptions};
use std::fs;
use std::path::{Path, PathBuf};

use super::resolve_template;

pub async fn execute(args: ExtractArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let template = resolve_template(&args.template, &config.server_url.value).await?;

    let content = fs::read_to_string(&args.ocr)
        .with_context(|| format!("Failed to read OCR result {}", args.ocr.display()))?;
    let ocr: OcrResult = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse OCR result {}", args.ocr.display()))?;

    tracing::debug!(
        template = %template.name,
        fields = template.fields.len(),
        pages = ocr.pages.len(),
        parallel = args.parallel,
        "Extracting"
    );

    let mapper = ExtractionMapper::new(MapperOptions::from_config(config).with_page(args.page));
    let result = if args.parallel {
        mapper.map_parallel(&template, &ocr)
    } else {
        mapper.map(&template, &ocr)
    }
    .context("Extraction failed")?;

    if let Some(path) = args.output.as_deref() {
        let path = with_format_extension(path, args.format);
        fs::write(&path, export(&result, args.format)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        for warning in &result.warnings {
            output.warning(warning);
        }
        output.success(format!("Wrote {} fields to {}", result.fields.len(), path.display()));
        return Ok(());
    }

    if output.is_json() {
        return output.result(&result);
    }

    for warning in &result.warnings {
        output.warning(warning);
    }
    output.raw(&export(&result, args.format)?);
    Ok(())
}

fn with_format_extension(path: &Path, format: ExportFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}
