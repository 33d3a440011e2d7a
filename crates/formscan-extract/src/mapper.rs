//! Template-to-OCR mapping.
//!
//! Each field is projected onto the scanned page at its native resolution,
//! clipped to the page, and filled with the text of the region that covers
//! the largest share of it. Regions are ranked in reading order up front so
//! that the first strictly better ratio wins and ties go to the region that
//! reads first.

use formscan_core::config::{LayeredConfig, DEFAULT_MIN_OVERLAP_RATIO};
use formscan_core::error::Result;
use formscan_core::models::{
    ExtractionResult, Field, FieldValues, ImageSize, OcrPage, OcrRegion, OcrResult, Template,
    Warning, WarningKind,
};
use formscan_geo::normalize::relative_to_pixels;
use formscan_geo::spatial::{approx_eq, clamp_to, overlap_ratio, reading_order};
use rayon::prelude::*;

/// Movement below this many pixels does not count as clamping
const CLAMP_TOLERANCE_PX: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapperOptions {
    /// Smallest share of a field a region must cover to be assigned to it
    pub min_overlap_ratio: f64,

    /// Page to read; `None` picks the lowest page number
    pub page: Option<u32>,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self { min_overlap_ratio: DEFAULT_MIN_OVERLAP_RATIO, page: None }
    }
}

impl MapperOptions {
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self { min_overlap_ratio: config.min_overlap_ratio.value, page: None }
    }

    pub fn with_page(mut self, page: Option<u32>) -> Self {
        self.page = page;
        self
    }
}

/// Value and warnings for one field
#[derive(Debug)]
struct FieldOutcome {
    name: String,
    value: String,
    warnings: Vec<Warning>,
}

/// A page with regions, ready to be matched against
struct PreparedPage<'a> {
    size: ImageSize,
    regions: Vec<&'a OcrRegion>,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionMapper {
    options: MapperOptions,
}

impl ExtractionMapper {
    pub fn new(options: MapperOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// Map every field of `template` onto the selected OCR page
    pub fn map(&self, template: &Template, ocr: &OcrResult) -> Result<ExtractionResult> {
        let Some(page) = self.prepare(ocr)? else {
            return Ok(empty_page_result(&template.fields));
        };

        let outcomes = template
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| self.map_field(field, &page).map(|outcome| (index, outcome)))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.assemble(template, outcomes))
    }

    /// Same result as `map`, with fields computed on the rayon pool
    pub fn map_parallel(&self, template: &Template, ocr: &OcrResult) -> Result<ExtractionResult> {
        let Some(page) = self.prepare(ocr)? else {
            return Ok(empty_page_result(&template.fields));
        };

        let outcomes = template
            .fields
            .par_iter()
            .enumerate()
            .map(|(index, field)| self.map_field(field, &page).map(|outcome| (index, outcome)))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.assemble(template, outcomes))
    }

    fn select_page<'a>(&self, ocr: &'a OcrResult) -> Option<&'a OcrPage> {
        match self.options.page {
            Some(number) => ocr.page(number),
            None => ocr.first_page(),
        }
    }

    /// `None` when the page is missing or carries no regions
    fn prepare<'a>(&self, ocr: &'a OcrResult) -> Result<Option<PreparedPage<'a>>> {
        let page = match self.select_page(ocr) {
            Some(page) if !page.regions.is_empty() => page,
            Some(_) => return Ok(None),
            None => {
                tracing::debug!(page = ?self.options.page, pages = ocr.pages.len(), "Requested page not in OCR result");
                return Ok(None);
            }
        };

        let size = page.size();
        size.validate()?;

        let mut regions: Vec<&OcrRegion> = page.regions.iter().collect();
        // Stable, so regions with identical boxes keep their input order
        regions.sort_by(|a, b| reading_order(&a.bbox, &b.bbox));

        Ok(Some(PreparedPage { size, regions }))
    }

    fn map_field(&self, field: &Field, page: &PreparedPage<'_>) -> Result<FieldOutcome> {
        let mut warnings = Vec::new();

        let projected = relative_to_pixels(&field.bounds(), page.size)?;
        let target = clamp_to(&projected, &page.size.bounds());
        if !approx_eq(&projected, &target, CLAMP_TOLERANCE_PX) {
            warnings.push(Warning::for_field(&field.name, WarningKind::Clamped));
        }

        let mut best: Option<(&OcrRegion, f64)> = None;
        for &region in &page.regions {
            let ratio = overlap_ratio(&target, &region.bbox);
            if ratio > best.map_or(0.0, |(_, r)| r) {
                best = Some((region, ratio));
            }
        }

        let value = match best {
            Some((region, ratio)) if ratio >= self.options.min_overlap_ratio => region.text.clone(),
            _ => {
                warnings.push(Warning::for_field(&field.name, WarningKind::NoMatch));
                String::new()
            }
        };

        Ok(FieldOutcome { name: field.name.clone(), value, warnings })
    }

    fn assemble(&self, template: &Template, mut outcomes: Vec<(usize, FieldOutcome)>) -> ExtractionResult {
        outcomes.sort_unstable_by_key(|(index, _)| *index);

        let mut fields = FieldValues::with_capacity(outcomes.len());
        let mut warnings = Vec::new();
        for (_, outcome) in outcomes {
            fields.insert(outcome.name, outcome.value);
            warnings.extend(outcome.warnings);
        }

        let result = ExtractionResult { fields, warnings };
        tracing::debug!(
            template = %template.id,
            fields = result.fields.len(),
            warnings = result.warnings.len(),
            "Mapped template onto OCR page"
        );
        result
    }
}

/// Every field empty, one aggregate warning
fn empty_page_result(fields: &[Field]) -> ExtractionResult {
    let mut values = FieldValues::with_capacity(fields.len());
    for field in fields {
        values.insert(field.name.clone(), String::new());
    }
    ExtractionResult { fields: values, warnings: vec![Warning::empty_page()] }
}
