//! End-to-end mapping tests over realistic OCR payloads
//!
//! Templates and OCR results are parsed from JSON the way the API and CLI
//! receive them.

use formscan_core::models::{
    Field, Language, NewTemplate, OcrPage, OcrRegion, OcrResult, PixelBox, RelativeBox, Template,
    TemplateId, WarningKind,
};
use formscan_extract::{ExtractionMapper, MapperOptions};
use proptest::prelude::*;

fn persisted(fields: Vec<Field>) -> Template {
    Template::from_new(
        NewTemplate::new("Energy bill", Language::Por, fields),
        TemplateId::new(),
        chrono::Utc::now(),
    )
    .unwrap()
}

#[test]
fn test_single_region_fills_invoice_total() {
    let template = persisted(vec![Field::new(
        "invoice_total",
        RelativeBox::new(0.70, 0.05, 0.20, 0.05),
    )]);

    // Projected box is (700, 70, 200, 70); the region covers 190x70 of it
    let ocr: OcrResult = serde_json::from_str(
        r#"{
            "pages": [{
                "page_number": 1,
                "width": 1000,
                "height": 1400,
                "text": "FATURA ... €120,50",
                "regions": [
                    {"text": "FATURA", "bbox": {"x": 60, "y": 40, "width": 300, "height": 60}},
                    {"text": "€120,50", "bbox": {"x": 705, "y": 68, "width": 190, "height": 74}, "confidence": 0.97}
                ]
            }],
            "filename": "bill.png",
            "content_type": "image/png",
            "duration_ms": 812,
            "num_pages": 1,
            "warnings": []
        }"#,
    )
    .unwrap();

    let result = ExtractionMapper::default().map(&template, &ocr).unwrap();
    assert_eq!(result.value("invoice_total"), Some("€120,50"));
    assert!(result.warnings.is_empty(), "unexpected warnings: {:?}", result.warnings);
}

#[test]
fn test_page_without_regions_yields_one_aggregate_warning() {
    let template = persisted(vec![
        Field::new("invoice_total", RelativeBox::new(0.70, 0.05, 0.20, 0.05)),
        Field::new("due_date", RelativeBox::new(0.70, 0.12, 0.20, 0.05)),
        Field::new("customer", RelativeBox::new(0.05, 0.20, 0.40, 0.05)),
    ]);

    let ocr: OcrResult = serde_json::from_str(
        r#"{"pages": [{"page_number": 1, "width": 1000, "height": 1400, "text": "", "regions": []}]}"#,
    )
    .unwrap();

    for result in [
        ExtractionMapper::default().map(&template, &ocr).unwrap(),
        ExtractionMapper::default().map_parallel(&template, &ocr).unwrap(),
    ] {
        let values: Vec<_> =
            result.fields.iter().map(|(n, v)| (n.as_str(), v.as_str())).collect();
        assert_eq!(values, vec![("invoice_total", ""), ("due_date", ""), ("customer", "")]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::EmptyPage);
        assert_eq!(result.warnings[0].field, None);
    }
}

#[test]
fn test_template_applies_at_a_different_resolution() {
    let template = persisted(vec![Field::new(
        "invoice_total",
        RelativeBox::new(0.70, 0.05, 0.20, 0.05),
    )]);

    // Scanned at twice the reference resolution
    let ocr = OcrResult::new(vec![OcrPage::new(1, 2000.0, 2800.0).with_regions(vec![
        OcrRegion::new("€120,50", PixelBox::new(1410.0, 140.0, 380.0, 140.0)),
    ])]);

    let result = ExtractionMapper::default().map(&template, &ocr).unwrap();
    assert_eq!(result.value("invoice_total"), Some("€120,50"));
}

#[test]
fn test_warnings_follow_template_order() {
    let template = persisted(vec![
        Field::new("b_missing", RelativeBox::new(0.0, 0.5, 0.1, 0.1)),
        Field::new("a_found", RelativeBox::new(0.0, 0.0, 0.1, 0.1)),
        Field::new("c_missing", RelativeBox::new(0.5, 0.5, 0.1, 0.1)),
    ]);
    let ocr = OcrResult::new(vec![OcrPage::new(1, 1000.0, 1000.0)
        .with_regions(vec![OcrRegion::new("hit", PixelBox::new(0.0, 0.0, 100.0, 100.0))])]);

    let result = ExtractionMapper::default().map(&template, &ocr).unwrap();
    let names: Vec<_> = result.fields.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["b_missing", "a_found", "c_missing"]);

    let warned: Vec<_> = result.warnings.iter().filter_map(|w| w.field.as_deref()).collect();
    assert_eq!(warned, vec!["b_missing", "c_missing"]);
    assert!(result.warnings.iter().all(|w| w.kind == WarningKind::NoMatch));
}

fn arb_field(index: usize) -> impl Strategy<Value = Field> {
    (0.0f64..0.9, 0.0f64..0.9).prop_flat_map(move |(x, y)| {
        (Just(x), Just(y), 0.01f64..=(1.0 - x), 0.01f64..=(1.0 - y)).prop_map(move |(x, y, w, h)| {
            Field::new(format!("field_{}", index), RelativeBox::new(x, y, w, h))
        })
    })
}

fn arb_fields() -> impl Strategy<Value = Vec<Field>> {
    (1usize..12).prop_flat_map(|n| (0..n).map(arb_field).collect::<Vec<_>>())
}

fn arb_regions() -> impl Strategy<Value = Vec<OcrRegion>> {
    // Coarse grid so equal ratios and identical boxes actually occur
    prop::collection::vec(
        (0u32..10, 0u32..10, 1u32..5, 1u32..5, "[a-z]{1,6}"),
        0..30,
    )
    .prop_map(|cells| {
        cells
            .into_iter()
            .map(|(x, y, w, h, text)| {
                OcrRegion::new(
                    text,
                    PixelBox::new(
                        f64::from(x) * 100.0,
                        f64::from(y) * 100.0,
                        f64::from(w) * 100.0,
                        f64::from(h) * 100.0,
                    ),
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn mapping_is_deterministic_and_parallel_agrees(
        fields in arb_fields(),
        regions in arb_regions(),
        ratio in 0.05f64..=1.0,
    ) {
        let template = persisted(fields);
        let ocr = OcrResult::new(vec![OcrPage::new(1, 1000.0, 1000.0).with_regions(regions)]);
        let mapper = ExtractionMapper::new(MapperOptions { min_overlap_ratio: ratio, page: None });

        let first = mapper.map(&template, &ocr).unwrap();
        let second = mapper.map(&template, &ocr).unwrap();
        let parallel = mapper.map_parallel(&template, &ocr).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &parallel);
        prop_assert_eq!(first.fields.len(), template.fields.len());
    }
}
