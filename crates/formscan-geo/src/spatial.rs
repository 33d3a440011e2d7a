use formscan_core::models::PixelBox;
use std::cmp::Ordering;

/// Intersection of two boxes, if they overlap with positive area
pub fn intersection(a: &PixelBox, b: &PixelBox) -> Option<PixelBox> {
    let left = a.x.max(b.x);
    let top = a.y.max(b.y);
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());

    if right <= left || bottom <= top {
        return None;
    }

    Some(PixelBox::new(left, top, right - left, bottom - top))
}

/// Area shared by two boxes, zero when they only touch or are disjoint
pub fn intersection_area(a: &PixelBox, b: &PixelBox) -> f64 {
    intersection(a, b).map(|i| i.area()).unwrap_or(0.0)
}

/// Fraction of `target` covered by `other`.
///
/// Returns zero for a degenerate target so it never matches anything.
pub fn overlap_ratio(target: &PixelBox, other: &PixelBox) -> f64 {
    let area = target.area();
    if area <= 0.0 {
        return 0.0;
    }
    intersection_area(target, other) / area
}

/// Clip a box to `bounds`. A box entirely outside collapses to zero size
/// on the nearest edge.
pub fn clamp_to(bbox: &PixelBox, bounds: &PixelBox) -> PixelBox {
    let left = bbox.x.clamp(bounds.x, bounds.right());
    let top = bbox.y.clamp(bounds.y, bounds.bottom());
    let right = bbox.right().clamp(bounds.x, bounds.right());
    let bottom = bbox.bottom().clamp(bounds.y, bounds.bottom());

    PixelBox::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
}

/// True when every coordinate of `a` is within `tolerance` of `b`
pub fn approx_eq(a: &PixelBox, b: &PixelBox, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance
        && (a.y - b.y).abs() <= tolerance
        && (a.width - b.width).abs() <= tolerance
        && (a.height - b.height).abs() <= tolerance
}

/// Reading order: top to bottom, then left to right
pub fn reading_order(a: &PixelBox, b: &PixelBox) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x))
}
