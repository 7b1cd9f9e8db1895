// Rules for ambient (non-gallery) videos.

/// Ambient videos only play on their own when the markup opted into muted
/// autoplay.
#[inline]
pub fn ambient_may_autoplay(has_autoplay: bool, has_muted: bool) -> bool {
    has_autoplay && has_muted
}

/// Any part of a `[top, bottom)` box inside a viewport of `viewport_height`.
#[inline]
pub fn is_in_viewport(top: f64, bottom: f64, viewport_height: f64) -> bool {
    top < viewport_height && bottom > 0.0
}

/// Source to assign to a lazy image: its `data-src` when non-empty.
pub fn lazy_source<'a>(data_src: Option<&'a str>, current: &'a str) -> &'a str {
    match data_src {
        Some(s) if !s.is_empty() => s,
        _ => current,
    }
}

/// An intersection callback counts as "visible" once the ratio reaches the
/// observer's threshold.
#[inline]
pub fn crosses_threshold(ratio: f64, threshold: f64) -> bool {
    ratio >= threshold
}
