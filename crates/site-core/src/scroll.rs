use crate::constants::{HEADER_OFFSET_PX, STAGGER_STEP_SEC};

/// Target id selector for an in-page anchor; `None` for a bare `#`.
pub fn anchor_target(href: &str) -> Option<&str> {
    match href {
        "" | "#" => None,
        h if h.starts_with('#') => Some(h),
        _ => None,
    }
}

/// Scroll offset that lands `element_top` (viewport-relative) just below the
/// fixed header.
#[inline]
pub fn anchor_scroll_top(element_top: f64, scroll_y: f64) -> f64 {
    element_top + scroll_y - HEADER_OFFSET_PX
}

/// `transition-delay` value for the `index`-th child of a staggered grid.
pub fn stagger_delay(index: usize) -> String {
    let secs = index as f64 * STAGGER_STEP_SEC;
    let text = format!("{:.2}", secs);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{}s", text)
}
