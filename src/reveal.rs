use crate::dom;
use crate::observer;
use vandal_core::constants::{
    CLASS_ANIMATE, CLASS_VISIBLE, REVEAL_SELECTOR, REVEAL_VISIBLE_RATIO, STAGGER_GRID_SELECTOR,
};
use vandal_core::scroll::stagger_delay;
use web_sys as web;

/// Fade content blocks in as they scroll into view and stagger grid items.
pub fn init(document: &web::Document) -> anyhow::Result<()> {
    let targets = dom::query_all(document, REVEAL_SELECTOR);
    for el in &targets {
        dom::add_class(el, CLASS_ANIMATE);
    }
    if !targets.is_empty() {
        observer::observe(&targets, REVEAL_VISIBLE_RATIO, |entry, _| {
            if entry.is_intersecting() {
                dom::add_class(&entry.target(), CLASS_VISIBLE);
            }
        })?;
    }

    for grid in dom::query_all(document, STAGGER_GRID_SELECTOR) {
        let children = grid.children();
        for i in 0..children.length() {
            if let Some(child) = children.item(i) {
                dom::set_style(&child, "transition-delay", &stagger_delay(i as usize));
            }
        }
    }
    Ok(())
}
