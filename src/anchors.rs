use crate::dom;
use vandal_core::scroll::{anchor_scroll_top, anchor_target};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Smooth-scroll in-page links, leaving room for the fixed header.
pub fn init(document: &web::Document) {
    for anchor in dom::query_all(document, "a[href^=\"#\"]") {
        let doc = document.clone();
        dom::listen(&anchor, "click", move |ev| {
            ev.prevent_default();
            let Some(current) = ev
                .current_target()
                .and_then(|t| t.dyn_into::<web::Element>().ok())
            else {
                return;
            };
            let href = current.get_attribute("href").unwrap_or_default();
            let Some(selector) = anchor_target(&href) else {
                return;
            };
            if let Some(target) = dom::query(&doc, selector) {
                scroll_to(anchor_scroll_top(
                    target.get_bounding_client_rect().top(),
                    dom::scroll_y(),
                ));
            }
        });
    }
}

fn scroll_to(top: f64) {
    if let Some(window) = web::window() {
        let options = web::ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(web::ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}
