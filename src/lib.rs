#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use web_sys as web;

mod anchors;
mod dom;
mod gallery;
mod lazy;
mod nav;
mod observer;
mod preloader;
mod reveal;
mod visibility;

// A missing or broken feature must not take the rest of the page with it.
fn run_feature(name: &str, result: anyhow::Result<()>) {
    if let Err(e) = result {
        log::warn!("[{}] init skipped: {:?}", name, e);
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("vandal-web starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;

    // The preloader covers the page while it parses, so it starts first.
    preloader::init(&document);

    let doc = document.clone();
    dom::when_dom_ready(&document, move || init(&doc));
    Ok(())
}

fn init(document: &web::Document) {
    nav::init(document);
    nav::init_scroll_effects(document);
    run_feature("reveal", reveal::init(document));
    anchors::init(document);
    run_feature("lazy", lazy::init(document));

    let gallery = match gallery::init(document) {
        Ok(g) => g,
        Err(e) => {
            log::warn!("[gallery] init skipped: {:?}", e);
            None
        }
    };
    visibility::init(document, gallery);
    log::info!("vandal-web ready");
}

/// Reservation form check, exported for the page's form script.
#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email(email: &str) -> bool {
    vandal_core::validate::validate_email(email)
}

#[wasm_bindgen(js_name = validatePhone)]
pub fn validate_phone(phone: &str) -> bool {
    vandal_core::validate::validate_phone(phone)
}
