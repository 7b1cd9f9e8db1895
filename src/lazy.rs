use crate::dom;
use crate::observer;
use vandal_core::constants::{AMBIENT_VIDEO_SELECTOR, AMBIENT_VISIBLE_RATIO};
use vandal_core::media::{ambient_may_autoplay, lazy_source};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Swap in deferred image sources and run ambient videos only while seen.
pub fn init(document: &web::Document) -> anyhow::Result<()> {
    init_images(document)?;
    init_ambient_videos(document)
}

fn native_lazy_loading() -> bool {
    let Some(window) = web::window() else {
        return false;
    };
    js_sys::Reflect::get(&window, &JsValue::from_str("HTMLImageElement"))
        .and_then(|ctor| js_sys::Reflect::get(&ctor, &JsValue::from_str("prototype")))
        .and_then(|proto| js_sys::Reflect::has(&proto, &JsValue::from_str("loading")))
        .unwrap_or(false)
}

fn swap_source(img: &web::HtmlImageElement) {
    let data_src = img.get_attribute("data-src");
    let current = img.src();
    let next = lazy_source(data_src.as_deref(), &current);
    if next != current {
        img.set_src(next);
    }
}

fn init_images(document: &web::Document) -> anyhow::Result<()> {
    if native_lazy_loading() {
        for el in dom::query_all(document, "img[loading=\"lazy\"]") {
            if let Some(img) = el.dyn_ref::<web::HtmlImageElement>() {
                swap_source(img);
            }
        }
        return Ok(());
    }

    let images = dom::query_all(document, "img");
    if images.is_empty() {
        return Ok(());
    }
    log::info!("[lazy] observing {} images without native lazy loading", images.len());
    observer::observe(&images, 0.0, |entry, observer| {
        if !entry.is_intersecting() {
            return;
        }
        let target = entry.target();
        if let Some(img) = target.dyn_ref::<web::HtmlImageElement>() {
            swap_source(img);
        }
        observer.unobserve(&target);
    })?;
    Ok(())
}

fn init_ambient_videos(document: &web::Document) -> anyhow::Result<()> {
    let videos = dom::query_all(document, AMBIENT_VIDEO_SELECTOR);
    if videos.is_empty() {
        return Ok(());
    }
    observer::observe(&videos, AMBIENT_VISIBLE_RATIO, |entry, _| {
        let Ok(video) = entry.target().dyn_into::<web::HtmlVideoElement>() else {
            return;
        };
        if entry.is_intersecting() {
            play_ambient(&video);
        } else {
            _ = video.pause();
        }
    })?;
    Ok(())
}

/// Start an ambient video if its markup allows muted autoplay. Rejections
/// are expected under strict autoplay policies and ignored.
pub fn play_ambient(video: &web::HtmlVideoElement) {
    if !ambient_may_autoplay(video.has_attribute("autoplay"), video.has_attribute("muted")) {
        return;
    }
    let Ok(promise) = video.play() else {
        return;
    };
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::debug!("[lazy] ambient autoplay blocked: {:?}", e);
        }
    });
}
