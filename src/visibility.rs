use crate::dom;
use crate::gallery::SharedCoordinator;
use crate::lazy::play_ambient;
use vandal_core::constants::AMBIENT_VIDEO_SELECTOR;
use vandal_core::media::is_in_viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

fn ambient_videos(document: &web::Document) -> Vec<web::HtmlVideoElement> {
    dom::query_all(document, AMBIENT_VIDEO_SELECTOR)
        .into_iter()
        .filter_map(|el| el.dyn_into::<web::HtmlVideoElement>().ok())
        .collect()
}

/// Pause all video while the tab is hidden. On return only on-screen
/// ambient videos resume; gallery videos wait for the user.
pub fn init(document: &web::Document, gallery: Option<SharedCoordinator>) {
    let doc = document.clone();
    dom::listen(document, "visibilitychange", move |_| {
        let videos = ambient_videos(&doc);
        if doc.hidden() {
            for video in &videos {
                _ = video.pause();
            }
            if let Some(gallery) = &gallery {
                gallery.borrow_mut().pause_all();
            }
            log::debug!("[visibility] page hidden, videos paused");
            return;
        }
        let viewport = dom::viewport_height();
        for video in &videos {
            let rect = video.get_bounding_client_rect();
            if is_in_viewport(rect.top(), rect.bottom(), viewport) {
                play_ambient(video);
            }
        }
    });
}
