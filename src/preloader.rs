use crate::dom;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use vandal_core::constants::{
    CLASS_LOADED, PRELOADER_BAR_ID, PRELOADER_ID, PRELOADER_PERCENTAGE_ID, PRELOAD_FALLBACK_MS,
    PRELOAD_HOLD_FULL_MS, PRELOAD_REMOVE_AFTER_MS,
};
use vandal_core::preload::{percent_label, LoadProgress, Priority, PreloadQueue};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Preloader {
    document: web::Document,
    root: web::Element,
    bar: Option<web::Element>,
    label: Option<web::Element>,
    progress: LoadProgress,
    started: Instant,
}

impl Preloader {
    fn show(&self, percentage: u32) {
        let text = percent_label(percentage);
        if let Some(bar) = &self.bar {
            dom::set_style(bar, "width", &text);
        }
        if let Some(label) = &self.label {
            label.set_text_content(Some(text.as_str()));
        }
    }
}

/// Start the preloader. Runs before the DOM is complete; a page without
/// `#preloader` is left untouched.
pub fn init(document: &web::Document) {
    let Some(root) = document.get_element_by_id(PRELOADER_ID) else {
        return;
    };
    let state = Rc::new(RefCell::new(Preloader {
        document: document.clone(),
        root,
        bar: document.get_element_by_id(PRELOADER_BAR_ID),
        label: document.get_element_by_id(PRELOADER_PERCENTAGE_ID),
        progress: LoadProgress::new(0),
        started: Instant::now(),
    }));
    dom::set_body_overflow(document, "hidden");

    let doc = document.clone();
    dom::when_dom_ready(document, move || {
        let queue = collect_images(&doc);
        load_all(&state, &queue);
    });
}

fn collect_images(document: &web::Document) -> PreloadQueue {
    let mut queue = PreloadQueue::with_critical();
    for img in dom::query_all(document, "img[src]") {
        if let Some(src) = img.get_attribute("src") {
            queue.push(&src, Priority::Normal);
        }
    }
    for video in dom::query_all(document, "video[poster]") {
        if let Some(poster) = video.get_attribute("poster") {
            queue.push(&poster, Priority::Normal);
        }
    }
    queue
}

fn load_all(state: &Rc<RefCell<Preloader>>, queue: &PreloadQueue) {
    state.borrow_mut().progress = LoadProgress::new(queue.len());
    if queue.is_empty() {
        complete(state);
        return;
    }
    log::info!("[preloader] loading {} images", queue.len());

    for item in queue.items() {
        let image = match web::HtmlImageElement::new() {
            Ok(i) => i,
            Err(e) => {
                log::warn!("[preloader] Image() failed for {}: {:?}", item.src, e);
                on_settled(state);
                continue;
            }
        };
        let s = state.clone();
        // Errors count as progress too.
        let settled = Closure::wrap(Box::new(move || on_settled(&s)) as Box<dyn FnMut()>);
        image.set_onload(Some(settled.as_ref().unchecked_ref()));
        image.set_onerror(Some(settled.as_ref().unchecked_ref()));
        settled.forget();
        image.set_src(&item.src);
    }

    let s = state.clone();
    dom::set_timeout(PRELOAD_FALLBACK_MS, move || {
        if !s.borrow().progress.is_finished() {
            log::info!("[preloader] fallback timeout reached");
            complete(&s);
        }
    });
}

fn on_settled(state: &Rc<RefCell<Preloader>>) {
    let done = {
        let mut p = state.borrow_mut();
        let done = p.progress.record();
        let pct = p.progress.percentage();
        p.show(pct);
        done
    };
    if done {
        complete(state);
    }
}

fn complete(state: &Rc<RefCell<Preloader>>) {
    {
        let mut p = state.borrow_mut();
        if !p.progress.finish() {
            return;
        }
        p.show(100);
        log::info!(
            "[preloader] {}/{} images in {} ms",
            p.progress.loaded(),
            p.progress.total(),
            p.started.elapsed().as_millis()
        );
    }

    let s = state.clone();
    dom::set_timeout(PRELOAD_HOLD_FULL_MS, move || {
        let p = s.borrow();
        dom::add_class(&p.root, CLASS_LOADED);
        dom::set_body_overflow(&p.document, "");
        let root = p.root.clone();
        dom::set_timeout(PRELOAD_REMOVE_AFTER_MS, move || root.remove());
    });
}
