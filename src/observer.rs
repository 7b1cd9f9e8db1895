use anyhow::anyhow;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Observe `targets` with a single threshold and hand every entry to
/// `on_entry`. The observer is returned so callers may unobserve.
pub fn observe<F>(
    targets: &[web::Element],
    threshold: f64,
    mut on_entry: F,
) -> anyhow::Result<web::IntersectionObserver>
where
    F: FnMut(&web::IntersectionObserverEntry, &web::IntersectionObserver) + 'static,
{
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() {
                    on_entry(&entry, &observer);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let init = web::IntersectionObserverInit::new();
    init.set_root_margin("0px");
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| anyhow!("IntersectionObserver: {:?}", e))?;
    callback.forget();

    for target in targets {
        observer.observe(target);
    }
    Ok(observer)
}
