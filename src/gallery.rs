use crate::dom;
use crate::observer;
use std::cell::RefCell;
use std::rc::Rc;
use vandal_core::constants::{CLASS_HIDDEN, GALLERY_VIDEO_SELECTOR, GALLERY_VISIBLE_RATIO};
use vandal_core::media::crosses_threshold;
use vandal_core::roles::{standalone_roles, VideoRole};
use vandal_core::{
    GalleryMedia, PlayAttempt, PlayOutcome, PlayRejection, Step, VideoCoordinator, VideoId,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// A gallery `<video>` plus the button that starts it with sound, if any.
pub struct WebVideo {
    pub video: web::HtmlVideoElement,
    pub control: Option<web::Element>,
}

impl GalleryMedia for WebVideo {
    fn paused(&self) -> bool {
        self.video.paused()
    }

    fn muted(&self) -> bool {
        self.video.muted()
    }

    fn set_muted(&self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn pause(&self) {
        _ = self.video.pause();
    }

    fn set_control_visible(&self, visible: bool) {
        if let Some(control) = &self.control {
            dom::set_class(control, CLASS_HIDDEN, !visible);
        }
    }
}

pub type SharedCoordinator = Rc<RefCell<VideoCoordinator<WebVideo>>>;

/// Wire exclusive playback for every `.gallery-video`, plus the featured and
/// main videos when they sit outside the group. Returns `None` when the page
/// has no gallery.
pub fn init(document: &web::Document) -> anyhow::Result<Option<SharedCoordinator>> {
    let videos: Vec<web::HtmlVideoElement> = dom::query_all(document, GALLERY_VIDEO_SELECTOR)
        .into_iter()
        .filter_map(|el| el.dyn_into::<web::HtmlVideoElement>().ok())
        .collect();
    if videos.is_empty() {
        return Ok(None);
    }

    let coordinator: SharedCoordinator = Rc::new(RefCell::new(VideoCoordinator::new()));
    let group_ids: Vec<String> = videos.iter().map(|v| v.id()).collect();
    for video in videos {
        let role = VideoRole::for_element_id(&video.id());
        let control = role
            .control_id()
            .and_then(|id| document.get_element_by_id(id));
        wire_video(&coordinator, role, video, control)?;
    }

    for role in standalone_roles(&group_ids) {
        let video = role
            .element_id()
            .and_then(|id| document.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<web::HtmlVideoElement>().ok());
        let control = role
            .control_id()
            .and_then(|id| document.get_element_by_id(id));
        // Without its button the video has nothing to coordinate.
        if let (Some(video), Some(control)) = (video, control) {
            log::info!("[gallery] tracking {:?} video outside the group", role);
            wire_video(&coordinator, role, video, Some(control))?;
        }
    }
    log::info!("[gallery] tracking {} videos", coordinator.borrow().len());
    Ok(Some(coordinator))
}

fn wire_video(
    coordinator: &SharedCoordinator,
    role: VideoRole,
    video: web::HtmlVideoElement,
    control: Option<web::Element>,
) -> anyhow::Result<()> {
    let id = coordinator.borrow_mut().track(WebVideo {
        video: video.clone(),
        control: control.clone(),
    });
    wire_media_events(coordinator, id, &video);

    let Some(control) = control else {
        return Ok(());
    };
    wire_sound_control(coordinator, id, &control, role.touch_control());
    if role.autoplays_on_view() {
        wire_section_visibility(coordinator, id, &video)?;
        log::info!("[gallery] main video {} autoplays on view", id.index());
    }
    Ok(())
}

fn wire_media_events(coordinator: &SharedCoordinator, id: VideoId, video: &web::HtmlVideoElement) {
    let c = coordinator.clone();
    dom::listen(video, "play", move |_| c.borrow_mut().on_media_play(id));
    let c = coordinator.clone();
    dom::listen(video, "pause", move |_| c.borrow_mut().on_media_pause(id));
    let c = coordinator.clone();
    dom::listen(video, "ended", move |_| c.borrow_mut().on_media_ended(id));
}

// The main video's button also reacts to touchend so mobile taps count as
// the gesture before the synthetic click.
fn wire_sound_control(
    coordinator: &SharedCoordinator,
    id: VideoId,
    control: &web::Element,
    with_touch: bool,
) {
    let c = coordinator.clone();
    let on_activate = move |ev: web::Event| {
        if with_touch {
            ev.prevent_default();
            ev.stop_propagation();
        }
        let attempt = c.borrow_mut().on_user_activates_sound_control(id);
        run_attempt(&c, attempt);
    };
    if with_touch {
        dom::listen(control, "click", on_activate.clone());
        dom::listen_active(control, "touchend", on_activate);
    } else {
        dom::listen(control, "click", on_activate);
    }
}

fn wire_section_visibility(
    coordinator: &SharedCoordinator,
    id: VideoId,
    video: &web::HtmlVideoElement,
) -> anyhow::Result<()> {
    let c = coordinator.clone();
    let target: web::Element = video.clone().into();
    observer::observe(&[target], GALLERY_VISIBLE_RATIO, move |entry, _| {
        let visible = entry.is_intersecting()
            && crosses_threshold(entry.intersection_ratio(), GALLERY_VISIBLE_RATIO);
        if visible {
            let attempt = c.borrow_mut().on_section_visible(id);
            run_attempt(&c, attempt);
        } else {
            c.borrow_mut().on_section_hidden(id);
        }
    })?;
    Ok(())
}

/// Drive an attempt to settlement, following muted retries.
fn run_attempt(coordinator: &SharedCoordinator, attempt: Option<PlayAttempt>) {
    let Some(mut attempt) = attempt else {
        return;
    };
    let coordinator = coordinator.clone();
    spawn_local(async move {
        loop {
            let video = coordinator
                .borrow()
                .media(attempt.video)
                .map(|m| m.video.clone());
            let Some(video) = video else {
                return;
            };
            let outcome = play(&video).await;
            let step = coordinator.borrow_mut().resolve(attempt, outcome);
            match step {
                Step::Retry(next) => attempt = next,
                Step::Settled(settlement) => {
                    log::debug!(
                        "[gallery] video {} settled: {:?}",
                        attempt.video.index(),
                        settlement
                    );
                    return;
                }
            }
        }
    });
}

async fn play(video: &web::HtmlVideoElement) -> PlayOutcome {
    let promise = match video.play() {
        Ok(p) => p,
        Err(e) => return PlayOutcome::Rejected(rejection(&e)),
    };
    match JsFuture::from(promise).await {
        Ok(_) => PlayOutcome::Started,
        Err(e) => PlayOutcome::Rejected(rejection(&e)),
    }
}

fn rejection(err: &JsValue) -> PlayRejection {
    match err.dyn_ref::<web::DomException>() {
        Some(ex) => PlayRejection::from_dom_name(&ex.name(), &ex.message()),
        None => PlayRejection::Other(format!("{:?}", err)),
    }
}
