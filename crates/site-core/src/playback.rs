//! Exclusive playback coordination for gallery videos.
//!
//! The coordinator owns one state record per tracked video and never starts
//! playback itself: starting media is asynchronous in the browser, so every
//! start is described by a [`PlayAttempt`] that the front-end executes and
//! reports back through [`VideoCoordinator::resolve`]. The muted fallback is
//! an explicit [`Step::Retry`] instead of a nested continuation.

use thiserror::Error;

/// Operations the coordinator needs from a tracked media element.
///
/// Implementations hold a reference to an element owned elsewhere (the DOM
/// on the web). `set_control_visible` is a no-op for videos without a manual
/// sound control.
pub trait GalleryMedia {
    fn paused(&self) -> bool;
    fn muted(&self) -> bool;
    fn set_muted(&self, muted: bool);
    fn pause(&self);
    fn set_control_visible(&self, visible: bool);
}

/// Handle issued by [`VideoCoordinator::track`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VideoId(usize);

impl VideoId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Unmuted,
    Muted,
}

impl Sound {
    pub fn is_muted(self) -> bool {
        matches!(self, Sound::Muted)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOrigin {
    /// Section came into view and the user has not unmuted this video yet.
    AutoStart,
    /// Section came into view after the user unmuted this video.
    GrantedAutoStart,
    /// The user pressed the video's sound control.
    SoundControl,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayAttempt {
    pub video: VideoId,
    pub sound: Sound,
    pub origin: PlayOrigin,
    generation: u64,
}

/// Why the browser refused to start playback.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlayRejection {
    #[error("playback not allowed without a user gesture")]
    NotAllowed,
    #[error("playback interrupted by pause or source change")]
    Aborted,
    #[error("media source not supported")]
    NotSupported,
    #[error("playback failed: {0}")]
    Other(String),
}

impl PlayRejection {
    /// Classify a rejected `play()` promise by its `DOMException` name.
    pub fn from_dom_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => PlayRejection::NotAllowed,
            "AbortError" => PlayRejection::Aborted,
            "NotSupportedError" => PlayRejection::NotSupported,
            _ if message.is_empty() => PlayRejection::Other(name.to_string()),
            _ => PlayRejection::Other(format!("{name}: {message}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    Rejected(PlayRejection),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    PlayingWithSound,
    PlayingMuted,
    /// Left paused with the manual control visible.
    Paused,
    /// The attempt was overtaken (section hidden, another video requested,
    /// or a newer attempt on the same video) and its outcome was dropped.
    Superseded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Retry(PlayAttempt),
    Settled(Settlement),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub has_user_unmuted: bool,
}

struct Tracked<M> {
    media: M,
    state: PlaybackState,
    control_visible: bool,
    generation: u64,
    in_flight: Option<u64>,
}

impl<M: GalleryMedia> Tracked<M> {
    fn set_control(&mut self, visible: bool) {
        self.control_visible = visible;
        self.media.set_control_visible(visible);
    }

    // Invalidate any pending attempt so its outcome is ignored.
    fn supersede(&mut self) {
        self.generation += 1;
        self.in_flight = None;
    }

    fn stop(&mut self) {
        if !self.media.paused() {
            self.media.pause();
        }
        self.state.is_playing = false;
    }
}

pub struct VideoCoordinator<M> {
    videos: Vec<Tracked<M>>,
}

impl<M: GalleryMedia> Default for VideoCoordinator<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: GalleryMedia> VideoCoordinator<M> {
    pub fn new() -> Self {
        Self { videos: Vec::new() }
    }

    pub fn track(&mut self, media: M) -> VideoId {
        let id = VideoId(self.videos.len());
        self.videos.push(Tracked {
            media,
            state: PlaybackState::default(),
            control_visible: false,
            generation: 0,
            in_flight: None,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = VideoId> {
        (0..self.videos.len()).map(VideoId)
    }

    pub fn media(&self, video: VideoId) -> Option<&M> {
        self.videos.get(video.0).map(|t| &t.media)
    }

    pub fn state(&self, video: VideoId) -> Option<PlaybackState> {
        self.videos.get(video.0).map(|t| t.state)
    }

    pub fn control_visible(&self, video: VideoId) -> bool {
        self.videos
            .get(video.0)
            .map(|t| t.control_visible)
            .unwrap_or(false)
    }

    /// The video currently flagged as playing, if any.
    pub fn playing(&self) -> Option<VideoId> {
        self.videos
            .iter()
            .position(|t| t.state.is_playing)
            .map(VideoId)
    }

    /// Pause every other tracked video that is not already paused.
    ///
    /// Pending attempts on the other videos are superseded so a late start
    /// cannot break the single-player invariant.
    pub fn on_play_requested(&mut self, video: VideoId) {
        for (i, t) in self.videos.iter_mut().enumerate() {
            if i == video.0 {
                continue;
            }
            if t.in_flight.is_some() {
                t.supersede();
            }
            if !t.media.paused() {
                log::debug!("[gallery] pausing video {} for video {}", i, video.0);
            }
            t.stop();
        }
    }

    /// The video's section crossed the visibility threshold.
    ///
    /// Returns the first attempt to run, or `None` when the video is already
    /// playing or starting.
    pub fn on_section_visible(&mut self, video: VideoId) -> Option<PlayAttempt> {
        let t = self.videos.get(video.0)?;
        if t.state.is_playing || t.in_flight.is_some() {
            return None;
        }
        let origin = if t.state.has_user_unmuted {
            PlayOrigin::GrantedAutoStart
        } else {
            PlayOrigin::AutoStart
        };
        self.on_play_requested(video);
        self.begin(video, Sound::Unmuted, origin)
    }

    pub fn on_section_hidden(&mut self, video: VideoId) {
        if let Some(t) = self.videos.get_mut(video.0) {
            t.supersede();
            t.stop();
        }
    }

    /// The user pressed the sound control: a permanent sound grant for this
    /// video only.
    pub fn on_user_activates_sound_control(&mut self, video: VideoId) -> Option<PlayAttempt> {
        let t = self.videos.get_mut(video.0)?;
        t.state.has_user_unmuted = true;
        self.on_play_requested(video);
        self.begin(video, Sound::Unmuted, PlayOrigin::SoundControl)
    }

    /// The element fired `play`, from native controls or a started attempt.
    pub fn on_media_play(&mut self, video: VideoId) {
        if video.0 >= self.videos.len() {
            return;
        }
        self.on_play_requested(video);
        let t = &mut self.videos[video.0];
        t.state.is_playing = true;
        if !t.media.muted() {
            t.set_control(false);
        }
    }

    pub fn on_media_pause(&mut self, video: VideoId) {
        if let Some(t) = self.videos.get_mut(video.0) {
            t.state.is_playing = false;
        }
    }

    pub fn on_media_ended(&mut self, video: VideoId) {
        if let Some(t) = self.videos.get_mut(video.0) {
            t.state.is_playing = false;
            t.set_control(true);
        }
    }

    /// Pause everything, e.g. when the page is hidden. Nothing is resumed
    /// automatically afterwards.
    pub fn pause_all(&mut self) {
        for t in &mut self.videos {
            t.supersede();
            t.stop();
        }
    }

    /// Feed the outcome of a `play()` call back in.
    pub fn resolve(&mut self, attempt: PlayAttempt, outcome: PlayOutcome) -> Step {
        let video = attempt.video;
        let Some(t) = self.videos.get_mut(video.0) else {
            return Step::Settled(Settlement::Superseded);
        };

        if t.generation != attempt.generation {
            // A start that nobody wants anymore must not keep playing.
            if outcome == PlayOutcome::Started && t.in_flight.is_none() {
                t.stop();
            }
            log::debug!("[gallery] dropping stale outcome for video {}", video.0);
            return Step::Settled(Settlement::Superseded);
        }
        t.in_flight = None;

        match outcome {
            PlayOutcome::Started => {
                self.on_play_requested(video);
                let t = &mut self.videos[video.0];
                t.state.is_playing = true;
                match attempt.sound {
                    Sound::Unmuted => {
                        t.set_control(false);
                        Step::Settled(Settlement::PlayingWithSound)
                    }
                    Sound::Muted => {
                        t.set_control(true);
                        Step::Settled(Settlement::PlayingMuted)
                    }
                }
            }
            PlayOutcome::Rejected(reason) => {
                log::info!(
                    "[gallery] video {} {:?} start rejected ({:?}): {}",
                    video.0,
                    attempt.sound,
                    attempt.origin,
                    reason
                );
                let retry_muted = attempt.origin == PlayOrigin::AutoStart
                    && attempt.sound == Sound::Unmuted
                    && reason != PlayRejection::Aborted;
                if retry_muted {
                    return match self.begin(video, Sound::Muted, PlayOrigin::AutoStart) {
                        Some(next) => Step::Retry(next),
                        None => Step::Settled(Settlement::Superseded),
                    };
                }

                if attempt.origin == PlayOrigin::SoundControl && !t.media.paused() {
                    // Already running muted: the gesture is enough to unmute.
                    t.media.set_muted(false);
                    t.state.is_playing = true;
                    t.set_control(false);
                    return Step::Settled(Settlement::PlayingWithSound);
                }

                t.state.is_playing = false;
                t.set_control(true);
                Step::Settled(Settlement::Paused)
            }
        }
    }

    fn begin(&mut self, video: VideoId, sound: Sound, origin: PlayOrigin) -> Option<PlayAttempt> {
        let t = self.videos.get_mut(video.0)?;
        t.generation += 1;
        t.in_flight = Some(t.generation);
        t.media.set_muted(sound.is_muted());
        Some(PlayAttempt {
            video,
            sound,
            origin,
            generation: t.generation,
        })
    }
}
