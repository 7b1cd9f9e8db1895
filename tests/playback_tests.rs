// Host-side tests for gallery playback coordination.
// The web crate is wasm-only, so these drive the core coordinator with fake
// media elements and a scripted autoplay policy.

use std::cell::Cell;
use std::rc::Rc;
use vandal_core::*;

#[derive(Default)]
struct FakeState {
    paused: Cell<bool>,
    muted: Cell<bool>,
    control_visible: Cell<bool>,
    pause_calls: Cell<u32>,
}

#[derive(Clone)]
struct FakeVideo(Rc<FakeState>);

impl FakeVideo {
    fn new() -> Self {
        let state = FakeState::default();
        state.paused.set(true);
        Self(Rc::new(state))
    }

    // What the browser does when playback actually begins.
    fn start(&self) {
        self.0.paused.set(false);
    }

    fn is_paused(&self) -> bool {
        self.0.paused.get()
    }

    fn is_muted(&self) -> bool {
        self.0.muted.get()
    }

    fn control_shown(&self) -> bool {
        self.0.control_visible.get()
    }
}

impl GalleryMedia for FakeVideo {
    fn paused(&self) -> bool {
        self.0.paused.get()
    }

    fn muted(&self) -> bool {
        self.0.muted.get()
    }

    fn set_muted(&self, muted: bool) {
        self.0.muted.set(muted);
    }

    fn pause(&self) {
        self.0.paused.set(true);
        self.0.pause_calls.set(self.0.pause_calls.get() + 1);
    }

    fn set_control_visible(&self, visible: bool) {
        self.0.control_visible.set(visible);
    }
}

/// Autoplay policy of the simulated browser.
#[derive(Clone, Copy)]
struct Browser {
    allow_sound: bool,
    allow_muted: bool,
}

const PERMISSIVE: Browser = Browser {
    allow_sound: true,
    allow_muted: true,
};
const MUTED_ONLY: Browser = Browser {
    allow_sound: false,
    allow_muted: true,
};
const BLOCK_ALL: Browser = Browser {
    allow_sound: false,
    allow_muted: false,
};

impl Browser {
    fn play(&self, video: &FakeVideo, attempt: &PlayAttempt) -> PlayOutcome {
        // The coordinator writes `muted` before handing the attempt over.
        assert_eq!(video.is_muted(), attempt.sound.is_muted());
        let allowed = match attempt.sound {
            Sound::Unmuted => self.allow_sound,
            Sound::Muted => self.allow_muted,
        };
        if allowed {
            video.start();
            PlayOutcome::Started
        } else {
            PlayOutcome::Rejected(PlayRejection::NotAllowed)
        }
    }
}

fn drive(
    coord: &mut VideoCoordinator<FakeVideo>,
    attempt: Option<PlayAttempt>,
    browser: Browser,
) -> Option<Settlement> {
    let mut attempt = attempt?;
    let mut retries = 0;
    loop {
        let video = coord.media(attempt.video).cloned()?;
        let outcome = browser.play(&video, &attempt);
        match coord.resolve(attempt, outcome) {
            Step::Retry(next) => {
                retries += 1;
                assert!(retries <= 1, "more than one fallback attempt");
                attempt = next;
            }
            Step::Settled(s) => return Some(s),
        }
    }
}

fn gallery(n: usize) -> (VideoCoordinator<FakeVideo>, Vec<FakeVideo>, Vec<VideoId>) {
    let mut coord = VideoCoordinator::new();
    let videos: Vec<FakeVideo> = (0..n).map(|_| FakeVideo::new()).collect();
    let ids = videos.iter().map(|v| coord.track(v.clone())).collect();
    (coord, videos, ids)
}

fn playing_count(videos: &[FakeVideo]) -> usize {
    videos.iter().filter(|v| !v.is_paused()).count()
}

#[test]
fn play_request_pauses_every_other_video() {
    let (mut coord, videos, ids) = gallery(3);
    for v in &videos {
        v.start();
    }
    coord.on_play_requested(ids[1]);
    assert!(videos[0].is_paused());
    assert!(!videos[1].is_paused());
    assert!(videos[2].is_paused());
}

#[test]
fn play_request_leaves_already_paused_videos_alone() {
    let (mut coord, videos, ids) = gallery(2);
    coord.on_play_requested(ids[0]);
    assert_eq!(videos[1].0.pause_calls.get(), 0);
}

#[test]
fn native_play_on_b_pauses_a() {
    let (mut coord, videos, ids) = gallery(2);
    let (a, b) = (ids[0], ids[1]);

    videos[0].start();
    coord.on_media_play(a);
    assert_eq!(coord.playing(), Some(a));

    videos[1].start();
    coord.on_media_play(b);
    assert!(videos[0].is_paused());
    assert!(!videos[1].is_paused());
    assert_eq!(coord.playing(), Some(b));
    assert!(!coord.state(a).unwrap().is_playing);
}

#[test]
fn visible_then_hidden_leaves_video_paused() {
    let (mut coord, videos, ids) = gallery(1);
    let attempt = coord.on_section_visible(ids[0]).expect("attempt");
    coord.on_section_hidden(ids[0]);
    assert!(videos[0].is_paused());

    // The browser may still report the start afterwards.
    videos[0].start();
    let step = coord.resolve(attempt, PlayOutcome::Started);
    assert_eq!(step, Step::Settled(Settlement::Superseded));
    assert!(videos[0].is_paused());
    assert!(!coord.state(ids[0]).unwrap().is_playing);
}

#[test]
fn hidden_after_playing_pauses() {
    let (mut coord, videos, ids) = gallery(1);
    let attempt = coord.on_section_visible(ids[0]);
    assert_eq!(
        drive(&mut coord, attempt, PERMISSIVE),
        Some(Settlement::PlayingWithSound)
    );
    coord.on_section_hidden(ids[0]);
    assert!(videos[0].is_paused());
    assert_eq!(coord.playing(), None);
}

#[test]
fn sound_rejected_falls_back_to_muted_playback_with_control() {
    let (mut coord, videos, ids) = gallery(1);
    let attempt = coord.on_section_visible(ids[0]).expect("attempt");
    assert_eq!(attempt.sound, Sound::Unmuted);
    assert_eq!(attempt.origin, PlayOrigin::AutoStart);

    let settled = drive(&mut coord, Some(attempt), MUTED_ONLY);
    assert_eq!(settled, Some(Settlement::PlayingMuted));
    assert!(!videos[0].is_paused());
    assert!(videos[0].is_muted());
    assert!(videos[0].control_shown());
    assert!(coord.control_visible(ids[0]));
    assert!(coord.state(ids[0]).unwrap().is_playing);
}

#[test]
fn all_rejections_leave_video_paused_with_control() {
    let (mut coord, videos, ids) = gallery(1);
    let attempt = coord.on_section_visible(ids[0]);
    let settled = drive(&mut coord, attempt, BLOCK_ALL);
    assert_eq!(settled, Some(Settlement::Paused));
    assert!(videos[0].is_paused());
    assert!(videos[0].control_shown());
    assert!(!coord.state(ids[0]).unwrap().is_playing);
}

#[test]
fn rejected_sound_never_ends_unmuted_and_stalled() {
    for browser in [MUTED_ONLY, BLOCK_ALL] {
        let (mut coord, videos, ids) = gallery(1);
        let attempt = coord.on_section_visible(ids[0]);
        drive(&mut coord, attempt, browser);
        let v = &videos[0];
        let muted_and_playing = v.is_muted() && !v.is_paused();
        let paused_with_control = v.is_paused() && v.control_shown();
        assert!(muted_and_playing || paused_with_control);
    }
}

#[test]
fn aborted_start_is_not_retried_muted() {
    let (mut coord, videos, ids) = gallery(1);
    let attempt = coord.on_section_visible(ids[0]).expect("attempt");
    let step = coord.resolve(attempt, PlayOutcome::Rejected(PlayRejection::Aborted));
    assert_eq!(step, Step::Settled(Settlement::Paused));
    assert!(videos[0].control_shown());
}

#[test]
fn sound_control_grant_makes_later_autostarts_unmuted_first() {
    let (mut coord, videos, ids) = gallery(2);
    let a = ids[0];

    let attempt = coord.on_user_activates_sound_control(a);
    assert_eq!(
        drive(&mut coord, attempt, PERMISSIVE),
        Some(Settlement::PlayingWithSound)
    );
    assert!(!videos[0].is_muted());
    assert!(!videos[0].control_shown());
    assert!(coord.state(a).unwrap().has_user_unmuted);

    coord.on_section_hidden(a);
    let attempt = coord.on_section_visible(a).expect("attempt");
    assert_eq!(attempt.sound, Sound::Unmuted);
    assert_eq!(attempt.origin, PlayOrigin::GrantedAutoStart);
}

#[test]
fn sound_grant_does_not_carry_over_to_other_videos() {
    let (mut coord, _videos, ids) = gallery(2);
    let attempt = coord.on_user_activates_sound_control(ids[0]);
    drive(&mut coord, attempt, PERMISSIVE);

    let attempt = coord.on_section_visible(ids[1]).expect("attempt");
    assert_eq!(attempt.origin, PlayOrigin::AutoStart);
    assert!(!coord.state(ids[1]).unwrap().has_user_unmuted);
}

#[test]
fn granted_autostart_rejection_shows_control_without_muted_retry() {
    let (mut coord, videos, ids) = gallery(1);
    let attempt = coord.on_user_activates_sound_control(ids[0]);
    drive(&mut coord, attempt, PERMISSIVE);
    coord.on_section_hidden(ids[0]);

    let attempt = coord.on_section_visible(ids[0]).expect("attempt");
    let step = coord.resolve(attempt, PlayOutcome::Rejected(PlayRejection::NotSupported));
    assert_eq!(step, Step::Settled(Settlement::Paused));
    assert!(videos[0].is_paused());
    assert!(videos[0].control_shown());
}

#[test]
fn sound_control_unmutes_video_already_playing_muted() {
    let (mut coord, videos, ids) = gallery(1);
    let attempt = coord.on_section_visible(ids[0]);
    drive(&mut coord, attempt, MUTED_ONLY);
    assert!(videos[0].is_muted());

    let attempt = coord.on_user_activates_sound_control(ids[0]).expect("attempt");
    // Playback is already running, the element only reports a failure.
    let step = coord.resolve(
        attempt,
        PlayOutcome::Rejected(PlayRejection::Other("decode".into())),
    );
    assert_eq!(step, Step::Settled(Settlement::PlayingWithSound));
    assert!(!videos[0].is_muted());
    assert!(!videos[0].control_shown());
}

#[test]
fn sound_control_pauses_other_videos() {
    let (mut coord, videos, ids) = gallery(2);
    let attempt = coord.on_section_visible(ids[0]);
    drive(&mut coord, attempt, MUTED_ONLY);

    let attempt = coord.on_user_activates_sound_control(ids[1]);
    drive(&mut coord, attempt, PERMISSIVE);
    assert!(videos[0].is_paused());
    assert_eq!(coord.playing(), Some(ids[1]));
}

#[test]
fn visible_while_playing_or_starting_does_nothing() {
    let (mut coord, _videos, ids) = gallery(1);
    let first = coord.on_section_visible(ids[0]);
    assert!(first.is_some());
    assert!(coord.on_section_visible(ids[0]).is_none());

    drive(&mut coord, first, PERMISSIVE);
    assert!(coord.on_section_visible(ids[0]).is_none());
}

#[test]
fn late_start_of_superseded_video_is_stopped() {
    let (mut coord, videos, ids) = gallery(2);
    let slow = coord.on_section_visible(ids[0]).expect("attempt");

    videos[1].start();
    coord.on_media_play(ids[1]);

    videos[0].start();
    let step = coord.resolve(slow, PlayOutcome::Started);
    assert_eq!(step, Step::Settled(Settlement::Superseded));
    assert!(videos[0].is_paused());
    assert_eq!(coord.playing(), Some(ids[1]));
}

#[test]
fn newer_attempt_on_same_video_wins() {
    let (mut coord, videos, ids) = gallery(1);
    let auto = coord.on_section_visible(ids[0]).expect("attempt");
    let manual = coord.on_user_activates_sound_control(ids[0]).expect("attempt");

    videos[0].start();
    assert_eq!(
        coord.resolve(auto, PlayOutcome::Started),
        Step::Settled(Settlement::Superseded)
    );
    // The pending manual start owns the element now.
    assert!(!videos[0].is_paused());
    assert_eq!(
        coord.resolve(manual, PlayOutcome::Started),
        Step::Settled(Settlement::PlayingWithSound)
    );
}

#[test]
fn ended_shows_control_and_clears_playing() {
    let (mut coord, videos, ids) = gallery(1);
    let attempt = coord.on_user_activates_sound_control(ids[0]);
    drive(&mut coord, attempt, PERMISSIVE);

    videos[0].0.paused.set(true);
    coord.on_media_ended(ids[0]);
    assert!(videos[0].control_shown());
    assert_eq!(coord.playing(), None);
}

#[test]
fn muted_native_play_keeps_control() {
    let (mut coord, videos, ids) = gallery(1);
    coord.on_media_ended(ids[0]);
    videos[0].0.muted.set(true);
    videos[0].start();
    coord.on_media_play(ids[0]);
    assert!(videos[0].control_shown());

    videos[0].0.muted.set(false);
    coord.on_media_play(ids[0]);
    assert!(!videos[0].control_shown());
}

#[test]
fn featured_video_started_muted_from_native_controls_keeps_button() {
    // Featured videos have no visibility autoplay; their button stays up
    // until the video is audible.
    let (mut coord, videos, ids) = gallery(2);
    let featured = ids[1];
    coord.on_media_ended(featured);
    assert!(videos[1].control_shown());

    videos[1].0.muted.set(true);
    videos[1].start();
    coord.on_media_play(featured);
    assert!(videos[1].control_shown());
    assert_eq!(coord.playing(), Some(featured));

    let attempt = coord.on_user_activates_sound_control(featured);
    assert_eq!(
        drive(&mut coord, attempt, PERMISSIVE),
        Some(Settlement::PlayingWithSound)
    );
    assert!(!videos[1].is_muted());
    assert!(!videos[1].control_shown());
}

#[test]
fn video_tracked_after_the_group_takes_part_in_exclusion() {
    // Main video without the group class, tracked after the group members.
    let (mut coord, videos, ids) = gallery(2);
    let main_video = FakeVideo::new();
    let main = coord.track(main_video.clone());

    videos[0].start();
    coord.on_media_play(ids[0]);

    let attempt = coord.on_section_visible(main);
    assert_eq!(
        drive(&mut coord, attempt, MUTED_ONLY),
        Some(Settlement::PlayingMuted)
    );
    assert!(videos[0].is_paused());
    assert!(main_video.control_shown());

    videos[1].start();
    coord.on_media_play(ids[1]);
    assert!(main_video.is_paused());
    assert_eq!(coord.playing(), Some(ids[1]));
}

#[test]
fn pause_all_stops_everything_and_drops_pending_starts() {
    let (mut coord, videos, ids) = gallery(2);
    let attempt = coord.on_section_visible(ids[0]);
    drive(&mut coord, attempt, PERMISSIVE);
    let pending = coord.on_section_visible(ids[1]).expect("attempt");

    coord.pause_all();
    assert_eq!(playing_count(&videos), 0);
    assert_eq!(coord.playing(), None);

    videos[1].start();
    assert_eq!(
        coord.resolve(pending, PlayOutcome::Started),
        Step::Settled(Settlement::Superseded)
    );
    assert!(videos[1].is_paused());
}

#[test]
fn unknown_video_ids_are_ignored() {
    let (mut coord, _videos, _ids) = gallery(1);
    let (other, _, other_ids) = gallery(3);
    let foreign = other_ids[2];
    assert_eq!(other.len(), 3);

    assert!(coord.on_section_visible(foreign).is_none());
    assert!(coord.on_user_activates_sound_control(foreign).is_none());
    coord.on_section_hidden(foreign);
    coord.on_media_play(foreign);
    coord.on_media_ended(foreign);
    assert!(!coord.control_visible(foreign));
}

#[test]
fn at_most_one_video_plays_through_mixed_event_sequences() {
    let (mut coord, videos, ids) = gallery(4);
    let policies = [PERMISSIVE, MUTED_ONLY, BLOCK_ALL];
    let mut seed: u64 = 0x2545_F491_4F6C_DD1D;

    for _ in 0..2000 {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let pick = (seed >> 33) as usize;
        let id = ids[pick % ids.len()];
        let video = &videos[id.index()];
        let browser = policies[(pick / 7) % policies.len()];

        match (pick / 31) % 6 {
            0 => {
                let attempt = coord.on_section_visible(id);
                drive(&mut coord, attempt, browser);
            }
            1 => coord.on_section_hidden(id),
            2 => {
                let attempt = coord.on_user_activates_sound_control(id);
                drive(&mut coord, attempt, browser);
            }
            3 => {
                video.start();
                coord.on_media_play(id);
            }
            4 => {
                if !video.is_paused() {
                    video.0.paused.set(true);
                    coord.on_media_ended(id);
                }
            }
            _ => coord.pause_all(),
        }

        assert!(playing_count(&videos) <= 1);
        let flagged = coord
            .ids()
            .filter(|i| coord.state(*i).unwrap().is_playing)
            .count();
        assert!(flagged <= 1);
    }
}

#[test]
fn rejection_names_map_to_kinds() {
    assert_eq!(
        PlayRejection::from_dom_name("NotAllowedError", "user gesture required"),
        PlayRejection::NotAllowed
    );
    assert_eq!(
        PlayRejection::from_dom_name("AbortError", ""),
        PlayRejection::Aborted
    );
    assert_eq!(
        PlayRejection::from_dom_name("NotSupportedError", "no source"),
        PlayRejection::NotSupported
    );
    assert_eq!(
        PlayRejection::from_dom_name("NetworkError", "offline"),
        PlayRejection::Other("NetworkError: offline".to_string())
    );
    assert_eq!(
        PlayRejection::NotAllowed.to_string(),
        "playback not allowed without a user gesture"
    );
}
