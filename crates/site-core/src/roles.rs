//! Which gallery videos get a sound control, and how it is wired.

use crate::constants::{FEATURED_CONTROL_ID, FEATURED_VIDEO_ID, MAIN_CONTROL_ID, MAIN_VIDEO_ID};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoRole {
    /// Group member without its own control.
    Plain,
    /// Starts with sound only from its play button.
    Featured,
    /// Autoplays when its section is in view; button re-enables sound.
    Main,
}

impl VideoRole {
    pub const WITH_CONTROLS: [VideoRole; 2] = [VideoRole::Featured, VideoRole::Main];

    pub fn for_element_id(id: &str) -> Self {
        match id {
            FEATURED_VIDEO_ID => VideoRole::Featured,
            MAIN_VIDEO_ID => VideoRole::Main,
            _ => VideoRole::Plain,
        }
    }

    pub fn element_id(self) -> Option<&'static str> {
        match self {
            VideoRole::Plain => None,
            VideoRole::Featured => Some(FEATURED_VIDEO_ID),
            VideoRole::Main => Some(MAIN_VIDEO_ID),
        }
    }

    pub fn control_id(self) -> Option<&'static str> {
        match self {
            VideoRole::Plain => None,
            VideoRole::Featured => Some(FEATURED_CONTROL_ID),
            VideoRole::Main => Some(MAIN_CONTROL_ID),
        }
    }

    pub fn autoplays_on_view(self) -> bool {
        self == VideoRole::Main
    }

    /// The main video's button also takes `touchend`.
    pub fn touch_control(self) -> bool {
        self == VideoRole::Main
    }
}

/// Roles with a control whose video is not among `group_ids`. Such videos are
/// looked up by id and tracked alongside the group.
pub fn standalone_roles<S: AsRef<str>>(group_ids: &[S]) -> Vec<VideoRole> {
    VideoRole::WITH_CONTROLS
        .into_iter()
        .filter(|role| {
            let id = role.element_id().unwrap_or_default();
            !group_ids.iter().any(|g| g.as_ref() == id)
        })
        .collect()
}
