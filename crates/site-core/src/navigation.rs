use crate::constants::{NAVBAR_SCROLLED_AFTER_PX, SECTION_ACTIVATION_OFFSET_PX};

/// Geometry of a `section[id]` in document coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Section whose nav link should be highlighted for a scroll offset.
///
/// Sections activate `SECTION_ACTIVATION_OFFSET_PX` before they reach the
/// top. When ranges overlap the later section wins. `None` means the current
/// highlight should be left alone.
pub fn active_section(scroll_y: f64, sections: &[SectionBounds]) -> Option<&str> {
    sections
        .iter()
        .filter(|s| {
            let top = s.top - SECTION_ACTIVATION_OFFSET_PX;
            scroll_y > top && scroll_y <= top + s.height
        })
        .last()
        .map(|s| s.id.as_str())
}

pub fn nav_link_selector(section_id: &str) -> String {
    format!(".nav-link[href=\"#{}\"]", section_id)
}

#[inline]
pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLLED_AFTER_PX
}

/// Mobile menu open/closed state. Body scrolling is locked while open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn body_overflow(&self) -> &'static str {
        if self.open {
            "hidden"
        } else {
            ""
        }
    }
}

/// Coalesces scroll events into one update per animation frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// True if the caller should schedule a frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn release(&mut self) {
        self.pending = false;
    }
}
