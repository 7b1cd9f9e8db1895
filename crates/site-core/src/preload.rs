//! Preloader bookkeeping: which images to fetch and how far along we are.

use crate::constants::CRITICAL_IMAGES;
use fnv::FnvHashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    High,
    Normal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreloadItem {
    pub src: String,
    pub priority: Priority,
}

/// Ordered, de-duplicated list of image sources to warm up.
#[derive(Debug, Default)]
pub struct PreloadQueue {
    items: Vec<PreloadItem>,
    seen: FnvHashSet<String>,
}

impl PreloadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue seeded with the above-the-fold images.
    pub fn with_critical() -> Self {
        let mut q = Self::new();
        for src in CRITICAL_IMAGES {
            q.push(src, Priority::High);
        }
        q
    }

    /// Returns false when `src` is empty or already queued.
    pub fn push(&mut self, src: &str, priority: Priority) -> bool {
        if src.is_empty() || !self.seen.insert(src.to_string()) {
            return false;
        }
        self.items.push(PreloadItem {
            src: src.to_string(),
            priority,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[PreloadItem] {
        &self.items
    }
}

/// Count of settled loads. Failed loads count too so one broken image
/// cannot hold the page hostage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadProgress {
    loaded: usize,
    total: usize,
    finished: bool,
}

impl LoadProgress {
    pub fn new(total: usize) -> Self {
        Self {
            loaded: 0,
            total,
            finished: false,
        }
    }

    /// Record one settled image; returns true when this one finished the set.
    pub fn record(&mut self) -> bool {
        if self.loaded >= self.total {
            return false;
        }
        self.loaded += 1;
        self.is_complete()
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.loaded >= self.total
    }

    /// Mark the preloader as done. Only the first call returns true, so the
    /// last image and the fallback timer cannot both finish it.
    pub fn finish(&mut self) -> bool {
        !std::mem::replace(&mut self.finished, true)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.loaded as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// CSS width / label text for a percentage.
pub fn percent_label(percentage: u32) -> String {
    format!("{}%", percentage.min(100))
}
