//! Rotating item viewports for the vehicle and review showcases.
//!
//! A [`Carousel`] is a plain state object. Background behaviour lives in
//! two handles that share it through [`SharedCarousel`]: [`Autoplay`]
//! advances it on a timer, and [`ResizeListener`] follows the viewport width.

mod autoplay;
mod viewport;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

pub use autoplay::{Autoplay, DEFAULT_AUTOPLAY_INTERVAL};
pub use viewport::{Breakpoints, ResizeListener};

/// A carousel shared between its view and its background handles.
pub type SharedCarousel<T> = Arc<Mutex<Carousel<T>>>;

/// How the current position moves through the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationPolicy {
    /// The position is an item index modulo the item count; the window
    /// wraps past the end of the list. Used for vehicles.
    Wrap,
    /// The position is a slide offset from `0` to `len - visible`; advancing
    /// past the last offset returns to `0`. Used for reviews.
    Offset,
}

#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    policy: RotationPolicy,
    breakpoints: Breakpoints,
    index: usize,
    visible_count: usize,
    autoplay_enabled: bool,
}

impl<T> Carousel<T> {
    /// A carousel at position `0` showing three items, autoplay enabled.
    pub fn new(
        items: Vec<T>,
        policy: RotationPolicy,
    ) -> Self {
        Self {
            items,
            policy,
            breakpoints: Breakpoints::default(),
            index: 0,
            visible_count: 3,
            autoplay_enabled: true,
        }
    }

    pub fn with_breakpoints(
        mut self,
        breakpoints: Breakpoints,
    ) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn shared(self) -> SharedCarousel<T> {
        Arc::new(Mutex::new(self))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn is_autoplay_enabled(&self) -> bool {
        self.autoplay_enabled
    }

    /// Number of distinct positions, which is also the number of pagination
    /// dots. Zero for an empty carousel.
    pub fn positions(&self) -> usize {
        let len = self.items.len();
        match self.policy {
            RotationPolicy::Wrap => len,
            RotationPolicy::Offset if len == 0 => 0,
            RotationPolicy::Offset => len.saturating_sub(self.visible_count) + 1,
        }
    }

    pub fn next(&mut self) -> usize {
        let positions = self.positions();
        if positions > 0 {
            self.index = (self.index + 1) % positions;
        }
        self.index
    }

    pub fn prev(&mut self) -> usize {
        let positions = self.positions();
        if positions > 0 {
            self.index = (self.index + positions - 1) % positions;
        }
        self.index
    }

    /// Jumps to `index`, clamped to the last position.
    pub fn go_to(
        &mut self,
        index: usize,
    ) -> usize {
        self.index = index.min(self.positions().saturating_sub(1));
        self.index
    }

    /// Sets how many items are shown at once. Zero is treated as one.
    pub fn set_visible_count(
        &mut self,
        count: usize,
    ) {
        let count = count.max(1);
        if count != self.visible_count {
            debug!(from = self.visible_count, to = count, "visible count changed");
        }
        self.visible_count = count;
        self.index = self.index.min(self.positions().saturating_sub(1));
    }

    pub fn set_viewport_width(
        &mut self,
        width: u32,
    ) {
        self.set_visible_count(self.breakpoints.visible_count(width));
    }

    pub fn pause(&mut self) {
        self.autoplay_enabled = false;
    }

    pub fn resume(&mut self) {
        self.autoplay_enabled = true;
    }

    /// One autoplay beat: advances only while autoplay is enabled. Returns
    /// whether the carousel moved.
    pub fn tick(&mut self) -> bool {
        if self.autoplay_enabled && !self.items.is_empty() {
            self.next();
            true
        } else {
            false
        }
    }

    /// The items on screen, left to right.
    pub fn window(&self) -> Vec<&T> {
        let len = self.items.len();
        let shown = self.visible_count.min(len);
        match self.policy {
            RotationPolicy::Wrap => (0..shown)
                .map(|offset| &self.items[(self.index + offset) % len])
                .collect(),
            RotationPolicy::Offset => self.items.iter().skip(self.index).take(shown).collect(),
        }
    }

    /// Width of one item as a percentage of the viewport.
    pub fn item_width_percent(&self) -> f64 {
        100.0 / self.visible_count as f64
    }

    /// Horizontal shift of the item strip, as a percentage. Only the offset
    /// policy slides a strip; the wrap policy renders [`Carousel::window`].
    pub fn translate_percent(&self) -> f64 {
        match self.policy {
            RotationPolicy::Wrap => 0.0,
            RotationPolicy::Offset if self.index == 0 => 0.0,
            RotationPolicy::Offset => -(self.index as f64 * self.item_width_percent()),
        }
    }
}
