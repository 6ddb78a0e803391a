use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::SharedCarousel;

/// Viewport widths, in pixels, at which the carousel shows more items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Below this one item is shown.
    pub small: u32,
    /// Below this two items are shown; at or above it, three.
    pub medium: u32,
}

impl Breakpoints {
    pub fn visible_count(
        &self,
        width: u32,
    ) -> usize {
        if width < self.small {
            1
        } else if width < self.medium {
            2
        } else {
            3
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            small: 640,
            medium: 1024,
        }
    }
}

/// Keeps a carousel's visible count in step with a stream of viewport widths.
///
/// The width current at start is applied straight away, then every change.
/// The listener ends when the sender is dropped, [`ResizeListener::stop`] is
/// called, or the handle is dropped.
#[derive(Debug)]
pub struct ResizeListener {
    task: Option<JoinHandle<()>>,
}

impl ResizeListener {
    pub fn start<T: Send + 'static>(
        carousel: SharedCarousel<T>,
        mut widths: watch::Receiver<u32>,
    ) -> Self {
        let task = tokio::spawn(async move {
            loop {
                let width = *widths.borrow_and_update();
                debug!(width, "viewport resized");
                carousel.lock().await.set_viewport_width(width);
                if widths.changed().await.is_err() {
                    break;
                }
            }
        });
        Self { task: Some(task) }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops listening. Calling it again does nothing.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::carousel::{Carousel, RotationPolicy};

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    #[test]
    fn breakpoints_are_exclusive_upper_bounds() {
        let breakpoints = Breakpoints::default();

        assert_eq!(breakpoints.visible_count(0), 1);
        assert_eq!(breakpoints.visible_count(639), 1);
        assert_eq!(breakpoints.visible_count(640), 2);
        assert_eq!(breakpoints.visible_count(1023), 2);
        assert_eq!(breakpoints.visible_count(1024), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn applies_width_at_start_and_on_change() {
        let carousel = Carousel::new(vec![1, 2, 3, 4], RotationPolicy::Wrap).shared();
        let (tx, rx) = watch::channel(500);
        let _listener = ResizeListener::start(carousel.clone(), rx);

        settle().await;
        assert_eq!(carousel.lock().await.visible_count(), 1);

        tx.send(900).unwrap();
        settle().await;
        assert_eq!(carousel.lock().await.visible_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_listener_ignores_resizes() {
        let carousel = Carousel::new(vec![1, 2, 3, 4], RotationPolicy::Wrap).shared();
        let (tx, rx) = watch::channel(1200);
        let mut listener = ResizeListener::start(carousel.clone(), rx);
        settle().await;

        listener.stop();
        listener.stop();
        let _ = tx.send(300);
        settle().await;

        assert!(!listener.is_running());
        assert_eq!(carousel.lock().await.visible_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn listener_ends_with_its_sender() {
        let carousel = Carousel::new(vec![1, 2, 3], RotationPolicy::Offset).shared();
        let (tx, rx) = watch::channel(1200);
        let listener = ResizeListener::start(carousel, rx);
        settle().await;

        drop(tx);
        settle().await;

        assert!(!listener.is_running());
    }
}
