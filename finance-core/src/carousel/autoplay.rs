use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace};

use super::SharedCarousel;

pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5_000);

#[derive(Debug, Clone, Copy)]
enum Command {
    Pause,
    Resume,
    /// The position changed by hand; count a full period from now.
    Restart,
}

/// Advances a shared carousel once per period while autoplay is enabled.
///
/// Pausing suspends the countdown, and resuming starts a full period over
/// rather than firing straight away. Moving the carousel through this
/// handle also restarts the countdown. The timer task is cancelled by
/// [`Autoplay::stop`] or when the handle is dropped.
///
/// ```
/// use std::time::Duration;
/// use finance_core::carousel::{Autoplay, Carousel, RotationPolicy};
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let carousel = Carousel::new(vec!["a", "b", "c"], RotationPolicy::Wrap).shared();
/// let autoplay = Autoplay::start(carousel.clone(), Duration::from_secs(5));
///
/// tokio::time::sleep(Duration::from_millis(5_001)).await;
/// assert_eq!(carousel.lock().await.current_index(), 1);
///
/// drop(autoplay);
/// tokio::time::sleep(Duration::from_secs(60)).await;
/// assert_eq!(carousel.lock().await.current_index(), 1);
/// # }
/// ```
#[derive(Debug)]
pub struct Autoplay<T> {
    carousel: SharedCarousel<T>,
    commands: mpsc::UnboundedSender<Command>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Autoplay<T> {
    pub fn start(
        carousel: SharedCarousel<T>,
        period: Duration,
    ) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(carousel.clone(), period, receiver));
        debug!(period_ms = period.as_millis() as u64, "autoplay started");
        Self {
            carousel,
            commands,
            task: Some(task),
        }
    }

    /// Pointer entered the carousel.
    pub async fn pause(&self) {
        self.carousel.lock().await.pause();
        self.send(Command::Pause);
    }

    /// Pointer left the carousel.
    pub async fn resume(&self) {
        self.carousel.lock().await.resume();
        self.send(Command::Resume);
    }

    pub async fn next(&self) -> usize {
        let index = self.carousel.lock().await.next();
        self.send(Command::Restart);
        index
    }

    pub async fn prev(&self) -> usize {
        let index = self.carousel.lock().await.prev();
        self.send(Command::Restart);
        index
    }

    /// Pagination dot selected.
    pub async fn go_to(
        &self,
        index: usize,
    ) -> usize {
        let index = self.carousel.lock().await.go_to(index);
        self.send(Command::Restart);
        index
    }
}

impl<T> Autoplay<T> {
    pub fn carousel(&self) -> &SharedCarousel<T> {
        &self.carousel
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancels the timer. Calling it again does nothing.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("autoplay stopped");
        }
    }

    fn send(
        &self,
        command: Command,
    ) {
        // A stopped timer has no receiver left.
        let _ = self.commands.send(command);
    }
}

impl<T> Drop for Autoplay<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run<T>(
    carousel: SharedCarousel<T>,
    period: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
) {
    let mut paused = !carousel.lock().await.is_autoplay_enabled();
    let mut deadline = Instant::now() + period;

    loop {
        tokio::select! {
            () = sleep_until(deadline), if !paused => {
                let mut carousel = carousel.lock().await;
                if carousel.tick() {
                    trace!(index = carousel.current_index(), "autoplay advanced");
                }
                deadline = Instant::now() + period;
            }
            command = commands.recv() => match command {
                Some(Command::Pause) => paused = true,
                Some(Command::Resume) => {
                    paused = false;
                    deadline = Instant::now() + period;
                }
                Some(Command::Restart) => deadline = Instant::now() + period,
                None => break,
            },
        }
    }
}
