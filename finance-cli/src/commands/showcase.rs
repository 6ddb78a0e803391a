use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use finance_core::carousel::{
    Autoplay, Breakpoints, Carousel, ResizeListener, RotationPolicy, SharedCarousel,
};
use finance_core::format::format_currency;
use finance_core::models::{Car, IFRAME_CONTAINER_ID, MAX_RATING, Review};
use tokio::sync::watch;
use tracing::info;

/// What both carousels showed at one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub tick: u32,
    pub car_index: usize,
    pub review_offset: usize,
    pub visible_count: usize,
}

fn car_line(car: &Car) -> String {
    format!(
        "{} {} ({} miles, {}) from {}/mo",
        car.title,
        format_currency(car.price, 0),
        car.mileage,
        car.fuel_type.as_str(),
        format_currency(car.monthly_payment, 0)
    )
}

fn review_line(review: &Review) -> String {
    let stars = usize::from(review.stars());
    format!(
        "[{}] {} {}{}",
        review.initials(),
        review.name,
        "★".repeat(stars),
        "☆".repeat(usize::from(MAX_RATING) - stars)
    )
}

async fn print_frame(
    out: &mut impl Write,
    tick: u32,
    cars: &SharedCarousel<Car>,
    reviews: &SharedCarousel<Review>,
) -> Result<Frame> {
    let cars = cars.lock().await;
    let reviews = reviews.lock().await;

    writeln!(
        out,
        "-- tick {tick}: car {}/{}, reviews offset {} ({:.1}%)",
        cars.current_index() + 1,
        cars.len(),
        reviews.current_index(),
        reviews.translate_percent()
    )?;
    for car in cars.window() {
        writeln!(out, "  {}  [Apply now -> #{IFRAME_CONTAINER_ID}]", car_line(car))?;
    }
    for review in reviews.window() {
        writeln!(out, "  {}", review_line(review))?;
    }

    Ok(Frame {
        tick,
        car_index: cars.current_index(),
        review_offset: reviews.current_index(),
        visible_count: cars.visible_count(),
    })
}

/// Runs the vehicle and review carousels under autoplay for `ticks`
/// periods at a fixed viewport width, printing what is on screen after
/// each advance.
///
/// # Errors
///
/// Fails when output cannot be written.
pub async fn run_showcase(
    cars: Vec<Car>,
    reviews: Vec<Review>,
    breakpoints: Breakpoints,
    interval: Duration,
    width: u32,
    ticks: u32,
    out: &mut impl Write,
) -> Result<Vec<Frame>> {
    let cars = Carousel::new(cars, RotationPolicy::Wrap)
        .with_breakpoints(breakpoints)
        .shared();
    let reviews = Carousel::new(reviews, RotationPolicy::Offset)
        .with_breakpoints(breakpoints)
        .shared();

    let (_viewport, widths) = watch::channel(width);
    let _car_resize = ResizeListener::start(cars.clone(), widths.clone());
    let _review_resize = ResizeListener::start(reviews.clone(), widths);
    let _car_autoplay = Autoplay::start(cars.clone(), interval);
    let _review_autoplay = Autoplay::start(reviews.clone(), interval);
    info!(width, ticks, interval_ms = interval.as_millis() as u64, "showcase started");

    // Observe halfway between beats so each frame follows exactly one advance.
    tokio::time::sleep(interval / 2).await;
    let mut frames = vec![print_frame(out, 0, &cars, &reviews).await?];
    for tick in 1..=ticks {
        tokio::time::sleep(interval).await;
        frames.push(print_frame(out, tick, &cars, &reviews).await?);
    }

    Ok(frames)
}
