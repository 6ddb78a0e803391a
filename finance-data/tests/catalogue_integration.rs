//! Loads the catalogue fixtures from disk, covering the file-opening path
//! that the inline unit tests skip.

use std::path::{Path, PathBuf};

use finance_core::models::FuelType;
use finance_data::{CatalogueError, load_cars_from_file, load_reviews_from_file};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn cars_fixture_loads_every_row() {
    let cars = load_cars_from_file(&fixture("cars.csv")).unwrap();

    assert_eq!(cars.len(), 6);
    assert_eq!(cars[5].title, "2018 Ford Focus");
    assert_eq!(cars[5].price, dec!(11495));
}

#[test]
fn cars_fixture_keeps_fuel_types() {
    let cars = load_cars_from_file(&fixture("cars.csv")).unwrap();

    let fuels: Vec<_> = cars.iter().map(|car| car.fuel_type).collect();

    assert_eq!(
        fuels,
        vec![
            FuelType::Diesel,
            FuelType::Petrol,
            FuelType::Hybrid,
            FuelType::Petrol,
            FuelType::Electric,
            FuelType::Petrol,
        ]
    );
}

#[test]
fn reviews_fixture_loads_quoted_text() {
    let reviews = load_reviews_from_file(&fixture("reviews.csv")).unwrap();

    assert_eq!(reviews.len(), 4);
    assert_eq!(
        reviews[0].review,
        "Outstanding service from start to finish, sorted in no time"
    );
    assert_eq!(reviews[3].stars(), 4);
    assert_eq!(reviews[2].initials(), "LC");
}

#[test]
fn bad_rating_fixture_reports_second_row() {
    let err = load_reviews_from_file(&fixture("bad_ratings.csv")).unwrap_err();

    assert!(matches!(err, CatalogueError::InvalidRating { rating: 9, row: 2 }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_cars_from_file(&fixture("does_not_exist.csv")).unwrap_err();

    assert!(matches!(err, CatalogueError::Io { .. }));
    assert!(err.to_string().contains("does_not_exist.csv"));
}
