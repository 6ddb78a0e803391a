//! CSV loader for the vehicle and review catalogues.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Header
//! names are case-sensitive. Whitespace around values is ignored.
//!
//! ### `cars.csv`
//!
//! | Column            | Type    | Notes                                     |
//! |-------------------|---------|-------------------------------------------|
//! | `id`              | integer |                                           |
//! | `title`           | string  | e.g. `2020 BMW 3 Series`                  |
//! | `price`           | decimal | pounds, e.g. `22995`                      |
//! | `mileage`         | integer |                                           |
//! | `fuel_type`       | string  | `Petrol`, `Diesel`, `Hybrid`, `Electric`  |
//! | `year`            | integer |                                           |
//! | `monthly_payment` | decimal | advertised payment                        |
//!
//! ### `reviews.csv`
//!
//! | Column   | Type    | Notes                        |
//! |----------|---------|------------------------------|
//! | `id`     | integer |                              |
//! | `name`   | string  |                              |
//! | `review` | string  | quote it if it has commas    |
//! | `rating` | integer | `1` to `5`                   |
//! | `date`   | string  | display text, `15 March 2023`|
//!
//! ```csv
//! id,title,price,mileage,fuel_type,year,monthly_payment
//! 1,2020 BMW 3 Series,22995,25000,Diesel,2020,349
//! ```
use std::io::Read;
use std::path::Path;

use finance_core::models::{Car, FuelType, MAX_RATING, Review};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

// ---------------------------------------------------------------------------
// Serde-compatible rows that mirror the CSV layout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CarRow {
    id: u32,
    title: String,
    price: Decimal,
    mileage: u32,
    fuel_type: String,
    year: i32,
    monthly_payment: Decimal,
}

#[derive(Debug, Deserialize)]
struct ReviewRow {
    id: u32,
    name: String,
    review: String,
    rating: u8,
    date: String,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading a catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure, missing column or a cell of the wrong type.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, not counting the header.
    #[error("unrecognised fuel type '{value}' on row {row}")]
    InvalidFuelType { value: String, row: usize },

    #[error("rating {rating} on row {row} is outside 1 to 5")]
    InvalidRating { rating: u8, row: usize },
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

fn convert_car(
    row: CarRow,
    row_number: usize,
) -> Result<Car, CatalogueError> {
    let fuel_type =
        FuelType::parse(&row.fuel_type).ok_or_else(|| CatalogueError::InvalidFuelType {
            value: row.fuel_type,
            row: row_number,
        })?;

    Ok(Car {
        id: row.id,
        title: row.title,
        price: row.price,
        mileage: row.mileage,
        fuel_type,
        year: row.year,
        monthly_payment: row.monthly_payment,
    })
}

fn convert_review(
    row: ReviewRow,
    row_number: usize,
) -> Result<Review, CatalogueError> {
    if !(1..=MAX_RATING).contains(&row.rating) {
        return Err(CatalogueError::InvalidRating {
            rating: row.rating,
            row: row_number,
        });
    }

    Ok(Review {
        id: row.id,
        name: row.name,
        review: row.review,
        rating: row.rating,
        date: row.date,
    })
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input)
}

/// Reads cars in file order.
///
/// # Errors
///
/// * [`CatalogueError::Parse`] for malformed CSV.
/// * [`CatalogueError::InvalidFuelType`] for an unknown fuel type.
pub fn load_cars<R: Read>(input: R) -> Result<Vec<Car>, CatalogueError> {
    let cars = reader(input)
        .deserialize::<CarRow>()
        .enumerate()
        .map(|(idx, result)| convert_car(result?, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = cars.len(), "loaded cars");
    Ok(cars)
}

/// Reads reviews in file order.
///
/// # Errors
///
/// * [`CatalogueError::Parse`] for malformed CSV.
/// * [`CatalogueError::InvalidRating`] for a rating outside 1 to 5.
pub fn load_reviews<R: Read>(input: R) -> Result<Vec<Review>, CatalogueError> {
    let reviews = reader(input)
        .deserialize::<ReviewRow>()
        .enumerate()
        .map(|(idx, result)| convert_review(result?, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = reviews.len(), "loaded reviews");
    Ok(reviews)
}

fn open(path: &Path) -> Result<std::fs::File, CatalogueError> {
    std::fs::File::open(path).map_err(|source| CatalogueError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// [`load_cars`] from a file on disk.
///
/// # Errors
///
/// [`CatalogueError::Io`] when the file cannot be opened, otherwise as
/// [`load_cars`].
pub fn load_cars_from_file(path: &Path) -> Result<Vec<Car>, CatalogueError> {
    load_cars(open(path)?)
}

/// [`load_reviews`] from a file on disk.
///
/// # Errors
///
/// [`CatalogueError::Io`] when the file cannot be opened, otherwise as
/// [`load_reviews`].
pub fn load_reviews_from_file(path: &Path) -> Result<Vec<Review>, CatalogueError> {
    load_reviews(open(path)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const CARS_CSV: &str = "\
id,title,price,mileage,fuel_type,year,monthly_payment
1,2020 BMW 3 Series,22995,25000,Diesel,2020,349
2, 2021 Tesla Model 3 ,34995,18000,electric,2021,499
";

    const REVIEWS_CSV: &str = "\
id,name,review,rating,date
1,Clare James,\"Quick, friendly and same day drive away\",5,2 February 2023
2,Nicky Simpson,Cracking deal,4,10 May 2023
";

    // -----------------------------------------------------------------------
    // cars
    // -----------------------------------------------------------------------

    #[test]
    fn cars_parse_in_file_order() {
        let cars = load_cars(CARS_CSV.as_bytes()).unwrap();

        assert_eq!(cars.len(), 2);
        assert_eq!(cars[0].title, "2020 BMW 3 Series");
        assert_eq!(cars[0].price, dec!(22995));
        assert_eq!(cars[1].title, "2021 Tesla Model 3");
        assert_eq!(cars[1].fuel_type, FuelType::Electric);
    }

    #[test]
    fn car_columns_are_matched_by_name() {
        let csv = "\
year,fuel_type,title,id,price,monthly_payment,mileage
2019,Petrol,2019 Volkswagen Golf,4,18995,289,32000
";

        let cars = load_cars(csv.as_bytes()).unwrap();

        assert_eq!(cars[0].year, 2019);
        assert_eq!(cars[0].mileage, 32000);
        assert_eq!(cars[0].monthly_payment, dec!(289));
    }

    #[test]
    fn unknown_fuel_type_names_the_row() {
        let csv = "\
id,title,price,mileage,fuel_type,year,monthly_payment
1,Good,1000,1,Petrol,2020,10
2,Bad,1000,1,Steam,1901,10
";

        let err = load_cars(csv.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            CatalogueError::InvalidFuelType { ref value, row: 2 } if value == "Steam"
        ));
    }

    #[test]
    fn missing_column_is_a_parse_error() {
        let csv = "id,title,price\n1,Car,1000\n";

        let err = load_cars(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, CatalogueError::Parse(_)));
    }

    #[test]
    fn header_only_file_is_empty() {
        let csv = "id,title,price,mileage,fuel_type,year,monthly_payment\n";

        assert!(load_cars(csv.as_bytes()).unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // reviews
    // -----------------------------------------------------------------------

    #[test]
    fn reviews_keep_quoted_commas() {
        let reviews = load_reviews(REVIEWS_CSV.as_bytes()).unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].review, "Quick, friendly and same day drive away");
        assert_eq!(reviews[1].rating, 4);
        assert_eq!(reviews[1].initials(), "NS");
    }

    #[test]
    fn zero_rating_is_rejected() {
        let csv = "id,name,review,rating,date\n1,A B,Fine,0,1 May 2023\n";

        let err = load_reviews(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, CatalogueError::InvalidRating { rating: 0, row: 1 }));
    }

    #[test]
    fn rating_above_five_is_rejected() {
        let csv = "id,name,review,rating,date\n1,A B,Fine,6,1 May 2023\n";

        let err = load_reviews(csv.as_bytes()).unwrap_err();

        assert_eq!(err.to_string(), "rating 6 on row 1 is outside 1 to 5");
    }
}
