//! Vehicles and customer reviews shown in the landing page carousels.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// DOM id of the container the third-party finance widget mounts into.
///
/// Call-to-action buttons on the vehicle cards scroll to this element.
pub const IFRAME_CONTAINER_ID: &str = "iframe-container";

/// Highest star rating a review can show.
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Petrol => "Petrol",
            Self::Diesel => "Diesel",
            Self::Hybrid => "Hybrid",
            Self::Electric => "Electric",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "petrol" => Some(Self::Petrol),
            "diesel" => Some(Self::Diesel),
            "hybrid" => Some(Self::Hybrid),
            "electric" => Some(Self::Electric),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: u32,
    pub title: String,
    pub price: Decimal,
    pub mileage: u32,
    pub fuel_type: FuelType,
    pub year: i32,
    /// Advertised monthly payment, whole pounds.
    pub monthly_payment: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: u32,
    pub name: String,
    pub review: String,
    pub rating: u8,
    /// Display date, e.g. `15 March 2023`.
    pub date: String,
}

impl Review {
    /// Avatar initials: the first letter of each part of the name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Filled stars out of [`MAX_RATING`].
    pub fn stars(&self) -> u8 {
        self.rating.min(MAX_RATING)
    }
}

fn car(
    id: u32,
    title: &str,
    price: i64,
    mileage: u32,
    fuel_type: FuelType,
    year: i32,
    monthly_payment: i64,
) -> Car {
    Car {
        id,
        title: title.to_string(),
        price: Decimal::from(price),
        mileage,
        fuel_type,
        year,
        monthly_payment: Decimal::from(monthly_payment),
    }
}

fn review(
    id: u32,
    name: &str,
    text: &str,
    date: &str,
) -> Review {
    Review {
        id,
        name: name.to_string(),
        review: text.to_string(),
        rating: MAX_RATING,
        date: date.to_string(),
    }
}

/// The vehicles featured on the finance landing page.
pub fn default_cars() -> Vec<Car> {
    vec![
        car(1, "2020 BMW 3 Series", 22_995, 25_000, FuelType::Diesel, 2020, 349),
        car(2, "2021 Audi A4", 25_495, 20_000, FuelType::Petrol, 2021, 389),
        car(3, "2022 Mercedes C-Class", 28_995, 15_000, FuelType::Hybrid, 2022, 429),
        car(4, "2019 Volkswagen Golf", 18_995, 32_000, FuelType::Petrol, 2019, 289),
        car(5, "2021 Tesla Model 3", 34_995, 18_000, FuelType::Electric, 2021, 499),
    ]
}

/// The customer reviews carousel content.
pub fn default_reviews() -> Vec<Review> {
    vec![
        review(
            1,
            "Simon Dudley",
            "Outstanding service from start to finish, didnt think I had a cat in hells chance of getting finance but these guys got me sorted in no time",
            "15 March 2023",
        ),
        review(
            2,
            "Clare James",
            "Many thanks for sorting out my car finance and the same day drive away was perfect!",
            "2 February 2023",
        ),
        review(
            3,
            "Leanne Carter",
            "Hi Matt, Well what can I say?.......I TOTALLY LOVE MY CAR!!!!!!, Thank you so much!!, Leanne",
            "27 April 2023",
        ),
        review(
            4,
            "Nicky Simpson",
            "Just got my first car from The Car Finance Hub, sorted me out with a cracking deal thank you for the smooth journey",
            "10 May 2023",
        ),
        review(
            5,
            "Jacky Ellis",
            "Despite been on benefits the car finance hub was able to secure funding for me to purchase a 2014 plate vauxhall cross enabling me get to my 2 boys to school on time",
            "3 June 2023",
        ),
    ]
}
