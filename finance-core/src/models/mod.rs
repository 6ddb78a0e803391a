mod application;
mod catalogue;
mod employment;
mod loan;
mod personal;

pub use application::{ApplicationState, Field, Section};
pub use catalogue::{
    Car, FuelType, IFRAME_CONTAINER_ID, MAX_RATING, Review, default_cars, default_reviews,
};
pub use employment::{EmploymentDetails, EmploymentStatus};
pub use loan::{LoanDetails, LoanLimits, TermOptions, VehicleType};
pub use personal::{PersonalDetails, Title};
