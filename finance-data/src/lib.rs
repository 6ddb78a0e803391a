pub mod catalogue;

pub use catalogue::{
    CatalogueError, load_cars, load_cars_from_file, load_reviews, load_reviews_from_file,
};
