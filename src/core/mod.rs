pub mod description;
pub mod explorer;
pub mod image;
pub mod restaurants;

pub use crate::domain::model::{
    ChatMessage, ChatRole, Coordinates, DescriptionEntry, DishImage, DishQuery, DishReport,
    RestaurantLookup,
};
pub use crate::domain::ports::{ImageGenerator, PlacesProvider, TextGenerator};
pub use crate::utils::error::Result;
