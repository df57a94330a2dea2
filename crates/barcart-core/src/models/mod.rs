//! Data models for barcart entities.
//!
//! - `Drink`, `DrinkDetails`, `DetailedDrink`: the "most liked" listing and
//!   its merge with detail records from the lookup API
//! - `Credentials`, `FavouriteRequest`: request bodies
//! - `UserProfile`: payload the service defines and the client passes
//!   through untouched

pub mod drink;
pub mod user;

pub use drink::{sort_by_like_count, DetailedDrink, Drink, DrinkDetails};
pub use user::{Credentials, FavouriteRequest, UserProfile};
