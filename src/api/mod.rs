//! Gateway client for the Food Tracker API
//!
//! Every outbound request goes through [`ApiClient`], so all screens share
//! the same token attachment and error semantics.

mod admin;
mod auth;
mod client;
mod foods;
mod meals;
mod users;

pub use client::ApiClient;
pub use foods::{Food, FoodInput};
pub use meals::{Meal, MealInput};
pub use users::ProfileUpdate;
