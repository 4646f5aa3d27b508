//! Carts

pub mod data;
pub mod models;

pub use data::NewLineItem;
pub use models::{Cart, LineItem};
