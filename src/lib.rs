pub mod config;
pub mod console;
pub mod controller;
pub mod error;
pub mod models;
pub mod services;
pub mod view;

pub use controller::RecommendationController;
pub use error::{ClientError, ClientResult};
