pub mod catalog;
pub mod cli;
pub mod config;
pub mod diets;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;

pub use error::{PlanError, Result};
pub use planner::{MealPlanner, PlanRequest};
