use thiserror::Error;

use crate::models::MealType;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown dietary approach: {0}")]
    UnknownApproach(String),

    #[error("No eligible recipe for {meal_type}: {reason}")]
    NoEligibleRecipe { meal_type: MealType, reason: String },

    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(String),

    #[error("Registry unavailable: {0}")]
    Registry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PlanError {
    /// Catalog exhaustion for a single slot. The assembler records these and keeps going.
    pub fn is_slot_recoverable(&self) -> bool {
        matches!(self, PlanError::NoEligibleRecipe { .. })
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_catalog_exhaustion_is_recoverable() {
        let exhausted = PlanError::NoEligibleRecipe {
            meal_type: MealType::Lunch,
            reason: "all candidates eliminated".to_string(),
        };
        assert!(exhausted.is_slot_recoverable());
        assert!(!PlanError::UnknownIngredient("pork-belly".to_string()).is_slot_recoverable());
        assert!(!PlanError::Registry("timeout".to_string()).is_slot_recoverable());
    }

    #[test]
    fn test_display_includes_meal_type() {
        let err = PlanError::NoEligibleRecipe {
            meal_type: MealType::Dinner,
            reason: "empty catalog".to_string(),
        };
        assert_eq!(err.to_string(), "No eligible recipe for dinner: empty catalog");
    }
}
