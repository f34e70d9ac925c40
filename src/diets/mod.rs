pub mod builtin;

use std::collections::HashMap;

use tracing::warn;

use crate::error::{PlanError, Result};
use crate::models::{canonical_approach_id, DietaryApproach};
use crate::planner::energy::validate_macro_ratio;

/// Catalog of dietary approaches, keyed by lowercase id.
///
/// Built explicitly and passed by reference; never mutated while plans are generated.
#[derive(Debug, Clone)]
pub struct DietaryApproachRegistry {
    approaches: HashMap<String, DietaryApproach>,
    /// Registration order, for stable listings.
    order: Vec<String>,
}

impl Default for DietaryApproachRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DietaryApproachRegistry {
    /// Registry holding the seven built-in approaches.
    pub fn new() -> Self {
        Self::with_approaches(builtin::all())
    }

    /// Registry over a custom set. Later entries replace earlier ones with the same id.
    pub fn with_approaches(approaches: Vec<DietaryApproach>) -> Self {
        let mut map = HashMap::new();
        let mut order = Vec::new();
        for approach in approaches {
            let key = approach.id.to_lowercase();
            if map.insert(key.clone(), approach).is_none() {
                order.push(key);
            } else {
                warn!(approach = %key, "duplicate approach id, keeping the later one");
            }
        }
        Self {
            approaches: map,
            order,
        }
    }

    /// Look up by id or alias (case-insensitive).
    pub fn get(&self, id: &str) -> Result<&DietaryApproach> {
        self.approaches
            .get(&canonical_approach_id(id))
            .ok_or_else(|| PlanError::UnknownApproach(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.approaches.contains_key(&canonical_approach_id(id))
    }

    /// All approaches in registration order.
    pub fn all(&self) -> Vec<&DietaryApproach> {
        self.order
            .iter()
            .filter_map(|key| self.approaches.get(key))
            .collect()
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&DietaryApproach>
    where
        F: Fn(&DietaryApproach) -> bool,
    {
        self.all().into_iter().filter(|a| predicate(a)).collect()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.all().into_iter().map(|a| a.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.approaches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approaches.is_empty()
    }

    /// Check every approach's ranges and macro sums. Returns the offending ids.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let invalid: Vec<String> = self
            .all()
            .into_iter()
            .filter(|a| {
                !a.macro_ratio.ranges_ordered()
                    || !validate_macro_ratio(&a.macro_ratio)
                    || a.meal_structure
                        .meals
                        .iter()
                        .any(|m| !m.macro_distribution.ranges_ordered() || m.target_calories <= 0.0)
            })
            .map(|a| a.id.clone())
            .collect();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(invalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealType, Strictness};

    #[test]
    fn test_builtin_ids() {
        let registry = DietaryApproachRegistry::new();
        assert_eq!(
            registry.ids(),
            vec![
                "keto",
                "sense",
                "lchf-paleo",
                "anti-inflammatory",
                "mediterranean",
                "flexitarian",
                "5-2"
            ]
        );
    }

    #[test]
    fn test_aliases_and_case() {
        let registry = DietaryApproachRegistry::new();
        assert_eq!(registry.get("balanced").unwrap().id, "sense");
        assert_eq!(registry.get("Low-Carb-Paleo").unwrap().id, "lchf-paleo");
        assert_eq!(registry.get("alternate-day-fasting").unwrap().id, "5-2");
        assert_eq!(registry.get("KETO").unwrap().id, "keto");
    }

    #[test]
    fn test_unknown_approach() {
        let registry = DietaryApproachRegistry::new();
        assert!(matches!(
            registry.get("carnivore"),
            Err(PlanError::UnknownApproach(id)) if id == "carnivore"
        ));
    }

    #[test]
    fn test_builtins_are_valid() {
        assert!(DietaryApproachRegistry::new().validate().is_ok());
    }

    #[test]
    fn test_filter_fasting() {
        let registry = DietaryApproachRegistry::new();
        let fasting = registry.filter(|a| a.is_fasting());
        assert_eq!(fasting.len(), 1);
        assert_eq!(fasting[0].id, "5-2");
    }

    #[test]
    fn test_keto_structure() {
        let registry = DietaryApproachRegistry::new();
        let keto = registry.get("keto").unwrap();
        let breakfast = keto.meal_structure.distribution(MealType::Breakfast).unwrap();
        assert!(breakfast.optional);
        assert_eq!(
            keto.meal_structure.meal_types(false),
            vec![MealType::Lunch, MealType::Dinner]
        );
        assert!(keto
            .restrictions
            .iter()
            .any(|r| r.strictness == Strictness::Eliminate));
    }

    #[test]
    fn test_custom_registry_rejects_bad_ratio() {
        let mut broken = builtin::sense();
        broken.id = "broken".to_string();
        broken.macro_ratio.fat.target = 50.0;
        let registry = DietaryApproachRegistry::with_approaches(vec![builtin::keto(), broken]);
        assert_eq!(registry.validate(), Err(vec!["broken".to_string()]));
    }
}
