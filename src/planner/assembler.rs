use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{IngredientRegistry, RecipeCatalog};
use crate::config::{PlannerConfig, SlotCalorieBasis};
use crate::diets::DietaryApproachRegistry;
use crate::error::{PlanError, Result};
use crate::models::{
    DayPlan, DietaryApproach, EnergyNeeds, MealPlan, MealType, PlanStatus, Recipe, SlotFailure,
    UserProfile, WeekPlan,
};
use crate::planner::energy::{energy_needs, macro_targets_from_calories, slot_target};
use crate::planner::index::IngredientIndex;
use crate::planner::nutrition::weekly_nutrition;
use crate::planner::shopping::build_shopping_list;
use crate::planner::slot::{SlotFiller, SlotRequest, UsedRecipes};
use crate::planner::validation::{status_for, validate_weeks, CalorieGoal};

pub const DAYS_PER_WEEK: u32 = 7;
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Which days of each week are fasting days (0 = first day of the week).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastingDaySpec {
    pub weekday_indices: Vec<u32>,
}

/// Inputs for one plan generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub profile: UserProfile,
    pub approach_id: String,
    #[serde(default)]
    pub excluded: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub horizon_days: u32,
    #[serde(default)]
    pub fasting: Option<FastingDaySpec>,
    pub start_date: NaiveDate,
}

impl PlanRequest {
    /// A one-week request starting today with no exclusions or allergies.
    pub fn new(profile: UserProfile, approach_id: &str) -> Self {
        Self {
            profile,
            approach_id: approach_id.to_string(),
            excluded: Vec::new(),
            allergies: Vec::new(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            fasting: None,
            start_date: Utc::now().date_naive(),
        }
    }
}

/// `n` fasting days spread over a week: 2 gives days 0 and 3.
pub fn evenly_spaced_fasting_days(days_per_week: u32) -> Vec<u32> {
    let n = days_per_week.min(DAYS_PER_WEEK);
    (0..n).map(|i| i * DAYS_PER_WEEK / n).collect()
}

/// Per-run state shared by every slot.
struct Run<'r> {
    approach: &'r DietaryApproach,
    meal_types: Vec<MealType>,
    candidates: BTreeMap<MealType, Vec<Recipe>>,
    excluded: &'r [String],
    allergies: &'r [String],
    base_scale: f64,
    fasting_scale: f64,
}

impl Run<'_> {
    fn candidates_for(&self, meal_type: MealType) -> &[Recipe] {
        self.candidates
            .get(&meal_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn day_scale(&self, fasting: bool) -> f64 {
        if fasting {
            self.base_scale * self.fasting_scale
        } else {
            self.base_scale
        }
    }
}

/// Builds meal plans from a dietary approach, a recipe catalog and an ingredient registry.
pub struct MealPlanner<'a, C, R> {
    approaches: &'a DietaryApproachRegistry,
    catalog: &'a C,
    ingredients: &'a R,
    config: PlannerConfig,
}

impl<'a, C, R> MealPlanner<'a, C, R>
where
    C: RecipeCatalog,
    R: IngredientRegistry,
{
    pub fn new(
        approaches: &'a DietaryApproachRegistry,
        catalog: &'a C,
        ingredients: &'a R,
    ) -> Self {
        Self {
            approaches,
            catalog,
            ingredients,
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Multiplier from portion sizes to slot calories on a normal day.
    fn base_scale(&self, approach: &DietaryApproach, energy: &EnergyNeeds) -> f64 {
        match self.config.slot_calorie_basis {
            SlotCalorieBasis::PortionSize => 1.0,
            SlotCalorieBasis::ScaledToTarget => {
                let portions = approach
                    .meal_structure
                    .daily_portion_calories(self.config.include_optional_meals);
                if portions > 0.0 {
                    energy.target_calories / portions
                } else {
                    1.0
                }
            }
        }
    }

    /// Weekday indices that are fasting days for this request.
    fn fasting_days(
        &self,
        approach: &DietaryApproach,
        spec: Option<&FastingDaySpec>,
    ) -> Result<Vec<u32>> {
        let Some(period) = &approach.meal_structure.fasting else {
            if spec.is_some() {
                warn!(approach = %approach.id, "fasting days ignored for a non-fasting approach");
            }
            return Ok(Vec::new());
        };
        match spec {
            Some(spec) => {
                if let Some(bad) = spec.weekday_indices.iter().find(|d| **d >= DAYS_PER_WEEK) {
                    return Err(PlanError::InvalidInput(format!(
                        "fasting weekday index {} is outside 0..{}",
                        bad, DAYS_PER_WEEK
                    )));
                }
                let mut days = spec.weekday_indices.clone();
                days.sort_unstable();
                days.dedup();
                Ok(days)
            }
            None => Ok(evenly_spaced_fasting_days(period.days_per_week)),
        }
    }

    fn fetch_candidates(
        &self,
        approach_id: &str,
        meal_types: &[MealType],
    ) -> Result<BTreeMap<MealType, Vec<Recipe>>> {
        let mut candidates = BTreeMap::new();
        for meal_type in meal_types {
            let recipes = self
                .catalog
                .find_by_approach_and_category(approach_id, *meal_type)?;
            debug!(meal = %meal_type, count = recipes.len(), "fetched candidates");
            candidates.insert(*meal_type, recipes);
        }
        Ok(candidates)
    }

    fn fill_day(
        &self,
        run: &Run<'_>,
        filler: &mut SlotFiller<'_>,
        used: &mut UsedRecipes,
        date: NaiveDate,
        day_number: u32,
        fasting: bool,
    ) -> Result<DayPlan> {
        let scale = run.day_scale(fasting);
        let targets: Vec<_> = run
            .meal_types
            .iter()
            .filter_map(|mt| run.approach.meal_structure.distribution(*mt))
            .map(|d| slot_target(d, scale))
            .collect();

        let calorie_target = targets.iter().map(|t| t.calories).sum();
        let mut day = DayPlan::new(date, day_number, fasting, calorie_target);
        let mut same_day: Vec<String> = Vec::new();

        for target in targets {
            let request = SlotRequest {
                target,
                approach: run.approach,
                excluded: run.excluded,
                allergies: run.allergies,
                candidates: run.candidates_for(target.meal_type),
                same_day: &same_day,
                avoid: None,
            };
            match filler.fill(&request, used) {
                Ok(assignment) => {
                    same_day.push(assignment.recipe.id.clone());
                    day.meals.push(assignment);
                }
                Err(e) if e.is_slot_recoverable() => {
                    warn!(%date, meal = %target.meal_type, error = %e, "slot left empty");
                    day.failures.push(SlotFailure {
                        meal_type: target.meal_type,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        day.recompute_totals();
        Ok(day)
    }

    /// Shopping list and nutrition summary for every week, then plan validation.
    fn summarize(&self, plan: &mut MealPlan, index: &IngredientIndex) {
        let fasting_scale = plan
            .dietary_approach
            .meal_structure
            .fasting
            .as_ref()
            .map_or(1.0, |f| f.scale());
        for week in plan.weeks.iter_mut() {
            week.shopping_list = build_shopping_list(week.week_number, &week.days, index);
            week.weekly_nutrition = weekly_nutrition(
                &week.days,
                &plan.macro_targets,
                &plan.dietary_approach,
                fasting_scale,
                &self.config,
            );
        }
        let goal = CalorieGoal {
            daily_calories: plan.energy_needs.target_calories,
            fasting_scale,
        };
        plan.validation = validate_weeks(&plan.weeks, goal, &self.config);
        plan.status = status_for(&plan.validation);
    }

    /// Generate a plan of `horizon_days` days, grouped into weeks of seven.
    ///
    /// A slot nothing can fill is recorded on its day and in the validation
    /// report. Catalog and registry failures abort the run, as does a plan in
    /// which no slot at all could be filled.
    pub fn generate_plan(&self, request: &PlanRequest) -> Result<MealPlan> {
        let started = Instant::now();
        if request.horizon_days == 0 {
            return Err(PlanError::InvalidInput(
                "horizon must be at least one day".to_string(),
            ));
        }

        let approach = self.approaches.get(&request.approach_id)?;
        let energy = energy_needs(&request.profile)?;
        let macro_targets =
            macro_targets_from_calories(energy.target_calories, &approach.macro_ratio);

        let meal_types = approach
            .meal_structure
            .meal_types(self.config.include_optional_meals);
        if meal_types.is_empty() {
            return Err(PlanError::InvalidInput(format!(
                "approach '{}' has no meals to plan",
                approach.id
            )));
        }
        let fasting_days = self.fasting_days(approach, request.fasting.as_ref())?;

        let candidates = self.fetch_candidates(&approach.id, &meal_types)?;
        let index = IngredientIndex::build(
            self.ingredients,
            candidates.values().flatten(),
            approach,
            self.config.unknown_ingredients,
        )?;

        let run = Run {
            approach,
            meal_types,
            candidates,
            excluded: &request.excluded,
            allergies: &request.allergies,
            base_scale: self.base_scale(approach, &energy),
            fasting_scale: approach
                .meal_structure
                .fasting
                .as_ref()
                .map_or(1.0, |f| f.scale()),
        };

        let mut filler = SlotFiller::new(&index, &self.config);
        let mut used = UsedRecipes::new();
        let mut weeks: Vec<WeekPlan> = Vec::new();

        for offset in 0..request.horizon_days {
            let weekday = offset % DAYS_PER_WEEK;
            if weekday == 0 {
                weeks.push(WeekPlan {
                    week_number: offset / DAYS_PER_WEEK + 1,
                    ..Default::default()
                });
            }
            let date = request
                .start_date
                .checked_add_days(Days::new(offset as u64))
                .ok_or_else(|| {
                    PlanError::InvalidInput("plan runs past the calendar".to_string())
                })?;
            let fasting = fasting_days.contains(&weekday);
            let day = self.fill_day(&run, &mut filler, &mut used, date, weekday + 1, fasting)?;
            if let Some(week) = weeks.last_mut() {
                week.days.push(day);
            }
        }

        let filled: usize = weeks.iter().flat_map(|w| &w.days).map(|d| d.meals.len()).sum();
        if filled == 0 {
            let first = weeks
                .iter()
                .flat_map(|w| &w.days)
                .flat_map(|d| &d.failures)
                .next();
            return Err(PlanError::NoEligibleRecipe {
                meal_type: first.map_or(run.meal_types[0], |f| f.meal_type),
                reason: first.map_or_else(
                    || "no slot in the plan could be filled".to_string(),
                    |f| f.reason.clone(),
                ),
            });
        }

        let mut plan = MealPlan {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            user_profile: request.profile.clone(),
            dietary_approach: approach.clone(),
            energy_needs: energy,
            macro_targets,
            weeks,
            excluded_ingredients: request.excluded.clone(),
            allergies: request.allergies.clone(),
            status: PlanStatus::Draft,
            validation: Default::default(),
        };
        self.summarize(&mut plan, &index);

        info!(
            plan = %plan.id,
            approach = %approach.id,
            days = request.horizon_days,
            assignments = filled,
            failures = plan.failure_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "plan generated"
        );
        Ok(plan)
    }

    /// Replace one slot with the best other recipe and refresh the affected summaries.
    ///
    /// Works on empty slots too. On failure the plan is left unchanged.
    pub fn regenerate_slot(
        &self,
        plan: &mut MealPlan,
        week_number: u32,
        day_number: u32,
        meal_type: MealType,
    ) -> Result<()> {
        let approach = plan.dietary_approach.clone();
        let meal_types = approach
            .meal_structure
            .meal_types(self.config.include_optional_meals);
        let Some(distribution) = approach.meal_structure.distribution(meal_type) else {
            return Err(PlanError::InvalidInput(format!(
                "'{}' has no {} slot",
                approach.id, meal_type
            )));
        };

        let (week_idx, day_idx) = plan
            .weeks
            .iter()
            .enumerate()
            .find(|(_, w)| w.week_number == week_number)
            .and_then(|(wi, w)| {
                w.days
                    .iter()
                    .position(|d| d.day_number == day_number)
                    .map(|di| (wi, di))
            })
            .ok_or_else(|| {
                PlanError::InvalidInput(format!(
                    "plan has no week {} day {}",
                    week_number, day_number
                ))
            })?;

        let candidates = self
            .catalog
            .find_by_approach_and_category(&approach.id, meal_type)?;
        let in_plan: Vec<Recipe> = plan
            .weeks
            .iter()
            .flat_map(|w| w.assignments())
            .map(|a| a.recipe.clone())
            .collect();
        let index = IngredientIndex::build(
            self.ingredients,
            candidates.iter().chain(in_plan.iter()),
            &approach,
            self.config.unknown_ingredients,
        )?;

        let day = &plan.weeks[week_idx].days[day_idx];
        let current = day.meal(meal_type).map(|a| a.recipe.id.clone());
        let same_day: Vec<String> = day
            .meals
            .iter()
            .filter(|a| a.meal_type != meal_type)
            .map(|a| a.recipe.id.clone())
            .collect();
        let mut used = UsedRecipes::new();
        for assignment in plan.weeks.iter().flat_map(|w| w.assignments()) {
            used.mark(&assignment.recipe.id);
        }

        let scale = {
            let base = self.base_scale(&approach, &plan.energy_needs);
            match (&approach.meal_structure.fasting, day.fasting_day) {
                (Some(period), true) => base * period.scale(),
                _ => base,
            }
        };
        let request = SlotRequest {
            target: slot_target(distribution, scale),
            approach: &approach,
            excluded: &plan.excluded_ingredients,
            allergies: &plan.allergies,
            candidates: &candidates,
            same_day: &same_day,
            avoid: current.as_deref(),
        };
        let mut filler = SlotFiller::new(&index, &self.config);
        let assignment = filler.fill(&request, &mut used)?;
        debug!(
            week = week_number,
            day = day_number,
            meal = %meal_type,
            from = current.as_deref().unwrap_or("-"),
            to = %assignment.recipe.id,
            "slot regenerated"
        );

        let day = &mut plan.weeks[week_idx].days[day_idx];
        day.meals.retain(|a| a.meal_type != meal_type);
        day.failures.retain(|f| f.meal_type != meal_type);
        day.meals.push(assignment);
        day.meals.sort_by_key(|a| {
            meal_types
                .iter()
                .position(|mt| *mt == a.meal_type)
                .unwrap_or(usize::MAX)
        });
        day.recompute_totals();

        self.summarize(plan, &index);
        Ok(())
    }
}
