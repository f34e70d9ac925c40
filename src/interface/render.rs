use crate::models::{
    DayPlan, DietaryApproach, EnergyNeeds, MacroTargets, MealPlan, ShoppingList,
    ValidationReport, WeeklyNutrition,
};
use crate::planner::energy::{BmiCategory, WeightTimeline};
use crate::planner::scoring::score_reasons;

/// Energy needs and macro targets as a short block.
pub fn display_energy(needs: &EnergyNeeds, targets: Option<&MacroTargets>) {
    println!();
    println!("=== Energy ===");
    println!("BMR:    {:>7.0} kcal", needs.bmr);
    println!("TDEE:   {:>7.0} kcal", needs.tdee);
    println!("Target: {:>7.0} kcal", needs.target_calories);
    if needs.deficit >= 0.0 {
        println!("Deficit: {:>6.0} kcal/day", needs.deficit);
    } else {
        println!("Surplus: {:>6.0} kcal/day", -needs.deficit);
    }

    if let Some(t) = targets {
        println!();
        println!(
            "Protein {:>4.0} g ({:.0}%) | Carbs {:>4.0} g ({:.0}%) | Fat {:>4.0} g ({:.0}%)",
            t.protein_grams,
            t.protein_percent,
            t.carb_grams,
            t.carb_percent,
            t.fat_grams,
            t.fat_percent
        );
    }
    println!();
}

pub fn display_body_metrics(
    bmi: f64,
    category: BmiCategory,
    ideal: (f64, f64),
    timeline: Option<&WeightTimeline>,
) {
    println!("BMI: {:.1} ({})", bmi, category.description());
    println!("Healthy weight: {:.1} - {:.1} kg", ideal.0, ideal.1);
    if let Some(t) = timeline {
        println!(
            "Reaching the goal weight takes about {} weeks at {:.2} kg/week",
            t.weeks, t.weekly_change_kg
        );
    }
    println!();
}

/// One line per approach.
pub fn display_approaches(approaches: &[&DietaryApproach]) {
    println!();
    println!("=== Dietary approaches ({}) ===", approaches.len());
    println!();

    let width = approaches.iter().map(|a| a.id.len()).max().unwrap_or(8);
    for approach in approaches {
        let ratio = &approach.macro_ratio;
        let fasting = if approach.is_fasting() { "  [fasting]" } else { "" };
        println!(
            "  {:<width$}  {:<26} C {:>2.0}% P {:>2.0}% F {:>2.0}%{}",
            approach.id,
            approach.name,
            ratio.carbohydrates.target,
            ratio.protein.target,
            ratio.fat.target,
            fasting,
            width = width
        );
    }
    println!();
}

fn display_day(day: &DayPlan) {
    let fasting = if day.fasting_day { "  (fasting)" } else { "" };
    println!(
        "Day {} - {}{}  target {:.0} kcal",
        day.day_number, day.date, fasting, day.calorie_target
    );

    let width = day
        .meals
        .iter()
        .map(|m| m.recipe.title.chars().count())
        .max()
        .unwrap_or(10);

    for meal in &day.meals {
        let swaps = if meal.substitutions.is_empty() {
            String::new()
        } else {
            let list: Vec<String> = meal
                .substitutions
                .iter()
                .map(|s| match &s.replacement_ingredient_id {
                    Some(r) => format!("{} -> {}", s.original_ingredient_id, r),
                    None => format!("-{}", s.original_ingredient_id),
                })
                .collect();
            format!("  [{}]", list.join(", "))
        };
        println!(
            "  {:<9} {:<width$} x{:.1}  {:>4.0} kcal  P {:>3.0} C {:>3.0} F {:>3.0}  score {:.0}{}",
            meal.meal_type.as_str(),
            meal.recipe.title,
            meal.serving_multiplier,
            meal.adjusted.calories,
            meal.adjusted.protein,
            meal.adjusted.carbs,
            meal.adjusted.fat,
            meal.score.overall,
            swaps,
            width = width
        );
        let reasons = score_reasons(&meal.score);
        if !reasons.is_empty() {
            println!("  {:<9} {}", "", reasons.join(", "));
        }
    }
    for failure in &day.failures {
        println!("  {:<9} (empty) {}", failure.meal_type.as_str(), failure.reason);
    }
    println!(
        "  {:<9} {:>4.0} kcal  P {:.0} C {:.0} F {:.0}",
        "total", day.totals.calories, day.totals.protein, day.totals.carbs, day.totals.fat
    );
}

pub fn display_shopping_list(list: &ShoppingList) {
    println!("--- Shopping list, week {} ---", list.week_number);
    if list.categories.is_empty() {
        println!("  (empty)");
    }
    for category in &list.categories {
        println!("  {}:", category.name);
        for item in &category.items {
            println!("    {:<28} {:>8.1} {}", item.name, item.amount, item.unit);
        }
    }
}

pub fn display_weekly_nutrition(summary: &WeeklyNutrition) {
    let avg = &summary.daily_average;
    println!("--- Nutrition ({} days) ---", summary.days);
    println!(
        "  Daily average: {:.0} kcal, P {:.0} g, C {:.0} g, F {:.0} g, \
         fiber {:.0} g, sodium {:.0} mg",
        avg.calories, avg.protein, avg.carbs, avg.fat, avg.fiber, avg.sodium
    );
    if !summary.strengths.is_empty() {
        println!("  Strengths: {}", summary.strengths.join(", "));
    }
    for d in &summary.deficiencies {
        println!(
            "  {:?} {}: {:.0} of {:.0}",
            d.severity, d.nutrient, d.current_amount, d.target_amount
        );
    }
    for line in &summary.recommendations {
        println!("  * {}", line);
    }
}

pub fn display_validation(report: &ValidationReport) {
    if report.errors.is_empty() && report.warnings.is_empty() {
        return;
    }
    println!();
    println!("--- Validation ---");
    for issue in &report.errors {
        println!("  error   {}: {}", issue.location, issue.message);
    }
    for issue in &report.warnings {
        println!("  warning {}: {}", issue.location, issue.message);
    }
}

/// Display a meal plan week by week.
pub fn display_meal_plan(plan: &MealPlan) {
    println!();
    println!(
        "=== {} plan - {:.0} kcal/day ===",
        plan.dietary_approach.name, plan.energy_needs.target_calories
    );

    for week in &plan.weeks {
        println!();
        println!("Week {}", week.week_number);
        for day in &week.days {
            display_day(day);
        }
        println!();
        display_shopping_list(&week.shopping_list);
        display_weekly_nutrition(&week.weekly_nutrition);
    }

    display_validation(&plan.validation);

    println!();
    println!("--- Summary ---");
    println!("Plan id: {}", plan.id);
    println!("Meals planned: {}", plan.assignment_count());
    println!("Empty slots: {}", plan.failure_count());
    println!("Status: {:?}", plan.status);
    println!();
}
