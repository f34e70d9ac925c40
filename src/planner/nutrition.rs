use crate::config::PlannerConfig;
use crate::models::{
    DayPlan, DietaryApproach, MacroTargets, NutritionalDeficiency, Nutrition, Severity,
    WeeklyNutrition,
};
use crate::planner::constants::{
    mineral_target, vitamin_letter, vitamin_target, CRITICAL_IMPORTANCE, FIBER_TARGET_GRAMS,
    MAX_STRENGTHS, SODIUM_EXCESS_FACTOR, SODIUM_LIMIT_MG,
};

pub const CALORIES: &str = "Calories";
pub const PROTEIN: &str = "Protein";
pub const CARBOHYDRATES: &str = "Carbohydrates";
pub const FAT: &str = "Fat";
pub const FIBER: &str = "Fiber";
pub const SODIUM: &str = "Sodium";

// ─────────────────────────────────────────────────────────────────────────────
// Advice
// ─────────────────────────────────────────────────────────────────────────────

fn advice(nutrient: &str) -> Vec<String> {
    let lines: &[&str] = match nutrient {
        CALORIES => &["Increase portion sizes", "Add a nutrient-dense snack"],
        PROTEIN => &[
            "Add more protein-rich foods",
            "Consider protein supplements",
            "Include lean meats, fish, eggs, or legumes",
        ],
        CARBOHYDRATES => &[
            "Include more whole grains",
            "Add fruits and vegetables",
            "Consider complex carbs for sustained energy",
        ],
        FAT => &[
            "Add healthy fats like nuts, seeds, avocados",
            "Include fatty fish",
            "Use olive oil for cooking",
        ],
        FIBER => &[
            "Increase vegetable intake",
            "Add more whole grains",
            "Include legumes and nuts",
            "Eat fruits with skin",
        ],
        SODIUM => &[
            "Reduce processed foods",
            "Use herbs and spices instead of salt",
            "Read nutrition labels",
            "Cook more meals from scratch",
        ],
        _ => &[],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

/// A nutrient compared against its daily target.
#[derive(Debug, Clone)]
struct Check {
    nutrient: String,
    current: f64,
    target: f64,
    critical: bool,
    advice: Vec<String>,
}

impl Check {
    fn coverage(&self) -> f64 {
        if self.target <= 0.0 {
            1.0
        } else {
            self.current / self.target
        }
    }
}

/// Severity for a coverage ratio, `None` when the target is met closely enough.
pub fn deficiency_severity(
    coverage: f64,
    critical: bool,
    config: &PlannerConfig,
) -> Option<Severity> {
    if coverage >= config.deficiency_threshold {
        None
    } else if coverage < config.severe_deficiency_threshold {
        Some(Severity::High)
    } else if critical {
        Some(Severity::Medium)
    } else {
        Some(Severity::Low)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Weekly averages, deficiencies, strengths and advice for a run of days.
///
/// Targets come from the plan's macro targets, scaled down on fasting days by
/// `fasting_scale`. Micronutrients are only judged when recipes report them.
pub fn weekly_nutrition(
    days: &[DayPlan],
    targets: &MacroTargets,
    approach: &DietaryApproach,
    fasting_scale: f64,
    config: &PlannerConfig,
) -> WeeklyNutrition {
    if days.is_empty() {
        return WeeklyNutrition::default();
    }

    let mut weekly_totals = Nutrition::default();
    for day in days {
        weekly_totals.accumulate(&day.totals);
    }
    let daily_average = weekly_totals.scaled(1.0 / days.len() as f64);

    // Mean of each day's scale, so fasting days lower the bar proportionally.
    let scale = days
        .iter()
        .map(|d| if d.fasting_day { fasting_scale } else { 1.0 })
        .sum::<f64>()
        / days.len() as f64;

    let is_critical = |nutrient: &str| approach.priority_of(nutrient) >= CRITICAL_IMPORTANCE;
    let check = |nutrient: &str, current: f64, target: f64, critical: bool| Check {
        nutrient: nutrient.to_string(),
        current,
        target,
        critical,
        advice: advice(nutrient),
    };

    let mut checks = vec![
        check(CALORIES, daily_average.calories, targets.calories * scale, true),
        check(PROTEIN, daily_average.protein, targets.protein_grams * scale, true),
        check(
            CARBOHYDRATES,
            daily_average.carbs,
            targets.carb_grams * scale,
            is_critical(CARBOHYDRATES),
        ),
        check(FAT, daily_average.fat, targets.fat_grams * scale, is_critical(FAT)),
        check(FIBER, daily_average.fiber, FIBER_TARGET_GRAMS, is_critical(FIBER)),
    ];

    for (key, amount) in &daily_average.vitamins {
        if let Some(target) = vitamin_target(key) {
            let name = format!("Vitamin {}", vitamin_letter(key));
            checks.push(Check {
                critical: is_critical(&name),
                nutrient: name,
                current: *amount,
                target: target.amount,
                advice: vec![target.advice.to_string()],
            });
        }
    }
    for (key, amount) in &daily_average.minerals {
        // Sodium is judged as an upper limit below.
        if key.eq_ignore_ascii_case(SODIUM) {
            continue;
        }
        if let Some(target) = mineral_target(key) {
            let name = capitalize(&key.to_lowercase());
            checks.push(Check {
                critical: is_critical(&name),
                nutrient: name,
                current: *amount,
                target: target.amount,
                advice: vec![target.advice.to_string()],
            });
        }
    }

    let mut deficiencies: Vec<NutritionalDeficiency> = checks
        .iter()
        .filter_map(|c| {
            let severity = deficiency_severity(c.coverage(), c.critical, config)?;
            Some(NutritionalDeficiency {
                nutrient: c.nutrient.clone(),
                current_amount: c.current,
                target_amount: c.target,
                severity,
                recommendations: c.advice.clone(),
            })
        })
        .collect();

    if daily_average.sodium > SODIUM_LIMIT_MG * SODIUM_EXCESS_FACTOR {
        deficiencies.push(NutritionalDeficiency {
            nutrient: SODIUM.to_string(),
            current_amount: daily_average.sodium,
            target_amount: SODIUM_LIMIT_MG,
            severity: Severity::High,
            recommendations: advice(SODIUM),
        });
    }

    // Worst first; stable for equal severity.
    deficiencies.sort_by(|a, b| b.severity.cmp(&a.severity));

    let mut strong: Vec<&Check> = checks.iter().filter(|c| c.coverage() >= 1.0).collect();
    strong.sort_by(|a, b| b.coverage().total_cmp(&a.coverage()));
    let strengths = strong
        .into_iter()
        .take(MAX_STRENGTHS)
        .map(|c| c.nutrient.clone())
        .collect();

    WeeklyNutrition {
        days: days.len() as u32,
        daily_average,
        weekly_totals,
        recommendations: recommendations(&deficiencies),
        deficiencies,
        strengths,
    }
}

/// One line per medium or high deficiency.
pub fn recommendations(deficiencies: &[NutritionalDeficiency]) -> Vec<String> {
    deficiencies
        .iter()
        .filter_map(|d| {
            let name = d.nutrient.to_lowercase();
            if d.current_amount > d.target_amount {
                return Some(format!("Reduce {} intake", name));
            }
            match d.severity {
                Severity::High => Some(format!("Consider supplementing {}", name)),
                Severity::Medium => Some(format!("Increase {} intake through food choices", name)),
                Severity::Low => None,
            }
        })
        .collect()
}
