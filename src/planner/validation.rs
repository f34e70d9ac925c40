use crate::config::PlannerConfig;
use crate::models::{PlanStatus, ValidationIssue, ValidationReport, WeekPlan};

/// The user's daily calorie goal that each day is judged against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieGoal {
    pub daily_calories: f64,
    /// Fraction of `daily_calories` eaten on a fasting day.
    pub fasting_scale: f64,
}

impl CalorieGoal {
    pub fn for_day(&self, fasting: bool) -> f64 {
        if fasting {
            self.daily_calories * self.fasting_scale
        } else {
            self.daily_calories
        }
    }
}

fn location(week_number: u32, day_number: u32) -> String {
    format!("week{}.day{}", week_number, day_number)
}

/// Check every slot was filled and every day lands near the user's calorie goal.
///
/// Failed slots are errors; days further than `calorie_tolerance` from the goal
/// are warnings. The goal is the plan's energy target, not the sum of the
/// approach's portion sizes, which can sit far from it.
pub fn validate_weeks(
    weeks: &[WeekPlan],
    goal: CalorieGoal,
    config: &PlannerConfig,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    for week in weeks {
        for day in &week.days {
            let here = location(week.week_number, day.day_number);
            for failure in &day.failures {
                report.errors.push(ValidationIssue {
                    location: format!("{}.{}", here, failure.meal_type),
                    message: failure.reason.clone(),
                });
            }

            let target = goal.for_day(day.fasting_day);
            if target <= 0.0 {
                continue;
            }
            let deviation = (day.totals.calories - target) / target;
            if deviation.abs() > config.calorie_tolerance {
                report.warnings.push(ValidationIssue {
                    location: here,
                    message: format!(
                        "{:.0} kcal is {:+.0}% from the {:.0} kcal target",
                        day.totals.calories,
                        deviation * 100.0,
                        target
                    ),
                });
            }
        }
    }

    report
}

pub fn status_for(report: &ValidationReport) -> PlanStatus {
    if report.is_valid() {
        PlanStatus::Validated
    } else {
        PlanStatus::Generated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayPlan, MealType, Nutrition, SlotFailure};
    use chrono::NaiveDate;

    fn day(day_number: u32, calories: f64) -> DayPlan {
        let mut day = DayPlan::new(
            NaiveDate::from_ymd_opt(2026, 3, 1 + day_number).unwrap(),
            day_number,
            false,
            2000.0,
        );
        day.totals = Nutrition::new(calories, 0.0, 0.0, 0.0);
        day
    }

    fn goal() -> CalorieGoal {
        CalorieGoal {
            daily_calories: 2000.0,
            fasting_scale: 0.25,
        }
    }

    fn week(days: Vec<DayPlan>) -> WeekPlan {
        WeekPlan {
            week_number: 1,
            days,
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_week_is_validated() {
        let weeks = [week(vec![day(1, 2000.0), day(2, 1700.0)])];
        let report = validate_weeks(&weeks, goal(), &PlannerConfig::default());
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(status_for(&report), PlanStatus::Validated);
    }

    #[test]
    fn test_calorie_drift_is_a_warning() {
        let weeks = [week(vec![day(1, 1500.0), day(2, 2500.0)])];
        let report = validate_weeks(&weeks, goal(), &PlannerConfig::default());
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.warnings[0].location, "week1.day1");
        assert!(report.warnings[0].message.contains("-25%"));
        assert_eq!(status_for(&report), PlanStatus::Validated);
    }

    #[test]
    fn test_failed_slot_is_an_error() {
        let mut broken = day(3, 2000.0);
        broken.failures.push(SlotFailure {
            meal_type: MealType::Dinner,
            reason: "catalog has no recipes for this meal type".to_string(),
        });
        let report = validate_weeks(&[week(vec![broken])], goal(), &PlannerConfig::default());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].location, "week1.day3.dinner");
        assert_eq!(status_for(&report), PlanStatus::Generated);
    }

    #[test]
    fn test_goal_is_the_energy_target_not_the_portions() {
        // Portions sum to 2000 and the day hits them, but the user needs 3500.
        let weeks = [week(vec![day(1, 2000.0)])];
        let goal = CalorieGoal {
            daily_calories: 3500.0,
            fasting_scale: 1.0,
        };
        let report = validate_weeks(&weeks, goal, &PlannerConfig::default());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("3500 kcal target"));
        assert!(report.warnings[0].message.contains("-43%"));
    }

    #[test]
    fn test_fasting_day_judged_against_scaled_goal() {
        let mut fasting = day(1, 500.0);
        fasting.fasting_day = true;
        let normal = day(2, 500.0);
        let report =
            validate_weeks(&[week(vec![fasting, normal])], goal(), &PlannerConfig::default());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].location, "week1.day2");
    }
}
