use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use meal_planner_rs::catalog::{
    load_ingredients, load_recipes, save_plan, write_shopping_csv, InMemoryIngredientRegistry,
    InMemoryRecipeCatalog,
};
use meal_planner_rs::cli::{Cli, Command, ProfileArgs};
use meal_planner_rs::config::{PlannerConfig, SelectionStrategy};
use meal_planner_rs::diets::DietaryApproachRegistry;
use meal_planner_rs::error::{PlanError, Result};
use meal_planner_rs::interface::{
    collect_profile, display_approaches, display_body_metrics, display_energy,
    display_meal_plan, prompt_approach, prompt_list, resolve_approach,
};
use meal_planner_rs::models::UserProfile;
use meal_planner_rs::planner::{
    approach_macro_targets, bmi, bmi_category, energy_needs, ideal_weight_range,
    weight_change_timeline, FastingDaySpec, MealPlanner, PlanRequest,
};

fn main() {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();
    let registry = DietaryApproachRegistry::new();

    match command {
        Command::Plan {
            profile,
            approach,
            recipes,
            ingredients,
            config,
            exclude,
            allergy,
            days,
            fasting_days,
            start,
            output,
            shopping_csv,
            seed,
            top_n,
        } => {
            let mut config = match config {
                Some(path) => PlannerConfig::from_file(path)?,
                None => PlannerConfig::default(),
            };
            if let Some(seed) = seed {
                config.selection = SelectionStrategy::SeededTopN { n: top_n, seed };
                config.validate()?;
            }

            let profile = collect_profile(profile.to_partial())?;
            let approach_id = choose_approach(&registry, approach.as_deref())?;

            let exclude = if exclude.is_empty() {
                prompt_list("Exclude ingredients or tags (comma separated, Enter for none)")?
            } else {
                exclude
            };

            let mut request = PlanRequest::new(profile, &approach_id);
            request.excluded = exclude;
            request.allergies = allergy;
            request.horizon_days = days;
            if !fasting_days.is_empty() {
                request.fasting = Some(FastingDaySpec {
                    weekday_indices: fasting_days,
                });
            }
            if let Some(start) = start {
                request.start_date = start;
            }

            cmd_plan(
                &registry,
                &request,
                config,
                Path::new(&recipes),
                Path::new(&ingredients),
                output.as_deref(),
                shopping_csv.as_deref(),
            )
        }
        Command::Energy {
            profile,
            approach,
            target_weight,
        } => cmd_energy(&registry, &profile, approach.as_deref(), target_weight),
        Command::Diets => {
            display_approaches(&registry.all());
            Ok(())
        }
    }
}

fn choose_approach(registry: &DietaryApproachRegistry, given: Option<&str>) -> Result<String> {
    match given {
        Some(input) => resolve_approach(registry, input),
        None => prompt_approach(registry),
    }
}

/// Load the catalog files, generate the plan and write the requested outputs.
fn cmd_plan(
    registry: &DietaryApproachRegistry,
    request: &PlanRequest,
    config: PlannerConfig,
    recipes_path: &Path,
    ingredients_path: &Path,
    output: Option<&str>,
    shopping_csv: Option<&str>,
) -> Result<()> {
    for path in [recipes_path, ingredients_path] {
        if !path.exists() {
            return Err(PlanError::InvalidInput(format!(
                "catalog file not found: {}",
                path.display()
            )));
        }
    }

    let catalog = InMemoryRecipeCatalog::new(load_recipes(recipes_path)?);
    let ingredients = InMemoryIngredientRegistry::new(load_ingredients(ingredients_path)?);
    println!(
        "Loaded {} recipes and {} ingredients",
        catalog.len(),
        ingredients.len()
    );
    println!("Config: {}", config.display());

    let planner = MealPlanner::new(registry, &catalog, &ingredients).with_config(config);
    let plan = planner.generate_plan(request)?;

    display_meal_plan(&plan);

    if let Some(path) = output {
        save_plan(path, &plan)?;
        println!("Plan saved to {}", path);
    }
    if let Some(path) = shopping_csv {
        write_shopping_csv(path, &plan)?;
        println!("Shopping list saved to {}", path);
    }

    Ok(())
}

/// Energy needs, macro targets and body metrics for a profile.
fn cmd_energy(
    registry: &DietaryApproachRegistry,
    profile_args: &ProfileArgs,
    approach: Option<&str>,
    target_weight: Option<f64>,
) -> Result<()> {
    let profile: UserProfile = collect_profile(profile_args.to_partial())?;
    let needs = energy_needs(&profile)?;

    let targets = match approach {
        Some(input) => {
            let id = resolve_approach(registry, input)?;
            Some(approach_macro_targets(&profile, registry.get(&id)?)?)
        }
        None => None,
    };
    display_energy(&needs, targets.as_ref());

    let body_mass_index = bmi(profile.weight_kg, profile.height_cm);
    let timeline = target_weight
        .and_then(|target| weight_change_timeline(profile.weight_kg, target, needs.deficit));
    display_body_metrics(
        body_mass_index,
        bmi_category(body_mass_index),
        ideal_weight_range(profile.height_cm),
        timeline.as_ref(),
    );
    Ok(())
}
