use clap::Args;

use crate::catalog::store::{open_store, StoreConfig};
use crate::cli::OutputFormat;
use crate::core::exercise::Exercise;
use crate::core::selection::Selection;
use crate::matching::engine::{PlanConfig, PlanGenerator, WorkoutPlan, DEFAULT_MAX_EXERCISES};

#[derive(Args)]
pub struct PlanArgs {
    /// Exercise type to include (repeatable, OR'd)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// Sport to include (repeatable, OR'd)
    #[arg(short = 's', long = "sport", value_name = "SPORT")]
    pub sports: Vec<String>,

    /// Muscle target to include (repeatable, OR'd)
    #[arg(short = 'm', long = "muscle", value_name = "MUSCLE")]
    pub muscle_targets: Vec<String>,

    /// Maximum number of exercises in the plan
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_MAX_EXERCISES as u32,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_exercises: u32,
}

impl PlanArgs {
    pub fn selection(&self) -> Selection {
        Selection::new(
            self.types.clone(),
            self.sports.clone(),
            self.muscle_targets.clone(),
        )
    }
}

/// Generate and print a workout plan
///
/// # Errors
///
/// Returns an error if the store cannot be opened or queried.
pub fn run(args: PlanArgs, store_config: &StoreConfig, format: OutputFormat) -> anyhow::Result<()> {
    let plan = super::runtime()?.block_on(async {
        let store = open_store(store_config).await?;
        let config = PlanConfig {
            max_exercises: args.max_exercises as usize,
        };
        let plan = PlanGenerator::with_config(store.as_ref(), config)
            .generate(&args.selection())
            .await?;
        anyhow::Ok(plan)
    })?;

    match format {
        OutputFormat::Text => print!("{}", format_text(&plan)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Tsv => print!("{}", format_tsv(&plan.exercises)),
    }

    Ok(())
}

fn format_text(plan: &WorkoutPlan) -> String {
    if let Some(message) = &plan.message {
        return format!("{message}\n");
    }

    let mut out = String::from("Your workout:\n");
    for (i, exercise) in plan.exercises.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", i + 1, exercise.name));
        out.push_str(&format!("   Types:     {}\n", exercise.types.join(", ")));
        if !exercise.sports.is_empty() {
            out.push_str(&format!("   Sports:    {}\n", exercise.sports.join(", ")));
        }
        out.push_str(&format!(
            "   Targets:   {}\n",
            exercise.muscle_targets.join(", ")
        ));
        out.push_str(&format!("   Equipment: {}\n", exercise.equipment.join(", ")));
        out.push_str(&format!("   Video:     {}\n", exercise.reference_link));
    }
    out
}

/// One exercise per line, tag lists comma-separated
pub(crate) fn format_tsv(exercises: &[Exercise]) -> String {
    let mut out = String::from("name\ttypes\tsports\tmuscle_targets\tequipment\treference_link\n");
    for e in exercises {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
            e.name,
            e.types.join(","),
            e.sports.join(","),
            e.muscle_targets.join(","),
            e.equipment.join(","),
            e.reference_link
        ));
    }
    out
}
