use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::defaults;
use crate::catalog::facets::FacetOptions;
use crate::catalog::store::{open_store, StoreConfig};
use crate::cli::plan::format_tsv;
use crate::cli::OutputFormat;
use crate::core::exercise::Exercise;
use crate::core::types::Facet;
use crate::matching::predicate::Predicate;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List every exercise in the store
    List,

    /// Show the selectable values of each facet
    Facets,

    /// Write the built-in default catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,
    },
}

/// Run a catalog subcommand
///
/// # Errors
///
/// Returns an error if the store cannot be opened or queried, or the export
/// file cannot be written.
pub fn run(args: CatalogArgs, store_config: &StoreConfig, format: OutputFormat) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List => {
            let exercises = load_all(store_config)?;
            print_exercises(&exercises, format)?;
        }
        CatalogCommands::Facets => {
            let exercises = load_all(store_config)?;
            print_facets(&FacetOptions::from_exercises(&exercises), format)?;
        }
        CatalogCommands::Export { output } => {
            std::fs::write(&output, defaults::embedded_json())?;
            eprintln!("Exported default catalog to {}", output.display());
        }
    }

    Ok(())
}

fn load_all(store_config: &StoreConfig) -> anyhow::Result<Vec<Exercise>> {
    super::runtime()?.block_on(async {
        let store = open_store(store_config).await?;
        let mut exercises = store.query(&Predicate::always()).await?;
        exercises.sort_by(|a, b| a.name.cmp(&b.name));
        anyhow::Ok(exercises)
    })
}

fn print_exercises(exercises: &[Exercise], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Exercises in catalog ({}):\n", exercises.len());
            for e in exercises {
                println!("  {:<40} {}", e.name, e.types.join(", "));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "count": exercises.len(),
                "exercises": exercises,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => print!("{}", format_tsv(exercises)),
    }
    Ok(())
}

fn print_facets(options: &FacetOptions, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for facet in Facet::ALL {
                println!("{facet}: {}", options.values(facet).join(", "));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(options)?),
        OutputFormat::Tsv => {
            println!("facet\tvalue");
            for facet in Facet::ALL {
                for value in options.values(facet) {
                    println!("{}\t{value}", facet.field_name());
                }
            }
        }
    }
    Ok(())
}
