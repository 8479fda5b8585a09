use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// MetaFit planner: builds seven-day meal plans that hit calorie and macro
/// targets while rotating foods.
#[derive(Parser, Debug)]
#[command(name = "metafit_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Food catalog, JSON array or `.csv`.
    #[arg(short, long, default_value = "foods.json", global = true)]
    pub foods: String,

    /// Optional JSON file with engine settings.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format: compact or pretty.
    #[arg(long, default_value = "compact", global = true)]
    pub log_format: String,
}

/// Macro overrides in grams.
#[derive(Args, Debug, Clone, Default)]
pub struct MacroArgs {
    /// Protein target in grams.
    #[arg(long)]
    pub protein: Option<f64>,

    /// Carbohydrate target in grams.
    #[arg(long)]
    pub carbs: Option<f64>,

    /// Fat target in grams.
    #[arg(long)]
    pub fat: Option<f64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Daily calorie target (1000-5000).
    #[arg(long)]
    pub calories: Option<u32>,

    /// male or female.
    #[arg(long)]
    pub gender: Option<String>,

    #[command(flatten)]
    pub macros: MacroArgs,

    /// First day of the plan, YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    pub start_date: Option<String>,

    /// Write the plan as JSON.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the plan as CSV, one row per item.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Prompt for anything not given on the command line.
    #[arg(short, long)]
    pub interactive: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a seven-day meal plan.
    Generate(GenerateArgs),

    /// Show daily macro targets without generating a plan.
    Macros {
        #[arg(long)]
        calories: u32,

        #[arg(long)]
        gender: String,

        #[command(flatten)]
        macros: MacroArgs,
    },

    /// Search the food catalog by name or brand.
    Search {
        query: String,

        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Generate(GenerateArgs {
            interactive: true,
            ..GenerateArgs::default()
        })
    }
}
