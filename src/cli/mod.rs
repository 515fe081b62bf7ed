// Command-line interface

pub mod commands;

use crate::gateway::ExportFormat;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "craving")]
#[command(
    about = "Craving - match a free-text craving to a recipe and analyze its ingredients",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Load the model and build the index before accepting requests
        #[arg(long)]
        warm: bool,
    },

    /// Resolve a craving to the closest catalog recipe
    Resolve {
        /// Free-text description of what you are in the mood for
        query: String,
    },

    /// Resolve a craving, then fetch ingredient matches and nutrition
    Analyze {
        /// Free-text description of what you are in the mood for
        query: String,
    },

    /// Fetch ingredient matches and nutrition for a recipe name
    Predict {
        /// Recipe name
        recipe: String,
    },

    /// List catalog recipe names
    Recipes {
        /// Maximum number of names to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export ingredient matches for a recipe to a file
    Export {
        /// Recipe name
        recipe: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output directory
        #[arg(short, long)]
        output: Option<String>,
    },
}
