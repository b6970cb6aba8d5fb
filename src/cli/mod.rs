// src/cli/mod.rs — CLI definition (clap derive)

pub mod analyze;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::usage::Plan;

#[derive(Parser)]
#[command(
    name = "lucidra",
    about = "Scenario analysis with quota-governed AI and an offline coach",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Host to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
    },
    /// Analyze one scenario from the command line
    Analyze {
        /// Scenario text
        #[arg(required = true, trailing_var_arg = true)]
        scenario: Vec<String>,
        /// Plan tier for the ad-hoc session
        #[arg(long)]
        plan: Option<Plan>,
        /// Opt in to AI analysis (otherwise only the coach answers)
        #[arg(long)]
        opt_in: bool,
        /// Provider to try first
        #[arg(long)]
        provider: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print general coaching tips
    Tips,
}
