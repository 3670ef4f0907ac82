//! CLI argument parsing for the trip-planner binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hos-trip-planner", about = "HOS-compliant interstate trip planner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Plan a trip from a JSON request (default if no subcommand given).
    Plan {
        /// Path to a JSON-encoded `PlanTripRequest`. Reads stdin if omitted.
        #[arg(long)]
        request: Option<PathBuf>,

        /// Rule-set tag to apply, overriding `DEFAULT_RULE_SET`.
        #[arg(long)]
        rule_set: Option<String>,
    },
}
