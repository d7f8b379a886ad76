//! Command-line arguments.

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dwh-bucket-provisioner",
    version,
    about = "Provision the data-warehouse schema bucket and upload generated schema files"
)]
pub struct Cli {
    /// Deployment configuration file (TOML). Built-in defaults are used when omitted.
    #[arg(short, long, global = true, env = "DWH_PROVISIONER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Resolve stack outputs from these values instead of CloudFormation
    #[arg(
        long = "stack-output",
        value_name = "STACK/OUTPUT=VALUE",
        value_parser = parse_stack_output,
        global = true
    )]
    pub stack_outputs: Vec<StackOutputOverride>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the composed bucket policy as JSON
    Policy,
    /// Show what would be provisioned and uploaded
    Plan(PlanArgs),
    /// Provision the bucket and upload files
    Apply(ApplyArgs),
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Date used for upload keys (defaults to today, local time)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Print the plan as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Date used for upload keys (defaults to today, local time)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Apply without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Log every step without calling AWS
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOutputOverride {
    pub stack: String,
    pub output: String,
    pub value: String,
}

/// Parse `STACK/OUTPUT=VALUE`. The stack name may itself contain `/`.
pub fn parse_stack_output(raw: &str) -> Result<StackOutputOverride, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected STACK/OUTPUT=VALUE, got '{raw}'"))?;
    let (stack, output) = key
        .rsplit_once('/')
        .ok_or_else(|| format!("expected STACK/OUTPUT before '=', got '{key}'"))?;

    if stack.is_empty() || output.is_empty() || value.is_empty() {
        return Err(format!("stack, output and value must be non-empty in '{raw}'"));
    }

    Ok(StackOutputOverride {
        stack: stack.to_string(),
        output: output.to_string(),
        value: value.to_string(),
    })
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("invalid date '{raw}': {e}"))
}
