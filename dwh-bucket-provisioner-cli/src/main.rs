//! Standalone CLI for the data-warehouse bucket provisioner.

mod args;
mod output;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use log::{debug, info};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use args::{ApplyArgs, Cli, Command, PlanArgs, StackOutputOverride};
use dwh_bucket_provisioner_core::{
    caller_account_id, load_sdk_config, ApplyOptions, AwsS3Client, BucketProvisionerService,
    ProvisionConfig, SdkConfig, StaticStackOutputs,
};

/// Exit code when the user declines, or confirmation cannot be obtained.
const EXIT_REFUSED: u8 = 2;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

async fn load_config(cli: &Cli) -> Result<ProvisionConfig> {
    match &cli.config {
        Some(path) => ProvisionConfig::load(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => {
            debug!("No configuration file given, using built-in defaults");
            Ok(ProvisionConfig::default())
        }
    }
}

fn build_service(
    sdk_config: &SdkConfig,
    overrides: &[StackOutputOverride],
) -> BucketProvisionerService {
    if overrides.is_empty() {
        return BucketProvisionerService::from_sdk_config(sdk_config);
    }

    let mut outputs = StaticStackOutputs::new();
    for o in overrides {
        outputs.insert(&o.stack, &o.output, &o.value);
    }
    info!("Resolving stack outputs from {} command-line value(s)", overrides.len());
    BucketProvisionerService::new(Arc::new(outputs), Arc::new(AwsS3Client::new(sdk_config)))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

async fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N]: ");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read confirmation")?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "YES"))
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli).await?;
    let sdk_config = load_sdk_config().await;
    let service = build_service(&sdk_config, &cli.stack_outputs);

    match cli.command {
        Command::Policy => {
            let policy = service
                .compose_policy(&config)
                .await
                .context("Failed to compose bucket policy")?;
            println!("{}", serde_json::to_string_pretty(&policy)?);
        }
        Command::Plan(PlanArgs { date, json }) => {
            let plan = service
                .plan(&config, date.unwrap_or_else(today))
                .await
                .context("Failed to create plan")?;
            output::print_plan(&plan);
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            }
        }
        Command::Apply(ApplyArgs { date, yes, dry_run }) => {
            let plan = service
                .plan(&config, date.unwrap_or_else(today))
                .await
                .context("Failed to create plan")?;
            output::print_plan(&plan);

            if !dry_run {
                if !yes && !atty::is(atty::Stream::Stdin) {
                    eprintln!(
                        "Refusing to apply without confirmation: run interactively in a TTY or pass --yes"
                    );
                    return Ok(ExitCode::from(EXIT_REFUSED));
                }

                let account = caller_account_id(&sdk_config)
                    .await
                    .context("Failed to determine the target AWS account")?;
                info!("Applying to account {}", account);

                if !yes {
                    let prompt = format!(
                        "Apply to bucket {} in account {}?",
                        plan.bucket.name, account
                    );
                    if !confirm(&prompt).await? {
                        eprintln!("Aborted");
                        return Ok(ExitCode::from(EXIT_REFUSED));
                    }
                }
            }

            let result = service
                .apply(&plan, ApplyOptions { dry_run })
                .await
                .context("Failed to apply plan")?;
            output::print_result(&result);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
