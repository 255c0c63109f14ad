#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use statboard::client::StatisticsClient;
use statboard::clock::epoch_to_unix_milliseconds;
use statboard::config;
use statboard::config::load_configuration;
use statboard::datamodel::{ScenarioInstance, StatisticDescriptor};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "statboard",
    about = "Fetch job statistics and publish dashboards for them"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the statistics available for a project
    Names { project: String },

    /// List the statistics and suffixes recorded for a job instance
    Suffixes { job_id: i64 },

    /// Print the statistics origin of a job instance, in epoch milliseconds
    Origin { job_id: i64 },

    /// Fetch the values of one statistic
    Stats {
        job_id: i64,
        name: String,

        /// Sub-series to select
        #[arg(long, default_value = "")]
        suffix: String,

        /// Time offset in milliseconds; zero is a valid origin
        #[arg(long)]
        origin: Option<i64>,

        /// Request a histogram with this many buckets
        #[arg(long, conflicts_with = "comparative")]
        histogram: Option<u32>,

        /// Request comparative aggregation
        #[arg(long)]
        comparative: bool,
    },

    /// Build a dashboard from a JSON file of statistic descriptors and
    /// publish it
    Dashboard {
        /// Path to a JSON array of statistic descriptors
        descriptors: PathBuf,

        /// Owning scenario instance identifier
        #[arg(long)]
        instance_id: i64,

        /// Scenario start date, ISO 8601
        #[arg(long)]
        start_date: String,

        /// Merge statistics sharing job and unit onto one chart
        #[arg(long)]
        grouped: bool,
    },
}

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    load_configuration().context("Failed to load configuration")?;
    let config = config::get().context("Failed to get configuration")?;

    // Initialize Sentry if DSN is provided
    let _sentry = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let client = StatisticsClient::from_config(&config)?;

    match cli.command {
        Command::Names { project } => print_json(&client.statistic_names(&project).await?),
        Command::Suffixes { job_id } => print_json(&client.statistic_suffixes(job_id).await?),
        Command::Origin { job_id } => {
            let origin = client.statistics_origin(job_id).await;
            println!("{}", epoch_to_unix_milliseconds(origin));
            Ok(())
        }
        Command::Stats {
            job_id,
            name,
            suffix,
            origin,
            histogram,
            comparative,
        } => {
            if let Some(buckets) = histogram {
                print_json(
                    &client
                        .statistics_histogram(job_id, &name, &suffix, buckets)
                        .await?,
                )
            } else if comparative {
                print_json(&client.statistics_comparative(job_id, &name, &suffix).await?)
            } else {
                print_json(&client.statistics(job_id, &name, &suffix, origin).await?)
            }
        }
        Command::Dashboard {
            descriptors,
            instance_id,
            start_date,
            grouped,
        } => {
            let text = std::fs::read_to_string(&descriptors)
                .with_context(|| format!("Failed to read {}", descriptors.display()))?;
            let descriptors: Vec<StatisticDescriptor> = serde_json::from_str(&text)
                .context("Failed to parse statistic descriptors")?;
            let instance = ScenarioInstance::new(instance_id, start_date);
            print_json(&client.create_dashboard(&instance, &descriptors, grouped).await?)
        }
    }
}

fn print_json<M: Serialize>(value: &M) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
