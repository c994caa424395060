mod cli;

use std::fs;

use anyhow::Context;
use cadence_core::clock::{Clock, FixedClock, SystemClock};
use cadence_core::config::{Settings, load_config};
use cadence_recur::{next_occurrence, occurrences};
use cadence_service::recurrence::RecurrenceService;
use cadence_service::task::TaskItem;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use crate::cli::{Cli, Command, CompleteArgs, NextArgs, build_rule, parse_instant};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let settings = load_config()?;

    tracing::debug!(config = ?settings, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(settings.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %settings.logging.level, "Invalid log level in config, keeping info");
    }

    match cli.command {
        Command::Next(args) => run_next(&args, &settings),
        Command::Complete(args) => run_complete(&args),
    }
}

fn run_next(args: &NextArgs, settings: &Settings) -> anyhow::Result<()> {
    let rule = build_rule(args, &settings.recurrence)?;
    let reference = match &args.from {
        Some(value) => parse_instant(value)?,
        None => SystemClock.now(),
    };

    tracing::info!(%rule, %reference, count = args.count, "Evaluating recurrence");

    if args.json {
        println!("{}", serde_json::to_string(&rule)?);
    }

    if !rule.repeats() {
        println!("{}", next_occurrence(&rule, reference, &SystemClock)?);
        return Ok(());
    }

    for occurrence in occurrences(&rule, reference, &SystemClock).take(args.count) {
        println!("{}", occurrence?);
    }

    Ok(())
}

fn run_complete(args: &CompleteArgs) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&args.task)
        .with_context(|| format!("reading {}", args.task.display()))?;
    let task: TaskItem = serde_json::from_str(&raw)
        .with_context(|| format!("parsing task from {}", args.task.display()))?;
    let clock: Box<dyn Clock> = match &args.at {
        Some(value) => Box::new(FixedClock(parse_instant(value)?)),
        None => Box::new(SystemClock),
    };

    let completion = RecurrenceService::new(clock.as_ref()).complete(&task)?;

    println!("{}", serde_json::to_string_pretty(&completion)?);
    Ok(())
}
