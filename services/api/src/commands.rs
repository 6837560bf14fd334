use crate::infra::{apply_overrides, catalog_for, parse_weight_override, WeightOverride};
use chrono::Utc;
use clap::Args;
use dauntless::config::{AppConfig, MissionConfig};
use dauntless::error::AppError;
use dauntless::telemetry;
use dauntless::workflows::mission::{
    optimal, render_text_report, simulate_cohort, Catalog, CohortReport, CohortRun,
    GreedyEstimate, LaunchRecord, MissionSession, MissionSnapshot, ResourceLimits, StoryId,
    Variability, Weights,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Load stories from a CSV file instead of the standard dataset
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the catalog as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LaunchArgs {
    /// Story to select (repeatable, e.g. --story S13 --story 14)
    #[arg(long = "story", required = true)]
    pub(crate) stories: Vec<String>,
    /// Weight override as CATEGORY=VALUE (repeatable)
    #[arg(long = "weight", value_parser = parse_weight_override)]
    pub(crate) weights: Vec<WeightOverride>,
    /// Variability level: 0 (off), 1 (±1), or 2 (±2)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub(crate) variability: Option<u8>,
    /// Seed for reproducible variability draws
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the launch record as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Write the selection snapshot JSON to this path
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Write the text report to this path
    #[arg(long)]
    pub(crate) report: Option<PathBuf>,
    /// Load stories from a CSV file instead of the standard dataset
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct OptimalArgs {
    /// Weight override as CATEGORY=VALUE (repeatable)
    #[arg(long = "weight", value_parser = parse_weight_override)]
    pub(crate) weights: Vec<WeightOverride>,
    /// Load stories from a CSV file instead of the standard dataset
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the estimate as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Number of simulated students
    #[arg(long, default_value_t = 1000)]
    pub(crate) runs: usize,
    /// Seed for a reproducible cohort
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Weight override as CATEGORY=VALUE (repeatable)
    #[arg(long = "weight", value_parser = parse_weight_override)]
    pub(crate) weights: Vec<WeightOverride>,
    /// Load stories from a CSV file instead of the standard dataset
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the cohort report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let config = load_config()?;
    let catalog = catalog_for(&config.mission, args.catalog.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(catalog.stories())?);
        return Ok(());
    }

    println!("SCV Dauntless story catalog ({} stories)", catalog.len());
    for story in catalog.stories() {
        let tags: Vec<&str> = story.tags.iter().map(|tag| tag.key()).collect();
        println!(
            "  {:<4} {:>3} RU {:>2} slot(s)  {} [{}]",
            story.id.as_str(),
            story.ru,
            story.slots,
            story.title,
            tags.join(", ")
        );
    }
    Ok(())
}

pub(crate) fn run_launch(args: LaunchArgs) -> Result<(), AppError> {
    let config = load_config()?;
    let catalog = Arc::new(catalog_for(&config.mission, args.catalog.as_deref())?);
    let weights = apply_overrides(config.mission.weights.clone(), &args.weights);
    let variability = args
        .variability
        .and_then(Variability::from_level)
        .unwrap_or(config.mission.variability);

    let mut session = MissionSession::new(catalog, ResourceLimits::STANDARD)
        .with_settings(weights, variability);
    for raw in &args.stories {
        if let Err(err) = session.add(&story_id(raw)) {
            eprintln!("skipping {}: {err}", raw.trim());
        }
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let record = session.launch(&mut rng)?.clone();

    if let Some(path) = &args.snapshot {
        let snapshot = MissionSnapshot::capture(&session, Utc::now());
        fs::write(path, snapshot.to_json_pretty()?)?;
    }
    if let Some(path) = &args.report {
        fs::write(path, render_text_report(&session, Utc::now()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        render_launch(&record);
    }
    Ok(())
}

pub(crate) fn run_optimal(args: OptimalArgs) -> Result<(), AppError> {
    let config = load_config()?;
    let (catalog, weights) = catalog_and_weights(&config.mission, args.catalog, &args.weights)?;
    let estimate = optimal::estimate(&catalog, &weights, ResourceLimits::STANDARD);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        render_estimate(&catalog, &estimate);
    }
    Ok(())
}

pub(crate) fn run_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let config = load_config()?;
    let (catalog, weights) = catalog_and_weights(&config.mission, args.catalog, &args.weights)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let report = simulate_cohort(
        &catalog,
        &weights,
        ResourceLimits::STANDARD,
        args.runs,
        &mut rng,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_cohort(&report);
    }
    Ok(())
}

/// Config plus logging, so catalog loading and session events reach stderr.
fn load_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

fn catalog_and_weights(
    mission: &MissionConfig,
    catalog: Option<PathBuf>,
    overrides: &[WeightOverride],
) -> Result<(Catalog, Weights), AppError> {
    let catalog = catalog_for(mission, catalog.as_deref())?;
    let weights = apply_overrides(mission.weights.clone(), overrides);
    Ok((catalog, weights))
}

/// Accepts `S13`, `s13`, or the bare card number `13`.
fn story_id(raw: &str) -> StoryId {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        StoryId::new(format!("S{trimmed}"))
    } else {
        StoryId::new(trimmed.to_ascii_uppercase())
    }
}

fn render_launch(record: &LaunchRecord) {
    let results = &record.results;
    println!(
        "{} - {} points ({})",
        results.outcome.label, results.total_score, results.outcome.range
    );
    println!("{}", results.outcome.description);
    println!(
        "Resources: {}/{} RU, {}/{} slots | Variability: {}",
        record.used.ru,
        record.limits.max_ru,
        record.used.slots,
        record.limits.max_slots,
        record.variability.label()
    );

    println!("\nCategory breakdown");
    for (category, value) in results.breakdown.iter() {
        println!("  {:<14} {:>4}", category.label(), value);
    }

    println!("\nShip systems");
    for system in &results.systems {
        println!(
            "  {:<14} {:<8} {:>4}  {}",
            system.system, system.status_label, system.score, system.comment
        );
    }

    println!("\nConsequences");
    for consequence in &results.consequences {
        println!("  [{}] {}", consequence.kind.label(), consequence.message);
    }
}

fn render_estimate(catalog: &Catalog, estimate: &GreedyEstimate) {
    println!(
        "Greedy estimate: {} points using {}/{} RU and {}/{} slots",
        estimate.estimated_score,
        estimate.used.ru,
        estimate.limits.max_ru,
        estimate.used.slots,
        estimate.limits.max_slots
    );
    println!("Note: {}", estimate.notice);
    for id in &estimate.stories {
        if let Some(story) = catalog.get(id) {
            println!(
                "  {:<4} {:>3} RU {:>2} slot(s)  {}",
                id.as_str(),
                story.ru,
                story.slots,
                story.title
            );
        }
    }
}

fn render_cohort(report: &CohortReport) {
    println!("SCV DAUNTLESS - COHORT SIMULATION ({} students)", report.runs);

    println!("\nOutcome distribution");
    for share in &report.outcomes {
        println!(
            "  {:<24} {:>5} ({:>3.0}%)",
            share.label, share.count, share.percent
        );
    }

    let stats = &report.statistics;
    println!("\nScore statistics");
    println!("  Min:    {}", stats.min);
    println!("  P10:    {}", stats.p10);
    println!("  P25:    {}", stats.p25);
    println!("  Median: {}", stats.median);
    println!("  Mean:   {:.1}", stats.mean);
    println!("  P75:    {}", stats.p75);
    println!("  P90:    {}", stats.p90);
    println!("  Max:    {}", stats.max);

    println!("\nSystem RAG distribution");
    println!("  {:<16} {:>6} {:>6} {:>6}", "System", "GREEN", "AMBER", "RED");
    for system in &report.systems {
        println!(
            "  {:<16} {:>6} {:>6} {:>6}",
            system.system, system.counts.green, system.counts.amber, system.counts.red
        );
    }

    println!("\nScore histogram");
    for bucket in &report.histogram {
        println!(
            "  {:>8}  {:>4}  {}",
            format!("{}-{}", bucket.lower, bucket.upper),
            bucket.count,
            "█".repeat(bucket.count.min(60))
        );
    }

    println!("\nLowest scoring runs");
    for run in &report.lowest {
        render_run(run);
    }
    println!("\nHighest scoring runs");
    for run in &report.highest {
        render_run(run);
    }
}

fn render_run(run: &CohortRun) {
    let stories: Vec<&str> = run.stories.iter().map(StoryId::as_str).collect();
    println!(
        "  Run {:>4}: score {:>3} | {} | {} stories | RU {} slots {}",
        run.run,
        run.total_score,
        run.tier_label,
        run.stories.len(),
        run.used.ru,
        run.used.slots
    );
    println!("            {}", stories.join(", "));
}
