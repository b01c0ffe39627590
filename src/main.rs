use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use olympic_medals::combine::combine_files;
use olympic_medals::countries::NocRegions;
use olympic_medals::kaggle::load_kaggle;
use olympic_medals::logging::{init_tracing, level_for};
use olympic_medals::reconciliation::save_label_list;
use olympic_medals::swimming::swimming_results;
use olympic_medals::tokyo::{load_events, tokyo_records};
use olympic_medals::{
    read_records, run_paris, write_records, DataQualityEngine, OlympicRecord, OverrideRules,
    ParisSources, PipelineConfig,
};

#[derive(Parser)]
#[command(name = "olympic-medals")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Reshape scraped Olympic medal results into one 1896-2024 table",
    long_about = None
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json: bool,

    /// Pipeline config file (JSON); data/raw and data/processed defaults otherwise
    #[arg(short, long, global = true, env = "OLYMPIC_MEDALS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paris 2024: AP News extract → results CSV
    Paris,
    /// Tokyo 2020: Olympedia medal JSON → results CSV
    Tokyo,
    /// Kaggle 1896-2016: Summer medal rows only
    Kaggle,
    /// Tokyo + Paris + Kaggle → one table
    Combine,
    /// Swimming rows of the combined table with standardized event names
    Swimming,
    /// Every step above, in order
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json, level_for(cli.verbose));

    let config = PipelineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Paris => run_paris_command(&config),
        Commands::Tokyo => run_tokyo_command(&config),
        Commands::Kaggle => run_kaggle_command(&config),
        Commands::Combine => run_combine_command(&config),
        Commands::Swimming => run_swimming_command(&config),
        Commands::All => {
            run_paris_command(&config)?;
            run_tokyo_command(&config)?;
            run_kaggle_command(&config)?;
            run_combine_command(&config)?;
            run_swimming_command(&config)
        }
    }
}

fn load_rules(config: &PipelineConfig) -> Result<OverrideRules> {
    match &config.rules {
        Some(path) => OverrideRules::from_file(path),
        None => Ok(OverrideRules::default()),
    }
}

fn report_quality(records: &[OlympicRecord]) {
    let report = DataQualityEngine::new().check(records);
    println!("   {}", report.summary());
    for issue in report.issues.iter().take(10) {
        println!("   ⚠️  [{:?}] {}", issue.severity, issue.issue);
    }
}

fn save(path: &Path, records: &[OlympicRecord]) -> Result<()> {
    write_records(path, records)?;
    println!("✓ Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

fn run_paris_command(config: &PipelineConfig) -> Result<()> {
    println!("🥇 Paris 2024");

    let sources = ParisSources::load(config)?;
    let run = run_paris(&sources).context("Paris pipeline failed")?;

    if let Some(path) = &config.event_labels_out {
        save_label_list(path, &run.event_labels)?;
        info!(path = %path.display(), labels = run.event_labels.len(), "saved event labels");
    }

    println!("   {}", run.report.summary());
    report_quality(&run.records);
    save(&config.paris_output, &run.records)
}

fn run_tokyo_command(config: &PipelineConfig) -> Result<()> {
    println!("🗼 Tokyo 2020");

    let events = load_events(&config.tokyo_medals)?;
    let regions = NocRegions::from_path(&config.noc_regions)?;
    let rules = load_rules(config)?;

    let records = tokyo_records(&events, &rules, &regions);
    report_quality(&records);
    save(&config.tokyo_output, &records)
}

fn run_kaggle_command(config: &PipelineConfig) -> Result<()> {
    println!("🏛️  Kaggle 1896-2016");

    let records = load_kaggle(&config.kaggle_events)?;
    save(&config.kaggle_output, &records)
}

fn run_combine_command(config: &PipelineConfig) -> Result<()> {
    println!("🧩 Combining datasets");

    let records = combine_files(&config.tokyo_output, &config.paris_output, &config.kaggle_output)?;
    save(&config.combined_output, &records)
}

fn run_swimming_command(config: &PipelineConfig) -> Result<()> {
    println!("🏊 Swimming");

    let records = read_records(&config.combined_output)?;
    let swims = swimming_results(&records);
    write_records(&config.swimming_output, &swims)?;
    println!(
        "✓ Wrote {} rows to {}",
        swims.len(),
        config.swimming_output.display()
    );
    Ok(())
}
