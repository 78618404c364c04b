use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use company_importer::config::Config;
use company_importer::logging::{self, LoggingOptions};
use company_importer::pipeline::{import_with_config, init_collection, CleanReport, Cleaner, ImportReport};
use company_importer::storage::{read_text, CollectionSnapshot};

#[derive(Parser)]
#[command(name = "company-importer")]
#[command(about = "Import, classify and clean company records for the company directory")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults to company_importer.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV export to import from
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Collection file to update
    #[arg(long, global = true)]
    collection: Option<PathBuf>,

    /// Only import rows whose State matches this code ("" imports every state)
    #[arg(long, global = true)]
    target_state: Option<String>,

    /// Also write JSON logs to a daily-rolling file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append new companies from the CSV export to the collection
    Import {
        /// Report what would be appended without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove record blocks without a name from the collection
    Clean {
        /// Report what would be removed without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Run import and then clean
    Run {
        #[arg(long)]
        dry_run: bool,
    },
    /// Create an empty collection file if none exists
    Init,
    /// Write the collection as JSON
    Export {
        /// Output file (defaults to paths.export_path)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn apply_to(&self, config: &mut Config) {
        if let Some(csv) = &self.csv {
            config.paths.csv_path = csv.clone();
        }
        if let Some(collection) = &self.collection {
            config.paths.collection_path = collection.clone();
        }
        if let Some(state) = &self.target_state {
            config.import.target_state = state.trim().to_string();
        }
    }
}

fn print_import_report(report: &ImportReport) {
    println!("\n📥 Import results:");
    println!("   CSV rows: {}", report.ingest.total_rows);
    println!("   Skipped (no name): {}", report.ingest.blank_names);
    println!("   Skipped (duplicate): {}", report.ingest.duplicates);
    println!("   Skipped (other state): {}", report.ingest.out_of_region);
    println!("   New companies: {}", report.appended.len());
    if let (Some(first), Some(last)) = (report.first_id, report.last_id) {
        println!("   Company IDs range from {} to {}", first, last);
    }
    if !report.ingest.missing_columns.is_empty() {
        println!("   ⚠️  Missing columns: {}", report.ingest.missing_columns.join(", "));
    }
    if !report.written && !report.appended.is_empty() {
        println!("   (dry run, nothing written)");
    }
}

fn print_clean_report(report: &CleanReport) {
    println!("\n🧹 Clean results:");
    println!("   Blocks found: {}", report.found);
    println!("   Kept: {}", report.kept);
    println!("   Removed: {}", report.removed.len());
    for preview in &report.removed {
        println!("   - {}...", preview.replace('\n', " "));
    }
    if !report.written {
        println!("   (dry run, nothing written)");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    let _log_guard = logging::init_logging(&LoggingOptions {
        log_dir: cli.log_dir.clone(),
        verbose: cli.verbose,
    });

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply_to(&mut config);
    config.validate()?;

    let result = match &cli.command {
        Commands::Import { dry_run } => {
            import_with_config(&config, *dry_run).map(|report| print_import_report(&report))
        }
        Commands::Clean { dry_run } => Cleaner::from_config(&config)
            .run(&config.paths.collection_path, *dry_run)
            .map(|report| print_clean_report(&report)),
        Commands::Run { dry_run } => {
            println!("🔄 Running import then clean...");
            import_with_config(&config, *dry_run)
                .map(|report| print_import_report(&report))
                .and_then(|()| Cleaner::from_config(&config).run(&config.paths.collection_path, *dry_run))
                .map(|report| print_clean_report(&report))
        }
        Commands::Init => init_collection(&config.paths.collection_path, &config.collection).map(|created| {
            if created {
                println!("✅ Created {}", config.paths.collection_path.display());
            } else {
                println!("ℹ️  {} already exists", config.paths.collection_path.display());
            }
        }),
        Commands::Export { output } => {
            let output = output.clone().unwrap_or_else(|| config.paths.export_path.clone());
            read_text(&config.paths.collection_path).and_then(|text| {
                let snapshot = CollectionSnapshot::from_text(&text, &config.paths.collection_path);
                snapshot.write_json(&output)?;
                println!("💾 Exported {} companies to {}", snapshot.companies.len(), output.display());
                Ok(())
            })
        }
    };

    match result {
        Ok(()) => {
            info!("Done");
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {}", e);
            println!("❌ {}", e);
            Err(e.into())
        }
    }
}
