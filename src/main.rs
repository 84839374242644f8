use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

mod catalog;
mod config;
mod error;
mod format;
mod models;
mod profile;
mod report;
mod scoring;
mod session;
mod view;

use crate::catalog::{CatalogSource, CsvCatalog, SeedCatalog};
use crate::config::{AppConfig, LogFormat};
use crate::models::{Scholarship, SortKey};
use crate::profile::ProfileForm;
use crate::report::RenderOptions;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "scholarship-match")]
#[command(about = "Match a student profile against a scholarship catalog", long_about = None)]
struct Cli {
    /// Catalog file (.json or .csv); defaults to SCHOLARSHIP_CATALOG, then the built-in seed catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Current instant as RFC 3339; defaults to the system clock
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the catalog for a student profile and show ranked results
    Match {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        gpa: String,
        #[arg(long, default_value = "")]
        major: String,
        #[arg(long, default_value = "")]
        year: String,
        #[arg(long)]
        financial_need: bool,
        #[arg(long, default_value = "")]
        gender: String,
        #[arg(long, default_value = "")]
        ethnicity: String,
        /// Comma-separated interests
        #[arg(long, default_value = "")]
        interests: String,
        /// Only show scholarships whose name, provider or category contains this text
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value_t = SortKey::Match)]
        sort: SortKey,
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
        /// Show which profile adjustments contributed to each score
        #[arg(long)]
        explain: bool,
        /// Write the results to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the catalog with baseline scores
    Catalog,
    /// Write the built-in seed catalog to a .json or .csv file
    Seed {
        #[arg(long, default_value = "catalog.json")]
        out: PathBuf,
    },
    /// Load a CSV catalog, generating ids for rows without one
    Import {
        #[arg(long)]
        csv: PathBuf,
        /// Write the imported catalog (.json or .csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();
    init_tracing(&config);

    let cli = Cli::parse();
    let now = cli.now.unwrap_or_else(Utc::now);
    let catalog_path = cli.catalog.clone().or(config.catalog_path.clone());

    match cli.command {
        Commands::Match {
            name,
            email,
            gpa,
            major,
            year,
            financial_need,
            gender,
            ethnicity,
            interests,
            search,
            sort,
            format,
            explain,
            out,
        } => {
            let form = ProfileForm {
                name,
                email,
                gpa,
                major,
                year_of_study: year,
                financial_need,
                gender,
                ethnicity,
                interests,
            };
            let profile = form.submit().context("invalid student profile")?;

            let mut session = Session::new(load_catalog(catalog_path.as_deref(), now)?);
            session.submit_profile(profile);
            session.set_search(search);
            session.set_sort(sort);

            let (Some(profile), Some(view)) = (session.profile(), session.results(now)) else {
                println!("No scholarships matched this profile.");
                return Ok(());
            };

            let options = RenderOptions { explain };
            let rendered = match format {
                OutputFormat::Markdown => report::build_report(profile, &view, now, options),
                OutputFormat::Json => report::build_json(profile, &view, now, options)
                    .context("failed to serialize results")?,
            };

            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Results written to {}.", path.display());
                }
                None => print!("{rendered}"),
            }
        }
        Commands::Catalog => {
            let session = Session::new(load_catalog(catalog_path.as_deref(), now)?);
            print!("{}", report::build_catalog_listing(session.catalog(), now));
        }
        Commands::Seed { out } => {
            let seeds = SeedCatalog { now }.load()?;
            catalog::write_catalog(&out, &seeds)
                .with_context(|| format!("failed to write seed catalog to {}", out.display()))?;
            println!("Wrote {} seed scholarships to {}.", seeds.len(), out.display());
        }
        Commands::Import { csv, out } => {
            let (scholarships, generated) = CsvCatalog { path: csv.clone() }
                .load_with_stats()
                .with_context(|| format!("failed to import {}", csv.display()))?;
            println!(
                "Loaded {} scholarships from {} ({} ids generated).",
                scholarships.len(),
                csv.display(),
                generated
            );
            if let Some(out) = out {
                catalog::write_catalog(&out, &scholarships)
                    .with_context(|| format!("failed to write {}", out.display()))?;
                println!("Catalog written to {}.", out.display());
            }
        }
    }

    Ok(())
}

fn load_catalog(path: Option<&std::path::Path>, now: DateTime<Utc>) -> anyhow::Result<Vec<Scholarship>> {
    match path {
        Some(path) => catalog::from_path(path)?
            .load()
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Ok(SeedCatalog { now }.load()?),
    }
}

fn init_tracing(config: &AppConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.with_target(false).json().init(),
        LogFormat::Text => builder.init(),
    }
}
