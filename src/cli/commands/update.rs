//! Update command implementation
//!
//! This module implements the `update` command, which applies the code rules
//! to the "Compte-rendu Météo" worksheet and saves the workbook.

use crate::adapters::store::SheetStore;
use crate::adapters::xlsx::XlsxWorkbook;
use crate::config::{load_config, MeteoConfig};
use crate::core::dates::{parse_reference_date, RunDates};
use crate::core::summary::UpdateSummary;
use crate::core::updater::{apply_plan, preview_update, UpdatePlan};
use crate::domain::{MeteoError, Result};
use crate::log_error_with_context;
use clap::Args;
use std::path::Path;
use std::time::Instant;

/// Arguments for the update command
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Workbook to update (overrides workbook.path)
    #[arg(short, long, value_name = "PATH")]
    pub workbook: Option<String>,

    /// Worksheet name (overrides workbook.sheet_name)
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,

    /// Save the result here instead of overwriting the workbook
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Reference day instead of the current date
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Show the planned changes without saving
    #[arg(long)]
    pub dry_run: bool,

    /// Write the run summary as JSON
    #[arg(long, value_name = "PATH")]
    pub report: Option<String>,
}

impl UpdateArgs {
    /// Builds the effective configuration
    ///
    /// The configuration file is optional when `--workbook` is given.
    pub fn resolve_config(&self, config_path: &str) -> Result<MeteoConfig> {
        let mut config = if Path::new(config_path).exists() {
            load_config(config_path)?
        } else if let Some(workbook) = &self.workbook {
            tracing::debug!(config_path = %config_path, "No configuration file, using defaults");
            MeteoConfig::for_workbook(workbook.clone())
        } else {
            return Err(MeteoError::Configuration(format!(
                "Configuration file not found: {config_path} (pass --workbook to run without one)"
            )));
        };

        if let Some(workbook) = &self.workbook {
            config.workbook.path = workbook.clone();
        }
        if let Some(sheet) = &self.sheet {
            tracing::info!(sheet = %sheet, "Overriding sheet name from CLI");
            config.workbook.sheet_name = sheet.clone();
        }
        if let Some(output) = &self.output {
            config.workbook.output_path = Some(output.clone());
        }
        if self.dry_run {
            config.application.dry_run = true;
        }

        config
            .validate()
            .map_err(|e| MeteoError::Configuration(format!("Configuration validation failed: {e}")))?;
        Ok(config)
    }

    /// Reference dates from `--date`, or from the configured clock
    pub fn resolve_dates(&self, config: &MeteoConfig) -> Result<RunDates> {
        match &self.date {
            Some(date) => RunDates::new(parse_reference_date(date)?),
            None => RunDates::from_clock(config.run.clock),
        }
    }

    /// Execute the update command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting update command");

        let config = match self.resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(e.exit_code());
            }
        };

        let dates = match self.resolve_dates(&config) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let started = Instant::now();
        let mut workbook =
            match XlsxWorkbook::open(&config.workbook.path, &config.workbook.sheet_name) {
                Ok(w) => w,
                Err(e) => {
                    log_error_with_context!(&e, "Failed to open workbook");
                    eprintln!("❌ {e}");
                    return Ok(e.exit_code());
                }
            };

        tracing::info!(path = %workbook.path().display(), "Workbook opened");
        crate::log_update_start!(workbook.sheet_name(), &dates);
        let plan = preview_update(&workbook, &dates)?;

        let summary = if config.application.dry_run {
            tracing::info!("Dry run mode enabled - the workbook will not be saved");
            println!("🔍 DRY RUN MODE - No changes will be saved");
            println!();
            print_plan(&plan);
            let mut summary = plan.summarize(&dates);
            summary.dry_run = true;
            summary
        } else {
            let summary = apply_plan(&mut workbook, &plan, &dates)?;
            let output = config.workbook.output_path.as_deref().map(Path::new);
            if let Err(e) = workbook.save(output) {
                log_error_with_context!(&e, "Failed to save workbook");
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
            summary
        }
        .with_duration(started.elapsed());

        crate::log_update_complete!(summary.updated_rows, summary.total_rows, started.elapsed());
        print_summary(&summary);

        if let Some(report) = &self.report {
            if let Err(e) = summary.write_report(report) {
                log_error_with_context!(&e, "Failed to write report");
                eprintln!("❌ Failed to write report {report}: {e}");
                return Ok(5);
            }
            println!("📄 Report written to {report}");
        }

        Ok(0)
    }
}

fn print_plan(plan: &UpdatePlan) {
    if plan.rows.is_empty() {
        println!("No row matches a known code.");
    }
    for row in &plan.rows {
        println!("  row {:>4}  {:<4} -> {} ({:?})", row.row, row.code, row.rule, row.outcome);
    }
    for row in &plan.held_on_sunday {
        println!("  row {row:>4}  PR1  -> held, Non Planifiée on Sunday");
    }
    println!();
}

fn print_summary(summary: &UpdateSummary) {
    println!("📊 Update Summary:");
    println!("  Today: {}", summary.today);
    println!("  Yesterday: {}", summary.yesterday);
    println!("  Rows scanned: {}", summary.total_rows);
    println!("  Rows updated: {}", summary.updated_rows);
    for (rule, count) in &summary.updated_by_rule {
        println!("    {rule}: {count}");
    }
    println!("  Held on Sunday: {}", summary.held_on_sunday);
    println!("  Unmatched: {}", summary.unmatched_rows);
    println!("  Duration: {:.2}s", summary.duration_ms as f64 / 1000.0);
    println!();

    if summary.dry_run {
        println!("✅ Dry run completed, nothing saved");
    } else if summary.is_noop() {
        println!("✅ Update completed, no row needed changes");
    } else {
        println!("✅ Update completed successfully!");
    }
}
