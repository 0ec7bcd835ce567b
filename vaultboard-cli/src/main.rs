//! vaultboard CLI — inspect the dashboards without a terminal UI.
//!
//! Commands:
//! - `summary` — derived values for every widget of a role
//! - `slides` — how a role's widgets are paginated into slides

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vaultboard_core::{sample, DashboardConfig, PeriodSelection, Role, WidgetSummary};

#[derive(Parser)]
#[command(
    name = "vaultboard",
    about = "vaultboard CLI — curator and operator dashboard metrics"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every widget's derived values for a role.
    Summary {
        /// Dashboard role: curator or operator. Defaults to the configured role.
        #[arg(long)]
        role: Option<Role>,

        /// Period for periodic widgets (7D, 30D, 90D, 1Y). Defaults to the configured period.
        #[arg(long)]
        period: Option<String>,

        /// Emit JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Path to a TOML dashboard config.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the slides a role's widgets are paginated into.
    Slides {
        /// Dashboard role: curator or operator. Defaults to the configured role.
        #[arg(long)]
        role: Option<Role>,

        /// Emit JSON instead of a list.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Path to a TOML dashboard config.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// One slide as printed by `slides --json`.
#[derive(Debug, Serialize)]
struct SlideListing {
    index: usize,
    title: String,
    widgets: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary {
            role,
            period,
            json,
            config,
        } => run_summary(role, period, json, config.as_deref()),
        Commands::Slides { role, json, config } => run_slides(role, json, config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(DashboardConfig::default()),
    }
}

fn run_summary(
    role: Option<Role>,
    period: Option<String>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let role = role.unwrap_or(config.role);
    let summaries = summarize_role(role, period.as_deref(), &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        println!("{role} dashboard");
        for summary in &summaries {
            println!("{}", format_summary(summary));
        }
    }
    Ok(())
}

/// Summaries for every widget of `role`. `period` overrides the configured default.
fn summarize_role(
    role: Role,
    period: Option<&str>,
    config: &DashboardConfig,
) -> Result<Vec<WidgetSummary>> {
    let widgets = sample::catalog(role, config).context("building widget catalogue")?;
    widgets
        .iter()
        .map(|widget| {
            let selection = match period {
                Some(p) if !widget.periods().is_empty() => Some(PeriodSelection::new(p)),
                _ => widget.default_selection(&config.default_period),
            };
            debug!(
                widget = %widget.id,
                period = ?selection.as_ref().map(|s| s.period().as_str()),
                "summarizing"
            );
            widget
                .summarize(selection.as_ref())
                .with_context(|| format!("summarizing {}", widget.id))
        })
        .collect()
}

fn run_slides(role: Option<Role>, json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let role = role.unwrap_or(config.role);
    let listing = list_slides(role, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        for slide in &listing {
            println!("[{}] {}", slide.index + 1, slide.title);
            for id in &slide.widgets {
                println!("    {id}");
            }
        }
    }
    Ok(())
}

fn list_slides(role: Role, config: &DashboardConfig) -> Result<Vec<SlideListing>> {
    let slides = sample::dashboard(role, config).context("paginating widgets")?;
    Ok(slides
        .into_iter()
        .enumerate()
        .map(|(index, slide)| SlideListing {
            index,
            title: slide.title,
            widgets: slide.widgets.into_iter().map(|w| w.id).collect(),
        })
        .collect())
}

/// One line per widget: id, period, headline, then whichever extras exist.
fn format_summary(summary: &WidgetSummary) -> String {
    let mut line = format!("{:<18}", summary.widget_id);
    line.push_str(&format!(" {:>4}", summary.period.as_deref().unwrap_or("-")));
    line.push_str(&format!(" {:>12.2}", summary.headline));

    match &summary.trend {
        Some(t) => {
            let arrow = if t.is_positive {
                "up"
            } else if t.delta < 0.0 {
                "down"
            } else {
                "flat"
            };
            line.push_str(&format!("  trend {arrow} {:+.2}", t.delta));
            if let Some(pct) = t.percent_change {
                line.push_str(&format!(" ({pct:+.1}%)"));
            }
        }
        None => line.push_str("  trend -"),
    }
    if let Some(avg) = summary.average {
        line.push_str(&format!("  avg {avg:.2}"));
    }
    if !summary.outlier_flags.is_empty() {
        line.push_str(&format!("  outliers {}", summary.outlier_count()));
    }
    if let Some(status) = &summary.status {
        line.push_str(&format!("  status {status}"));
    }
    if !summary.shares.is_empty() {
        let parts: Vec<String> = summary
            .shares
            .iter()
            .map(|s| format!("{} {:.1}%", s.label, s.percent))
            .collect();
        line.push_str(&format!("  shares {}", parts.join(", ")));
    }
    line
}
