//! Sample widget catalogue for both roles.
//!
//! Produces static, reproducible datasets:
//! - Periodic fee and delegation series for 7D/30D/90D (daily) and 1Y (monthly)
//! - Category lists whose shares add up to 100 by construction
//! - Trade execution batches with a few slow outliers
//! - A quote acceptance gauge reading
//!
//! Values come from a fixed-seed linear congruential generator so every
//! run shows the same numbers.

use chrono::{Datelike, Duration, NaiveDate};

use crate::config::DashboardConfig;
use crate::domain::{
    DataPoint, Dataset, FieldSchema, PeriodDatasets, SeriesConfig, STANDARD_PERIODS,
};
use crate::error::Result;
use crate::navigator::{paginate, Slide};
use crate::widget::{Headline, Role, Widget, WidgetData, WidgetKind};

/// Last day covered by the sample series.
fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap_or_default()
}

/// Every widget for a role, validated, in display order.
pub fn catalog(role: Role, config: &DashboardConfig) -> Result<Vec<Widget>> {
    let widgets = match role {
        Role::Curator => vec![
            fee_revenue()?,
            delegation()?,
            token_share()?,
            vault_types()?,
            monthly_fees()?,
        ],
        Role::Operator => vec![
            operator_fees()?,
            execution_time(config)?,
            quote_acceptance(config),
            executed_trades()?,
        ],
    };
    for widget in &widgets {
        widget.validate()?;
    }
    Ok(widgets)
}

/// A role's widgets grouped into slides of `config.widgets_per_slide`.
pub fn dashboard(role: Role, config: &DashboardConfig) -> Result<Vec<Slide<Widget>>> {
    let mut slides = paginate(catalog(role, config)?, config.widgets_per_slide)?;
    for slide in &mut slides {
        let titles: Vec<&str> = slide.widgets.iter().map(|w| w.title.as_str()).collect();
        slide.title = format!("{} · {}", role.label(), titles.join(" / "));
    }
    Ok(slides)
}

// ─── Curator widgets ────────────────────────────────────────────────

fn fee_revenue() -> Result<Widget> {
    let fields = ["alpha_vault", "beta_vault", "gamma_vault"];
    let bases = [4_200.0, 2_600.0, 1_100.0];
    let mapping = periodic(&fields, &bases, 0.0015, 0.08, 11)?;
    Ok(Widget {
        headline: Headline::PointTotal(fields.iter().map(|f| f.to_string()).collect()),
        ..base(
            "fee_revenue",
            "Fee Revenue",
            Role::Curator,
            WidgetKind::Area,
            WidgetData::Periodic(mapping),
            SeriesConfig::new()
                .with("alpha_vault", "Alpha Vault", "chart-1")
                .with("beta_vault", "Beta Vault", "chart-2")
                .with("gamma_vault", "Gamma Vault", "chart-3"),
            "$",
        )
    })
}

fn delegation() -> Result<Widget> {
    let mapping = periodic(&["delegated"], &[1_850_000.0], 0.002, 0.015, 23)?;
    Ok(Widget {
        headline: Headline::LatestValue("delegated".into()),
        trend_field: Some("delegated".into()),
        ..base(
            "delegation",
            "Delegated Stake",
            Role::Curator,
            WidgetKind::Line,
            WidgetData::Periodic(mapping),
            SeriesConfig::new().with("delegated", "Delegated", "chart-1"),
            "$",
        )
    })
}

fn token_share() -> Result<Widget> {
    let entries = categories(
        "share",
        &[("ETH", 35.0), ("USDC", 28.0), ("WBTC", 22.0), ("DAI", 10.0), ("Other", 5.0)],
    )?;
    Ok(Widget {
        headline: Headline::Sum("share".into()),
        share_field: Some("share".into()),
        ..base(
            "token_share",
            "Token Share",
            Role::Curator,
            WidgetKind::Pie,
            WidgetData::Categories(entries),
            SeriesConfig::new().with("share", "Share", "chart-2"),
            "%",
        )
    })
}

fn vault_types() -> Result<Widget> {
    let entries = categories(
        "vaults",
        &[("Lending", 14.0), ("Liquidity", 9.0), ("Yield", 6.0), ("Index", 3.0)],
    )?;
    Ok(Widget {
        headline: Headline::Sum("vaults".into()),
        share_field: Some("vaults".into()),
        ..base(
            "vault_types",
            "Vault Type Distribution",
            Role::Curator,
            WidgetKind::Pie,
            WidgetData::Categories(entries),
            SeriesConfig::new().with("vaults", "Vaults", "chart-4"),
            "",
        )
    })
}

fn monthly_fees() -> Result<Widget> {
    let schema = FieldSchema::new(["fees"])?;
    let points = [
        ("Jan", 12_000.0),
        ("Feb", 15_000.0),
        ("Mar", 13_800.0),
        ("Apr", 17_200.0),
        ("May", 16_100.0),
        ("Jun", 19_400.0),
    ]
    .iter()
    .map(|(month, fees)| DataPoint::new(*month, [("fees", *fees)]))
    .collect();
    Ok(Widget {
        headline: Headline::LatestValue("fees".into()),
        trend_field: Some("fees".into()),
        ..base(
            "monthly_fees",
            "Monthly Fees",
            Role::Curator,
            WidgetKind::Bar,
            WidgetData::Fixed(Dataset::new(schema, points)?),
            SeriesConfig::new().with("fees", "Fees", "chart-1"),
            "$",
        )
    })
}

// ─── Operator widgets ───────────────────────────────────────────────

fn operator_fees() -> Result<Widget> {
    let fields = ["execution", "quote"];
    let mapping = periodic(&fields, &[950.0, 420.0], 0.001, 0.12, 37)?;
    Ok(Widget {
        headline: Headline::PointTotal(fields.iter().map(|f| f.to_string()).collect()),
        ..base(
            "operator_fees",
            "Operator Fee Revenue",
            Role::Operator,
            WidgetKind::Area,
            WidgetData::Periodic(mapping),
            SeriesConfig::new()
                .with("execution", "Execution Fees", "chart-1")
                .with("quote", "Quote Fees", "chart-3"),
            "$",
        )
    })
}

fn execution_time(config: &DashboardConfig) -> Result<Widget> {
    let schema = FieldSchema::new(["seconds"])?;
    let mut rng = Lcg::new(53);
    let points = (1..=24)
        .map(|batch| {
            // Every seventh batch stalls well past the usual 8-20s window.
            let seconds = if batch % 7 == 0 {
                38.0 + 6.0 * rng.next_signed()
            } else {
                14.0 + 6.0 * rng.next_signed()
            };
            DataPoint::new(format!("B-{batch:03}"), [("seconds", round2(seconds))])
        })
        .collect();
    Ok(Widget {
        headline: Headline::Average("seconds".into()),
        outliers: Some(("seconds".into(), config.execution_outlier)),
        ..base(
            "execution_time",
            "Trade Execution Time",
            Role::Operator,
            WidgetKind::Scatter,
            WidgetData::Fixed(Dataset::new(schema, points)?),
            SeriesConfig::new().with("seconds", "Seconds", "chart-5"),
            "s",
        )
    })
}

fn quote_acceptance(config: &DashboardConfig) -> Widget {
    Widget {
        status: Some(config.status_buckets.clone()),
        ..base(
            "quote_acceptance",
            "Quote Acceptance Rate",
            Role::Operator,
            WidgetKind::Gauge,
            WidgetData::Gauge { value: 18.4 },
            SeriesConfig::new(),
            "%",
        )
    }
}

fn executed_trades() -> Result<Widget> {
    let schema = FieldSchema::new(["trades"])?;
    let mut rng = Lcg::new(71);
    let end = anchor_date();
    let points = (0..14)
        .rev()
        .map(|offset| {
            let date = end - Duration::days(offset);
            let trades = (120.0 + 35.0 * rng.next_signed()).round();
            DataPoint::new(date.format("%b %d").to_string(), [("trades", trades)])
        })
        .collect();
    Ok(Widget {
        headline: Headline::LatestValue("trades".into()),
        trend_field: Some("trades".into()),
        ..base(
            "executed_trades",
            "Executed Trades",
            Role::Operator,
            WidgetKind::Bar,
            WidgetData::Fixed(Dataset::new(schema, points)?),
            SeriesConfig::new().with("trades", "Trades", "chart-2"),
            "",
        )
    })
}

// ─── Builders ───────────────────────────────────────────────────────

fn base(
    id: &str,
    title: &str,
    role: Role,
    kind: WidgetKind,
    data: WidgetData,
    series: SeriesConfig,
    unit: &str,
) -> Widget {
    Widget {
        id: id.to_string(),
        title: title.to_string(),
        role,
        kind,
        data,
        series,
        headline: Headline::GaugeValue,
        trend_field: None,
        outliers: None,
        status: None,
        share_field: None,
        unit: unit.to_string(),
    }
}

fn categories(field: &str, entries: &[(&str, f64)]) -> Result<Dataset> {
    let schema = FieldSchema::new([field])?;
    let points = entries
        .iter()
        .map(|(name, v)| DataPoint::new(*name, [(field, *v)]))
        .collect();
    Dataset::new(schema, points)
}

/// One dataset per standard period, sharing `fields`.
///
/// 7D/30D/90D are daily series ending on the anchor date; 1Y is monthly.
fn periodic(
    fields: &[&str],
    bases: &[f64],
    drift: f64,
    volatility: f64,
    seed: u64,
) -> Result<PeriodDatasets> {
    let mut mapping = PeriodDatasets::new();
    for (i, period) in STANDARD_PERIODS.iter().enumerate() {
        let labels = match *period {
            "7D" => daily_labels(7),
            "30D" => daily_labels(30),
            "90D" => daily_labels(90),
            _ => monthly_labels(12),
        };
        let mut rng = Lcg::new(seed + i as u64);
        let mut levels = bases.to_vec();
        let points = labels
            .into_iter()
            .map(|label| {
                let values: Vec<(&str, f64)> = fields
                    .iter()
                    .zip(levels.iter_mut())
                    .map(|(field, level)| {
                        *level *= 1.0 + drift + volatility * rng.next_signed();
                        *level = level.max(0.0);
                        (*field, round2(*level))
                    })
                    .collect();
                DataPoint::new(label, values)
            })
            .collect();
        let schema = FieldSchema::new(fields.iter().copied())?;
        mapping.insert(*period, Dataset::new(schema, points)?)?;
    }
    Ok(mapping)
}

fn daily_labels(days: i64) -> Vec<String> {
    let end = anchor_date();
    (0..days)
        .rev()
        .map(|offset| (end - Duration::days(offset)).format("%b %d").to_string())
        .collect()
}

fn monthly_labels(months: u32) -> Vec<String> {
    let end = anchor_date();
    (0..months)
        .rev()
        .map(|back| {
            let total = end.year() * 12 + end.month0() as i32 - back as i32;
            let month = total.rem_euclid(12) as u32 + 1;
            let date = NaiveDate::from_ymd_opt(total.div_euclid(12), month, 1).unwrap_or(end);
            date.format("%b %Y").to_string()
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Deterministic pseudo-random source producing values in [-1, 1].
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_signed(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;
    use crate::selector::PeriodSelection;

    #[test]
    fn catalogs_validate() {
        let config = DashboardConfig::default();
        assert_eq!(catalog(Role::Curator, &config).unwrap().len(), 5);
        assert_eq!(catalog(Role::Operator, &config).unwrap().len(), 4);
    }

    #[test]
    fn sample_data_is_reproducible() {
        let config = DashboardConfig::default();
        assert_eq!(
            catalog(Role::Curator, &config).unwrap(),
            catalog(Role::Curator, &config).unwrap()
        );
    }

    #[test]
    fn periodic_lengths() {
        let mapping = periodic(&["x"], &[100.0], 0.0, 0.1, 1).unwrap();
        let lens: Vec<usize> = STANDARD_PERIODS
            .iter()
            .map(|p| mapping.get(&(*p).into()).unwrap().len())
            .collect();
        assert_eq!(lens, vec![7, 30, 90, 12]);
    }

    #[test]
    fn daily_labels_end_on_anchor() {
        let labels = daily_labels(7);
        assert_eq!(labels.last().unwrap(), "Jun 30");
        assert_eq!(labels.first().unwrap(), "Jun 24");
    }

    #[test]
    fn monthly_labels_cross_year() {
        let labels = monthly_labels(12);
        assert_eq!(labels.first().unwrap(), "Jul 2023");
        assert_eq!(labels.last().unwrap(), "Jun 2024");
    }

    #[test]
    fn token_share_sums_to_100() {
        let w = token_share().unwrap();
        let s = w.summarize(None).unwrap();
        assert_eq!(s.headline, 100.0);
        assert_eq!(s.shares.len(), 5);
    }

    #[test]
    fn execution_batches_include_outliers() {
        let w = execution_time(&DashboardConfig::default()).unwrap();
        let s = w.summarize(None).unwrap();
        assert_eq!(s.outlier_flags.len(), 24);
        assert_eq!(s.outlier_count(), 3);
    }

    #[test]
    fn lcg_stays_in_range() {
        let mut rng = Lcg::new(7);
        for _ in 0..1_000 {
            let v = rng.next_signed();
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn dashboard_pages_by_config() {
        let config = DashboardConfig {
            widgets_per_slide: 2,
            ..DashboardConfig::default()
        };
        let slides = dashboard(Role::Curator, &config).unwrap();
        assert_eq!(slides.len(), 3);
        assert!(slides[0].title.starts_with("Curator"));
        assert_eq!(slides[2].widgets.len(), 1);
    }

    #[test]
    fn periodic_fee_total_matches_latest_point() {
        let w = fee_revenue().unwrap();
        let sel = PeriodSelection::new("30D");
        let ds = w.dataset(Some(&sel)).unwrap();
        let latest = crate::selector::latest(ds).unwrap();
        let expected =
            metrics::total(latest, &["alpha_vault", "beta_vault", "gamma_vault"]).unwrap();
        assert_eq!(w.summarize(Some(&sel)).unwrap().headline, expected);
    }
}
