use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

use crate::config::Config;
use crate::indicator::{IndicatorOverlay, IndicatorSnapshot, RsiZone, Trend};
use crate::market_data::{DataSource, FundDataClient, MAX_HISTORY_DAYS};
use crate::planner::{ElssSaving, GoalPlan, LtcgTax, SipPlan};

const USAGE: &str = "\
usage: sip-brewery <subcommand>

  indicators <fund_code> [days]            latest SMA/EMA/RSI/MACD for a fund
  sip <monthly> <rate_pct> <years> [step]  SIP future value and yearly projection
  goal <target> <rate_pct> <years>         monthly SIP needed to reach a target
  tax <elss_investment> <slab_pct> [ltcg]  ELSS 80C saving and equity LTCG tax
  help                                     show this message";

#[derive(Debug, Serialize)]
pub struct IndicatorReport {
    pub fund: String,
    pub source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub candles: usize,
    pub snapshot: IndicatorSnapshot,
    pub rsi_zone: Option<RsiZone>,
    pub trend: Option<Trend>,
}

#[derive(Debug, Serialize)]
pub struct TaxReport {
    pub elss: ElssSaving,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ltcg: Option<LtcgTax>,
}

fn parse_arg<T: FromStr>(args: &[String], index: usize, name: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args
        .get(index)
        .ok_or_else(|| anyhow!("missing <{}> argument", name))?;
    raw.parse::<T>()
        .with_context(|| format!("invalid <{}> '{}'", name, raw))
}

fn parse_opt_arg<T: FromStr>(args: &[String], index: usize, name: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if args.get(index).is_none() {
        return Ok(None);
    }
    parse_arg(args, index, name).map(Some)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output json")
}

/// Run one subcommand and return the JSON it prints.
pub async fn run_cli(args: &[String], config: &Config) -> Result<String> {
    let Some(cmd) = args.first() else {
        return Ok(USAGE.to_string());
    };
    let rest = &args[1..];
    match cmd.as_str() {
        "indicators" => {
            let fund: String = parse_arg(rest, 0, "fund_code")?;
            let days = parse_opt_arg::<u32>(rest, 1, "days")?.unwrap_or(config.api.history_days);
            if days == 0 || days > MAX_HISTORY_DAYS {
                bail!("<days> must be within 1..={}, got {}", MAX_HISTORY_DAYS, days);
            }
            let report = indicator_report(config, &fund, days).await?;
            to_json(&report)
        }
        "sip" => {
            let mut plan = SipPlan::new(
                parse_arg(rest, 0, "monthly")?,
                parse_arg(rest, 1, "rate_pct")?,
                parse_arg(rest, 2, "years")?,
            )?;
            if let Some(step) = parse_opt_arg::<f64>(rest, 3, "step")? {
                plan = plan.with_step_up(step)?;
            }
            to_json(&plan.summary())
        }
        "goal" => {
            let goal = GoalPlan::new(
                parse_arg(rest, 0, "target")?,
                parse_arg(rest, 1, "rate_pct")?,
                parse_arg(rest, 2, "years")?,
            )?;
            to_json(&goal)
        }
        "tax" => {
            let investment: f64 = parse_arg(rest, 0, "elss_investment")?;
            let slab: f64 = parse_arg(rest, 1, "slab_pct")?;
            let ltcg: Option<f64> = parse_opt_arg(rest, 2, "ltcg")?;
            let rules = config.planner;
            to_json(&TaxReport {
                elss: rules.elss_tax_saving(investment, slab)?,
                ltcg: ltcg.map(|g| rules.equity_ltcg_tax(g)),
            })
        }
        "help" | "--help" | "-h" => Ok(USAGE.to_string()),
        other => bail!(
            "unknown subcommand `{}`. expected one of: indicators|sip|goal|tax|help",
            other
        ),
    }
}

pub async fn indicator_report(config: &Config, fund: &str, days: u32) -> Result<IndicatorReport> {
    let client = FundDataClient::new(&config.api.base_url, config.api.timeout())?;
    let load = client.load_candles_or_demo(fund, days).await;
    let overlay = IndicatorOverlay::compute(&load.candles, &config.indicators);
    let snapshot = overlay.latest();
    tracing::info!(
        fund,
        source = ?load.source,
        candles = overlay.len(),
        "Computed indicator overlay"
    );
    Ok(IndicatorReport {
        fund: fund.to_string(),
        source: load.source,
        error: load.error,
        candles: overlay.len(),
        rsi_zone: snapshot.rsi_zone(),
        trend: snapshot.trend(),
        snapshot,
    })
}
