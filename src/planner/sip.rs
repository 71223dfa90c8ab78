use serde::Serialize;

use crate::error::PlannerError;

pub const MAX_YEARS: u32 = 60;

fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 12.0 / 100.0
}

/// Number of monthly instalments; horizons past `MAX_YEARS` are clamped.
fn months(years: u32) -> u32 {
    years.min(MAX_YEARS) * 12
}

/// Growth factor of one unit paid at the start of each month for `n` months.
fn annuity_due_factor(r: f64, n: u32) -> f64 {
    if r == 0.0 {
        return n as f64;
    }
    ((1.0 + r).powi(n as i32) - 1.0) / r * (1.0 + r)
}

/// `FV = P × (((1+r)^n - 1)/r) × (1+r)` with `r` the monthly rate and `n` the
/// number of monthly instalments. A zero rate gives `P × n`.
///
/// The free planner functions clamp `years` to `MAX_YEARS`; use `SipPlan` or
/// `GoalPlan` to reject out-of-range input instead.
pub fn future_value(monthly: f64, annual_rate_pct: f64, years: u32) -> f64 {
    monthly * annuity_due_factor(monthly_rate(annual_rate_pct), months(years))
}

/// Monthly instalment needed to reach `target` after `years`.
pub fn required_monthly_investment(target: f64, annual_rate_pct: f64, years: u32) -> f64 {
    let factor = annuity_due_factor(monthly_rate(annual_rate_pct), months(years));
    if factor == 0.0 {
        return f64::NAN;
    }
    target / factor
}

/// One-time investment compounded monthly.
pub fn lumpsum_future_value(principal: f64, annual_rate_pct: f64, years: u32) -> f64 {
    principal * (1.0 + monthly_rate(annual_rate_pct)).powi(months(years) as i32)
}

/// SIP whose instalment grows by `step_up_pct` at the start of every year.
pub fn step_up_future_value(monthly: f64, annual_rate_pct: f64, years: u32, step_up_pct: f64) -> f64 {
    step_up_projection(monthly, annual_rate_pct, years, step_up_pct)
        .last()
        .map_or(0.0, |row| row.value)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionRow {
    pub year: u32,
    pub invested: f64,
    pub value: f64,
    pub gains: f64,
}

/// Year-end balances of a flat SIP.
pub fn projection(monthly: f64, annual_rate_pct: f64, years: u32) -> Vec<ProjectionRow> {
    (1..=years.min(MAX_YEARS))
        .map(|year| {
            let invested = monthly * 12.0 * year as f64;
            let value = future_value(monthly, annual_rate_pct, year);
            ProjectionRow {
                year,
                invested,
                value,
                gains: value - invested,
            }
        })
        .collect()
}

/// Year-end balances of a step-up SIP, compounded month by month with each
/// instalment paid at the start of its month.
pub fn step_up_projection(
    monthly: f64,
    annual_rate_pct: f64,
    years: u32,
    step_up_pct: f64,
) -> Vec<ProjectionRow> {
    let r = monthly_rate(annual_rate_pct);
    let step = 1.0 + step_up_pct / 100.0;
    let years = years.min(MAX_YEARS);
    let mut instalment = monthly;
    let mut invested = 0.0;
    let mut value = 0.0;
    let mut rows = Vec::with_capacity(years as usize);
    for year in 1..=years {
        if year > 1 {
            instalment *= step;
        }
        for _ in 0..12 {
            invested += instalment;
            value = (value + instalment) * (1.0 + r);
        }
        rows.push(ProjectionRow {
            year,
            invested,
            value,
            gains: value - invested,
        });
    }
    rows
}

fn check_amount(field: &'static str, value: f64) -> Result<f64, PlannerError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PlannerError::InvalidAmount { field, value })
    }
}

fn check_rate(rate: f64) -> Result<f64, PlannerError> {
    if rate.is_finite() && (0.0..=100.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(PlannerError::InvalidRate(rate))
    }
}

fn check_years(years: u32) -> Result<u32, PlannerError> {
    if (1..=MAX_YEARS).contains(&years) {
        Ok(years)
    } else {
        Err(PlannerError::InvalidYears {
            value: years,
            max: MAX_YEARS,
        })
    }
}

/// Validated SIP request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SipPlan {
    pub monthly: f64,
    pub annual_rate_pct: f64,
    pub years: u32,
    pub step_up_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SipSummary {
    pub plan: SipPlan,
    pub invested: f64,
    pub future_value: f64,
    pub gains: f64,
    pub yearly: Vec<ProjectionRow>,
}

impl SipPlan {
    pub fn new(monthly: f64, annual_rate_pct: f64, years: u32) -> Result<Self, PlannerError> {
        Ok(Self {
            monthly: check_amount("monthly", monthly)?,
            annual_rate_pct: check_rate(annual_rate_pct)?,
            years: check_years(years)?,
            step_up_pct: 0.0,
        })
    }

    pub fn with_step_up(mut self, step_up_pct: f64) -> Result<Self, PlannerError> {
        if !(step_up_pct.is_finite() && (0.0..=100.0).contains(&step_up_pct)) {
            return Err(PlannerError::InvalidStepUp(step_up_pct));
        }
        self.step_up_pct = step_up_pct;
        Ok(self)
    }

    /// Year-end rows; step-up plans are compounded month by month.
    pub fn yearly(&self) -> Vec<ProjectionRow> {
        if self.step_up_pct == 0.0 {
            projection(self.monthly, self.annual_rate_pct, self.years)
        } else {
            step_up_projection(self.monthly, self.annual_rate_pct, self.years, self.step_up_pct)
        }
    }

    pub fn invested(&self) -> f64 {
        self.yearly().last().map_or(0.0, |row| row.invested)
    }

    pub fn future_value(&self) -> f64 {
        self.yearly().last().map_or(0.0, |row| row.value)
    }

    pub fn summary(&self) -> SipSummary {
        let yearly = self.yearly();
        let (invested, future_value) = yearly
            .last()
            .map_or((0.0, 0.0), |row| (row.invested, row.value));
        SipSummary {
            plan: *self,
            invested,
            future_value,
            gains: future_value - invested,
            yearly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalPlan {
    pub target: f64,
    pub annual_rate_pct: f64,
    pub years: u32,
    pub monthly_required: f64,
    pub total_invested: f64,
}

impl GoalPlan {
    pub fn new(target: f64, annual_rate_pct: f64, years: u32) -> Result<Self, PlannerError> {
        let target = check_amount("target", target)?;
        let annual_rate_pct = check_rate(annual_rate_pct)?;
        let years = check_years(years)?;
        let monthly_required = required_monthly_investment(target, annual_rate_pct, years);
        Ok(Self {
            target,
            annual_rate_pct,
            years,
            monthly_required,
            total_invested: monthly_required * f64::from(months(years)),
        })
    }
}
