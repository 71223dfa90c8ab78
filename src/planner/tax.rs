use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

fn is_pct(v: f64) -> bool {
    v.is_finite() && (0.0..=100.0).contains(&v)
}

/// Tax constants, overridable from the `[planner]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxRules {
    #[serde(default = "default_section_80c_limit")]
    pub section_80c_limit: f64,
    #[serde(default = "default_cess_pct")]
    pub cess_pct: f64,
    #[serde(default = "default_ltcg_exemption")]
    pub ltcg_exemption: f64,
    #[serde(default = "default_ltcg_rate_pct")]
    pub ltcg_rate_pct: f64,
}

fn default_section_80c_limit() -> f64 {
    150_000.0
}

fn default_cess_pct() -> f64 {
    4.0
}

fn default_ltcg_exemption() -> f64 {
    125_000.0
}

fn default_ltcg_rate_pct() -> f64 {
    12.5
}

impl Default for TaxRules {
    fn default() -> Self {
        Self {
            section_80c_limit: default_section_80c_limit(),
            cess_pct: default_cess_pct(),
            ltcg_exemption: default_ltcg_exemption(),
            ltcg_rate_pct: default_ltcg_rate_pct(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElssSaving {
    pub investment: f64,
    pub deduction: f64,
    pub tax_saved: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LtcgTax {
    pub gains: f64,
    pub taxable: f64,
    pub tax: f64,
}

impl TaxRules {
    /// Limits must be finite and non-negative, rates within 0..=100 percent.
    pub fn validate(&self) -> Result<(), PlannerError> {
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        let checks = [
            ("section_80c_limit", self.section_80c_limit, non_negative(self.section_80c_limit)),
            ("cess_pct", self.cess_pct, is_pct(self.cess_pct)),
            ("ltcg_exemption", self.ltcg_exemption, non_negative(self.ltcg_exemption)),
            ("ltcg_rate_pct", self.ltcg_rate_pct, is_pct(self.ltcg_rate_pct)),
        ];
        for (field, value, ok) in checks {
            if !ok {
                return Err(PlannerError::InvalidTaxRule { field, value });
            }
        }
        Ok(())
    }

    /// Tax saved by an ELSS investment at the given slab rate, cess included.
    pub fn elss_tax_saving(
        &self,
        investment: f64,
        slab_rate_pct: f64,
    ) -> Result<ElssSaving, PlannerError> {
        if !is_pct(slab_rate_pct) {
            return Err(PlannerError::InvalidSlab(slab_rate_pct));
        }
        let deduction = investment.max(0.0).min(self.section_80c_limit);
        let base = deduction * slab_rate_pct / 100.0;
        Ok(ElssSaving {
            investment,
            deduction,
            tax_saved: base * (1.0 + self.cess_pct / 100.0),
        })
    }

    /// Long-term capital gains tax on equity fund redemptions.
    pub fn equity_ltcg_tax(&self, gains: f64) -> LtcgTax {
        let taxable = (gains - self.ltcg_exemption).max(0.0);
        LtcgTax {
            gains,
            taxable,
            tax: taxable * self.ltcg_rate_pct / 100.0,
        }
    }
}
