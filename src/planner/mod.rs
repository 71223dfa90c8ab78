pub mod sip;
pub mod tax;

pub use sip::{GoalPlan, ProjectionRow, SipPlan, SipSummary};
pub use tax::{ElssSaving, LtcgTax, TaxRules};
