use sip_brewery::error::PlannerError;
use sip_brewery::planner::sip::{
    future_value, lumpsum_future_value, projection, required_monthly_investment,
    step_up_future_value, step_up_projection, MAX_YEARS,
};
use sip_brewery::planner::{GoalPlan, SipPlan};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs().max(1.0)
}

#[test]
fn future_value_matches_annuity_due_formula() {
    for &(p, rate, years) in &[(5_000.0, 12.0, 10u32), (1_500.0, 8.5, 25), (100.0, 1.0, 1)] {
        let r: f64 = rate / 12.0 / 100.0;
        let n = (years * 12) as i32;
        let expected = p * (((1.0 + r).powi(n) - 1.0) / r) * (1.0 + r);
        assert!(close(future_value(p, rate, years), expected, 1e-12));
    }
}

#[test]
fn ten_year_sip_at_twelve_percent() {
    // 5,000/month for 10 years at 12% p.a. is about 11.6 lakh
    let fv = future_value(5_000.0, 12.0, 10);
    assert!((fv - 1_161_695.38).abs() < 1.0, "fv = {}", fv);
}

#[test]
fn required_monthly_inverts_future_value() {
    let monthly = required_monthly_investment(1_000_000.0, 11.0, 15);
    assert!(close(future_value(monthly, 11.0, 15), 1_000_000.0, 1e-9));
}

#[test]
fn lumpsum_compounds_monthly() {
    let fv = lumpsum_future_value(100_000.0, 12.0, 1);
    assert!(close(fv, 100_000.0 * 1.01f64.powi(12), 1e-12));
}

#[test]
fn zero_step_up_equals_flat_sip() {
    let flat = future_value(2_000.0, 10.0, 20);
    let stepped = step_up_future_value(2_000.0, 10.0, 20, 0.0);
    assert!(close(stepped, flat, 1e-9));
}

#[test]
fn step_up_beats_flat_sip() {
    let plan = SipPlan::new(2_000.0, 10.0, 20).unwrap().with_step_up(10.0).unwrap();
    assert!(plan.future_value() > future_value(2_000.0, 10.0, 20));
    // 2000 * 12 * (1.1^20 - 1) / 0.1
    let expected_invested = 24_000.0 * (1.1f64.powi(20) - 1.0) / 0.1;
    assert!(close(plan.invested(), expected_invested, 1e-9));
}

#[test]
fn projection_last_row_matches_future_value() {
    let rows = projection(3_000.0, 9.0, 12);
    assert_eq!(rows.len(), 12);
    let last = rows.last().unwrap();
    assert_eq!(last.year, 12);
    assert_eq!(last.value, future_value(3_000.0, 9.0, 12));
    assert!((last.invested - 432_000.0).abs() < 1e-9);
    assert!(rows.windows(2).all(|w| w[1].value > w[0].value));
}

#[test]
fn summary_reports_gains() {
    let summary = SipPlan::new(5_000.0, 12.0, 10).unwrap().summary();
    assert!((summary.invested - 600_000.0).abs() < 1e-9);
    assert!((summary.gains - (summary.future_value - 600_000.0)).abs() < 1e-9);
    assert_eq!(summary.yearly.len(), 10);
}

#[test]
fn goal_plan_validates_and_computes() {
    let goal = GoalPlan::new(2_500_000.0, 12.0, 15).unwrap();
    assert!(close(future_value(goal.monthly_required, 12.0, 15), 2_500_000.0, 1e-9));
    assert_eq!(
        GoalPlan::new(0.0, 12.0, 15),
        Err(PlannerError::InvalidAmount {
            field: "target",
            value: 0.0
        })
    );
    assert_eq!(GoalPlan::new(1.0, 120.0, 15), Err(PlannerError::InvalidRate(120.0)));
    assert!(matches!(
        GoalPlan::new(1.0, 12.0, 61),
        Err(PlannerError::InvalidYears { value: 61, max: 60 })
    ));
}

#[test]
fn step_up_summary_rows_agree_with_totals() {
    let summary = SipPlan::new(5_000.0, 12.0, 10)
        .unwrap()
        .with_step_up(10.0)
        .unwrap()
        .summary();
    let last = summary.yearly.last().unwrap();
    assert_eq!(summary.yearly.len(), 10);
    assert_eq!(last.value, summary.future_value);
    assert_eq!(last.invested, summary.invested);
    assert!(summary.future_value > future_value(5_000.0, 12.0, 10));
    // first year is still the flat instalment
    assert!((summary.yearly[0].invested - 60_000.0).abs() < 1e-9);
    assert!(close(summary.yearly[0].value, future_value(5_000.0, 12.0, 1), 1e-12));
}

#[test]
fn step_up_projection_matches_step_up_future_value() {
    let rows = step_up_projection(2_500.0, 9.0, 15, 7.5);
    assert_eq!(rows.last().unwrap().value, step_up_future_value(2_500.0, 9.0, 15, 7.5));
    assert!(rows.windows(2).all(|w| w[1].invested > w[0].invested));
}

#[test]
fn free_functions_clamp_oversized_horizon() {
    let capped = future_value(1_000.0, 10.0, MAX_YEARS);
    assert_eq!(future_value(1_000.0, 10.0, u32::MAX), capped);
    assert_eq!(
        lumpsum_future_value(1_000.0, 10.0, u32::MAX),
        lumpsum_future_value(1_000.0, 10.0, MAX_YEARS)
    );
    assert!(required_monthly_investment(1e6, 10.0, u32::MAX).is_finite());
    assert_eq!(projection(1_000.0, 10.0, u32::MAX).len(), MAX_YEARS as usize);
}
