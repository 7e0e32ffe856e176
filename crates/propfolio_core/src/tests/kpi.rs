//! Tests for KPI composition
//!
//! These tests verify that:
//! - The snapshot composes the calculators without altering their figures
//! - NOI and net cashflow follow their defining identities
//! - Equity and LVR degrade to None instead of dividing by zero
//! - The period composer differences the cumulative interest walk

use jiff::civil::date;

use crate::date_math::DAYS_PER_YEAR;
use crate::kpi::{compute_kpis, compute_period_kpis};
use crate::model::{
    BalanceSource, Cadence, FeeType, LoanEvent, LoanType, OneOffEvent, PropertyEvents,
    PurchaseEvent, RateType, RecurringCostEvent, TenancyEvent, TenancyEventKind, ValuationEvent,
};

fn fixture() -> PropertyEvents {
    PropertyEvents {
        purchase: Some(PurchaseEvent {
            settlement_date: date(2024, 1, 1),
            purchase_price: 600_000.0,
            deposit: Some(120_000.0),
            stamp_duty: Some(22_000.0),
            legal_fees: Some(2_000.0),
            buyers_agent_fee: Some(6_000.0),
            loan_amount: Some(480_000.0),
        }),
        loans: vec![LoanEvent {
            effective_date: date(2024, 1, 1),
            loan_type: LoanType::InterestOnly,
            rate_type: RateType::Variable,
            annual_rate: 0.06,
            repayment_amount: 2_400.0,
            repayment_cadence: Cadence::Monthly,
            fixed_expiry: None,
            offset_balance: None,
            manual_balance: None,
            lender: Some("CBA".to_string()),
        }],
        tenancies: vec![TenancyEvent {
            kind: TenancyEventKind::Start,
            effective_date: date(2024, 1, 1),
            weekly_rent: Some(550.0),
            lease_term_months: Some(12),
        }],
        recurring_costs: vec![RecurringCostEvent {
            effective_date: date(2024, 1, 1),
            end_date: None,
            category: "insurance".to_string(),
            fee_type: FeeType::Fixed,
            amount: 2_000.0,
            cadence: Cadence::Annually,
        }],
        one_offs: vec![
            OneOffEvent {
                date: date(2024, 6, 1),
                amount: 1_000.0,
                category: "rebate".to_string(),
            },
            OneOffEvent {
                date: date(2024, 7, 1),
                amount: -3_000.0,
                category: "repairs".to_string(),
            },
            OneOffEvent {
                date: date(2026, 1, 1),
                amount: -500.0,
                category: "repairs".to_string(),
            },
        ],
        valuations: vec![ValuationEvent {
            date: date(2024, 12, 1),
            value: 650_000.0,
            source: Some("bank".to_string()),
        }],
    }
}

#[test]
fn test_snapshot_composition() {
    let events = fixture();
    let as_of = date(2025, 1, 1);
    let kpis = compute_kpis(&events, 100.0, as_of);

    // 2024 is a leap year: 366 accrued days.
    let gross_rent = 550.0 * 366.0 / 7.0;
    assert!((kpis.gross_rent - gross_rent).abs() < 1e-9);
    assert_eq!(kpis.vacancy_days, 0);

    let insurance = 2_000.0 / DAYS_PER_YEAR * 366.0;
    assert!((kpis.total_recurring_costs - insurance).abs() < 1e-9);
    assert!((kpis.recurring_costs_by_category["insurance"] - insurance).abs() < 1e-9);

    // One-off dated after as_of is excluded.
    assert_eq!(kpis.one_off_income, 1_000.0);
    assert_eq!(kpis.one_off_expenses, -3_000.0);

    assert_eq!(kpis.loan_balance, 480_000.0);
    assert_eq!(kpis.loan_balance_source, BalanceSource::Computed);
    let interest = 480_000.0 * 0.06 * (366.0 / DAYS_PER_YEAR);
    assert!((kpis.total_interest_paid - interest).abs() < 1e-6);

    assert!((kpis.noi - (kpis.gross_rent - kpis.total_recurring_costs)).abs() < 1e-12);
    let net = kpis.noi - kpis.total_interest_paid + kpis.one_off_income + kpis.one_off_expenses;
    assert!((kpis.net_cashflow - net).abs() < 1e-12);

    assert_eq!(kpis.latest_valuation, Some(650_000.0));
    assert_eq!(kpis.latest_valuation_date, Some(date(2024, 12, 1)));
    assert_eq!(kpis.equity, Some(650_000.0 - 480_000.0));
    assert!((kpis.lvr.unwrap() - 480_000.0 / 650_000.0).abs() < 1e-12);

    assert_eq!(kpis.acquisition_costs, 30_000.0);
    assert_eq!(kpis.total_acquisition_cost, 630_000.0);
    assert_eq!(kpis.ownership_pct, 100.0);
}

#[test]
fn test_snapshot_without_valuation_has_no_equity() {
    let mut events = fixture();
    events.valuations.clear();
    let kpis = compute_kpis(&events, 100.0, date(2025, 1, 1));

    assert_eq!(kpis.latest_valuation, None);
    assert_eq!(kpis.equity, None);
    assert_eq!(kpis.lvr, None);

    // The reference value still falls back to the purchase price.
    assert_eq!(events.reference_value_at(date(2025, 1, 1)), Some(600_000.0));
}

#[test]
fn test_zero_valuation_guards_lvr() {
    let mut events = fixture();
    events.valuations = vec![ValuationEvent {
        date: date(2024, 12, 1),
        value: 0.0,
        source: None,
    }];
    let kpis = compute_kpis(&events, 100.0, date(2025, 1, 1));

    assert_eq!(kpis.lvr, None);
    assert_eq!(kpis.equity, Some(-480_000.0));
}

#[test]
fn test_snapshot_without_purchase_accrues_nothing() {
    let mut events = fixture();
    events.purchase = None;
    let kpis = compute_kpis(&events, 50.0, date(2025, 1, 1));

    assert_eq!(kpis.gross_rent, 0.0);
    assert_eq!(kpis.total_recurring_costs, 0.0);
    assert_eq!(kpis.purchase_price, 0.0);
    assert_eq!(kpis.ownership_pct, 50.0);
}

#[test]
fn test_future_valuation_ignored() {
    let mut events = fixture();
    events.valuations.push(ValuationEvent {
        date: date(2026, 6, 1),
        value: 900_000.0,
        source: None,
    });
    let kpis = compute_kpis(&events, 100.0, date(2025, 1, 1));
    assert_eq!(kpis.latest_valuation, Some(650_000.0));
}

#[test]
fn test_period_windows_rent_and_costs() {
    let events = fixture();
    let period = compute_period_kpis(&events, 100.0, date(2024, 7, 1), date(2024, 10, 1));

    let days = 92.0; // Jul + Aug + Sep
    assert!((period.gross_rent - 550.0 * days / 7.0).abs() < 1e-9);
    assert!(
        (period.total_recurring_costs - 2_000.0 / DAYS_PER_YEAR * days).abs() < 1e-9
    );
}

#[test]
fn test_period_interest_is_walk_difference() {
    let events = fixture();
    let from = date(2024, 7, 1);
    let to = date(2024, 10, 1);
    let period = compute_period_kpis(&events, 100.0, from, to);

    let purchase = events.purchase.as_ref();
    let expected = crate::loan::interest_paid(purchase, &events.loans, to)
        - crate::loan::interest_paid(purchase, &events.loans, from);
    assert!((period.total_interest_paid - expected).abs() < 1e-9);
}

#[test]
fn test_period_one_offs_inclusive_bounds() {
    let mut events = fixture();
    events.one_offs = vec![
        OneOffEvent {
            date: date(2024, 7, 1),
            amount: 100.0,
            category: "edge".to_string(),
        },
        OneOffEvent {
            date: date(2024, 10, 1),
            amount: -200.0,
            category: "edge".to_string(),
        },
        OneOffEvent {
            date: date(2024, 10, 2),
            amount: 999.0,
            category: "outside".to_string(),
        },
    ];
    let period = compute_period_kpis(&events, 100.0, date(2024, 7, 1), date(2024, 10, 1));

    assert_eq!(period.one_off_income, 100.0);
    assert_eq!(period.one_off_expenses, -200.0);
}

#[test]
fn test_inverted_period_is_all_zero() {
    let events = fixture();
    let period = compute_period_kpis(&events, 100.0, date(2025, 1, 1), date(2024, 1, 1));

    assert_eq!(period.gross_rent, 0.0);
    assert_eq!(period.total_recurring_costs, 0.0);
    assert_eq!(period.total_interest_paid, 0.0);
    assert_eq!(period.one_off_income, 0.0);
    assert_eq!(period.net_cashflow, 0.0);
    assert!(period.recurring_costs_by_category.is_empty());
}

#[test]
fn test_snapshot_is_deterministic() {
    let events = fixture();
    let as_of = date(2025, 1, 1);
    assert_eq!(
        compute_kpis(&events, 100.0, as_of),
        compute_kpis(&events, 100.0, as_of)
    );
}
