//! Field-level patches for event edits.
//!
//! An edit overwrites only the fields present in the patch. Required fields
//! patch through `Option<T>` (`None` = leave alone). Optional fields patch
//! through [`FieldPatch`], which keeps "not mentioned" and "set to null"
//! distinct states.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::events::{
    Cadence, FeeType, LoanEvent, LoanType, OneOffEvent, PurchaseEvent, RateType,
    RecurringCostEvent, TenancyEvent, TenancyEventKind, ValuationEvent,
};

/// Patch state for an optional event field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPatch<T> {
    /// Leave the field as it is.
    Keep,
    /// Overwrite with a new value.
    Set(T),
    /// Clear the field.
    Clear,
}

impl<T> Default for FieldPatch<T> {
    fn default() -> Self {
        FieldPatch::Keep
    }
}

impl<T: Clone> FieldPatch<T> {
    fn apply_to(&self, field: &mut Option<T>) {
        match self {
            FieldPatch::Keep => {}
            FieldPatch::Set(value) => *field = Some(value.clone()),
            FieldPatch::Clear => *field = None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseEventPatch {
    pub settlement_date: Option<Date>,
    pub purchase_price: Option<f64>,
    pub deposit: FieldPatch<f64>,
    pub stamp_duty: FieldPatch<f64>,
    pub legal_fees: FieldPatch<f64>,
    pub buyers_agent_fee: FieldPatch<f64>,
    pub loan_amount: FieldPatch<f64>,
}

impl PurchaseEventPatch {
    pub fn apply(&self, event: &mut PurchaseEvent) {
        if let Some(d) = self.settlement_date {
            event.settlement_date = d;
        }
        if let Some(p) = self.purchase_price {
            event.purchase_price = p;
        }
        self.deposit.apply_to(&mut event.deposit);
        self.stamp_duty.apply_to(&mut event.stamp_duty);
        self.legal_fees.apply_to(&mut event.legal_fees);
        self.buyers_agent_fee.apply_to(&mut event.buyers_agent_fee);
        self.loan_amount.apply_to(&mut event.loan_amount);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanEventPatch {
    pub effective_date: Option<Date>,
    pub loan_type: Option<LoanType>,
    pub rate_type: Option<RateType>,
    pub annual_rate: Option<f64>,
    pub repayment_amount: Option<f64>,
    pub repayment_cadence: Option<Cadence>,
    pub fixed_expiry: FieldPatch<Date>,
    pub offset_balance: FieldPatch<f64>,
    pub manual_balance: FieldPatch<f64>,
    pub lender: FieldPatch<String>,
}

impl LoanEventPatch {
    pub fn apply(&self, event: &mut LoanEvent) {
        if let Some(d) = self.effective_date {
            event.effective_date = d;
        }
        if let Some(t) = self.loan_type {
            event.loan_type = t;
        }
        if let Some(r) = self.rate_type {
            event.rate_type = r;
        }
        if let Some(r) = self.annual_rate {
            event.annual_rate = r;
        }
        if let Some(a) = self.repayment_amount {
            event.repayment_amount = a;
        }
        if let Some(c) = self.repayment_cadence {
            event.repayment_cadence = c;
        }
        self.fixed_expiry.apply_to(&mut event.fixed_expiry);
        self.offset_balance.apply_to(&mut event.offset_balance);
        self.manual_balance.apply_to(&mut event.manual_balance);
        self.lender.apply_to(&mut event.lender);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenancyEventPatch {
    pub kind: Option<TenancyEventKind>,
    pub effective_date: Option<Date>,
    pub weekly_rent: FieldPatch<f64>,
    pub lease_term_months: FieldPatch<i32>,
}

impl TenancyEventPatch {
    pub fn apply(&self, event: &mut TenancyEvent) {
        if let Some(k) = self.kind {
            event.kind = k;
        }
        if let Some(d) = self.effective_date {
            event.effective_date = d;
        }
        self.weekly_rent.apply_to(&mut event.weekly_rent);
        self.lease_term_months.apply_to(&mut event.lease_term_months);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringCostEventPatch {
    pub effective_date: Option<Date>,
    pub end_date: FieldPatch<Date>,
    pub category: Option<String>,
    pub fee_type: Option<FeeType>,
    pub amount: Option<f64>,
    pub cadence: Option<Cadence>,
}

impl RecurringCostEventPatch {
    pub fn apply(&self, event: &mut RecurringCostEvent) {
        if let Some(d) = self.effective_date {
            event.effective_date = d;
        }
        self.end_date.apply_to(&mut event.end_date);
        if let Some(c) = &self.category {
            event.category = c.clone();
        }
        if let Some(t) = self.fee_type {
            event.fee_type = t;
        }
        if let Some(a) = self.amount {
            event.amount = a;
        }
        if let Some(c) = self.cadence {
            event.cadence = c;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OneOffEventPatch {
    pub date: Option<Date>,
    pub amount: Option<f64>,
    pub category: Option<String>,
}

impl OneOffEventPatch {
    pub fn apply(&self, event: &mut OneOffEvent) {
        if let Some(d) = self.date {
            event.date = d;
        }
        if let Some(a) = self.amount {
            event.amount = a;
        }
        if let Some(c) = &self.category {
            event.category = c.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationEventPatch {
    pub date: Option<Date>,
    pub value: Option<f64>,
    pub source: FieldPatch<String>,
}

impl ValuationEventPatch {
    pub fn apply(&self, event: &mut ValuationEvent) {
        if let Some(d) = self.date {
            event.date = d;
        }
        if let Some(v) = self.value {
            event.value = v;
        }
        self.source.apply_to(&mut event.source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn sample_loan() -> LoanEvent {
        LoanEvent {
            effective_date: date(2024, 11, 1),
            loan_type: LoanType::InterestOnly,
            rate_type: RateType::Variable,
            annual_rate: 0.0574,
            repayment_amount: 2_070.0,
            repayment_cadence: Cadence::Monthly,
            fixed_expiry: None,
            offset_balance: Some(15_000.0),
            manual_balance: None,
            lender: Some("Westpac".to_string()),
        }
    }

    #[test]
    fn test_default_patch_is_identity() {
        let mut event = sample_loan();
        LoanEventPatch::default().apply(&mut event);
        assert_eq!(event, sample_loan());
    }

    #[test]
    fn test_set_overwrites_only_named_fields() {
        let mut event = sample_loan();
        let patch = LoanEventPatch {
            annual_rate: Some(0.0612),
            manual_balance: FieldPatch::Set(431_167.12),
            ..Default::default()
        };
        patch.apply(&mut event);

        assert_eq!(event.annual_rate, 0.0612);
        assert_eq!(event.manual_balance, Some(431_167.12));
        // Untouched fields survive
        assert_eq!(event.offset_balance, Some(15_000.0));
        assert_eq!(event.lender.as_deref(), Some("Westpac"));
    }

    #[test]
    fn test_clear_is_distinct_from_keep() {
        let mut kept = sample_loan();
        let mut cleared = sample_loan();

        LoanEventPatch {
            offset_balance: FieldPatch::Keep,
            ..Default::default()
        }
        .apply(&mut kept);
        LoanEventPatch {
            offset_balance: FieldPatch::Clear,
            ..Default::default()
        }
        .apply(&mut cleared);

        assert_eq!(kept.offset_balance, Some(15_000.0));
        assert_eq!(cleared.offset_balance, None);
    }

    #[test]
    fn test_tenancy_patch_end_clears_rent() {
        let mut event = TenancyEvent {
            kind: TenancyEventKind::Start,
            effective_date: date(2024, 11, 15),
            weekly_rent: Some(424.0),
            lease_term_months: Some(12),
        };
        TenancyEventPatch {
            kind: Some(TenancyEventKind::End),
            weekly_rent: FieldPatch::Clear,
            ..Default::default()
        }
        .apply(&mut event);

        assert_eq!(event.kind, TenancyEventKind::End);
        assert_eq!(event.weekly_rent, None);
        assert_eq!(event.lease_term_months, Some(12));
    }
}
