mod events;
mod ids;
mod patch;
mod results;

pub use events::{
    Cadence, FeeType, LoanEvent, LoanType, OneOffEvent, PropertyEvents, PurchaseEvent, RateType,
    RecurringCostEvent, TenancyEvent, TenancyEventKind, ValuationEvent,
};
pub use ids::{PropertyId, PropertyYearKey};
pub use patch::{
    FieldPatch, LoanEventPatch, OneOffEventPatch, PurchaseEventPatch, RecurringCostEventPatch,
    TenancyEventPatch, ValuationEventPatch,
};
pub use results::{
    BalanceSource, CategoryTotals, ForecastPoint, KpiSnapshot, LoanPosition, PeriodKpis,
    RentAccrual,
};
