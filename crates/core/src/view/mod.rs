//! Pure derivations from cached reads plus page state to what is rendered.

pub mod dashboard;
pub mod reports;
pub mod users;

pub use dashboard::{format_metric, kpi_cards, KpiCard};
pub use reports::{
    normalize_history, report_cards, FinancialTotals, PatientTotals, ReportCard, ReportFilters,
    TherapistTotals,
};
pub use users::{derive_user_list, select_user_source, Filter, SortDirection, SortKey, UserListState};
