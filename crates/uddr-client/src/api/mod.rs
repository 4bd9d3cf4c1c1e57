//! API endpoint modules.

mod account;
mod category;
mod decision;
mod doh;
mod logs;
mod overview;
mod reports;

pub use account::{AccountApi, OrganizationApi, UserApi};
pub use category::CategoryApi;
pub use decision::{BaselineApi, DecisionApi};
pub use doh::{DohClient, Lookup};
pub use logs::{ArtifactHistogramBuilder, LogsApi};
pub use overview::{AggregatesRequestBuilder, OverviewApi};
pub use reports::{ReportsApi, ReportsListBuilder};
