//! Business logic layer
//!
//! Services sit between the storage repositories and the command-line
//! front end. Ledger and aggregation calls take a `Session`, which only a
//! successful login produces.

pub mod aggregation;
pub mod credentials;
pub mod ledger;
pub mod session;

pub use aggregation::{AggregationService, CategoryTotal, DetailSort, DetailSortKey};
pub use credentials::CredentialService;
pub use ledger::LedgerService;
pub use session::{Session, SessionState};

pub use crate::models::BreakdownMode;
