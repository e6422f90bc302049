pub mod ledger;
pub mod pnr;

pub use ledger::{BookingLedger, LedgerPolicy};
