pub mod ledger;
pub mod workspace;
