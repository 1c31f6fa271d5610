pub mod draft;
pub mod entry;
pub mod ledger;
pub mod settings;
pub mod snapshot;
pub mod summary;
