pub mod lister;
pub mod listing;
