pub mod deriver;
pub mod query;
