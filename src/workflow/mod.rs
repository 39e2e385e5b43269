pub mod collect;
pub mod fetch;
pub mod resolve;
