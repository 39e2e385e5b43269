pub mod activity;
pub mod snapshot;
pub mod summary;
pub mod upstream;
