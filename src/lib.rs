pub mod chart;
pub mod config;
pub mod ingest;
pub mod store;
pub mod version;
pub mod web;
