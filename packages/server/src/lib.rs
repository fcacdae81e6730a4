// Startup Intelligence API
//
// Thin HTTP surface over the enrichment library: one endpoint to
// enrich a company website, one to score a company against the house
// thesis, and a health probe that treats demo mode as healthy.

pub mod config;
pub mod server;

pub use config::*;
