//! Data types shared across the enrichment pipeline.

pub mod company;
pub mod enrichment;
