//! Core budget-drafting logic for the SentinelFi document agent.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! Document partitioning is reached through the [`document::DocumentPartitioner`]
//! trait, implemented elsewhere.
//!
//! # Modules
//!
//! - `document` - Partitioned document model and partitioner seam
//! - `extraction` - Header mapping, row validation and confidence scoring
//! - `draft` - End-to-end budget draft service

pub mod document;
pub mod draft;
pub mod extraction;
