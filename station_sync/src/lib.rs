//! Weather station ETL core: reconciles the station dimension, merges
//! observation facts, and sequences one run per station.
//!
//! - [`station`] : type-1 upsert of `dim_station`
//! - [`observation`] : atomic merge into `fact_observation`
//! - [`pipeline`] : the run state machine tying provider and storage together
//! - [`insights`] : read-only aggregates over the finished tables

#![deny(missing_docs)]

pub mod config;
pub mod db;
pub mod error;
pub mod insights;
pub mod models;
pub mod observation;
pub mod pipeline;
#[allow(missing_docs)]
pub mod schema;
pub mod station;
pub mod tz;
