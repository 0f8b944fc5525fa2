//! Domain model: pods, their declared requirements and the aggregation over them.

pub mod aggregator;
pub mod pod;
pub mod requirements;
