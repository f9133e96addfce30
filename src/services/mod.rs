//! TrueNAS API service implementations.

mod pool_dataset;

pub use pool_dataset::*;
