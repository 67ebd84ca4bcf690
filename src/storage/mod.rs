//! Device records and the CSV catalog they are written to.

pub mod catalog;
pub mod model;

pub use catalog::{Catalog, CatalogError};
pub use model::{Bandwidth, DeviceRecord, HostFacts};
