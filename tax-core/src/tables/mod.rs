pub mod registry;

pub use registry::{TableError, TaxTables};
