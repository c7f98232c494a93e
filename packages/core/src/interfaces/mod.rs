//! Network interfaces configuration
//!
//! Typed adapter records plus the reader/writer for the interfaces file.

mod file;
mod record;

pub use file::{Adapter, InterfacesFile, backup_path};
pub use record::{
    AdapterRecord, AddressConfig, AddressSource, FAMILY_INET, InterfaceName, LOOPBACK,
    StaticParams,
};
