pub mod defaults;
mod types;

pub use defaults::{DEFAULT_PATTERN, default_site_registry};
pub use types::{CollectionConfig, CollectionRegistry, GlobLoaderConfig};
