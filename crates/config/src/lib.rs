//! ChainHopper Config
//!
//! Chain registry and configuration loading: the static table of supported
//! chains, file/env overrides, and fallback USD price estimates.

pub mod loader;
pub mod prices;
pub mod registry;

pub use loader::{load_from_path, load_registry, ConfigError, CONFIG_PATH_ENV, RPC_OVERRIDE_PREFIX};
pub use prices::usd_estimate;
pub use registry::ChainRegistry;
