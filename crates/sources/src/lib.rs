//! ChainHopper Sources
//!
//! Quote source plugin framework: a generic HTTP venue plugin driven by
//! per-venue profiles, the built-in venue table, and the per-chain registry
//! the aggregator fans out over.

pub mod http_source;
pub mod profiles;
pub mod registry;
pub mod venue;

pub use http_source::HttpVenueSource;
pub use profiles::builtin_profiles;
pub use registry::SourceRegistry;
pub use venue::{VenueProfile, WireFormat};

pub use chainhopper_types::{QuoteSource, SourceError, SourceResult};
