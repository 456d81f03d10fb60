//! Package installation.
//!
//! - [`spec`] - Validated `name[==version]` specs
//! - [`executor`] - Preferred installer, fallback chain and import verification

pub mod executor;
pub mod spec;

pub use executor::{
    AttemptCounter, ExecutorOptions, InstallExecutor, InstallMethod, InstallSuccess,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_SETTLE_DELAY, FALLBACK_CHAIN,
};
pub use spec::{is_valid_distribution_name, PackageSpec};
