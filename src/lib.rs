//! # badmap
//!
//! A collection of custom colormaps behind a process-wide registry.
//!
//! badmap discovers persisted palettes — JSON files of RGB(A) samples —
//! normalizes them into the unit interval, builds a lookup-table
//! colormap and its reversed counterpart for each one, and registers
//! both under unique names in a shared namespace that the host plotting
//! ecosystem also writes to. Calling code retrieves colormaps by name
//! and enumerates what was registered.
//!
//! ## Architecture
//!
//! - **Loader**: enumerates source files and normalizes raw samples
//! - **Colormap**: immutable palettes with piecewise-linear evaluation
//! - **Registry**: the name → colormap table plus the bridge into the
//!   shared namespace
//!
//! ## Usage
//!
//! ```no_run
//! badmap::initialize(&badmap::Config::for_dir("data"))?;
//!
//! let cmap = badmap::get_cmap("banana")?;
//! let rgba = cmap.eval(0.5);
//! for name in badmap::list_cmaps() {
//!     println!("{name}");
//! }
//! # Ok::<(), badmap::BadmapError>(())
//! ```

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

pub mod colormap;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod registry;

pub use colormap::{build, Colormap, ColorSequence, REVERSED_SUFFIX};
pub use config::Config;
pub use error::{BadmapError, Result};
pub use loader::RawSource;
pub use logging::init_tracing;
pub use registry::{
    process_namespace, CollisionPolicy, LoadStats, MemoryNamespace, Registry, SharedNamespace,
};

/// The process-global registry backing [`get_cmap`] and [`list_cmaps`].
static GLOBAL: Lazy<RwLock<Registry>> = Lazy::new(|| {
    RwLock::new(Registry::with_process_namespace(CollisionPolicy::default()))
});

/// Run the discovery and registration pass over the configured source
/// directory, populating the process-global registry.
///
/// Per-source failures are logged and skipped; the pass itself fails
/// only on invalid configuration or an unreadable directory.
/// Re-invoking with an unchanged store is idempotent: prior entries for
/// the names present are replaced with identical colormaps. Writes are
/// serialized through the registry lock.
pub fn initialize(config: &Config) -> Result<LoadStats> {
    config.validate()?;
    let mut registry = GLOBAL.write();
    registry.set_policy(config.collision_policy);
    registry.load_dir(&config.data_dir)
}

/// [`initialize`] with configuration taken from defaults and the
/// `BADMAP_DATA_DIR` environment variable.
pub fn initialize_from_env() -> Result<LoadStats> {
    initialize(&Config::from_env())
}

/// Get a colormap by name.
///
/// Resolves from the process-global registry first, then from the
/// shared namespace, so third-party colormaps registered there are
/// served transparently.
pub fn get_cmap(name: &str) -> Result<Arc<Colormap>> {
    GLOBAL.read().resolve(name)
}

/// List the names registered by this crate, in discovery order,
/// excluding reversed (`*_r`) maps.
pub fn list_cmaps() -> Vec<String> {
    GLOBAL.read().names()
}
