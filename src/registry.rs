//! Colormap registry and shared-namespace bridge.
//!
//! The [`Registry`] owns the local name → colormap table built during
//! the discovery pass and publishes every entry into a shared
//! [`SharedNamespace`] — the process-wide table that stands in for the
//! host plotting library's colormap namespace. Lookups fall through
//! from the local table to the shared namespace, so third-party
//! colormaps registered there remain reachable through this crate.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::colormap::{self, Colormap, ColorSequence, REVERSED_SUFFIX};
use crate::error::{BadmapError, Result};
use crate::loader::{self, RawSource};

/// Behavior when a name being registered already exists in the shared
/// namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Replace the existing entry silently (matches the host plotting
    /// library's own registration behavior).
    #[default]
    Overwrite,
    /// Refuse to register and report a Collision error, leaving the
    /// existing entry untouched.
    Reject,
}

/// The shared colormap namespace this registry publishes into.
///
/// Owned conceptually by the host plotting ecosystem, not by this
/// crate; injected into the [`Registry`] so the core stays testable
/// with in-memory tables.
pub trait SharedNamespace: Send + Sync {
    /// Insert or replace an entry.
    fn publish(&self, name: &str, cmap: Arc<Colormap>);

    /// Look up an entry by name.
    fn lookup(&self, name: &str) -> Option<Arc<Colormap>>;

    /// Whether an entry with this name exists.
    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

/// A plain in-memory [`SharedNamespace`], usable standalone in tests
/// and embedded by [`process_namespace`] for the process-wide table.
#[derive(Default)]
pub struct MemoryNamespace {
    table: RwLock<HashMap<String, Arc<Colormap>>>,
}

impl MemoryNamespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Whether the namespace holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }
}

impl SharedNamespace for MemoryNamespace {
    fn publish(&self, name: &str, cmap: Arc<Colormap>) {
        self.table.write().insert(name.to_string(), cmap);
    }

    fn lookup(&self, name: &str) -> Option<Arc<Colormap>> {
        self.table.read().get(name).cloned()
    }

    fn contains(&self, name: &str) -> bool {
        self.table.read().contains_key(name)
    }
}

/// The process-wide shared namespace.
///
/// One table per process, shared by every registry that does not inject
/// its own namespace.
pub fn process_namespace() -> Arc<MemoryNamespace> {
    static NAMESPACE: once_cell::sync::Lazy<Arc<MemoryNamespace>> =
        once_cell::sync::Lazy::new(|| Arc::new(MemoryNamespace::new()));
    NAMESPACE.clone()
}

/// Summary of one discovery/registration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Sources registered (forward maps; reverses are in addition).
    pub loaded: usize,
    /// Sources skipped because of a per-source failure.
    pub skipped: usize,
}

/// The local colormap table plus its bridge into the shared namespace.
pub struct Registry {
    entries: HashMap<String, Arc<Colormap>>,
    // Discovery order of forward names, one entry per name.
    order: Vec<String>,
    namespace: Arc<dyn SharedNamespace>,
    policy: CollisionPolicy,
}

impl Registry {
    /// Create an empty registry publishing into the given namespace.
    pub fn new(namespace: Arc<dyn SharedNamespace>, policy: CollisionPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            namespace,
            policy,
        }
    }

    /// Create an empty registry over the process-wide namespace.
    pub fn with_process_namespace(policy: CollisionPolicy) -> Self {
        Self::new(process_namespace(), policy)
    }

    /// The collision policy this registry was built with.
    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Change the collision policy for subsequent registrations.
    /// Used when a re-initialization pass carries a new configuration.
    pub fn set_policy(&mut self, policy: CollisionPolicy) {
        self.policy = policy;
    }

    /// Register one colormap under its own name and publish it into
    /// the shared namespace.
    ///
    /// A name already present in the shared namespace but not owned by
    /// this registry is a collision: under
    /// [`CollisionPolicy::Overwrite`] the shared entry is replaced
    /// (with a diagnostic), under [`CollisionPolicy::Reject`] the call
    /// fails and the existing entry is left untouched. Re-registering a
    /// name this registry already owns — a fresh initialization pass,
    /// or a source whose own name claims the reserved `_r` slot of an
    /// earlier source — replaces the entry in place, keeps its original
    /// discovery position and logs the replacement.
    pub fn register(&mut self, cmap: Colormap) -> Result<()> {
        let name = cmap.name().to_string();
        let already_local = self.entries.contains_key(&name);

        if already_local {
            warn!(name = %name, "Replacing previously registered colormap");
        } else if self.namespace.contains(&name) {
            match self.policy {
                CollisionPolicy::Reject => {
                    return Err(BadmapError::Collision { name });
                }
                CollisionPolicy::Overwrite => {
                    debug!(name = %name, "Overwriting existing shared-namespace colormap");
                }
            }
        }

        let cmap = Arc::new(cmap);
        self.namespace.publish(&name, cmap.clone());
        if !already_local {
            self.order.push(name.clone());
        }
        self.entries.insert(name, cmap);
        Ok(())
    }

    /// Register a forward/reverse pair produced by the colormap factory.
    pub fn register_pair(&mut self, forward: Colormap, reverse: Colormap) -> Result<()> {
        self.register(forward)?;
        self.register(reverse)
    }

    /// Build and register the forward and reverse colormaps for one
    /// normalized palette.
    pub fn register_sequence(
        &mut self,
        name: impl Into<String>,
        sequence: ColorSequence,
    ) -> Result<()> {
        let (forward, reverse) = colormap::build(name, sequence);
        self.register_pair(forward, reverse)
    }

    /// Resolve a name to a colormap.
    ///
    /// Names registered here resolve from the local table; anything
    /// else falls through to the shared namespace, so pre-existing
    /// third-party colormaps stay reachable.
    pub fn resolve(&self, name: &str) -> Result<Arc<Colormap>> {
        if let Some(cmap) = self.entries.get(name) {
            return Ok(cmap.clone());
        }
        self.namespace
            .lookup(name)
            .ok_or_else(|| BadmapError::NotFound {
                name: name.to_string(),
            })
    }

    /// Names registered by this registry, in discovery order, with
    /// every reversed-map name (`*_r`) excluded. Reverse maps stay
    /// resolvable; they are just not listed as first-class maps.
    pub fn names(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|name| !name.ends_with(REVERSED_SUFFIX))
            .cloned()
            .collect()
    }

    /// Number of entries in the local table (forward and reverse).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the local table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the registration pass over in-memory sources.
    ///
    /// Each source is normalized, built into a forward/reverse pair and
    /// registered. A failing source is logged with its identity and
    /// cause and never aborts the rest of the pass.
    pub fn load_sources(&mut self, sources: &[RawSource]) -> LoadStats {
        let mut stats = LoadStats::default();
        for source in sources {
            match loader::load(source) {
                Ok(sequence) => match self.register_sequence(&source.name, sequence) {
                    Ok(()) => stats.loaded += 1,
                    Err(e) => {
                        warn!(name = %source.name, error = %e, "Could not register colormap");
                        stats.skipped += 1;
                    }
                },
                Err(e) => {
                    warn!(name = %source.name, error = %e, "Could not load colormap source");
                    stats.skipped += 1;
                }
            }
        }
        stats
    }

    /// Run the discovery and registration pass over a source directory.
    ///
    /// Fails only if the directory itself cannot be enumerated;
    /// per-source failures are contained exactly as in
    /// [`Registry::load_sources`].
    pub fn load_dir(&mut self, dir: &Path) -> Result<LoadStats> {
        let paths = loader::discover_sources(dir)?;
        let mut stats = LoadStats::default();
        for path in &paths {
            match loader::load_file(path) {
                Ok((name, sequence)) => match self.register_sequence(&name, sequence) {
                    Ok(()) => stats.loaded += 1,
                    Err(e) => {
                        warn!(name = %name, error = %e, "Could not register colormap");
                        stats.skipped += 1;
                    }
                },
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Could not load colormap source");
                    stats.skipped += 1;
                }
            }
        }
        crate::logging::log_registry_stats(dir, stats.loaded, stats.skipped);
        Ok(stats)
    }
}
