//! Registry of known identifier syntaxes.
//!
//! A registry owns two pieces of shared state:
//! - the separator, claimed exactly once and never changed afterwards
//! - the set of registered syntaxes, keyed by canonical key, growing monotonically
//!
//! A fresh registry holds only the sentinel syntax `["UNDEFINED"]`. The first
//! real registration evicts it for good.

use std::sync::OnceLock;

use indexmap::map::Entry;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::input::Properties;
use crate::syntax::{Syntax, SyntaxInput, DEFAULT_SEPARATOR, PLACEHOLDER};

static GLOBAL: OnceLock<SyntaxRegistry> = OnceLock::new();

/// Store of the separator and every registered syntax.
///
/// Thread-safe; registration serializes on a write lock and resolution reads
/// under a shared lock.
///
/// # Separator lock-in
///
/// The separator is write-once. Whichever call first sets or reads it fixes
/// it for the registry's lifetime; later [`set_separator`](Self::set_separator)
/// calls are ignored. Identifiers built with a `separator` option therefore
/// only get that separator when they are the first to touch the registry.
#[derive(Debug)]
pub struct SyntaxRegistry {
    separator: OnceLock<String>,
    syntaxes: RwLock<IndexMap<String, Syntax>>,
}

impl Default for SyntaxRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxRegistry {
    /// Creates a registry holding only the sentinel syntax, separator unclaimed.
    pub fn new() -> Self {
        let mut syntaxes = IndexMap::new();
        syntaxes.insert(PLACEHOLDER.to_string(), Syntax::sentinel());
        Self {
            separator: OnceLock::new(),
            syntaxes: RwLock::new(syntaxes),
        }
    }

    /// Creates a registry whose separator is already locked to `separator`.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        let registry = Self::new();
        registry.set_separator(separator);
        registry
    }

    /// Process-lifetime registry for callers that do not inject their own.
    pub fn global() -> &'static SyntaxRegistry {
        GLOBAL.get_or_init(SyntaxRegistry::new)
    }

    /// Claims the separator if nobody has yet.
    ///
    /// Returns `true` when this call fixed the separator. Any later attempt is
    /// a silent no-op from the caller's point of view.
    pub fn set_separator(&self, separator: impl Into<String>) -> bool {
        let separator = separator.into();
        match self.separator.set(separator) {
            Ok(()) => {
                debug!(separator = %self.separator(), "separator locked");
                true
            }
            Err(rejected) => {
                if rejected != self.separator() {
                    debug!(
                        current = %self.separator(),
                        rejected = %rejected,
                        "ignoring separator change after lock-in"
                    );
                }
                false
            }
        }
    }

    /// The active separator, locking in the default `/` if none was set.
    pub fn separator(&self) -> &str {
        self.separator.get_or_init(|| DEFAULT_SEPARATOR.to_string())
    }

    /// Normalizes a joined string, name list or property map into a syntax.
    pub fn normalize(&self, input: impl Into<SyntaxInput>) -> Syntax {
        Syntax::normalize(&input.into(), self.separator())
    }

    /// Registers every non-empty candidate.
    ///
    /// Registration is idempotent per name set: a candidate whose names are
    /// already registered keeps the first-registered order. Returns the number
    /// of syntaxes that were new.
    pub fn register<I, S>(&self, candidates: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<SyntaxInput>,
    {
        let mut added = 0;
        for candidate in candidates {
            let syntax = self.normalize(candidate);
            if !syntax.is_empty() && self.insert(syntax).1 {
                added += 1;
            }
        }
        added
    }

    /// Resolves `query` against the registry.
    ///
    /// - An empty query returns every registered syntax in registration order.
    /// - A query whose name set is registered returns that syntax, in its
    ///   registered order.
    /// - Anything else returns the normalized query itself, registering it
    ///   first when `register` is set.
    pub fn resolve(&self, query: impl Into<SyntaxInput>, register: bool) -> Vec<Syntax> {
        let query = self.normalize(query);
        if query.is_empty() {
            return self.syntaxes();
        }
        vec![self.resolve_syntax(query, register)]
    }

    /// Single-syntax form of [`resolve`](Self::resolve) for an already
    /// normalized, non-empty query.
    pub(crate) fn resolve_syntax(&self, query: Syntax, register: bool) -> Syntax {
        if let Some(found) = self.lookup(&query) {
            trace!(syntax = ?found.names(), "resolved registered syntax");
            return found;
        }
        if register {
            return self.insert(query).0;
        }
        trace!(syntax = ?query.names(), "using unregistered syntax as given");
        query
    }

    /// Snapshot of the registered syntaxes in registration order.
    pub fn syntaxes(&self) -> Vec<Syntax> {
        self.syntaxes.read().values().cloned().collect()
    }

    /// Registered syntaxes whose names are all keys of `properties`.
    ///
    /// The sentinel never matches.
    pub fn matching(&self, properties: &Properties) -> Vec<Syntax> {
        self.syntaxes
            .read()
            .values()
            .filter(|syntax| !syntax.is_sentinel() && syntax.is_satisfied_by(properties))
            .cloned()
            .collect()
    }

    /// True when a syntax with the same name set as `query` is registered.
    pub fn contains(&self, query: impl Into<SyntaxInput>) -> bool {
        let query = self.normalize(query);
        !query.is_empty() && self.lookup(&query).is_some()
    }

    /// Number of real syntaxes registered; the sentinel is not counted.
    pub fn len(&self) -> usize {
        self.syntaxes
            .read()
            .values()
            .filter(|syntax| !syntax.is_sentinel())
            .count()
    }

    /// True while only the sentinel is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, query: &Syntax) -> Option<Syntax> {
        let key = query.canonical_key(self.separator());
        self.syntaxes
            .read()
            .get(&key)
            .filter(|found| found.same_names(query))
            .cloned()
    }

    /// Inserts under the write lock; returns the stored syntax and whether it was new.
    fn insert(&self, syntax: Syntax) -> (Syntax, bool) {
        if syntax.is_sentinel() {
            return (syntax, false);
        }
        let key = syntax.canonical_key(self.separator());
        let mut syntaxes = self.syntaxes.write();
        if syntaxes.shift_remove(PLACEHOLDER).is_some() {
            debug!("evicted sentinel syntax");
        }
        match syntaxes.entry(key) {
            Entry::Occupied(existing) => {
                if !existing.get().same_names(&syntax) {
                    debug!(
                        key = %existing.key(),
                        syntax = ?syntax.names(),
                        "canonical key collides with a different name set; keeping the registered syntax"
                    );
                    return (syntax, false);
                }
                (existing.get().clone(), false)
            }
            Entry::Vacant(slot) => {
                debug!(syntax = ?syntax.names(), "registered syntax");
                slot.insert(syntax.clone());
                (syntax, true)
            }
        }
    }
}
