//! Memoized (grammar, theme) resolution with fallback substitution.
//!
//! Keys are compared exactly: no trimming or case folding. Callers must
//! pass canonical identifiers, since `"Rust"` and `"rust"` are cached as
//! two separate entries.
//!
//! Entries are never evicted. Construction is serialized per key: the map
//! lock is held only long enough to fetch the key's slot, and the slot lock
//! is held while the backend loads. Different keys build concurrently and
//! one missing key is built once however many callers race for it.
//! A failed build removes its empty slot again, so bad identifiers do not
//! accumulate in the map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
use tracing::{debug, warn};

use crate::error::RenderError;
use crate::service::HighlightBackend;

/// Exact-match cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrammarThemeKey {
    pub language: String,
    pub theme: String,
}

impl GrammarThemeKey {
    pub fn new(language: &str, theme: &str) -> Self {
        Self {
            language: language.to_string(),
            theme: theme.to_string(),
        }
    }
}

/// Where a cached grammar came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarSource {
    Requested,
    /// The requested language was unknown; the fallback grammar stands in.
    Fallback,
}

/// A loaded grammar and theme pair.
pub struct CachedEntry<B: HighlightBackend> {
    pub grammar: B::Grammar,
    pub theme: B::Theme,
    pub source: GrammarSource,
}

/// Loads the grammar for `language`, or the `fallback` grammar when the
/// backend does not know `language` or fails to load it.
///
/// # Errors
/// [`RenderError::GrammarUnavailable`] when the fallback grammar is missing
/// too, or the backend's error when loading the fallback fails.
pub fn resolve_grammar_with_fallback<B: HighlightBackend>(
    backend: &B,
    language: &str,
    fallback: &str,
) -> Result<(B::Grammar, GrammarSource), RenderError> {
    match backend.load_grammar(language) {
        Ok(Some(grammar)) => return Ok((grammar, GrammarSource::Requested)),
        Ok(None) => {
            warn!(language, fallback, "no grammar registered; using fallback");
        }
        Err(err) => {
            warn!(language, fallback, error = %err, "grammar load failed; using fallback");
        }
    }

    let unavailable = || RenderError::GrammarUnavailable {
        language: language.to_string(),
        fallback: fallback.to_string(),
    };
    if language == fallback {
        return Err(unavailable());
    }
    backend
        .load_grammar(fallback)?
        .map(|grammar| (grammar, GrammarSource::Fallback))
        .ok_or_else(unavailable)
}

type Slot<B> = Arc<Mutex<Option<Arc<CachedEntry<B>>>>>;

fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("{} mutex was poisoned; recovering", what);
            poisoned.into_inner()
        }
    }
}

/// Process-lifetime cache of resolved (grammar, theme) pairs.
pub struct ResolverCache<B: HighlightBackend> {
    backend: B,
    fallback_language: String,
    entries: Mutex<HashMap<GrammarThemeKey, Slot<B>>>,
}

impl<B: HighlightBackend> ResolverCache<B> {
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// - `backend`: loads grammars and themes on a miss.
    /// - `fallback_language`: grammar id substituted for unknown languages.
    pub fn new(backend: B, fallback_language: &str) -> Self {
        Self {
            backend,
            fallback_language: fallback_language.to_string(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    /// Returns the cached pair for `(language, theme)`, building it on a miss.
    ///
    /// An unknown language caches the fallback grammar under the original
    /// key, so later lookups never retry the unknown language. Failures
    /// (unknown theme, missing fallback) are not cached.
    ///
    /// # Errors
    /// Propagates [`RenderError::UnknownTheme`] and
    /// [`RenderError::GrammarUnavailable`] from construction.
    pub fn resolve(
        &self,
        language: &str,
        theme: &str,
    ) -> Result<Arc<CachedEntry<B>>, RenderError> {
        let key = GrammarThemeKey::new(language, theme);
        let slot = {
            let mut entries = lock_or_recover(&self.entries, "resolver cache");
            entries.entry(key.clone()).or_default().clone()
        };

        let mut guard = lock_or_recover(&slot, "resolver slot");
        if let Some(entry) = guard.as_ref() {
            debug!(language, theme, "resolver cache hit");
            return Ok(entry.clone());
        }

        debug!(language, theme, "resolver cache miss");
        match self.build(language, theme) {
            Ok(entry) => {
                let entry = Arc::new(entry);
                *guard = Some(entry.clone());
                Ok(entry)
            }
            Err(err) => {
                drop(guard);
                self.discard_empty_slot(&key, &slot);
                Err(err)
            }
        }
    }

    /// Drops the map's slot for `key` if it is still `slot` and still empty.
    ///
    /// A slot another caller is building into (locked) or has filled is
    /// kept. The slot is probed with `try_lock` so the map lock is never
    /// held across someone else's build.
    fn discard_empty_slot(&self, key: &GrammarThemeKey, slot: &Slot<B>) {
        let mut entries = lock_or_recover(&self.entries, "resolver cache");
        let unused = match entries.get(key) {
            Some(current) if Arc::ptr_eq(current, slot) => match current.try_lock() {
                Ok(guard) => guard.is_none(),
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().is_none(),
                Err(TryLockError::WouldBlock) => false,
            },
            _ => false,
        };
        if unused {
            entries.remove(key);
        }
    }

    fn build(&self, language: &str, theme: &str) -> Result<CachedEntry<B>, RenderError> {
        let theme = self.backend.load_theme(theme)?;
        let (grammar, source) =
            resolve_grammar_with_fallback(&self.backend, language, &self.fallback_language)?;
        Ok(CachedEntry {
            grammar,
            theme,
            source,
        })
    }

    /// Number of successfully built entries.
    pub fn len(&self) -> usize {
        let entries = lock_or_recover(&self.entries, "resolver cache");
        entries
            .values()
            .filter(|slot| lock_or_recover(slot, "resolver slot").is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        lock_or_recover(&self.entries, "resolver cache").len()
    }
}
