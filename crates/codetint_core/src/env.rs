//! Scoped overrides of `CODETINT_*` variables for tests.
//!
//! Environment mutation is process-global, so every test that touches a
//! variable read by [`crate::RenderConfig::from_env`] or the CLI parser
//! holds [`env_lock`] for as long as its guards live.

use std::sync::{Mutex, OnceLock};

/// Lock serializing environment reads and writes across test threads.
///
/// # Returns
/// The same process-wide mutex on every call.
pub fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Sets `key` to `value`, or unsets it when `value` is `None`.
#[allow(unused_unsafe)]
fn write_var(key: &str, value: Option<&str>) {
    // SAFETY: callers hold `env_lock`, so no other thread reads the
    // environment concurrently.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// Overrides one variable and puts the prior value back on drop.
#[must_use = "the override is undone as soon as the guard is dropped"]
pub struct EnvGuard {
    key: String,
    saved: Option<String>,
}

impl EnvGuard {
    fn replace(key: &str, value: Option<&str>) -> Self {
        let saved = std::env::var(key).ok();
        write_var(key, value);
        Self {
            key: key.to_string(),
            saved,
        }
    }

    /// Sets `key=value` for the guard's lifetime.
    ///
    /// # Arguments
    /// - `key`: variable name, e.g. [`crate::constants::THEME_ENV`].
    /// - `value`: value visible until the guard drops.
    pub fn set(key: &str, value: &str) -> Self {
        Self::replace(key, Some(value))
    }

    /// Unsets `key` for the guard's lifetime.
    pub fn remove(key: &str) -> Self {
        Self::replace(key, None)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        write_var(&self.key, self.saved.as_deref());
    }
}
