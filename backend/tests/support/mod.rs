use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Serializes tests that touch process-wide environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with the given environment changes applied, restoring the
/// previous values afterwards (also on panic).
///
/// Each change is `(key, Some(value))` to set or `(key, None)` to remove.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // A panicking test must not poison every later env test
    let _lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let _restore = EnvRestore::apply(changes);
    f()
}

struct EnvRestore {
    previous: HashMap<String, Option<String>>,
}

impl EnvRestore {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let mut previous = HashMap::new();
        for (key, value) in changes {
            previous
                .entry(key.to_string())
                .or_insert_with(|| std::env::var(key).ok());
            set_or_remove(key, *value);
        }
        Self { previous }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain() {
            set_or_remove(&key, value.as_deref());
        }
    }
}

fn set_or_remove(key: &str, value: Option<&str>) {
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
}
