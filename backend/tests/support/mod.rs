use std::collections::HashSet;
use std::io::Write;
use std::sync::Mutex;

use portal_metrics::config::CONFIG_ENV_VAR;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

/// Writes `toml` to a temporary policy file.
///
/// Keep the returned handle alive for as long as the path is used.
pub fn policy_file(toml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create policy file");
    file.write_all(toml.as_bytes()).expect("write policy file");
    file.flush().expect("flush policy file");
    file
}

/// Runs `f` with `PORTAL_CONFIG` pointing at a temporary file holding `toml`.
pub fn with_policy_env<F, R>(toml: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let file = policy_file(toml);
    let path = file.path().to_string_lossy().to_string();
    with_scoped_env(&[(CONFIG_ENV_VAR, Some(path.as_str()))], f)
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
