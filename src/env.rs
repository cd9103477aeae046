use std::collections::HashMap;
use std::sync::Mutex;

/// Environment-variable seam: code under test asks this instead of reading
/// the process environment directly.
pub trait EnvSource: Send + Sync {
    /// The value for `key`, or `None` when unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// Seeded in-memory environment, isolated per instance.
#[derive(Default)]
pub struct StubEnv {
    vars: Mutex<HashMap<String, String>>,
}

impl StubEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds or overwrites a variable.
    pub fn set(&self, key: &str, value: &str) {
        self.vars
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Unsets a variable.
    pub fn remove(&self, key: &str) {
        self.vars.lock().unwrap().remove(key);
    }

    /// Snapshot of every seeded variable.
    pub fn vars(&self) -> HashMap<String, String> {
        self.vars.lock().unwrap().clone()
    }
}

impl EnvSource for StubEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.lock().unwrap().get(key).cloned()
    }
}

/// Passthrough to the real process environment, for the rare test that
/// wants it.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_env_serves_seeded_values() {
        let env = StubEnv::new();
        env.set("STRIPE_SECRET_KEY", "sk_test_mock");

        assert_eq!(env.var("STRIPE_SECRET_KEY").as_deref(), Some("sk_test_mock"));
        assert!(env.var("UNSET").is_none());
    }

    #[test]
    fn set_overwrites_and_remove_unsets() {
        let env = StubEnv::new();
        env.set("FLAG", "off");
        env.set("FLAG", "on");
        assert_eq!(env.var("FLAG").as_deref(), Some("on"));

        env.remove("FLAG");
        assert!(env.var("FLAG").is_none());
    }

    #[test]
    fn vars_snapshots_the_current_state() {
        let env = StubEnv::new();
        env.set("A", "1");
        env.set("B", "2");

        let snapshot = env.vars();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("A").map(String::as_str), Some("1"));
    }

    #[test]
    fn process_env_reads_the_real_environment() {
        // PATH is as close to universally present as it gets
        let env = ProcessEnv;
        assert!(env.var("PATH").is_some());
    }
}
