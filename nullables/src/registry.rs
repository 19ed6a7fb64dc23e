//! Nullable TLD registry: records permitted labels in memory.

use std::collections::BTreeSet;
use std::sync::Mutex;

use dnsdao_governance::{RegistryError, TldRegistry};

pub struct NullRegistry {
    permitted: Mutex<BTreeSet<String>>,
    fail_permits: Mutex<bool>,
}

impl NullRegistry {
    pub fn new() -> Self {
        Self {
            permitted: Mutex::new(BTreeSet::new()),
            fail_permits: Mutex::new(false),
        }
    }

    /// Mark a label as permitted before any proposal runs.
    pub fn preload(&self, tld: &str) {
        self.permitted.lock().unwrap().insert(tld.to_string());
    }

    /// Make every `permit_tld` call fail with a backend error.
    pub fn fail_permits(&self, fail: bool) {
        *self.fail_permits.lock().unwrap() = fail;
    }

    pub fn permitted(&self) -> Vec<String> {
        self.permitted.lock().unwrap().iter().cloned().collect()
    }
}

impl Default for NullRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TldRegistry for NullRegistry {
    fn is_tld_permitted(&self, tld: &str) -> Result<bool, RegistryError> {
        Ok(self.permitted.lock().unwrap().contains(tld))
    }

    fn permit_tld(&self, tld: &str) -> Result<(), RegistryError> {
        if *self.fail_permits.lock().unwrap() {
            return Err(RegistryError::Backend("injected permit failure".into()));
        }
        if !self.permitted.lock().unwrap().insert(tld.to_string()) {
            return Err(RegistryError::AlreadyPermitted(tld.to_string()));
        }
        Ok(())
    }
}
