use rustc_hash::FxHashMap;

/// Mutable name-to-value mapping for one interpretation run.
///
/// There are no nested scopes: every assignment lands in the same flat table.
/// A fresh `Environment` is created per run unless the host keeps one alive
/// across runs on purpose.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: FxHashMap<String, i64>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    pub fn set(&mut self, name: String, value: i64) {
        self.values.insert(name, value);
    }
}
