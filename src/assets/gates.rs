use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// One lock per key, so first-time imports of a key run once while imports
/// of other keys and cache readers carry on.
#[derive(Default)]
pub(crate) struct ImportGates {
    gates: Mutex<FxHashMap<String, Arc<Mutex<()>>>>,
}

impl ImportGates {
    /// The gate for `key`; callers hold its lock for the whole import.
    pub(crate) fn gate(&self, key: &str) -> Arc<Mutex<()>> {
        let mut gates = self.gates.lock();
        if let Some(gate) = gates.get(key) {
            return Arc::clone(gate);
        }
        let gate = Arc::new(Mutex::new(()));
        gates.insert(key.to_string(), Arc::clone(&gate));
        gate
    }
}
