// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thread-safe set of requested type names

use citydb_model::QualifiedName;
use parking_lot::RwLock;
use rustc_hash::FxHashSet;

/// Requested type names, grown with every name proven nested
///
/// Readers share the lock. Insertions are monotonic and idempotent, so
/// concurrent workers proving the same name only repeat work.
#[derive(Debug, Default)]
pub struct RequestedTypeSet {
    names: RwLock<FxHashSet<QualifiedName>>,
}

impl RequestedTypeSet {
    /// Create a set from the configured names
    pub fn new(names: impl IntoIterator<Item = QualifiedName>) -> Self {
        Self {
            names: RwLock::new(names.into_iter().collect()),
        }
    }

    /// Check membership by exact name
    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.names.read().contains(name)
    }

    /// Add a name, returning whether it was new
    pub fn insert(&self, name: QualifiedName) -> bool {
        // Skip the exclusive lock when another worker got here first
        if self.contains(&name) {
            return false;
        }
        self.names.write().insert(name)
    }

    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }

    /// Sorted snapshot of all names
    pub fn names(&self) -> Vec<QualifiedName> {
        let mut names: Vec<_> = self.names.read().iter().cloned().collect();
        names.sort();
        names
    }
}
