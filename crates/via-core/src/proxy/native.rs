//! Which global members get their receiver rebound.

use std::collections::HashSet;

use crate::host::HostObject;

/// Property names present on the real global when the layer initialized.
///
/// Captured once; members added later by page code are not in the set and
/// are never rebound.
#[derive(Debug, Clone, Default)]
pub struct NativePropertySet {
    names: HashSet<String>,
}

impl NativePropertySet {
    pub fn capture(global: &dyn HostObject) -> Self {
        Self {
            names: global.keys().into_iter().collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Naming heuristic: a leading uppercase letter marks a constructor.
///
/// Known misses: lowercase or vendor-prefixed constructors (`webkitURL`) are
/// treated as methods, and uppercase plain functions are treated as
/// constructors.
pub fn looks_like_constructor(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
