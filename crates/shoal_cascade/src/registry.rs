use crate::{CascadeError, Result};

use serde::{Deserialize, Serialize};

/// Identifies an entry in a `Registry`. Never reused.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct RegistryId(u64);

/// An ordered list of registered values. Iteration visits values in the order they were added.
///
/// `tear_down` drops every value and refuses any further additions, which is how an owner shuts down without leaving stale
/// registrations behind.
pub struct Registry<V> {
    entries: Vec<(RegistryId, V)>,
    next_id: u64,
    torn_down: bool,
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            torn_down: false,
        }
    }
}

impl<V> Registry<V> {
    pub fn add(&mut self, value: V) -> Result<RegistryId> {
        if self.torn_down {
            return Err(CascadeError::TornDown);
        }

        let id = RegistryId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, value));

        Ok(id)
    }

    /// Returns the removed value, or `None` if `id` was never added or was already removed.
    pub fn remove(&mut self, id: RegistryId) -> Option<V> {
        let position = self.entries.iter().position(|(i, _)| *i == id)?;

        Some(self.entries.remove(position).1)
    }

    pub fn tear_down(&mut self) {
        self.entries.clear();
        self.torn_down = true;
    }

    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: RegistryId) -> Option<&V> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_preserve_order() {
        let mut registry = Registry::default();
        let a = registry.add("a").unwrap();
        let b = registry.add("b").unwrap();
        let c = registry.add("c").unwrap();

        assert_eq!(registry.remove(b), Some("b"));
        assert_eq!(registry.remove(b), None);
        assert_eq!(registry.iter().cloned().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(registry.get(a), Some(&"a"));
        assert_eq!(registry.get(c), Some(&"c"));

        let d = registry.add("d").unwrap();
        assert_ne!(d, b);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn torn_down_registry_refuses_additions() {
        let mut registry = Registry::default();
        registry.add(1).unwrap();
        registry.tear_down();

        assert!(registry.is_empty());
        assert!(registry.is_torn_down());
        assert!(matches!(registry.add(2), Err(CascadeError::TornDown)));
    }
}
