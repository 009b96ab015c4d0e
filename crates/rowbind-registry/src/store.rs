//! Process-wide descriptor store

use rowbind_core::TypeDescriptor;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared store of resolved type descriptors, keyed by type name
///
/// Lookup is a pure concurrent read. Registration is idempotent with
/// first-writer-wins semantics: when two pipeline runs race to generate a
/// descriptor for the same uncached type, the first `register` establishes
/// the canonical entry and every later writer observes it instead of
/// replacing it.
#[derive(Default)]
pub struct DescriptorStore {
    entries: RwLock<HashMap<String, Arc<TypeDescriptor>>>,
}

impl DescriptorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<TypeDescriptor>>> {
        match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<TypeDescriptor>>> {
        match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Look up a previously registered descriptor
    ///
    /// A miss returns `None`, never an error. Safe to call from concurrent
    /// pipeline runs.
    pub fn lookup(&self, type_name: &str) -> Option<Arc<TypeDescriptor>> {
        self.read().get(type_name).cloned()
    }

    /// Register a descriptor, returning the canonical stored entry
    ///
    /// If an entry for the type name already exists it is returned unchanged
    /// and the argument is discarded.
    pub fn register(&self, descriptor: TypeDescriptor) -> Arc<TypeDescriptor> {
        let mut entries = self.write();
        match entries.entry(descriptor.type_name.clone()) {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(slot) => slot.insert(Arc::new(descriptor)).clone(),
        }
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store holds no descriptors
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowbind_core::{FieldDescriptor, FieldType};

    fn descriptor(type_name: &str, field: &str) -> TypeDescriptor {
        TypeDescriptor::new(type_name, vec![FieldDescriptor::new(field, FieldType::Int)])
    }

    #[test]
    fn lookup_miss_is_none() {
        let store = DescriptorStore::new();
        assert!(store.lookup("example.Missing").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn register_then_lookup() {
        let store = DescriptorStore::new();
        store.register(descriptor("example.Customer", "id"));

        let found = store.lookup("example.Customer").unwrap();
        assert_eq!(found.field_names(), vec!["id"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn register_is_first_writer_wins() {
        let store = DescriptorStore::new();
        let first = store.register(descriptor("example.Customer", "id"));
        let second = store.register(descriptor("example.Customer", "other"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.field_names(), vec!["id"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn concurrent_registration_converges() {
        let store = Arc::new(DescriptorStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.register(descriptor("example.Racy", &format!("field{}", i)))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(store.len(), 1);
        let canonical = store.lookup("example.Racy").unwrap();
        for result in results {
            assert!(Arc::ptr_eq(&canonical, &result));
        }
    }
}
