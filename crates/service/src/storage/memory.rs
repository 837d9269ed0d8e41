use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::errors::ServiceError;

/// In-memory document collection keyed by id.
///
/// Backs the `memory` repositories used by tests and `STORE=memory` runs. Ordering is by id so
/// listings are deterministic, matching the `ORDER BY id` of the SeaORM repositories.
pub struct MemoryCollection<V> {
    name: &'static str,
    inner: RwLock<BTreeMap<String, V>>,
}

impl<V: Clone> MemoryCollection<V> {
    pub fn new(name: &'static str) -> Self {
        Self { name, inner: RwLock::new(BTreeMap::new()) }
    }

    /// List all values in id order.
    pub async fn list(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    pub async fn get(&self, id: &str) -> Option<V> {
        let map = self.inner.read().await;
        map.get(id).cloned()
    }

    /// Values matching `pred`, in id order.
    pub async fn filter<F>(&self, pred: F) -> Vec<V>
    where
        F: Fn(&V) -> bool,
    {
        let map = self.inner.read().await;
        map.values().filter(|v| pred(v)).cloned().collect()
    }

    pub async fn find<F>(&self, pred: F) -> Option<V>
    where
        F: Fn(&V) -> bool,
    {
        let map = self.inner.read().await;
        map.values().find(|v| pred(v)).cloned()
    }

    /// Insert a new value; fails with `Duplicate` when the id is taken.
    pub async fn insert(&self, id: String, value: V) -> Result<V, ServiceError> {
        self.insert_unique(id, value, |_, _| false).await
    }

    /// Insert a new value unless the id is taken or `conflicts(existing, new)` holds for any
    /// stored value. The check and the write happen under one lock.
    pub async fn insert_unique<F>(&self, id: String, value: V, conflicts: F) -> Result<V, ServiceError>
    where
        F: Fn(&V, &V) -> bool,
    {
        let mut map = self.inner.write().await;
        if map.contains_key(&id) {
            return Err(ServiceError::Duplicate(format!("{} with id {} already exists", self.name, id)));
        }
        if map.values().any(|existing| conflicts(existing, &value)) {
            return Err(ServiceError::Duplicate(format!("{} violates a unique field", self.name)));
        }
        map.insert(id, value.clone());
        Ok(value)
    }

    /// Replace an existing value; fails with `NotFound` when the id is absent.
    pub async fn replace(&self, id: &str, value: V) -> Result<V, ServiceError> {
        self.replace_unique(id, value, |_, _| false).await
    }

    /// Replace an existing value unless `conflicts(other, new)` holds for another stored value.
    pub async fn replace_unique<F>(&self, id: &str, value: V, conflicts: F) -> Result<V, ServiceError>
    where
        F: Fn(&V, &V) -> bool,
    {
        let mut map = self.inner.write().await;
        if !map.contains_key(id) {
            return Err(ServiceError::not_found(self.name));
        }
        if map.iter().any(|(k, existing)| k != id && conflicts(existing, &value)) {
            return Err(ServiceError::Duplicate(format!("{} violates a unique field", self.name)));
        }
        map.insert(id.to_string(), value.clone());
        Ok(value)
    }

    /// Remove by id; returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut map = self.inner.write().await;
        map.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_collection_crud() -> Result<(), anyhow::Error> {
        let store = MemoryCollection::<String>::new("thing");
        assert!(store.is_empty().await);

        store.insert("b".into(), "2".into()).await?;
        store.insert("a".into(), "1".into()).await?;
        assert_eq!(store.list().await, vec!["1".to_string(), "2".to_string()]);
        assert!(matches!(store.insert("a".into(), "x".into()).await, Err(ServiceError::Duplicate(_))));

        store.replace("a", "10".into()).await?;
        assert_eq!(store.get("a").await.as_deref(), Some("10"));
        assert!(matches!(store.replace("zz", "x".into()).await, Err(ServiceError::NotFound(_))));

        assert_eq!(store.filter(|v| v.starts_with('1')).await, vec!["10".to_string()]);
        assert!(store.remove("a").await);
        assert!(!store.remove("a").await);
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn unique_conflicts_are_checked_against_other_entries() -> Result<(), anyhow::Error> {
        let store = MemoryCollection::<(String, String)>::new("user");
        let same_email = |a: &(String, String), b: &(String, String)| a.1 == b.1;
        store.insert_unique("u1".into(), ("u1".into(), "a@x.com".into()), same_email).await?;
        store.insert_unique("u2".into(), ("u2".into(), "b@x.com".into()), same_email).await?;

        let dup = store.insert_unique("u3".into(), ("u3".into(), "a@x.com".into()), same_email).await;
        assert!(matches!(dup, Err(ServiceError::Duplicate(_))));

        // Re-saving u1 with its own email is not a conflict
        store.replace_unique("u1", ("u1".into(), "a@x.com".into()), same_email).await?;
        let taken = store.replace_unique("u1", ("u1".into(), "b@x.com".into()), same_email).await;
        assert!(matches!(taken, Err(ServiceError::Duplicate(_))));
        Ok(())
    }
}
