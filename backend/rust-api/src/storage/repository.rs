use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{Collection, KeyValueStore, MemoryStore};
use crate::error::LedgerResult;

pub const DEFAULT_KEY_PREFIX: &str = "edubattle_";

/// Typed access to ledger collections over any [`KeyValueStore`].
///
/// Writes go through [`Repository::update`], which holds a per-collection
/// mutex for the whole load / mutate / save cycle. Two tasks sharing this
/// repository therefore never overwrite each other's changes. Separate
/// processes pointed at the same backend are not coordinated.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn KeyValueStore>,
    key_prefix: Arc<str>,
    locks: Arc<[Mutex<()>; Collection::COUNT]>,
}

impl Repository {
    pub fn new(store: Arc<dyn KeyValueStore>, key_prefix: &str) -> Self {
        Self {
            store,
            key_prefix: Arc::from(key_prefix),
            locks: Arc::new(std::array::from_fn(|_| Mutex::new(()))),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), DEFAULT_KEY_PREFIX)
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn key_for(&self, collection: Collection) -> String {
        format!("{}{}", self.key_prefix, collection.name())
    }

    /// Reads a whole collection. A key that was never written is empty.
    pub async fn load<T: DeserializeOwned>(&self, collection: Collection) -> LedgerResult<Vec<T>> {
        let key = self.key_for(collection);
        match self.store.get(&key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Runs `mutate` against the current contents and persists the result.
    ///
    /// Nothing is written when `mutate` returns an error.
    pub async fn update<T, R, F>(&self, collection: Collection, mutate: F) -> LedgerResult<R>
    where
        T: Serialize + DeserializeOwned + Send,
        R: Send,
        F: FnOnce(&mut Vec<T>) -> LedgerResult<R> + Send,
    {
        let _guard = self.locks[collection as usize].lock().await;

        let mut items: Vec<T> = self.load(collection).await?;
        let outcome = mutate(&mut items)?;

        let raw = serde_json::to_string(&items)?;
        self.store.set(&self.key_for(collection), &raw).await?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;

    #[tokio::test]
    async fn update_persists_mutation() {
        let repo = Repository::in_memory();
        repo.update(Collection::Teams, |items: &mut Vec<u32>| {
            items.push(7);
            Ok(())
        })
        .await
        .unwrap();

        let items: Vec<u32> = repo.load(Collection::Teams).await.unwrap();
        assert_eq!(items, vec![7]);
        assert_eq!(repo.key_for(Collection::Teams), "edubattle_teams");
    }

    #[tokio::test]
    async fn failed_mutation_writes_nothing() {
        let repo = Repository::in_memory();
        let result = repo
            .update(Collection::Matches, |items: &mut Vec<u32>| {
                items.push(1);
                Err::<(), _>(LedgerError::Conflict("nope".into()))
            })
            .await;

        assert!(result.is_err());
        assert!(repo.store().get("edubattle_matches").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_updates_do_not_lose_writes() {
        let repo = Repository::in_memory();
        let mut handles = Vec::new();
        for i in 0..32u32 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.update(Collection::UserStats, move |items: &mut Vec<u32>| {
                    items.push(i);
                    Ok(())
                })
                .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let items: Vec<u32> = repo.load(Collection::UserStats).await.unwrap();
        assert_eq!(items.len(), 32);
    }
}
