use crate::core::source::{ChangeSink, Collection};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

struct CollectionState<T> {
    records: Vec<T>,
    watchers: Vec<ChangeSink<T>>,
}

/// In-memory collection that notifies every watcher on mutation.
pub struct MemoryCollection<T>
where
    T: Clone + Send + Sync + 'static,
{
    inner: Arc<Mutex<CollectionState<T>>>,
}

impl<T> MemoryCollection<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CollectionState {
                records,
                watchers: Vec::new(),
            })),
        }
    }

    pub async fn replace(&self, records: Vec<T>) {
        self.update(|current| *current = records).await;
    }

    pub async fn push(&self, record: T) {
        self.update(|current| current.push(record)).await;
    }

    pub async fn clear(&self) {
        self.update(Vec::clear).await;
    }

    /// Applies `change` and publishes the resulting snapshot once.
    pub async fn update<F>(&self, change: F)
    where
        F: FnOnce(&mut Vec<T>),
    {
        let mut state = self.inner.lock().await;
        change(&mut state.records);

        let snapshot = state.records.clone();
        // Notified under the lock, so watchers see mutations in the order they happen.
        state.watchers.retain(|sink| sink(snapshot.clone()));
        debug!(
            "Collection changed: {} records, {} watchers notified",
            snapshot.len(),
            state.watchers.len()
        );
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T> Default for MemoryCollection<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Collection<T> for MemoryCollection<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn read_all(&self) -> Result<Vec<T>> {
        Ok(self.inner.lock().await.records.clone())
    }

    async fn watch(&self, sink: ChangeSink<T>) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.watchers.push(sink);
        debug!("Watcher registered, {} watchers", state.watchers.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_read_all_returns_current_records() {
        let collection = MemoryCollection::with_records(vec![1, 2]);
        assert_eq!(collection.read_all().await.unwrap(), vec![1, 2]);

        collection.push(3).await;
        assert_eq!(collection.read_all().await.unwrap(), vec![1, 2, 3]);
        assert_eq!(collection.len().await, 3);
    }

    #[tokio::test]
    async fn test_changes_yield_one_snapshot_per_mutation() {
        let collection = MemoryCollection::with_records(vec![1]);
        let mut changes = collection.changes().await.unwrap();

        collection.push(2).await;
        collection.replace(vec![7]).await;
        collection.clear().await;

        assert_eq!(changes.next().await, Some(vec![1, 2]));
        assert_eq!(changes.next().await, Some(vec![7]));
        assert_eq!(changes.next().await, Some(vec![]));
        assert!(collection.is_empty().await);
    }

    #[tokio::test]
    async fn test_no_initial_emission() {
        let collection = MemoryCollection::with_records(vec![1]);
        let mut changes = collection.changes().await.unwrap();
        assert!(
            futures::FutureExt::now_or_never(changes.next()).is_none(),
            "Stream should be pending until a mutation"
        );
    }

    #[tokio::test]
    async fn test_dropped_streams_are_pruned() {
        let collection = MemoryCollection::<i32>::new();
        let kept = collection.changes().await.unwrap();
        let dropped = collection.changes().await.unwrap();
        drop(dropped);

        collection.push(1).await;
        assert_eq!(collection.inner.lock().await.watchers.len(), 1);
        drop(kept);
    }

    #[tokio::test]
    async fn test_watchers_are_notified_before_mutation_returns() {
        let numbers = MemoryCollection::<i32>::new();
        let words = MemoryCollection::<&'static str>::new();
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));

        let numbers_log = Arc::clone(&log);
        numbers
            .watch(Box::new(move |records| {
                numbers_log.lock().unwrap().push(format!("numbers:{}", records.len()));
                true
            }))
            .await
            .unwrap();
        let words_log = Arc::clone(&log);
        words
            .watch(Box::new(move |records| {
                words_log.lock().unwrap().push(format!("words:{}", records.len()));
                true
            }))
            .await
            .unwrap();

        numbers.push(1).await;
        words.push("a").await;
        numbers.push(2).await;

        assert_eq!(*log.lock().unwrap(), ["numbers:1", "words:1", "numbers:2"]);
    }
}
