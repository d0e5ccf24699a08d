//! Inventory data abstractions

use anyhow::Result;
use async_trait::async_trait;
use futures::StreamExt;
use futures::channel::mpsc::unbounded;
use futures::stream::BoxStream;

/// Full snapshots of a collection, one per change.
pub type ChangeStream<T> = BoxStream<'static, Vec<T>>;

/// Receives the whole collection after every change.
///
/// Returns `false` once the receiving side is gone and the sink can be dropped.
pub type ChangeSink<T> = Box<dyn Fn(Vec<T>) -> bool + Send + Sync>;

/// One of the inventory collections owned by the data layer.
#[async_trait]
pub trait Collection<T>: Send + Sync
where
    T: Send + 'static,
{
    /// Current contents of the collection.
    async fn read_all(&self) -> Result<Vec<T>>;

    /// Registers `sink` to receive the new contents after every change.
    ///
    /// The sink must be called before the mutation completes, so that sinks
    /// sharing one queue across collections see changes in the order they
    /// were made. Nothing is sent for the state at the time of the call.
    async fn watch(&self, sink: ChangeSink<T>) -> Result<()>;

    /// Stream of the new contents after every change.
    async fn changes(&self) -> Result<ChangeStream<T>> {
        let (tx, rx) = unbounded();
        self.watch(Box::new(move |records| tx.unbounded_send(records).is_ok()))
            .await?;
        Ok(rx.boxed())
    }
}
