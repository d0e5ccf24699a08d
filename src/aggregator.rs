//! Snapshot and live aggregation over the four inventory collections.
//!
//! A subscription registers one sink per collection, all feeding a single
//! queue. Collections call their sink as part of each mutation, so the queue
//! holds changes in the order they were made. A single worker drains it,
//! applying each change to its copy of the inventory and recomputing the
//! whole bundle for every event.

use crate::core::analytics::build_bundle;
use crate::core::chart::AggregateBundle;
use crate::core::error::{ChartError, Result, SourceKind};
use crate::core::model::{InventorySnapshot, StockEntry, StockExit, StockItem, Supplier};
use crate::core::source::{ChangeSink, Collection};
use crate::core::window::DateWindow;
use futures::try_join;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

type UpdateCallback = Box<dyn FnMut(AggregateBundle) + Send + 'static>;

/// New contents of one collection, as sent by its sink.
enum SourceEvent {
    Items(Vec<StockItem>),
    Entries(Vec<StockEntry>),
    Exits(Vec<StockExit>),
    Suppliers(Vec<Supplier>),
}

impl SourceEvent {
    fn kind(&self) -> SourceKind {
        match self {
            SourceEvent::Items(_) => SourceKind::Items,
            SourceEvent::Entries(_) => SourceKind::Entries,
            SourceEvent::Exits(_) => SourceKind::Exits,
            SourceEvent::Suppliers(_) => SourceKind::Suppliers,
        }
    }

    fn apply_to(self, snapshot: &mut InventorySnapshot) {
        match self {
            SourceEvent::Items(items) => snapshot.items = items,
            SourceEvent::Entries(entries) => snapshot.entries = entries,
            SourceEvent::Exits(exits) => snapshot.exits = exits,
            SourceEvent::Suppliers(suppliers) => snapshot.suppliers = suppliers,
        }
    }
}

/// State shared between a [`Subscription`] and its worker.
struct Delivery {
    active: AtomicBool,
    callback: Mutex<Option<UpdateCallback>>,
}

impl Delivery {
    fn new(callback: UpdateCallback) -> Self {
        Self {
            active: AtomicBool::new(true),
            callback: Mutex::new(Some(callback)),
        }
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Runs the callback unless the subscription was cancelled. Returns false once cancelled.
    fn deliver(&self, bundle: AggregateBundle) -> bool {
        let mut slot = self.callback.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_active() {
            return false;
        }
        match slot.as_mut() {
            Some(on_update) => {
                on_update(bundle);
                true
            }
            None => false,
        }
    }

    fn close(&self) -> Option<UpdateCallback> {
        self.active.store(false, Ordering::SeqCst);
        self.callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// Builds chart data from the inventory collections.
///
/// Holds no state between calls; every bundle is computed from a fresh read.
pub struct ChartAggregator {
    items: Arc<dyn Collection<StockItem>>,
    entries: Arc<dyn Collection<StockEntry>>,
    exits: Arc<dyn Collection<StockExit>>,
    suppliers: Arc<dyn Collection<Supplier>>,
    window: DateWindow,
}

impl ChartAggregator {
    pub fn new(
        items: Arc<dyn Collection<StockItem>>,
        entries: Arc<dyn Collection<StockEntry>>,
        exits: Arc<dyn Collection<StockExit>>,
        suppliers: Arc<dyn Collection<Supplier>>,
        window: DateWindow,
    ) -> Self {
        Self {
            items,
            entries,
            exits,
            suppliers,
            window,
        }
    }

    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    /// Reads all four collections concurrently.
    pub async fn read_snapshot(&self) -> Result<InventorySnapshot> {
        let (items, entries, exits, suppliers) = try_join!(
            read_source(self.items.as_ref(), SourceKind::Items),
            read_source(self.entries.as_ref(), SourceKind::Entries),
            read_source(self.exits.as_ref(), SourceKind::Exits),
            read_source(self.suppliers.as_ref(), SourceKind::Suppliers),
        )?;

        Ok(InventorySnapshot {
            items,
            entries,
            exits,
            suppliers,
        })
    }

    /// Computes one bundle from the current state of the collections.
    ///
    /// Either every series is built from the same read, or the read error is
    /// returned.
    pub async fn compute_once(&self) -> Result<AggregateBundle> {
        let snapshot = self.read_snapshot().await?;
        let bundle = build_bundle(&snapshot, &self.window);
        debug!(
            "Computed chart data: {} items, {} entries, {} exits, {} suppliers",
            snapshot.items.len(),
            snapshot.entries.len(),
            snapshot.exits.len(),
            snapshot.suppliers.len()
        );
        Ok(bundle)
    }

    /// Calls `on_update` with a fresh bundle after every change to any collection.
    ///
    /// Changes are handled one at a time in the order they were made; none
    /// are merged or skipped. No bundle is sent for the state at subscription
    /// time, use [`ChartAggregator::compute_once`] for that.
    pub async fn subscribe<F>(&self, on_update: F) -> Result<Subscription>
    where
        F: FnMut(AggregateBundle) + Send + 'static,
    {
        let (tx, rx) = unbounded_channel();
        // Watchers are registered before the initial read so no change falls in between.
        try_join!(
            watch_source(self.items.as_ref(), SourceKind::Items, sink(&tx, SourceEvent::Items)),
            watch_source(
                self.entries.as_ref(),
                SourceKind::Entries,
                sink(&tx, SourceEvent::Entries)
            ),
            watch_source(self.exits.as_ref(), SourceKind::Exits, sink(&tx, SourceEvent::Exits)),
            watch_source(
                self.suppliers.as_ref(),
                SourceKind::Suppliers,
                sink(&tx, SourceEvent::Suppliers)
            ),
        )?;
        drop(tx);
        let snapshot = self.read_snapshot().await?;

        let delivery = Arc::new(Delivery::new(Box::new(on_update)));
        let worker = tokio::spawn(recompute_on_change(
            rx,
            snapshot,
            self.window.clone(),
            Arc::clone(&delivery),
        ));

        info!("Chart data subscription started");
        Ok(Subscription { delivery, worker })
    }
}

async fn read_source<T>(source: &dyn Collection<T>, kind: SourceKind) -> Result<Vec<T>>
where
    T: Send + 'static,
{
    source.read_all().await.map_err(|e| {
        warn!("Failed to read {kind}: {e}");
        ChartError::source_read(kind, e)
    })
}

async fn watch_source<T>(
    source: &dyn Collection<T>,
    kind: SourceKind,
    sink: ChangeSink<T>,
) -> Result<()>
where
    T: Send + 'static,
{
    source.watch(sink).await.map_err(|e| {
        warn!("Failed to subscribe to {kind}: {e}");
        ChartError::source_read(kind, e)
    })
}

fn sink<T>(tx: &UnboundedSender<SourceEvent>, wrap: fn(Vec<T>) -> SourceEvent) -> ChangeSink<T>
where
    T: 'static,
{
    let tx = tx.clone();
    Box::new(move |records| tx.send(wrap(records)).is_ok())
}

async fn recompute_on_change(
    mut rx: UnboundedReceiver<SourceEvent>,
    mut snapshot: InventorySnapshot,
    window: DateWindow,
    delivery: Arc<Delivery>,
) {
    while let Some(event) = rx.recv().await {
        if !delivery.is_active() {
            return;
        }
        let kind = event.kind();
        event.apply_to(&mut snapshot);
        let bundle = build_bundle(&snapshot, &window);
        debug!("Recomputed chart data after change to {kind}");

        if !delivery.deliver(bundle) {
            return;
        }
    }

    // Every collection has dropped its sink.
    delivery.close();
    debug!("Chart data subscription closed by its sources");
}

/// Handle to a live chart-data subscription. Dropping it cancels the subscription.
pub struct Subscription {
    delivery: Arc<Delivery>,
    worker: JoinHandle<()>,
}

impl Subscription {
    /// Stops the subscription and releases the callback.
    ///
    /// No callback starts after this returns. When called from another task
    /// while the callback is running, it waits for that call to finish. When
    /// called (or the subscription dropped) from inside the callback itself,
    /// it returns at once and the callback is released when it returns.
    pub fn cancel(mut self) {
        self.release();
    }

    /// False once cancelled or once every collection has dropped its sink.
    pub fn is_active(&self) -> bool {
        self.delivery.is_active()
    }

    fn release(&mut self) {
        let was_active = self.delivery.is_active();
        self.worker.abort();
        if tokio::task::try_id() == Some(self.worker.id()) {
            // Inside the callback, which holds the callback lock.
            self.delivery.active.store(false, Ordering::SeqCst);
        } else {
            drop(self.delivery.close());
        }
        if was_active {
            info!("Chart data subscription cancelled");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
