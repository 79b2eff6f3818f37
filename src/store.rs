use crate::types::PrimitiveRecord;

/// Change notification delivered to store observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Appended { start: usize, count: usize },
    Cleared { removed: usize },
}

type Observer = Box<dyn FnMut(&StoreEvent)>;

/// Ordered, append-or-clear-only collection of primitive records
///
/// Every mutation bumps `revision` and notifies observers, so views can
/// cache derived data and refresh only when the store actually changed.
#[derive(Default)]
pub struct ObjectStore {
    records: Vec<PrimitiveRecord>,
    revision: u64,
    observers: Vec<Observer>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next appended record will receive
    pub fn next_id(&self) -> usize {
        self.records.len()
    }

    /// Append a batch, stamping ids as `previous length + batch index`
    ///
    /// An empty batch leaves the store and its revision untouched.
    pub fn append(&mut self, batch: Vec<PrimitiveRecord>) {
        if batch.is_empty() {
            return;
        }

        let start = self.records.len();
        let count = batch.len();
        self.records.extend(
            batch
                .into_iter()
                .enumerate()
                .map(|(i, record)| PrimitiveRecord { id: start + i, ..record }),
        );

        log::debug!("store: appended {} records ({} total)", count, self.records.len());
        self.notify(StoreEvent::Appended { start, count });
    }

    /// Drop every record
    pub fn clear(&mut self) {
        let removed = self.records.len();
        self.records.clear();

        log::debug!("store: cleared {} records", removed);
        self.notify(StoreEvent::Cleared { removed });
    }

    /// Register a callback run after every mutation
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PrimitiveRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[PrimitiveRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PrimitiveRecord> {
        self.records.iter()
    }

    fn notify(&mut self, event: StoreEvent) {
        self.revision += 1;
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

impl std::fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStore")
            .field("records", &self.records)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<'a> IntoIterator for &'a ObjectStore {
    type Item = &'a PrimitiveRecord;
    type IntoIter = std::slice::Iter<'a, PrimitiveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
