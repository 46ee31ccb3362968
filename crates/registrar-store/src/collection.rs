//! Typed record operations over one collection document.

use std::marker::PhantomData;
use std::sync::Arc;

use registrar_core::error::AppError;
use registrar_core::result::AppResult;
use registrar_core::traits::{CollectionRecord, Identified};
use registrar_core::types::RecordId;

use crate::store::CollectionStore;

/// Generic repository over a single JSON collection.
///
/// One instance per record type; all record types share one
/// [`CollectionStore`]. Every mutation runs a full load, modify, save cycle
/// under the collection's writer lock, so concurrent mutations of the same
/// collection serialize instead of overwriting each other. Reads take no
/// lock; atomic saves guarantee they still see a complete document.
pub struct JsonCollection<T> {
    store: Arc<CollectionStore>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _record: PhantomData,
        }
    }
}

impl<T: CollectionRecord> JsonCollection<T> {
    /// Create a repository backed by the given store.
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// All records, in document order.
    pub async fn find_all(&self) -> AppResult<Vec<T>> {
        self.store.load(T::COLLECTION).await
    }

    /// All records matching the predicate, in document order.
    pub async fn find_where<F>(&self, predicate: F) -> AppResult<Vec<T>>
    where
        F: Fn(&T) -> bool + Send,
    {
        let records = self.store.load::<T>(T::COLLECTION).await?;
        Ok(records.into_iter().filter(|r| predicate(r)).collect())
    }

    /// Update the record matching `key` in place, or append a new one.
    ///
    /// The key is the record's identity for keyed collections (attendance,
    /// marks), so this is the only write path they need: an existing record
    /// keeps its position in the document, a new one goes to the end.
    pub async fn upsert_by_key<K, A, I>(&self, key: K, apply: A, insert: I) -> AppResult<T>
    where
        K: Fn(&T) -> bool + Send,
        A: FnOnce(&mut T) + Send,
        I: FnOnce() -> T + Send,
    {
        let lock = self.store.writer_lock(T::COLLECTION);
        let _guard = lock.lock().await;

        let mut records = self.store.load::<T>(T::COLLECTION).await?;
        let record = match records.iter_mut().find(|r| key(r)) {
            Some(existing) => {
                apply(existing);
                existing.clone()
            }
            None => {
                let record = insert();
                records.push(record.clone());
                record
            }
        };
        self.store.save(T::COLLECTION, &records).await?;
        Ok(record)
    }
}

impl<T: Identified> JsonCollection<T> {
    /// Append a new record, assigning it the next id from the sequence.
    pub async fn create(&self, record: T) -> AppResult<T> {
        self.insert(record, None).await
    }

    /// Append a new record unless a conflicting one already exists.
    ///
    /// The conflict check and the append happen under one writer lock
    /// acquisition, so two concurrent calls with the same conflict key
    /// cannot both succeed. No id is drawn when the check fails.
    pub async fn create_unique<C>(&self, conflicts: C, message: &str, record: T) -> AppResult<T>
    where
        C: Fn(&T) -> bool + Send + Sync,
    {
        self.insert(record, Some((&conflicts, message))).await
    }

    /// Fetch one record by id.
    pub async fn find_by_id(&self, id: RecordId) -> AppResult<T> {
        let records = self.store.load::<T>(T::COLLECTION).await?;
        records
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| Self::missing(id))
    }

    /// Replace the record with the same id, keeping its document position.
    pub async fn update(&self, record: T) -> AppResult<T> {
        let lock = self.store.writer_lock(T::COLLECTION);
        let _guard = lock.lock().await;

        let mut records = self.store.load::<T>(T::COLLECTION).await?;
        let position = records
            .iter()
            .position(|r| r.id() == record.id())
            .ok_or_else(|| Self::missing(record.id()))?;
        records[position] = record.clone();
        self.store.save(T::COLLECTION, &records).await?;
        Ok(record)
    }

    /// Remove the record with the given id.
    pub async fn delete(&self, id: RecordId) -> AppResult<()> {
        let lock = self.store.writer_lock(T::COLLECTION);
        let _guard = lock.lock().await;

        let mut records = self.store.load::<T>(T::COLLECTION).await?;
        let position = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Self::missing(id))?;
        records.remove(position);
        self.store.save(T::COLLECTION, &records).await?;
        Ok(())
    }

    async fn insert(
        &self,
        mut record: T,
        unique: Option<(&(dyn Fn(&T) -> bool + Send + Sync), &str)>,
    ) -> AppResult<T> {
        let lock = self.store.writer_lock(T::COLLECTION);
        let _guard = lock.lock().await;

        let mut records = self.store.load::<T>(T::COLLECTION).await?;
        if let Some((conflicts, message)) = unique {
            if records.iter().any(|r| conflicts(r)) {
                return Err(AppError::conflict(message));
            }
        }

        let id = self.store.next_id(T::COLLECTION).await?;
        record.assign_id(id);
        records.push(record.clone());
        self.store.save(T::COLLECTION, &records).await?;
        Ok(record)
    }

    fn missing(id: RecordId) -> AppError {
        AppError::not_found(format!("Record {id} not found in '{}'", T::COLLECTION))
    }
}
