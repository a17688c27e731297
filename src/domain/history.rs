//! Caller-side list of saved records with optimistic removal.
//!
//! A record is taken out of the list before the delete call is made and put
//! back at its old position if the call fails.
//!
//! The server never holds this list. It is for API clients that keep a local
//! copy of `GET /api/itineraries` and call `DELETE /api/itineraries/{id}`.

use std::future::Future;

use uuid::Uuid;

pub trait Keyed {
    fn key(&self) -> Uuid;
}

#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    items: Vec<T>,
}

/// A record removed from the list but not yet confirmed deleted.
#[derive(Debug)]
#[must_use = "a pending removal should be confirmed or rolled back"]
pub struct PendingRemoval<T> {
    index: usize,
    item: T,
}

impl<T> PendingRemoval<T> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    /// Drops the saved copy once the delete is confirmed.
    pub fn confirm(self) -> T {
        self.item
    }
}

impl<T: Keyed> History<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remove_optimistic(&mut self, id: Uuid) -> Option<PendingRemoval<T>> {
        let index = self.items.iter().position(|item| item.key() == id)?;
        let item = self.items.remove(index);
        Some(PendingRemoval { index, item })
    }

    /// Puts a removed record back where it was.
    pub fn rollback(&mut self, pending: PendingRemoval<T>) {
        let index = pending.index.min(self.items.len());
        self.items.insert(index, pending.item);
    }

    /// Removes `id` from the list, runs `delete`, and restores the record if
    /// `delete` fails. The error is handed back to the caller.
    pub async fn delete_with_rollback<F, Fut, E>(&mut self, id: Uuid, delete: F) -> Result<(), E>
    where
        F: FnOnce(Uuid) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let pending = self.remove_optimistic(id);
        match delete(id).await {
            Ok(()) => {
                if let Some(pending) = pending {
                    pending.confirm();
                }
                Ok(())
            }
            Err(err) => {
                if let Some(pending) = pending {
                    tracing::debug!(%id, index = pending.index, "delete failed, restoring record");
                    self.rollback(pending);
                }
                Err(err)
            }
        }
    }
}
