//! Entity operations over a [`Store`]: CRUD, position-ordered listing and
//! cascading deletes.
//!
//! Not-found handling is uniform across entities:
//!
//! * `get_*` returns `Ok(None)`, `list_*` returns an empty list;
//! * `update_*` fails with [`Error::NotFound`](crate::error::Error::NotFound);
//! * `delete_*` succeeds whether or not the record was there;
//! * creating a child, or moving a ticket, fails with `NotFound` when the
//!   parent is missing.
//!
//! Cascades are a sequence of single-record deletes, children first. If the
//! store fails halfway the error is returned and whatever was already
//! removed stays removed; the parent is still present, so repeating the
//! delete finishes the job.

mod boards;
mod columns;
mod tickets;

use uuid::Uuid;

use crate::db::store::Store;

pub struct Repository<S> {
    store: S,
}

impl<S: Store> Repository<S> {
    pub fn new(store: S) -> Self {
        Repository { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
