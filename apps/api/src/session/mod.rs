//! Session state and the process-wide session store.

pub mod models;
pub mod store;
