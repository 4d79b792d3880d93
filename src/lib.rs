use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod schedule;
pub mod store;

use crate::{auth::TokenVerifier, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store, verifier: Arc::new(auth::AcceptAnyToken) }
    }
}
