// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in catalog service.
//!
//! Serves the same routes as the hosted catalog over a fixed list of dogs, so the client can be
//! exercised offline (`--demo`, `serve-demo`) and in integration tests.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::model::{CatalogEntry, EntryId};

/// Route prefix of the collection.
pub const COLLECTION_PATH: &str = "/dogs";

const NOT_FOUND_MESSAGE: &str = "Dog not found";

pub fn demo_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(EntryId::new(1), "Luna", "Bogotá")
            .with_size("Mediano")
            .with_age(2)
            .with_image("https://images.dog.ceo/breeds/mix/luna.jpg")
            .with_description("Playful and affectionate, gets along with other dogs.")
            .with_flags(true, true, false),
        CatalogEntry::new(EntryId::new(2), "Rocky", "Medellín")
            .with_size("Grande")
            .with_age(4)
            .with_image("https://images.dog.ceo/breeds/mix/rocky.jpg")
            .with_description("Calm guardian who loves long walks.")
            .with_flags(true, false, false),
        CatalogEntry::new(EntryId::new(3), "Canela", "Cali")
            .with_size("Pequeño")
            .with_age(1)
            .with_image("https://images.dog.ceo/breeds/mix/canela.jpg")
            .with_description("Curious puppy rescued near the river.")
            .with_flags(false, false, false),
        CatalogEntry::new(EntryId::new(4), "Tobías", "Bogotá")
            .with_size("Mediano")
            .with_age(7)
            .with_image("https://images.dog.ceo/breeds/mix/tobias.jpg")
            .with_description("Senior gentleman, missing one leg, full of love.")
            .with_flags(true, true, true),
        CatalogEntry::new(EntryId::new(5), "Nala", "Barranquilla")
            .with_size("Pequeño")
            .with_age(3)
            .with_image("https://images.dog.ceo/breeds/mix/nala.jpg")
            .with_description("Shy at first, very loyal once she trusts you.")
            .with_flags(true, true, false),
        CatalogEntry::new(EntryId::new(6), "Max", "Cartagena")
            .with_size("Grande")
            .with_age(5)
            .with_image("https://images.dog.ceo/breeds/mix/max.jpg")
            .with_description("Energetic runner, needs a house with a yard.")
            .with_flags(true, false, false),
        CatalogEntry::new(EntryId::new(7), "Kira", "Medellín")
            .with_size("Mediano")
            .with_age(2)
            .with_image("https://images.dog.ceo/breeds/mix/kira.jpg")
            .with_description("Partially blind, navigates the house like a champion.")
            .with_flags(true, true, true),
        CatalogEntry::new(EntryId::new(8), "Firulais", "Bucaramanga")
            .with_size("Pequeño")
            .with_age(6)
            .with_image("https://images.dog.ceo/breeds/mix/firulais.jpg")
            .with_description("Loves naps in the sun and belly rubs.")
            .with_flags(false, true, false),
    ]
}

type SharedCatalog = Arc<Vec<CatalogEntry>>;

pub fn router(catalog: Vec<CatalogEntry>) -> Router {
    Router::new()
        .route(COLLECTION_PATH, get(list_entries))
        .route(&format!("{COLLECTION_PATH}/{{id}}"), get(get_entry))
        .with_state(Arc::new(catalog))
}

async fn list_entries(State(catalog): State<SharedCatalog>) -> Json<Vec<CatalogEntry>> {
    Json(catalog.as_ref().clone())
}

async fn get_entry(State(catalog): State<SharedCatalog>, Path(raw): Path<String>) -> Response {
    let found = raw
        .parse::<EntryId>()
        .ok()
        .and_then(|id| catalog.iter().find(|entry| entry.id() == id));
    match found {
        Some(entry) => Json(entry.clone()).into_response(),
        None => {
            tracing::debug!(id = %raw, "demo catalog miss");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": NOT_FOUND_MESSAGE })),
            )
                .into_response()
        }
    }
}

/// Serves the demo catalog on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    catalog: Vec<CatalogEntry>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, entries = catalog.len(), "demo catalog listening");
    axum::serve(listener, router(catalog))
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!(%addr, "demo catalog stopped");
    Ok(())
}

/// Demo server running on a background task.
#[derive(Debug)]
pub struct DemoServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<io::Result<()>>,
}

impl DemoServer {
    /// Binds `addr` (port 0 picks an ephemeral port) and starts serving in the background.
    pub async fn spawn(addr: SocketAddr, catalog: Vec<CatalogEntry>) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, catalog, async move {
            let _ = rx.await;
        }));
        Ok(Self {
            addr,
            shutdown: Some(tx),
            handle,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn collection_url(&self) -> String {
        format!("http://{}{COLLECTION_PATH}", self.addr)
    }

    pub async fn shutdown(mut self) -> io::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        match (&mut self.handle).await {
            Ok(result) => result,
            Err(err) => Err(io::Error::other(err)),
        }
    }
}

impl Drop for DemoServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
