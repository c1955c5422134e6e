#![allow(dead_code)]

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use storefront::config::ServiceEndpoint;
use storefront::infrastructure::payment_client::{AUTHORIZE_PATH, HttpPaymentClient};
use tokio::net::TcpListener;

/// Serves `handler` at the authorization path on an ephemeral port and
/// returns the base URL.
pub async fn spawn_provider<H, T>(handler: H) -> String
where
    H: axum::handler::Handler<T, ()>,
    T: 'static,
{
    let router = Router::new().route(AUTHORIZE_PATH, post(handler));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A provider with a fixed answer that records every request it receives
/// and every answer it finishes.
pub struct CountingProvider {
    pub url: String,
    hits: Arc<AtomicUsize>,
    answered: Arc<AtomicUsize>,
}

impl CountingProvider {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn answered(&self) -> usize {
        self.answered.load(Ordering::SeqCst)
    }
}

pub async fn spawn_counting_provider(
    status: StatusCode,
    body: Value,
    delay: Duration,
) -> CountingProvider {
    let hits = Arc::new(AtomicUsize::new(0));
    let answered = Arc::new(AtomicUsize::new(0));
    let (hit_counter, answer_counter) = (hits.clone(), answered.clone());

    let url = spawn_provider(move |Json(_): Json<Value>| {
        hit_counter.fetch_add(1, Ordering::SeqCst);
        let answer_counter = answer_counter.clone();
        let body = body.clone();
        async move {
            tokio::time::sleep(delay).await;
            answer_counter.fetch_add(1, Ordering::SeqCst);
            (status, Json(body))
        }
    })
    .await;

    CountingProvider {
        url,
        hits,
        answered,
    }
}

/// A URL on a port nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn client_for(url: &str) -> HttpPaymentClient {
    HttpPaymentClient::new(&ServiceEndpoint::new(url)).unwrap()
}
