//! REST gateway stand-in for driving the `journal` binary end to end.
//!
//! Discovery lists one peer per test-network organization. Submits always
//! commit with an empty payload. Evaluates answer from the configured table
//! and fail with 500 for anything else, the way chaincode reports a missing
//! key.

use std::collections::HashMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::runtime::Builder;
use tokio::sync::oneshot;

/// One request as the gateway saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub path: String,
    pub transaction: Option<String>,
    pub arguments: Vec<String>,
}

#[derive(Clone)]
struct StubState {
    evaluations: Arc<HashMap<String, String>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct GatewayStub {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl GatewayStub {
    /// Starts a stub answering evaluates of `transaction` with `payload`.
    pub fn spawn(evaluations: &[(&str, &str)]) -> Self {
        let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            evaluations: Arc::new(
                evaluations
                    .iter()
                    .map(|(tx, payload)| ((*tx).to_string(), (*payload).to_string()))
                    .collect(),
            ),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(handle).with_state(state);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let join = thread::spawn(move || {
            let runtime = Builder::new_current_thread().enable_all().build().unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        shutdown_rx.await.ok();
                    })
                    .await
                    .unwrap();
            });
        });

        Self {
            base_url,
            shutdown: Some(shutdown_tx),
            join: Some(join),
            requests,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Contract calls only, without discovery and health checks.
    pub fn transactions(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.transaction.is_some())
            .collect()
    }
}

impl Drop for GatewayStub {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
        if let Some(join) = self.join.take() {
            join.join().ok();
        }
    }
}

async fn handle(State(state): State<StubState>, uri: Uri, body: String) -> Response {
    let path = uri.path().to_string();
    let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let transaction = request["transaction"].as_str().map(str::to_string);
    let arguments = request["arguments"]
        .as_array()
        .map(|args| {
            args.iter()
                .filter_map(|a| a.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    state.requests.lock().unwrap().push(Recorded {
        path: path.clone(),
        transaction: transaction.clone(),
        arguments,
    });

    if path == "/peers" {
        return Json(json!([
            {"name": "peer0.org1.example.com", "url": "grpcs://peer0.org1.example.com:7051", "mspId": "Org1MSP"},
            {"name": "peer0.org2.example.com", "url": "grpcs://peer0.org2.example.com:9051", "mspId": "Org2MSP"}
        ]))
        .into_response();
    }
    if path == "/health" {
        return Json(json!({"status": "ok"})).into_response();
    }
    if path.ends_with("/submit") {
        return Json(json!({
            "transactionId": request["transactionId"],
            "status": "VALID",
            "payload": ""
        }))
        .into_response();
    }
    if path.ends_with("/evaluate") {
        let name = transaction.unwrap_or_default();
        return match state.evaluations.get(&name) {
            Some(payload) => {
                ([(header::CONTENT_TYPE, "application/json")], payload.clone()).into_response()
            }
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("There are no journals searching for {name}"),
            )
                .into_response(),
        };
    }
    StatusCode::NOT_FOUND.into_response()
}
