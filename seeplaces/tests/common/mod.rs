//! In-process mock of the SeePlaces API.
//!
//! The server runs on its own thread with a current-thread tokio runtime and
//! listens on a random local port. Any path ending in one of the two known
//! endpoints is served, so tests can put the API behind a path prefix.
//! Every request is recorded for later assertions.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use reqwest::Url;

pub const LANGUAGES_BODY: &str = r#"{
    "SpokenLanguages": [
        {"Id": "sk_id", "Name": "Slovak", "UrlName": "slovak"},
        {"Id": "cz_id", "Name": "Czech", "UrlName": "czech"},
        {"Id": "en_id", "Name": "English", "UrlName": "english"}
    ]
}"#;

pub const EXCURSIONS_BODY: &str = r#"{
    "Items": [
        {
            "Name": "Devin Castle",
            "FinalPrice": 45.5,
            "PhotoPath": "https://example.com/devin.jpg",
            "Description": "Ruins above the Danube.",
            "Currency": "EUR",
            "IncludedInPrice": ["Guide", "Entrance"],
            "IsAllDay": false,
            "IsManyDays": false,
            "DurationHours": 4.0,
            "DurationDays": 0.0,
            "HideDuration": false,
            "Id": 1
        },
        {
            "Name": "Tatra Trip",
            "FinalPrice": 320,
            "PhotoPath": "https://example.com/tatry.jpg",
            "Description": "Three days in the mountains.",
            "Currency": "EUR",
            "IncludedInPrice": [],
            "IsAllDay": true,
            "IsManyDays": true,
            "DurationHours": 0.0,
            "DurationDays": 3.0,
            "HideDuration": false,
            "Id": 2
        }
    ],
    "Total": 2
}"#;

/// One request as seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
}

impl RecordedRequest {
    /// All values of query parameter `key`, in request order.
    pub fn query_values(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

struct MockState {
    languages_calls: AtomicUsize,
    excursions_calls: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
    failure: Mutex<Option<StatusCode>>,
    languages_body: Mutex<String>,
    excursions_body: Mutex<String>,
}

/// Handle to a running mock server.
pub struct MockApi {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockApi {
    /// Start a mock serving the sample bodies.
    pub fn start() -> Self {
        let state = Arc::new(MockState {
            languages_calls: AtomicUsize::new(0),
            excursions_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            languages_body: Mutex::new(LANGUAGES_BODY.to_string()),
            excursions_body: Mutex::new(EXCURSIONS_BODY.to_string()),
        });

        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                axum::serve(listener, app).await
            })
            .unwrap();
        });

        Self { addr, state }
    }

    /// Base URL with a trailing slash, ready for `SeePlacesOptions::new`.
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Answer every request with `status` and an empty body from now on.
    pub fn fail_with(&self, status: u16) {
        *self.state.failure.lock().unwrap() = Some(StatusCode::from_u16(status).unwrap());
    }

    /// Go back to serving the configured bodies.
    pub fn recover(&self) {
        *self.state.failure.lock().unwrap() = None;
    }

    pub fn set_languages_body(&self, body: &str) {
        *self.state.languages_body.lock().unwrap() = body.to_string();
    }

    pub fn set_excursions_body(&self, body: &str) {
        *self.state.excursions_body.lock().unwrap() = body.to_string();
    }

    pub fn languages_calls(&self) -> usize {
        self.state.languages_calls.load(Ordering::SeqCst)
    }

    pub fn excursions_calls(&self) -> usize {
        self.state.excursions_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The most recent request. Panics if none was made.
    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }
}

async fn handle(State(state): State<Arc<MockState>>, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path().to_string();
    let query = match uri.query() {
        Some(raw) => Url::parse(&format!("http://mock/?{raw}"))
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        None => Vec::new(),
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        path: path.clone(),
        query,
        headers,
    });

    let body = if path.ends_with("/api/Excursion/ExcursionSpokenLanguages") {
        state.languages_calls.fetch_add(1, Ordering::SeqCst);
        state.languages_body.lock().unwrap().clone()
    } else if path.ends_with("/api/Excursion/ExcursionForIataCode") {
        state.excursions_calls.fetch_add(1, Ordering::SeqCst);
        state.excursions_body.lock().unwrap().clone()
    } else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if let Some(status) = *state.failure.lock().unwrap() {
        return status.into_response();
    }

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
