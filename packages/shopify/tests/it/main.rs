use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
};
use color_eyre::Result;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use url::Url;

use shopify::{Client, client::DEFAULT_API_VERSION};

pub mod carrier;

/// The access token every test client sends.
pub const TOKEN: &str = "shpat_test_token";

/// A request observed by [`MockShop`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub token: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct MockState {
    requests: Mutex<Vec<Recorded>>,
    responses: Mutex<VecDeque<(StatusCode, Value)>>,
}

/// An in-process stand-in for a shop's Admin API.
///
/// Records every request it receives and answers them, in order, with the
/// scripted responses. Once the script is exhausted it answers `404`.
pub struct MockShop {
    base: Url,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockShop {
    pub async fn spawn(responses: impl IntoIterator<Item = (StatusCode, Value)>) -> Result<Self> {
        let state = Arc::new(MockState {
            requests: Mutex::default(),
            responses: Mutex::new(responses.into_iter().collect()),
        });
        let app = Router::new().fallback(record).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                panic!("serve mock shop: {err}");
            }
        });

        let base = Url::parse(&format!("http://{addr}/admin/api/{DEFAULT_API_VERSION}/"))?;
        Ok(Self {
            base,
            state,
            server,
        })
    }

    /// A client pointed at this shop.
    pub fn client(&self) -> Client {
        Client::with_base_url(self.base.clone(), TOKEN)
    }

    /// The absolute request path for `path` relative to the API base.
    pub fn path(&self, path: &str) -> String {
        format!("{}{path}", self.base.path())
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockShop {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn record(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let body = (!body.is_empty()).then(|| serde_json::from_slice(&body).unwrap_or(Value::Null));
    let token = headers
        .get("x-shopify-access-token")
        .and_then(|value| value.to_str().ok())
        .map(String::from);
    state.requests.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(String::from),
        token,
        body,
    });

    state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .map(|(status, body)| (status, Json(body)))
        .unwrap_or_else(|| {
            let body = json!({ "errors": "Not Found" });
            (StatusCode::NOT_FOUND, Json(body))
        })
}
