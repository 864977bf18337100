//! HTTP transport for the Admin REST API.

use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use derive_more::Debug;
use reqwest::{Method, RequestBuilder, Response, header::ACCEPT};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{instrument, trace};
use url::Url;

use crate::{AccessToken, carrier::CarrierServices, transport::Transport};

/// The Admin API version used when none is specified.
pub const DEFAULT_API_VERSION: &str = "2024-10";

/// The header carrying the Admin API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for the Admin REST API of a single shop.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    #[debug("{base}")]
    base: Url,
    token: AccessToken,
    #[debug(skip)]
    http: reqwest::Client,
}

impl Client {
    /// Create a client for `shop` (e.g. `fooshop.myshopify.com`) using
    /// [`DEFAULT_API_VERSION`].
    pub fn new(shop: impl AsRef<str>, token: impl Into<AccessToken>) -> Result<Self> {
        Self::with_api_version(shop, DEFAULT_API_VERSION, token)
    }

    /// Create a client for `shop` pinned to the given API version.
    pub fn with_api_version(
        shop: impl AsRef<str>,
        version: impl AsRef<str>,
        token: impl Into<AccessToken>,
    ) -> Result<Self> {
        let (shop, version) = (shop.as_ref(), version.as_ref());
        let base = Url::parse(&format!("https://{shop}/admin/api/{version}/"))
            .with_context(|| format!("build API base URL for shop {shop:?}"))?;
        Ok(Self::with_base_url(base, token))
    }

    /// Create a client issuing requests relative to `base`.
    ///
    /// A trailing slash is added to the base path if missing, so that request
    /// paths are appended to it rather than replacing its last segment.
    pub fn with_base_url(mut base: Url, token: impl Into<AccessToken>) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            base,
            token: token.into(),
            http: reqwest::Client::new(),
        }
    }

    /// The URL that request paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Carrier service endpoints backed by this client.
    pub fn carrier_services(&self) -> CarrierServices<&Self> {
        CarrierServices::new(self)
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("join {path:?} onto {}", self.base))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        trace!(%method, %url, "building request");
        Ok(self
            .http
            .request(method, url)
            .header(ACCESS_TOKEN_HEADER, self.token.expose())
            .header(ACCEPT, "application/json"))
    }

    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("send {method} request to {path}"))?;

        let status = response.status();
        trace!(%status, "received response");
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(eyre!(
            "unexpected status code from {method} {path}: {status}\n{error_body}"
        ))
    }
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R> {
    let body = response.bytes().await.context("read response body")?;
    serde_json::from_slice(&body).context("parse JSON response")
}

impl Transport for Client {
    #[instrument(skip(self))]
    async fn get<R>(&self, path: &str, query: &[(&str, &str)]) -> Result<R>
    where
        R: DeserializeOwned + Send,
    {
        let mut request = self.request(Method::GET, path)?;
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.send(Method::GET, path, request).await?;
        decode(response).await
    }

    #[instrument(skip(self, body))]
    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let request = self.request(Method::POST, path)?.json(body);
        let response = self.send(Method::POST, path, request).await?;
        decode(response).await
    }

    #[instrument(skip(self, body))]
    async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        let response = self.send(Method::PUT, path, request).await?;
        decode(response).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> Result<()> {
        let request = self.request(Method::DELETE, path)?;
        self.send(Method::DELETE, path, request).await?;
        Ok(())
    }
}
