//! The request transport consumed by the resource facades.

use color_eyre::Result;
use serde::{Serialize, de::DeserializeOwned};

/// Performs authenticated JSON requests against the Admin API.
///
/// Paths are relative to the transport's base (for example
/// `carrier_services/1.json`); the transport is responsible for the host,
/// API version, authentication headers, and JSON encoding of bodies and
/// responses. Errors are returned as-is to the caller of the facade, so
/// implementations should attach enough context to identify the request.
///
/// A transport may be shared between facades by reference: `&T` is itself a
/// [`Transport`].
pub trait Transport {
    /// Issue a `GET` request and decode the response body.
    fn get<R>(&self, path: &str, query: &[(&str, &str)]) -> impl Future<Output = Result<R>> + Send
    where
        R: DeserializeOwned + Send;

    /// Issue a `POST` request with a JSON body and decode the response body.
    fn post<B, R>(&self, path: &str, body: &B) -> impl Future<Output = Result<R>> + Send
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send;

    /// Issue a `PUT` request with a JSON body and decode the response body.
    fn put<B, R>(&self, path: &str, body: &B) -> impl Future<Output = Result<R>> + Send
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send;

    /// Issue a `DELETE` request, discarding any response body.
    fn delete(&self, path: &str) -> impl Future<Output = Result<()>> + Send;
}

impl<T: Transport> Transport for &T {
    fn get<R>(&self, path: &str, query: &[(&str, &str)]) -> impl Future<Output = Result<R>> + Send
    where
        R: DeserializeOwned + Send,
    {
        (**self).get(path, query)
    }

    fn post<B, R>(&self, path: &str, body: &B) -> impl Future<Output = Result<R>> + Send
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        (**self).post(path, body)
    }

    fn put<B, R>(&self, path: &str, body: &B) -> impl Future<Output = Result<R>> + Send
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        (**self).put(path, body)
    }

    fn delete(&self, path: &str) -> impl Future<Output = Result<()>> + Send {
        (**self).delete(path)
    }
}
