//! Carrier service resource types and client.
//!
//! A carrier service is a merchant-registered shipping rate provider: the
//! platform calls its callback URL at checkout to fetch live rates. The types
//! describing that callback exchange live in [`rate`].
//!
//! See: <https://shopify.dev/docs/api/admin-rest/latest/resources/carrierservice>

use bon::Builder;
use color_eyre::{
    Result,
    eyre::{Context, bail, eyre},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{de::null_as_default, transport::Transport};

pub mod rate;

/// The collection segment for carrier service endpoints.
const CARRIER_BASE_PATH: &str = "carrier_services";

/// A carrier service registered with the shop.
///
/// Every field is optional on the wire: empty strings and an unset `id` are
/// omitted when encoding, and missing or `null` fields default when decoding.
/// An `id` of `0` means the resource has not been created server-side yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct CarrierResource {
    /// Whether this carrier service is active.
    #[serde(default, deserialize_with = "null_as_default")]
    #[builder(default)]
    pub active: bool,

    /// The URL the platform calls to retrieve shipping rates.
    /// This must be a public URL.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    #[builder(default)]
    pub callback_url: String,

    /// Distinguishes between API and legacy carrier services.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    #[builder(default)]
    pub carrier_service_type: String,

    /// The ID of the carrier service.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_unset"
    )]
    #[builder(default)]
    pub id: i64,

    /// The format of the data returned by the callback URL.
    /// Valid values are `json` and `xml`; the platform defaults to `json`.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    #[builder(default)]
    pub format: String,

    /// The name of the shipping service as seen by merchants and their customers.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    #[builder(default)]
    pub name: String,

    /// Whether merchants are able to send dummy data to the service through
    /// the admin to see shipping rate examples.
    #[serde(default, deserialize_with = "null_as_default")]
    #[builder(default)]
    pub service_discovery: bool,

    /// The platform-assigned GraphQL global identifier.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    #[builder(default)]
    pub admin_graphql_api_id: String,
}

impl CarrierResource {
    /// Whether the resource carries a server-assigned ID.
    pub fn has_id(&self) -> bool {
        !is_unset(&self.id)
    }
}

fn is_unset(id: &i64) -> bool {
    *id == 0
}

/// Envelope for a single carrier service: `{"carrier_service": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SingleCarrierResource {
    #[serde(default)]
    pub carrier_service: Option<CarrierResource>,
}

impl SingleCarrierResource {
    /// Unwrap the resource, failing if the envelope was empty.
    pub fn into_resource(self) -> Result<CarrierResource> {
        self.carrier_service
            .ok_or_else(|| eyre!("response did not contain a carrier service"))
    }
}

impl From<CarrierResource> for SingleCarrierResource {
    fn from(resource: CarrierResource) -> Self {
        Self {
            carrier_service: Some(resource),
        }
    }
}

/// Envelope for a list of carrier services: `{"carrier_services": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListCarrierResource {
    #[serde(default)]
    pub carrier_services: Vec<CarrierResource>,
}

/// Typed access to the carrier service endpoints.
///
/// Each method is a single request through the wrapped [`Transport`]; there
/// is no state shared between calls, so the client may be used concurrently
/// whenever the transport can be.
#[derive(Clone, Debug)]
pub struct CarrierServices<T> {
    transport: T,
}

impl<T: Transport> CarrierServices<T> {
    /// Create a client issuing requests through `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// List the carrier services registered with the shop, in server order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CarrierResource>> {
        let envelope = self
            .transport
            .get::<ListCarrierResource>(&collection_path(), &[])
            .await
            .context("list carrier services")?;
        let count = envelope.carrier_services.len();
        debug!(?count, "listed carrier services");
        Ok(envelope.carrier_services)
    }

    /// Get a carrier service by ID.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<CarrierResource> {
        self.transport
            .get::<SingleCarrierResource>(&item_path(id), &[])
            .await
            .and_then(SingleCarrierResource::into_resource)
            .with_context(|| format!("get carrier service {id}"))
    }

    /// Create a carrier service.
    ///
    /// Any `id` on the provided resource is sent as-is; the server assigns
    /// the ID of the created resource.
    #[instrument(skip_all, fields(name = %carrier.name))]
    pub async fn create(&self, carrier: CarrierResource) -> Result<CarrierResource> {
        let body = SingleCarrierResource::from(carrier);
        self.transport
            .post::<_, SingleCarrierResource>(&collection_path(), &body)
            .await
            .and_then(SingleCarrierResource::into_resource)
            .context("create carrier service")
    }

    /// Update a carrier service.
    ///
    /// The target is identified by the resource's own `id`, which must be set.
    #[instrument(skip_all, fields(id = carrier.id))]
    pub async fn update(&self, carrier: CarrierResource) -> Result<CarrierResource> {
        if !carrier.has_id() {
            bail!("cannot update a carrier service without an id");
        }

        let id = carrier.id;
        let body = SingleCarrierResource::from(carrier);
        self.transport
            .put::<_, SingleCarrierResource>(&item_path(id), &body)
            .await
            .and_then(SingleCarrierResource::into_resource)
            .with_context(|| format!("update carrier service {id}"))
    }

    /// Delete a carrier service by ID.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.transport
            .delete(&item_path(id))
            .await
            .with_context(|| format!("delete carrier service {id}"))
    }
}

fn collection_path() -> String {
    format!("{CARRIER_BASE_PATH}.json")
}

fn item_path(id: i64) -> String {
    format!("{CARRIER_BASE_PATH}/{id}.json")
}
