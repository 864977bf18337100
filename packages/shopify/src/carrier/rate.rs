//! Shipping rate callback types.
//!
//! When a carrier service is active, the platform `POST`s a
//! [`ShippingRateRequest`] to the service's callback URL during checkout and
//! expects a [`ShippingRateResponse`] in return. These types are never sent by
//! [`CarrierServices`](super::CarrierServices); they exist for implementers of
//! the callback endpoint.

use bon::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::de::null_as_default;

/// The body the platform sends to a carrier service callback.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShippingRateRequest {
    pub rate: ShippingRateQuery,
}

/// The checkout being quoted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct ShippingRateQuery {
    #[builder(default)]
    pub origin: ShippingRateAddress,

    #[builder(default)]
    pub destination: ShippingRateAddress,

    #[serde(default, deserialize_with = "null_as_default")]
    #[builder(default, with = |i: impl IntoIterator<Item = impl Into<RateLineItem>>| i.into_iter().map(Into::into).collect())]
    pub items: Vec<RateLineItem>,

    #[serde(default, deserialize_with = "null_as_default")]
    #[builder(default)]
    pub currency: String,

    #[serde(default, deserialize_with = "null_as_default")]
    #[builder(default)]
    pub locale: String,
}

/// An address in a rate request.
///
/// The `address3`, `fax`, `address_type`, and `company_name` fields are only
/// populated for some legacy providers. For API-created carrier services, only
/// `address1`, `address2`, `city`, `postal_code`, `province`, and `country`
/// are meaningful. The platform sends `null` for unpopulated fields, which
/// decode as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[serde(default)]
#[non_exhaustive]
pub struct ShippingRateAddress {
    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub country: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub postal_code: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub province: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub city: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub name: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub address1: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub address2: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub address3: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub phone: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub fax: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub email: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub address_type: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub company_name: String,
}

/// A cart line in a rate request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[serde(default)]
#[non_exhaustive]
pub struct RateLineItem {
    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub name: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub sku: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub quantity: i64,

    /// Weight of a single unit, in grams.
    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub grams: i64,

    /// Unit price in the minor unit of the request currency.
    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub price: Decimal,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub vendor: String,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub requires_shipping: bool,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub taxable: bool,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub fulfillment_service: String,

    /// Custom line item properties, if any.
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub product_id: i64,

    #[serde(deserialize_with = "null_as_default")]
    #[builder(default)]
    pub variant_id: i64,
}

impl From<&RateLineItem> for RateLineItem {
    fn from(item: &RateLineItem) -> Self {
        item.clone()
    }
}

/// The body a carrier service callback returns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Builder)]
#[non_exhaustive]
pub struct ShippingRateResponse {
    #[builder(default, with = |i: impl IntoIterator<Item = impl Into<ShippingRate>>| i.into_iter().map(Into::into).collect())]
    pub rates: Vec<ShippingRate>,
}

/// A single rate offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct ShippingRate {
    /// The name of the rate, which customers see at checkout.
    /// For example: `Expedited Mail`.
    pub service_name: String,

    /// A description of the rate, which customers see at checkout.
    /// For example: `Includes tracking and insurance`.
    pub description: String,

    /// A unique code associated with the rate. For example: `expedited_mail`.
    pub service_code: String,

    /// The currency of the shipping rate.
    pub currency: String,

    /// The total price in the minor unit of `currency` (cents for USD).
    pub total_price: Decimal,

    /// Whether the customer must provide a phone number at checkout.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    #[builder(default)]
    pub phone_required: bool,

    /// The earliest delivery date for the displayed rate.
    #[serde(default, with = "delivery_date", skip_serializing_if = "Option::is_none")]
    pub min_delivery_date: Option<OffsetDateTime>,

    /// The latest delivery date for the displayed rate to still be valid.
    #[serde(default, with = "delivery_date", skip_serializing_if = "Option::is_none")]
    pub max_delivery_date: Option<OffsetDateTime>,
}

impl From<&ShippingRate> for ShippingRate {
    fn from(rate: &ShippingRate) -> Self {
        rate.clone()
    }
}

/// Delivery dates are written as RFC 3339.
///
/// Reading also accepts the form used in the platform's documentation,
/// e.g. `2013-04-12 14:48:45 -0400`.
mod delivery_date {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::{
        OffsetDateTime,
        format_description::{BorrowedFormatItem, well_known::Rfc3339},
        macros::format_description,
    };

    const DOCUMENTED: &[BorrowedFormatItem<'_>] = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
    );

    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => {
                let formatted = date.format(&Rfc3339).map_err(ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        OffsetDateTime::parse(&raw, &Rfc3339)
            .or_else(|_| OffsetDateTime::parse(&raw, DOCUMENTED))
            .map(Some)
            .map_err(|err| de::Error::custom(format!("invalid delivery date {raw:?}: {err}")))
    }
}
