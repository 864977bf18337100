//! Carrier service requests against a mock shop.

use axum::http::{Method, StatusCode};
use color_eyre::Result;
use pretty_assertions::assert_eq as pretty_assert_eq;
use serde_json::{Value, json};

use shopify::carrier::CarrierResource;

use crate::{MockShop, TOKEN};

fn fixture() -> Value {
    json!({
        "id": 1,
        "name": "Shipping Rate Provider",
        "active": true,
        "service_discovery": true,
        "carrier_service_type": "api",
        "admin_graphql_api_id": "gid://shopify/DeliveryCarrierService/1",
        "format": "json",
        "callback_url": "https://fooshop.example.com/shipping"
    })
}

fn expected() -> CarrierResource {
    CarrierResource::builder()
        .id(1)
        .name("Shipping Rate Provider")
        .active(true)
        .service_discovery(true)
        .carrier_service_type("api")
        .admin_graphql_api_id("gid://shopify/DeliveryCarrierService/1")
        .format("json")
        .callback_url("https://fooshop.example.com/shipping")
        .build()
}

#[test_log::test(tokio::test)]
async fn list() -> Result<()> {
    let shop = MockShop::spawn([(
        StatusCode::OK,
        json!({ "carrier_services": [fixture()] }),
    )])
    .await?;

    let client = shop.client();
    let carriers = client.carrier_services().list().await?;
    pretty_assert_eq!(carriers, vec![expected()]);

    let requests = shop.requests();
    pretty_assert_eq!(requests.len(), 1);
    pretty_assert_eq!(requests[0].method, Method::GET);
    pretty_assert_eq!(requests[0].path, shop.path("carrier_services.json"));
    pretty_assert_eq!(requests[0].query, None);
    pretty_assert_eq!(requests[0].token.as_deref(), Some(TOKEN));

    Ok(())
}

#[test_log::test(tokio::test)]
async fn list_preserves_server_order() -> Result<()> {
    let services = (1..=5)
        .rev()
        .map(|id| json!({ "id": id, "name": format!("Provider {id}") }))
        .collect::<Vec<_>>();
    let shop = MockShop::spawn([(StatusCode::OK, json!({ "carrier_services": services }))]).await?;

    let client = shop.client();
    let ids = client
        .carrier_services()
        .list()
        .await?
        .into_iter()
        .map(|carrier| carrier.id)
        .collect::<Vec<_>>();
    pretty_assert_eq!(ids, vec![5, 4, 3, 2, 1]);

    Ok(())
}

#[test_log::test(tokio::test)]
async fn get() -> Result<()> {
    let shop = MockShop::spawn([(StatusCode::OK, json!({ "carrier_service": fixture() }))]).await?;

    let client = shop.client();
    let carrier = client.carrier_services().get(1).await?;
    pretty_assert_eq!(carrier, expected());

    let requests = shop.requests();
    pretty_assert_eq!(requests[0].method, Method::GET);
    pretty_assert_eq!(requests[0].path, shop.path("carrier_services/1.json"));

    Ok(())
}

#[test_log::test(tokio::test)]
async fn get_not_found() -> Result<()> {
    let shop = MockShop::spawn([]).await?;

    let client = shop.client();
    let err = client.carrier_services().get(404).await.unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("get carrier service 404"), "{chain}");
    assert!(chain.contains("404 Not Found"), "{chain}");

    Ok(())
}

#[test_log::test(tokio::test)]
async fn create_empty_resource() -> Result<()> {
    let shop = MockShop::spawn([(
        StatusCode::CREATED,
        json!({ "carrier_service": fixture() }),
    )])
    .await?;

    let client = shop.client();
    let created = client
        .carrier_services()
        .create(CarrierResource::default())
        .await?;
    pretty_assert_eq!(created, expected());

    let requests = shop.requests();
    pretty_assert_eq!(requests[0].method, Method::POST);
    pretty_assert_eq!(requests[0].path, shop.path("carrier_services.json"));
    pretty_assert_eq!(
        requests[0].body,
        Some(json!({
            "carrier_service": { "active": false, "service_discovery": false }
        }))
    );

    Ok(())
}

#[test_log::test(tokio::test)]
async fn create_validation_failure() -> Result<()> {
    let shop = MockShop::spawn([(
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({ "errors": { "base": ["Shipping Rate Provider is already configured"] } }),
    )])
    .await?;

    let client = shop.client();
    let carrier = CarrierResource::builder()
        .name("Shipping Rate Provider")
        .callback_url("https://fooshop.example.com/shipping")
        .build();
    let err = client.carrier_services().create(carrier).await.unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("422"), "{chain}");
    assert!(chain.contains("already configured"), "{chain}");

    Ok(())
}

#[test_log::test(tokio::test)]
async fn update_uses_resource_id() -> Result<()> {
    let mut updated = fixture();
    updated["active"] = json!(false);
    let shop = MockShop::spawn([(StatusCode::OK, json!({ "carrier_service": updated }))]).await?;

    let mut carrier = expected();
    carrier.active = false;

    let client = shop.client();
    let result = client.carrier_services().update(carrier.clone()).await?;
    pretty_assert_eq!(result, carrier);

    let requests = shop.requests();
    pretty_assert_eq!(requests.len(), 1);
    pretty_assert_eq!(requests[0].method, Method::PUT);
    pretty_assert_eq!(requests[0].path, shop.path("carrier_services/1.json"));
    pretty_assert_eq!(
        requests[0]
            .body
            .as_ref()
            .and_then(|body| body.pointer("/carrier_service/active")),
        Some(&json!(false))
    );

    Ok(())
}

#[test_log::test(tokio::test)]
async fn delete() -> Result<()> {
    let shop = MockShop::spawn([(StatusCode::OK, json!({}))]).await?;

    let client = shop.client();
    client.carrier_services().delete(1).await?;

    let requests = shop.requests();
    pretty_assert_eq!(requests.len(), 1);
    pretty_assert_eq!(requests[0].method, Method::DELETE);
    pretty_assert_eq!(requests[0].path, shop.path("carrier_services/1.json"));
    pretty_assert_eq!(requests[0].body, None);

    Ok(())
}

#[test_log::test(tokio::test)]
async fn malformed_response_is_an_error() -> Result<()> {
    let shop = MockShop::spawn([(
        StatusCode::OK,
        json!({ "carrier_services": [{ "id": "not a number" }] }),
    )])
    .await?;

    let client = shop.client();
    let err = client.carrier_services().list().await.unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("parse JSON response"), "{chain}");

    Ok(())
}
