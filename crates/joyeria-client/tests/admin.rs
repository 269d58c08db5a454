mod support;

use std::sync::Arc;

use joyeria_client::{AdminClient, CartError, CatalogClient};
use joyeria_commerce::catalog::{CategoryUpdate, NewCategory};
use joyeria_commerce::{CategoryId, OrderId, ProductId};
use serde_json::json;
use support::{CountingConfirm, FakeBackend};

fn backend() -> Arc<FakeBackend> {
    Arc::new(
        FakeBackend::with_catalog()
            .with_category("anillos", "Anillos")
            .with_category("collares", "Collares")
            .with_order(json!({
                "_id": "o1",
                "order_number": "ORD-000001",
                "items": [],
                "total": 100.0,
                "status": "completed",
            })),
    )
}

#[tokio::test]
async fn created_category_shows_up_in_the_catalog() {
    let backend = backend();
    let admin = AdminClient::new(backend.clone());

    let category = NewCategory::new("  Pulseras ", "Plata y oro").unwrap();
    let id = admin.create_category(&category).await.unwrap();

    assert_eq!(id, CategoryId::new("cat1"));
    let listed = CatalogClient::new(backend.clone()).list_categories().await.unwrap();
    let created = listed.iter().find(|c| c.id == id).unwrap();
    assert_eq!(created.name, "Pulseras");
    assert_eq!(created.description, "Plata y oro");
    assert_eq!(backend.requests(), vec!["POST /categories", "GET /categories"]);
}

#[tokio::test]
async fn duplicate_category_name_is_rejected() {
    let backend = backend();
    let admin = AdminClient::new(backend.clone());

    let err = admin
        .create_category(&NewCategory::new("anillos", "").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::Rejected { status: 400, .. }));
    assert!(err.user_message().contains("ya existe"));
    assert_eq!(backend.categories().len(), 2);
}

#[tokio::test]
async fn update_changes_only_the_given_fields() {
    let backend = backend();
    let admin = AdminClient::new(backend.clone());

    let update = CategoryUpdate {
        description: Some("Oro de 18k".to_string()),
        ..Default::default()
    };
    admin
        .update_category(&CategoryId::new("anillos"), &update)
        .await
        .unwrap();

    let anillos = backend
        .categories()
        .into_iter()
        .find(|c| c["_id"] == "anillos")
        .unwrap();
    assert_eq!(anillos["name"], "Anillos");
    assert_eq!(anillos["description"], "Oro de 18k");
}

#[tokio::test]
async fn empty_update_sends_nothing() {
    let backend = backend();
    let admin = AdminClient::new(backend.clone());

    let err = admin
        .update_category(&CategoryId::new("anillos"), &CategoryUpdate::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::Validation(_)));
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn update_of_unknown_category_is_not_found() {
    let admin = AdminClient::new(backend());

    let update = CategoryUpdate {
        name: Some("Aretes".to_string()),
        ..Default::default()
    };
    let err = admin
        .update_category(&CategoryId::new("nope"), &update)
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::NotFound(_)));
}

#[tokio::test]
async fn category_with_products_cannot_be_deleted() {
    let backend = backend();
    let admin = AdminClient::new(backend.clone());

    let err = admin
        .delete_category(&CategoryId::new("anillos"))
        .await
        .unwrap_err();

    match err {
        CartError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("1 productos"));
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
    assert_eq!(backend.categories().len(), 2);
}

#[tokio::test]
async fn unused_category_is_deleted() {
    let backend = Arc::new(FakeBackend::new().with_category("aretes", "Aretes"));
    let admin = AdminClient::new(backend.clone());

    assert!(admin.delete_category(&CategoryId::new("aretes")).await.unwrap());
    assert!(backend.categories().is_empty());
    assert_eq!(backend.requests(), vec!["DELETE /categories/aretes"]);
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let backend = backend();
    let confirm = CountingConfirm::new(false);
    let admin = AdminClient::new(backend.clone()).with_confirm(confirm.clone());

    assert!(!admin.delete_product(&ProductId::new("p1")).await.unwrap());
    assert!(!admin.delete_order(&OrderId::new("o1")).await.unwrap());

    assert_eq!(confirm.asked(), 2);
    assert_eq!(backend.request_count(), 0);
    assert!(backend.has_product("p1"));
}

#[tokio::test]
async fn blank_id_is_rejected_before_asking() {
    let backend = backend();
    let confirm = CountingConfirm::new(true);
    let admin = AdminClient::new(backend.clone()).with_confirm(confirm.clone());

    let err = admin.delete_product(&ProductId::new("  ")).await.unwrap_err();

    assert!(matches!(err, CartError::Validation(_)));
    assert_eq!(confirm.asked(), 0);
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn product_and_order_are_deleted() {
    let backend = backend();
    let admin = AdminClient::new(backend.clone()).with_confirm(CountingConfirm::new(true));

    assert!(admin.delete_product(&ProductId::new("p1")).await.unwrap());
    assert!(admin.delete_order(&OrderId::new("o1")).await.unwrap());

    assert!(!backend.has_product("p1"));
    assert!(backend.order_ids().is_empty());
    assert_eq!(
        backend.requests(),
        vec!["DELETE /products/p1", "DELETE /orders/o1"]
    );
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let admin = AdminClient::new(backend());

    let err = admin.delete_order(&OrderId::new("o9")).await.unwrap_err();

    assert!(matches!(err, CartError::NotFound(_)));
}
