//! In-memory storefront backend for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use joyeria_client::{CartRenderer, CartView, Confirm, Notifier, Toast, ToastLevel};
use joyeria_data::{ApiRequest, FetchError, Method, Response, Transport};
use serde_json::{json, Value};

#[derive(Clone)]
struct Product {
    name: String,
    price: f64,
}

impl Product {
    fn category_id(&self) -> &'static str {
        if self.name == "Anillo" {
            "anillos"
        } else {
            "collares"
        }
    }
}

#[derive(Default)]
struct Inner {
    products: HashMap<String, Product>,
    carts: HashMap<String, Vec<Value>>,
    categories: Vec<Value>,
    orders: Vec<Value>,
    requests: Vec<String>,
    next_cart: u32,
    order_status: String,
    offline: bool,
    next_category: u32,
    /// Delay for the next cart read; its snapshot is taken before waiting.
    slow_read: Option<Duration>,
}

/// Behaves like the storefront API: adds increment existing lines, adds
/// upsert unknown carts and approved orders empty the cart.
pub struct FakeBackend {
    inner: Mutex<Inner>,
    delay: Option<Duration>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                order_status: "completed".to_string(),
                ..Default::default()
            }),
            delay: None,
        }
    }

    /// The storefront's sample catalog: an anillo at 100.00 and a collar at 50.00.
    pub fn with_catalog() -> Self {
        Self::new()
            .with_product("p1", "Anillo", 100.0)
            .with_product("p2", "Collar", 50.0)
    }

    pub fn with_product(self, id: &str, name: &str, price: f64) -> Self {
        self.inner.lock().unwrap().products.insert(
            id.to_string(),
            Product {
                name: name.to_string(),
                price,
            },
        );
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_category(self, id: &str, name: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .categories
            .push(json!({ "_id": id, "name": name, "description": "" }));
        self
    }

    pub fn with_order(self, order: Value) -> Self {
        self.inner.lock().unwrap().orders.push(order);
        self
    }

    /// Store raw snapshot rows for a cart, bypassing the add rules.
    pub fn seed_cart(&self, id: &str, rows: Vec<Value>) {
        self.inner.lock().unwrap().carts.insert(id.to_string(), rows);
    }

    pub fn set_order_status(&self, status: &str) {
        self.inner.lock().unwrap().order_status = status.to_string();
    }

    /// Answer the next `GET /carts/{id}` late, with the cart as it was
    /// when the request arrived.
    pub fn delay_next_cart_read(&self, delay: Duration) {
        self.inner.lock().unwrap().slow_read = Some(delay);
    }

    pub fn categories(&self) -> Vec<Value> {
        self.inner.lock().unwrap().categories.clone()
    }

    pub fn order_ids(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .orders
            .iter()
            .filter_map(|o| o["_id"].as_str().map(str::to_string))
            .collect()
    }

    pub fn has_product(&self, id: &str) -> bool {
        self.inner.lock().unwrap().products.contains_key(id)
    }

    pub fn set_offline(&self, offline: bool) {
        self.inner.lock().unwrap().offline = offline;
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    /// Requests seen so far, as `"METHOD /path"`.
    pub fn requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn has_cart(&self, id: &str) -> bool {
        self.inner.lock().unwrap().carts.contains_key(id)
    }

    pub fn cart_rows(&self, id: &str) -> Vec<Value> {
        self.inner
            .lock()
            .unwrap()
            .carts
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    fn handle(&self, request: &ApiRequest) -> Response {
        let mut inner = self.inner.lock().unwrap();
        let segments = request.segment_strs();
        let body: Value = request.json_body().ok().flatten().unwrap_or(Value::Null);

        match (request.method, segments.as_slice()) {
            (Method::Post, ["carts"]) => {
                inner.next_cart += 1;
                let id = format!("c{}", inner.next_cart);
                inner.carts.insert(id.clone(), Vec::new());
                Response::json_value(201, &json!({ "id": id }))
            }
            (Method::Get, ["carts", id]) => match inner.carts.get(*id) {
                Some(items) => Response::json_value(200, &json!({ "_id": id, "items": items })),
                None => not_found("Cart not found"),
            },
            (Method::Post, ["carts", id, "add"]) => {
                let product_id = body["product_id"].as_str().unwrap_or_default().to_string();
                let quantity = body["quantity"].as_i64().unwrap_or(1);
                let Some(product) = inner.products.get(&product_id).cloned() else {
                    return not_found("Producto no encontrado");
                };
                let items = inner.carts.entry(id.to_string()).or_default();
                match items.iter_mut().find(|row| row["product_id"] == product_id.as_str()) {
                    Some(row) => {
                        let current = row["quantity"].as_i64().unwrap_or(0);
                        row["quantity"] = json!(current + quantity);
                    }
                    None => items.push(json!({
                        "product_id": product_id,
                        "name": product.name,
                        "price": product.price,
                        "quantity": quantity,
                        "image": "/static/images/placeholder.jpg",
                    })),
                }
                Response::json_value(200, &json!({ "message": "Product added" }))
            }
            (Method::Delete, ["carts", id, "item", product_id]) => match inner.carts.get_mut(*id) {
                Some(items) => {
                    items.retain(|row| row["product_id"] != *product_id);
                    Response::json_value(200, &json!({ "message": "Product removed" }))
                }
                None => not_found("Cart not found"),
            },
            (Method::Put, ["carts", id, "clear"]) => match inner.carts.get_mut(*id) {
                Some(items) => {
                    items.clear();
                    Response::json_value(200, &json!({ "message": "Cart cleared" }))
                }
                None => not_found("Cart not found"),
            },
            (Method::Post, ["orders"]) => {
                let cart_id = body["cart_id"].as_str().unwrap_or_default().to_string();
                let total: f64 = match inner.carts.get(&cart_id) {
                    Some(items) if !items.is_empty() => items
                        .iter()
                        .map(|row| {
                            row["price"].as_f64().unwrap_or(0.0)
                                * row["quantity"].as_i64().unwrap_or(0) as f64
                        })
                        .sum(),
                    _ => return not_found("Cart is empty or not found"),
                };
                let status = inner.order_status.clone();
                let seq = inner.orders.len() + 1;
                let order_number = format!("ORD-{:06}", seq);
                if status == "completed" {
                    if let Some(items) = inner.carts.get_mut(&cart_id) {
                        items.clear();
                    }
                }
                inner.orders.push(json!({
                    "_id": format!("o{}", seq),
                    "order_number": order_number,
                    "items": [],
                    "total": total,
                    "payment_method": body["payment_method"],
                    "payment_approved": status == "completed",
                    "status": status,
                    "date": "2026-10-19T10:00:00",
                }));
                Response::json_value(
                    201,
                    &json!({
                        "message": "Order processed",
                        "order_number": order_number,
                        "status": status,
                        "total": total,
                    }),
                )
            }
            (Method::Get, ["orders"]) => {
                let wanted = request
                    .query
                    .iter()
                    .find(|(k, _)| k == "status")
                    .map(|(_, v)| v.clone());
                let orders: Vec<Value> = inner
                    .orders
                    .iter()
                    .filter(|o| wanted.as_deref().map_or(true, |s| o["status"] == s))
                    .cloned()
                    .collect();
                Response::json_value(200, &Value::Array(orders))
            }
            (Method::Get, ["products"]) => {
                let category = request
                    .query
                    .iter()
                    .find(|(k, _)| k == "category")
                    .map(|(_, v)| v.clone());
                let mut products: Vec<Value> = inner
                    .products
                    .iter()
                    .map(|(id, p)| {
                        json!({
                            "_id": id,
                            "name": p.name,
                            "price": p.price,
                            "category_id": p.category_id(),
                        })
                    })
                    .filter(|p| category.as_deref().map_or(true, |c| p["category_id"] == c))
                    .collect();
                products.sort_by(|a, b| a["_id"].as_str().cmp(&b["_id"].as_str()));
                Response::json_value(200, &Value::Array(products))
            }
            (Method::Delete, ["products", id]) => {
                inner.products.remove(*id);
                Response::json_value(200, &json!({ "message": "Product and images deleted" }))
            }
            (Method::Get, ["categories"]) => {
                Response::json_value(200, &Value::Array(inner.categories.clone()))
            }
            (Method::Post, ["categories"]) => {
                let name = body["name"].as_str().unwrap_or_default().to_string();
                if name.is_empty() {
                    return bad_request("El nombre de la categoría es obligatorio");
                }
                let taken = inner.categories.iter().any(|c| {
                    c["name"]
                        .as_str()
                        .is_some_and(|n| n.eq_ignore_ascii_case(&name))
                });
                if taken {
                    return bad_request(&format!("La categoría '{name}' ya existe"));
                }
                inner.next_category += 1;
                let id = format!("cat{}", inner.next_category);
                inner.categories.push(json!({
                    "_id": id.clone(),
                    "name": name,
                    "description": body["description"].as_str().unwrap_or_default(),
                }));
                Response::json_value(201, &json!({ "message": "Categoría creada con éxito", "id": id }))
            }
            (Method::Put, ["categories", id]) => {
                let Some(category) = inner.categories.iter_mut().find(|c| c["_id"] == *id) else {
                    return not_found("Categoría no encontrada");
                };
                if let Value::Object(fields) = body {
                    for (key, value) in fields {
                        category[key.as_str()] = value;
                    }
                }
                Response::json_value(200, &json!({ "message": "Categoría actualizada" }))
            }
            (Method::Delete, ["categories", id]) => {
                let in_use = inner
                    .products
                    .values()
                    .filter(|p| p.category_id() == *id)
                    .count();
                if in_use > 0 {
                    return bad_request(&format!(
                        "No se puede eliminar: hay {in_use} productos asociados a esta categoría."
                    ));
                }
                let before = inner.categories.len();
                inner.categories.retain(|c| c["_id"] != *id);
                if inner.categories.len() == before {
                    return not_found("Categoría no encontrada");
                }
                Response::json_value(200, &json!({ "message": "Categoría eliminada con éxito" }))
            }
            (Method::Delete, ["orders", id]) => {
                let before = inner.orders.len();
                inner.orders.retain(|o| o["_id"] != *id);
                if inner.orders.len() == before {
                    return not_found("Order not found");
                }
                Response::json_value(200, &json!({ "message": "Order record deleted" }))
            }
            _ => not_found("Not found"),
        }
    }
}

fn not_found(message: &str) -> Response {
    Response::json_value(404, &json!({ "error": message }))
}

fn bad_request(message: &str) -> Response {
    Response::json_value(400, &json!({ "error": message }))
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<Response, FetchError> {
        let (offline, slow_read) = {
            let mut inner = self.inner.lock().unwrap();
            inner
                .requests
                .push(format!("{} {}", request.method, request.path()));
            let is_cart_read = request.method == Method::Get
                && request.segment_strs().first() == Some(&"carts");
            let slow_read = if is_cart_read { inner.slow_read.take() } else { None };
            (inner.offline, slow_read)
        };
        if let (Some(delay), false) = (slow_read, offline) {
            let response = self.handle(&request);
            tokio::time::sleep(delay).await;
            return Ok(response);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if offline {
            return Err(FetchError::Connection("connection refused".to_string()));
        }
        Ok(self.handle(&request))
    }
}

/// Collects toasts.
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.toasts()
            .into_iter()
            .filter(|t| t.level == ToastLevel::Error)
            .map(|t| t.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

/// Counts confirmation prompts and answers with a fixed value.
pub struct CountingConfirm {
    answer: bool,
    asked: Mutex<usize>,
}

impl CountingConfirm {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            asked: Mutex::new(0),
        })
    }

    pub fn asked(&self) -> usize {
        *self.asked.lock().unwrap()
    }
}

impl Confirm for CountingConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        *self.asked.lock().unwrap() += 1;
        self.answer
    }
}

/// Keeps every rendered view.
#[derive(Default)]
pub struct RecordingRenderer {
    views: Mutex<Vec<CartView>>,
}

impl RecordingRenderer {
    pub fn last(&self) -> Option<CartView> {
        self.views.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.views.lock().unwrap().len()
    }
}

impl CartRenderer for RecordingRenderer {
    fn render(&self, view: &CartView) {
        self.views.lock().unwrap().push(view.clone());
    }
}
