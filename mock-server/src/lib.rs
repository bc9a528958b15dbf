use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

/// Subscriptions keyed by id. Each entry is a JSON object carrying its own `id`.
pub type Db = Arc<RwLock<HashMap<String, Value>>>;

type ApiResult = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over an existing store, so tests can seed or inspect it.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/api/subscriptions", get(list_subscriptions).post(create_subscription))
        .route(
            "/api/subscriptions/{id}",
            put(update_subscription).delete(delete_subscription),
        )
        .route("/api/subscriptions/{id}/check", post(check_subscription))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"success": false, "error": "subscription not found"})),
    )
}

fn not_an_object() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"success": false, "error": "payload must be a JSON object"})),
    )
}

async fn list_subscriptions(State(db): State<Db>) -> Json<Vec<Value>> {
    let subscriptions = db.read().await;
    let mut all: Vec<Value> = subscriptions.values().cloned().collect();
    all.sort_by(|a, b| a["created_at"].as_str().cmp(&b["created_at"].as_str()));
    Json(all)
}

async fn create_subscription(State(db): State<Db>, Json(input): Json<Value>) -> ApiResult {
    let Value::Object(mut fields) = input else {
        return Err(not_an_object());
    };
    let id = Uuid::new_v4().to_string();
    fields.insert("id".to_string(), Value::String(id.clone()));
    fields.insert("created_at".to_string(), Value::String(Utc::now().to_rfc3339()));
    fields.entry("last_check").or_insert(Value::Null);

    let subscription = Value::Object(fields);
    debug!(%id, "created subscription");
    db.write().await.insert(id, subscription.clone());
    Ok((StatusCode::CREATED, Json(subscription)))
}

async fn update_subscription(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<Value>,
) -> ApiResult {
    let Value::Object(changes) = input else {
        return Err(not_an_object());
    };
    let mut subscriptions = db.write().await;
    let subscription = subscriptions.get_mut(&id).ok_or_else(not_found)?;
    merge_fields(subscription, changes);
    debug!(%id, "updated subscription");
    Ok((StatusCode::OK, Json(subscription.clone())))
}

async fn delete_subscription(State(db): State<Db>, Path(id): Path<String>) -> ApiResult {
    let mut subscriptions = db.write().await;
    subscriptions.remove(&id).ok_or_else(not_found)?;
    debug!(%id, "deleted subscription");
    Ok((StatusCode::OK, Json(json!({"success": true}))))
}

async fn check_subscription(State(db): State<Db>, Path(id): Path<String>) -> ApiResult {
    let mut subscriptions = db.write().await;
    let subscription = subscriptions.get_mut(&id).ok_or_else(not_found)?;
    if let Some(fields) = subscription.as_object_mut() {
        fields.insert("last_check".to_string(), Value::String(Utc::now().to_rfc3339()));
    }
    debug!(%id, "checked subscription");
    Ok((
        StatusCode::OK,
        Json(json!({"success": true, "subscription": subscription.clone()})),
    ))
}

/// Top-level merge; `id` and `created_at` are owned by the server.
fn merge_fields(target: &mut Value, changes: Map<String, Value>) {
    let Value::Object(fields) = target else {
        return;
    };
    for (key, value) in changes {
        if key == "id" || key == "created_at" {
            continue;
        }
        fields.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_top_level_fields() {
        let mut target = json!({"id": "1", "name": "old", "cookies": "a=b"});
        let changes = json!({"name": "new", "enabled": false});
        let Value::Object(changes) = changes else {
            unreachable!()
        };
        merge_fields(&mut target, changes);
        assert_eq!(
            target,
            json!({"id": "1", "name": "new", "cookies": "a=b", "enabled": false})
        );
    }

    #[test]
    fn merge_keeps_server_owned_fields() {
        let mut target = json!({"id": "1", "created_at": "2024-01-01T00:00:00+00:00"});
        let Value::Object(changes) = json!({"id": "hijack", "created_at": "never"}) else {
            unreachable!()
        };
        merge_fields(&mut target, changes);
        assert_eq!(target["id"], "1");
        assert_eq!(target["created_at"], "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn not_found_body_is_json() {
        let (status, Json(body)) = not_found();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "subscription not found");
    }
}
