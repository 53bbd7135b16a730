//! User CRUD handlers.
//!
//! Every write re-validates its payload here, whatever the client already
//! checked, and national identifiers are stored digits-only.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
};
use tracing::instrument;

use user_registry_core::{User, UserDraft, UserId, UserPatch};

use crate::error::Result;
use crate::state::AppState;

/// List every user.
///
/// GET /users
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.users().list().await?;
    tracing::debug!(count = users.len(), "Listed users");
    Ok(Json(users))
}

/// Create a user.
///
/// POST /users
///
/// Missing fields deserialize as empty strings and fail the required-field
/// check, so the response names the first missing field.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UserDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(draft) = payload?;
    let new_user = draft.validate()?;

    let user = state.users().insert(&new_user).await?;
    tracing::info!(user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Update the supplied fields of a user.
///
/// PUT /users/{id}
///
/// Fields absent from the body keep their stored values. An `id` key in the
/// body is ignored.
#[instrument(skip(state, id, payload))]
pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<UserId>, PathRejection>,
    payload: std::result::Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<User>> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let patch = patch.validate()?;

    let user = state.users().update_by_id(id, &patch).await?;
    tracing::info!(user_id = %user.id, "User updated");

    Ok(Json(user))
}

/// Delete a user.
///
/// DELETE /users/{id}
#[instrument(skip(state, id))]
pub async fn delete(
    State(state): State<AppState>,
    id: std::result::Result<Path<UserId>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id?;

    state.users().delete_by_id(id).await?;
    tracing::info!(user_id = %id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Request, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::db::InMemoryUserStore;
    use crate::routes;

    use super::*;

    fn app() -> Router {
        routes::app(AppState::new(Arc::new(InMemoryUserStore::new())))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn maria() -> Value {
        json!({
            "nome": "Maria Souza",
            "email": "maria@example.com",
            "telefone": "(11) 98765-4321",
            "cep": "01001-000",
            "cpf": "12345678909",
        })
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let app = app();

        let (status, created) = send(&app, "POST", "/users", Some(maria())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        assert_eq!(created["nome"], "Maria Souza");

        let (status, listed) = send(&app, "GET", "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created]));
    }

    #[tokio::test]
    async fn test_duplicate_cpf_ignores_formatting() {
        let app = app();
        let (first, _) = send(&app, "POST", "/users", Some(maria())).await;

        let mut other = maria();
        other["email"] = json!("outra@example.com");
        other["cpf"] = json!("123.456.789-09");
        let (second, body) = send(&app, "POST", "/users", Some(other)).await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["message"], "duplicate email or identifier");
    }

    #[tokio::test]
    async fn test_create_stores_cpf_digits_only() {
        let app = app();
        let mut formatted = maria();
        formatted["cpf"] = json!("123.456.789-09");
        let (_, created) = send(&app, "POST", "/users", Some(formatted)).await;
        assert_eq!(created["cpf"], "12345678909");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payloads() {
        let app = app();

        let mut short_cpf = maria();
        short_cpf["cpf"] = json!("1234567890");
        let (status, _) = send(&app, "POST", "/users", Some(short_cpf)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut missing = maria();
        missing.as_object_mut().unwrap().remove("nome");
        let (status, body) = send(&app, "POST", "/users", Some(missing)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("nome"));

        let (_, listed) = send(&app, "GET", "/users", None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_json_400() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_body_rejections_keep_their_status() {
        let app = app();

        let no_content_type = Request::builder()
            .method("POST")
            .uri("/users")
            .body(Body::from(maria().to_string()))
            .unwrap();
        let response = app.clone().oneshot(no_content_type).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let mut wrong_type = maria();
        wrong_type["nome"] = json!(5);
        let (status, body) = send(&app, "POST", "/users", Some(wrong_type)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"].is_string());

        let (status, _) = send(&app, "PUT", "/users/1", Some(json!({ "cep": [] }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_changes_only_supplied_fields() {
        let app = app();
        let (_, created) = send(&app, "POST", "/users", Some(maria())).await;

        let (status, updated) = send(
            &app,
            "PUT",
            "/users/1",
            Some(json!({ "id": 77, "telefone": "(21) 4000-0000" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], 1);
        assert_eq!(updated["telefone"], "(21) 4000-0000");
        assert_eq!(updated["nome"], created["nome"]);
        assert_eq!(updated["email"], created["email"]);
        assert_eq!(updated["cpf"], created["cpf"]);
    }

    #[tokio::test]
    async fn test_update_revalidates_and_detects_duplicates() {
        let app = app();
        send(&app, "POST", "/users", Some(maria())).await;
        let mut joao = maria();
        joao["email"] = json!("joao@example.com");
        joao["cpf"] = json!("98765432100");
        send(&app, "POST", "/users", Some(joao)).await;

        let (status, _) = send(&app, "PUT", "/users/2", Some(json!({ "email": "a@b" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "PUT",
            "/users/2",
            Some(json!({ "email": "maria@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "duplicate email or identifier");
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let app = app();

        let (status, body) = send(&app, "PUT", "/users/42", Some(json!({ "nome": "X" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "user not found");

        let (status, _) = send(&app, "DELETE", "/users/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_400() {
        let app = app();
        let (status, body) = send(&app, "DELETE", "/users/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_delete_returns_204_and_removes_record() {
        let app = app();
        send(&app, "POST", "/users", Some(maria())).await;

        let (status, body) = send(&app, "DELETE", "/users/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (_, listed) = send(&app, "GET", "/users", None).await;
        assert_eq!(listed, json!([]));
    }
}
