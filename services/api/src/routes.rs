//! HTTP routes and resource handlers
//!
//! Handlers orchestrate validator → persistence call → fault translation.
//! On failure they forward a typed error; the response itself is always
//! rendered by the failure responder in `common::error`.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use common::error::{AppError, AppResult};
use common::fault::{FaultContext, StorageFault, translate_storage_fault};
use common::messages;

use crate::AppState;
use crate::auth::Subject;
use crate::models::{ObjectId, UserResponse};
use crate::validation::{
    CreateItemRequest, ItemsFilterQuery, Schema, SigninRequest, SignupRequest,
    UpdateProfileRequest, Validated,
};

/// Response for a successful signin
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Create the router for the service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/users/me", get(get_current_user).patch(update_profile))
        .route("/items", get(list_items).post(create_item))
        .route("/items/:id", delete(delete_item))
        .route("/items/:id/likes", put(like_item).delete(unlike_item))
        .fallback(unknown_route)
        .with_state(state)
}

fn user_fault(fault: StorageFault) -> AppError {
    translate_storage_fault(fault, FaultContext::User)
}

fn item_fault(fault: StorageFault) -> AppError {
    translate_storage_fault(fault, FaultContext::Item)
}

fn parse_item_id(raw: &str) -> AppResult<ObjectId> {
    raw.parse()
        .map_err(|_| translate_storage_fault(StorageFault::BadKey, FaultContext::Item))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "wtwr-api"
    }))
}

/// POST /signup — register a new user
pub async fn signup(
    State(state): State<AppState>,
    Validated(new_user): Validated<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state.users.create(new_user).await.map_err(user_fault)?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /signin — exchange credentials for a token
pub async fn signin(
    State(state): State<AppState>,
    Validated(credentials): Validated<SigninRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .users
        .find_by_credentials(&credentials.email, &credentials.password)
        .await
        .ok_or_else(|| AppError::unauthorized(messages::INVALID_CREDENTIALS))?;

    let token = state.jwt.issue(user.id).map_err(|e| {
        error!("Failed to issue token: {}", e);
        AppError::internal()
    })?;

    Ok(Json(TokenResponse { token }))
}

/// GET /users/me — the authenticated user's profile
pub async fn get_current_user(
    State(state): State<AppState>,
    Subject(subject): Subject,
) -> AppResult<impl IntoResponse> {
    let user = state.users.find_by_id(subject).await.map_err(user_fault)?;
    Ok(Json(UserResponse::from(user)))
}

/// PATCH /users/me — update name and avatar
pub async fn update_profile(
    State(state): State<AppState>,
    Subject(subject): Subject,
    Validated(update): Validated<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .users
        .update_profile(subject, update)
        .await
        .map_err(user_fault)?;
    Ok(Json(UserResponse::from(user)))
}

/// GET /items — list items, optionally filtered by weather/owner
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemsFilterQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = query.validate()?;
    Ok(Json(state.items.list(&filter).await))
}

/// POST /items — create an item owned by the caller
pub async fn create_item(
    State(state): State<AppState>,
    Subject(subject): Subject,
    Validated(new_item): Validated<CreateItemRequest>,
) -> AppResult<impl IntoResponse> {
    let item = state
        .items
        .create(new_item, subject)
        .await
        .map_err(item_fault)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /items/:id — delete an item the caller owns
///
/// The ownership check strictly precedes the delete: a non-owner is
/// rejected before any mutating call is issued.
pub async fn delete_item(
    State(state): State<AppState>,
    Subject(subject): Subject,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_item_id(&id)?;
    let item = state.items.find_by_id(id).await.map_err(item_fault)?;

    if item.owner != subject {
        return Err(AppError::forbidden(messages::FORBIDDEN_ACCESS));
    }

    state.items.delete(id).await.map_err(item_fault)?;
    Ok(Json(json!({ "message": messages::CLOTHING_ITEM_DELETED })))
}

/// PUT /items/:id/likes — add the caller to the item's likes
pub async fn like_item(
    State(state): State<AppState>,
    Subject(subject): Subject,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_item_id(&id)?;
    let item = state
        .items
        .add_like(id, subject)
        .await
        .map_err(item_fault)?;
    Ok(Json(item))
}

/// DELETE /items/:id/likes — remove the caller from the item's likes
pub async fn unlike_item(
    State(state): State<AppState>,
    Subject(subject): Subject,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_item_id(&id)?;
    let item = state
        .items
        .remove_like(id, subject)
        .await
        .map_err(item_fault)?;
    Ok(Json(item))
}

/// Fallback for any unmatched route
pub async fn unknown_route() -> AppError {
    AppError::not_found(messages::ROUTE_NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::jwt::{JwtConfig, JwtService};
    use crate::models::{NewUser, User};
    use crate::repositories::{ItemRepository, UserRepository};

    const TEST_SECRET: &str = "test-secret";

    fn test_state() -> AppState {
        AppState {
            users: UserRepository::new(),
            items: ItemRepository::new(),
            jwt: JwtService::new(&JwtConfig {
                secret: TEST_SECRET.to_string(),
                token_expiry: 3600,
            }),
        }
    }

    fn request(
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(state: &AppState, req: Request<Body>) -> (StatusCode, Value) {
        let response = create_router(state.clone()).oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn registered_user(state: &AppState, email: &str) -> (User, String) {
        let user = state
            .users
            .create(NewUser {
                name: "Al".to_string(),
                email: email.to_string(),
                password: "longenough".to_string(),
                avatar: "http://x.com/a.png".to_string(),
            })
            .await
            .unwrap();
        let token = state.jwt.issue(user.id).unwrap();
        (user, token)
    }

    fn signup_body() -> Value {
        json!({
            "name": "Al",
            "email": "a@b.com",
            "password": "longenough",
            "avatar": "http://x.com/a.png"
        })
    }

    #[tokio::test]
    async fn signup_returns_201_without_a_password_field() {
        let state = test_state();
        let (status, body) = send(&state, request("POST", "/signup", None, Some(signup_body()))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Al");
        assert_eq!(body["email"], "a@b.com");
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn invalid_signup_is_rejected_before_any_persistence_call() {
        let state = test_state();
        let (status, body) = send(
            &state,
            request(
                "POST",
                "/signup",
                None,
                Some(json!({ "name": "A", "email": "a@b.com" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            format!(
                "{}, {}, {}",
                messages::NAME_TOO_SHORT,
                messages::PASSWORD_REQUIRED,
                messages::AVATAR_REQUIRED
            )
        );

        // Nothing was stored for that email.
        assert!(state.users.find_by_credentials("a@b.com", "longenough").await.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_signup_is_a_conflict() {
        let state = test_state();
        send(&state, request("POST", "/signup", None, Some(signup_body()))).await;
        let (status, body) = send(&state, request("POST", "/signup", None, Some(signup_body()))).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], messages::EMAIL_ALREADY_EXISTS);
    }

    #[tokio::test]
    async fn signin_returns_a_token_for_the_registered_user() {
        let state = test_state();
        let (user, _) = registered_user(&state, "a@b.com").await;

        let (status, body) = send(
            &state,
            request(
                "POST",
                "/signin",
                None,
                Some(json!({ "email": "a@b.com", "password": "longenough" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap();
        assert_eq!(state.jwt.verify(token).unwrap(), user.id);
    }

    #[tokio::test]
    async fn signin_with_wrong_password_is_unauthorized() {
        let state = test_state();
        registered_user(&state, "a@b.com").await;

        let (status, body) = send(
            &state,
            request(
                "POST",
                "/signin",
                None,
                Some(json!({ "email": "a@b.com", "password": "wrongpass" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], messages::INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn signin_with_missing_fields_is_a_validation_error() {
        let state = test_state();
        let (status, body) = send(&state, request("POST", "/signin", None, Some(json!({})))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            format!("{}, {}", messages::EMAIL_REQUIRED, messages::PASSWORD_REQUIRED)
        );
    }

    #[tokio::test]
    async fn missing_expired_and_malformed_tokens_get_the_same_401() {
        let state = test_state();

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let expired = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &crate::jwt::Claims {
                sub: ObjectId::new().to_string(),
                iat: now - 7_200,
                exp: now - 3_600,
            },
            &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        for req in [
            request("GET", "/users/me", None, None),
            request("GET", "/users/me", Some("garbage"), None),
            request("GET", "/users/me", Some(&expired), None),
        ] {
            let (status, body) = send(&state, req).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["message"], messages::AUTHORIZATION_REQUIRED);
        }
    }

    #[tokio::test]
    async fn get_current_user_returns_the_caller() {
        let state = test_state();
        let (user, token) = registered_user(&state, "a@b.com").await;

        let (status, body) = send(&state, request("GET", "/users/me", Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], user.id.to_string());
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn token_for_a_deleted_user_yields_404() {
        let state = test_state();
        let token = state.jwt.issue(ObjectId::new()).unwrap();

        let (status, body) = send(&state, request("GET", "/users/me", Some(&token), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], messages::USER_NOT_FOUND);
    }

    #[tokio::test]
    async fn profile_update_changes_name_and_avatar() {
        let state = test_state();
        let (_, token) = registered_user(&state, "a@b.com").await;

        let (status, body) = send(
            &state,
            request(
                "PATCH",
                "/users/me",
                Some(&token),
                Some(json!({ "name": "Alice", "avatar": "http://x.com/new.png" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["avatar"], "http://x.com/new.png");
    }

    #[tokio::test]
    async fn items_can_be_created_and_listed_publicly() {
        let state = test_state();
        let (user, token) = registered_user(&state, "a@b.com").await;

        let (status, body) = send(
            &state,
            request(
                "POST",
                "/items",
                Some(&token),
                Some(json!({ "name": "Scarf", "weather": "cold", "imageUrl": "http://x.com/scarf.png" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["owner"], user.id.to_string());
        assert_eq!(body["weather"], "cold");

        // Listing needs no token.
        let (status, body) = send(&state, request("GET", "/items", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        // The weather filter applies.
        let (_, body) = send(&state, request("GET", "/items?weather=hot", None, None)).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn creating_an_item_requires_a_token() {
        let state = test_state();
        let (status, body) = send(
            &state,
            request(
                "POST",
                "/items",
                None,
                Some(json!({ "name": "Scarf", "weather": "cold", "imageUrl": "http://x.com/scarf.png" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], messages::AUTHORIZATION_REQUIRED);
    }

    #[tokio::test]
    async fn listing_with_a_malformed_filter_is_a_validation_error() {
        let state = test_state();
        let (status, body) = send(&state, request("GET", "/items?owner=nope", None, None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], messages::INVALID_ID_FORMAT);
    }

    #[tokio::test]
    async fn only_the_owner_may_delete_an_item() {
        let state = test_state();
        let (owner, owner_token) = registered_user(&state, "owner@b.com").await;
        let (_, other_token) = registered_user(&state, "other@b.com").await;

        let item = state
            .items
            .create(
                crate::models::NewClothingItem {
                    name: "Scarf".to_string(),
                    weather: crate::models::Weather::Cold,
                    image_url: "http://x.com/scarf.png".to_string(),
                },
                owner.id,
            )
            .await
            .unwrap();

        // A non-owner is rejected and the item survives untouched.
        let (status, body) = send(
            &state,
            request("DELETE", &format!("/items/{}", item.id), Some(&other_token), None),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], messages::FORBIDDEN_ACCESS);
        assert!(state.items.find_by_id(item.id).await.is_ok());

        // The owner succeeds.
        let (status, body) = send(
            &state,
            request("DELETE", &format!("/items/{}", item.id), Some(&owner_token), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], messages::CLOTHING_ITEM_DELETED);
        assert!(state.items.find_by_id(item.id).await.is_err());
    }

    #[tokio::test]
    async fn deleting_with_a_malformed_id_is_a_validation_error() {
        let state = test_state();
        let (_, token) = registered_user(&state, "a@b.com").await;

        let (status, body) = send(
            &state,
            request("DELETE", "/items/not-a-hex-id", Some(&token), None),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], messages::INVALID_ITEM_ID);
    }

    #[tokio::test]
    async fn deleting_a_missing_item_is_not_found() {
        let state = test_state();
        let (_, token) = registered_user(&state, "a@b.com").await;

        let (status, body) = send(
            &state,
            request(
                "DELETE",
                &format!("/items/{}", ObjectId::new()),
                Some(&token),
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], messages::CLOTHING_ITEM_NOT_FOUND);
    }

    #[tokio::test]
    async fn liking_twice_keeps_a_single_membership() {
        let state = test_state();
        let (user, token) = registered_user(&state, "a@b.com").await;
        let item = state
            .items
            .create(
                crate::models::NewClothingItem {
                    name: "Scarf".to_string(),
                    weather: crate::models::Weather::Cold,
                    image_url: "http://x.com/scarf.png".to_string(),
                },
                user.id,
            )
            .await
            .unwrap();

        let uri = format!("/items/{}/likes", item.id);
        send(&state, request("PUT", &uri, Some(&token), None)).await;
        let (status, body) = send(&state, request("PUT", &uri, Some(&token), None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likes"].as_array().unwrap().len(), 1);
        assert_eq!(body["likes"][0], user.id.to_string());

        let (status, body) = send(&state, request("DELETE", &uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["likes"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn liking_a_missing_item_is_not_found() {
        let state = test_state();
        let (_, token) = registered_user(&state, "a@b.com").await;

        let (status, body) = send(
            &state,
            request(
                "PUT",
                &format!("/items/{}/likes", ObjectId::new()),
                Some(&token),
                None,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], messages::CLOTHING_ITEM_NOT_FOUND);
    }

    #[tokio::test]
    async fn unmatched_routes_render_404() {
        let state = test_state();
        let (status, body) = send(&state, request("GET", "/nope", None, None)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], messages::ROUTE_NOT_FOUND);
    }

    #[tokio::test]
    async fn health_check_is_public() {
        let state = test_state();
        let (status, body) = send(&state, request("GET", "/health", None, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
