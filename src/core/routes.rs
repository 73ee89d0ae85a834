// HTTP routes configuration

use crate::backend::HeroBackend;
use crate::core::state::AppState;
use crate::handlers::{auth, fallback, health, heroes, messages, mock_api};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    let mock_backend: Arc<dyn HeroBackend> = state.mock_backend.clone();

    Router::new()
        .route("/health", get(health::health_handler))

        // Session
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/auth/session", get(auth::session_handler))

        // Pages
        .route("/heroes", get(heroes::list_handler).post(heroes::add_handler))
        .route(
            "/heroes/{id}",
            get(heroes::detail_handler)
                .put(heroes::save_handler)
                .delete(heroes::delete_handler),
        )
        .route("/dashboard", get(heroes::dashboard_handler))
        .route(
            "/messages",
            get(messages::messages_handler).delete(messages::clear_messages_handler),
        )

        // 404 fallback for all unmatched routes
        .fallback(fallback::fallback_handler)

        .with_state(state)
        .merge(mock_api_router(mock_backend))
}

/// Routes of the mock hero collection, usable on their own
pub fn mock_api_router(backend: Arc<dyn HeroBackend>) -> Router {
    Router::new()
        .route(
            "/api/heroes",
            get(mock_api::list_handler).post(mock_api::create_handler),
        )
        .route(
            "/api/heroes/{id}",
            get(mock_api::get_handler)
                .put(mock_api::update_handler)
                .delete(mock_api::delete_handler),
        )
        .with_state(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::models::api::{MessagesResponse, SessionResponse};
    use crate::models::hero::HeroRecord;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let config = Config::from_toml("[server]\nport = 4200\n[backend]\ndelay_ms = 0\n").unwrap();
        Arc::new(AppState::new(config).unwrap())
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn decode<T: DeserializeOwned>(value: Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let router = build_router(test_state());
        let (status, body) = send(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].as_i64().unwrap() > 0);
        assert_eq!(body["backend"], "memory");
        assert_eq!(body["loggedIn"], false);
        assert_eq!(body["mockHeroes"], 9);
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let state = test_state();
        let router = build_router(state.clone());

        let (status, body) = send(
            &router,
            Method::POST,
            "/auth/login",
            Some(json!({"username": "admin", "password": "admin123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response: SessionResponse = decode(body);
        assert_eq!(response.user.unwrap().id, 1);

        let (_, body) = send(&router, Method::GET, "/auth/session", None).await;
        assert_eq!(body["user"]["username"], "admin");

        let (status, _) = send(&router, Method::POST, "/auth/logout", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&router, Method::POST, "/auth/logout", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(state.session.current_session().is_none());
    }

    #[tokio::test]
    async fn test_login_failures() {
        let router = build_router(test_state());

        let (status, body) = send(
            &router,
            Method::POST,
            "/auth/login",
            Some(json!({"username": "admin", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid username or password");

        let (status, body) = send(
            &router,
            Method::POST,
            "/auth/login",
            Some(json!({"username": "admin"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"]["fields"]["password"][0]["rule"], "required");
    }

    #[tokio::test]
    async fn test_register() {
        let state = test_state();
        let router = build_router(state.clone());

        let (status, body) = send(
            &router,
            Method::POST,
            "/auth/register",
            Some(json!({"username": "newbie", "password": "secret1", "confirmPassword": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["id"], 3);
        assert_eq!(state.session.current_session().unwrap().username, "newbie");

        let (status, body) = send(
            &router,
            Method::POST,
            "/auth/register",
            Some(json!({"username": "newbie", "password": "secret1", "confirmPassword": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Username is already taken");

        let (status, body) = send(
            &router,
            Method::POST,
            "/auth/register",
            Some(json!({"username": "other", "password": "secret1", "confirmPassword": "secret2"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"]["form"][0], "mismatch");
    }

    #[tokio::test]
    async fn test_list_page_add_and_delete() {
        let router = build_router(test_state());

        let (status, body) = send(&router, Method::GET, "/heroes", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decode::<Vec<HeroRecord>>(body).len(), 9);

        let (status, body) =
            send(&router, Method::POST, "/heroes", Some(json!({"name": "Nova"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let heroes: Vec<HeroRecord> = decode(body);
        assert_eq!(heroes.len(), 10);
        assert!(heroes.iter().any(|hero| hero.id == 21 && hero.name == "Nova"));

        let (status, _) =
            send(&router, Method::POST, "/heroes", Some(json!({"name": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&router, Method::DELETE, "/heroes/21", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(decode::<Vec<HeroRecord>>(body).iter().all(|hero| hero.id != 21));

        let (status, _) = send(&router, Method::DELETE, "/heroes/21", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_detail_page_save() {
        let router = build_router(test_state());

        let (status, body) = send(&router, Method::GET, "/heroes/14", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Celeritas");

        let form = json!({
            "name": "Celeritas",
            "power": "Speed",
            "level": 10,
            "origin": "Mercury",
            "isActive": false,
            "description": "Faster than ever"
        });
        let (status, body) = send(&router, Method::PUT, "/heroes/14", Some(form.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["level"], 10);
        assert_eq!(body["isActive"], false);

        let mut too_high = form.clone();
        too_high["level"] = json!(11);
        let (status, body) = send(&router, Method::PUT, "/heroes/14", Some(too_high)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"]["fields"]["level"][0]["rule"], "max");

        let (status, _) = send(&router, Method::PUT, "/heroes/99", Some(form)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&router, Method::GET, "/heroes/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_and_messages() {
        let router = build_router(test_state());

        let (_, body) = send(&router, Method::GET, "/dashboard", None).await;
        let ids: Vec<u32> = decode::<Vec<HeroRecord>>(body).iter().map(|hero| hero.id).collect();
        assert_eq!(ids, vec![13, 14, 15, 16]);

        let (_, body) = send(&router, Method::GET, "/messages", None).await;
        let response: MessagesResponse = decode(body);
        assert_eq!(response.messages, vec!["HeroService: fetched heroes"]);

        send(&router, Method::DELETE, "/messages", None).await;
        let (_, body) = send(&router, Method::GET, "/messages", None).await;
        assert!(decode::<MessagesResponse>(body).messages.is_empty());
    }

    #[tokio::test]
    async fn test_mock_api_collection() {
        let router = build_router(test_state());

        let (status, body) = send(&router, Method::POST, "/api/heroes", Some(json!({"name": "Nova"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 21);

        let (status, _) = send(&router, Method::DELETE, "/api/heroes/21", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let mismatched = json!({
            "id": 13, "name": "Bombasto", "power": "Explosion", "level": 7,
            "origin": "Mars", "isActive": true, "description": ""
        });
        let (status, _) = send(&router, Method::PUT, "/api/heroes/12", Some(mismatched)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let router = build_router(test_state());
        let (status, body) = send(&router, Method::GET, "/villains", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Resource not found: No route for /villains");
    }
}
