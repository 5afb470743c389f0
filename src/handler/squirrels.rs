//! Squirrel request handling
//!
//! Entry point for HTTP request processing. Requests pass through an
//! ordered gate chain; only requests that pass every gate reach the
//! store, so a rejected request never leaves partial state behind:
//! 1. method support and route classification (pure, no I/O)
//! 2. payload field presence for mutating requests
//! 3. record existence, checked by the store operation itself

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::dispatch::{resolve, Action, Decision};
use crate::http::{self, FormBody};
use crate::logger;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: hyper::body::Body,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    // 1. Classify before touching the body or the store
    let response = match resolve(&method, &path) {
        Decision::UnsupportedMethod => {
            logger::log_warning(&format!("Unsupported method: {method}"));
            http::build_501_response(&method)
        }
        Decision::RouteNotFound => http::build_404_response(),
        Decision::Dispatch(action) => match action {
            Action::ListAll => list_squirrels(&state).await,
            Action::GetOne(token) => get_squirrel(&state, token).await,
            Action::Delete(token) => delete_squirrel(&state, token).await,
            // 2. Mutating actions read the body next; the payload gate
            //    runs inside the per-action handler before any store call
            Action::Create => match read_form(req).await {
                Some(form) => create_squirrel(&state, &form).await,
                None => http::build_400_response(),
            },
            Action::Update(token) => match read_form(req).await {
                Some(form) => update_squirrel(&state, token, &form).await,
                None => http::build_400_response(),
            },
        },
    };

    if state.config.logging.access_log {
        logger::log_access(&method, &path, response.status().as_u16());
    }

    Ok(response)
}

/// Collect and decode a form body; `None` when the body cannot be read
async fn read_form<B>(req: Request<B>) -> Option<FormBody>
where
    B: hyper::body::Body,
{
    let collected = req.collect().await.ok()?;
    Some(FormBody::parse(&collected.to_bytes()))
}

async fn list_squirrels(state: &AppState) -> Response<Full<Bytes>> {
    let store = state.squirrels.lock().await;
    match store.list_all() {
        Ok(squirrels) => http::build_json_response(&squirrels),
        Err(err) => {
            logger::log_error(&format!("Failed to list squirrels: {err}"));
            http::build_500_response()
        }
    }
}

async fn get_squirrel(state: &AppState, token: &str) -> Response<Full<Bytes>> {
    let store = state.squirrels.lock().await;
    match store.get(token) {
        Ok(Some(squirrel)) => http::build_json_response(&squirrel),
        Ok(None) => http::build_404_response(),
        Err(err) => {
            logger::log_error(&format!("Failed to get squirrel {token}: {err}"));
            http::build_500_response()
        }
    }
}

async fn create_squirrel(state: &AppState, form: &FormBody) -> Response<Full<Bytes>> {
    // Missing keys fail; empty values are present and pass
    let (Some(name), Some(size)) = (form.get("name"), form.get("size")) else {
        return http::build_400_response();
    };

    let store = state.squirrels.lock().await;
    match store.create(name, size) {
        Ok(_) => http::build_created_response(),
        Err(err) => {
            logger::log_error(&format!("Failed to create squirrel: {err}"));
            http::build_500_response()
        }
    }
}

async fn update_squirrel(state: &AppState, token: &str, form: &FormBody) -> Response<Full<Bytes>> {
    let (Some(name), Some(size)) = (form.get("name"), form.get("size")) else {
        return http::build_400_response();
    };

    let store = state.squirrels.lock().await;
    match store.update(token, name, size) {
        Ok(true) => http::build_no_content_response(),
        Ok(false) => http::build_404_response(),
        Err(err) => {
            logger::log_error(&format!("Failed to update squirrel {token}: {err}"));
            http::build_500_response()
        }
    }
}

async fn delete_squirrel(state: &AppState, token: &str) -> Response<Full<Bytes>> {
    let store = state.squirrels.lock().await;
    match store.delete(token) {
        Ok(true) => http::build_no_content_response(),
        Ok(false) => http::build_404_response(),
        Err(err) => {
            logger::log_error(&format!("Failed to delete squirrel {token}: {err}"));
            http::build_500_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::SquirrelStore;
    use hyper::Method;
    use serde_json::{json, Value};

    fn test_state() -> Arc<AppState> {
        let config = Config::load_from("config-not-present").expect("default config");
        let store = SquirrelStore::open_in_memory().expect("in-memory store");
        Arc::new(AppState::new(config, store))
    }

    fn request(method: Method, path: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Full::new(Bytes::from(body.to_string())))
            .expect("request")
    }

    async fn send(
        state: &Arc<AppState>,
        method: Method,
        path: &str,
        body: &str,
    ) -> (u16, Option<String>, String) {
        let response = handle_request(request(method, path, body), Arc::clone(state))
            .await
            .expect("handler is infallible");
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("Content-Type")
            .map(|v| v.to_str().expect("ascii header").to_string());
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = String::from_utf8(bytes.to_vec()).expect("utf8 body");
        (status, content_type, body)
    }

    async fn store_len(state: &Arc<AppState>) -> usize {
        state.squirrels.lock().await.list_all().expect("list").len()
    }

    #[tokio::test]
    async fn test_get_collection_empty() {
        let state = test_state();
        let (status, content_type, body) = send(&state, Method::GET, "/squirrels", "").await;
        assert_eq!(status, 200);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(serde_json::from_str::<Value>(&body).expect("json"), json!([]));
    }

    #[tokio::test]
    async fn test_get_collection_lists_in_id_order() {
        let state = test_state();
        {
            let store = state.squirrels.lock().await;
            store.create("Fred", "small").expect("create");
            store.create("Sam", "large").expect("create");
        }

        let (status, _, body) = send(&state, Method::GET, "/squirrels", "").await;
        assert_eq!(status, 200);
        assert_eq!(
            serde_json::from_str::<Value>(&body).expect("json"),
            json!([
                {"id": 1, "name": "Fred", "size": "small"},
                {"id": 2, "name": "Sam", "size": "large"}
            ])
        );
    }

    #[tokio::test]
    async fn test_get_item_found() {
        let state = test_state();
        state
            .squirrels
            .lock()
            .await
            .create("Fred", "small")
            .expect("create");

        let (status, content_type, body) = send(&state, Method::GET, "/squirrels/1", "").await;
        assert_eq!(status, 200);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(
            serde_json::from_str::<Value>(&body).expect("json"),
            json!({"id": 1, "name": "Fred", "size": "small"})
        );
    }

    #[tokio::test]
    async fn test_get_item_missing_is_404() {
        let state = test_state();
        let (status, content_type, body) = send(&state, Method::GET, "/squirrels/999", "").await;
        assert_eq!(status, 404);
        assert_eq!(content_type.as_deref(), Some("text/plain"));
        assert_eq!(body, "404 Not Found");
    }

    #[tokio::test]
    async fn test_post_creates_and_returns_201() {
        let state = test_state();
        let (status, _, _) = send(&state, Method::POST, "/squirrels", "name=Sam&size=large").await;
        assert_eq!(status, 201);

        let (_, _, body) = send(&state, Method::GET, "/squirrels", "").await;
        assert_eq!(
            serde_json::from_str::<Value>(&body).expect("json"),
            json!([{"id": 1, "name": "Sam", "size": "large"}])
        );
    }

    #[tokio::test]
    async fn test_post_missing_size_is_400_without_mutation() {
        let state = test_state();
        let (status, content_type, body) =
            send(&state, Method::POST, "/squirrels", "name=Fluffy").await;
        assert_eq!(status, 400);
        assert_eq!(content_type.as_deref(), Some("text/plain"));
        assert!(body.contains("Bad Request"));
        assert_eq!(store_len(&state).await, 0);
    }

    #[tokio::test]
    async fn test_post_missing_name_is_400_without_mutation() {
        let state = test_state();
        let (status, _, body) = send(&state, Method::POST, "/squirrels", "size=large").await;
        assert_eq!(status, 400);
        assert!(body.contains("Bad Request"));
        assert_eq!(store_len(&state).await, 0);
    }

    #[tokio::test]
    async fn test_post_empty_field_value_is_still_valid() {
        // Only missing keys fail the payload gate; empty values pass
        let state = test_state();
        let (status, _, _) = send(&state, Method::POST, "/squirrels", "name=&size=large").await;
        assert_eq!(status, 201);
        assert_eq!(store_len(&state).await, 1);
    }

    #[tokio::test]
    async fn test_put_updates_fields_and_keeps_id() {
        let state = test_state();
        state
            .squirrels
            .lock()
            .await
            .create("Fred", "small")
            .expect("create");

        let (status, _, _) =
            send(&state, Method::PUT, "/squirrels/1", "name=Nutty&size=medium").await;
        assert_eq!(status, 204);

        let (_, _, body) = send(&state, Method::GET, "/squirrels/1", "").await;
        assert_eq!(
            serde_json::from_str::<Value>(&body).expect("json"),
            json!({"id": 1, "name": "Nutty", "size": "medium"})
        );
    }

    #[tokio::test]
    async fn test_put_missing_field_is_400_and_record_unchanged() {
        let state = test_state();
        state
            .squirrels
            .lock()
            .await
            .create("Fred", "small")
            .expect("create");

        let (status, _, body) = send(&state, Method::PUT, "/squirrels/1", "name=Nutty").await;
        assert_eq!(status, 400);
        assert!(body.contains("Bad Request"));

        let squirrel = state
            .squirrels
            .lock()
            .await
            .get("1")
            .expect("get")
            .expect("record exists");
        assert_eq!(squirrel.name, "Fred");
        assert_eq!(squirrel.size, "small");
    }

    #[tokio::test]
    async fn test_put_missing_id_with_valid_body_is_404() {
        let state = test_state();
        let (status, _, body) =
            send(&state, Method::PUT, "/squirrels/999", "name=Nutty&size=medium").await;
        assert_eq!(status, 404);
        assert_eq!(body, "404 Not Found");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_404() {
        let state = test_state();
        state
            .squirrels
            .lock()
            .await
            .create("Fred", "small")
            .expect("create");

        let (status, _, _) = send(&state, Method::DELETE, "/squirrels/1", "").await;
        assert_eq!(status, 204);

        let (status, _, body) = send(&state, Method::GET, "/squirrels/1", "").await;
        assert_eq!(status, 404);
        assert_eq!(body, "404 Not Found");
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_404() {
        let state = test_state();
        let (status, _, body) = send(&state, Method::DELETE, "/squirrels/999", "").await;
        assert_eq!(status, 404);
        assert_eq!(body, "404 Not Found");
    }

    #[tokio::test]
    async fn test_patch_is_501_on_every_shape() {
        let state = test_state();
        for path in ["/squirrels", "/squirrels/1", "/squirrels/1/extra", "/unknown"] {
            let (status, _, body) = send(&state, Method::PATCH, path, "").await;
            assert_eq!(status, 501, "PATCH {path}");
            assert!(body.contains("Unsupported method"), "PATCH {path}");
        }
    }

    #[tokio::test]
    async fn test_supported_verb_on_wrong_shape_is_404() {
        let state = test_state();
        let cases = [
            (Method::POST, "/squirrels/1", "name=Sam&size=large"),
            (Method::PUT, "/squirrels", "name=Sam&size=large"),
            (Method::DELETE, "/squirrels", ""),
        ];
        for (method, path, body) in cases {
            let (status, _, response_body) = send(&state, method.clone(), path, body).await;
            assert_eq!(status, 404, "{method} {path}");
            assert_eq!(response_body, "404 Not Found", "{method} {path}");
        }
        assert_eq!(store_len(&state).await, 0);
    }

    #[tokio::test]
    async fn test_nested_and_unknown_paths_are_404() {
        let state = test_state();
        let cases = [
            (Method::GET, "/squirrels/1/extra"),
            (Method::POST, "/squirrels/1/extra"),
            (Method::PUT, "/squirrels/1/extra"),
            (Method::DELETE, "/squirrels/1/extra"),
            (Method::GET, "/unknown"),
        ];
        for (method, path) in cases {
            let (status, _, body) = send(&state, method.clone(), path, "name=Sam&size=large").await;
            assert_eq!(status, 404, "{method} {path}");
            assert_eq!(body, "404 Not Found", "{method} {path}");
        }
    }

    #[tokio::test]
    async fn test_ids_stay_monotonic_across_deletes_over_http() {
        let state = test_state();
        send(&state, Method::POST, "/squirrels", "name=Fred&size=small").await;
        send(&state, Method::POST, "/squirrels", "name=Sam&size=large").await;

        let (status, _, _) = send(&state, Method::DELETE, "/squirrels/2", "").await;
        assert_eq!(status, 204);

        send(&state, Method::POST, "/squirrels", "name=Nutty&size=medium").await;
        let (_, _, body) = send(&state, Method::GET, "/squirrels", "").await;
        assert_eq!(
            serde_json::from_str::<Value>(&body).expect("json"),
            json!([
                {"id": 1, "name": "Fred", "size": "small"},
                {"id": 3, "name": "Nutty", "size": "medium"}
            ])
        );
    }
}
