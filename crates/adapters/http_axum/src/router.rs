//! Axum router assembly.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use kds_app::ports::{BoardPublisher, OrderStore};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the intake route at `/order`, API routes under `/api` and the
/// board page at `/`. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<S, P>(state: AppState<S, P>) -> Router
where
    S: OrderStore + Send + Sync + 'static,
    P: BoardPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/order",
            post(crate::intake::submit::<S, P>).fallback(crate::intake::method_not_allowed),
        )
        .nest("/api", crate::api::routes())
        .merge(crate::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use kds_app::board_bus::InProcessBoardBus;
    use kds_app::ports::RemoveOutcome;
    use kds_app::removal::removal_channel;
    use kds_app::services::order_service::OrderService;
    use kds_domain::board::BoardSnapshot;
    use kds_domain::error::KdsError;
    use kds_domain::id::OrderId;
    use kds_domain::order::Order;
    use tower::ServiceExt;

    /// Store that only remembers appended orders.
    #[derive(Default)]
    struct StubStore {
        orders: Mutex<Vec<Order>>,
    }

    impl StubStore {
        fn board(orders: &[Order]) -> BoardSnapshot {
            BoardSnapshot {
                revision: orders.len() as u64,
                orders: orders.to_vec(),
            }
        }
    }

    impl OrderStore for StubStore {
        fn append(
            &self,
            order: Order,
        ) -> impl Future<Output = Result<BoardSnapshot, KdsError>> + Send {
            let mut orders = self.orders.lock().unwrap();
            orders.push(order);
            let snapshot = Self::board(&orders);
            async { Ok(snapshot) }
        }

        fn replace_all(
            &self,
            order: Order,
        ) -> impl Future<Output = Result<BoardSnapshot, KdsError>> + Send {
            self.append(order)
        }

        fn remove(
            &self,
            _id: OrderId,
        ) -> impl Future<Output = Result<RemoveOutcome, KdsError>> + Send {
            let snapshot = Self::board(&self.orders.lock().unwrap());
            async {
                Ok(RemoveOutcome {
                    removed: None,
                    snapshot,
                })
            }
        }

        fn get_by_id(
            &self,
            _id: OrderId,
        ) -> impl Future<Output = Result<Option<Order>, KdsError>> + Send {
            async { Ok(None) }
        }

        fn snapshot(&self) -> impl Future<Output = Result<BoardSnapshot, KdsError>> + Send {
            let snapshot = Self::board(&self.orders.lock().unwrap());
            async { Ok(snapshot) }
        }
    }

    type TestState = AppState<StubStore, Arc<InProcessBoardBus>>;

    fn test_state() -> TestState {
        let bus = Arc::new(InProcessBoardBus::new(16));
        let service = Arc::new(OrderService::new(StubStore::default(), Arc::clone(&bus)));
        let (removal, worker) = removal_channel(Arc::clone(&service), 8);
        tokio::spawn(worker.run());
        AppState::new(service, removal, bus)
    }

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn next_frame(body: &mut Body) -> String {
        let frame = body.frame().await.unwrap().unwrap();
        String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());
        let response = app.oneshot(request("GET", "/health", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_accept_valid_order() {
        let state = test_state();
        let app = build(state.clone());

        let response = app
            .oneshot(request(
                "POST",
                "/order",
                r#"{"location":"Table 5","items":[{"type":"normal","name":"Fries"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "OK");
        assert_eq!(state.order_service.snapshot().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_answer_bad_request_with_message_when_payload_is_malformed() {
        let state = test_state();
        let app = build(state.clone());

        let response = app
            .oneshot(request("POST", "/order", r#"{"items":[]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"], "missing string field `location`");
        assert!(state.order_service.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_answer_bad_request_when_body_is_not_json() {
        let app = build(test_state());
        let response = app
            .oneshot(request("POST", "/order", "location=Table 5"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_answer_405_with_empty_body_for_other_methods() {
        for method in ["GET", "PUT", "DELETE"] {
            let app = build(test_state());
            let response = app.oneshot(request(method, "/order", "")).await.unwrap();
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert!(body_text(response).await.is_empty());
        }
    }

    #[tokio::test]
    async fn should_answer_no_content_when_deleting_absent_order() {
        let app = build(test_state());
        let uri = format!("/api/orders/{}", OrderId::new());
        let response = app.oneshot(request("DELETE", &uri, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn should_reject_malformed_order_id() {
        let app = build(test_state());
        let response = app
            .oneshot(request("GET", "/api/orders/not-a-uuid", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_order() {
        let app = build(test_state());
        let uri = format!("/api/orders/{}", OrderId::new());
        let response = app.oneshot(request("GET", &uri, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_redirect_to_board_after_dismiss() {
        let app = build(test_state());
        let uri = format!("/orders/{}/dismiss", OrderId::new());
        let response = app.oneshot(request("POST", &uri, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/");
    }

    #[tokio::test]
    async fn should_render_board_page() {
        let app = build(test_state());
        let response = app.oneshot(request("GET", "/", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Kitchen Display"));
    }

    #[tokio::test]
    async fn should_open_stream_with_current_board() {
        let state = test_state();
        state
            .order_service
            .ingest(br#"{"location":"Table 5","items":[]}"#)
            .await
            .unwrap();
        let app = build(state);

        let response = app
            .oneshot(request("GET", "/api/orders/stream", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/event-stream");
        let mut body = response.into_body();
        let frame = body.frame().await.unwrap().unwrap();
        let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
        assert!(text.contains("event: board"));
        assert!(text.contains("Table 5"));
    }

    #[tokio::test]
    async fn should_skip_board_older_than_last_streamed() {
        let state = test_state();
        state
            .order_service
            .ingest(br#"{"location":"Table 5","items":[]}"#)
            .await
            .unwrap();
        let app = build(state.clone());

        let response = app
            .oneshot(request("GET", "/api/orders/stream", ""))
            .await
            .unwrap();
        let mut body = response.into_body();
        assert!(next_frame(&mut body).await.contains("id: 1"));

        state
            .board_bus
            .publish(BoardSnapshot {
                revision: 0,
                orders: vec![Order::new("Stale", vec![])],
            })
            .await
            .unwrap();
        state
            .order_service
            .ingest(br#"{"location":"Table 6","items":[]}"#)
            .await
            .unwrap();

        let text = next_frame(&mut body).await;
        assert!(text.contains("id: 2"));
        assert!(text.contains("Table 6"));
        assert!(!text.contains("Stale"));
    }
}
