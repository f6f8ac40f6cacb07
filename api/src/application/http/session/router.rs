use super::handlers::{
    analyze_image::{__path_analyze_image, analyze_image},
    change_image::{__path_change_image, change_image},
    get_session::{__path_get_session, get_session},
    reset_session::{__path_reset_session, reset_session},
    select_image::{__path_select_image, select_image},
    submit_manual::{__path_submit_manual, submit_manual},
    toggle_details::{__path_toggle_details, toggle_details},
    update_ratio::{__path_update_ratio, update_ratio},
};
use crate::application::http::server::app_state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    get_session,
    select_image,
    change_image,
    analyze_image,
    submit_manual,
    update_ratio,
    toggle_details,
    reset_session
))]
pub struct SessionApiDoc;

// Room for a 10MB image plus multipart framing.
const BODY_LIMIT: usize = 12 * 1024 * 1024;

pub fn session_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/session", root_path), get(get_session))
        .route(
            &format!("{}/session/image", root_path),
            post(select_image).delete(change_image),
        )
        .route(&format!("{}/session/analyze", root_path), post(analyze_image))
        .route(&format!("{}/session/manual", root_path), post(submit_manual))
        .route(&format!("{}/session/ratio", root_path), put(update_ratio))
        .route(&format!("{}/session/details", root_path), post(toggle_details))
        .route(&format!("{}/session/reset", root_path), post(reset_session))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use axum::{
        Json,
        extract::State,
        http::{HeaderMap, StatusCode},
    };
    use axum_test::{
        TestServer,
        multipart::{MultipartForm, Part},
    };
    use carbvision_core::domain::session::SessionView;
    use clap::Parser;
    use serde_json::{Value, json};

    use crate::application::http::{
        server::{
            app_state::AppState,
            http_server::{router, state},
        },
        session::handlers::analyze_image::analyze_image,
    };
    use crate::args::Args;

    const TWO_ITEMS: &str = r#"[
        {"foodName":"Toast","size":"1 slice","carbohydrates":10,"protein":3,"fat":1,"calories":70},
        {"foodName":"Banana","size":"1 medium","carbohydrates":25,"protein":1.3,"fat":0.4,"calories":105}
    ]"#;

    /// Serves `generateContent` replies carrying `reply` as the model text.
    /// Requests without `expected_key` in `x-goog-api-key` get a 401.
    async fn spawn_provider(expected_key: &'static str, reply: &'static str, delay: Duration) -> String {
        let app = axum::Router::new().fallback(move |headers: HeaderMap| async move {
            tokio::time::sleep(delay).await;

            let key = headers.get("x-goog-api-key").and_then(|v| v.to_str().ok());
            if key != Some(expected_key) {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": { "code": 401, "message": "API key not valid" } })),
                );
            }

            (
                StatusCode::OK,
                Json(json!({
                    "candidates": [{ "content": { "parts": [{ "text": reply }] } }]
                })),
            )
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/v1beta", addr)
    }

    fn app_state_with(extra: &[&str]) -> AppState {
        let mut argv = vec!["carbvision-api", "--gemini-api-key", "test-key"];
        argv.extend_from_slice(extra);
        let args = Arc::new(Args::try_parse_from(argv).unwrap());
        state(args).unwrap()
    }

    fn server_for(app_state: AppState) -> TestServer {
        TestServer::new(router(app_state).unwrap()).unwrap()
    }

    fn server() -> TestServer {
        server_for(app_state_with(&[]))
    }

    async fn server_with_provider(expected_key: &'static str, reply: &'static str) -> TestServer {
        let base_url = spawn_provider(expected_key, reply, Duration::ZERO).await;
        server_for(app_state_with(&["--gemini-base-url", &base_url]))
    }

    fn jpeg_form() -> MultipartForm {
        MultipartForm::new().add_part(
            "image",
            Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
                .file_name("lunch.jpg")
                .mime_type("image/jpeg"),
        )
    }

    #[tokio::test]
    async fn test_initial_session() {
        let server = server();

        let response = server.get("/session").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["view"], "input");
        assert_eq!(body["ratio"], 25.0);
        assert_eq!(body["dose_units"], 0.0);
        assert_eq!(body["results"], Value::Null);
    }

    #[tokio::test]
    async fn test_manual_flow() {
        let server = server();

        let response = server
            .post("/session/manual")
            .json(&json!({ "total_grams": 250, "carbs_per_100g": "15" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["view"], "results");
        assert_eq!(body["dose_units"], 1.5);
        assert_eq!(body["results"]["can_toggle_details"], false);
        assert_eq!(body["results"]["body"]["kind"], "entries");
        assert_eq!(body["results"]["body"]["cards"][0]["name"], "Manual Entry");
        assert_eq!(body["results"]["body"]["cards"][0]["portion"], "250g");
        assert_eq!(body["results"]["body"]["totals"]["carbohydrates"], "37.5g");
        assert_eq!(body["results"]["body"]["dose"]["units"], "1.5");

        let response = server
            .put("/session/ratio")
            .json(&json!({ "ratio": 15 }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["dose_units"], 2.5);
        assert_eq!(body["results"]["body"]["dose"]["ratio"], "1:15");
        assert_eq!(body["results"]["body"]["dose"]["units"], "2.5");
    }

    #[tokio::test]
    async fn test_invalid_manual_entry() {
        let invalid_bodies = [
            json!({ "total_grams": "abc", "carbs_per_100g": 15 }),
            json!({ "total_grams": null, "carbs_per_100g": 15 }),
            json!({ "total_grams": true, "carbs_per_100g": 15 }),
            json!({ "carbs_per_100g": 15 }),
            json!({ "total_grams": -5, "carbs_per_100g": 15 }),
            json!({ "total_grams": 1e200, "carbs_per_100g": 1e200 }),
        ];

        for payload in invalid_bodies {
            let server = server();

            let response = server.post("/session/manual").json(&payload).await;
            response.assert_status(StatusCode::BAD_REQUEST);

            let body: Value = response.json();
            assert_eq!(body["code"], "E_VALIDATION", "payload: {payload}");
            assert_eq!(
                body["message"],
                "Please enter valid positive numbers for calculation."
            );

            let body: Value = server.get("/session").await.json();
            assert_eq!(body["view"], "input");
            assert_eq!(
                body["error"],
                "Please enter valid positive numbers for calculation.",
                "payload: {payload}"
            );
        }
    }

    #[tokio::test]
    async fn test_manual_entry_rejects_non_json_body() {
        let server = server();

        let response = server.post("/session/manual").text("250").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "E_BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_ratio_out_of_range() {
        let server = server();

        let response = server
            .put("/session/ratio")
            .json(&json!({ "ratio": 0.5 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = server.get("/session").await.json();
        assert_eq!(body["ratio"], 25.0);
    }

    #[tokio::test]
    async fn test_analyze_without_image_conflicts() {
        let server = server();

        let response = server.post("/session/analyze").await;
        response.assert_status(StatusCode::CONFLICT);

        let body: Value = response.json();
        assert_eq!(body["code"], "E_CONFLICT");
    }

    #[tokio::test]
    async fn test_select_and_change_image() {
        let server = server();

        let response = server.post("/session/image").multipart(jpeg_form()).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["view"], "confirm_image");
        assert_eq!(body["image"]["file_name"], "lunch.jpg");
        assert_eq!(body["image"]["mime_type"], "image/jpeg");

        let response = server.delete("/session/image").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["view"], "input");
        assert_eq!(body["image"], Value::Null);
    }

    #[tokio::test]
    async fn test_select_image_from_data_uri() {
        let server = server();

        let form = MultipartForm::new().add_text("data_uri", "data:image/png;base64,aGVsbG8=");
        let response = server.post("/session/image").multipart(form).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["image"]["mime_type"], "image/png");
    }

    #[tokio::test]
    async fn test_select_image_requires_field() {
        let server = server();

        let form = MultipartForm::new().add_text("other", "value");
        let response = server.post("/session/image").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analysis_with_two_items_then_details_and_ratio() {
        let server = server_with_provider("test-key", TWO_ITEMS).await;

        server
            .post("/session/image")
            .multipart(jpeg_form())
            .await
            .assert_status_ok();

        let response = server.post("/session/analyze").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["view"], "results");
        assert_eq!(body["error"], Value::Null);
        assert_eq!(body["results"]["can_toggle_details"], true);
        assert_eq!(body["results"]["details_visible"], false);

        let results = &body["results"]["body"];
        assert_eq!(results["kind"], "entries");
        assert_eq!(results["cards"][0]["name"], "Toast");
        assert_eq!(results["cards"][1]["name"], "Banana");
        assert_eq!(results["cards"][1]["portion"], "1 medium");
        assert_eq!(results["cards"][0]["details"], Value::Null);
        assert_eq!(results["totals"]["carbohydrates"], "35.0g");
        assert_eq!(results["dose"]["units"], "1.4");

        let body: Value = server.post("/session/details").await.json();
        assert_eq!(body["results"]["details_visible"], true);

        let cards = &body["results"]["body"]["cards"];
        assert_eq!(cards[0]["details"]["protein"], "3.0g");
        assert_eq!(cards[0]["details"]["calories"], "70");
        assert_eq!(cards[1]["details"]["fat"], "0.4g");
        assert_eq!(cards[1]["details"]["calories"], "105");
        assert_eq!(body["results"]["body"]["totals"]["details"]["protein"], "4.3g");

        let body: Value = server
            .put("/session/ratio")
            .json(&json!({ "ratio": 10 }))
            .await
            .json();
        assert_eq!(body["dose_units"], 3.5);
        assert_eq!(body["results"]["body"]["dose"]["units"], "3.5");
        assert_eq!(body["results"]["details_visible"], true);
    }

    #[tokio::test]
    async fn test_analysis_with_no_food() {
        let server = server_with_provider("test-key", "[]").await;

        server
            .post("/session/image")
            .multipart(jpeg_form())
            .await
            .assert_status_ok();

        let body: Value = server.post("/session/analyze").await.json();
        assert_eq!(body["view"], "results");
        assert_eq!(body["error"], Value::Null);
        assert_eq!(body["results"]["body"]["kind"], "no_food_identified");
        assert_eq!(body["results"]["can_toggle_details"], false);
    }

    #[tokio::test]
    async fn test_rejected_credential_is_shown_in_results() {
        let server = server_with_provider("another-key", TWO_ITEMS).await;

        server
            .post("/session/image")
            .multipart(jpeg_form())
            .await
            .assert_status_ok();

        let response = server.post("/session/analyze").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["view"], "results");
        assert_eq!(body["results"]["body"]["kind"], "failed");
        let message = body["results"]["body"]["message"].as_str().unwrap();
        assert!(
            message.starts_with("Failed to analyze image: LLM API returned error: 401"),
            "{message}"
        );
        assert_eq!(body["image"]["file_name"], "lunch.jpg");

        let body: Value = server.post("/session/reset").await.json();
        assert_eq!(body["view"], "input");
    }

    #[tokio::test]
    async fn test_second_analyze_while_running_conflicts() {
        let base_url = spawn_provider("test-key", TWO_ITEMS, Duration::from_millis(300)).await;
        let server = server_for(app_state_with(&["--gemini-base-url", &base_url]));

        server
            .post("/session/image")
            .multipart(jpeg_form())
            .await
            .assert_status_ok();

        let first = async { server.post("/session/analyze").await };
        let second = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            server.post("/session/analyze").await
        };
        let (first, second) = tokio::join!(first, second);

        second.assert_status(StatusCode::CONFLICT);
        let body: Value = second.json();
        assert_eq!(body["code"], "E_CONFLICT");

        first.assert_status_ok();
        let body: Value = first.json();
        assert_eq!(body["results"]["body"]["kind"], "entries");
    }

    #[tokio::test]
    async fn test_dropped_analyze_request_still_settles() {
        let base_url = spawn_provider("test-key", TWO_ITEMS, Duration::from_millis(200)).await;
        let app_state = app_state_with(&["--gemini-base-url", &base_url]);
        let server = server_for(app_state.clone());

        server
            .post("/session/image")
            .multipart(jpeg_form())
            .await
            .assert_status_ok();

        let dropped = tokio::time::timeout(
            Duration::from_millis(50),
            analyze_image(State(app_state.clone())),
        )
        .await;
        assert!(dropped.is_err());
        assert_eq!(app_state.session.lock().await.view(), SessionView::Loading);

        let mut view = SessionView::Loading;
        for _ in 0..40 {
            tokio::time::sleep(Duration::from_millis(50)).await;
            view = app_state.session.lock().await.view();
            if view != SessionView::Loading {
                break;
            }
        }
        assert_eq!(view, SessionView::Results);

        let body: Value = server.get("/session").await.json();
        assert_eq!(body["results"]["body"]["kind"], "entries");
        assert_eq!(body["results"]["body"]["totals"]["carbohydrates"], "35.0g");
    }

    #[tokio::test]
    async fn test_toggle_details() {
        let server = server();

        server
            .post("/session/details")
            .await
            .assert_status(StatusCode::CONFLICT);

        server
            .post("/session/manual")
            .json(&json!({ "total_grams": 100, "carbs_per_100g": 20 }))
            .await
            .assert_status_ok();

        let response = server.post("/session/details").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["results"]["details_visible"], false);
    }

    #[tokio::test]
    async fn test_reset() {
        let server = server();

        server
            .post("/session/manual")
            .json(&json!({ "total_grams": 100, "carbs_per_100g": 20 }))
            .await
            .assert_status_ok();
        server
            .put("/session/ratio")
            .json(&json!({ "ratio": 10 }))
            .await
            .assert_status_ok();

        let response = server.post("/session/reset").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["view"], "input");
        assert_eq!(body["ratio"], 25.0);
        assert_eq!(body["results"], Value::Null);
        assert_eq!(body["error"], Value::Null);

        let body: Value = server.post("/session/reset").await.json();
        assert_eq!(body["view"], "input");
    }

    #[tokio::test]
    async fn test_health() {
        let server = server();

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}
