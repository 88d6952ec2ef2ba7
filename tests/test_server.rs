//! Integration test: Prediction form and JSON API

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use polars::prelude::DataFrame;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use student_performance::error::{Result, StudentError};
use student_performance::inference::ScorePredictor;
use student_performance::server::{
    create_router, AppState, ServerConfig, FILL_ALL_FIELDS, PREDICTION_FAILED,
};
use tower::ServiceExt;

/// Counts calls and remembers the scores it was given
#[derive(Default)]
struct SpyPredictor {
    calls: AtomicUsize,
    last_scores: Mutex<Option<(f64, f64)>>,
    fail: bool,
}

impl SpyPredictor {
    fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ScorePredictor for SpyPredictor {
    fn predict(&self, features: &DataFrame) -> Result<Vec<f64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StudentError::ModelNotFitted);
        }
        let reading = features.column("reading_score")?.f64()?.get(0);
        let writing = features.column("writing_score")?.f64()?.get(0);
        if let (Some(r), Some(w)) = (reading, writing) {
            *self.last_scores.lock().unwrap() = Some((r, w));
        }
        Ok(vec![68.5])
    }
}

fn test_app(predictor: Arc<SpyPredictor>) -> axum::Router {
    create_router(Arc::new(AppState::with_predictor(predictor)))
}

const FILLED_FORM: &str = "gender=female&ethnicity=group+B\
    &parental_level_of_education=bachelor%27s+degree&lunch=standard\
    &test_preparation_course=completed&reading_score=72&writing_score=74";

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predictdata")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(Arc::new(SpyPredictor::default()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_root_serves_html() {
    let app = test_app(Arc::new(SpyPredictor::default()));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("/predictdata"));
}

#[tokio::test]
async fn test_form_page_lists_placeholders() {
    let app = test_app(Arc::new(SpyPredictor::default()));
    let response = app
        .oneshot(Request::builder().uri("/predictdata").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    for placeholder in [
        "Select your Gender",
        "Select Ethnicity",
        "Select Parent Education",
        "Select Lunch Type",
        "Select Test_course",
        "Reading Score out of 100",
        "Writing Score out of 100",
    ] {
        assert!(html.contains(placeholder), "missing {}", placeholder);
    }
}

#[tokio::test]
async fn test_filled_form_renders_prediction() {
    let spy = Arc::new(SpyPredictor::default());
    let app = test_app(spy.clone());

    let response = app.oneshot(form_request(FILLED_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("The predicted Math Score is: 68.50"));
    assert_eq!(spy.calls(), 1);
    assert_eq!(*spy.last_scores.lock().unwrap(), Some((72.0, 74.0)));
}

#[tokio::test]
async fn test_placeholder_never_reaches_predictor() {
    let spy = Arc::new(SpyPredictor::default());
    let app = test_app(spy.clone());

    let body = FILLED_FORM.replace("gender=female", "gender=Select+your+Gender");
    let response = app.oneshot(form_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(FILL_ALL_FIELDS));
    assert!(!html.contains("The predicted Math Score is"));
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn test_missing_score_never_reaches_predictor() {
    let spy = Arc::new(SpyPredictor::default());
    let app = test_app(spy.clone());

    let body = FILLED_FORM.replace("&writing_score=74", "");
    let response = app.oneshot(form_request(&body)).await.unwrap();

    assert!(body_text(response).await.contains(FILL_ALL_FIELDS));
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn test_prediction_failure_renders_message() {
    let spy = Arc::new(SpyPredictor::failing());
    let app = test_app(spy.clone());

    let response = app.oneshot(form_request(FILLED_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(PREDICTION_FAILED));
    assert_eq!(spy.calls(), 1);
}

#[tokio::test]
async fn test_missing_artifacts_render_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig::default().with_artifacts_dir(dir.path());
    let app = create_router(Arc::new(AppState::new(&config)));

    let response = app.oneshot(form_request(FILLED_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(PREDICTION_FAILED));
}

#[tokio::test]
async fn test_api_predict() {
    let spy = Arc::new(SpyPredictor::default());
    let app = test_app(spy.clone());

    let payload = serde_json::json!({
        "gender": "female",
        "race_ethnicity": "group B",
        "parental_level_of_education": "bachelor's degree",
        "lunch": "standard",
        "test_preparation_course": "completed",
        "reading_score": 72,
        "writing_score": 74
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["prediction"], 68.5);
}

#[tokio::test]
async fn test_api_predict_out_of_range() {
    let spy = Arc::new(SpyPredictor::default());
    let app = test_app(spy.clone());

    let payload = serde_json::json!({
        "gender": "male",
        "race_ethnicity": "group A",
        "parental_level_of_education": "high school",
        "lunch": "standard",
        "test_preparation_course": "none",
        "reading_score": 140,
        "writing_score": 50
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["error"], true);
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn test_api_predict_failure_envelope() {
    let app = test_app(Arc::new(SpyPredictor::failing()));

    let payload = serde_json::json!({
        "gender": "male",
        "race_ethnicity": "group A",
        "parental_level_of_education": "high school",
        "lunch": "standard",
        "test_preparation_course": "none",
        "reading_score": 40,
        "writing_score": 50
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["error"], true);
    assert_eq!(json["message"], PREDICTION_FAILED);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = test_app(Arc::new(SpyPredictor::default()));
    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_predict_rejects_fractional_score() {
    let spy = Arc::new(SpyPredictor::default());
    let app = test_app(spy.clone());

    let payload = serde_json::json!({
        "gender": "female",
        "race_ethnicity": "group C",
        "parental_level_of_education": "some college",
        "lunch": "standard",
        "test_preparation_course": "none",
        "reading_score": 72.5,
        "writing_score": 70
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(json["message"].as_str().unwrap().contains("reading_score"));
    assert_eq!(spy.calls(), 0);
}
