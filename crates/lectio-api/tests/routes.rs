//! Router tests driven through `tower::ServiceExt::oneshot` against an
//! in-memory progress store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Method, Request, StatusCode, header},
};
use lectio_core::{PlanType, Planner, progress::MemoryStore, table::PlanStore};
use serde_json::{Value, json};
use tower::ServiceExt as _;

fn router() -> Router {
  let mut plans = PlanStore::new();
  plans
    .load(
      PlanType::Nt90,
      &json!({ "schedule": [
        { "day": 1, "reading": "Matthew 1-4", "theme": "Birth & Early Ministry", "chapters": 4 },
        { "day": 2, "reading": "Matthew 5-7", "theme": "Sermon on the Mount" }
      ]}),
    )
    .unwrap();

  let planner = Planner::with_plans(MemoryStore::new(), plans);
  lectio_api::api_router(Arc::new(planner))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let request = match body {
    Some(b) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(b.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };

  let response = app.clone().oneshot(request).await.unwrap();
  let status = response.status();
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
  };
  (status, json)
}

#[tokio::test]
async fn reading_for_date_after_restart() {
  let app = router();

  let (status, _) = send(
    &app,
    Method::POST,
    "/plans/nt90/restart",
    Some(json!({ "date": "2024-01-01" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (status, body) = send(&app, Method::GET, "/reading?date=2024-01-02&plan=nt90", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["day"], 2);
  assert_eq!(body["title"], "Day 2: Sermon on the Mount");
  assert_eq!(body["passages"], json!(["Matthew 5-7"]));
  assert_eq!(body["chapters"], 3);
  assert_eq!(body["is_fallback"], false);
}

#[tokio::test]
async fn unloaded_plan_returns_fallback() {
  let app = router();
  let (status, body) = send(&app, Method::GET, "/reading?date=2024-01-01&plan=ethiopian", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["title"], "OT365 Day 1");
  assert_eq!(body["passages"], json!(["Genesis 1-3"]));
  assert_eq!(body["is_fallback"], true);
}

#[tokio::test]
async fn unknown_plan_is_bad_request() {
  let app = router();

  let (status, body) = send(&app, Method::GET, "/reading?plan=psalms", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("psalms"));

  let (status, _) = send(&app, Method::GET, "/plans/psalms", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn plan_metadata_and_suggested_time() {
  let app = router();

  let (status, body) = send(&app, Method::GET, "/plans", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 3);

  let (_, body) = send(&app, Method::GET, "/plans/ot365", None).await;
  assert_eq!(body["display_name"], "Old Testament in a Year");
  assert_eq!(body["cycle_length_days"], 365);

  let (_, body) = send(&app, Method::GET, "/plans/nt90/suggested-time", None).await;
  assert_eq!(body["suggested_time"], "15-25 min");
}

#[tokio::test]
async fn completions_feed_stats() {
  let app = router();

  for day in 1..=45 {
    let (status, body) = send(
      &app,
      Method::POST,
      "/completions",
      Some(json!({ "plan": "nt90", "day": day })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["day"], day);
  }

  let (status, body) = send(&app, Method::GET, "/plans/nt90/stats", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["completed"], 45);
  assert_eq!(body["percent"], 50);
  assert_eq!(body["remaining"], 45);
}

#[tokio::test]
async fn zero_day_completion_is_rejected() {
  let app = router();
  let (status, _) = send(&app, Method::POST, "/completions", Some(json!({ "day": 0 }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn switching_current_plan() {
  let app = router();

  let (_, body) = send(&app, Method::GET, "/current-plan", None).await;
  assert_eq!(body["plan"], "nt90");

  let (status, _) = send(
    &app,
    Method::PUT,
    "/current-plan",
    Some(json!({ "plan": "Ethiopian" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (_, body) = send(&app, Method::GET, "/reading?date=2024-09-11", None).await;
  assert_eq!(body["plan"], "ethiopian");
  assert_eq!(body["is_fallback"], true);
}

#[tokio::test]
async fn restart_and_complete_accept_an_empty_body() {
  let app = router();
  let today = lectio_core::day_number::local_today().to_string();

  let (status, body) = send(&app, Method::POST, "/plans/nt90/restart", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["plan"], "nt90");
  assert_eq!(body["start_date"], today);

  let (status, body) = send(&app, Method::POST, "/completions", None).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["plan"], "nt90");
  assert_eq!(body["day"], 1);
}
