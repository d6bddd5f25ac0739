use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tower::ServiceExt;

use eventsched_core::{FileStore, FixedClock, MemoryStore, Scheduler};
use eventsched_server::{AppState, app};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn test_app() -> Router {
    let scheduler = Scheduler::new(Arc::new(MemoryStore::new()))
        .with_clock(Arc::new(FixedClock::new(today())));
    app(AppState::new(scheduler))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, title: &str, date: &str, time: &str, notes: Option<&str>) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/events",
        Some(json!({ "title": title, "date": date, "time": time, "notes": notes })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

fn titles(events: &Value) -> Vec<&str> {
    events
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_root_banner() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Event Scheduler running");
}

#[tokio::test]
async fn test_create_returns_id_category_and_archived() {
    let app = test_app();

    let work = create(&app, "Client presentation", "2025-06-20", "10:00", None).await;
    assert!(work["_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(work["category"], "Work");
    assert_eq!(work["archived"], false);

    let both = create(&app, "Birthday party", "2025-06-20", "18:00", Some("deadline for gifts")).await;
    assert_eq!(both["category"], "Work");

    let personal = create(&app, "Family dinner", "2025-06-10", "19:00", None).await;
    assert_eq!(personal["category"], "Personal");
    assert_eq!(personal["archived"], true);

    let other = create(&app, "Dentist", "2025-06-15", "08:00", Some("")).await;
    assert_eq!(other["category"], "Other");
    assert_eq!(other["archived"], false);
}

#[tokio::test]
async fn test_create_missing_fields_is_bad_request() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/events",
        Some(json!({ "date": "2025-06-20", "time": "10:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("title"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/events",
        Some(json!({ "title": "Standup", "date": "tomorrow", "time": "10:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("date"));

    let (_, all) = send(&app, Method::GET, "/events", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/events")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_is_sorted_and_filterable() {
    let app = test_app();
    create(&app, "Team meeting", "2025-06-21", "09:00", None).await;
    create(&app, "Vacation", "2025-06-20", "08:00", Some("beach trip")).await;
    create(&app, "Project review", "2025-06-20", "14:00", None).await;

    let (status, all) = send(&app, Method::GET, "/events", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&all), vec!["Vacation", "Project review", "Team meeting"]);

    let (_, work) = send(&app, Method::GET, "/events?category=Work", None).await;
    assert_eq!(titles(&work), vec!["Project review", "Team meeting"]);

    let (_, found) = send(&app, Method::GET, "/events?search=BEACH", None).await;
    assert_eq!(titles(&found), vec!["Vacation"]);

    let (_, everything) = send(&app, Method::GET, "/events?category=All", None).await;
    assert_eq!(everything.as_array().unwrap().len(), 3);

    let (status, _) = send(&app, Method::GET, "/events?category=Chores", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upcoming_archived_and_stats() {
    let app = test_app();
    create(&app, "Old report", "2025-06-01", "09:00", None).await;
    for day in 15..22 {
        create(&app, &format!("Day {day}"), &format!("2025-06-{day}"), "12:00", None).await;
    }

    let (_, upcoming) = send(&app, Method::GET, "/events/upcoming", None).await;
    assert_eq!(
        titles(&upcoming),
        vec!["Day 15", "Day 16", "Day 17", "Day 18", "Day 19"]
    );

    // Archive the first upcoming event; it drops out of the view
    let first_id = upcoming[0]["_id"].as_str().unwrap().to_string();
    let (status, archived) = send(&app, Method::PUT, &format!("/events/{first_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(archived["archived"], true);

    let (_, upcoming) = send(&app, Method::GET, "/events/upcoming", None).await;
    assert_eq!(titles(&upcoming)[0], "Day 16");

    let (_, archived) = send(&app, Method::GET, "/events/archived", None).await;
    assert_eq!(titles(&archived), vec!["Day 15", "Old report"]);

    let (_, stats) = send(&app, Method::GET, "/events/stats", None).await;
    assert_eq!(stats["totalEvents"], 8);
    assert_eq!(stats["archivedCount"], 2);
    assert_eq!(stats["categoryDistribution"]["Work"], 1);
    assert_eq!(stats["categoryDistribution"]["Other"], 7);
    assert_eq!(stats["categoryDistribution"]["Personal"], 0);
}

#[tokio::test]
async fn test_delete_removes_event_and_unknown_ids_are_not_found() {
    let app = test_app();
    let created = create(&app, "Interview", "2025-06-20", "10:00", None).await;
    let id = created["_id"].as_str().unwrap();

    let (status, event) = send(&app, Method::GET, &format!("/events/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["title"], "Interview");

    let (status, _) = send(&app, Method::DELETE, &format!("/events/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, all) = send(&app, Method::GET, "/events", None).await;
    assert_eq!(all, json!([]));

    for method in [Method::DELETE, Method::PUT, Method::GET] {
        let (status, body) = send(&app, method, &format!("/events/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn test_file_store_backs_the_api() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileStore::open(tmp.path()).unwrap();
    let scheduler =
        Scheduler::new(Arc::new(store.clone())).with_clock(Arc::new(FixedClock::new(today())));
    let app = app(AppState::new(scheduler));

    let created = create(&app, "Friend visit", "2025-06-22", "15:00", None).await;
    let id = created["_id"].as_str().unwrap();
    assert!(store.dir().join(format!("{id}.json")).exists());

    let (status, _) = send(&app, Method::DELETE, "/events/not-a-real-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
