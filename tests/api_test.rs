mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use campuslink::{api, config::Settings, service::ServiceContext};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app() -> anyhow::Result<Router> {
    let pool = common::test_pool().await?;
    let service_context = Arc::new(ServiceContext::new(pool));
    Ok(api::create_app(service_context, Arc::new(Settings::default())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, value))
}

fn error_message(body: &Value) -> String {
    body["error"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_health_and_root() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["polls"], "/api/polls");

    Ok(())
}

#[tokio::test]
async fn test_announcement_round_trip() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, created) = send(&app, "POST", "/api/announcements", Some(json!({
        "title": "Library extended hours",
        "content": "Open 24/7 during exams",
        "category": "facilities",
        // Client-supplied dates are ignored.
        "date": "1999-01-01T00:00:00Z"
    }))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    let id = created["id"].as_str().expect("id should be a string").to_string();

    let (status, listed) = send(&app, "GET", "/api/announcements?category=facilities", None).await?;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().expect("list should be an array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());
    assert_eq!(listed[0]["author"], "Admin");
    assert_ne!(listed[0]["date"], "1999-01-01T00:00:00Z");

    let (status, fetched) = send(&app, "GET", &format!("/api/announcements/{}", id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Library extended hours");

    let (status, none) = send(&app, "GET", "/api/announcements?category=Facilities", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(none.as_array().map(Vec::len), Some(0));

    Ok(())
}

#[tokio::test]
async fn test_missing_and_empty_fields_are_rejected() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, body) = send(&app, "POST", "/api/announcements", Some(json!({
        "content": "No title here",
        "category": "general"
    }))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(error_message(&body).contains("title"));

    let (status, body) = send(&app, "POST", "/api/news", Some(json!({
        "title": "",
        "content": "Empty title",
        "category": "general"
    }))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_message(&body), "title: must not be empty");

    let (status, body) = send(&app, "POST", "/api/skills", Some(json!({
        "title": "Guitar",
        "description": "Chords and strumming",
        "category": "music",
        "instructor": 42,
        "contact": "x@college.edu"
    }))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(error_message(&body).contains("instructor"));

    let (status, _) = send(&app, "GET", "/api/skills", None).await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_lost_found_type_must_be_lost_or_found() -> anyhow::Result<()> {
    let app = test_app().await?;

    let item = json!({
        "title": "Umbrella",
        "description": "Black, folding",
        "category": "personal",
        "type": "stolen",
        "location": "Gym",
        "contact": "gym@college.edu"
    });
    let (status, _) = send(&app, "POST", "/api/lost-found", Some(item.clone())).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut valid = item;
    valid["type"] = json!("found");
    let (status, _) = send(&app, "POST", "/api/lost-found", Some(valid)).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, items) = send(&app, "GET", "/api/lost-found?type=found", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items[0]["type"], "found");
    assert_eq!(items[0]["status"], "active");

    let (status, _) = send(&app, "GET", "/api/lost-found?type=stolen", None).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn test_complaint_status_update() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, created) = send(&app, "POST", "/api/complaints", Some(json!({
        "title": "Broken WiFi",
        "description": "Study hall connection drops",
        "category": "internet"
    }))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().expect("id should be a string").to_string();

    let (status, body) = send(&app, "PUT", "/api/complaints", Some(json!({
        "id": id,
        "status": "in-progress"
    }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, complaint) = send(&app, "GET", &format!("/api/complaints/{}", id), None).await?;
    assert_eq!(complaint["status"], "in-progress");
    assert_eq!(complaint["priority"], "medium");

    let (status, _) = send(&app, "PUT", "/api/complaints", Some(json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "status": "resolved"
    }))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/api/complaints", Some(json!({
        "id": "not-an-id",
        "status": "resolved"
    }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/api/complaints", Some(json!({
        "id": id,
        "status": "closed"
    }))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn test_timetable_replace_and_append() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, empty) = send(&app, "GET", "/api/timetable?user_id=u1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["schedule"], json!([]));

    let replace = json!({
        "user_id": "u1",
        "schedule": [{
            "day": "Monday",
            "time": "09:00",
            "subject": "Algorithms",
            "room": "Room 101",
            "professor": "Dr. Rao"
        }]
    });
    for _ in 0..2 {
        let (status, body) = send(&app, "POST", "/api/timetable", Some(replace.clone())).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    let (_, stored) = send(&app, "GET", "/api/timetable?user_id=u1", None).await?;
    assert_eq!(stored["schedule"].as_array().map(Vec::len), Some(1));
    assert_eq!(stored["schedule"][0]["duration"], "60");

    let append = json!({
        "user_id": "u1",
        "day": "Friday",
        "time": "14:00",
        "subject": "Compilers",
        "room": "Lab 3"
    });
    for _ in 0..2 {
        let (status, _) = send(&app, "POST", "/api/timetable", Some(append.clone())).await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, stored) = send(&app, "GET", "/api/timetable?user_id=u1", None).await?;
    assert_eq!(stored["schedule"].as_array().map(Vec::len), Some(3));

    let (status, body) = send(&app, "POST", "/api/timetable", Some(json!({
        "user_id": "u1",
        "day": "Friday",
        "time": "14:00",
        "subject": "Compilers"
    }))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(error_message(&body).starts_with("room"));

    Ok(())
}

#[tokio::test]
async fn test_poll_vote_scenario() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, created) = send(&app, "POST", "/api/polls", Some(json!({
        "question": "Pick one",
        "options": ["A", "B"]
    }))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let poll_id = created["id"].as_str().expect("id should be a string").to_string();
    let poll_uri = format!("/api/polls/{}", poll_id);

    let (status, body) = send(&app, "PUT", "/api/polls", Some(json!({
        "poll_id": poll_id, "option": "A", "voter_id": "u1"
    }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    let (_, poll) = send(&app, "GET", &poll_uri, None).await?;
    assert_eq!(poll["votes"], json!({ "A": 1, "B": 0 }));

    let (status, body) = send(&app, "PUT", "/api/polls", Some(json!({
        "poll_id": poll_id, "option": "A", "voter_id": "u1"
    }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": false, "message": "Already voted" }));
    let (_, poll) = send(&app, "GET", &poll_uri, None).await?;
    assert_eq!(poll["votes"], json!({ "A": 1, "B": 0 }));

    let (_, body) = send(&app, "PUT", "/api/polls", Some(json!({
        "poll_id": poll_id, "option": "A", "voter_id": "u2"
    }))).await?;
    assert_eq!(body["success"], true);
    let (_, poll) = send(&app, "GET", &poll_uri, None).await?;
    assert_eq!(poll["votes"], json!({ "A": 2, "B": 0 }));
    assert_eq!(poll["voters"], json!(["u1", "u2"]));

    let (status, _) = send(&app, "PUT", "/api/polls", Some(json!({
        "poll_id": poll_id, "option": "C", "voter_id": "u3"
    }))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "PUT", "/api/polls", Some(json!({
        "poll_id": uuid::Uuid::new_v4().to_string(), "option": "A", "voter_id": "u3"
    }))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/api/polls", Some(json!({
        "question": "Duplicate options",
        "options": ["A", "A"]
    }))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, polls) = send(&app, "GET", "/api/polls", None).await?;
    assert_eq!(polls.as_array().map(Vec::len), Some(1));

    Ok(())
}
