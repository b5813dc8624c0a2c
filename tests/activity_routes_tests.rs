mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{get_request, json_request, register, send, spawn_app};
use daily_tracker::service::token::{ACCESS_TOKEN_TYPE, AccessClaims};
use serde_json::json;

#[tokio::test]
async fn missing_or_garbage_token_is_challenged() {
    let t = spawn_app().await;

    let missing = send(&t.app, get_request("/activities", None)).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "UNAUTHORIZED");
    assert_eq!(missing.headers["www-authenticate"], "Bearer");

    let garbage = send(&t.app, get_request("/activities", Some("abc.def.ghi"))).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.json()["error"]["message"], "Invalid token");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let t = spawn_app().await;
    let (_, user_id) = register(&t.app, "ivy@example.com", "Ivy").await;
    let now = Utc::now();
    let expired = t
        .state
        .tokens
        .sign(&AccessClaims {
            user_id: Some(user_id),
            exp: (now - Duration::hours(3)).timestamp(),
            iat: (now - Duration::days(31)).timestamp(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        })
        .unwrap();

    let resp = send(&t.app, get_request("/activities", Some(&expired))).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json()["error"]["message"], "Token has expired");
}

#[tokio::test]
async fn create_activity_defaults_date_to_today() {
    let t = spawn_app().await;
    let (token, user_id) = register(&t.app, "jo@example.com", "Jo").await;

    let resp = send(
        &t.app,
        json_request(
            "POST",
            "/activities",
            Some(&token),
            &json!({
                "category": "  Sleep ",
                "duration_minutes": 480,
                "notes": "slept well",
                "mood_rating": 4
            }),
        ),
    )
    .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.text);
    let activity = &resp.json()["activity"];
    assert_eq!(activity["user_id"], user_id);
    assert_eq!(activity["category"], "Sleep");
    assert_eq!(activity["duration_minutes"], 480);
    assert_eq!(activity["mood_rating"], 4);
    assert_eq!(
        activity["activity_date"],
        Utc::now().date_naive().format("%Y-%m-%d").to_string()
    );
}

#[tokio::test]
async fn activity_validation_boundaries() {
    let t = spawn_app().await;
    let (token, _) = register(&t.app, "kim@example.com", "Kim").await;

    let cases = [
        (json!({"category": "Sleep", "duration_minutes": 0}), StatusCode::UNPROCESSABLE_ENTITY),
        (json!({"category": "Sleep", "duration_minutes": 1}), StatusCode::CREATED),
        (json!({"category": "Sleep", "duration_minutes": 1440}), StatusCode::CREATED),
        (json!({"category": "Sleep", "duration_minutes": 1441}), StatusCode::UNPROCESSABLE_ENTITY),
        (
            json!({"category": "Sleep", "duration_minutes": 30, "mood_rating": 6}),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (json!({"category": "  ", "duration_minutes": 30}), StatusCode::UNPROCESSABLE_ENTITY),
        (json!({"category": "Gaming", "duration_minutes": 30}), StatusCode::BAD_REQUEST),
        (
            json!({"category": "Sleep", "duration_minutes": 30, "activity_date": "not-a-date"}),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
    ];

    for (body, expected) in cases {
        let resp = send(&t.app, json_request("POST", "/activities", Some(&token), &body)).await;
        assert_eq!(resp.status, expected, "body {body} -> {}", resp.text);
    }
}

#[tokio::test]
async fn listing_filters_by_date_and_orders_newest_first() {
    let t = spawn_app().await;
    let (token, _) = register(&t.app, "lou@example.com", "Lou").await;

    for (category, minutes, date) in [
        ("Work/Productivity", 240, "2024-05-01"),
        ("Physical Activity/Exercise", 45, "2024-05-02"),
        ("Nutrition/Meals", 30, "2024-05-02"),
    ] {
        let resp = send(
            &t.app,
            json_request(
                "POST",
                "/activities",
                Some(&token),
                &json!({"category": category, "duration_minutes": minutes, "activity_date": date}),
            ),
        )
        .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.text);
    }

    let all = send(&t.app, get_request("/activities", Some(&token))).await.json();
    assert_eq!(all["count"], 3);
    assert_eq!(all["total_minutes"], 315);
    let dates: Vec<&str> = all["activities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["activity_date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-05-02", "2024-05-02", "2024-05-01"]);
    assert_eq!(all["activities"][0]["category"], "Nutrition/Meals");

    let one_day = send(
        &t.app,
        get_request("/activities?activity_date=2024-05-01", Some(&token)),
    )
    .await
    .json();
    assert_eq!(one_day["count"], 1);
    assert_eq!(one_day["total_minutes"], 240);
    assert_eq!(one_day["activities"][0]["category"], "Work/Productivity");

    let bad = send(
        &t.app,
        get_request("/activities?activity_date=05/01/2024", Some(&token)),
    )
    .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn activities_are_scoped_to_their_owner() {
    let t = spawn_app().await;
    let (owner, _) = register(&t.app, "max@example.com", "Max").await;
    let (other, _) = register(&t.app, "nia@example.com", "Nia").await;

    let resp = send(
        &t.app,
        json_request(
            "POST",
            "/activities",
            Some(&owner),
            &json!({"category": "Social/Leisure", "duration_minutes": 90}),
        ),
    )
    .await;
    assert_eq!(resp.status, StatusCode::CREATED);

    let mine = send(&t.app, get_request("/activities", Some(&owner))).await.json();
    let theirs = send(&t.app, get_request("/activities", Some(&other))).await.json();
    assert_eq!(mine["count"], 1);
    assert_eq!(theirs["count"], 0);
}
