mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use common::{
    admin_token, create_plant, json_request, plant_body, send, setup_state, setup_test_app,
    user_token,
};
use microtrack::microtrack_models::MAX_GROWTH_DAYS;
use serde_json::{Value, json};

async fn admin_app() -> (axum::Router, String) {
    let state = setup_state();
    let app = setup_test_app(state.clone());
    let token = admin_token(&app, &state).await;
    (app, token)
}

async fn search(app: &axum::Router, query: &str) -> (StatusCode, Value) {
    send(app, json_request("GET", &format!("/plants/search{}", query), None, None)).await
}

fn names(body: &Value) -> Vec<String> {
    body["plants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_plant_derives_fields() {
    let (app, token) = admin_app().await;

    let plant = create_plant(&app, &token, plant_body("Basil", 30)).await;

    assert_eq!(plant["plant_id"], 1);
    assert_eq!(plant["name"], "Basil");
    assert_eq!(plant["growth_days"], 30);
    assert!(plant["seeding_date"].as_str().unwrap().starts_with("2024-01-01T00:00:00"));
    assert!(plant["harvest_date"].as_str().unwrap().starts_with("2024-01-31T00:00:00"));
    assert!(plant["recorded_date"].is_string());
    assert!(!plant["group_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_plant_ids_are_sequential() {
    let (app, token) = admin_app().await;

    for expected in 1..=3 {
        let plant = create_plant(&app, &token, plant_body("Basil", 10)).await;
        assert_eq!(plant["plant_id"], expected);
    }
}

#[tokio::test]
async fn test_concurrent_creates_get_unique_ids() {
    let (app, token) = admin_app().await;

    let mut handles = Vec::new();
    for i in 0..20 {
        let app = app.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            create_plant(&app, &token, plant_body(&format!("Plant {}", i), 5)).await["plant_id"]
                .as_i64()
                .unwrap()
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }
    assert_eq!(ids.len(), 20);
    assert_eq!(ids, (1..=20).collect::<HashSet<i64>>());
}

#[tokio::test]
async fn test_create_plant_validation() {
    let (app, token) = admin_app().await;

    let (status, _) = send(
        &app,
        json_request("POST", "/plants", Some(&token), Some(json!({ "name": "Basil" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = plant_body("Basil", 10);
    body["seeding_date"] = json!("not a date");
    let (status, _) = send(&app, json_request("POST", "/plants", Some(&token), Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request("POST", "/plants", Some(&token), Some(plant_body("Basil", -1))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_writes_require_admin() {
    let state = setup_state();
    let app = setup_test_app(state.clone());
    let user = user_token(&app).await;

    let requests = [
        ("POST", "/plants".to_string(), Some(plant_body("Basil", 1))),
        ("PUT", "/plants/1".to_string(), Some(json!({ "height": 1.0 }))),
        ("DELETE", "/plants/1".to_string(), None),
        ("DELETE", "/plants/delete-by-name/Basil".to_string(), None),
    ];

    for (method, uri, body) in requests {
        let (status, _) = send(&app, json_request(method, &uri, None, body.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {} without token", method, uri);

        let (status, _) = send(&app, json_request(method, &uri, Some(&user), body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{} {} as user", method, uri);
    }
}

#[tokio::test]
async fn test_list_plants_is_public_and_ordered() {
    let (app, token) = admin_app().await;
    for name in ["Mint", "Basil", "Thyme"] {
        create_plant(&app, &token, plant_body(name, 10)).await;
    }

    let (status, body) = send(&app, json_request("GET", "/plants", None, None)).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["plant_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_update_plant_fields() {
    let (app, token) = admin_app().await;
    let created = create_plant(&app, &token, plant_body("Basil", 30)).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/plants/1",
            Some(&token),
            Some(json!({ "height": 0, "floor": "", "growth_stage": "flowering" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Plant updated successfully");

    let (_, list) = send(&app, json_request("GET", "/plants", None, None)).await;
    let plant = &list[0];
    assert_eq!(plant["height"], 0.0);
    assert_eq!(plant["floor"], "");
    assert_eq!(plant["growth_stage"], "flowering");
    assert_eq!(plant["name"], "Basil");
    assert_eq!(plant["harvest_date"], created["harvest_date"]);
}

#[tokio::test]
async fn test_update_growth_days_recomputes_harvest_date() {
    let (app, token) = admin_app().await;
    create_plant(&app, &token, plant_body("Basil", 30)).await;

    let (status, _) = send(
        &app,
        json_request("PUT", "/plants/1", Some(&token), Some(json!({ "growth_days": 10 }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&app, json_request("GET", "/plants", None, None)).await;
    assert!(list[0]["harvest_date"].as_str().unwrap().starts_with("2024-01-11"));

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/plants/1",
            Some(&token),
            Some(json!({ "seeding_date": "2024-03-01", "growth_days": 5 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&app, json_request("GET", "/plants", None, None)).await;
    assert!(list[0]["harvest_date"].as_str().unwrap().starts_with("2024-03-06"));
}

#[tokio::test]
async fn test_update_errors() {
    let (app, token) = admin_app().await;
    create_plant(&app, &token, plant_body("Basil", 30)).await;

    let (status, body) = send(
        &app,
        json_request("PUT", "/plants/abc", Some(&token), Some(json!({ "height": 1 }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid plant ID");

    let (status, body) = send(
        &app,
        json_request("PUT", "/plants/99", Some(&token), Some(json!({ "height": 1 }))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Plant not found");

    let (status, _) = send(&app, json_request("PUT", "/plants/1", Some(&token), Some(json!({})))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_growth_days_beyond_limit_is_rejected() {
    let (app, token) = admin_app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/plants", Some(&token), Some(plant_body("Basil", 2_000_000_000))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Growth days"));

    let plant = create_plant(&app, &token, plant_body("Basil", MAX_GROWTH_DAYS)).await;
    assert_eq!(plant["growth_days"], MAX_GROWTH_DAYS);
    assert!(plant["harvest_date"].as_str().unwrap().starts_with("2123-"));

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/plants/1",
            Some(&token),
            Some(json!({ "growth_days": 2_000_000_000 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, json_request("GET", "/plants", None, None)).await;
    assert_eq!(list[0]["growth_days"], MAX_GROWTH_DAYS);
}

#[tokio::test]
async fn test_delete_plant() {
    let (app, token) = admin_app().await;
    create_plant(&app, &token, plant_body("Basil", 30)).await;

    let (status, body) = send(&app, json_request("DELETE", "/plants/1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Plant deleted successfully");

    let (status, _) = send(&app, json_request("DELETE", "/plants/1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, json_request("DELETE", "/plants/x1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_by_name() {
    let (app, token) = admin_app().await;
    for name in ["Basil", "Basil", "Sweet Basil"] {
        create_plant(&app, &token, plant_body(name, 10)).await;
    }

    let (status, body) = send(
        &app,
        json_request("DELETE", "/plants/delete-by-name/Basil", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted_count"], 2);
    assert_eq!(body["message"], "Deleted 2 plant(s) with name 'Basil'");

    let (_, list) = send(&app, json_request("GET", "/plants", None, None)).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        json_request("DELETE", "/plants/delete-by-name/Basil", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted_count"], 0);
}

#[tokio::test]
async fn test_search_total_and_pagination() {
    let (app, token) = admin_app().await;
    for i in 0..15 {
        create_plant(&app, &token, plant_body(&format!("Basil {:02}", i), i)).await;
    }
    create_plant(&app, &token, plant_body("Mint", 3)).await;

    let (status, body) = search(&app, "?name=basil").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 15);
    assert_eq!(body["plants"].as_array().unwrap().len(), 10);

    let (_, body) = search(&app, "?name=basil&skip=10").await;
    assert_eq!(body["total"], 15);
    assert_eq!(body["plants"].as_array().unwrap().len(), 5);
    assert_eq!(names(&body)[0], "Basil 10");

    let (_, body) = search(&app, "?limit=500").await;
    assert_eq!(body["total"], 16);
    assert_eq!(body["plants"].as_array().unwrap().len(), 16);

    let (_, body) = search(&app, "?limit=0&skip=-4").await;
    assert_eq!(body["plants"].as_array().unwrap().len(), 10);
    assert_eq!(names(&body)[0], "Basil 00");
}

#[tokio::test]
async fn test_search_limit_clamped_to_100() {
    let (app, token) = admin_app().await;
    for i in 0..105 {
        create_plant(&app, &token, plant_body(&format!("P{:03}", i), 1)).await;
    }

    let (_, body) = search(&app, "?limit=500").await;
    assert_eq!(body["total"], 105);
    assert_eq!(body["plants"].as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn test_search_filters() {
    let (app, token) = admin_app().await;

    let mut basil = plant_body("Basil", 30);
    basil["group_id"] = json!("rack-a");
    basil["description"] = json!("Smells GREAT");
    create_plant(&app, &token, basil).await;

    let mut mint = plant_body("Mint", 20);
    mint["group_id"] = json!("rack-b");
    mint["growth_stage"] = json!("flowering");
    create_plant(&app, &token, mint).await;

    create_plant(&app, &token, plant_body("100% Thyme", 40)).await;

    let (_, body) = search(&app, "?plant_id=2").await;
    assert_eq!(names(&body), vec!["Mint"]);

    let (_, body) = search(&app, "?group_id=rack-a").await;
    assert_eq!(names(&body), vec!["Basil"]);

    let (_, body) = search(&app, "?description=great").await;
    assert_eq!(names(&body), vec!["Basil"]);

    let (_, body) = search(&app, "?growth_stage=FLOWER").await;
    assert_eq!(names(&body), vec!["Mint"]);

    let (_, body) = search(&app, "?min_growth_days=25&max_growth_days=35").await;
    assert_eq!(names(&body), vec!["Basil"]);

    let (_, body) = search(&app, "?name=%25").await;
    assert_eq!(names(&body), vec!["100% Thyme"]);

    let (_, body) = search(&app, "?name=&group_id=&min_growth_days=abc").await;
    assert_eq!(body["total"], 3);

    let (_, body) = search(&app, "?name=basil&group_id=rack-b").await;
    assert_eq!(body["total"], 0);

    // Substring needles are matched verbatim, whitespace included.
    let (_, body) = search(&app, "?name=%20").await;
    assert_eq!(names(&body), vec!["100% Thyme"]);

    let (_, body) = search(&app, "?name=%20basil").await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_search_invalid_plant_id() {
    let (app, _) = admin_app().await;
    let (status, body) = search(&app, "?plant_id=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid plant_id");
}

#[tokio::test]
async fn test_search_sorting() {
    let (app, token) = admin_app().await;
    create_plant(&app, &token, plant_body("Mint", 20)).await;
    create_plant(&app, &token, plant_body("Basil", 30)).await;
    create_plant(&app, &token, plant_body("Thyme", 10)).await;

    let (_, body) = search(&app, "").await;
    assert_eq!(names(&body), vec!["Basil", "Mint", "Thyme"]);

    let (_, body) = search(&app, "?sort_by=growth_days&sort_order=desc").await;
    assert_eq!(names(&body), vec!["Basil", "Mint", "Thyme"]);

    let (_, body) = search(&app, "?sort_by=growth_days&sort_order=DESC").await;
    assert_eq!(names(&body), vec!["Thyme", "Mint", "Basil"]);

    let (_, body) = search(&app, "?sort_by=password_hash").await;
    assert_eq!(names(&body), vec!["Basil", "Mint", "Thyme"]);
}
