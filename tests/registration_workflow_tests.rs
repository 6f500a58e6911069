use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use kondattam::admin::TokenConfig;
use kondattam::registration::InMemoryRegistrationRepository;
use kondattam::{app_router, AppState, GameCatalog};

fn test_app() -> Router {
    let state = AppState::new(
        Arc::new(InMemoryRegistrationRepository::new()),
        Arc::new(GameCatalog::new()),
        TokenConfig::new(),
    );
    app_router(state)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, payload)
}

async fn get_json(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn admin_token(app: &Router) -> String {
    let (status, payload) = send_json(
        app,
        "POST",
        "/admin/login",
        None,
        json!({ "username": "pongal2026", "password": "pongal@123" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    payload["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_game_catalog_is_served() {
    let app = test_app();
    let (status, games) = get_json(&app, "/games", None).await;

    assert_eq!(status, StatusCode::OK);
    let games = games.as_array().unwrap().clone();
    assert_eq!(games.len(), 6);
    assert_eq!(games[0]["title"], "Basket Ball");
    assert_eq!(games[0]["mode"], "individual");
    assert_eq!(games[2]["title"], "Tug of War");
    assert_eq!(games[2]["min_members"], 4);
}

#[tokio::test]
async fn test_admin_routes_require_bearer_token() {
    let app = test_app();

    let (status, _) = get_json(&app, "/registrations", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get_json(&app, "/registrations", Some("not-a-real-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = admin_token(&app).await;
    let (status, _) = get_json(&app, "/registrations", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_rejects_wrong_credentials() {
    let app = test_app();
    let (status, _) = send_json(
        &app,
        "POST",
        "/admin/login",
        None,
        json!({ "username": "pongal2026", "password": "guess" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_full_registration_to_winners_workflow() {
    let app = test_app();
    let token = admin_token(&app).await;

    // A team signs up for Kolam Design
    let (status, team) = send_json(
        &app,
        "POST",
        "/registrations",
        None,
        json!({
            "name": "Asha",
            "phone": "9990000001",
            "game": "Kolam Design",
            "team_name": "Harvest Kings",
            "team_members": ["Asha", "Bala", "Chitra"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let team_ids = team["ids"].as_array().unwrap().clone();
    assert_eq!(team_ids.len(), 3);

    // Two individuals sign up for Basket Ball
    for (name, phone) in [("Devi", "9990000002"), ("Ezhil", "9990000003")] {
        let (status, created) = send_json(
            &app,
            "POST",
            "/registrations",
            None,
            json!({ "name": name, "phone": phone, "game": "Basket Ball" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["ids"].as_array().unwrap().len(), 1);
    }

    // The grouped listing shows three units, newest first
    let (status, units) = get_json(&app, "/registrations", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let units = units.as_array().unwrap().clone();
    assert_eq!(units.len(), 3);
    assert_eq!(units[0]["display_name"], "Ezhil");
    assert_eq!(units[2]["display_name"], "Harvest Kings");
    assert_eq!(units[2]["members"].as_array().unwrap().len(), 3);

    // Score the team and one individual
    let (status, _) = send_json(
        &app,
        "POST",
        "/scores",
        Some(&token),
        json!({ "member_ids": team_ids, "score": "14", "prize": "FIRST" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let devi_ids: Vec<Value> = units
        .iter()
        .find(|u| u["display_name"] == "Devi")
        .unwrap()["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].clone())
        .collect();
    let (status, _) = send_json(
        &app,
        "POST",
        "/scores",
        Some(&token),
        json!({ "member_ids": devi_ids, "score": "4", "prize": "SECOND" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Leaderboard ranks the team first
    let (status, board) = get_json(&app, "/leaderboard", None).await;
    assert_eq!(status, StatusCode::OK);
    let board = board.as_array().unwrap().clone();
    assert_eq!(board[0]["display_name"], "Harvest Kings");
    assert_eq!(board[0]["score"], 14);

    // Only scored units make the top list
    let (status, top) = get_json(&app, "/leaderboard?top=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(top.as_array().unwrap().len(), 2);

    // Winners report lists every game, winners where awarded
    let (status, report) = get_json(&app, "/winners", None).await;
    assert_eq!(status, StatusCode::OK);
    let report = report.as_array().unwrap().clone();
    assert_eq!(report.len(), 6);

    let kolam = report.iter().find(|g| g["game"] == "Kolam Design").unwrap();
    assert_eq!(kolam["winners"][0]["name"], "Harvest Kings");
    assert_eq!(kolam["winners"][0]["prize"], "FIRST");

    let basket = report.iter().find(|g| g["game"] == "Basket Ball").unwrap();
    assert_eq!(basket["winners"][0]["name"], "Devi");

    let tug = report.iter().find(|g| g["game"] == "Tug of War").unwrap();
    assert!(tug["winners"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_registration_limit_and_duplicate_rules_over_http() {
    let app = test_app();

    for game in ["Basket Ball", "Musical Chair", "Pot Breaking"] {
        let (status, _) = send_json(
            &app,
            "POST",
            "/registrations",
            None,
            json!({ "name": "Asha", "phone": "9990000001", "game": game }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // Fourth game for the same phone is over the limit
    let (status, payload) = send_json(
        &app,
        "POST",
        "/registrations",
        None,
        json!({
            "name": "Asha",
            "phone": "9990000001",
            "game": "Kolam Design",
            "team_name": "Harvest Kings",
            "team_members": ["Asha", "Bala"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(payload["error"].as_str().unwrap().contains("Maximum 3"));

    // Duplicate (phone, game) from a fresh phone limit
    let (status, _) = send_json(
        &app,
        "POST",
        "/registrations",
        None,
        json!({ "name": "Devi", "phone": "9990000002", "game": "Basket Ball" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send_json(
        &app,
        "POST",
        "/registrations",
        None,
        json!({ "name": "Devi", "phone": "9990000002", "game": "Basket Ball" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_admin_edit_and_delete_workflow() {
    let app = test_app();
    let token = admin_token(&app).await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/registrations",
        None,
        json!({
            "name": "Asha",
            "phone": "9990000001",
            "game": "Treasure Hunt",
            "team_name": "Clue Chasers",
            "team_members": ["Asha", "Bala"]
        }),
    )
    .await;
    let ids = created["ids"].as_array().unwrap().clone();

    // Rename the team and its first member
    let (status, _) = send_json(
        &app,
        "PUT",
        "/registrations",
        Some(&token),
        json!({
            "member_ids": ids,
            "name": "Clue Masters",
            "phone": "9990000001",
            "game": "Treasure Hunt",
            "team_name": "Clue Masters",
            "member_names": ["Anitha"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, units) = get_json(&app, "/registrations", Some(&token)).await;
    let unit = &units.as_array().unwrap()[0];
    assert_eq!(unit["display_name"], "Clue Masters");
    let member_names: Vec<&str> = unit["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert!(member_names.contains(&"Anitha"));
    assert!(member_names.contains(&"Bala"));

    // Delete the whole unit
    let (status, _) = send_json(
        &app,
        "DELETE",
        "/registrations",
        Some(&token),
        json!({ "member_ids": ids }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, units) = get_json(&app, "/registrations", Some(&token)).await;
    assert!(units.as_array().unwrap().is_empty());
}
