use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{get, post};

#[tokio::test]
async fn test_join_tournament_capacity_and_duplicates() {
    let app = common::create_test_app();
    let tournament_id = common::create_tournament(&app, 1).await;
    let uri = format!("/api/v1/tournaments/{}/participants", tournament_id);

    let (status, body) = post(&app, &uri, json!({ "user_id": "alice" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["participants"], json!(["alice"]));

    let (status, body) = post(&app, &uri, json!({ "user_id": "alice" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "ALREADY_MEMBER");

    let (status, body) = post(&app, &uri, json!({ "user_id": "bob" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CAPACITY_EXCEEDED");

    let (status, _) = post(
        &app,
        "/api/v1/tournaments/missing/participants",
        json!({ "user_id": "bob" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_leaderboard_upserts_and_sorts() {
    let app = common::create_test_app();
    let tournament_id = common::create_tournament(&app, 10).await;
    let uri = format!("/api/v1/tournaments/{}/leaderboard", tournament_id);

    for (user, score) in [("alice", 60.0), ("bob", 90.0), ("alice", 95.0)] {
        let (status, _) = post(
            &app,
            &uri,
            json!({
                "user_id": user,
                "user_name": user.to_uppercase(),
                "score": score,
                "correct_answers": (score / 10.0) as u32,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, board) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    let board = board.as_array().unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0]["userId"], "alice");
    assert_eq!(board[0]["score"], 95.0);
    assert_eq!(board[1]["userId"], "bob");

    let (_, tournament) = get(&app, &format!("/api/v1/tournaments/{}", tournament_id)).await;
    assert_eq!(tournament["leaderboard"].as_array().unwrap().len(), 2);
    assert_eq!(tournament["type"], "1vs1");
}

#[tokio::test]
async fn test_leaderboard_for_unknown_tournament_is_not_found() {
    let app = common::create_test_app();

    let (status, _) = post(
        &app,
        "/api/v1/tournaments/missing/leaderboard",
        json!({ "user_id": "u", "user_name": "U", "score": 10.0, "correct_answers": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/api/v1/tournaments/missing/leaderboard").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
