use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{get, post, send};

#[tokio::test]
async fn test_team_attempt_grades_and_credits_everyone() {
    let app = common::create_test_app();
    let quiz_id = common::create_quiz(&app).await;
    let team_id = common::create_team(&app, "lead", 5).await;
    let tournament_id = common::create_tournament(&app, 10).await;

    let (status, body) = post(
        &app,
        &format!("/api/v1/tests/{}/submit", quiz_id),
        json!({
            "user_id": "lead",
            "user_name": "Leader",
            "answers": [0, 1, 2],
            "mode": "team_tournament",
            "team_id": team_id,
            "tournament_id": tournament_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    assert_eq!(body["correct_answers"], 2);
    assert_eq!(body["total_questions"], 3);
    assert_eq!(body["points_earned"], 10);
    let score = body["score"].as_f64().unwrap();
    assert!((score - 66.67).abs() < 0.01);

    let (_, stats) = get(&app, "/api/v1/users/lead/stats").await;
    assert_eq!(stats["testsCompleted"], 1);
    assert_eq!(stats["correctAnswers"], 2);
    assert_eq!(stats["totalPoints"], 10);

    let (_, team) = get(&app, &format!("/api/v1/teams/{}", team_id)).await;
    assert_eq!(team["points"], 10);

    let (_, board) = get(
        &app,
        &format!("/api/v1/tournaments/{}/leaderboard", tournament_id),
    )
    .await;
    assert_eq!(board[0]["userId"], "lead");
    assert_eq!(board[0]["correctAnswers"], 2);

    let (_, results) = get(&app, "/api/v1/users/lead/results").await;
    assert_eq!(results.as_array().unwrap().len(), 1);
    assert_eq!(results[0]["mode"], "team_tournament");
}

#[tokio::test]
async fn test_attempt_errors() {
    let app = common::create_test_app();
    let quiz_id = common::create_quiz(&app).await;

    let (status, body) = post(
        &app,
        &format!("/api/v1/tests/{}/submit", quiz_id),
        json!({ "user_id": "u", "user_name": "U", "answers": [0], "mode": "blitz" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_MODE");

    let (status, _) = post(
        &app,
        "/api/v1/tests/missing/submit",
        json!({ "user_id": "u", "user_name": "U", "answers": [0] }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quiz_crud() {
    let app = common::create_test_app();
    let quiz_id = common::create_quiz(&app).await;

    let (_, listed) = get(&app, "/api/v1/tests?status=active").await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    let (_, drafts) = get(&app, "/api/v1/tests?status=draft").await;
    assert!(drafts.as_array().unwrap().is_empty());

    let (status, quiz) = get(&app, &format!("/api/v1/tests/{}", quiz_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quiz["questions"].as_array().unwrap().len(), 3);

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/tests/{}", quiz_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get(&app, &format!("/api/v1/tests/{}", quiz_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
