// ABOUTME: HTTP-level integration tests sending requests through the full router
// ABOUTME: Covers plans, tracker, trial, subscription, tokens and health endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealmind

mod common;

use anyhow::Result;
use axum::body::Body;
use axum::Router;
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use common::{create_test_resources, create_test_user, ScriptedProvider};
use mealmind::{resources::ServerResources, server::MealmindServer};

async fn test_app() -> Result<(Router, Arc<ServerResources>)> {
    let resources = create_test_resources(ScriptedProvider::sample()).await?;
    Ok((MealmindServer::base_router(&resources), resources))
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn test_health_endpoints() -> Result<()> {
    let (app, _) = test_app().await?;

    let response = app.clone().oneshot(get_request("/health")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["status"], "healthy");

    let response = app.oneshot(get_request("/ready")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_create_and_fetch_plan() -> Result<()> {
    let (app, resources) = test_app().await?;
    let user = create_test_user(&resources.database, "routes@example.com").await?;

    let create = json_request(
        Method::POST,
        "/plans/create",
        json!({
            "title": "Mediterranean week",
            "start_date": "2025-05-05",
            "duration": 2,
            "goal": "maintenance",
            "diet": "mediterranean",
            "user_id": user.id,
            "gender": "female",
            "age": 28,
            "height": 165.0,
            "weight": 60.0,
            "activity_level": "light"
        }),
    );

    let response = app.clone().oneshot(create).await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await?;
    let plan_id = body["plan_id"].as_str().unwrap().to_string();

    // Detail projection: header fields flattened, days under "meals"
    let response = app
        .clone()
        .oneshot(get_request(&format!("/plans/{plan_id}")))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["title"], "Mediterranean week");
    assert_eq!(body["duration"], 2);
    let meals = body["meals"].as_array().unwrap();
    assert_eq!(meals.len(), 2);
    assert_eq!(meals[0]["day"], 1);
    assert_eq!(meals[0]["date"], "2025-05-05");
    assert_eq!(meals[1]["date"], "2025-05-06");
    assert_eq!(meals[0]["cheat_day"], false);
    assert_eq!(meals[0]["breakfast"]["name"], "Oatmeal with Berries");

    // Listing is scoped by user
    let response = app
        .oneshot(get_request(&format!("/plans?user_id={}", user.id)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body.as_array().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_create_plan_rejects_bad_duration() -> Result<()> {
    let (app, resources) = test_app().await?;
    let user = create_test_user(&resources.database, "badreq@example.com").await?;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/plans/create",
            json!({
                "title": "Zero days",
                "start_date": "2025-05-05",
                "duration": 0,
                "goal": "maintenance",
                "diet": "any",
                "user_id": user.id
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    Ok(())
}

#[tokio::test]
async fn test_get_unknown_plan_is_structured_404() -> Result<()> {
    let (app, _) = test_app().await?;

    let response = app
        .oneshot(get_request(&format!("/plans/{}", Uuid::new_v4())))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await?;
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");

    Ok(())
}

#[tokio::test]
async fn test_tracker_toggles_cheat_flag() -> Result<()> {
    let (app, resources) = test_app().await?;
    let user = create_test_user(&resources.database, "tracker@example.com").await?;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/plans/create",
            json!({
                "title": "Trackable",
                "start_date": "2025-05-05",
                "duration": 3,
                "goal": "weight loss",
                "diet": "vegan",
                "user_id": user.id
            }),
        ))
        .await?;
    let body = body_json(response).await?;
    let plan_id = body["plan_id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/tracker/cheat",
            json!({"plan_id": plan_id, "day": 2}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Cheat day marked");

    let response = app
        .clone()
        .oneshot(get_request(&format!("/plans/{plan_id}")))
        .await?;
    let body = body_json(response).await?;
    assert_eq!(body["meals"][1]["cheat_day"], true);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/tracker/complete",
            json!({"plan_id": plan_id, "day": 2}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request(&format!("/plans/{plan_id}")))
        .await?;
    let body = body_json(response).await?;
    assert_eq!(body["meals"][1]["cheat_day"], false);

    Ok(())
}

#[tokio::test]
async fn test_tracker_unknown_day_is_404() -> Result<()> {
    let (app, _) = test_app().await?;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/tracker/cheat",
            json!({"plan_id": Uuid::new_v4(), "day": 1}),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await?;
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");

    Ok(())
}

#[tokio::test]
async fn test_trial_status_reports_window_and_count() -> Result<()> {
    let (app, resources) = test_app().await?;
    let user = create_test_user(&resources.database, "trial@example.com").await?;

    let response = app
        .clone()
        .oneshot(get_request(&format!("/trial/status?user_id={}", user.id)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;

    // Fresh account: full window (config grants 14 days), nothing created
    assert_eq!(body["trial_days_left"], 14);
    assert_eq!(body["plans_created"], 0);
    assert_eq!(body["is_subscribed"], false);

    let response = app
        .oneshot(get_request(&format!(
            "/trial/status?user_id={}",
            Uuid::new_v4()
        )))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_subscription_upgrade() -> Result<()> {
    let (app, resources) = test_app().await?;
    let user = create_test_user(&resources.database, "upgrade@example.com").await?;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/subscription/upgrade",
            json!({"user_id": user.id, "plan": "premium"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "User upgraded to premium plan");

    let loaded = resources.database.get_user(user.id).await?.unwrap();
    assert!(loaded.is_subscribed);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/subscription/upgrade",
            json!({"user_id": Uuid::new_v4(), "plan": "premium"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_token_award_requires_known_user() -> Result<()> {
    let (app, resources) = test_app().await?;
    let user = create_test_user(&resources.database, "tokens@example.com").await?;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/tokens/award",
            json!({"user_id": user.id}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/tokens/award",
            json!({"user_id": Uuid::new_v4()}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_email_notification_is_accepted() -> Result<()> {
    let (app, _) = test_app().await?;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/notifications/email",
            json!({
                "email": "target@example.com",
                "subject": "Your plan is ready",
                "message": "Check the app for today's meals."
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/notifications/email",
            json!({
                "email": "not-an-address",
                "subject": "x",
                "message": "y"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
