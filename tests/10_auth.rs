mod common;

use anyhow::Result;
use reqwest::StatusCode;

// Authentication surface: public endpoints, bearer validation, whoami.

#[tokio::test]
async fn health_is_public() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["status"], "ok");

    Ok(())
}

#[tokio::test]
async fn missing_token_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/members", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["code"], "UNAUTHORIZED");

    Ok(())
}

#[tokio::test]
async fn garbage_token_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/members", server.base_url))
        .bearer_auth("not.a.token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn whoami_reports_groups_and_scope() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .bearer_auth(common::token(&["members_read", "Regio_Utrecht"]))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<serde_json::Value>().await?;
    assert_eq!(payload["sub"], "test-user");
    assert_eq!(payload["member_scope"], "Utrecht");
    let groups = payload["groups"].as_array().cloned().unwrap_or_default();
    assert!(groups.contains(&serde_json::json!("Regio_Utrecht")));

    Ok(())
}

#[tokio::test]
async fn whoami_without_member_capability_has_no_scope() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .bearer_auth(common::token(&["events_read"]))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<serde_json::Value>().await?;
    assert!(payload["member_scope"].is_null());

    Ok(())
}
