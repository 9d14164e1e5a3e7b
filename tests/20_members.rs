mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

// Member CRUD plus regional visibility. Tests within this file share one
// server, so assertions avoid global counts and key on created ids.

async fn create_member(server: &common::TestServer, region: Option<&str>) -> Result<Value> {
    let client = reqwest::Client::new();
    let mut body = json!({
        "first_name": "Jan",
        "last_name": "de Vries",
        "membership_type": "full",
        "city": "Amersfoort"
    });
    if let Some(region) = region {
        body["region"] = json!(region);
    }

    let res = client
        .post(format!("{}/api/members", server.base_url))
        .bearer_auth(common::token(&["admin", "Regio_All"]))
        .json(&body)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED, "create failed");
    Ok(res.json::<Value>().await?)
}

#[tokio::test]
async fn create_assigns_id_and_timestamps() -> Result<()> {
    let server = common::ensure_server().await?;

    let member = create_member(server, Some("Utrecht")).await?;
    assert!(member["id"].is_string());
    assert!(member["created_at"].is_string());
    assert_eq!(member["region"], "Utrecht");
    assert_eq!(member["status"], "active");

    Ok(())
}

#[tokio::test]
async fn single_member_is_returned_bare() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let created = create_member(server, Some("Zuid")).await?;
    let id = created["id"].as_str().unwrap();

    let res = client
        .get(format!("{}/api/members/{}", server.base_url, id))
        .bearer_auth(common::token(&["members_read", "Regio_All"]))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<Value>().await?;
    // The record itself, not an envelope
    assert_eq!(payload["id"], created["id"]);
    assert!(payload.get("data").is_none());

    Ok(())
}

#[tokio::test]
async fn listing_requires_member_capability() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/members", server.base_url))
        .bearer_auth(common::token(&["events_read", "Regio_All"]))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let payload = res.json::<Value>().await?;
    assert_eq!(payload["code"], "FORBIDDEN");
    assert!(payload.get("data").is_none(), "denial must not leak records");

    Ok(())
}

#[tokio::test]
async fn regional_scope_filters_list() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let utrecht = create_member(server, Some("Utrecht")).await?;
    let noord_holland = create_member(server, Some("Noord-Holland")).await?;

    let res = client
        .get(format!("{}/api/members", server.base_url))
        .bearer_auth(common::token(&["members_read", "Regio_Utrecht"]))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<Value>().await?;
    let data = payload["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(payload["metadata"]["region"], "Utrecht");
    assert_eq!(
        payload["metadata"]["total_count"].as_u64().unwrap() as usize,
        data.len()
    );

    for record in &data {
        assert_eq!(record["region"], "Utrecht", "out-of-scope record leaked");
    }
    let ids: Vec<&str> = data.iter().filter_map(|r| r["id"].as_str()).collect();
    assert!(ids.contains(&utrecht["id"].as_str().unwrap()));
    assert!(!ids.contains(&noord_holland["id"].as_str().unwrap()));

    Ok(())
}

#[tokio::test]
async fn unrestricted_list_includes_memberless_region() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let regionless = create_member(server, None).await?;

    let res = client
        .get(format!("{}/api/members", server.base_url))
        .bearer_auth(common::token(&["members_read", "Regio_All"]))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<Value>().await?;
    assert_eq!(payload["metadata"]["region"], "all");
    let data = payload["data"].as_array().cloned().unwrap_or_default();
    let ids: Vec<&str> = data.iter().filter_map(|r| r["id"].as_str()).collect();
    assert!(ids.contains(&regionless["id"].as_str().unwrap()));

    Ok(())
}

#[tokio::test]
async fn capability_without_regional_role_sees_nothing() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    create_member(server, Some("Utrecht")).await?;

    let res = client
        .get(format!("{}/api/members", server.base_url))
        .bearer_auth(common::token(&["members_read"]))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let payload = res.json::<Value>().await?;
    assert_eq!(payload["metadata"]["region"], "none");
    assert_eq!(payload["metadata"]["total_count"], 0);
    assert!(payload["data"].as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn out_of_scope_member_answers_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let zuid = create_member(server, Some("Zuid")).await?;
    let id = zuid["id"].as_str().unwrap();

    let res = client
        .get(format!("{}/api/members/{}", server.base_url, id))
        .bearer_auth(common::token(&["members_read", "Regio_Utrecht"]))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn patch_overwrites_only_provided_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let created = create_member(server, Some("Oost")).await?;
    let id = created["id"].as_str().unwrap();

    let res = client
        .patch(format!("{}/api/members/{}", server.base_url, id))
        .bearer_auth(common::token(&["members_write", "Regio_All"]))
        .json(&json!({ "city": "Zwolle", "status": "suspended" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let updated = res.json::<Value>().await?;
    assert_eq!(updated["city"], "Zwolle");
    assert_eq!(updated["status"], "suspended");
    // Unspecified fields untouched
    assert_eq!(updated["first_name"], created["first_name"]);
    assert_eq!(updated["region"], created["region"]);
    assert_eq!(updated["created_at"], created["created_at"]);

    Ok(())
}

#[tokio::test]
async fn null_region_patch_clears_it() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let created = create_member(server, Some("Utrecht")).await?;
    let id = created["id"].as_str().unwrap();
    let admin = common::token(&["admin", "Regio_All"]);

    let res = client
        .patch(format!("{}/api/members/{}", server.base_url, id))
        .bearer_auth(&admin)
        .json(&json!({ "region": null }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let updated = res.json::<Value>().await?;
    assert!(updated["region"].is_null(), "null patch must clear region");

    // And it sticks on a fresh read.
    let res = client
        .get(format!("{}/api/members/{}", server.base_url, id))
        .bearer_auth(&admin)
        .send()
        .await?;
    assert!(res.json::<Value>().await?["region"].is_null());

    Ok(())
}

#[tokio::test]
async fn scoped_writer_cannot_create_outside_scope() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/members", server.base_url))
        .bearer_auth(common::token(&["members_write", "Regio_Utrecht"]))
        .json(&json!({
            "first_name": "Piet",
            "last_name": "Jansen",
            "membership_type": "full",
            "region": "Zuid"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>().await?["code"], "FORBIDDEN");

    Ok(())
}

#[tokio::test]
async fn scoped_writer_cannot_move_member_out_of_scope() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let created = create_member(server, Some("Utrecht")).await?;
    let id = created["id"].as_str().unwrap();

    let res = client
        .patch(format!("{}/api/members/{}", server.base_url, id))
        .bearer_auth(common::token(&["members_write", "Regio_Utrecht"]))
        .json(&json!({ "region": "Zuid" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The member is unchanged.
    let res = client
        .get(format!("{}/api/members/{}", server.base_url, id))
        .bearer_auth(common::token(&["admin", "Regio_All"]))
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?["region"], "Utrecht");

    Ok(())
}

#[tokio::test]
async fn delete_is_hard_and_final() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let created = create_member(server, Some("Noord")).await?;
    let id = created["id"].as_str().unwrap();
    let admin = common::token(&["admin", "Regio_All"]);

    let res = client
        .delete(format!("{}/api/members/{}", server.base_url, id))
        .bearer_auth(&admin)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/members/{}", server.base_url, id))
        .bearer_auth(&admin)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
