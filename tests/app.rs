use axum::Router;
use mailroom::{
    app::AppState,
    db::{self, migrations},
    http,
};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

async fn start_server() -> (String, JoinHandle<()>) {
    let pool = db::connect(db::MEMORY, 1)
        .await
        .expect("connect memory sqlite");
    migrations::run_migrations(&pool).await.expect("migrate");
    let state = AppState { db: pool };
    let app: Router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), handle)
}

fn email_payload(subject: &str, body: &str) -> Value {
    json!({
        "sender_name": "Dev",
        "sender_email": "dev@example.test",
        "recipient_name": "You",
        "recipient_email": "you@example.test",
        "subject": subject,
        "body": body,
    })
}

async fn create(client: &reqwest::Client, base: &str, payload: &Value) -> Value {
    let res = client
        .post(format!("{}/emails", base))
        .json(payload)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn list_ids(client: &reqwest::Client, base: &str, tab: Option<&str>) -> Vec<i64> {
    let url = match tab {
        Some(t) => format!("{}/emails?tab={}", base, t),
        None => format!("{}/emails", base),
    };
    let res = client.get(url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let v: Value = res.json().await.unwrap();
    v["emails"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn create_returns_full_email_with_preview() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let body = "z".repeat(150);
    let mut payload = email_payload("Long one", &body);
    payload["attachment_name"] = json!("report.pdf");
    payload["attachment_size"] = json!("1.5 MB");
    let created = create(&client, &base, &payload).await;

    assert_eq!(created["preview"], json!(format!("{}...", "z".repeat(100))));
    assert_eq!(created["is_read"], json!(true));
    assert_eq!(created["is_archived"], json!(false));
    assert_eq!(created["attachment_size"], json!("1.5 MB"));
    assert!(created["created_at"].is_string());

    let id = created["id"].as_i64().unwrap();
    let res = client
        .get(format!("{}/emails/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn default_list_shows_seeded_inbox_newest_first() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/emails", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let v: Value = res.json().await.unwrap();
    let emails = v["emails"].as_array().unwrap();
    assert_eq!(emails.len(), 4);
    assert_eq!(emails[0]["sender_name"], json!("Jane Doe"));
    assert_eq!(emails[3]["sender_name"], json!("Downe Johnson"));

    // Two seeded emails are unread.
    assert_eq!(list_ids(&client, &base, Some("unread")).await.len(), 2);
    assert!(list_ids(&client, &base, Some("archive")).await.is_empty());
}

#[tokio::test]
async fn mark_unread_then_archive_moves_between_tabs() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let created = create(&client, &base, &email_payload("Tabs", "hello")).await;
    let id = created["id"].as_i64().unwrap();
    assert!(!list_ids(&client, &base, Some("unread")).await.contains(&id));

    let res = client
        .put(format!("{}/emails/{}", base, id))
        .json(&json!({ "is_read": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["is_read"], json!(false));
    assert!(list_ids(&client, &base, Some("unread")).await.contains(&id));

    let res = client
        .put(format!("{}/emails/{}", base, id))
        .json(&json!({ "is_archived": true }))
        .send()
        .await
        .unwrap();
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["is_archived"], json!(true));
    assert_eq!(updated["is_read"], json!(false));

    assert!(!list_ids(&client, &base, None).await.contains(&id));
    assert!(!list_ids(&client, &base, Some("unread")).await.contains(&id));
    assert_eq!(list_ids(&client, &base, Some("archive")).await, vec![id]);
}

#[tokio::test]
async fn empty_update_returns_unchanged_email() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let created = create(&client, &base, &email_payload("Same", "body")).await;
    let res = client
        .put(format!("{}/emails/{}", base, created["id"]))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let v: Value = res.json().await.unwrap();
    assert_eq!(v, created);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let created = create(&client, &base, &email_payload("Bye", "body")).await;
    let url = format!("{}/emails/{}", base, created["id"]);

    let res = client.delete(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await.unwrap().is_empty());

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let v: Value = res.json().await.unwrap();
    assert_eq!(v["detail"], json!("Email not found"));
}

#[tokio::test]
async fn unknown_id_is_404_for_every_operation() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();
    let url = format!("{}/emails/424242", base);

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .put(&url)
        .json(&json!({ "is_read": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_with_missing_field_is_rejected() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/emails", base))
        .json(&json!({ "subject": "no sender" }))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_client_error());
    assert_eq!(list_ids(&client, &base, None).await.len(), 4);
}

#[tokio::test]
async fn health_and_items() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let v: Value = res.json().await.unwrap();
    assert_eq!(v["status"], json!("ok"));

    let res = client.get(format!("{}/items", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let v: Value = res.json().await.unwrap();
    let names: Vec<&str> = v["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Apple", "Banana", "Cherry"]);

    let res = client.get(format!("{}/items/1", base)).send().await.unwrap();
    let v: Value = res.json().await.unwrap();
    assert_eq!(v["name"], json!("Apple"));

    let res = client.get(format!("{}/items/99", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();
    let origin = "http://localhost:3000";

    let res = client
        .request(reqwest::Method::OPTIONS, format!("{}/emails/1", base))
        .header("Origin", origin)
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    assert!(res.headers().contains_key("access-control-allow-origin"));
    let methods = res.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(methods.contains("PUT") || methods == "*");

    let res = client
        .get(format!("{}/emails", base))
        .header("Origin", origin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("access-control-allow-origin"));
}
