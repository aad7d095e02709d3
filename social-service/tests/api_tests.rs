mod common;

use auth::Claims;
use auth::JwtHandler;
use auth::SigningConfig;
use auth::TokenType;
use chrono::Duration;
use chrono::Utc;
use common::StubImageGenerator;
use common::TestApp;
use common::GENERATED_IMAGE_URL;
use common::JWT_SECRET;
use reqwest::StatusCode;
use serde_json::json;
use social_service::domain::post::models::PostId;

const INVALID_CREDENTIALS: &str = "Could not validate credentials";

async fn json_body(response: reqwest::Response) -> serde_json::Value {
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_register_user_success() {
    let app = TestApp::spawn().await;

    let response = app.register("nicola@example.com", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["user"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["user"]["confirmed"], false);
    assert!(body["data"]["user"]["id"].is_string());
    assert!(body["data"]["user"].get("password_hash").is_none());

    let stored = app.users.get("nicola@example.com").unwrap();
    assert!(stored.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_register_sends_confirmation_email() {
    let app = TestApp::spawn().await;

    app.register("nicola@example.com", "pass_word!").await;

    let emails = app.wait_for_emails(1).await;
    assert_eq!(emails[0].to.as_str(), "nicola@example.com");
    assert_eq!(emails[0].subject, "Successfully signed up");
    assert!(emails[0]
        .body
        .contains(&format!("{}/api/confirm/", app.address)));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("nicola@example.com", "pass_word!").await;
    let response = app.register("nicola@example.com", "other_pass").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = json_body(response).await;
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app.register("not-an-email", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_empty_password() {
    let app = TestApp::spawn().await;

    let response = app.register("nicola@example.com", "").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.users.get("nicola@example.com").is_none());
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;

    let response = app.login("nicola@example.com", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["token_type"], "bearer");

    let token = body["data"]["access_token"].as_str().unwrap();
    assert_eq!(
        app.authenticator.resolve_subject(token, TokenType::Access),
        Ok("nicola@example.com".to_string())
    );
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("known@example.com", "correct-password").await;

    let unknown = app.login("unknown@example.com", "anything").await;
    let wrong = app.login("known@example.com", "wrong-password").await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        unknown.headers().get("www-authenticate").unwrap(),
        wrong.headers().get("www-authenticate").unwrap()
    );

    let unknown = json_body(unknown).await;
    let wrong = json_body(wrong).await;
    assert_eq!(unknown, wrong);
    assert_eq!(unknown["data"]["message"], INVALID_CREDENTIALS);
}

#[tokio::test]
async fn test_login_allowed_before_confirmation() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;

    let response = app.login("nicola@example.com", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!app.users.get("nicola@example.com").unwrap().confirmed);
}

#[tokio::test]
async fn test_confirm_email() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;
    let token = app
        .authenticator
        .create_confirmation_token("nicola@example.com")
        .unwrap();

    let response = app
        .get(&format!("/api/confirm/{}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["detail"], "User confirmed");
    assert!(app.users.get("nicola@example.com").unwrap().confirmed);
}

#[tokio::test]
async fn test_confirm_email_rejects_access_token() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for("nicola@example.com", "pass_word!").await;

    let response = app
        .get(&format!("/api/confirm/{}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!app.users.get("nicola@example.com").unwrap().confirmed);
}

#[tokio::test]
async fn test_confirm_email_expired_token() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;
    let token = app
        .authenticator
        .issue_token_at(
            "nicola@example.com",
            TokenType::Confirmation,
            Utc::now() - Duration::minutes(1441),
        )
        .unwrap();

    let response = app
        .get(&format!("/api/confirm/{}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for("nicola@example.com", "pass_word!").await;

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["email"], "nicola@example.com");
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers().get("www-authenticate").unwrap(), "Bearer");

    let body = json_body(response).await;
    assert_eq!(body["data"]["message"], INVALID_CREDENTIALS);
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/users/me", "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_rejects_confirmation_token() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;
    let token = app
        .authenticator
        .create_confirmation_token("nicola@example.com")
        .unwrap();

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_rejects_expired_token() {
    let app = TestApp::spawn().await;
    app.register("nicola@example.com", "pass_word!").await;
    let token = app
        .authenticator
        .issue_token_at(
            "nicola@example.com",
            TokenType::Access,
            Utc::now() - Duration::minutes(31),
        )
        .unwrap();

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_rejects_token_without_subject() {
    let app = TestApp::spawn().await;
    let claims =
        Claims::issue("nicola@example.com", TokenType::Access, Utc::now()).without_subject();
    let handler = JwtHandler::new(&SigningConfig::new(JWT_SECRET, "HS256").unwrap());
    let token = handler.encode(&claims).unwrap();

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_after_user_removed() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for("nicola@example.com", "pass_word!").await;
    app.users.remove("nicola@example.com");

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_get_post() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for("nicola@example.com", "pass_word!").await;

    let response = app
        .post_authenticated("/api/posts", &token)
        .json(&json!({ "body": "My first post" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let created = json_body(response).await;
    let post_id = created["data"]["id"].as_str().unwrap();
    let user = app.users.get("nicola@example.com").unwrap();
    assert_eq!(created["data"]["user_id"], user.id.to_string());
    assert!(created["data"]["image_url"].is_null());

    let response = app
        .get(&format!("/api/posts/{}", post_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let detail = json_body(response).await;
    assert_eq!(detail["data"]["post"]["body"], "My first post");
    assert_eq!(detail["data"]["post"]["likes"], 0);
    assert_eq!(detail["data"]["comments"], json!([]));
}

#[tokio::test]
async fn test_create_post_requires_authentication() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/posts")
        .json(&json!({ "body": "Anonymous post" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_empty_body() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for("nicola@example.com", "pass_word!").await;

    let response = app
        .post_authenticated("/api/posts", &token)
        .json(&json!({ "body": "  " }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_post_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .get(&format!("/api/posts/{}", PostId::new()))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comments_flow() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for("nicola@example.com", "pass_word!").await;
    let post_id = app.create_post(&token, "Post with comments").await;

    let response = app
        .post_authenticated("/api/comments", &token)
        .json(&json!({ "body": "Nice post", "post_id": post_id }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .get(&format!("/api/posts/{}/comments", post_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let comments = json_body(response).await;
    assert_eq!(comments["data"].as_array().unwrap().len(), 1);
    assert_eq!(comments["data"][0]["body"], "Nice post");
    assert_eq!(comments["data"][0]["post_id"], post_id);
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for("nicola@example.com", "pass_word!").await;

    let response = app
        .post_authenticated("/api/comments", &token)
        .json(&json!({ "body": "Hello?", "post_id": PostId::new().to_string() }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_like_post_once() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for("nicola@example.com", "pass_word!").await;
    let post_id = app.create_post(&token, "Likeable post").await;

    let first = app
        .post_authenticated("/api/likes", &token)
        .json(&json!({ "post_id": post_id }))
        .send()
        .await
        .expect("Failed to execute request");
    let second = app
        .post_authenticated("/api/likes", &token)
        .json(&json!({ "post_id": post_id }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let detail = json_body(
        app.get(&format!("/api/posts/{}", post_id))
            .send()
            .await
            .expect("Failed to execute request"),
    )
    .await;
    assert_eq!(detail["data"]["post"]["likes"], 1);
}

#[tokio::test]
async fn test_list_posts_sorting() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for("nicola@example.com", "pass_word!").await;
    let other = app.access_token_for("other@example.com", "pass_word!").await;
    let older = app.create_post(&token, "Older post").await;
    let newer = app.create_post(&token, "Newer post").await;

    for liker in [&token, &other] {
        app.post_authenticated("/api/likes", liker)
            .json(&json!({ "post_id": older }))
            .send()
            .await
            .expect("Failed to execute request");
    }

    let ids = |body: serde_json::Value| -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap().to_string())
            .collect()
    };

    let default = json_body(app.get("/api/posts").send().await.unwrap()).await;
    assert_eq!(ids(default), vec![newer.clone(), older.clone()]);

    let old = json_body(app.get("/api/posts?sorting=old").send().await.unwrap()).await;
    assert_eq!(ids(old), vec![older.clone(), newer.clone()]);

    let most_likes = json_body(
        app.get("/api/posts?sorting=most_likes")
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(most_likes["data"][0]["likes"], 2);
    assert_eq!(ids(most_likes), vec![older, newer]);
}

#[tokio::test]
async fn test_list_posts_invalid_sorting() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/posts?sorting=popular")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_post_with_prompt_attaches_image() {
    let app = TestApp::spawn().await;
    let token = app.access_token_for("nicola@example.com", "pass_word!").await;
    // Registration email
    app.wait_for_emails(1).await;

    let created = json_body(
        app.post_authenticated("/api/posts?prompt=A%20blue%20cat", &token)
            .json(&json!({ "body": "Post with image" }))
            .send()
            .await
            .expect("Failed to execute request"),
    )
    .await;
    let post_id = PostId::from_string(created["data"]["id"].as_str().unwrap()).unwrap();

    let emails = app.wait_for_emails(2).await;
    assert_eq!(emails[1].subject, "Image generated successfully");
    assert_eq!(app.posts.image_url(post_id).as_deref(), Some(GENERATED_IMAGE_URL));
}

#[tokio::test]
async fn test_create_post_with_prompt_generation_failure() {
    let app = TestApp::spawn_with_generator(StubImageGenerator::failing()).await;
    let token = app.access_token_for("nicola@example.com", "pass_word!").await;
    app.wait_for_emails(1).await;

    let created = json_body(
        app.post_authenticated("/api/posts?prompt=A%20blue%20cat", &token)
            .json(&json!({ "body": "Post without image" }))
            .send()
            .await
            .expect("Failed to execute request"),
    )
    .await;
    let post_id = PostId::from_string(created["data"]["id"].as_str().unwrap()).unwrap();

    let emails = app.wait_for_emails(2).await;
    assert_eq!(emails[1].subject, "Failed to generate image");
    assert!(app.posts.image_url(post_id).is_none());
}
