use axum_test::TestServer;
use http::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{create_test_app_config, register_body, setup_test_app, TEST_PASSWORD};

async fn test_server() -> TestServer {
    let app = setup_test_app(create_test_app_config()).await.unwrap();
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_registration_using_wrong_http_method() {
    let server = test_server().await;

    server
        .get("/api/register")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    server
        .put("/api/register")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    server
        .delete("/api/register")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_registration_with_empty_fields() {
    let server = test_server().await;

    let response = server.post("/api/register").await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "message": "The given data was invalid.",
            "errors": {
                "name": ["The name field is required."],
                "email": ["The email field is required."],
                "password": ["The password field is required."]
            }
        })
    );
}

#[tokio::test]
async fn test_registration_with_empty_json_object() {
    let server = test_server().await;

    let response = server.post("/api/register").json(&json!({})).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    let fields: Vec<&String> = body["errors"].as_object().unwrap().keys().collect();
    assert_eq!(fields.len(), 3);
}

#[tokio::test]
async fn test_registration_without_password_confirmation() {
    let server = test_server().await;

    let response = server
        .post("/api/register")
        .json(&json!({
            "name": "test",
            "email": "test@test.com",
            "password": "password"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["message"], "The given data was invalid.");
    assert_eq!(
        body["errors"],
        json!({ "password": ["The password confirmation does not match."] })
    );
}

#[tokio::test]
async fn test_registration_with_mismatched_confirmation() {
    let server = test_server().await;

    let response = server
        .post("/api/register")
        .json(&json!({
            "name": "test",
            "email": "test@test.com",
            "password": "password",
            "password_confirmation": "passw0rd"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(
        body["errors"]["password"],
        json!(["The password confirmation does not match."])
    );
}

#[tokio::test]
async fn test_registration_with_wrong_email_format() {
    let server = test_server().await;

    let response = server
        .post("/api/register")
        .json(&register_body("test", "test_wrong_email_format"))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "message": "The given data was invalid.",
            "errors": {
                "email": ["The email must be a valid email address."]
            }
        })
    );
}

#[tokio::test]
async fn test_registration_with_too_long_name() {
    let server = test_server().await;

    let response = server
        .post("/api/register")
        .json(&register_body(&"a".repeat(256), "test@test.com"))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(
        body["errors"],
        json!({ "name": ["The name must not be greater than 255 characters."] })
    );
}

#[tokio::test]
async fn test_registration_is_ok() {
    let server = test_server().await;

    let response = server
        .post("/api/register")
        .json(&register_body("test", "test@test.com"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let user = body["user"].as_object().unwrap();

    assert!(user["id"].is_string());
    assert_eq!(user["name"], "test");
    assert_eq!(user["email"], "test@test.com");
    assert!(user["created_at"].is_string());
    assert!(user["updated_at"].is_string());
    assert!(!user.contains_key("password"));
    assert!(!user.contains_key("password_hash"));
}

#[tokio::test]
async fn test_registration_normalizes_email() {
    let server = test_server().await;

    let response = server
        .post("/api/register")
        .json(&register_body("  test  ", "  Test@Test.COM "))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["user"]["name"], "test");
    assert_eq!(body["user"]["email"], "test@test.com");
}

#[tokio::test]
async fn test_registration_of_same_email_twice() {
    let server = test_server().await;

    server
        .post("/api/register")
        .json(&register_body("test", "test@test.com"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/register")
        .json(&register_body("test", "test@test.com"))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "message": "The given data was invalid.",
            "errors": {
                "email": ["The email has already been taken."]
            }
        })
    );
}

#[tokio::test]
async fn test_registration_email_uniqueness_ignores_case() {
    let server = test_server().await;

    server
        .post("/api/register")
        .json(&register_body("test", "test@test.com"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/register")
        .json(&register_body("other", "Test@Test.com"))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(
        body["errors"]["email"],
        json!(["The email has already been taken."])
    );
}

#[tokio::test]
async fn test_taken_email_is_reported_with_other_errors() {
    let server = test_server().await;

    server
        .post("/api/register")
        .json(&register_body("test", "test@test.com"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/register")
        .json(&json!({ "email": "test@test.com" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(
        body["errors"],
        json!({
            "name": ["The name field is required."],
            "email": ["The email has already been taken."],
            "password": ["The password field is required."]
        })
    );
}

#[tokio::test]
async fn test_registration_validation_is_repeatable() {
    let server = test_server().await;
    let invalid = json!({ "name": "", "email": "not-an-email", "password": "x" });

    let first: Value = server.post("/api/register").json(&invalid).await.json();
    let second: Value = server.post("/api/register").json(&invalid).await.json();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_registration_and_login_are_both_ok() {
    let server = test_server().await;

    let register_response = server
        .post("/api/register")
        .json(&register_body("test", "test@test.com"))
        .await;
    register_response.assert_status(StatusCode::CREATED);
    let registered: Value = register_response.json();

    let login_response = server
        .post("/api/login")
        .json(&json!({ "email": "test@test.com", "password": TEST_PASSWORD }))
        .await;
    login_response.assert_status(StatusCode::OK);
    let logged_in: Value = login_response.json();

    assert_eq!(registered["user"], logged_in["user"]);
    assert!(logged_in["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_registration_with_form_body() {
    let server = test_server().await;

    let response = server
        .post("/api/register")
        .form(&[
            ("name", "test"),
            ("email", "test@test.com"),
            ("password", "password"),
            ("password_confirmation", "password"),
        ])
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["user"]["email"], "test@test.com");
}

#[tokio::test]
async fn test_registration_with_malformed_json() {
    let server = test_server().await;

    let response = server
        .post("/api/register")
        .text("{\"name\": \"test\",")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_registration_stores_argon2id_hash_by_default() {
    let mut config = create_test_app_config();
    config.password = Default::default();
    let test_app = common::setup_test_app_with_state(config).await.unwrap();
    let backend = test_app.backend.clone();
    let server = TestServer::new(test_app.router).unwrap();

    server
        .post("/api/register")
        .json(&register_body("test", "test@test.com"))
        .await
        .assert_status(StatusCode::CREATED);

    let stored = backend
        .find_user_by_email("test@test.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$"));
    assert_ne!(stored.password_hash, TEST_PASSWORD);
}

#[tokio::test]
async fn test_registration_with_non_string_fields() {
    let server = test_server().await;

    let response = server
        .post("/api/register")
        .json(&json!({
            "name": "test",
            "email": "test@test.com",
            "password": 12345678,
            "password_confirmation": 12345678
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(
        body["errors"],
        json!({ "password": ["The password must be a string."] })
    );

    let response = server
        .post("/api/register")
        .json(&json!({ "email": 123 }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "message": "The given data was invalid.",
            "errors": {
                "name": ["The name field is required."],
                "email": ["The email must be a valid email address."],
                "password": ["The password field is required."]
            }
        })
    );
}
