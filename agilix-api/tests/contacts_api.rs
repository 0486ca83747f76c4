//! End-to-end tests for the contacts router.

use std::io::Write;
use std::sync::Arc;

use agilix_api::{create_api_router, generate_jwt_token, ApiConfig, ApiError, AuthConfig, ErrorCode, JwtSecret};
use agilix_core::{FixedClock, UserId};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const CSV: &str = "\
first_name,last_name,email,phone,title,agency_name,created_at
Ada,Lovelace,ada@gov.example,555-0001,Director,Analytics Office,2024-01-01
Grace,Hopper,grace@gov.example,,Rear Admiral,Navy,2024-01-02
";

fn auth_config() -> Result<AuthConfig, Box<dyn std::error::Error>> {
    let secret = JwtSecret::new("integration-secret-for-contacts-api".to_string())?;
    Ok(AuthConfig::with_secret(secret, Arc::new(FixedClock::new(1_704_067_200))))
}

fn app(data_dir: &TempDir) -> Result<Router, Box<dyn std::error::Error>> {
    let api_config = ApiConfig {
        data_dir: data_dir.path().to_path_buf(),
        ..ApiConfig::default()
    };
    Ok(create_api_router(&api_config, auth_config()?)?)
}

fn write_csv(dir: &TempDir) -> std::io::Result<()> {
    std::fs::File::create(dir.path().join("contacts.csv"))?.write_all(CSV.as_bytes())
}

fn bearer() -> Result<String, Box<dyn std::error::Error>> {
    let user = UserId::new("user_2abc").ok_or("blank user id")?;
    Ok(format!("Bearer {}", generate_jwt_token(&auth_config()?, &user)?))
}

async fn get(app: Router, uri: &str, auth: Option<String>) -> Result<(StatusCode, Vec<u8>), Box<dyn std::error::Error>> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = auth {
        builder = builder.header("authorization", value);
    }
    let response = app.oneshot(builder.body(Body::empty())?).await?;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, body.to_vec()))
}

#[tokio::test]
async fn test_contacts_are_served_in_header_order() -> TestResult {
    let dir = TempDir::new()?;
    write_csv(&dir)?;

    let (status, body) = get(app(&dir)?, "/api/contacts", Some(bearer()?)).await?;
    assert_eq!(status, StatusCode::OK);

    let raw = String::from_utf8(body.clone())?;
    let first_name = raw.find("\"first_name\"").ok_or("first_name missing")?;
    let email = raw.find("\"email\"").ok_or("email missing")?;
    assert!(first_name < email);

    let rows: Vec<serde_json::Map<String, Value>> = serde_json::from_slice(&body)?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["email"], "ada@gov.example");
    assert_eq!(rows[1]["phone"], "");
    Ok(())
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() -> TestResult {
    let dir = TempDir::new()?;
    write_csv(&dir)?;

    let (status, body) = get(app(&dir)?, "/api/contacts", None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let error: ApiError = serde_json::from_slice(&body)?;
    assert_eq!(error.code, ErrorCode::Unauthorized);
    Ok(())
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() -> TestResult {
    let dir = TempDir::new()?;
    write_csv(&dir)?;

    let other = AuthConfig::with_secret(
        JwtSecret::new("some-other-secret-entirely-different".to_string())?,
        Arc::new(FixedClock::new(1_704_067_200)),
    );
    let user = UserId::new("user_2abc").ok_or("blank user id")?;
    let token = generate_jwt_token(&other, &user)?;

    let (status, _) = get(app(&dir)?, "/api/contacts", Some(format!("Bearer {}", token))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_missing_csv_is_internal_error() -> TestResult {
    let dir = TempDir::new()?;

    let (status, body) = get(app(&dir)?, "/api/contacts", Some(bearer()?)).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let error: ApiError = serde_json::from_slice(&body)?;
    assert_eq!(error.code, ErrorCode::InternalError);
    assert_eq!(error.message, "Failed to fetch contacts");
    Ok(())
}

#[tokio::test]
async fn test_public_routes_need_no_token() -> TestResult {
    let dir = TempDir::new()?;

    let (status, body) = get(app(&dir)?, "/health/ping", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"pong");

    let (status, body) = get(app(&dir)?, "/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_slice(&body)?;
    assert!(doc["paths"]["/api/contacts"].is_object());
    Ok(())
}
