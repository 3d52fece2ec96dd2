mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn root_reports_liveness_without_touching_the_database() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::request(&app, "GET", "/", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["message"], "KPA Form Data API is running");
    Ok(())
}

#[tokio::test]
async fn health_reports_database_reachability() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::request(&app, "GET", "/health", None).await?;

    // OK when a database is reachable, SERVICE_UNAVAILABLE when it is not.
    // Either way the endpoint must answer with a status payload.
    assert!(
        status == StatusCode::OK || status == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected health status: {}",
        status
    );
    assert!(body["status"].is_string());
    assert!(body["database"].is_string());
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> Result<()> {
    let app = common::test_app();

    let (status, _) = common::request(&app, "GET", "/api/v1/nope", None).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
