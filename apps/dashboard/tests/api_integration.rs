//! End-to-end API integration tests
//!
//! These tests drive the full router over an in-memory session:
//! - Login, registration and logout
//! - Page gating and login redirects
//! - Project, task and user management

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tasktrove_dashboard::{
    api, config::Config, dashboard::Dashboard, infrastructure::mock_data::Dataset,
    infrastructure::storage::MemoryStorage,
};
use tower::util::ServiceExt; // for oneshot

/// Setup test application over the bundled dataset with no login delay
fn setup_app() -> Router {
    let config = Config {
        login_delay: Duration::ZERO,
        token_secret: "integration-secret".to_string(),
        ..Config::default()
    };
    let dashboard = Dashboard::with_mock_backend(
        Dataset::bundled().expect("bundled dataset"),
        Box::new(MemoryStorage::new()),
        &config,
    );
    api::router(dashboard)
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends one request and returns the status and JSON body (Null when empty)
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request(method, uri, body)).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login_as(app: &Router, email: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": email, "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_anonymous_page_visit_redirects_to_login() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(request("GET", "/tasks?tab=todo", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/auth/login?from=%2Ftasks%3Ftab%3Dtodo"
    );

    // The login form hands the decoded origin back
    let (status, body) = send(&app, "GET", "/auth/login?from=%2Ftasks%3Ftab%3Dtodo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["from"], "/tasks?tab=todo");

    let (_, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({
            "email": "john@example.com",
            "password": "password123",
            "from": "/tasks?tab=todo"
        })),
    )
    .await;
    assert_eq!(body["redirectTo"], "/tasks?tab=todo");
}

#[tokio::test]
async fn test_bad_query_does_not_bypass_routing() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(request("GET", "/dashboard?tab=bogus", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (status, _) = send(&app, "GET", "/nope?tab=x", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    login_as(&app, "john@example.com").await;
    let (status, body) = send(&app, "GET", "/tasks?tab=bogus", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tab"], "all");
}

#[tokio::test]
async fn test_root_forwards_to_dashboard() {
    let app = setup_app();

    let response = app.oneshot(request("GET", "/", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let app = setup_app();

    let (status, body) = send(&app, "GET", "/reports", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Page not found");
}

#[tokio::test]
async fn test_login_page_is_public() {
    let app = setup_app();

    let (status, body) = send(&app, "GET", "/auth/login", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], "login");
    assert_eq!(body["isLoading"], false);
}

#[tokio::test]
async fn test_login_flow_returns_to_origin() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({
            "email": "JOHN@example.com",
            "password": "password123",
            "from": "/projects"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], "user-1");
    assert_eq!(body["redirectTo"], "/projects");
    assert!(body["token"].as_str().unwrap().len() > 20);

    let (status, session) = send(&app, "GET", "/api/auth/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["isAuthenticated"], true);
    assert_eq!(session["user"]["email"], "john@example.com");
    assert_eq!(session["token"], body["token"]);
}

#[tokio::test]
async fn test_login_with_unknown_email_fails() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "nobody@example.com", "password": "password123"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");

    let (_, session) = send(&app, "GET", "/api/auth/session", None).await;
    assert_eq!(session["isAuthenticated"], false);
    assert_eq!(session["error"], "Invalid email or password");

    let (status, _) = send(&app, "DELETE", "/api/auth/error", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, session) = send(&app, "GET", "/api/auth/session", None).await;
    assert_eq!(session["error"], Value::Null);
}

#[tokio::test]
async fn test_login_validation_never_reaches_store() {
    let app = setup_app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "john@example.com", "password": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "not-an-email", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, session) = send(&app, "GET", "/api/auth/session", None).await;
    assert_eq!(session["error"], Value::Null);
}

#[tokio::test]
async fn test_register_then_duplicate_is_rejected() {
    let app = setup_app();
    let payload = json!({
        "name": "Test User",
        "email": "newcomer@example.com",
        "password": "password123",
        "confirmPassword": "password123"
    });

    let (status, body) = send(&app, "POST", "/api/auth/register", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["role"], "Employee");
    assert_eq!(body["redirectTo"], "/dashboard");

    let (_, users) = send(&app, "GET", "/settings", None).await;
    assert_eq!(users["profile"]["email"], "newcomer@example.com");

    send(&app, "POST", "/api/auth/logout", None).await;

    let (status, body) = send(&app, "POST", "/api/auth/register", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already in use");
}

#[tokio::test]
async fn test_register_with_short_password_fails() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({
            "name": "Test User",
            "email": "short@example.com",
            "password": "short"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 8 characters");
}

#[tokio::test]
async fn test_register_with_mismatched_confirmation_fails() {
    let app = setup_app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({
            "name": "Test User",
            "email": "mismatch@example.com",
            "password": "password123",
            "confirmPassword": "password124"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = setup_app();
    login_as(&app, "jane@example.com").await;

    let (status, _) = send(&app, "POST", "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, session) = send(&app, "GET", "/api/auth/session", None).await;
    assert_eq!(session["isAuthenticated"], false);
    assert_eq!(session["user"], Value::Null);

    let response = app
        .clone()
        .oneshot(request("GET", "/dashboard", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let app = setup_app();
    login_as(&app, "mike@example.com").await;

    let (status, body) = send(&app, "GET", "/dashboard", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalProjects"], 3);
    assert_eq!(body["totalTasks"], 5);
    assert_eq!(body["completionPercent"], 40);
    assert_eq!(body["taskCounts"]["todo"], 2);
}

#[tokio::test]
async fn test_users_page_requires_admin_or_manager() {
    let app = setup_app();

    login_as(&app, "mike@example.com").await;
    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["title"], "Access Denied");
    assert_eq!(body["userRole"], "Employee");
    assert_eq!(body["requiredRoles"], json!(["Admin", "Manager"]));

    login_as(&app, "jane@example.com").await;
    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_project_manager_is_not_manager() {
    let app = setup_app();
    login_as(&app, "david@example.com").await;

    let (status, _) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/users/user-3/role",
        Some(json!({"role": "Manager"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_task_tabs() {
    let app = setup_app();
    login_as(&app, "john@example.com").await;

    let (_, all) = send(&app, "GET", "/tasks", None).await;
    assert_eq!(all["tab"], "all");
    assert_eq!(all["tasks"].as_array().unwrap().len(), 5);

    let (_, done) = send(&app, "GET", "/tasks?tab=completed", None).await;
    assert_eq!(done["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(done["counts"]["inProgress"], 1);
}

#[tokio::test]
async fn test_project_lifecycle() {
    let app = setup_app();

    // Writes need a session
    let (status, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({"name": "X", "description": "Y", "deadline": "2026-12-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    login_as(&app, "john@example.com").await;

    let (status, mut project) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({
            "name": "Analytics",
            "description": "Usage reporting",
            "deadline": "2026-12-01",
            "teamMembers": ["user-1", "user-2", "user-1"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(project["status"], "Planning");
    assert_eq!(project["progress"], 0);
    assert_eq!(project["teamMembers"], json!(["user-1", "user-2"]));
    let id = project["id"].as_str().unwrap().to_string();

    project["progress"] = json!(30);
    project["status"] = json!("In Progress");
    let (status, updated) = send(&app, "PUT", "/api/projects", Some(project)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["progress"], 30);

    let (status, _) = send(&app, "POST", &format!("/api/projects/{}/select", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, page) = send(&app, "GET", "/projects", None).await;
    assert_eq!(page["projects"].as_array().unwrap().len(), 4);
    assert_eq!(page["selected"]["id"], id.as_str());

    let (status, _) = send(&app, "DELETE", &format!("/api/projects/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, page) = send(&app, "GET", "/projects", None).await;
    assert_eq!(page["projects"].as_array().unwrap().len(), 3);
    assert_eq!(page["selected"], Value::Null);

    let (status, _) = send(&app, "DELETE", &format!("/api/projects/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_project_validation() {
    let app = setup_app();
    login_as(&app, "john@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({"name": " ", "description": "Y", "deadline": "2026-12-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({"name": "X", "description": "Y", "progress": 140, "deadline": "2026-12-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, page) = send(&app, "GET", "/projects", None).await;
    assert_eq!(page["projects"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_task_creation_records_creator() {
    let app = setup_app();
    login_as(&app, "jane@example.com").await;

    let (status, task) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({
            "title": "Write release notes",
            "description": "For 2.0",
            "projectId": "project-2",
            "assignedTo": "user-3",
            "dueDate": "2026-11-15"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["createdBy"], "user-2");
    assert_eq!(task["status"], "To Do");
    assert_eq!(task["priority"], "Medium");

    let (_, list) = send(&app, "GET", "/tasks?tab=todo", None).await;
    assert_eq!(list["tasks"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_unknown_task_is_not_found() {
    let app = setup_app();
    login_as(&app, "jane@example.com").await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/tasks",
        Some(json!({
            "id": "task-404",
            "title": "Ghost",
            "description": "",
            "status": "To Do",
            "priority": "Low",
            "projectId": "project-1",
            "assignedTo": "user-1",
            "createdBy": "user-1",
            "dueDate": "2026-11-15"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_task_operations() {
    let app = setup_app();
    login_as(&app, "john@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks/bulk",
        Some(json!({"action": "complete", "ids": ["task-2", "task-5", "task-99"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 2);

    let (_, done) = send(&app, "GET", "/tasks?tab=completed", None).await;
    assert_eq!(done["tasks"].as_array().unwrap().len(), 4);

    let (_, body) = send(
        &app,
        "POST",
        "/api/tasks/bulk",
        Some(json!({"action": "assign", "ids": ["task-1"], "userId": "user-2"})),
    )
    .await;
    assert_eq!(body["affected"], 1);

    let (_, body) = send(
        &app,
        "POST",
        "/api/tasks/bulk",
        Some(json!({"action": "delete", "ids": ["task-1", "task-1"]})),
    )
    .await;
    assert_eq!(body["affected"], 1);

    let (_, all) = send(&app, "GET", "/tasks", None).await;
    assert_eq!(all["tasks"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_role_change_by_manager() {
    let app = setup_app();
    login_as(&app, "jane@example.com").await;

    let (status, user) = send(
        &app,
        "PUT",
        "/api/users/user-3/role",
        Some(json!({"role": "Manager"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["role"], "Manager");

    let (status, _) = send(
        &app,
        "PUT",
        "/api/users/user-404/role",
        Some(json!({"role": "Manager"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_user_stays_on_project_team() {
    let app = setup_app();
    login_as(&app, "john@example.com").await;

    let (status, _) = send(&app, "DELETE", "/api/users/user-3", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, page) = send(&app, "GET", "/projects", None).await;
    let website = page["projects"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == "project-1")
        .unwrap()
        .clone();

    assert_eq!(website["teamMembers"].as_array().unwrap().len(), 3);
    assert_eq!(website["members"].as_array().unwrap().len(), 2);
}
