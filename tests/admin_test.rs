//! Admin session and admin panel integration tests

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;
use serial_test::serial;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::Mock;
use RetailChampions::admin::AdminPanel;
use RetailChampions::api::ListQuery;
use RetailChampions::middleware::{DenyReason, GuardDecision, RouteGuard};
use RetailChampions::storage::{LocalStorage, TOKEN_KEY};
use RetailChampions::RetailChampionsError;

fn logged_out() -> TestConfig {
    TestConfig {
        admin_session: false,
        ..TestConfig::default()
    }
}

#[tokio::test]
#[serial]
async fn test_login_persists_session_and_guard_allows() {
    let ctx = TestContext::new_with_config(logged_out()).await;
    assert_matches!(
        ctx.services.guard.check_admin(),
        GuardDecision::RedirectToLogin(DenyReason::MissingToken)
    );

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "admin@example.com", "password": "secret123"})))
        .respond_with(ok_response(json!({
            "token": "fresh-token",
            "user": {"_id": "a1", "name": "Priya", "email": "admin@example.com", "role": "admin"},
        })))
        .expect(1)
        .mount(&ctx.api.server)
        .await;

    let user = ctx
        .services
        .auth_service
        .login("admin@example.com", "secret123")
        .await
        .unwrap();
    assert!(user.is_admin());
    assert!(ctx.services.guard.check_admin().is_allowed());

    // A fresh client over the same file sees the session
    let reopened = LocalStorage::open(&ctx.settings.storage.path).unwrap();
    assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("fresh-token"));
    assert!(RouteGuard::new(reopened).require_admin().is_ok());

    ctx.services.auth_service.logout().unwrap();
    assert!(!ctx.services.guard.check_admin().is_allowed());
}

#[tokio::test]
#[serial]
async fn test_bad_login_is_validated_locally() {
    let ctx = TestContext::new_with_config(logged_out()).await;
    ctx.api
        .mount("POST", "auth/login", ok_response(json!({})), None, Some(0))
        .await;

    let error = ctx
        .services
        .auth_service
        .login("not-an-email", "123")
        .await
        .unwrap_err();
    let fields = error.field_errors().unwrap();
    assert!(fields.contains("email"));
    assert!(fields.contains("password"));
}

#[tokio::test]
#[serial]
async fn test_rejected_credentials_are_unauthorized() {
    let ctx = TestContext::new_with_config(logged_out()).await;
    ctx.api
        .mount(
            "POST",
            "auth/login",
            error_response(401, "Invalid credentials", json!([])),
            None,
            Some(1),
        )
        .await;

    let error = ctx
        .services
        .auth_service
        .login("admin@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert_matches!(error, RetailChampionsError::Unauthorized(_));
    assert!(ctx.storage.get(TOKEN_KEY).is_none());
}

#[tokio::test]
#[serial]
async fn test_admin_requests_carry_bearer_token() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(ok_response(paged(
            "users",
            json!([registrant("u1", "Ravi", "9876543210")]),
            1,
        )))
        .expect(1)
        .mount(&ctx.api.server)
        .await;

    let mut panel = AdminPanel::new(ctx.services.user_service.clone());
    let page = panel.refresh().await.unwrap();
    assert_eq!(page.len(), 1);
    assert!(panel.render().contains("Ravi"));
}

#[tokio::test]
#[serial]
async fn test_bulk_delete_with_wrong_confirmation_sends_nothing() {
    let ctx = TestContext::new().await;
    ctx.api
        .mount("DELETE", "users/delete-all", message_response("deleted"), None, Some(0))
        .await;
    ctx.api
        .mount("DELETE", "lottery/history", message_response("deleted"), None, Some(0))
        .await;

    let mut users = AdminPanel::new(ctx.services.user_service.clone());
    for attempt in ["delete", "Delete", "DELETE!", ""] {
        assert_matches!(
            users.bulk_delete(attempt).await,
            Err(RetailChampionsError::ConfirmationRequired)
        );
    }

    let mut history = AdminPanel::new(ctx.services.lottery_service.clone());
    assert_matches!(
        history.bulk_delete("yes").await,
        Err(RetailChampionsError::ConfirmationRequired)
    );
}

#[tokio::test]
#[serial]
async fn test_bulk_delete_with_exact_confirmation_refetches() {
    let ctx = TestContext::new().await;
    ctx.api
        .mount(
            "DELETE",
            "users/delete-all",
            message_response("All users deleted"),
            None,
            Some(1),
        )
        .await;
    ctx.api
        .mount("GET", "users", ok_response(paged("users", json!([]), 0)), None, Some(1))
        .await;

    let mut panel = AdminPanel::new(ctx.services.user_service.clone());
    let message = panel.bulk_delete("DELETE").await.unwrap();
    assert_eq!(message.as_deref(), Some("All users deleted"));
    assert!(panel.page().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_row_delete_refetches_page() {
    let ctx = TestContext::new().await;
    ctx.api
        .mount(
            "GET",
            "users",
            ok_response(paged(
                "users",
                json!([registrant("u1", "Ravi", "9876543210"), registrant("u2", "Sita", "9123456780")]),
                2,
            )),
            Some(1),
            None,
        )
        .await;
    ctx.api
        .mount(
            "GET",
            "users",
            ok_response(paged("users", json!([registrant("u2", "Sita", "9123456780")]), 1)),
            None,
            Some(1),
        )
        .await;
    ctx.api
        .mount("DELETE", "users/u1", message_response("User deleted"), None, Some(1))
        .await;

    let mut panel = AdminPanel::new(ctx.services.user_service.clone());
    panel.refresh().await.unwrap();
    assert!(panel.find("u1").is_some());

    panel.delete("u1").await.unwrap();
    assert!(panel.find("u1").is_none());
    assert_eq!(panel.page().unwrap().pagination.total, 1);
}

#[tokio::test]
#[serial]
async fn test_list_query_is_sent_as_parameters() {
    let ctx = TestContext::new().await;
    ctx.api
        .ok("GET", "lottery/history", paged("lotteries", json!([]), 0))
        .await;

    let query = ListQuery::new().page(3).limit(5).search("diwali");
    let mut panel = AdminPanel::with_query(ctx.services.lottery_service.clone(), query);
    panel.refresh().await.unwrap();

    let requests = ctx.api.requests_to("GET", "lottery/history").await;
    let params: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(params.contains(&("page".to_string(), "3".to_string())));
    assert!(params.contains(&("limit".to_string(), "5".to_string())));
    assert!(params.contains(&("search".to_string(), "diwali".to_string())));
}

#[tokio::test]
#[serial]
async fn test_users_export_writes_csv() {
    let ctx = TestContext::new().await;
    ctx.api
        .ok(
            "GET",
            "users",
            paged(
                "users",
                json!([
                    registrant("u1", "Ravi \"RK\" Kumar", "9876543210"),
                    registrant("u2", "Sita", "9123456780"),
                ]),
                2,
            ),
        )
        .await;

    let page = ctx
        .services
        .user_service
        .list(&ListQuery::all())
        .await
        .unwrap();
    let path = RetailChampions::export::write_csv(&ctx.settings.export.output_dir, "users", &page.items)
        .await
        .unwrap();

    let csv = std::fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("\"Name\",\"Phone Number\""));
    assert!(lines[1].starts_with("\"Ravi \"\"RK\"\" Kumar\""));

    let requests = ctx.api.requests_to("GET", "users").await;
    assert_eq!(requests[0].url.query(), Some("page=1&all=true"));
}
