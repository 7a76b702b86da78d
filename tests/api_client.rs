mod support;

use rstest::rstest;
use serde_json::{Value, json};
use splinx_admin::backend::api::{ApiError, EmailDraft, PushDraft, Record, ResourceKind, User};
use splinx_admin::backend::services::{LoginPayload, SessionPhase, auth};
use splinx_admin::backend::services::storage::{DurableStorage, TOKEN_KEY, USER_ID_KEY};
use splinx_admin::backend::utils::config::UnauthorizedPolicy;
use support::{Canned, StubServer, admin_json, memory_store};

fn signed_in(store: &splinx_admin::backend::services::SessionStore, role: &str) {
    let user: User = serde_json::from_value(admin_json("a1", role)).expect("user parses");
    store.handle_login(LoginPayload::new("tok-1".to_string(), user));
}

#[tokio::test]
async fn requests_carry_bearer_token_and_json_content_type() {
    let server = StubServer::start().await;
    server.respond("POST", "/promo", Canned::json(201, json!({ "success": true })));
    let (store, _) = memory_store();
    signed_in(&store, "admin");
    let client = server.client(&store, UnauthorizedPolicy::Ignore);

    client
        .create(ResourceKind::Promos, &json!({ "code": "SPRING", "discount": 10 }))
        .await
        .expect("create succeeds");

    let request = &server.requests_to("/promo")[0];
    assert_eq!(request.header("authorization"), Some("Bearer tok-1"));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.json(), json!({ "code": "SPRING", "discount": 10 }));
}

#[tokio::test]
async fn anonymous_requests_omit_authorization() {
    let server = StubServer::start().await;
    server.respond("GET", "/event", Canned::json(200, json!([])));
    let (store, _) = memory_store();
    let client = server.client(&store, UnauthorizedPolicy::Ignore);

    let _: Value = client.get_json("/event").await.expect("get succeeds");

    assert_eq!(server.requests_to("/event")[0].header("authorization"), None);
}

#[rstest]
#[case::server_message(json!({ "message": "Event not found" }), 404, "Event not found")]
#[case::error_key(json!({ "error": "Plan is in use" }), 409, "Plan is in use")]
#[case::no_message(json!({}), 500, "Server error (500)")]
#[tokio::test]
async fn failure_bodies_become_messages(
    #[case] body: Value,
    #[case] status: u16,
    #[case] expected: &str,
) {
    let server = StubServer::start().await;
    server.respond("DELETE", "/event/e1", Canned::json(status, body));
    let (store, _) = memory_store();
    let client = server.client(&store, UnauthorizedPolicy::Ignore);
    let record = Record::from_value(json!({ "_id": "e1" }));

    let err = client
        .delete_record(ResourceKind::Events, &record)
        .await
        .expect_err("delete fails");

    assert_eq!(err.status(), Some(status));
    assert_eq!(err.to_string(), expected);
}

#[tokio::test]
async fn unauthorized_ends_session_when_configured() {
    let server = StubServer::start().await;
    server.respond("GET", "/advert", Canned::json(401, json!({ "message": "Token expired" })));
    let (store, storage) = memory_store();
    signed_in(&store, "admin");
    let client = server.client(&store, UnauthorizedPolicy::EndSession);

    let err = client.list(ResourceKind::Adverts).await.expect_err("list fails");

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert!(!store.snapshot().is_authenticated());
    assert_eq!(storage.get(TOKEN_KEY).expect("read"), None);
}

#[tokio::test]
async fn unauthorized_keeps_session_by_default() {
    let server = StubServer::start().await;
    server.respond("GET", "/advert", Canned::json(401, json!({ "message": "Token expired" })));
    let (store, _) = memory_store();
    signed_in(&store, "admin");
    let client = server.client(&store, UnauthorizedPolicy::Ignore);

    let err = client.list(ResourceKind::Adverts).await.expect_err("list fails");

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Token expired");
    assert!(store.snapshot().is_authenticated());
}

#[tokio::test]
async fn list_normalises_envelope_and_pagination() {
    let server = StubServer::start().await;
    server.respond(
        "GET",
        "/subscription-plan/plans",
        Canned::json(
            200,
            json!({
                "success": true,
                "data": { "plans": [{ "_id": "p1", "name": "Gold" }], "total": 7, "totalPages": 4 }
            }),
        ),
    );
    let (store, _) = memory_store();
    let client = server.client(&store, UnauthorizedPolicy::Ignore);

    let page = client.list(ResourceKind::SubscriptionPlans).await.expect("list succeeds");

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].display("name"), "Gold");
    assert_eq!(page.total, 7);
    assert_eq!(page.total_pages, Some(4));
}

#[tokio::test]
async fn update_puts_to_item_path() {
    let server = StubServer::start().await;
    server.respond("PUT", "/user/c9", Canned::json(200, json!({ "success": true })));
    let (store, _) = memory_store();
    let client = server.client(&store, UnauthorizedPolicy::Ignore);

    client
        .update(ResourceKind::Customers, "c9", &json!({ "firstName": "Tomi" }))
        .await
        .expect("update succeeds");

    let request = &server.requests_to("/user/c9")[0];
    assert_eq!(request.method, "PUT");
    assert_eq!(request.json(), json!({ "firstName": "Tomi" }));
}

#[tokio::test]
async fn notifications_post_to_their_endpoints() {
    let server = StubServer::start().await;
    server.respond("POST", "/email-notification", Canned::json(200, json!({ "success": true })));
    server.respond("POST", "/notification/system", Canned::json(200, json!({ "success": true })));
    let (store, _) = memory_store();
    let client = server.client(&store, UnauthorizedPolicy::Ignore);

    client
        .send_email(&EmailDraft {
            subject: "Launch".to_string(),
            message: "We are live".to_string(),
            recipients: vec!["a@x.test".to_string()],
        })
        .await
        .expect("email sent");
    client
        .send_push(&PushDraft {
            title: "Launch".to_string(),
            message: "We are live".to_string(),
        })
        .await
        .expect("push sent");

    assert_eq!(
        server.requests_to("/email-notification")[0].json(),
        json!({ "subject": "Launch", "message": "We are live", "recipients": ["a@x.test"] })
    );
    assert_eq!(
        server.requests_to("/notification/system")[0].json(),
        json!({ "title": "Launch", "message": "We are live" })
    );
}

#[tokio::test]
async fn rehydrate_restores_user_from_admin_list() {
    let server = StubServer::start().await;
    server.respond(
        "GET",
        "/admin/admin-get-all",
        Canned::json(
            200,
            json!({ "admins": [admin_json("a0", "admin"), admin_json("a1", "superadmin")] }),
        ),
    );
    let (store, storage) = memory_store();
    storage.set(TOKEN_KEY, "tok-1").expect("seed token");
    storage.set(USER_ID_KEY, "a1").expect("seed user id");
    assert_eq!(store.restore().phase, SessionPhase::Restoring);
    let client = server.client(&store, UnauthorizedPolicy::Ignore);

    let session = auth::rehydrate(&store, &client).await;

    assert_eq!(session.phase, SessionPhase::Ready);
    assert!(session.is_authenticated());
    assert_eq!(session.user.map(|u| u.id), Some("a1".to_string()));
    assert_eq!(
        server.requests_to("/admin/admin-get-all")[0].header("authorization"),
        Some("Bearer tok-1")
    );
}

#[tokio::test]
async fn rehydrate_with_rejected_token_signs_out() {
    let server = StubServer::start().await;
    server.respond("GET", "/admin/admin-get-all", Canned::json(401, json!({})));
    let (store, storage) = memory_store();
    storage.set(TOKEN_KEY, "stale").expect("seed token");
    storage.set(USER_ID_KEY, "a1").expect("seed user id");
    store.restore();
    let client = server.client(&store, UnauthorizedPolicy::Ignore);

    let session = auth::rehydrate(&store, &client).await;

    assert_eq!(session.phase, SessionPhase::Ready);
    assert_eq!(session.token, None);
    assert_eq!(storage.get(TOKEN_KEY).expect("read"), None);
    assert_eq!(storage.get(USER_ID_KEY).expect("read"), None);
}
