//! VIP portal and gallery integration tests

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;
use serial_test::serial;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::Mock;
use RetailChampions::forms::FileUpload;
use RetailChampions::storage::{VIP_TOKEN_KEY, VIP_USER_KEY};
use RetailChampions::RetailChampionsError;

fn vip_member() -> serde_json::Value {
    json!({
        "_id": "v1",
        "name": "Meera",
        "phoneNumber": "9988776655",
        "couponCode": "VIP-777",
        "referralCount": 2,
    })
}

#[tokio::test]
#[serial]
async fn test_vip_login_uses_vip_token_for_portal_calls() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/api/vip/login"))
        .and(body_json(json!({"couponCode": "VIP-777", "password": "secret123"})))
        .respond_with(ok_response(json!({"token": "vip-token", "user": vip_member()})))
        .expect(1)
        .mount(&ctx.api.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/vip/profile"))
        .and(header("authorization", "Bearer vip-token"))
        .respond_with(ok_response(vip_member()))
        .expect(1)
        .mount(&ctx.api.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/vip/generate-referral"))
        .and(header("authorization", "Bearer vip-token"))
        .respond_with(ok_response(json!({"leaderCode": "LEAD-42"})))
        .expect(1)
        .mount(&ctx.api.server)
        .await;

    let vip = &ctx.services.vip_service;
    let member = vip.login(" VIP-777 ", "secret123").await.unwrap();
    assert_eq!(member.id, "v1");
    assert_eq!(ctx.storage.get(VIP_TOKEN_KEY).as_deref(), Some("vip-token"));
    assert!(ctx.services.guard.require_vip().is_ok());

    let profile = vip.profile().await.unwrap();
    assert_eq!(profile.referral_count, 2);
    assert_eq!(vip.generate_referral().await.unwrap(), "LEAD-42");

    vip.logout().unwrap();
    assert!(ctx.storage.get(VIP_USER_KEY).is_none());
    assert!(ctx.services.guard.require_vip().is_err());
    // The admin session is untouched
    assert!(ctx.services.guard.check_admin().is_allowed());
}

#[tokio::test]
#[serial]
async fn test_set_password_mismatch_sends_nothing() {
    let ctx = TestContext::new().await;
    ctx.api
        .mount("POST", "vip/set-password", message_response("Password set"), None, Some(0))
        .await;

    let vip = &ctx.services.vip_service;
    assert_matches!(
        vip.set_password("VIP-777", "secret123", "secret124").await,
        Err(RetailChampionsError::InvalidInput(_))
    );
    assert_matches!(
        vip.set_password("VIP-777", "123", "123").await,
        Err(RetailChampionsError::InvalidInput(_))
    );
}

#[tokio::test]
#[serial]
async fn test_verify_coupon() {
    let ctx = TestContext::new().await;
    ctx.api
        .ok(
            "POST",
            "vip/verify-coupon",
            json!({"valid": true, "hasPassword": false, "name": "Meera"}),
        )
        .await;

    let verification = ctx.services.vip_service.verify_coupon("VIP-777").await.unwrap();
    assert!(verification.valid);
    assert!(!verification.has_password);
    assert_eq!(verification.name.as_deref(), Some("Meera"));
}

#[tokio::test]
#[serial]
async fn test_gallery_upload_sends_image_and_caption() {
    let ctx = TestContext::new().await;
    ctx.api
        .mount(
            "POST",
            "gallery/upload",
            ok_response(json!({
                "_id": "g1",
                "imageUrl": "/uploads/gallery/g1.png",
                "caption": "Diwali finals",
            })),
            None,
            Some(1),
        )
        .await;

    let image = FileUpload::new("stage.png", "image/png", vec![0x89, 0x50, 0x4E, 0x47]);
    let item = ctx
        .services
        .gallery_service
        .upload(image, Some("  Diwali finals "))
        .await
        .unwrap();
    assert_eq!(item.id, "g1");

    let requests = ctx.api.requests_to("POST", "gallery/upload").await;
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(body.contains("name=\"image\""));
    assert!(body.contains("filename=\"stage.png\""));
    assert!(body.contains("name=\"caption\""));
    assert!(body.contains("\r\nDiwali finals\r\n"));
    assert!(requests[0].headers.get("authorization").is_some());
}

#[tokio::test]
#[serial]
async fn test_gallery_rejects_unsupported_image_type() {
    let ctx = TestContext::new().await;
    ctx.api
        .mount("POST", "gallery/upload", ok_response(json!({})), None, Some(0))
        .await;

    let image = FileUpload::new("clip.gif", "image/gif", vec![0x47, 0x49, 0x46]);
    let error = ctx
        .services
        .gallery_service
        .upload(image, None)
        .await
        .unwrap_err();
    assert!(error.field_errors().unwrap().contains("image"));
}

#[tokio::test]
#[serial]
async fn test_gallery_caption_update() {
    let ctx = TestContext::new().await;
    Mock::given(method("PUT"))
        .and(path("/api/gallery/g1"))
        .and(body_json(json!({"caption": "Grand finale"})))
        .respond_with(ok_response(json!({
            "_id": "g1",
            "url": "/uploads/gallery/g1.png",
            "title": "Grand finale",
        })))
        .expect(1)
        .mount(&ctx.api.server)
        .await;

    let item = ctx
        .services
        .gallery_service
        .update_caption("g1", " Grand finale ")
        .await
        .unwrap();
    assert_eq!(item.caption.as_deref(), Some("Grand finale"));
    assert_eq!(item.image_url, "/uploads/gallery/g1.png");
}
