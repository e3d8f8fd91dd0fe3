use mbtb_server::utils::jwt;
use serde_json::json;

use crate::common::{JWT_SECRET, PASSWORD, TestApp, routes};

mod member_routes {
    use super::*;

    #[tokio::test]
    async fn user_token_reads_the_dataset() {
        let app = TestApp::spawn().await;
        let token = app.user_token().await;

        let res = app.get_with_token(routes::BRAIN_DATASET, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body.is_array());
    }

    #[tokio::test]
    async fn admin_token_reads_the_dataset() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app.get_with_token(routes::OTHER_DETAILS, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
    }

    #[tokio::test]
    async fn missing_header_is_forbidden() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::BRAIN_DATASET).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn empty_token_is_forbidden() {
        let app = TestApp::spawn().await;

        let res = app.get_with_header(routes::BRAIN_DATASET, "Token").await;

        assert_eq!(res.status, 403);
        assert_eq!(
            res.body["message"],
            "Invalid token header. No credentials provided."
        );
    }

    #[tokio::test]
    async fn forged_token_is_forbidden() {
        let app = TestApp::spawn().await;
        let user = app.create_user("forged@example.org", PASSWORD).await;
        let token = jwt::sign(user.id, &user.email, "some-other-secret", 1).unwrap();

        let res = app.get_with_token(routes::BRAIN_DATASET, &token).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn token_for_unknown_account_is_denied() {
        let app = TestApp::spawn().await;
        let token = jwt::sign(999, "ghost@example.org", JWT_SECRET, 1).unwrap();

        let res = app.get_with_token(routes::BRAIN_DATASET, &token).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn token_with_mismatched_email_is_denied() {
        let app = TestApp::spawn().await;
        let user = app.create_user("someone@example.org", PASSWORD).await;
        let token = jwt::sign(user.id, "someone-else@example.org", JWT_SECRET, 1).unwrap();

        let res = app.get_with_token(routes::BRAIN_DATASET, &token).await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn subject_matching_both_account_kinds_is_denied() {
        let app = TestApp::spawn().await;
        let user = app.create_user("both@example.org", PASSWORD).await;
        let admin = app.create_admin("both@example.org", PASSWORD).await;
        assert_eq!(user.id, admin.id);
        let token = jwt::sign(user.id, "both@example.org", JWT_SECRET, 1).unwrap();

        let res = app.get_with_token(routes::BRAIN_DATASET, &token).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn other_methods_are_not_allowed() {
        let app = TestApp::spawn().await;
        let token = app.user_token().await;

        let res = app
            .put_with_token(routes::BRAIN_DATASET, &json!({}), &token)
            .await;

        assert_eq!(res.status, 405);
        assert_eq!(res.body["code"], "METHOD_NOT_ALLOWED");
    }
}

mod admin_routes {
    use super::*;

    #[tokio::test]
    async fn user_token_cannot_list_tissue_requests() {
        let app = TestApp::spawn().await;
        let token = app.user_token().await;

        let res = app.get_with_token(routes::TISSUE_REQUESTS, &token).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn admin_token_lists_tissue_requests() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app.get_with_token(routes::TISSUE_REQUESTS, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn user_token_cannot_upload() {
        let app = TestApp::spawn().await;
        let token = app.user_token().await;

        let res = app
            .upload_with_token(routes::FILE_UPLOAD, "data.csv", b"a,b\n1,2\n".to_vec(), &token)
            .await;

        assert_eq!(res.status, 403);
    }
}
