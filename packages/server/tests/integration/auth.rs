use serde_json::json;

use crate::common::{ADMIN_EMAIL, PASSWORD, TestApp, USER_EMAIL, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn user_receives_token_id_and_email() {
        let app = TestApp::spawn().await;
        let user = app.create_user(USER_EMAIL, PASSWORD).await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": USER_EMAIL, "password": PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["token"].is_string());
        assert_eq!(res.id(), user.id);
        assert_eq!(res.body["email"], USER_EMAIL);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_user(USER_EMAIL, PASSWORD).await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": USER_EMAIL, "password": "not-the-password"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn admin_cannot_use_the_user_login() {
        let app = TestApp::spawn().await;
        app.create_admin(ADMIN_EMAIL, PASSWORD).await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": ADMIN_EMAIL, "password": PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn admin_login_issues_token() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin(ADMIN_EMAIL, PASSWORD).await;

        let res = app
            .post_without_token(
                routes::ADMIN_LOGIN,
                &json!({"email": ADMIN_EMAIL, "password": PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.id(), admin.id);
    }

    #[tokio::test]
    async fn empty_email_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"email": "", "password": "x"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"username": "alice"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod add_user {
    use super::*;

    #[tokio::test]
    async fn admin_creates_an_account_that_can_log_in() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::ADD_USER,
                &json!({"email": "new@example.org", "password": "longenough"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["email"], "new@example.org");

        app.login(routes::LOGIN, "new@example.org", "longenough").await;
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let body = json!({"email": "new@example.org", "password": "longenough"});

        let first = app.post_with_token(routes::ADD_USER, &body, &token).await;
        assert_eq!(first.status, 201, "{}", first.text);

        let res = app.post_with_token(routes::ADD_USER, &body, &token).await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn user_cannot_add_users() {
        let app = TestApp::spawn().await;
        let token = app.user_token().await;

        let res = app
            .post_with_token(
                routes::ADD_USER,
                &json!({"email": "new@example.org", "password": "longenough"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}
