use serde_json::{Value, json};

use crate::common::{TestApp, routes};

fn form() -> Value {
    json!({
        "title": "Dr",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.org",
        "institution": "Dalhousie University",
        "department_name": "Medical Neuroscience",
        "city": "Halifax",
        "province": "NS",
        "postal_code": "B3H 4R2",
        "phone_number": "902-555-0100",
        "project_title": "Tau spread",
        "source_of_funding": "CIHR",
        "abstract": "Tracing tau pathology across regions."
    })
}

async fn submit(app: &TestApp, token: &str) -> String {
    let res = app
        .post_with_token(routes::ADD_TISSUE_REQUEST, &form(), token)
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    res.body["tissue_request_number"]
        .as_str()
        .expect("response should carry the request number")
        .to_string()
}

mod intake {
    use super::*;

    #[tokio::test]
    async fn member_submission_is_pending() {
        let app = TestApp::spawn().await;
        let user = app.user_token().await;
        let number = submit(&app, &user).await;

        let admin = app.admin_token().await;
        let res = app.get_with_token(routes::TISSUE_REQUESTS, &admin).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let requests = res.body.as_array().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["tissue_request_number"], number.as_str());
        assert_eq!(requests[0]["status"], "pending");
        assert_eq!(requests[0]["pending_approval"], "Y");
        assert!(requests[0]["received_date"].is_string());
        assert_eq!(requests[0]["abstract"], "Tracing tau pathology across regions.");
    }

    #[tokio::test]
    async fn incomplete_form_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.user_token().await;
        let mut body = form();
        body["city"] = json!("");

        let res = app
            .post_with_token(routes::ADD_TISSUE_REQUEST, &body, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod review {
    use super::*;

    #[tokio::test]
    async fn approve_sets_the_approval_date() {
        let app = TestApp::spawn().await;
        let admin = app.admin_token().await;
        let number = submit(&app, &admin).await;

        let res = app
            .post_with_token(
                routes::APPROVE,
                &json!({"tissue_request_number": number}),
                &admin,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "approved");
        assert_eq!(res.body["pending_approval"], "N");
        assert!(res.body["approval_date"].is_string());
        assert!(res.body["reverted_date"].is_null());
    }

    #[tokio::test]
    async fn revert_sets_the_reverted_date() {
        let app = TestApp::spawn().await;
        let admin = app.admin_token().await;
        let number = submit(&app, &admin).await;

        let res = app
            .post_with_token(
                routes::REVERT,
                &json!({"tissue_request_number": number}),
                &admin,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "reverted");
        assert!(res.body["reverted_date"].is_string());
    }

    #[tokio::test]
    async fn decided_request_cannot_be_decided_again() {
        let app = TestApp::spawn().await;
        let admin = app.admin_token().await;
        let number = submit(&app, &admin).await;
        let body = json!({"tissue_request_number": number});

        let first = app.post_with_token(routes::APPROVE, &body, &admin).await;
        assert_eq!(first.status, 200, "{}", first.text);

        let res = app.post_with_token(routes::REVERT, &body, &admin).await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn unknown_number_is_not_found() {
        let app = TestApp::spawn().await;
        let admin = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::APPROVE,
                &json!({"tissue_request_number": "no-such-request"}),
                &admin,
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn member_cannot_approve() {
        let app = TestApp::spawn().await;
        let user = app.user_token().await;
        let number = submit(&app, &user).await;

        let res = app
            .post_with_token(
                routes::APPROVE,
                &json!({"tissue_request_number": number}),
                &user,
            )
            .await;

        assert_eq!(res.status, 403);
    }
}
