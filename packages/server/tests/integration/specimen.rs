use serde_json::{Map, Value, json};

use crate::common::{TestApp, routes, specimen_row};

fn row_json(mbtb_code: &str) -> Value {
    let row = specimen_row(mbtb_code);
    let object: Map<String, Value> = ::common::fields::field_names()
        .map(|name| (name.to_string(), json!(row.get(name).unwrap_or_default())))
        .collect();
    Value::Object(object)
}

mod reads {
    use super::*;

    #[tokio::test]
    async fn uploaded_specimen_is_listed_with_lookup_names() {
        let app = TestApp::spawn().await;
        let admin = app.admin_token().await;
        let user = app.user_token().await;
        app.upload_specimens(&["BB99-103"], &admin).await;

        let res = app.get_with_token(routes::BRAIN_DATASET, &user).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let records = res.body.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["mbtb_code"], "BB99-103");
        assert_eq!(records[0]["tissue_type"], "Brain");
        assert_eq!(records[0]["neuropathology_diagnosis"], "Mixed AD VAD");
        assert_eq!(records[0]["storage_year"], "2018-06-06 03:03:03");
        assert_eq!(records[0]["archive"], "No");
    }

    #[tokio::test]
    async fn single_records_are_fetched_by_id() {
        let app = TestApp::spawn().await;
        let admin = app.admin_token().await;
        app.upload_specimens(&["BB99-103"], &admin).await;

        let list = app.get_with_token(routes::OTHER_DETAILS, &admin).await;
        let other = &list.body.as_array().unwrap()[0];
        let prime_id = other["prime_details_id"].as_i64().unwrap() as i32;
        let other_id = other["id"].as_i64().unwrap() as i32;

        let prime = app
            .get_with_token(&routes::brain_dataset(prime_id), &admin)
            .await;
        assert_eq!(prime.status, 200, "{}", prime.text);
        assert_eq!(prime.body["mbtb_code"], "BB99-103");

        let other = app
            .get_with_token(&routes::other_details(other_id), &admin)
            .await;
        assert_eq!(other.status, 200, "{}", other.text);
        assert_eq!(other.body["brain_weight"], 1080);
        assert_eq!(other.body["autopsy_type"], "Brain");
        assert_eq!(other.body["formalin_fixed"], true);
        assert_eq!(other.body["fresh_frozen"], false);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.user_token().await;

        let res = app.get_with_token(&routes::brain_dataset(404), &token).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn select_options_are_sorted_names() {
        let app = TestApp::spawn().await;
        let token = app.user_token().await;

        let res = app.get_with_token(routes::SELECT_OPTIONS, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(
            res.body,
            json!({
                "neuropathology_diagnosis": ["Alzheimer's disease", "Mixed AD VAD", "Normal"],
                "autopsy_type": ["Brain", "Full body"],
                "tissue_type": ["Brain", "Spinal cord"],
            })
        );
    }
}

mod add_new_data {
    use super::*;

    #[tokio::test]
    async fn single_row_is_inserted() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(routes::ADD_NEW_DATA, &row_json("BB99-110"), &token)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body, json!({"Response": "Success"}));

        let list = app.get_with_token(routes::BRAIN_DATASET, &token).await;
        assert_eq!(list.body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_row_reports_field_errors() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let mut body = row_json("BB99-111");
        body["tissue_type"] = json!("Liver");

        let res = app.post_with_token(routes::ADD_NEW_DATA, &body, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["Response"], "Failure");
        assert_eq!(
            res.body["Message"],
            "Error in prime details, Data uploading failed at mbtb_code: BB99-111"
        );
        assert_eq!(
            res.body["Error"]["tissue_type"],
            json!(["Object with name=Liver does not exist."])
        );
    }

    #[tokio::test]
    async fn json_booleans_are_accepted() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let mut body = row_json("BB99-112");
        body["formalin_fixed"] = json!(false);
        body["fresh_frozen"] = json!(true);
        body["brain_weight"] = json!(1200);

        let res = app.post_with_token(routes::ADD_NEW_DATA, &body, &token).await;
        assert_eq!(res.status, 201, "{}", res.text);

        let list = app.get_with_token(routes::OTHER_DETAILS, &token).await;
        let other = &list.body.as_array().unwrap()[0];
        assert_eq!(other["fresh_frozen"], true);
        assert_eq!(other["brain_weight"], 1200);
    }

    #[tokio::test]
    async fn member_cannot_add_data() {
        let app = TestApp::spawn().await;
        let token = app.user_token().await;

        let res = app
            .post_with_token(routes::ADD_NEW_DATA, &row_json("BB99-113"), &token)
            .await;

        assert_eq!(res.status, 403);
    }
}

mod download {
    use super::*;

    #[tokio::test]
    async fn export_is_a_csv_attachment() {
        let app = TestApp::spawn().await;
        let admin = app.admin_token().await;
        let user = app.user_token().await;
        app.upload_specimens(&["BB99-103", "BB99-104"], &admin).await;

        let res = app.post_empty_with_token(routes::DOWNLOAD, &user).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.content_type.as_deref(), Some("text/csv"));
        assert_eq!(
            res.content_disposition.as_deref(),
            Some("attachment; filename=\"mbtb_data.csv\"")
        );
        let lines: Vec<&str> = res.text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("mbtb_code,sex,age,"));
        assert!(lines[1].starts_with("BB99-103,Male,70,"));
    }

    #[tokio::test]
    async fn export_can_be_filtered_by_code() {
        let app = TestApp::spawn().await;
        let admin = app.admin_token().await;
        app.upload_specimens(&["BB99-103", "BB99-104"], &admin).await;

        let res = app
            .post_with_token(routes::DOWNLOAD, &json!({"mbtb_codes": ["BB99-104"]}), &admin)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let lines: Vec<&str> = res.text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("BB99-104,"));
    }

    #[tokio::test]
    async fn reimporting_an_export_hits_duplicate_codes() {
        let app = TestApp::spawn().await;
        let admin = app.admin_token().await;
        app.upload_specimens(&["BB99-103"], &admin).await;

        let export = app.post_empty_with_token(routes::DOWNLOAD, &admin).await;
        assert_eq!(export.status, 200);

        let res = app
            .upload_with_token(
                routes::FILE_UPLOAD,
                "mbtb_data.csv",
                export.text.into_bytes(),
                &admin,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(
            res.body["Error"]["mbtb_code"],
            json!(["prime details with this mbtb code already exists."])
        );
    }

    #[tokio::test]
    async fn empty_code_list_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.user_token().await;

        let res = app
            .post_with_token(routes::DOWNLOAD, &json!({"mbtb_codes": []}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}
