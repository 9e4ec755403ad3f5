/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client behavior through the public surface
[POS]:    Integration tests - transport and endpoint wiring
[UPDATE]: When credential injection, date formats or error mapping change
*/

mod common;

use abcp_adapter::types::TsOrdersFilter;
use abcp_adapter::{AbcpError, DateTimeArg};
use common::{
    admin_client, customer_client, json_response, setup_mock_server, CLIENT_LOGIN, MD5_PASSWORD,
};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_get_injects_credentials_into_query() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/search/brands"))
        .and(query_param("userlogin", CLIENT_LOGIN))
        .and(query_param("userpsw", MD5_PASSWORD))
        .and(query_param("number", "C110"))
        .respond_with(json_response(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = customer_client(&server);
    assert_ok!(client.cp().client().search().brands("C110", None, None).await);
}

#[tokio::test]
async fn test_post_injects_credentials_into_form_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/search/batch"))
        .and(body_string_contains("userlogin=89031234567"))
        .and(body_string_contains(&format!("userpsw={MD5_PASSWORD}")))
        .and(body_string_contains("search%5B0%5D%5Bbrand%5D=Febi"))
        .respond_with(json_response(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = customer_client(&server);
    assert_ok!(
        client
            .cp()
            .client()
            .search()
            .batch(&[json!({"brand": "Febi", "number": "01089"})], None)
            .await
    );
}

#[tokio::test]
async fn test_profile_id_is_admin_only() {
    let server = setup_mock_server().await;
    let client = customer_client(&server);
    let err = client
        .cp()
        .client()
        .search()
        .articles("01089", "Febi", None, None, None, Some(100))
        .await
        .unwrap_err();
    assert!(matches!(err, AbcpError::NotEnoughRights { .. }));
}

#[tokio::test]
async fn test_empty_search_maps_to_not_found() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/search/articles"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_raw(r#"{"errorCode":404,"errorMessage":"No results"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = customer_client(&server);
    let err = client
        .cp()
        .client()
        .search()
        .articles("01089", "Febi", None, None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AbcpError::NotFound { .. }));
}

#[tokio::test]
async fn test_api_error_carries_code_and_message() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/cp/ts/orders/list"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_raw(r#"{"errorCode":301,"errorMessage":"Unknown agreement"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let err = client
        .ts()
        .admin()
        .unwrap()
        .orders()
        .orders_list(&TsOrdersFilter::default())
        .await
        .unwrap_err();
    match err {
        AbcpError::Api { status, code, message } => {
            assert_eq!(status, 400);
            assert_eq!(code, 301);
            assert_eq!(message, "Unknown agreement");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_html_body_is_invalid_response() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html>maintenance</html>"),
        )
        .mount(&server)
        .await;

    let client = customer_client(&server);
    let err = client
        .cp()
        .client()
        .search()
        .brands("C110", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AbcpError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_trade_stock_dates_use_t_separator() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/cp/ts/orders/list"))
        .and(query_param("dateStart", "2024-03-05T00:00:00"))
        .respond_with(json_response(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let filter = TsOrdersFilter {
        date_start: Some(date.into()),
        ..Default::default()
    };
    assert_ok!(
        client
            .ts()
            .admin()
            .unwrap()
            .orders()
            .orders_list(&filter)
            .await
    );
}

#[tokio::test]
async fn test_raw_date_strings_pass_through_unchanged() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/cp/ts/orders/list"))
        .and(query_param("dateStart", "2024-03-05 10:30:00"))
        .respond_with(json_response(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = admin_client(&server);
    let filter = TsOrdersFilter {
        date_start: Some(DateTimeArg::from("2024-03-05 10:30:00")),
        ..Default::default()
    };
    assert_ok!(
        client
            .ts()
            .admin()
            .unwrap()
            .orders()
            .orders_list(&filter)
            .await
    );
}

#[tokio::test]
async fn test_validation_fails_before_any_request() {
    let server = setup_mock_server().await;
    // No mock mounted; a request would come back 404 with a non-JSON body.
    let client = admin_client(&server);
    let filter = TsOrdersFilter {
        limit: Some(5000),
        ..Default::default()
    };
    let err = client
        .ts()
        .admin()
        .unwrap()
        .orders()
        .orders_list(&filter)
        .await
        .unwrap_err();
    assert!(matches!(err, AbcpError::WrongParameter { .. }));
}
