/*
[INPUT]:  Credential triples and namespace accessors
[OUTPUT]: Test results for credential classification and admin gating
[POS]:    Integration tests - authentication
[UPDATE]: When login schemes or rights checks change
*/

mod common;

use abcp_adapter::{AbcpClient, AbcpError, Credentials};
use common::{admin_client, customer_client, setup_mock_server, HOST, MD5_PASSWORD};
use tokio_test::assert_ok;

#[test]
fn test_credentials_classification_matrix() {
    let cases: &[(&str, &str, bool)] = &[
        (HOST, "api@id1886", true),
        // api@ pointed at a different shop keeps working without admin rights.
        (HOST, "api@id9999", false),
        (HOST, "89031234567", false),
        (HOST, "shop.owner@example.com", false),
        ("id42.autopartner.pro", "api@id42", true),
    ];
    for (host, login, admin) in cases {
        let creds = assert_ok!(Credentials::validate(host, login, MD5_PASSWORD));
        assert_eq!(creds.admin, *admin, "login {login} on {host}");
    }
}

#[test]
fn test_credentials_rejections() {
    assert!(matches!(
        Credentials::validate(HOST, "89031234567", "plaintext"),
        Err(AbcpError::PasswordType)
    ));
    assert!(matches!(
        Credentials::validate("shop.example.com", "89031234567", MD5_PASSWORD),
        Err(AbcpError::UnsupportedHost(_))
    ));
    assert!(matches!(
        Credentials::validate(HOST, "123", MD5_PASSWORD),
        Err(AbcpError::UnsupportedLogin(_))
    ));
}

#[test]
fn test_client_construction_validates_credentials() {
    let err = AbcpClient::new(HOST, "89031234567", "not-a-digest").unwrap_err();
    assert!(matches!(err, AbcpError::PasswordType));

    assert_ok!(AbcpClient::new(HOST, "api@id1886", MD5_PASSWORD));
}

#[tokio::test]
async fn test_admin_namespaces_refuse_customer_credentials() {
    let server = setup_mock_server().await;
    let client = customer_client(&server);

    assert!(!client.is_admin());
    assert!(matches!(
        client.cp().admin().err(),
        Some(AbcpError::NotEnoughRights { .. })
    ));
    assert!(matches!(
        client.ts().admin().err(),
        Some(AbcpError::NotEnoughRights { .. })
    ));
}

#[tokio::test]
async fn test_admin_namespaces_open_for_admin_credentials() {
    let server = setup_mock_server().await;
    let client = admin_client(&server);

    assert!(client.is_admin());
    assert_ok!(client.cp().admin());
    assert_ok!(client.ts().admin());
}
