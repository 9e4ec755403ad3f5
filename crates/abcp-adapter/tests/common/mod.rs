/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for abcp-adapter tests

use abcp_adapter::{AbcpClient, ClientConfig};
use wiremock::MockServer;

/// Host whose first label matches [`ADMIN_LOGIN`].
pub const HOST: &str = "id1886.public.api.abcp.ru";
pub const ADMIN_LOGIN: &str = "api@id1886";
pub const CLIENT_LOGIN: &str = "89031234567";
/// Valid md5 digest shape; the mock server never checks it.
pub const MD5_PASSWORD: &str = "1c7c0b3b8ab2eb1eafb0f1c91ceb3e97";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client with administrator credentials pointed at the mock server.
pub fn admin_client(server: &MockServer) -> AbcpClient {
    client_with_login(server, ADMIN_LOGIN)
}

/// Client with ordinary customer credentials pointed at the mock server.
#[allow(dead_code)]
pub fn customer_client(server: &MockServer) -> AbcpClient {
    client_with_login(server, CLIENT_LOGIN)
}

fn client_with_login(server: &MockServer, login: &str) -> AbcpClient {
    let base = url::Url::parse(&server.uri())
        .and_then(|u| u.join("/"))
        .unwrap();
    AbcpClient::with_config_and_base_url(
        HOST,
        login,
        MD5_PASSWORD,
        ClientConfig::default(),
        base,
    )
    .unwrap()
}

/// JSON 200 response with the content type the API actually sends.
pub fn json_response(body: serde_json::Value) -> wiremock::ResponseTemplate {
    wiremock::ResponseTemplate::new(200).set_body_json(body)
}
