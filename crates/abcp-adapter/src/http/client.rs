/*
[INPUT]:  Host + credentials, endpoint paths with marshaled parameters
[OUTPUT]: Parsed JSON responses or classified errors
[POS]:    Core HTTP client - credential injection, retries, response mapping
[UPDATE]: When adding new transport concerns (new body encodings, new status mappings)
*/

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::auth::Credentials;
use crate::cp::Cp;
use crate::http::error::{AbcpError, Result};
use crate::http::params::Params;
use crate::ts::Ts;

/// Endpoints that report "nothing found" with a 404 rather than an error body.
const SEARCH_ENDPOINTS: &[&str] = &[
    "search/brands",
    "search/articles",
    "search/batch",
    "search/history",
    "search/tips",
    "advices",
    "advices/batch",
];

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Attempts per request; transport failures are retried, API errors never
    pub retry_attempts: u32,
    /// Base delay between retries, grows linearly with the attempt number
    pub retry_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry_attempts: 3,
            retry_delay: Duration::from_millis(300),
        }
    }
}

/// File to upload with multipart endpoints (price lists, user catalogs).
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Request body shape. Kept by value so a retry can rebuild the request;
/// reqwest bodies are consumed on send.
pub(crate) enum Payload {
    Query(Params),
    Form(Params),
    Json(Value),
    Multipart {
        params: Params,
        file: UploadFile,
        /// Extra named file part; the user catalog upload carries an image
        /// archive next to the catalog file.
        extra: Option<(String, UploadFile)>,
    },
}

/// Asynchronous client for the ABCP e-commerce API.
///
/// Credentials are validated once at construction and injected into every
/// request. The `cp()` and `ts()` accessors expose the two endpoint families;
/// admin groups behind them refuse to hand out methods to client credentials.
#[derive(Debug)]
pub struct AbcpClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl AbcpClient {
    /// Create a client for the given shop host. The password must be the md5
    /// digest of the real password, as the API requires.
    pub fn new(host: &str, login: &str, password: &str) -> Result<Self> {
        Self::with_config(host, login, password, ClientConfig::default())
    }

    pub fn with_config(
        host: &str,
        login: &str,
        password: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        let base_url = Url::parse(&format!("https://{host}/"))?;
        Self::with_config_and_base_url(host, login, password, config, base_url)
    }

    /// Like [`Self::with_config`] but with an explicit base URL, which the
    /// tests point at a local mock server.
    pub fn with_config_and_base_url(
        host: &str,
        login: &str,
        password: &str,
        config: ClientConfig,
        base_url: Url,
    ) -> Result<Self> {
        let credentials = Credentials::validate(host, login, password)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url,
            credentials,
            retry_attempts: config.retry_attempts.max(1),
            retry_delay: config.retry_delay,
        })
    }

    /// Whether the credentials carry administrator rights.
    pub fn is_admin(&self) -> bool {
        self.credentials.admin
    }

    /// `cp/…` endpoint family (orders, finance, users, search, basket).
    pub fn cp(&self) -> Cp<'_> {
        Cp::new(self)
    }

    /// `cp/ts/…` endpoint family (trade stock: operations, pickings, complaints).
    pub fn ts(&self) -> Ts<'_> {
        Ts::new(self)
    }

    pub(crate) async fn get(&self, endpoint: &str, params: Params) -> Result<Value> {
        self.request(reqwest::Method::GET, endpoint, Payload::Query(params))
            .await
    }

    pub(crate) async fn post_form(&self, endpoint: &str, params: Params) -> Result<Value> {
        self.request(reqwest::Method::POST, endpoint, Payload::Form(params))
            .await
    }

    /// A few endpoints take a JSON body; credentials still travel in the
    /// query string.
    pub(crate) async fn post_json(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.request(reqwest::Method::POST, endpoint, Payload::Json(body))
            .await
    }

    pub(crate) async fn post_multipart(
        &self,
        endpoint: &str,
        params: Params,
        file: UploadFile,
    ) -> Result<Value> {
        self.request(
            reqwest::Method::POST,
            endpoint,
            Payload::Multipart {
                params,
                file,
                extra: None,
            },
        )
        .await
    }

    pub(crate) async fn post_multipart_extra(
        &self,
        endpoint: &str,
        params: Params,
        file: UploadFile,
        extra: Option<(String, UploadFile)>,
    ) -> Result<Value> {
        self.request(
            reqwest::Method::POST,
            endpoint,
            Payload::Multipart {
                params,
                file,
                extra,
            },
        )
        .await
    }

    async fn request(
        &self,
        method: reqwest::Method,
        endpoint: &str,
        payload: Payload,
    ) -> Result<Value> {
        let endpoint = endpoint.trim_start_matches('/');
        let url = self.base_url.join(endpoint)?;
        debug!(%method, endpoint, "sending request");

        let mut last_err = None;
        for attempt in 1..=self.retry_attempts {
            let request = self.build_request(method.clone(), url.clone(), &payload)?;
            match self.http.execute(request).await {
                Ok(response) => return self.check_result(endpoint, response).await,
                Err(err) => {
                    let err = AbcpError::from(err);
                    if attempt < self.retry_attempts && err.is_retryable() {
                        let delay = self.retry_delay * attempt;
                        warn!(endpoint, attempt, ?delay, error = %err, "request failed, retrying");
                        tokio::time::sleep(delay).await;
                        last_err = Some(err);
                    } else {
                        return Err(err);
                    }
                }
            }
        }
        // Unreachable while retry_attempts >= 1, but the loop shape hides that
        // from the compiler.
        Err(last_err.unwrap_or(AbcpError::InvalidResponse("no attempts made".into())))
    }

    fn build_request(
        &self,
        method: reqwest::Method,
        url: Url,
        payload: &Payload,
    ) -> Result<reqwest::Request> {
        let creds = [
            ("userlogin", self.credentials.login.as_str()),
            ("userpsw", self.credentials.password.as_str()),
        ];
        let builder = self.http.request(method, url);
        let builder = match payload {
            Payload::Query(params) => builder.query(&creds).query(params.pairs()),
            Payload::Form(params) => {
                let mut form = Vec::with_capacity(params.pairs().len() + 2);
                for (k, v) in &creds {
                    form.push(((*k).to_owned(), (*v).to_owned()));
                }
                form.extend(params.pairs().iter().cloned());
                builder.form(&form)
            }
            Payload::Json(body) => builder.query(&creds).json(body),
            Payload::Multipart {
                params,
                file,
                extra,
            } => {
                let mut form = reqwest::multipart::Form::new()
                    .text("userlogin", self.credentials.login.clone())
                    .text("userpsw", self.credentials.password.clone());
                for (k, v) in params.pairs() {
                    form = form.text(k.clone(), v.clone());
                }
                let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone());
                form = form.part("uploadFile", part);
                if let Some((name, extra)) = extra {
                    let part = reqwest::multipart::Part::bytes(extra.bytes.clone())
                        .file_name(extra.file_name.clone());
                    form = form.part(name.clone(), part);
                }
                builder.multipart(form)
            }
        };
        Ok(builder.build()?)
    }

    /// Map the HTTP response to a parsed value or a classified error.
    async fn check_result(&self, endpoint: &str, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_owned();
        let body = response.text().await?;

        if !content_type.starts_with("application/json") {
            return Err(AbcpError::InvalidResponse(format!(
                "unexpected content type {content_type:?} (status {})",
                status.as_u16()
            )));
        }

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let (code, message) = parse_error_body(&body);
        match status {
            StatusCode::BAD_REQUEST => Err(AbcpError::Api {
                status: 400,
                code,
                message,
            }),
            StatusCode::NOT_FOUND if SEARCH_ENDPOINTS.contains(&endpoint) => {
                Err(AbcpError::NotFound { message })
            }
            StatusCode::IM_A_TEAPOT => Err(AbcpError::TeaPot),
            _ => Err(AbcpError::Api {
                status: status.as_u16(),
                code,
                message,
            }),
        }
    }
}

/// Error body shape; the code arrives as a number or a numeric string
/// depending on the endpoint.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(rename = "errorCode", default)]
    code: Value,
    #[serde(rename = "errorMessage", default)]
    message: Option<String>,
}

fn parse_error_body(body: &str) -> (i64, String) {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return (0, body.to_owned());
    };
    let code = parsed
        .code
        .as_i64()
        .or_else(|| parsed.code.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0);
    let message = parsed.message.unwrap_or_else(|| body.to_owned());
    (code, message)
}
