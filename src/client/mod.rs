//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    ApiError, ApiId, BalanceResponse, MessageChargeResponse, MessageId, MessageQuery,
    MessageStatusResponse, Password, RawPhoneNumber, RouteCoverageResponse, SendMessage,
    SendMessageResponse, SendOtp, SendOtpResponse, SessionId, Username, ValidationError,
    VerifyOtp, VerifyOtpResponse, WapPush,
};
use crate::transport::{self, Command, DecodeError, Method, ResponseError};

const DEFAULT_BASE_URL: &str = "https://api.clickatell.com";

/// Environment variable read by [`GatewayClientBuilder::from_env`] for the `api_id`.
pub const ENV_API_ID: &str = "CLICKATELL_API_ID";
/// Environment variable read by [`GatewayClientBuilder::from_env`] for the user name.
pub const ENV_USER: &str = "CLICKATELL_USER";
/// Environment variable read by [`GatewayClientBuilder::from_env`] for the password.
pub const ENV_PASSWORD: &str = "CLICKATELL_PASSWORD";
/// Optional base URL override for [`GatewayClientBuilder::from_env`].
pub const ENV_BASE_URL: &str = "CLICKATELL_BASE_URL";
/// Optional previously obtained session id for [`GatewayClientBuilder::from_env`].
pub const ENV_SESSION_ID: &str = "CLICKATELL_SESSION_ID";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        method: Method,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        method: Method,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let request = match method {
                Method::Get => self.client.get(url).query(&params),
                Method::Post => self.client.post(url).form(&params),
            };
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Account credentials: `api_id`, `user` and `password`.
///
/// Sent on `auth`, and on every other call while the client holds no session id.
pub struct Credentials {
    api_id: ApiId,
    user: Username,
    password: Password,
}

impl Credentials {
    /// Create credentials, validating that every part is non-empty.
    pub fn new(
        api_id: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            api_id: ApiId::new(api_id)?,
            user: Username::new(user)?,
            password: Password::new(password)?,
        })
    }

    pub fn api_id(&self) -> &ApiId {
        &self.api_id
    }

    pub fn user(&self) -> &Username {
        &self.user
    }

    fn push_params(&self, params: &mut Vec<(String, String)>) {
        params.push((ApiId::FIELD.to_owned(), self.api_id.as_str().to_owned()));
        params.push((Username::FIELD.to_owned(), self.user.as_str().to_owned()));
        params.push((Password::FIELD.to_owned(), self.password.as_str().to_owned()));
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`GatewayClient`].
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - gateway failures (`ERR: <code>, <message>` lines),
/// - validation/parse failures.
pub enum GatewayError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The gateway answered with an `ERR` line.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[from] ResponseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The call needs account credentials but the client only has (or had) a session id.
    #[error("no credentials configured for this client")]
    MissingCredentials,
}

impl From<DecodeError> for GatewayError {
    fn from(value: DecodeError) -> Self {
        match value {
            DecodeError::Api(err) => Self::Api(err),
            DecodeError::Response(err) => Self::Parse(err),
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`GatewayClient`].
///
/// Use this when you need to customize the base URL, timeout, user-agent, or start from an
/// existing session id.
pub struct GatewayClientBuilder {
    credentials: Option<Credentials>,
    session: Option<SessionId>,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl GatewayClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            session: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Start from a session id obtained elsewhere, without account credentials.
    ///
    /// Such a client cannot [`GatewayClient::authenticate`], and fails with
    /// [`GatewayError::MissingCredentials`] once the session is cleared.
    pub fn from_session(session: SessionId) -> Self {
        Self {
            credentials: None,
            session: Some(session),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Read credentials and optional overrides from the `CLICKATELL_*` environment variables.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ValidationError> {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required =
            |name: &'static str| optional(name).ok_or(ValidationError::MissingEnv { name });
        let credentials = Credentials::new(
            required(ENV_API_ID)?,
            required(ENV_USER)?,
            required(ENV_PASSWORD)?,
        )?;

        let mut builder = Self::new(credentials);
        if let Some(base_url) = optional(ENV_BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Some(session) = optional(ENV_SESSION_ID) {
            builder = builder.session(SessionId::new(session)?);
        }
        Ok(builder)
    }

    /// Override the gateway base URL (scheme and host, e.g. for a proxy or a test server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Start with a previously obtained session id.
    pub fn session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`GatewayClient`].
    pub fn build(self) -> Result<GatewayClient, GatewayError> {
        url::Url::parse(&self.base_url).map_err(|_| ValidationError::InvalidUrl {
            field: "base_url",
            input: self.base_url.clone(),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| GatewayError::Transport(Box::new(err)))?;

        Ok(GatewayClient {
            credentials: self.credentials,
            session: self.session,
            base_url: self.base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level gateway client.
///
/// Every call is a single request/response round-trip. Until [`GatewayClient::authenticate`]
/// succeeds (or a session id is supplied), each request carries `api_id`, `user` and
/// `password`; afterwards it carries only `session_id`, until [`GatewayClient::clear_session`].
pub struct GatewayClient {
    credentials: Option<Credentials>,
    session: Option<SessionId>,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl GatewayClient {
    /// Create a client using the default base URL.
    ///
    /// For more customization, use [`GatewayClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            session: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> GatewayClientBuilder {
        GatewayClientBuilder::new(credentials)
    }

    /// Session id attached to requests, if any.
    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    /// Use `session` for all subsequent calls.
    pub fn set_session(&mut self, session: SessionId) {
        self.session = Some(session);
    }

    /// Drop the session id and go back to sending raw credentials.
    pub fn clear_session(&mut self) -> Option<SessionId> {
        let previous = self.session.take();
        if previous.is_some() {
            tracing::debug!("gateway session cleared");
        }
        previous
    }

    /// Exchange the credentials for a session id (`auth`) and keep it for later calls.
    ///
    /// Always sends the raw credentials, even if a session is already held.
    pub async fn authenticate(&mut self) -> Result<SessionId, GatewayError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(GatewayError::MissingCredentials)?;
        let mut auth = Vec::new();
        credentials.push_params(&mut auth);

        let body = self.dispatch(transport::encode_auth(), auth).await?;
        let session = transport::decode_auth_response(&body).map_err(log_decode_error("auth"))?;

        tracing::debug!("gateway session established");
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Keep the current session alive (`ping`).
    pub async fn ping(&self) -> Result<(), GatewayError> {
        let body = self.execute(transport::encode_ping()).await?;
        transport::decode_ok_response(&body).map_err(log_decode_error("ping"))?;
        Ok(())
    }

    /// Send an SMS to one or more recipients (`sendmsg`).
    ///
    /// Texts longer than 160 characters are sent with the computed `concat` count.
    ///
    /// Errors:
    /// - [`GatewayError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`GatewayError::Api`] when the gateway rejects the whole request.
    ///
    /// Per-recipient rejections of a multi-recipient send are reported in
    /// [`SendMessageResponse::messages`] instead.
    pub async fn send_message(
        &self,
        request: SendMessage,
    ) -> Result<SendMessageResponse, GatewayError> {
        let body = self
            .execute(transport::encode_send_message(&request))
            .await?;
        let response = transport::decode_send_message_response(&body)
            .map_err(log_decode_error("sendmsg"))?;
        log_send_failures("sendmsg", &response);
        Ok(response)
    }

    /// Send a WAP push service indication (`si_push` on the `mms` service).
    pub async fn send_wap_push(&self, request: WapPush) -> Result<SendMessageResponse, GatewayError> {
        let body = self.execute(transport::encode_wap_push(&request)).await?;
        let response = transport::decode_send_message_response(&body)
            .map_err(log_decode_error("si_push"))?;
        log_send_failures("si_push", &response);
        Ok(response)
    }

    /// Query the delivery status of a message (`querymsg`).
    pub async fn message_status(
        &self,
        query: impl Into<MessageQuery>,
    ) -> Result<MessageStatusResponse, GatewayError> {
        let body = self
            .execute(transport::encode_message_status(&query.into()))
            .await?;
        let response = transport::decode_message_status_response(&body)
            .map_err(log_decode_error("querymsg"))?;
        Ok(response)
    }

    /// Query the credits charged for a message (`getmsgcharge`).
    pub async fn message_charge(
        &self,
        id: &MessageId,
    ) -> Result<MessageChargeResponse, GatewayError> {
        let body = self.execute(transport::encode_message_charge(id)).await?;
        let response = transport::decode_message_charge_response(&body)
            .map_err(log_decode_error("getmsgcharge"))?;
        Ok(response)
    }

    /// Stop delivery of a queued message (`delmsg`).
    pub async fn stop_message(
        &self,
        query: impl Into<MessageQuery>,
    ) -> Result<MessageStatusResponse, GatewayError> {
        let body = self
            .execute(transport::encode_stop_message(&query.into()))
            .await?;
        let response = transport::decode_message_status_response(&body)
            .map_err(log_decode_error("delmsg"))?;
        Ok(response)
    }

    /// Remaining account credit (`getbalance`).
    pub async fn account_balance(&self) -> Result<BalanceResponse, GatewayError> {
        let body = self.execute(transport::encode_get_balance()).await?;
        let response =
            transport::decode_balance_response(&body).map_err(log_decode_error("getbalance"))?;
        Ok(response)
    }

    /// Check whether messages to `msisdn` can be routed, and at what charge (`routeCoverage`).
    pub async fn route_coverage(
        &self,
        msisdn: &RawPhoneNumber,
    ) -> Result<RouteCoverageResponse, GatewayError> {
        let body = self
            .execute(transport::encode_route_coverage(msisdn))
            .await?;
        let response = transport::decode_route_coverage_response(&body)
            .map_err(log_decode_error("routeCoverage"))?;
        Ok(response)
    }

    /// Have the gateway generate and send a one-time password (`sendotp`).
    pub async fn send_otp(&self, request: SendOtp) -> Result<SendOtpResponse, GatewayError> {
        let body = self.execute(transport::encode_send_otp(&request)).await?;
        let response =
            transport::decode_send_otp_response(&body).map_err(log_decode_error("sendotp"))?;
        Ok(response)
    }

    /// Check a one-time password entered by the user (`verifyotp`).
    ///
    /// A wrong or expired code is reported as [`GatewayError::Api`].
    pub async fn verify_otp(&self, request: VerifyOtp) -> Result<VerifyOtpResponse, GatewayError> {
        let body = self.execute(transport::encode_verify_otp(&request)).await?;
        let response =
            transport::decode_verify_otp_response(&body).map_err(log_decode_error("verifyotp"))?;
        Ok(response)
    }

    fn auth_params(&self) -> Result<Vec<(String, String)>, GatewayError> {
        let mut params = Vec::new();
        if let Some(session) = self.session.as_ref() {
            params.push((SessionId::FIELD.to_owned(), session.as_str().to_owned()));
            return Ok(params);
        }
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(GatewayError::MissingCredentials)?;
        credentials.push_params(&mut params);
        Ok(params)
    }

    async fn execute(&self, command: Command) -> Result<String, GatewayError> {
        let auth = self.auth_params()?;
        self.dispatch(command, auth).await
    }

    async fn dispatch(
        &self,
        command: Command,
        auth: Vec<(String, String)>,
    ) -> Result<String, GatewayError> {
        let url = command.url(&self.base_url);
        let name = command.name();
        let method = command.method();
        tracing::debug!(
            command = name,
            service = command.service().as_str(),
            method = ?method,
            session = self.session.is_some(),
            "dispatching gateway command"
        );

        let mut params = auth;
        params.extend(command.into_params());

        let response = self
            .http
            .send(method, &url, params)
            .await
            .map_err(GatewayError::Transport)?;

        if !(200..=299).contains(&response.status) {
            tracing::debug!(command = name, status = response.status, "gateway HTTP failure");
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(GatewayError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}

fn log_send_failures(command: &'static str, response: &SendMessageResponse) {
    for (to, err) in response.failures() {
        tracing::warn!(
            command,
            code = %err.code,
            addressed = to.is_some(),
            "gateway rejected a recipient"
        );
    }
}

fn log_decode_error(command: &'static str) -> impl Fn(DecodeError) -> GatewayError {
    move |err| {
        match &err {
            DecodeError::Api(api) => {
                tracing::warn!(command, code = %api.code, "gateway returned an error");
            }
            DecodeError::Response(parse) => {
                tracing::warn!(command, error = %parse, "unreadable gateway response");
            }
        }
        err.into()
    }
}
