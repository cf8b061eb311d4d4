//! Typed Rust client for the Clickatell-style HTTP SMS gateway.
//!
//! The crate is layered: a domain layer of strong types, a transport layer that builds
//! commands and reads the `Key: value` response lines, and a small client layer
//! orchestrating requests and the session.
//!
//! ```rust,no_run
//! use clickatell::{Credentials, GatewayClient, MessageText, RawPhoneNumber, SendMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), clickatell::GatewayError> {
//!     let mut client = GatewayClient::new(Credentials::new("3456789", "user", "secret")?);
//!     client.authenticate().await?;
//!
//!     let to = RawPhoneNumber::new("27999000001")?;
//!     let text = MessageText::new("hello")?;
//!     let response = client.send_message(SendMessage::single(to, text)).await?;
//!     for id in response.ids() {
//!         println!("queued as {}", id.as_str());
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Credentials, GatewayClient, GatewayClientBuilder, GatewayError};
pub use domain::{
    ApiError, ApiId, BalanceResponse, ClientMessageId, Concat, ErrorCode, KnownErrorCode,
    KnownMessageStatus, MessageChargeResponse, MessageId, MessageQuery, MessageStatusCode,
    MessageStatusResponse, MessageText, OtpCode, Password, PhoneNumber, RawPhoneNumber,
    RouteCoverageResponse, SendMessage, SendMessageResponse, SendOptions, SendOtp,
    SendOtpOptions, SendOtpResponse, SenderId, SentMessage, SessionId, Username,
    ValidationError, VerifyOtp, VerifyOtpResponse, WapAction, WapPush, WapPushOptions, WapUrl,
};
pub use transport::{Record, ResponseError, parse_body};
