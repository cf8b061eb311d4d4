use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway `api_id` identifying the HTTP API product on the account.
///
/// Invariant: non-empty after trimming.
pub struct ApiId(String);

impl ApiId {
    /// Query field name used by the gateway (`api_id`).
    pub const FIELD: &'static str = "api_id";

    /// Create a validated [`ApiId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Account user name (`user`).
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Query field name used by the gateway (`user`).
    pub const FIELD: &'static str = "user";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated user name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Account password (`password`).
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query field name used by the gateway (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Session token returned by `auth` (`session_id`).
///
/// Invariant: non-empty after trimming.
pub struct SessionId(String);

impl SessionId {
    /// Query field name used by the gateway (`session_id`).
    pub const FIELD: &'static str = "session_id";

    /// Create a validated [`SessionId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the session token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionId(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id or originating number (`from`).
///
/// Invariant: non-empty after trimming. The value must be registered on the account.
pub struct SenderId(String);

impl SenderId {
    /// Query field name used by the gateway (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Query field name used by the gateway (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (Unicode scalar values), as the gateway bills it.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Number of 160-character segments a message is delivered in (`concat`).
///
/// Invariant: at least 1.
pub struct Concat(u32);

impl Concat {
    /// Query field name used by the gateway (`concat`).
    pub const FIELD: &'static str = "concat";

    /// Characters per segment.
    pub const SEGMENT_LEN: usize = 160;

    /// Create a validated [`Concat`].
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: 1,
                max: u32::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Segment count the gateway requires for `text`.
    ///
    /// Returns `None` when the text fits in a single message.
    pub fn required_for(text: &MessageText) -> Option<Self> {
        let len = text.char_len();
        if len <= Self::SEGMENT_LEN {
            return None;
        }
        let parts = len.div_ceil(Self::SEGMENT_LEN);
        Some(Self(u32::try_from(parts).unwrap_or(u32::MAX)))
    }

    /// Get the underlying segment count.
    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Gateway-assigned message id (`apimsgid`), returned as `ID:` by send calls.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// Query field name used by the gateway (`apimsgid`).
    pub const FIELD: &'static str = "apimsgid";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Caller-assigned message id (`climsgid`).
///
/// Invariant: non-empty after trimming.
pub struct ClientMessageId(String);

impl ClientMessageId {
    /// Query field name used by the gateway (`climsgid`).
    pub const FIELD: &'static str = "climsgid";

    /// Create a validated [`ClientMessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated client message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// One-time password entered by the end user (`otp`).
///
/// Invariant: non-empty after trimming.
pub struct OtpCode(String);

impl OtpCode {
    /// Query field name used by the gateway (`otp`).
    pub const FIELD: &'static str = "otp";

    /// Create a validated [`OtpCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Target URL of a WAP push service indication (`si_url`).
///
/// Invariant: parses as an absolute URL.
pub struct WapUrl(String);

impl WapUrl {
    /// Query field name used by the gateway (`si_url`).
    pub const FIELD: &'static str = "si_url";

    /// Create a validated [`WapUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
            field: Self::FIELD,
            input: trimmed.to_owned(),
        })?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the URL as provided (trimmed).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated destination number as sent to the gateway (`to`).
///
/// Invariant: non-empty after trimming. The gateway expects international format without a
/// leading `+`; this type does not normalize. Parse into [`PhoneNumber`] and convert it into
/// [`RawPhoneNumber`] for normalization.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Query field name used by the gateway (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the gateway.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    fn from(value: PhoneNumber) -> Self {
        Self(value.digits().to_owned())
    }
}

#[derive(Debug, Clone)]
/// Destination number checked with the `phonenumber` crate.
///
/// Converts into [`RawPhoneNumber`] as the gateway expects it: E.164 digits without `+`.
/// Two numbers are equal when their E.164 forms are.
pub struct PhoneNumber {
    input: String,
    e164: String,
}

impl PhoneNumber {
    /// Parse `input`, falling back to `default_region` when it has no country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into().trim().to_owned();
        if input.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }

        let e164 = phonenumber::parse(default_region, &input)
            .map(|parsed| {
                phonenumber::format(&parsed)
                    .mode(phonenumber::Mode::E164)
                    .to_string()
            })
            .map_err(|_| ValidationError::InvalidPhoneNumber {
                input: input.clone(),
            })?;

        Ok(Self { input, e164 })
    }

    /// Input as given, trimmed.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// `+` followed by country code and subscriber number.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// E.164 form without the leading `+`.
    pub fn digits(&self) -> &str {
        self.e164.trim_start_matches('+')
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message status code reported by `querymsg`, `getmsgcharge` and `delmsg` (e.g. `004`).
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct MessageStatusCode(String);

impl MessageStatusCode {
    /// Construct a status code from its wire representation.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_owned())
    }

    /// Borrow the code as provided by the gateway.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map this code to a known status, if one exists.
    pub fn known(&self) -> Option<KnownMessageStatus> {
        KnownMessageStatus::from_code(&self.0)
    }

    /// Returns `true` if the message will not change status any more.
    pub fn is_final(&self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_final())
    }
}

impl fmt::Display for MessageStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known message status codes.
pub enum KnownMessageStatus {
    MessageUnknown,
    MessageQueued,
    DeliveredToGateway,
    ReceivedByRecipient,
    ErrorWithMessage,
    UserCancelledDelivery,
    ErrorDeliveringMessage,
    Ok,
    RoutingError,
    MessageExpired,
    QueuedForLaterDelivery,
    OutOfCredit,
    MaximumMtLimitExceeded,
}

impl KnownMessageStatus {
    /// Convert a wire status code into a known variant.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "001" => Self::MessageUnknown,
            "002" => Self::MessageQueued,
            "003" => Self::DeliveredToGateway,
            "004" => Self::ReceivedByRecipient,
            "005" => Self::ErrorWithMessage,
            "006" => Self::UserCancelledDelivery,
            "007" => Self::ErrorDeliveringMessage,
            "008" => Self::Ok,
            "009" => Self::RoutingError,
            "010" => Self::MessageExpired,
            "011" => Self::QueuedForLaterDelivery,
            "012" => Self::OutOfCredit,
            "014" => Self::MaximumMtLimitExceeded,
            _ => return None,
        })
    }

    /// Whether the status is terminal for the message.
    pub fn is_final(self) -> bool {
        matches!(
            self,
            Self::ReceivedByRecipient
                | Self::ErrorWithMessage
                | Self::UserCancelledDelivery
                | Self::ErrorDeliveringMessage
                | Self::RoutingError
                | Self::MessageExpired
                | Self::OutOfCredit
                | Self::MaximumMtLimitExceeded
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Error code carried by an `ERR: <code>, <message>` line.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct ErrorCode(String);

impl ErrorCode {
    /// Construct an error code from its wire representation.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_owned())
    }

    /// Borrow the code as provided by the gateway.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map this code to a known error, if one exists.
    pub fn known(&self) -> Option<KnownErrorCode> {
        KnownErrorCode::from_code(&self.0)
    }

    /// Returns `true` if this code is considered retryable by the crate.
    pub fn is_retryable(&self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_retryable())
    }

    /// Returns `true` if this code means the credentials or session were rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_auth_error())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known gateway error codes.
///
/// Unknown codes are preserved as [`ErrorCode`] and return `None` from [`KnownErrorCode::from_code`].
pub enum KnownErrorCode {
    AuthenticationFailed,
    UnknownUsernameOrPassword,
    SessionIdExpired,
    AccountFrozen,
    MissingSessionId,
    IpLockdownViolation,
    InvalidOrMissingParameters,
    InvalidUserDataHeader,
    UnknownApiMessageId,
    UnknownClientMessageId,
    InvalidDestinationAddress,
    InvalidSourceAddress,
    EmptyMessage,
    InvalidOrMissingApiId,
    MissingMessageId,
    ErrorWithEmailMessage,
    InvalidProtocol,
    InvalidMessageType,
    MaximumMessagePartsExceeded,
    CannotRouteMessage,
    MessageExpired,
    InvalidUnicodeData,
    InvalidDeliveryTime,
    DestinationNumberBlocked,
    DestinationOptedOut,
    InvalidSenderId,
    NumberDelisted,
    MaximumMtLimitExceeded,
    InvalidBatchId,
    NoBatchTemplate,
    NoCreditLeft,
    MaxAllowedCredit,
    InternalError,
}

impl KnownErrorCode {
    /// Convert a wire error code into a known variant.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "001" => Self::AuthenticationFailed,
            "002" => Self::UnknownUsernameOrPassword,
            "003" => Self::SessionIdExpired,
            "004" => Self::AccountFrozen,
            "005" => Self::MissingSessionId,
            "007" => Self::IpLockdownViolation,
            "101" => Self::InvalidOrMissingParameters,
            "102" => Self::InvalidUserDataHeader,
            "103" => Self::UnknownApiMessageId,
            "104" => Self::UnknownClientMessageId,
            "105" => Self::InvalidDestinationAddress,
            "106" => Self::InvalidSourceAddress,
            "107" => Self::EmptyMessage,
            "108" => Self::InvalidOrMissingApiId,
            "109" => Self::MissingMessageId,
            "110" => Self::ErrorWithEmailMessage,
            "111" => Self::InvalidProtocol,
            "112" => Self::InvalidMessageType,
            "113" => Self::MaximumMessagePartsExceeded,
            "114" => Self::CannotRouteMessage,
            "115" => Self::MessageExpired,
            "116" => Self::InvalidUnicodeData,
            "120" => Self::InvalidDeliveryTime,
            "121" => Self::DestinationNumberBlocked,
            "122" => Self::DestinationOptedOut,
            "123" => Self::InvalidSenderId,
            "128" => Self::NumberDelisted,
            "130" => Self::MaximumMtLimitExceeded,
            "201" => Self::InvalidBatchId,
            "202" => Self::NoBatchTemplate,
            "301" => Self::NoCreditLeft,
            "302" => Self::MaxAllowedCredit,
            "901" => Self::InternalError,
            _ => return None,
        })
    }

    /// Whether the failure is likely transient.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::InternalError | Self::MaximumMtLimitExceeded)
    }

    /// Whether the failure means the credentials or session were rejected.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed
                | Self::UnknownUsernameOrPassword
                | Self::SessionIdExpired
                | Self::MissingSessionId
                | Self::InvalidOrMissingApiId
        )
    }
}
