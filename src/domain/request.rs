use crate::domain::validation::ValidationError;
use crate::domain::value::{
    ClientMessageId, Concat, MessageId, MessageText, OtpCode, RawPhoneNumber, SenderId, WapUrl,
};

/// Most numbers a single `sendmsg` call accepts.
pub const SEND_MESSAGE_MAX_RECIPIENTS: usize = 100;

/// Optional `sendmsg` parameters.
///
/// `concat` is only honoured for texts that fit in one segment; longer texts always get
/// the computed segment count (see [`SendMessage::concat`]).
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub from: Option<SenderId>,
    pub concat: Option<Concat>,
    /// Delivery acknowledgement level (`callback`, 0..=7).
    pub callback: Option<u8>,
    /// Delay delivery by this many minutes (`deliv_time`).
    pub deliv_time: Option<u32>,
    /// Give up after this many minutes (`validity`).
    pub validity: Option<u32>,
    pub max_credits: Option<String>,
    /// Required features bitmask (`req_feat`).
    pub req_feat: Option<u32>,
    pub unicode: bool,
    pub mo: bool,
    pub escalate: bool,
    pub client_message_id: Option<ClientMessageId>,
}

#[derive(Debug, Clone)]
pub struct SendMessage {
    recipients: Vec<RawPhoneNumber>,
    text: MessageText,
    options: SendOptions,
}

impl SendMessage {
    pub fn new(
        recipients: Vec<RawPhoneNumber>,
        text: MessageText,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        check_recipients(&recipients)?;
        if recipients.len() > SEND_MESSAGE_MAX_RECIPIENTS {
            return Err(ValidationError::TooManyRecipients {
                max: SEND_MESSAGE_MAX_RECIPIENTS,
                actual: recipients.len(),
            });
        }
        if let Some(callback) = options.callback {
            if callback > 7 {
                return Err(ValidationError::OutOfRange {
                    field: "callback",
                    min: 0,
                    max: 7,
                    actual: u32::from(callback),
                });
            }
        }
        Ok(Self {
            recipients,
            text,
            options,
        })
    }

    pub fn single(to: RawPhoneNumber, text: MessageText) -> Self {
        Self {
            recipients: vec![to],
            text,
            options: SendOptions::default(),
        }
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }

    /// Segment count sent as `concat`.
    ///
    /// Texts over [`Concat::SEGMENT_LEN`] characters always use the computed count,
    /// overriding `options.concat`.
    pub fn concat(&self) -> Option<Concat> {
        Concat::required_for(&self.text).or(self.options.concat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WapAction {
    SignalNone,
    SignalLow,
    #[default]
    SignalMedium,
    SignalHigh,
    Delete,
}

impl WapAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SignalNone => "signal-none",
            Self::SignalLow => "signal-low",
            Self::SignalMedium => "signal-medium",
            Self::SignalHigh => "signal-high",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WapPushOptions {
    pub text: Option<String>,
    /// Service indication id (`si_id`); later pushes with the same id replace earlier ones.
    pub si_id: Option<String>,
    /// Creation timestamp (`si_created`), ISO 8601 as the handset expects it.
    pub created: Option<String>,
    /// Expiry timestamp (`si_expires`), ISO 8601.
    pub expires: Option<String>,
    pub action: Option<WapAction>,
    pub from: Option<SenderId>,
}

/// A WAP push service indication (`si_push`).
///
/// Only requires at least one recipient; the `sendmsg` recipient cap does not apply.
#[derive(Debug, Clone)]
pub struct WapPush {
    recipients: Vec<RawPhoneNumber>,
    url: WapUrl,
    options: WapPushOptions,
}

impl WapPush {
    pub fn new(
        recipients: Vec<RawPhoneNumber>,
        url: WapUrl,
        options: WapPushOptions,
    ) -> Result<Self, ValidationError> {
        check_recipients(&recipients)?;
        Ok(Self {
            recipients,
            url,
            options,
        })
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn url(&self) -> &WapUrl {
        &self.url
    }

    pub fn options(&self) -> &WapPushOptions {
        &self.options
    }
}

/// Selects a message by gateway id or by the caller's own id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageQuery {
    Api(MessageId),
    Client(ClientMessageId),
}

impl From<MessageId> for MessageQuery {
    fn from(value: MessageId) -> Self {
        Self::Api(value)
    }
}

impl From<ClientMessageId> for MessageQuery {
    fn from(value: ClientMessageId) -> Self {
        Self::Client(value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SendOtpOptions {
    /// Message template; the gateway substitutes the generated code.
    pub template: Option<MessageText>,
    pub from: Option<SenderId>,
    /// Minutes the code stays valid.
    pub validity: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct SendOtp {
    to: RawPhoneNumber,
    options: SendOtpOptions,
}

impl SendOtp {
    pub fn new(to: RawPhoneNumber, options: SendOtpOptions) -> Self {
        Self { to, options }
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn options(&self) -> &SendOtpOptions {
        &self.options
    }
}

#[derive(Debug, Clone)]
pub struct VerifyOtp {
    to: RawPhoneNumber,
    code: OtpCode,
}

impl VerifyOtp {
    pub fn new(to: RawPhoneNumber, code: OtpCode) -> Self {
        Self { to, code }
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn code(&self) -> &OtpCode {
        &self.code
    }
}

fn check_recipients(recipients: &[RawPhoneNumber]) -> Result<(), ValidationError> {
    if recipients.is_empty() {
        return Err(ValidationError::Empty {
            field: RawPhoneNumber::FIELD,
        });
    }
    Ok(())
}
