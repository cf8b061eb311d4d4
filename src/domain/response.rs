use crate::domain::value::{ErrorCode, MessageId, MessageStatusCode, RawPhoneNumber};

/// Failure reported by the gateway as `ERR: <code>, <message>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}, {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageResponse {
    pub messages: Vec<SentMessage>,
}

impl SendMessageResponse {
    /// Ids of the messages the gateway accepted.
    pub fn ids(&self) -> impl Iterator<Item = &MessageId> {
        self.messages
            .iter()
            .filter_map(|message| message.outcome.as_ref().ok())
    }

    /// Recipients the gateway rejected, with the reason.
    pub fn failures(&self) -> impl Iterator<Item = (Option<&RawPhoneNumber>, &ApiError)> {
        self.messages.iter().filter_map(|message| {
            message
                .outcome
                .as_ref()
                .err()
                .map(|err| (message.to.as_ref(), err))
        })
    }
}

/// One line of a send response. `to` is only present for multi-recipient sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: Option<RawPhoneNumber>,
    pub outcome: Result<MessageId, ApiError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStatusResponse {
    pub id: MessageId,
    pub status: MessageStatusCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageChargeResponse {
    pub id: MessageId,
    pub charge: String,
    pub status: MessageStatusCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceResponse {
    pub credit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCoverageResponse {
    pub detail: String,
    pub charge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOtpResponse {
    pub id: MessageId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOtpResponse {
    pub detail: Option<String>,
}
