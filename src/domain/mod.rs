//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    MessageQuery, SEND_MESSAGE_MAX_RECIPIENTS, SendMessage, SendOptions, SendOtp, SendOtpOptions,
    VerifyOtp, WapAction, WapPush, WapPushOptions,
};
pub use response::{
    ApiError, BalanceResponse, MessageChargeResponse, MessageStatusResponse,
    RouteCoverageResponse, SendMessageResponse, SendOtpResponse, SentMessage, VerifyOtpResponse,
};
pub use validation::ValidationError;
pub use value::{
    ApiId, ClientMessageId, Concat, ErrorCode, KnownErrorCode, KnownMessageStatus, MessageId,
    MessageStatusCode, MessageText, OtpCode, Password, PhoneNumber, RawPhoneNumber, SenderId,
    SessionId, Username, WapUrl,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> RawPhoneNumber {
        RawPhoneNumber::new("27999000001").unwrap()
    }

    #[test]
    fn send_message_recipient_limit_is_enforced() {
        let msg = MessageText::new("hi").unwrap();
        let recipients = vec![phone(); SEND_MESSAGE_MAX_RECIPIENTS + 1];
        let err = SendMessage::new(recipients, msg, SendOptions::default()).unwrap_err();
        assert!(matches!(err, ValidationError::TooManyRecipients { .. }));
    }

    #[test]
    fn send_message_accepts_exactly_the_recipient_limit() {
        let msg = MessageText::new("hi").unwrap();
        let recipients = vec![phone(); SEND_MESSAGE_MAX_RECIPIENTS];
        let request = SendMessage::new(recipients, msg, SendOptions::default()).unwrap();
        assert_eq!(request.recipients().len(), 100);
    }

    #[test]
    fn wap_push_is_not_capped_at_the_send_limit() {
        let url = WapUrl::new("https://example.com/x").unwrap();
        let recipients = vec![phone(); SEND_MESSAGE_MAX_RECIPIENTS + 1];
        let request = WapPush::new(recipients, url, WapPushOptions::default()).unwrap();
        assert_eq!(request.recipients().len(), 101);
    }

    #[test]
    fn send_message_requires_recipients() {
        let msg = MessageText::new("hi").unwrap();
        let err = SendMessage::new(Vec::new(), msg, SendOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Empty {
                field: RawPhoneNumber::FIELD
            }
        ));
    }

    #[test]
    fn send_message_rejects_unknown_callback_level() {
        let msg = MessageText::new("hi").unwrap();
        let options = SendOptions {
            callback: Some(8),
            ..Default::default()
        };
        let err = SendMessage::new(vec![phone()], msg, options).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "callback",
                ..
            }
        ));
    }

    #[test]
    fn long_text_concat_overrides_caller_value() {
        let msg = MessageText::new("x".repeat(400)).unwrap();
        let options = SendOptions {
            concat: Some(Concat::new(1).unwrap()),
            ..Default::default()
        };
        let request = SendMessage::new(vec![phone()], msg, options).unwrap();
        assert_eq!(request.concat().map(Concat::value), Some(3));
    }

    #[test]
    fn short_text_keeps_caller_concat() {
        let msg = MessageText::new("short").unwrap();
        let options = SendOptions {
            concat: Some(Concat::new(2).unwrap()),
            ..Default::default()
        };
        let request = SendMessage::new(vec![phone()], msg, options).unwrap();
        assert_eq!(request.concat().map(Concat::value), Some(2));

        let request = SendMessage::single(phone(), MessageText::new("short").unwrap());
        assert_eq!(request.concat(), None);
    }

    #[test]
    fn wap_push_requires_recipients() {
        let url = WapUrl::new("https://example.com").unwrap();
        let err = WapPush::new(Vec::new(), url, WapPushOptions::default()).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn message_query_from_ids() {
        let api = MessageId::new("abc").unwrap();
        assert_eq!(MessageQuery::from(api.clone()), MessageQuery::Api(api));

        let cli = ClientMessageId::new("mine").unwrap();
        assert_eq!(MessageQuery::from(cli.clone()), MessageQuery::Client(cli));
    }

    #[test]
    fn send_response_splits_ids_and_failures() {
        let response = SendMessageResponse {
            messages: vec![
                SentMessage {
                    to: Some(phone()),
                    outcome: Ok(MessageId::new("a1").unwrap()),
                },
                SentMessage {
                    to: Some(RawPhoneNumber::new("27999000002").unwrap()),
                    outcome: Err(ApiError {
                        code: ErrorCode::new("114"),
                        message: "Cannot route message".to_owned(),
                    }),
                },
            ],
        };

        let ids = response.ids().map(MessageId::as_str).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a1"]);

        let failures = response.failures().collect::<Vec<_>>();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0.map(RawPhoneNumber::raw), Some("27999000002"));
        assert_eq!(failures[0].1.to_string(), "114, Cannot route message");
    }
}
