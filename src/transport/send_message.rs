use serde::Deserialize;

use super::command::Command;
use super::response::{DecodeError, Record, ResponseError, message_id, parse_body};
use crate::domain::{
    ClientMessageId, Concat, MessageId, MessageText, RawPhoneNumber, SendMessage,
    SendMessageResponse, SenderId, SentMessage,
};

#[derive(Debug, Clone, Deserialize)]
struct SentLine {
    #[serde(rename = "ID")]
    id: Option<String>,
    #[serde(rename = "To")]
    to: Option<String>,
}

pub fn encode_send_message(request: &SendMessage) -> Command {
    let options = request.options();
    let mut command = Command::post("sendmsg")
        .param(RawPhoneNumber::FIELD, join_recipients(request.recipients()))
        .param(MessageText::FIELD, request.text().as_str());

    command.push_opt(SenderId::FIELD, options.from.as_ref().map(SenderId::as_str));
    command.push_opt(
        Concat::FIELD,
        request.concat().map(|concat| concat.value().to_string()),
    );
    command.push_opt("callback", options.callback.map(|level| level.to_string()));
    command.push_opt("deliv_time", options.deliv_time.map(|mins| mins.to_string()));
    command.push_opt("validity", options.validity.map(|mins| mins.to_string()));
    command.push_opt("max_credits", options.max_credits.as_deref());
    command.push_opt("req_feat", options.req_feat.map(|mask| mask.to_string()));
    command.push_flag("unicode", options.unicode);
    command.push_flag("mo", options.mo);
    command.push_flag("escalate", options.escalate);
    command.push_opt(
        ClientMessageId::FIELD,
        options
            .client_message_id
            .as_ref()
            .map(ClientMessageId::as_str),
    );

    command
}

pub fn join_recipients(recipients: &[RawPhoneNumber]) -> String {
    recipients
        .iter()
        .map(RawPhoneNumber::raw)
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode a `sendmsg`/`si_push` body: one line for a single recipient, one `... To: n` line
/// per recipient otherwise.
///
/// `ERR` lines are kept in the result as failed outcomes. The call as a whole is rejected
/// with [`DecodeError::Api`] only when no line was accepted and some `ERR` line names no
/// recipient.
pub fn decode_send_message_response(body: &str) -> Result<SendMessageResponse, DecodeError> {
    let messages = parse_body(body)?
        .iter()
        .map(decode_sent_line)
        .collect::<Result<Vec<_>, _>>()?;

    if !messages.iter().any(|message| message.outcome.is_ok()) {
        let request_error = messages
            .iter()
            .find(|message| message.to.is_none())
            .and_then(|message| message.outcome.as_ref().err());
        if let Some(err) = request_error {
            return Err(DecodeError::Api(err.clone()));
        }
    }
    Ok(SendMessageResponse { messages })
}

fn decode_sent_line(record: &Record) -> Result<SentMessage, DecodeError> {
    let line: SentLine = record.decode()?;
    let to = line
        .to
        .map(|value| {
            RawPhoneNumber::new(value.clone()).map_err(|_| ResponseError::InvalidValue {
                field: RawPhoneNumber::FIELD,
                value,
            })
        })
        .transpose()?;

    if let Some(err) = record.api_error() {
        return Ok(SentMessage {
            to,
            outcome: Err(err),
        });
    }

    let id = line.id.ok_or_else(|| ResponseError::InvalidValue {
        field: MessageId::FIELD,
        value: record.to_string(),
    })?;
    Ok(SentMessage {
        to,
        outcome: Ok(message_id(id)?),
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::{ErrorCode, SendOptions};
    use crate::transport::command::Method;

    use super::*;

    fn phone(raw: &str) -> RawPhoneNumber {
        RawPhoneNumber::new(raw).unwrap()
    }

    #[test]
    fn encode_minimal_send_params() {
        let request = SendMessage::single(phone("27999000001"), MessageText::new("hi").unwrap());
        let command = encode_send_message(&request);

        assert_eq!(command.name(), "sendmsg");
        assert_eq!(command.method(), Method::Post);
        assert_eq!(
            command.params(),
            &[
                ("to".to_owned(), "27999000001".to_owned()),
                ("text".to_owned(), "hi".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_full_send_params() {
        let options = SendOptions {
            from: Some(SenderId::new("ACME").unwrap()),
            concat: Some(Concat::new(2).unwrap()),
            callback: Some(3),
            deliv_time: Some(10),
            validity: Some(60),
            max_credits: Some("1.5".to_owned()),
            req_feat: Some(48),
            unicode: true,
            mo: true,
            escalate: true,
            client_message_id: Some(ClientMessageId::new("order-7").unwrap()),
        };
        let request = SendMessage::new(
            vec![phone("27999000001"), phone("27999000002")],
            MessageText::new("hello").unwrap(),
            options,
        )
        .unwrap();

        let command = encode_send_message(&request);
        assert_eq!(
            command.params(),
            &[
                ("to".to_owned(), "27999000001,27999000002".to_owned()),
                ("text".to_owned(), "hello".to_owned()),
                ("from".to_owned(), "ACME".to_owned()),
                ("concat".to_owned(), "2".to_owned()),
                ("callback".to_owned(), "3".to_owned()),
                ("deliv_time".to_owned(), "10".to_owned()),
                ("validity".to_owned(), "60".to_owned()),
                ("max_credits".to_owned(), "1.5".to_owned()),
                ("req_feat".to_owned(), "48".to_owned()),
                ("unicode".to_owned(), "1".to_owned()),
                ("mo".to_owned(), "1".to_owned()),
                ("escalate".to_owned(), "1".to_owned()),
                ("climsgid".to_owned(), "order-7".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_long_text_forces_computed_concat() {
        let options = SendOptions {
            concat: Some(Concat::new(1).unwrap()),
            ..Default::default()
        };
        let request = SendMessage::new(
            vec![phone("27999000001")],
            MessageText::new("y".repeat(161)).unwrap(),
            options,
        )
        .unwrap();

        let command = encode_send_message(&request);
        let concat = command
            .params()
            .iter()
            .filter(|(k, _)| k == "concat")
            .map(|(_, v)| v.as_str())
            .collect::<Vec<_>>();
        assert_eq!(concat, vec!["2"]);
    }

    #[test]
    fn decode_single_recipient_id() {
        let response = decode_send_message_response("ID: 12345").unwrap();
        assert_eq!(
            response.messages,
            vec![SentMessage {
                to: None,
                outcome: Ok(MessageId::new("12345").unwrap()),
            }]
        );
    }

    #[test]
    fn decode_batch_keeps_per_recipient_errors() {
        let body = "ID: a1 To: 27999000001\nERR: 114, Cannot route message To: 27999000002\n";
        let response = decode_send_message_response(body).unwrap();

        assert_eq!(response.messages.len(), 2);
        assert_eq!(response.messages[0].to, Some(phone("27999000001")));
        assert_eq!(
            response.messages[0].outcome,
            Ok(MessageId::new("a1").unwrap())
        );

        let err = response.messages[1].outcome.clone().unwrap_err();
        assert_eq!(err.code, ErrorCode::new("114"));
        assert_eq!(err.message, "Cannot route message");
        assert_eq!(response.messages[1].to, Some(phone("27999000002")));
    }

    #[test]
    fn decode_request_level_error_is_raised() {
        let err = decode_send_message_response("ERR: 001, Authentication failed").unwrap_err();
        match err {
            DecodeError::Api(err) => {
                assert_eq!(err.code.as_str(), "001");
                assert_eq!(err.message, "Authentication failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_batch_keeps_accepted_ids_when_a_later_line_fails() {
        let body = "ID: a1 To: 27999000001\nERR: 301, No Credit Left\n";
        let response = decode_send_message_response(body).unwrap();

        assert_eq!(
            response.ids().map(MessageId::as_str).collect::<Vec<_>>(),
            vec!["a1"]
        );
        assert_eq!(response.messages[1].to, None);
        let err = response.messages[1].outcome.clone().unwrap_err();
        assert_eq!(err.code.as_str(), "301");
        assert_eq!(err.message, "No Credit Left");
    }

    #[test]
    fn decode_batch_without_accepted_lines_raises_unaddressed_error() {
        let body = "ERR: 114, Cannot route message To: 27999000001\nERR: 301, No Credit Left\n";
        let err = decode_send_message_response(body).unwrap_err();
        assert!(matches!(err, DecodeError::Api(ref api) if api.code.as_str() == "301"));
    }

    #[test]
    fn decode_line_without_id_is_a_response_error() {
        let err = decode_send_message_response("To: 27999000001").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Response(ResponseError::InvalidValue {
                field: "apimsgid",
                ..
            })
        ));
    }
}
