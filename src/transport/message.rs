use serde::Deserialize;

use super::command::Command;
use super::response::{DecodeError, message_id, parse_single};
use crate::domain::{
    ClientMessageId, MessageChargeResponse, MessageId, MessageQuery, MessageStatusCode,
    MessageStatusResponse,
};

#[derive(Debug, Clone, Deserialize)]
struct StatusLine {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChargeLine {
    #[serde(rename = "apiMsgId")]
    id: String,
    charge: String,
    status: String,
}

pub fn encode_message_status(query: &MessageQuery) -> Command {
    with_query(Command::get("querymsg"), query)
}

pub fn encode_stop_message(query: &MessageQuery) -> Command {
    with_query(Command::get("delmsg"), query)
}

pub fn encode_message_charge(id: &MessageId) -> Command {
    Command::get("getmsgcharge").param(MessageId::FIELD, id.as_str())
}

fn with_query(command: Command, query: &MessageQuery) -> Command {
    match query {
        MessageQuery::Api(id) => command.param(MessageId::FIELD, id.as_str()),
        MessageQuery::Client(id) => command.param(ClientMessageId::FIELD, id.as_str()),
    }
}

/// Decode `ID: <apimsgid> Status: <code>` (`querymsg` and `delmsg`).
pub fn decode_message_status_response(body: &str) -> Result<MessageStatusResponse, DecodeError> {
    let line: StatusLine = parse_single(body)?.decode()?;
    Ok(MessageStatusResponse {
        id: message_id(line.id)?,
        status: MessageStatusCode::new(line.status),
    })
}

pub fn decode_message_charge_response(body: &str) -> Result<MessageChargeResponse, DecodeError> {
    let line: ChargeLine = parse_single(body)?.decode()?;
    Ok(MessageChargeResponse {
        id: message_id(line.id)?,
        charge: line.charge,
        status: MessageStatusCode::new(line.status),
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::KnownMessageStatus;
    use crate::transport::response::ResponseError;

    use super::*;

    #[test]
    fn encode_query_by_api_or_client_id() {
        let by_api = encode_message_status(&MessageQuery::from(MessageId::new("abc").unwrap()));
        assert_eq!(by_api.name(), "querymsg");
        assert_eq!(
            by_api.params(),
            &[("apimsgid".to_owned(), "abc".to_owned())]
        );

        let by_client = encode_stop_message(&MessageQuery::from(
            ClientMessageId::new("mine").unwrap(),
        ));
        assert_eq!(by_client.name(), "delmsg");
        assert_eq!(
            by_client.params(),
            &[("climsgid".to_owned(), "mine".to_owned())]
        );
    }

    #[test]
    fn encode_charge_uses_api_id() {
        let command = encode_message_charge(&MessageId::new("abc").unwrap());
        assert_eq!(command.name(), "getmsgcharge");
        assert_eq!(
            command.params(),
            &[("apimsgid".to_owned(), "abc".to_owned())]
        );
    }

    #[test]
    fn decode_status_line() {
        let response = decode_message_status_response("ID: 996411ad91fa Status: 004").unwrap();
        assert_eq!(response.id.as_str(), "996411ad91fa");
        assert_eq!(
            response.status.known(),
            Some(KnownMessageStatus::ReceivedByRecipient)
        );
    }

    #[test]
    fn decode_charge_line() {
        let response =
            decode_message_charge_response("apiMsgId: 996411ad91fa charge: 1.5 status: 004")
                .unwrap();
        assert_eq!(response.id.as_str(), "996411ad91fa");
        assert_eq!(response.charge, "1.5");
        assert_eq!(response.status.as_str(), "004");
    }

    #[test]
    fn decode_status_err_is_raised() {
        let err = decode_message_status_response("ERR: 103, Unknown API message ID").unwrap_err();
        assert!(matches!(err, DecodeError::Api(ref api) if api.code.as_str() == "103"));
    }

    #[test]
    fn decode_status_without_status_key_fails() {
        let err = decode_message_status_response("ID: 996411ad91fa").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Response(ResponseError::Decode { .. })
        ));
    }
}
