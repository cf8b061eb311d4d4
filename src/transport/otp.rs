use serde::Deserialize;

use super::command::Command;
use super::response::{DecodeError, message_id, parse_single};
use crate::domain::{
    MessageText, OtpCode, RawPhoneNumber, SendOtp, SendOtpResponse, SenderId, VerifyOtp,
    VerifyOtpResponse,
};

#[derive(Debug, Clone, Deserialize)]
struct SendOtpLine {
    #[serde(rename = "ID")]
    id: String,
}

pub fn encode_send_otp(request: &SendOtp) -> Command {
    let options = request.options();
    let mut command = Command::post("sendotp").param(RawPhoneNumber::FIELD, request.to().raw());
    command.push_opt(
        MessageText::FIELD,
        options.template.as_ref().map(MessageText::as_str),
    );
    command.push_opt(SenderId::FIELD, options.from.as_ref().map(SenderId::as_str));
    command.push_opt("validity", options.validity.map(|mins| mins.to_string()));
    command
}

pub fn encode_verify_otp(request: &VerifyOtp) -> Command {
    Command::get("verifyotp")
        .param(RawPhoneNumber::FIELD, request.to().raw())
        .param(OtpCode::FIELD, request.code().as_str())
}

pub fn decode_send_otp_response(body: &str) -> Result<SendOtpResponse, DecodeError> {
    let line: SendOtpLine = parse_single(body)?.decode()?;
    Ok(SendOtpResponse {
        id: message_id(line.id)?,
    })
}

/// A wrong or expired code arrives as an `ERR` line and is raised by the parser.
pub fn decode_verify_otp_response(body: &str) -> Result<VerifyOtpResponse, DecodeError> {
    let detail = super::account::decode_ok_response(body)?;
    Ok(VerifyOtpResponse { detail })
}
