//! Transport layer: command construction and the `Key: value` wire format.

mod account;
mod command;
mod message;
mod otp;
mod response;
mod send_message;
mod wap_push;

pub use account::{
    decode_auth_response, decode_balance_response, decode_ok_response,
    decode_route_coverage_response, encode_auth, encode_get_balance, encode_ping,
    encode_route_coverage,
};
pub use command::{Command, Method};
pub use message::{
    decode_message_charge_response, decode_message_status_response, encode_message_charge,
    encode_message_status, encode_stop_message,
};
pub use otp::{
    decode_send_otp_response, decode_verify_otp_response, encode_send_otp, encode_verify_otp,
};
pub use response::{DecodeError, Record, ResponseError, parse_body};
pub use send_message::{decode_send_message_response, encode_send_message};
pub use wap_push::encode_wap_push;
