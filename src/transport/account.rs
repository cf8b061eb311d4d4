use serde::Deserialize;

use super::command::Command;
use super::response::{DecodeError, ResponseError, parse_single};
use crate::domain::{BalanceResponse, RawPhoneNumber, RouteCoverageResponse, SessionId};

#[derive(Debug, Clone, Deserialize)]
struct OkLine {
    #[serde(rename = "OK")]
    ok: String,
}

#[derive(Debug, Clone, Deserialize)]
struct SessionLine {
    #[serde(rename = "OK")]
    session_id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct BalanceLine {
    #[serde(rename = "Credit")]
    credit: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CoverageLine {
    #[serde(rename = "OK")]
    detail: String,
    #[serde(rename = "Charge")]
    charge: Option<String>,
}

pub fn encode_auth() -> Command {
    Command::get("auth")
}

pub fn encode_ping() -> Command {
    Command::get("ping")
}

pub fn encode_get_balance() -> Command {
    Command::get("getbalance")
}

pub fn encode_route_coverage(msisdn: &RawPhoneNumber) -> Command {
    Command::get("routeCoverage").param("msisdn", msisdn.raw())
}

/// Decode `OK: <session_id>`.
pub fn decode_auth_response(body: &str) -> Result<SessionId, DecodeError> {
    let line: SessionLine = parse_single(body)?.decode()?;
    SessionId::new(line.session_id.clone()).map_err(|_| {
        DecodeError::Response(ResponseError::InvalidValue {
            field: SessionId::FIELD,
            value: line.session_id,
        })
    })
}

/// Decode a bare `OK:` acknowledgement.
pub fn decode_ok_response(body: &str) -> Result<Option<String>, DecodeError> {
    let line: OkLine = parse_single(body)?.decode()?;
    Ok((!line.ok.is_empty()).then_some(line.ok))
}

pub fn decode_balance_response(body: &str) -> Result<BalanceResponse, DecodeError> {
    let line: BalanceLine = parse_single(body)?.decode()?;
    Ok(BalanceResponse {
        credit: line.credit,
    })
}

pub fn decode_route_coverage_response(body: &str) -> Result<RouteCoverageResponse, DecodeError> {
    let line: CoverageLine = parse_single(body)?.decode()?;
    Ok(RouteCoverageResponse {
        detail: line.detail,
        charge: line.charge,
    })
}
