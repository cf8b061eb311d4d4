use std::fmt;

use serde::de::value::{Error as ValueError, MapDeserializer};
use serde::de::{DeserializeOwned, IntoDeserializer, Visitor};

use crate::domain::{ApiError, ErrorCode, MessageId};

const ERROR_KEY: &str = "ERR";

/// Response body is not in the `Key: value` line format, or lacks a required key.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("empty response body")]
    EmptyResponse,

    #[error("line does not start with a key: {line:?}")]
    MalformedLine { line: String },

    #[error("unexpected record {record}: {source}")]
    Decode {
        record: String,
        #[source]
        source: ValueError,
    },

    #[error("invalid {field} value in response: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// Decoding outcome that is not a typed result: either the body was unreadable or the
/// gateway reported an `ERR`.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One response line split into `Key: value` pairs, in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// `ERR: <code>, <message>` split at the first comma.
    pub fn api_error(&self) -> Option<ApiError> {
        let value = self.get(ERROR_KEY)?;
        let (code, message) = value.split_once(',').unwrap_or((value, ""));
        Some(ApiError {
            code: ErrorCode::new(code),
            message: message.trim().to_owned(),
        })
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ResponseError> {
        let deserializer: MapDeserializer<'_, _, ValueError> = MapDeserializer::new(
            self.fields
                .iter()
                .map(|(key, value)| (key.as_str(), FieldValue(value))),
        );
        T::deserialize(deserializer).map_err(|source| ResponseError::Decode {
            record: self.to_string(),
            source,
        })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (key, value)) in self.fields.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            if value.is_empty() {
                write!(f, "{key}:")?;
            } else {
                write!(f, "{key}: {value}")?;
            }
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Record value as seen by serde: an empty value reads as `None` for optional fields.
struct FieldValue<'a>(&'a str);

impl<'de> IntoDeserializer<'de, ValueError> for FieldValue<'_> {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

impl<'de> serde::Deserializer<'de> for FieldValue<'_> {
    type Error = ValueError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ValueError> {
        visitor.visit_str(self.0)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ValueError> {
        if self.0.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 char str string bytes byte_buf unit
        unit_struct newtype_struct seq tuple tuple_struct map struct enum identifier ignored_any
    }
}

/// Parse every non-blank line of `body` into a [`Record`].
pub fn parse_body(body: &str) -> Result<Vec<Record>, ResponseError> {
    let records = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect::<Result<Vec<_>, _>>()?;
    if records.is_empty() {
        return Err(ResponseError::EmptyResponse);
    }
    Ok(records)
}

/// Parse a single-line response; an `ERR` line becomes [`DecodeError::Api`].
pub fn parse_single(body: &str) -> Result<Record, DecodeError> {
    let mut records = parse_body(body)?.into_iter();
    let record = records.next().ok_or(ResponseError::EmptyResponse)?;
    if let Some(err) = record.api_error() {
        return Err(DecodeError::Api(err));
    }
    Ok(record)
}

pub fn message_id(value: String) -> Result<MessageId, ResponseError> {
    MessageId::new(value.clone()).map_err(|_| ResponseError::InvalidValue {
        field: MessageId::FIELD,
        value,
    })
}

pub fn parse_line(line: &str) -> Result<Record, ResponseError> {
    let mut fields = Vec::<(String, String)>::new();
    let mut current: Option<(String, String)> = None;

    for token in line.split_whitespace() {
        if let Some(key) = key_token(token) {
            fields.extend(current.take());
            current = Some((key.to_owned(), String::new()));
            continue;
        }
        let Some((_, value)) = current.as_mut() else {
            return Err(ResponseError::MalformedLine {
                line: line.to_owned(),
            });
        };
        if !value.is_empty() {
            value.push(' ');
        }
        value.push_str(token);
    }
    fields.extend(current);

    if fields.is_empty() {
        return Err(ResponseError::MalformedLine {
            line: line.to_owned(),
        });
    }
    Ok(Record { fields })
}

fn key_token(token: &str) -> Option<&str> {
    let key = token.strip_suffix(':')?;
    let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(key)
}
