//! Module: query::encode
//! Responsibility: deterministic query-string projection of query objects.
//! Does not own: query construction or pagination math.
//! Boundary: pure function of its input; same tree, same string.

use crate::{
    query::{QueryObject, QueryValue},
    value::Value,
};
use thiserror::Error as ThisError;

///
/// QueryEncodeError
///
/// The codec met a value shape it has no rule for. Fatal to the
/// reference being resolved.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum QueryEncodeError {
    #[error("query field '{key}' nests a collection inside a collection")]
    NestedList { key: String },

    #[error("query field '{key}' nests an object inside a collection")]
    ObjectInList { key: String },

    #[error("query field '{key}' holds a non-finite number")]
    NonFiniteNumber { key: String },
}

/// Encode a query object into a canonical query string (no leading `?`).
///
/// `None` encodes to the empty string. Null scalars are omitted rather
/// than encoded as empty or literal nulls. Field order follows the
/// object's declaration order; nested objects flatten with dotted
/// names; collections repeat their key per element.
pub fn encode(query: Option<&QueryObject>) -> Result<String, QueryEncodeError> {
    let Some(query) = query else {
        return Ok(String::new());
    };

    let mut pairs = Vec::new();
    encode_object(query, None, &mut pairs)?;

    Ok(pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&"))
}

fn encode_object(
    object: &QueryObject,
    prefix: Option<&str>,
    pairs: &mut Vec<(String, String)>,
) -> Result<(), QueryEncodeError> {
    for (name, value) in object.iter() {
        let key = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.to_string(),
        };
        match value {
            QueryValue::Scalar(scalar) => {
                if let Some(text) = scalar_text(scalar, &key)? {
                    pairs.push((key, text));
                }
            }
            QueryValue::List(items) => {
                for item in items {
                    match item {
                        QueryValue::Scalar(scalar) => {
                            if let Some(text) = scalar_text(scalar, &key)? {
                                pairs.push((key.clone(), text));
                            }
                        }
                        QueryValue::List(_) => {
                            return Err(QueryEncodeError::NestedList { key });
                        }
                        QueryValue::Object(_) => {
                            return Err(QueryEncodeError::ObjectInList { key });
                        }
                    }
                }
            }
            QueryValue::Object(nested) => encode_object(nested, Some(&key), pairs)?,
        }
    }

    Ok(())
}

// Null scalars encode to nothing; free text is percent-escaped, while
// machine-formatted scalars (numbers, booleans, timestamps, ids) keep
// their canonical textual form.
fn scalar_text(value: &Value, key: &str) -> Result<Option<String>, QueryEncodeError> {
    match value {
        Value::Null => Ok(None),
        Value::Float(f) if !f.is_finite() => Err(QueryEncodeError::NonFiniteNumber {
            key: key.to_string(),
        }),
        Value::Text(text) => Ok(Some(urlencoding::encode(text).into_owned())),
        other => Ok(other.route_text()),
    }
}
