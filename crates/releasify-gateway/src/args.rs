//! Request body argument extraction and loose boolean coercion.

use serde_json::{Map, Value};

use crate::error::GatewayError;

pub type Args = Map<String, Value>;

/// Parse a request body into a JSON object.
pub fn parse_json_body(body: &[u8]) -> Result<Args, GatewayError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(args)) => Ok(args),
        _ => Err(GatewayError::JsonBodyRequired),
    }
}

pub fn get_required_arg<'a>(args: &'a Args, name: &str) -> Result<&'a Value, GatewayError> {
    args.get(name)
        .ok_or_else(|| GatewayError::MissingRequiredArg(name.to_string()))
}

/// Required argument that must be a JSON string.
pub fn required_string(args: &Args, name: &str) -> Result<String, GatewayError> {
    match get_required_arg(args, name)? {
        Value::String(s) => Ok(s.clone()),
        _ => Err(GatewayError::InvalidArgType(name.to_string())),
    }
}

/// Optional string argument; `null` counts as absent.
pub fn optional_string(args: &Args, name: &str) -> Result<Option<String>, GatewayError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(GatewayError::InvalidArgType(name.to_string())),
    }
}

/// Optional flag: `default` only when the key is absent, otherwise [`boolify`].
pub fn optional_flag(args: &Args, name: &str, default: bool) -> bool {
    match args.get(name) {
        None => default,
        value => boolify(value),
    }
}

/// Coerce a loosely typed value into a boolean.
///
/// `y`, `yes`, `true` and `1` (any case) and the integer `1` are true, as
/// is a JSON `true`. Everything else is false. Never fails.
pub fn boolify(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64() == Some(1) || n.as_u64() == Some(1),
        Some(Value::String(s)) => matches!(
            s.to_ascii_lowercase().as_str(),
            "y" | "yes" | "true" | "1"
        ),
        _ => false,
    }
}
