//! The success/failure envelope shared by every data-access operation.
//!
//! # Design
//! `ApiResult` is a two-variant sum type, so a caller must branch before it
//! can touch the payload. Serde support goes through private mirror structs
//! rather than serde's enum representations because the wire shape tags the
//! variant with a boolean `isSuccess` field, and a document that mixes the
//! tag with the wrong payload field must be rejected, not coerced.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TodoError;

/// Outcome of a data-access operation as a value.
///
/// On the wire: `{"isSuccess": true, "data": ...}` or
/// `{"isSuccess": false, "errorMessage": "..."}`. Exactly one payload field
/// is present per variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResult<T> {
    Success { data: T },
    Failure { error_message: String },
}

impl<T> ApiResult<T> {
    pub fn success(data: T) -> Self {
        ApiResult::Success { data }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ApiResult::Failure {
            error_message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success { .. })
    }

    /// Unwrap the envelope on the client side. A failure becomes
    /// `TodoError::Service` carrying the backend's message.
    pub fn into_result(self) -> Result<T, TodoError> {
        match self {
            ApiResult::Success { data } => Ok(data),
            ApiResult::Failure { error_message } => Err(TodoError::Service(error_message)),
        }
    }
}

/// Build the wire value on the server side; the error's display text is the
/// user-visible message.
impl<T> From<Result<T, TodoError>> for ApiResult<T> {
    fn from(result: Result<T, TodoError>) -> Self {
        match result {
            Ok(data) => ApiResult::success(data),
            Err(err) => ApiResult::failure(err.to_string()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRef<'a, T> {
    is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireOwned<T> {
    is_success: bool,
    data: Option<T>,
    error_message: Option<String>,
}

impl<T: Serialize> Serialize for ApiResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            ApiResult::Success { data } => WireRef {
                is_success: true,
                data: Some(data),
                error_message: None,
            },
            ApiResult::Failure { error_message } => WireRef {
                is_success: false,
                data: None,
                error_message: Some(error_message),
            },
        };
        wire.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResult<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireOwned::<T>::deserialize(deserializer)?;
        match (wire.is_success, wire.data, wire.error_message) {
            (true, Some(data), None) => Ok(ApiResult::Success { data }),
            (false, None, Some(error_message)) => Ok(ApiResult::Failure { error_message }),
            (true, _, _) => Err(D::Error::custom(
                "success envelope must carry `data` and nothing else",
            )),
            (false, _, _) => Err(D::Error::custom(
                "failure envelope must carry `errorMessage` and nothing else",
            )),
        }
    }
}
