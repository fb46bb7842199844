use thiserror::Error;

/// Errors raised while decoding, encoding or reconciling, and by typed
/// access to model slots.
///
/// Codec failures are passed through unchanged. There is no validation
/// layer that adds paths or collects multiple problems.
#[derive(Debug, Error)]
pub enum Error {
    /// A codec that cannot handle the absent marker was given one.
    #[error("value is absent")]
    Absent,
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("failed to convert value: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("slot `{name}` holds `{holds}`, not `{requested}`")]
    SlotType {
        name: String,
        holds: &'static str,
        requested: &'static str,
    },
    #[error("`{name}` overrides a `{prior}` with an incompatible `{found}`")]
    OverrideType {
        name: String,
        prior: &'static str,
        found: &'static str,
    },
    #[error("unknown method `{0}`")]
    UnknownMethod(String),
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Builds an error from a host codec's own message.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    pub(crate) fn unexpected(expected: &'static str, found: &serde_json::Value) -> Self {
        Self::UnexpectedShape {
            expected,
            found: modeltyped_util::value_kind(found),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unexpected_names_the_found_kind() {
        let err = Error::unexpected("object", &json!([1]));
        assert_eq!(err.to_string(), "expected object, found array");
    }

    #[test]
    fn custom_keeps_message() {
        assert_eq!(Error::custom("bad date").to_string(), "bad date");
    }

    #[test]
    fn json_errors_convert() {
        let source = serde_json::from_value::<String>(json!(1)).unwrap_err();
        let err: Error = source.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
