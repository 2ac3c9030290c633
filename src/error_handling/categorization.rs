//! Mapping of `reqwest` failures onto transport error categories.

use super::types::TransportError;

/// Converts a `reqwest::Error` raised while sending a request or reading its
/// body into a [`TransportError`].
///
/// Status errors normally never reach this function (the transport reads the
/// body itself for non-2xx responses), but a status carried on the error is
/// still honored.
pub fn categorize_reqwest_error(url: &str, error: &reqwest::Error) -> TransportError {
    if let Some(status) = error.status() {
        return TransportError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            body: None,
        };
    }

    if error.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_decode() {
        TransportError::Decode {
            message: error.to_string(),
        }
    } else {
        TransportError::Network {
            message: error.to_string(),
        }
    }
}
