//! Conversions from external infrastructure errors into domain errors.

use forge_domain::ForgeError;
use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ForgeError);

impl From<InfraError> for ForgeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ForgeError> for InfraError {
    fn from(value: ForgeError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoForgeError {
    fn into_forge(self) -> ForgeError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ForgeError */
/* -------------------------------------------------------------------------- */

impl IntoForgeError for HttpError {
    fn into_forge(self) -> ForgeError {
        if self.is_timeout() {
            return ForgeError::Transport(format!("HTTP request timed out: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return ForgeError::Transport(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return ForgeError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return ForgeError::MalformedResponse(self.to_string());
        }

        if let Some(status) = self.status() {
            return ForgeError::HttpStatus {
                status: status.as_u16(),
                url: self.url().map(ToString::to_string).unwrap_or_default(),
                body: String::new(),
            };
        }

        ForgeError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_forge())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → ForgeError */
/* -------------------------------------------------------------------------- */

impl IntoForgeError for serde_json::Error {
    fn into_forge(self) -> ForgeError {
        ForgeError::MalformedResponse(format!("unexpected JSON shape: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_forge())
    }
}

/* -------------------------------------------------------------------------- */
/* url / header / toml errors → ForgeError */
/* -------------------------------------------------------------------------- */

impl From<url::ParseError> for InfraError {
    fn from(value: url::ParseError) -> Self {
        InfraError(ForgeError::InvalidInput(format!("invalid URL: {value}")))
    }
}

impl From<InvalidHeaderValue> for InfraError {
    fn from(value: InvalidHeaderValue) -> Self {
        InfraError(ForgeError::InvalidInput(format!("invalid header value: {value}")))
    }
}

impl From<InvalidHeaderName> for InfraError {
    fn from(value: InvalidHeaderName) -> Self {
        InfraError(ForgeError::InvalidInput(format!("invalid header name: {value}")))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(ForgeError::Config(format!("Invalid TOML format: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
