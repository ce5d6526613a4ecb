use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::{self, Debug, Display};
use std::num::ParseFloatError;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        storage_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<ParseFloatError> for Error {
    fn from(err: ParseFloatError) -> Self {
        parse_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl Error {
    pub fn is_invalid_state_error(&self) -> bool {
        self.code == 100
    }

    pub fn is_invalid_input_error(&self) -> bool {
        self.code == 101
    }

    pub fn is_no_result_error(&self) -> bool {
        self.code == 102
    }

    pub fn is_parse_error(&self) -> bool {
        self.code == 103
    }

    /// Transport-level geocoding failures: network, timeout or a non-2xx answer.
    pub fn is_transport_error(&self) -> bool {
        self.code == 3 || self.code == 4
    }
}

pub fn invalid_state_error() -> Error {
    Error {
        code: 100,
        message: "invalid state".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn no_result_error() -> Error {
    Error {
        code: 102,
        message: "no result".into(),
    }
}

pub fn parse_error<T: Debug>(_: T) -> Error {
    Error {
        code: 103,
        message: "parse error".into(),
    }
}

pub fn storage_error<T: Debug>(_: T) -> Error {
    Error {
        code: 2,
        message: "storage error".into(),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

#[test]
fn client_errors_keep_their_message() {
    use axum::body::HttpBody;
    use tokio_test::block_on;

    let response = no_result_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut body = response.into_body();
    let bytes = block_on(body.data()).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value["code"], 102);
    assert_eq!(value["error"], "no result");
}

#[test]
fn internal_errors_are_masked() {
    let response = upstream_error().into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn parse_float_failures_map_to_parse_error() {
    let err: Error = "north".parse::<f64>().unwrap_err().into();
    assert!(err.is_parse_error());
    assert!(!err.is_transport_error());
}
