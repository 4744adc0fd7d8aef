use http::StatusCode;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by the dispatcher's error type. The handler layer turns
/// these into actual responses, keeping domain errors decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error kind (e.g. `validation_error`), used in logs
    fn error_type(&self) -> &str;

    /// JSON body returned to the caller
    fn response_body(&self) -> serde_json::Value;
}
