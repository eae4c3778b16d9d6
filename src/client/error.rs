use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ClientError {
    #[error("Failed to connect to the DeepSource API")]
    #[diagnostic(
        code(deepsource::client::connection_failed),
        help(
            "Check network connectivity.\nOr set DEEPSOURCE_API_URL if you are using a non-default endpoint."
        )
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("No DeepSource API key configured")]
    #[diagnostic(
        code(deepsource::client::missing_api_key),
        help("Set the DEEPSOURCE_API_KEY environment variable or pass the key explicitly.")
    )]
    MissingApiKey,

    #[error("DeepSource API error ({status}): {message}")]
    #[diagnostic(code(deepsource::client::api_error))]
    Api { status: u16, message: String },

    #[error("GraphQL error: {message}")]
    #[diagnostic(code(deepsource::client::graphql_error))]
    GraphQl { message: String },

    #[error("Invalid response from the DeepSource API: {message}")]
    #[diagnostic(
        code(deepsource::client::invalid_response),
        help("The server returned data in an unexpected shape. This might indicate an API change.")
    )]
    InvalidResponse { message: String },

    #[error("Not found: {entity} '{identifier}'")]
    #[diagnostic(code(deepsource::client::not_found))]
    NotFound { entity: String, identifier: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::ConnectionFailed { source: e }
        } else {
            ClientError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
