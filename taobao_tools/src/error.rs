use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaobaoApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not send request: {0}")]
    RequestError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Taobao API error {code}: {msg}")]
    ApiError { code: i64, msg: String },
    #[error("Unexpected response shape: {0}")]
    ProtocolError(String),
}
