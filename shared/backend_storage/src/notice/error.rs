//! Error types for notice storage operations

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::{get_item::GetItemError, put_item::PutItemError};
use thiserror::Error;

/// Result type for notice storage operations
pub type NoticeStorageResult<T> = Result<T, NoticeStorageError>;

/// Errors that can occur during notice storage operations
#[derive(Error, Debug)]
pub enum NoticeStorageError {
    /// Failed to get notice from Dynamo DB
    #[error("Failed to get notice from DynamoDB: {0}")]
    DynamoDbGetError(#[from] SdkError<GetItemError>),

    /// Failed to insert notice into Dynamo DB
    #[error("Failed to insert notice into DynamoDB: {0}")]
    DynamoDbPutError(#[from] SdkError<PutItemError>),

    /// Serialization error for `serde_dynamo`
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
