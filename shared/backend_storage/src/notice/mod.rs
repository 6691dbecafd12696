//! Notice template storage integration using Dynamo DB
//!
//! Notices are message bodies keyed by a numeric id. Email verification
//! fetches one per send and fills in its link placeholder.

mod error;

use std::sync::Arc;

use aws_sdk_dynamodb::{types::AttributeValue, Client as DynamoDbClient};
use serde::{Deserialize, Serialize};
use strum::Display;

pub use error::{NoticeStorageError, NoticeStorageResult};

/// Attribute names for notice table
#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "snake_case")]
pub enum NoticeAttribute {
    /// Numeric id (Primary Key)
    Id,
    /// Message body
    Text,
}

/// Notice data structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Numeric id (Primary Key)
    pub id: u64,
    /// Message body, may contain placeholders
    pub text: String,
}

/// Notice storage client for Dynamo DB operations
pub struct NoticeStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl NoticeStorage {
    /// Creates a new notice storage client
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured Dynamo DB client
    /// * `table_name` - Dynamo DB table name for notices
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }

    /// Gets a notice by id
    ///
    /// Returns `Ok(None)` when no notice with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `NoticeStorageError` if the Dynamo DB operation fails or the
    /// stored item cannot be deserialized
    pub async fn get_by_id(&self, id: u64) -> NoticeStorageResult<Option<Notice>> {
        tracing::debug!(notice_id = id, table = %self.table_name, "Fetching notice");

        let response = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key(
                NoticeAttribute::Id.to_string(),
                AttributeValue::N(id.to_string()),
            )
            .send()
            .await?;

        let item = response
            .item()
            .map(|item| serde_dynamo::from_item(item.clone()))
            .transpose()
            .map_err(|e| NoticeStorageError::SerializationError(e.to_string()))?;

        Ok(item)
    }

    /// Inserts or replaces a notice
    ///
    /// # Errors
    ///
    /// Returns `NoticeStorageError` if the item cannot be serialized or the
    /// Dynamo DB operation fails
    pub async fn put(&self, notice: &Notice) -> NoticeStorageResult<()> {
        let item = serde_dynamo::to_item(notice)
            .map_err(|e| NoticeStorageError::SerializationError(e.to_string()))?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await?;

        Ok(())
    }
}
