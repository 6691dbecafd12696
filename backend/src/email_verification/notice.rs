use backend_storage::notice::{Notice, NoticeStorage, NoticeStorageResult};

/// Trait for looking up notice templates by id
#[async_trait::async_trait]
pub trait NoticeLookup: Send + Sync {
    /// Returns the notice with this id, or `None` when it does not exist
    async fn find_notice(&self, id: u64) -> NoticeStorageResult<Option<Notice>>;
}

#[async_trait::async_trait]
impl NoticeLookup for NoticeStorage {
    async fn find_notice(&self, id: u64) -> NoticeStorageResult<Option<Notice>> {
        self.get_by_id(id).await
    }
}
