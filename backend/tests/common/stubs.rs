use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use backend_storage::notice::{Notice, NoticeStorageError, NoticeStorageResult};
use cmall_backend::{
    email_verification::NoticeLookup,
    mailer::{MailTransport, MailerError, MailerResult, OutgoingEmail},
};

/// Notice templates held in memory
#[derive(Default)]
pub struct InMemoryNotices {
    notices: HashMap<u64, String>,
}

impl InMemoryNotices {
    pub fn with(notices: &[(u64, &str)]) -> Self {
        Self {
            notices: notices
                .iter()
                .map(|(id, text)| (*id, (*text).to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl NoticeLookup for InMemoryNotices {
    async fn find_notice(&self, id: u64) -> NoticeStorageResult<Option<Notice>> {
        Ok(self.notices.get(&id).map(|text| Notice {
            id,
            text: text.clone(),
        }))
    }
}

/// Notice store that fails every lookup
pub struct UnavailableNotices;

#[async_trait]
impl NoticeLookup for UnavailableNotices {
    async fn find_notice(&self, _id: u64) -> NoticeStorageResult<Option<Notice>> {
        Err(NoticeStorageError::SerializationError(
            "notice store unavailable".to_string(),
        ))
    }
}

/// Mail transport that records every email instead of sending it
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> MailerResult<()> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Mail transport that rejects every email
pub struct RejectingMailer;

#[async_trait]
impl MailTransport for RejectingMailer {
    async fn send(&self, _email: OutgoingEmail) -> MailerResult<()> {
        let source = "rejected".parse::<lettre::Address>().unwrap_err();
        Err(MailerError::InvalidAddress {
            role: "recipient",
            source,
        })
    }
}
