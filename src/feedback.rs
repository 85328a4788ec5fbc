//! User feedback records; the home page shows the latest five.

use {
    crate::kernel::entities::FeedbackId,
    std::sync::atomic::{
        AtomicU64,
        Ordering,
    },
    tokio::sync::RwLock,
    uuid::Uuid,
};

pub const LATEST_FEEDBACK_LEN: usize = 5;

#[derive(Clone, Debug)]
pub struct Feedback {
    pub id:          FeedbackId,
    pub seq:         u64,
    pub feedback_by: String,
    pub user_name:   Option<String>,
    pub user_photo:  Option<String>,
    pub rating:      Option<i32>,
    pub feedback:    String,
}

#[derive(Clone, Debug)]
pub struct FeedbackCreate {
    pub feedback_by: String,
    pub user_name:   Option<String>,
    pub user_photo:  Option<String>,
    pub rating:      Option<i32>,
    pub feedback:    String,
}

#[derive(Debug, Default)]
struct InMemoryStore {
    feedbacks: RwLock<Vec<Feedback>>,
    next_seq:  AtomicU64,
}

#[derive(Debug, Default)]
pub struct Service {
    in_memory_store: InMemoryStore,
}

impl Service {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_feedback(&self, create: FeedbackCreate) -> Feedback {
        let feedback = Feedback {
            id:          Uuid::new_v4(),
            seq:         self.in_memory_store.next_seq.fetch_add(1, Ordering::SeqCst),
            feedback_by: create.feedback_by,
            user_name:   create.user_name,
            user_photo:  create.user_photo,
            rating:      create.rating,
            feedback:    create.feedback,
        };
        self.in_memory_store
            .feedbacks
            .write()
            .await
            .push(feedback.clone());
        feedback
    }

    pub async fn get_feedback_by_author(&self, author: &str) -> Option<Feedback> {
        self.in_memory_store
            .feedbacks
            .read()
            .await
            .iter()
            .find(|feedback| feedback.feedback_by == author)
            .cloned()
    }

    /// Latest five by recency, fetched in full and then truncated like the
    /// listing home slices.
    pub async fn get_latest_feedback(&self) -> Vec<Feedback> {
        let feedbacks = self.in_memory_store.feedbacks.read().await;
        let mut result: Vec<Feedback> = feedbacks.clone();
        result.sort_by(|a, b| b.seq.cmp(&a.seq));
        result.truncate(LATEST_FEEDBACK_LEN);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback_create(author: &str, text: &str) -> FeedbackCreate {
        FeedbackCreate {
            feedback_by: author.to_string(),
            user_name:   None,
            user_photo:  None,
            rating:      Some(5),
            feedback:    text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_latest_feedback_newest_five() {
        let service = Service::new();
        for i in 0..7 {
            service
                .add_feedback(feedback_create(&format!("user-{}", i), "great site"))
                .await;
        }
        let latest = service.get_latest_feedback().await;
        assert_eq!(latest.len(), LATEST_FEEDBACK_LEN);
        assert_eq!(latest[0].feedback_by, "user-6");
        assert_eq!(latest[4].feedback_by, "user-2");
    }

    #[tokio::test]
    async fn test_get_feedback_by_author() {
        let service = Service::new();
        service
            .add_feedback(feedback_create("buyer@example.com", "smooth purchase"))
            .await;
        assert!(service
            .get_feedback_by_author("buyer@example.com")
            .await
            .is_some());
        assert!(service.get_feedback_by_author("ghost").await.is_none());
    }
}
