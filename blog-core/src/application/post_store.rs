use tracing::{debug, info};

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDraft, PostId};

/// The post collection of a session: validation in front of a repository.
#[derive(Debug, Clone, Default)]
pub struct PostStore<R: PostRepository = InMemoryPostRepository> {
    repo: R,
}

impl PostStore {
    pub fn in_memory() -> Self {
        Self::new(InMemoryPostRepository::new())
    }
}

impl<R: PostRepository> PostStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_post(&mut self, title: &str, description: &str) -> Result<&Post, DomainError> {
        let draft = PostDraft::new(title, description).validate()?;

        let post = self.repo.create_post(NewPost {
            title: draft.title,
            description: draft.description,
        })?;
        info!(post_id = post.id(), "post created");
        Ok(post)
    }

    /// Posts in insertion order. The borrow ends with the current render pass.
    pub fn list_posts(&self) -> &[Post] {
        self.repo.list_posts()
    }

    pub fn get_post(&self, id: PostId) -> Option<&Post> {
        self.repo.get_post(id)
    }

    /// Like [`get_post`](Self::get_post) but reports a missing post as
    /// [`DomainError::NotFound`].
    pub fn require_post(&self, id: PostId) -> Result<&Post, DomainError> {
        self.repo
            .get_post(id)
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    /// Title is validated before the lookup, so a blank title is reported as
    /// a validation error even for an unknown id. `Ok(None)` means not found.
    pub fn update_post(
        &mut self,
        id: PostId,
        title: &str,
        description: &str,
    ) -> Result<Option<&Post>, DomainError> {
        let draft = PostDraft::new(title, description).validate()?;
        let patch = PostPatch {
            title: draft.title,
            description: draft.description,
        };

        let updated = self.repo.update_post(id, patch)?;
        match updated {
            Some(_) => info!(post_id = id, "post updated"),
            None => debug!(post_id = id, "update skipped, post not found"),
        }
        Ok(updated)
    }

    pub fn delete_post(&mut self, id: PostId) -> bool {
        let deleted = self.repo.delete_post(id);
        if deleted {
            info!(post_id = id, "post deleted");
        } else {
            debug!(post_id = id, "delete skipped, post not found");
        }
        deleted
    }

    pub fn len(&self) -> usize {
        self.repo.list_posts().len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.list_posts().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{Duration, TimeZone, Utc};

    use super::PostStore;
    use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
    use crate::domain::error::DomainError;
    use crate::infrastructure::clock::Clock;

    /// Advances one second per call so created/updated stamps differ.
    struct SteppingClock(std::cell::Cell<i64>);

    impl Clock for SteppingClock {
        fn now(&self) -> chrono::DateTime<Utc> {
            let tick = self.0.get();
            self.0.set(tick + 1);
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(tick)
        }
    }

    #[test]
    fn create_trims_fields_and_appends() {
        let mut store = PostStore::in_memory();

        let created = store
            .create_post("  Hello  ", "  World  ")
            .expect("create must succeed");
        assert_eq!(created.title(), "Hello");
        assert_eq!(created.description(), "World");
        assert!(created.updated_at().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sequential_creates_keep_order_and_unique_ids() {
        let mut store = PostStore::in_memory();
        let titles = ["a", "b", "c", "d", "e"];
        for title in titles {
            store.create_post(title, "").expect("create must succeed");
        }

        let listed: Vec<&str> = store.list_posts().iter().map(|p| p.title()).collect();
        assert_eq!(listed, titles);

        let ids: HashSet<u64> = store.list_posts().iter().map(|p| p.id()).collect();
        assert_eq!(ids.len(), titles.len());
    }

    #[test]
    fn create_with_blank_title_leaves_store_unchanged() {
        let mut store = PostStore::in_memory();

        let err = store.create_post("", "x").expect_err("must fail validation");
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn update_with_blank_title_leaves_post_unchanged() {
        let mut store = PostStore::in_memory();
        let id = store.create_post("A", "x").expect("create must succeed").id();
        let before = store.get_post(id).cloned();

        let err = store
            .update_post(id, "  ", "y")
            .expect_err("must fail validation");
        assert!(matches!(err, DomainError::Validation { .. }));
        assert_eq!(store.get_post(id).cloned(), before);
    }

    #[test]
    fn update_stamps_updated_at_and_keeps_created_at() {
        let repo = InMemoryPostRepository::with_clock(SteppingClock(std::cell::Cell::new(0)));
        let mut store = PostStore::new(repo);
        let created = store.create_post("A", "").expect("create must succeed").clone();

        let updated = store
            .update_post(created.id(), "B", "C")
            .expect("update must succeed")
            .expect("post must exist");

        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.title(), "B");
        assert_eq!(updated.description(), "C");
        assert_eq!(updated.created_at(), created.created_at());
        assert!(updated.updated_at().expect("updated_at must be set") > created.created_at());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_missing_post_returns_none_and_adds_nothing() {
        let mut store = PostStore::in_memory();
        store.create_post("A", "").expect("create must succeed");

        let result = store.update_post(999, "B", "").expect("not found is not an error");
        assert!(result.is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_then_get_is_absent() {
        let mut store = PostStore::in_memory();
        let id = store.create_post("A", "").expect("create must succeed").id();

        assert!(store.delete_post(id));
        assert!(store.get_post(id).is_none());
        assert!(!store.delete_post(id));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn require_post_reports_not_found() {
        let store = PostStore::in_memory();

        let err = store.require_post(7).expect_err("post must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn list_is_stable_without_mutation() {
        let mut store = PostStore::in_memory();
        store.create_post("A", "").expect("create must succeed");
        store.create_post("B", "").expect("create must succeed");

        let first = store.list_posts().to_vec();
        let second = store.list_posts().to_vec();
        assert_eq!(first, second);
    }
}
