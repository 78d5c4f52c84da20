use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostId};

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct PostPatch {
    pub title: String,
    pub description: String,
}

/// Storage port behind [`PostStore`](crate::application::post_store::PostStore).
///
/// Implementations own id generation and timestamping, keep insertion order
/// and never hold two posts with the same id.
pub trait PostRepository {
    fn create_post(&mut self, input: NewPost) -> Result<&Post, DomainError>;
    fn get_post(&self, id: PostId) -> Option<&Post>;
    /// `Ok(None)` means no post has this id.
    fn update_post(&mut self, id: PostId, patch: PostPatch) -> Result<Option<&Post>, DomainError>;
    fn delete_post(&mut self, id: PostId) -> bool;
    fn list_posts(&self) -> &[Post];
}
