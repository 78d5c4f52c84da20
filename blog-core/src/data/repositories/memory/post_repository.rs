use tracing::debug;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostId};
use crate::infrastructure::clock::{Clock, SystemClock};

const FIRST_POST_ID: PostId = 1;

/// Vec-backed repository. Vector order is insertion order; ids come from a
/// counter that only moves forward, so a deleted id is never handed out again.
#[derive(Debug, Clone)]
pub struct InMemoryPostRepository<C: Clock = SystemClock> {
    posts: Vec<Post>,
    next_id: PostId,
    clock: C,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryPostRepository<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            posts: Vec::new(),
            next_id: FIRST_POST_ID,
            clock,
        }
    }

    fn position(&self, id: PostId) -> Option<usize> {
        self.posts.iter().position(|post| post.id() == id)
    }
}

impl<C: Clock> PostRepository for InMemoryPostRepository<C> {
    fn create_post(&mut self, input: NewPost) -> Result<&Post, DomainError> {
        let id = self.next_id;
        let post = Post::new(id, input.title, input.description, self.clock.now())?;
        self.next_id += 1;

        self.posts.push(post);
        debug!(post_id = id, total = self.posts.len(), "post stored");

        let index = self.posts.len() - 1;
        Ok(&self.posts[index])
    }

    fn get_post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id() == id)
    }

    fn update_post(&mut self, id: PostId, patch: PostPatch) -> Result<Option<&Post>, DomainError> {
        let now = self.clock.now();
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let post = &mut self.posts[index];
        post.revise(&patch.title, &patch.description, now)?;
        Ok(Some(&*post))
    }

    fn delete_post(&mut self, id: PostId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.posts.remove(index);
                true
            }
            None => false,
        }
    }

    fn list_posts(&self) -> &[Post] {
        &self.posts
    }
}
