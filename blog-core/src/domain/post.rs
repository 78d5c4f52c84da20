use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::DomainError;

pub type PostId = u64;

/// A stored post. Fields are only mutable from inside the crate so the
/// title invariant cannot be bypassed by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    id: PostId,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Title and description as typed into the form, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Trims both fields and rejects a blank title.
    pub fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            description: normalize_description(&self.description),
        })
    }
}

impl Post {
    pub(crate) fn new(
        id: PostId,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = normalize_title(&title.into())?;
        let description = normalize_description(&description.into());

        Ok(Self {
            id,
            title,
            description,
            created_at,
            updated_at: None,
        })
    }

    pub(crate) fn revise(
        &mut self,
        title: &str,
        description: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let title = normalize_title(title)?;

        self.title = title;
        self.description = normalize_description(description);
        // A wall clock stepping backwards must not produce an update before creation.
        self.updated_at = Some(updated_at.max(self.created_at));
        Ok(())
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_updated(&self) -> bool {
        self.updated_at.is_some()
    }
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::Validation {
            field: "title",
            message: "must not be empty",
        });
    }
    Ok(title.to_string())
}

fn normalize_description(description: &str) -> String {
    description.trim().to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{DomainError, Post, PostDraft};

    #[test]
    fn draft_validate_rejects_blank_title() {
        let draft = PostDraft::new("   ", "valid description");

        let err = draft.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn draft_validate_accepts_empty_description() {
        let draft = PostDraft::new("title", "   ");

        let validated = draft.validate().expect("must validate");
        assert_eq!(validated.title, "title");
        assert_eq!(validated.description, "");
    }

    #[test]
    fn draft_validate_normalizes_fields() {
        let draft = PostDraft::new("  title  ", "  description  ");

        let validated = draft.validate().expect("must validate");
        assert_eq!(validated.title, "title");
        assert_eq!(validated.description, "description");
    }

    #[test]
    fn post_new_normalizes_and_has_no_update_stamp() {
        let post =
            Post::new(1, "  Title  ", "  Body  ", Utc::now()).expect("post should be created");

        assert_eq!(post.id(), 1);
        assert_eq!(post.title(), "Title");
        assert_eq!(post.description(), "Body");
        assert!(post.updated_at().is_none());
        assert!(!post.is_updated());
    }

    #[test]
    fn revise_keeps_created_at_and_stamps_update() {
        let created_at = Utc::now();
        let mut post = Post::new(1, "A", "", created_at).expect("post should be created");

        post.revise(" B ", " C ", created_at + Duration::seconds(1))
            .expect("revise must succeed");

        assert_eq!(post.title(), "B");
        assert_eq!(post.description(), "C");
        assert_eq!(post.created_at(), created_at);
        assert_eq!(post.updated_at(), Some(created_at + Duration::seconds(1)));
    }

    #[test]
    fn revise_with_blank_title_leaves_post_untouched() {
        let created_at = Utc::now();
        let mut post = Post::new(1, "A", "x", created_at).expect("post should be created");
        let before = post.clone();

        let err = post
            .revise("  ", "y", created_at)
            .expect_err("blank title must be rejected");

        assert_validation_field(err, "title");
        assert_eq!(post, before);
    }

    #[test]
    fn revise_clamps_update_stamp_to_creation() {
        let created_at = Utc::now();
        let mut post = Post::new(1, "A", "", created_at).expect("post should be created");

        post.revise("B", "", created_at - Duration::seconds(1))
            .expect("revise must succeed");
        assert_eq!(post.updated_at(), Some(created_at));
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
