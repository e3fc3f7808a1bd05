use crate::core::error::StoreError;
use crate::models::comment::{Category, CategoryCounts, Comment, CommentId};
use crate::models::user::UserId;
use crate::stores::record_table::{Record, RecordTable, SortDirection};
use crate::utils::text::non_blank;
use tracing::{debug, warn};

impl Record for Comment {
    const KIND: &'static str = "Comment";

    fn id(&self) -> u32 {
        self.id
    }
}

/// In-memory store of sentiment comments.
///
/// The store trusts its caller: `author_id` is not checked against the user
/// store, `category` is stored as given, and no ownership rules are applied.
/// See `security::session` for the access checks.
#[derive(Debug)]
pub struct CommentStore {
    comments: RecordTable<Comment>,
}

impl CommentStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            comments: RecordTable::with_capacity(capacity),
        }
    }

    pub fn create_comment(
        &mut self,
        author_id: UserId,
        text: &str,
        category: &str,
    ) -> Result<CommentId, StoreError> {
        let id = self
            .comments
            .insert_with(|id| Comment::new(id, author_id, text, category))
            .inspect_err(|_| {
                warn!(author_id = author_id, max = self.comments.capacity(), "Comment store is full");
            })?;

        debug!(comment_id = id, author_id = author_id, category = category, "Comment created");
        Ok(id)
    }

    pub fn find_by_id(&self, id: CommentId) -> Result<Comment, StoreError> {
        self.comments.get(id).cloned()
    }

    /// Every live comment regardless of owner, in id order
    pub fn list_all(&self) -> Vec<Comment> {
        self.comments.snapshot()
    }

    /// Comments written by `user_id`, keeping their relative order
    pub fn list_by_owner(&self, user_id: UserId) -> Vec<Comment> {
        self.comments.filtered(|comment| comment.author_id == user_id)
    }

    pub fn search_by_text(&self, needle: &str) -> Result<Vec<Comment>, StoreError> {
        self.comments.search(needle, |comment| comment.text.as_str())
    }

    pub fn sort_by_id(&self, direction: SortDirection) -> Vec<Comment> {
        self.comments.sorted_by_id(direction)
    }

    /// Partial update: blank or missing fields keep their current value.
    /// The category is stored as given.
    pub fn edit_comment(
        &mut self,
        id: CommentId,
        new_text: Option<&str>,
        new_category: Option<&str>,
    ) -> Result<(), StoreError> {
        let comment = self.comments.get_mut(id)?;

        if let Some(text) = non_blank(new_text) {
            comment.text = text.to_string();
        }
        if let Some(category) = non_blank(new_category) {
            comment.category = category.to_string();
        }

        debug!(comment_id = id, "Comment updated");
        Ok(())
    }

    pub fn delete_comment(&mut self, id: CommentId) -> Result<(), StoreError> {
        self.comments.remove(id)?;
        debug!(comment_id = id, "Comment deleted");
        Ok(())
    }

    /// Number of comments whose category equals `category` exactly
    pub fn count_by_category(&self, category: &str) -> usize {
        self.comments
            .iter()
            .filter(|comment| comment.category == category)
            .count()
    }

    pub fn category_counts(&self) -> CategoryCounts {
        CategoryCounts {
            positive: self.count_by_category(Category::Positive.as_str()),
            neutral: self.count_by_category(Category::Neutral.as_str()),
            negative: self.count_by_category(Category::Negative.as_str()),
        }
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.comments.capacity()
    }
}
