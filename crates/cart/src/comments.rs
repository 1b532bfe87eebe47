//! Product detail comments.
//!
//! Comments are session-local: they are shown under a product and never
//! persisted or sent anywhere.

/// Username shown for comments the current user writes.
pub const OWN_USERNAME: &str = "You";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub username: String,
    pub body: String,
}

/// Comments under one product, oldest first.
#[derive(Debug, Clone, Default)]
pub struct CommentThread {
    comments: Vec<Comment>,
}

impl CommentThread {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a comment. Blank bodies are ignored; returns whether one was added.
    pub fn add(&mut self, username: impl Into<String>, body: &str) -> bool {
        let body = body.trim();
        if body.is_empty() {
            return false;
        }
        self.comments.push(Comment {
            username: username.into(),
            body: body.to_string(),
        });
        true
    }

    /// Append a comment as [`OWN_USERNAME`].
    pub fn add_own(&mut self, body: &str) -> bool {
        self.add(OWN_USERNAME, body)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

impl FromIterator<Comment> for CommentThread {
    fn from_iter<I: IntoIterator<Item = Comment>>(iter: I) -> Self {
        Self {
            comments: iter.into_iter().collect(),
        }
    }
}
