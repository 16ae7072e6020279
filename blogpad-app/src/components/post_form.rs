use shared::models::PostInput;
use std::future::Future;

use crate::error::{ClientError, ClientResult};

pub const FORM_HEADING: &str = "Create New Post";

/// Title/content entry for a new post.
///
/// The form never talks to the backend itself; [`PostForm::submit`] hands
/// the validated input to whatever handler the page supplies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    title: String,
    content: String,
}

impl PostForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn reset(&mut self) {
        self.title.clear();
        self.content.clear();
    }

    /// Both fields are required; whitespace alone does not count.
    ///
    /// # Errors
    /// Returns [`ClientError::Validation`] naming the first missing field.
    pub fn validate(&self) -> ClientResult<PostInput> {
        if self.title.trim().is_empty() {
            return Err(ClientError::Validation("Title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(ClientError::Validation("Content is required".to_string()));
        }
        Ok(PostInput::new(self.title.clone(), self.content.clone()))
    }

    /// Validate, run `handler`, then clear the fields whatever the outcome.
    ///
    /// # Errors
    /// A validation failure (the handler is not called and the fields are
    /// kept), or whatever the handler returns.
    pub async fn submit<F, Fut, T>(&mut self, handler: F) -> ClientResult<T>
    where
        F: FnOnce(PostInput) -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let input = self.validate()?;
        let result = handler(input).await;
        self.reset();
        result
    }

    #[must_use]
    pub fn submit_label(is_submitting: bool) -> &'static str {
        if is_submitting {
            "Creating..."
        } else {
            "Create Post"
        }
    }

    #[must_use]
    pub fn submit_disabled(is_submitting: bool) -> bool {
        is_submitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::cell::Cell;

    fn filled() -> PostForm {
        let mut form = PostForm::new();
        form.set_title("Hello");
        form.set_content("World");
        form
    }

    #[tokio::test]
    async fn test_submit_passes_input_and_clears_fields() {
        let mut form = filled();
        let seen = form
            .submit(|input| async move { Ok::<_, ClientError>(input) })
            .await
            .unwrap();

        assert_eq!(seen, PostInput::new("Hello", "World"));
        assert_eq!(form, PostForm::new());
    }

    #[tokio::test]
    async fn test_submit_clears_fields_on_handler_failure() {
        let mut form = filled();
        let result: ClientResult<()> = form
            .submit(|_| async {
                Err(ClientError::Http {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: None,
                })
            })
            .await;

        assert!(result.is_err());
        assert_eq!(form.title(), "");
        assert_eq!(form.content(), "");
    }

    #[tokio::test]
    async fn test_missing_field_skips_handler_and_keeps_input() {
        let called = Cell::new(false);
        let mut form = PostForm::new();
        form.set_title("Only a title");

        let result: ClientResult<()> = form
            .submit(|_| {
                called.set(true);
                async { Ok(()) }
            })
            .await;

        assert!(matches!(result, Err(ClientError::Validation(ref msg)) if msg == "Content is required"));
        assert!(!called.get());
        assert_eq!(form.title(), "Only a title");
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let mut form = filled();
        form.set_title("   ");
        assert!(matches!(form.validate(), Err(ClientError::Validation(ref msg)) if msg == "Title is required"));
    }

    #[test]
    fn test_submit_label_tracks_busy_flag() {
        assert_eq!(PostForm::submit_label(true), "Creating...");
        assert_eq!(PostForm::submit_label(false), "Create Post");
        assert!(PostForm::submit_disabled(true));
        assert!(!PostForm::submit_disabled(false));
    }
}
