//! Validation for post and comment bodies

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PostValidationError {
    #[error("Enter a title and content, please!")]
    MissingTitleOrContent,

    #[error("Title exceeds maximum length of {0} characters")]
    TitleTooLong(usize),

    #[error("Comment cannot be empty")]
    EmptyComment,
}

const MAX_TITLE_LENGTH: usize = 500;

/// Validate title and content of a new or edited post
pub fn validate_post(title: &str, content: &str) -> Result<(), PostValidationError> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(PostValidationError::MissingTitleOrContent);
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(PostValidationError::TitleTooLong(MAX_TITLE_LENGTH));
    }

    Ok(())
}

pub fn validate_comment(content: &str) -> Result<(), PostValidationError> {
    if content.trim().is_empty() {
        return Err(PostValidationError::EmptyComment);
    }

    Ok(())
}
