//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("Mailer error: {0}")]
    Mailer(#[from] crate::store::MailerError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Newsletter has never been saved")]
    NeverSaved,
}
