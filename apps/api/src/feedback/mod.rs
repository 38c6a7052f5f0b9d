// Feedback: append-only storage of user ratings.

pub mod handlers;
pub mod store;

pub use store::{FeedbackStore, PgFeedbackStore, StorageError};
