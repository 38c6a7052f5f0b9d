pub mod application;
pub mod feedback;

pub use application::ApplicationContext;
pub use feedback::FeedbackRecord;
