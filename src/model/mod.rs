pub mod property;
pub mod submission;
