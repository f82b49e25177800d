pub mod form;
pub mod newsletter;
pub mod property;
pub mod submission;
