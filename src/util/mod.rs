pub mod email;
pub mod error;
pub mod flag_store;
pub mod logger;
pub mod validation;
