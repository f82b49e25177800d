pub mod contact_handler;
pub mod property_handler;
