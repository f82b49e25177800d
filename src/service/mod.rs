pub mod contact_service;
pub mod property_service;
