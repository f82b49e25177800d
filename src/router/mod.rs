pub mod contact_router;
pub mod property_router;
