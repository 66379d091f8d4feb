pub mod handle_catalog;
pub mod handle_person;
pub mod handle_status;
