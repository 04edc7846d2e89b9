pub mod message_store;
pub mod models;
pub mod pagination;
