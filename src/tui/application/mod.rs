pub mod background;
pub mod relay;
pub mod search_service;

#[cfg(test)]
mod background_test;
