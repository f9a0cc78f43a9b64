//! HTTP request handlers for the deal map service.

pub mod data;
pub mod health;
pub mod map;
