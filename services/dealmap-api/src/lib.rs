//! Solar deal map service library
//!
//! Relays the CRM deal list to the browser and serves the map document
//! built by `dealmap-engine`.

pub mod config;
pub mod crm;
pub mod handlers;
pub mod state;
