//! Clip session management
//!
//! This module contains:
//! - The session façade exposed to host UIs
//! - The committed region collection
//! - Message types and their handlers

pub mod handlers;
pub mod messages;
pub mod regions;
pub mod state;

pub use regions::RegionCollection;
pub use state::ClipSession;
