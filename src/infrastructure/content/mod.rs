//! Content infrastructure module

mod service;

pub use service::ContentService;
