//! Infrastructure layer - Storage backends, crypto and services

pub mod auth;
pub mod comment;
pub mod content;
pub mod logging;
pub mod post;
pub mod storage;
pub mod user;
