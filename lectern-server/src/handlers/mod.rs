//! HTTP request handlers organized by functionality

pub mod content;
pub mod courses;
pub mod health;
