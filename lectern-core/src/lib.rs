//! # Lectern Core
//!
//! Course content tree synchronization for the Lectern course marketplace.
//!
//! ## Overview
//!
//! An authoring client edits a whole course outline (chapters, subchapters,
//! and typed content items) locally and submits one nested update
//! descriptor plus a flat, ordered list of uploaded files. `lectern-core`
//! reconciles that descriptor against the persisted tree:
//!
//! - **Synchronizer**: three-pass delete/update/create walk per level, see
//!   [`domain::content_tree::TreeSynchronizer`]
//! - **Attachment binding**: uploads are handed to media items strictly in
//!   traversal order
//! - **Quiz normalization**: quiz documents are always stored with a
//!   top-level `questions` key
//! - **Persistence ports**: [`database::ports::course_trees::CourseTreeRepository`]
//!   with Postgres and in-memory adapters
//! - **Application service**: [`application::CourseContentService`] runs
//!   load, synchronize, and save as one unit
//!
//! ## Feature Flags
//!
//! - `database`: Enables the PostgreSQL adapter and embedded migrations
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lectern_core::{
//!     application::{AppUnitOfWork, CourseContentService},
//!     domain::content_tree::TreeSynchronizer,
//! };
//! use lectern_model::{CourseUpdate, FieldPatch, NewCourse};
//!
//! async fn rename() -> lectern_core::Result<()> {
//!     let service = CourseContentService::new(
//!         Arc::new(AppUnitOfWork::in_memory()),
//!         TreeSynchronizer::default(),
//!     );
//!     let course = service
//!         .create_course(NewCourse {
//!             name: "Rust".into(),
//!             description: String::new(),
//!             price: 0,
//!         })
//!         .await?;
//!
//!     let update = CourseUpdate {
//!         name: FieldPatch::Set("Rust in Practice".into()),
//!         ..Default::default()
//!     };
//!     service.edit_course_content(course.id, &update, vec![]).await?;
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Authoring services and the repository unit of work
pub mod application;

/// Repository ports and their adapters
pub mod database;

/// Content tree domain logic
pub mod domain;

/// Error types and error handling utilities
pub mod error;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use error::{LecternError, Result};
