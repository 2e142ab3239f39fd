//! Repository ports (interfaces) consumed by application services.
//! Adapters live under `database::infrastructure`.

pub mod course_trees;
