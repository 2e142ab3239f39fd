pub mod course_trees;
