//! Unit tests for adaptive-rag-cli, organized by module.
//!
//! Tests are BDD-style with Given/When/Then comments and descriptive names.

mod run;
