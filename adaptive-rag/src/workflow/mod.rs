//! The adaptive RAG workflow: typed steps, the transition table and the runner.
//!
//! ```text
//! route            → retrieve | websearch
//! retrieve         → grade_documents
//! grade_documents  → generate | websearch        (any passage rejected)
//! websearch        → generate
//! generate         → grade_generation
//! grade_generation → END | generate (not grounded) | websearch (not useful)
//! ```

mod runner;
mod step;
mod transition;

pub use runner::{RagWorkflow, RagWorkflowBuilder};
pub use step::{GenerationGrade, Step, Verdict};
pub use transition::{transition, RetryPolicy};
