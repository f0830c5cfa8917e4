//! Decision nodes of the RAG workflow.
//!
//! Each node implements `Node<WorkflowState, Verdict>`: it takes the state by
//! value, calls at most the collaborators it owns, and returns the new state
//! plus the verdict its outgoing edge decides on.
//!
//! | Node                  | Collaborator         | State change                              |
//! |-----------------------|----------------------|-------------------------------------------|
//! | [`RouterNode`]        | judgment (route)     | none                                      |
//! | [`RetrieveNode`]      | `DocumentIndex`      | replaces `documents`                      |
//! | [`GradeDocumentsNode`]| judgment (relevance) | filters `documents`, sets the flag        |
//! | [`WebSearchNode`]     | `WebSearch`          | appends one web passage                   |
//! | [`GenerateNode`]      | judgment (generate)  | overwrites `generation`                   |
//! | [`GradeGenerationNode`]| judgment (grounding, usefulness) | none                         |

mod generate;
mod grade_documents;
mod grade_generation;
mod retrieve;
mod router;
mod web_search;

pub use generate::GenerateNode;
pub use grade_documents::GradeDocumentsNode;
pub use grade_generation::GradeGenerationNode;
pub use retrieve::{RetrieveNode, DEFAULT_RETRIEVE_TOP_K};
pub use router::RouterNode;
pub use web_search::{WebSearchNode, DEFAULT_WEB_SEARCH_TOP_K};
