use std::fmt;

use serde::Serialize;

use crate::judgment::Datasource;

/// One state of the workflow machine. Acceptance is `Next::End`, not a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Route,
    Retrieve,
    GradeDocuments,
    WebSearch,
    Generate,
    GradeGeneration,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Route,
        Step::Retrieve,
        Step::GradeDocuments,
        Step::WebSearch,
        Step::Generate,
        Step::GradeGeneration,
    ];

    /// Node name used in logs and progress output.
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Route => "route",
            Step::Retrieve => "retrieve",
            Step::GradeDocuments => "grade_documents",
            Step::WebSearch => "websearch",
            Step::Generate => "generate",
            Step::GradeGeneration => "grade_generation",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the two-stage generation gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationGrade {
    /// Not grounded in the documents; regenerate.
    NotSupported,
    /// Grounded but does not answer the question; search the web.
    NotUseful,
    /// Grounded and answers the question; accept.
    Useful,
}

/// What a node reports to the transition function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Routed(Datasource),
    Retrieved,
    DocumentsGraded { web_search: bool },
    Searched,
    Generated,
    GenerationGraded(GenerationGrade),
}
