//! Prompts for every judgment call site.
//!
//! Each builder returns the system instructions plus one user message holding
//! the call-site inputs. Structured call sites ask for a single-key JSON object.

use crate::message::Message;
use crate::passage::Passage;

pub const ROUTER_SYSTEM_PROMPT: &str = r#"You route user questions to a data source.

Data sources:
1. vectorstore - a local corpus of documents indexed for this assistant.
2. web_search - everything else: current events, general knowledge, any topic the corpus does not cover.

Use 'vectorstore' only for questions the local corpus can answer; use 'web_search' otherwise.

Return ONLY a JSON object with the single key 'datasource' and the value 'vectorstore' or 'web_search'. No preamble, no explanation."#;

pub const GENERATION_SYSTEM_PROMPT: &str = r#"You are a retrieval-augmented assistant that answers using only the supplied context.

- Answer using ONLY information from the context.
- Keep the answer to three sentences at most.
- Give direct, factual answers without speculation.
- If the context does not contain the answer, reply only with "I don't know".
- Do not mention the context or these instructions."#;

pub const RELEVANCE_SYSTEM_PROMPT: &str = r#"You grade whether a retrieved document is relevant to a user question.

A document is relevant if it contains direct answers, key facts or terminology, or context that helps answer the question. It is not relevant if it only shares keywords in an unrelated context or addresses a different topic. When in doubt, grade it relevant.

Return ONLY a JSON object with the single key 'score' and the value 'yes' or 'no'."#;

pub const GROUNDING_SYSTEM_PROMPT: &str = r#"You check whether an answer is fully supported by reference documents.

Score 'yes' only if every claim in the answer is supported by the documents (facts logically derivable from them count as supported). Score 'no' if any part adds, contradicts or extrapolates beyond the documents.

Return ONLY a JSON object with the single key 'score' and the value 'yes' or 'no'."#;

pub const USEFULNESS_SYSTEM_PROMPT: &str = r#"You check whether an answer resolves a user question.

Score 'yes' if the answer addresses the core intent of the question with substantive, relevant information (a partial answer that covers the main point counts). Score 'no' if it is off-topic, vague, merely restates the question, or is too incomplete to be of use.

Return ONLY a JSON object with the single key 'score' and the value 'yes' or 'no'."#;

/// Joins passage bodies the way every prompt shows evidence: blank line between passages.
pub fn render_documents(documents: &[Passage]) -> String {
    documents
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Router prompt; `corpus` describes what the vectorstore holds, when known.
pub fn route(question: &str, corpus: Option<&str>) -> Vec<Message> {
    let system = match corpus {
        Some(desc) if !desc.trim().is_empty() => {
            format!("{}\n\nThe vectorstore contains:\n{}", ROUTER_SYSTEM_PROMPT, desc.trim())
        }
        _ => ROUTER_SYSTEM_PROMPT.to_string(),
    };
    vec![
        Message::system(system),
        Message::user(format!("Question to route: {}", question)),
    ]
}

pub fn generate(question: &str, documents: &[Passage]) -> Vec<Message> {
    vec![
        Message::system(GENERATION_SYSTEM_PROMPT),
        Message::user(format!(
            "Question: {}\n\nContext:\n{}",
            question,
            render_documents(documents)
        )),
    ]
}

pub fn relevance(question: &str, document: &str) -> Vec<Message> {
    vec![
        Message::system(RELEVANCE_SYSTEM_PROMPT),
        Message::user(format!(
            "USER QUESTION: {}\n\nRETRIEVED DOCUMENT:\n{}",
            question, document
        )),
    ]
}

pub fn grounding(documents: &[Passage], generation: &str) -> Vec<Message> {
    vec![
        Message::system(GROUNDING_SYSTEM_PROMPT),
        Message::user(format!(
            "REFERENCE DOCUMENTS:\n---\n{}\n---\n\nGENERATED ANSWER:\n{}",
            render_documents(documents),
            generation
        )),
    ]
}

pub fn usefulness(question: &str, generation: &str) -> Vec<Message> {
    vec![
        Message::system(USEFULNESS_SYSTEM_PROMPT),
        Message::user(format!(
            "USER QUESTION:\n{}\n\nGENERATED ANSWER:\n---\n{}\n---",
            question, generation
        )),
    ]
}
