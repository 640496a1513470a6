//! Summaries of uploaded reference documents. Only names and types are
//! inspected; the extracted text is not analyzed.

use crate::types::UploadedDocument;

pub const NO_CONTEXT: &str = "No additional context documents provided.";

pub const REQ_RUBRIC: &str = "Assessment criteria and grading rubric considerations";
pub const REQ_INSTRUCTIONS: &str = "Specific assignment instructions and expectations";
pub const REQ_SOURCES: &str = "Required sources and citation guidelines";
pub const REQ_FEEDBACK: &str = "Teacher notes and feedback integration";
pub const REQ_GENERAL: &str = "General academic writing guidelines";

const PROMPT_EXCERPT_CHARS: usize = 500;

pub fn summarize(documents: &[UploadedDocument]) -> String {
    if documents.is_empty() {
        return NO_CONTEXT.to_string();
    }
    let lines: Vec<String> = documents
        .iter()
        .map(|doc| {
            format!(
                "- {} ({}): Contains contextual information for academic guidance",
                doc.name,
                doc.kind.description()
            )
        })
        .collect();
    format!(
        "Context from {} uploaded document(s):\n{}",
        documents.len(),
        lines.join("\n")
    )
}

/// Requirements implied by document names, in document order. Duplicates
/// are dropped.
pub fn key_requirements(documents: &[UploadedDocument]) -> Vec<String> {
    const RULES: &[(&[&str], &str)] = &[
        (&["rubric", "grading"], REQ_RUBRIC),
        (&["assignment", "instruction"], REQ_INSTRUCTIONS),
        (&["source", "reference"], REQ_SOURCES),
        (&["note", "feedback"], REQ_FEEDBACK),
    ];
    let mut out: Vec<String> = Vec::new();
    for doc in documents {
        let name = doc.name.to_lowercase();
        for (needles, requirement) in RULES {
            if needles.iter().any(|n| name.contains(n)) && !out.iter().any(|r| r == requirement) {
                out.push((*requirement).to_string());
            }
        }
    }
    if out.is_empty() {
        out.push(REQ_GENERAL.to_string());
    }
    out
}

pub fn contextual_prompt(documents: &[UploadedDocument], essay: &str) -> String {
    let excerpt: String = essay.chars().take(PROMPT_EXCERPT_CHARS).collect();
    if documents.is_empty() {
        return format!("Provide academic feedback on this essay: {excerpt}...");
    }
    let requirements: Vec<String> = key_requirements(documents)
        .iter()
        .map(|r| format!("- {r}"))
        .collect();
    format!(
        "Please provide academic feedback on this essay, considering the following uploaded context materials:\n\n\
         {}\n\n\
         Key requirements to address:\n{}\n\n\
         Essay content: {excerpt}...\n\n\
         Provide specific, actionable feedback that aligns with the uploaded materials and academic standards.",
        summarize(documents),
        requirements.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentKind;
    use pretty_assertions::assert_eq;

    fn doc(name: &str, kind: DocumentKind) -> UploadedDocument {
        UploadedDocument {
            id: name.to_string(),
            name: name.to_string(),
            byte_size: 10,
            kind,
            mime_type: kind.mime().to_string(),
            extracted_text: String::new(),
            uploaded_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn no_documents_gives_sentinel() {
        assert_eq!(summarize(&[]), NO_CONTEXT);
        assert_eq!(key_requirements(&[]), vec![REQ_GENERAL.to_string()]);
    }

    #[test]
    fn summary_lists_each_document() {
        let docs = [
            doc("rubric.pdf", DocumentKind::Pdf),
            doc("notes.md", DocumentKind::Markdown),
        ];
        assert_eq!(
            summarize(&docs),
            "Context from 2 uploaded document(s):\n\
             - rubric.pdf (PDF Document): Contains contextual information for academic guidance\n\
             - notes.md (Markdown File): Contains contextual information for academic guidance"
        );
    }

    #[test]
    fn requirements_follow_names() {
        let docs = [
            doc("Grading Rubric.docx", DocumentKind::Word),
            doc("reference list.txt", DocumentKind::PlainText),
            doc("rubric-v2.pdf", DocumentKind::Pdf),
        ];
        assert_eq!(
            key_requirements(&docs),
            vec![REQ_RUBRIC.to_string(), REQ_SOURCES.to_string()]
        );
    }

    #[test]
    fn prompt_truncates_essay() {
        let essay = "x".repeat(600);
        let prompt = contextual_prompt(&[], &essay);
        assert_eq!(prompt.matches('x').count(), 500);
        let with_docs = contextual_prompt(&[doc("assignment.txt", DocumentKind::PlainText)], "Hi");
        assert!(with_docs.contains(REQ_INSTRUCTIONS));
        assert!(with_docs.contains("Essay content: Hi..."));
    }
}
