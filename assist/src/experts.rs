//! Canned expert personas and the review comments attributed to them.

use serde::Serialize;

use crate::types::UploadedDocument;

pub const CONTEXT_AUTHOR: &str = "AI Context";

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Expert {
    pub name: &'static str,
    pub role: &'static str,
    pub initials: &'static str,
}

pub const ROSTER: &[Expert] = &[
    Expert {
        name: "Steven Pinker",
        role: "Lead with a vivid, concrete snapshot",
        initials: "SP",
    },
    Expert {
        name: "Mike Boyle",
        role: "Tie lifts to measurable soccer metrics",
        initials: "MB",
    },
    Expert {
        name: "Stuart McGill",
        role: "Professor of spine biomechanics and author of 'Back Mechanic: The Step-by-Step McGill Method to Fix Back Pain'",
        initials: "SM",
    },
];

const BASE_COMMENTS: [&str; 3] = [
    "Your essay is well-structured and clearly connects weightlifting to soccer performance; enriching it with concrete data, vivid examples, and holistic context will deepen credibility and reader engagement.",
    "Consider adding specific percentages of improvement in sprint times, jump heights, or injury reduction rates to strengthen your arguments with quantifiable evidence.",
    "Excellent point on core stability and trunk stiffness. You might expand on the specific exercises that enhance this quality while avoiding spine-compromising movements.",
];

const BASE_PROMPTS: &[&str] = &[
    "Add statistical data on injury reduction",
    "Include specific exercise protocols",
    "Reference recent meta-analyses",
    "Discuss periodization strategies",
    "Address potential contraindications",
    "Compare with other training methods",
];

const CONTEXT_PROMPTS: &[&str] = &[
    "Integrate findings from uploaded materials",
    "Cross-reference with provided guidelines",
];

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ExpertComment {
    pub author: String,
    pub role: String,
    pub initials: String,
    pub comment: String,
}

pub fn find_expert(name: &str) -> Option<&'static Expert> {
    ROSTER.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

/// One comment per roster expert, then one per uploaded document.
pub fn expert_comments(documents: &[UploadedDocument]) -> Vec<ExpertComment> {
    let base = ROSTER.iter().zip(BASE_COMMENTS).map(|(e, comment)| ExpertComment {
        author: e.name.to_string(),
        role: e.role.to_string(),
        initials: e.initials.to_string(),
        comment: comment.to_string(),
    });
    let contextual = documents.iter().map(|doc| ExpertComment {
        author: CONTEXT_AUTHOR.to_string(),
        role: format!("Based on {}", doc.name),
        initials: "AI".to_string(),
        comment: format!(
            "Drawing from your uploaded materials in \"{}\", consider incorporating the specific methodologies and findings mentioned to strengthen your argument about weightlifting's impact on soccer performance.",
            doc.name
        ),
    });
    base.chain(contextual).collect()
}

pub fn review_prompts(documents: &[UploadedDocument]) -> Vec<&'static str> {
    let mut prompts = BASE_PROMPTS.to_vec();
    if !documents.is_empty() {
        prompts.extend_from_slice(CONTEXT_PROMPTS);
    }
    prompts
}

pub fn overall_assessment(documents: &[UploadedDocument]) -> String {
    let bridge = if documents.is_empty() {
        ""
    } else {
        " Based on your uploaded materials,"
    };
    format!(
        "Your essay demonstrates strong academic structure with clear connections between weightlifting and soccer performance.{bridge} Consider adding quantitative data and specific training protocols to enhance credibility."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentKind;
    use pretty_assertions::assert_eq;

    fn doc(name: &str) -> UploadedDocument {
        UploadedDocument {
            id: "d1".into(),
            name: name.into(),
            byte_size: 3,
            kind: DocumentKind::PlainText,
            mime_type: DocumentKind::PLAIN_TEXT_MIME.into(),
            extracted_text: "abc".into(),
            uploaded_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn base_comments_follow_roster() {
        let comments = expert_comments(&[]);
        let authors: Vec<&str> = comments.iter().map(|c| c.author.as_str()).collect();
        assert_eq!(authors, vec!["Steven Pinker", "Mike Boyle", "Stuart McGill"]);
        assert_eq!(comments[1].initials, "MB");
    }

    #[test]
    fn each_document_adds_a_context_comment() {
        let comments = expert_comments(&[doc("rubric.txt"), doc("notes.md")]);
        assert_eq!(comments.len(), 5);
        assert_eq!(comments[3].author, CONTEXT_AUTHOR);
        assert_eq!(comments[4].role, "Based on notes.md");
        assert!(comments[3].comment.contains("\"rubric.txt\""));
    }

    #[test]
    fn prompts_grow_with_context() {
        assert_eq!(review_prompts(&[]).len(), 6);
        let with_docs = review_prompts(&[doc("a.txt")]);
        assert_eq!(with_docs.len(), 8);
        assert_eq!(with_docs[7], "Cross-reference with provided guidelines");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_expert("stuart mcgill").map(|e| e.initials), Some("SM"));
        assert!(find_expert("Nobody").is_none());
        assert!(overall_assessment(&[doc("a.txt")]).contains("uploaded materials"));
    }
}
