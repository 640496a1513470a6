//! Ordered keyword / regex rules. Each rule looks at one sentence and
//! yields at most one suggestion.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::sentences::Sentence;
use crate::types::Placement;
use crate::types::Priority;
use crate::types::Suggestion;
use crate::types::SuggestionKind;

#[allow(clippy::expect_used)]
static RESEARCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:studies (?:show|suggest|indicate|demonstrate)|research (?:shows|indicates|suggests|demonstrates)|according to|data (?:suggests|shows|indicates)|evidence (?:suggests|shows)|proven|demonstrated|established)\b",
    )
    .expect("research regex")
});

#[allow(clippy::expect_used)]
static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+(?:\.\d+)?(?:\s?%|\s?percent\b)").expect("percent regex")
});

#[allow(clippy::expect_used)]
static COMPARATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:significantly|dramatically|substantially|(?:more|less) \w+ than|better than|worse than|superior to|inferior to|outperform(?:s|ed)?)\b",
    )
    .expect("comparative regex")
});

#[allow(clippy::expect_used)]
static VAGUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(many|most|some|often|usually)\b").expect("vague regex"));

#[allow(clippy::expect_used)]
static EFFECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:improves|enhances|increases|reduces)\b").expect("effect regex")
});

#[allow(clippy::expect_used)]
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("digit regex"));

/// `(Author, 2020)`, `(Author et al., 2020)`, `(A & B, 2020)`, `[12]`.
#[allow(clippy::expect_used)]
static CITED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\(\p{Lu}[\p{L}'\-]+(?:\s+et al\.|\s+(?:&|and)\s+\p{Lu}[\p{L}'\-]+)?,\s*\d{4}[a-z]?\)|\[\d+(?:\s*[,\-]\s*\d+)*\]",
    )
    .expect("citation regex")
});

pub(crate) const LONG_PARAGRAPH_SENTENCES: usize = 4;
pub(crate) const LONG_PARAGRAPH_MIN_BYTES: usize = 50;

/// State shared by the rules for one analysis pass.
pub(crate) struct Scan<'a> {
    /// Lowercased document, for document-wide keyword conditions.
    pub lower: String,
    pub citation_for: &'a dyn Fn(&str) -> String,
    /// Appended to citation messages when context documents ask for it.
    pub citation_note: Option<&'a str>,
    pub fired_topics: HashSet<&'static str>,
}

pub(crate) type Rule = fn(&mut Scan<'_>, &Sentence<'_>) -> Option<Suggestion>;

/// Rules in scan order.
pub(crate) const RULES: &[Rule] = &[
    missing_citation,
    statistical_claim,
    comparative_claim,
    vague_quantifier,
    unquantified_effect,
    long_paragraph,
    topic_keyword,
];

pub fn has_citation(sentence: &str) -> bool {
    CITED_RE.is_match(sentence) || sentence.contains("et al.")
}

/// Number of parenthetical or numeric citations in `text`.
pub fn citation_count(text: &str) -> usize {
    CITED_RE.find_iter(text).count()
}

fn draft(detector: &str, kind: SuggestionKind, priority: Priority, anchor: usize) -> Suggestion {
    Suggestion {
        id: format!("{detector}-{anchor}"),
        kind,
        detector: detector.to_string(),
        source_text: String::new(),
        insertion_text: String::new(),
        message: String::new(),
        action: String::new(),
        anchor,
        placement: Placement::Anchor,
        priority,
        expert: None,
        confidence: 0.0,
    }
}

fn citation(
    scan: &Scan<'_>,
    sentence: &Sentence<'_>,
    detector: &str,
    priority: Priority,
    re: &Regex,
    confidence: f32,
) -> Option<Suggestion> {
    if has_citation(sentence.text) {
        return None;
    }
    let m = re.find(sentence.text)?;
    let mut message = format!("Consider adding a citation for: \"{}\"", m.as_str());
    if let Some(note) = scan.citation_note {
        message.push(' ');
        message.push_str(note);
    }
    Some(Suggestion {
        source_text: m.as_str().to_string(),
        insertion_text: format!(" {}", (scan.citation_for)(sentence.text)),
        message,
        action: "Add Citation".to_string(),
        placement: Placement::Offset(sentence.body_end()),
        expert: Some("Academic Standards".to_string()),
        confidence,
        ..draft(detector, SuggestionKind::Citation, priority, sentence.start + m.start())
    })
}

fn missing_citation(scan: &mut Scan<'_>, sentence: &Sentence<'_>) -> Option<Suggestion> {
    citation(scan, sentence, "missing-citation", Priority::High, &RESEARCH_RE, 0.78)
}

fn statistical_claim(scan: &mut Scan<'_>, sentence: &Sentence<'_>) -> Option<Suggestion> {
    citation(scan, sentence, "statistical-claim", Priority::High, &PERCENT_RE, 0.82)
}

fn comparative_claim(scan: &mut Scan<'_>, sentence: &Sentence<'_>) -> Option<Suggestion> {
    citation(scan, sentence, "comparative-claim", Priority::Medium, &COMPARATIVE_RE, 0.7)
}

fn vague_quantifier(_scan: &mut Scan<'_>, sentence: &Sentence<'_>) -> Option<Suggestion> {
    let caps = VAGUE_RE.captures(sentence.text)?;
    let m = caps.get(1)?;
    let term = m.as_str().to_ascii_lowercase();
    let insertion = match term.as_str() {
        "many" => "approximately 75% of",
        "most" => "over 80% of",
        "some" => "35-40% of",
        "often" => "in roughly 60% of cases",
        _ => "in about 70% of cases",
    };
    Some(Suggestion {
        source_text: m.as_str().to_string(),
        insertion_text: insertion.to_string(),
        message: format!("Consider being more specific than \"{term}\" with quantitative data."),
        action: "Add Specifics".to_string(),
        placement: Placement::Cursor,
        expert: Some("Mike Boyle".to_string()),
        confidence: 0.65,
        ..draft(
            "vague-quantifier",
            SuggestionKind::Clarification,
            Priority::Medium,
            sentence.start + m.start(),
        )
    })
}

fn unquantified_effect(_scan: &mut Scan<'_>, sentence: &Sentence<'_>) -> Option<Suggestion> {
    if DIGIT_RE.is_match(sentence.text) {
        return None;
    }
    let m = EFFECT_RE.find(sentence.text)?;
    Some(Suggestion {
        source_text: m.as_str().to_string(),
        insertion_text: " by approximately 15-25%".to_string(),
        message: "Quantify the effect: add specific percentages or measurable outcomes to strengthen your argument.".to_string(),
        action: "Quantify".to_string(),
        placement: Placement::Offset(sentence.start + m.end()),
        confidence: 0.73,
        ..draft(
            "unquantified-effect",
            SuggestionKind::Improvement,
            Priority::Medium,
            sentence.start + m.start(),
        )
    })
}

fn long_paragraph(_scan: &mut Scan<'_>, sentence: &Sentence<'_>) -> Option<Suggestion> {
    if sentence.ordinal != LONG_PARAGRAPH_SENTENCES
        || sentence.paragraph_len <= LONG_PARAGRAPH_MIN_BYTES
    {
        return None;
    }
    Some(Suggestion {
        source_text: sentence.text.to_string(),
        insertion_text: "\n\n".to_string(),
        message: "This paragraph might benefit from being split for better readability."
            .to_string(),
        action: "Split Paragraph".to_string(),
        expert: Some("Steven Pinker".to_string()),
        confidence: 0.7,
        ..draft(
            "long-paragraph",
            SuggestionKind::Improvement,
            Priority::Medium,
            sentence.start,
        )
    })
}

struct Topic {
    id: &'static str,
    /// Every keyword must appear in the sentence.
    keywords: &'static [&'static str],
    /// Every keyword must appear somewhere in the document.
    document_has: &'static [&'static str],
    /// None of these may appear in the document.
    document_lacks: &'static [&'static str],
    kind: SuggestionKind,
    priority: Priority,
    expert: &'static str,
    message: &'static str,
    insertion: &'static str,
    action: &'static str,
    confidence: f32,
    /// Insert at the cursor rather than after the sentence.
    at_cursor: bool,
}

const TOPICS: &[Topic] = &[
    Topic {
        id: "intro-hook",
        keywords: &["introduction"],
        document_has: &[],
        document_lacks: &[],
        kind: SuggestionKind::Improvement,
        priority: Priority::High,
        expert: "Steven Pinker",
        message: "Start with a compelling statistic or real-world example to hook readers.",
        insertion: "According to FIFA statistics, professional soccer players run an average of 10-12 kilometers per match. ",
        action: "Add Hook",
        confidence: 0.8,
        at_cursor: true,
    },
    Topic {
        id: "weightlifting-evidence",
        keywords: &["weightlifting"],
        document_has: &["soccer"],
        document_lacks: &[],
        kind: SuggestionKind::Expert,
        priority: Priority::Medium,
        expert: "Steven Pinker",
        message: "Add concrete evidence from controlled studies of youth athletes.",
        insertion: "Research by Faigenbaum et al. (2009) demonstrates that youth athletes who engaged in supervised resistance training showed 13% improvement in sprint performance.",
        action: "Add Evidence",
        confidence: 0.92,
        at_cursor: false,
    },
    Topic {
        id: "injury-biomechanics",
        keywords: &["injury prevention"],
        document_has: &[],
        document_lacks: &[],
        kind: SuggestionKind::Expert,
        priority: Priority::Medium,
        expert: "Stuart McGill",
        message: "Strengthen with biomechanics evidence on core endurance.",
        insertion: "According to McGill's research on spine biomechanics, exercises that enhance core endurance rather than maximum strength show superior injury prevention outcomes.",
        action: "Add Evidence",
        confidence: 0.88,
        at_cursor: false,
    },
    Topic {
        id: "strength-metrics",
        keywords: &["strength", "power"],
        document_has: &[],
        document_lacks: &[],
        kind: SuggestionKind::Expert,
        priority: Priority::Medium,
        expert: "Mike Boyle",
        message: "Add performance metrics that tie lifts to measurable outcomes.",
        insertion: "Studies indicate 15-20% improvements in vertical jump height and 8-12% increases in sprint acceleration following 8-week periodized strength programs.",
        action: "Add Metrics",
        confidence: 0.85,
        at_cursor: false,
    },
    Topic {
        id: "expansion-powerlifting",
        keywords: &["weightlifting"],
        document_has: &[],
        document_lacks: &["powerlifting"],
        kind: SuggestionKind::Expansion,
        priority: Priority::Low,
        expert: "Stuart McGill",
        message: "Consider discussing how weightlifting differs from powerlifting in soccer training.",
        insertion: "Unlike powerlifting, which focuses on maximal strength in three specific lifts, weightlifting for soccer emphasizes functional movement patterns and explosive power development.",
        action: "Expand Topic",
        confidence: 0.6,
        at_cursor: false,
    },
];

fn topic_keyword(scan: &mut Scan<'_>, sentence: &Sentence<'_>) -> Option<Suggestion> {
    let lower = sentence.text.to_lowercase();
    let topic = TOPICS.iter().find(|t| {
        !scan.fired_topics.contains(t.id)
            && t.keywords.iter().all(|k| lower.contains(k))
            && t.document_has.iter().all(|k| scan.lower.contains(k))
            && !t.document_lacks.iter().any(|k| scan.lower.contains(k))
    })?;
    scan.fired_topics.insert(topic.id);

    let (placement, insertion) = if topic.at_cursor {
        (Placement::Cursor, topic.insertion.to_string())
    } else {
        (Placement::Offset(sentence.end), format!(" {}", topic.insertion))
    };
    let detector = "topic-keyword";
    Some(Suggestion {
        id: format!("{detector}-{}", topic.id),
        source_text: sentence.text.to_string(),
        insertion_text: insertion,
        message: topic.message.to_string(),
        action: topic.action.to_string(),
        placement,
        expert: Some(topic.expert.to_string()),
        confidence: topic.confidence,
        ..draft(detector, topic.kind, topic.priority, sentence.start)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::sentences::split_sentences;

    fn run(rule: Rule, text: &str) -> Vec<Suggestion> {
        let cite = |_: &str| "(Smith et al., 2023)".to_string();
        let mut scan = Scan {
            lower: text.to_lowercase(),
            citation_for: &cite,
            citation_note: None,
            fired_topics: HashSet::new(),
        };
        split_sentences(text)
            .iter()
            .filter_map(|s| rule(&mut scan, s))
            .collect()
    }

    #[test]
    fn recognizes_existing_citations() {
        assert!(has_citation("Growth was 20% (Smith, 2020)."));
        assert!(has_citation("Growth was 20% (Smith & Jones, 2020a)."));
        assert!(has_citation("Growth was 20% (Nassis and Rebelo, 2015)."));
        assert!(has_citation("Growth was 20% [3, 4]."));
        assert!(has_citation("As Silva et al. report"));
        assert!(!has_citation("Growth was 20% (roughly)."));
        assert_eq!(citation_count("A (Smith, 2020). B [2]. C (soon)."), 2);
    }

    #[test]
    fn statistical_claim_anchors_at_number() {
        let text = "Intro. Sprint speed rose 12 percent overall.";
        let out = run(statistical_claim, text);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].anchor, text.find("12").unwrap());
        assert_eq!(out[0].source_text, "12 percent");
        assert_eq!(out[0].placement, Placement::Offset(text.len() - 1));
        assert_eq!(out[0].insertion_text, " (Smith et al., 2023)");
    }

    #[test]
    fn cited_sentence_gets_no_citation_rule() {
        let out = run(statistical_claim, "Sprint speed rose 12% (Silva, 2015).");
        assert!(out.is_empty());
    }

    #[test]
    fn vague_term_maps_to_specific_phrase() {
        let out = run(vague_quantifier, "Most players lift weights.");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].insertion_text, "over 80% of");
        assert_eq!(out[0].placement, Placement::Cursor);
        assert_eq!(out[0].anchor, 0);
    }

    #[test]
    fn vague_terms_need_word_boundaries() {
        assert!(run(vague_quantifier, "Somebody manages homework.").is_empty());
    }

    #[test]
    fn effect_with_numbers_is_already_quantified() {
        assert!(run(unquantified_effect, "Lifting improves speed by 5%.").is_empty());
        let out = run(unquantified_effect, "Lifting improves speed.");
        assert_eq!(out[0].placement, Placement::Offset("Lifting improves".len()));
    }

    #[test]
    fn fifth_sentence_of_long_paragraph_is_split_point() {
        let text = "One is here. Two is here. Three is here. Four is here. Five is here. Six.";
        let out = run(long_paragraph, text);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].anchor, text.find("Five").unwrap());
        assert_eq!(out[0].insertion_text, "\n\n");
    }

    #[test]
    fn topics_fire_once_per_pass() {
        let text = "Weightlifting helps soccer. Weightlifting builds strength.";
        let out = run(topic_keyword, text);
        let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "topic-keyword-weightlifting-evidence",
                "topic-keyword-expansion-powerlifting"
            ]
        );
    }

    #[test]
    fn powerlifting_mention_suppresses_expansion() {
        let out = run(topic_keyword, "Weightlifting and powerlifting differ.");
        assert!(out.iter().all(|s| s.kind != SuggestionKind::Expansion));
    }
}
