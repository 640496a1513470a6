//! Grade prediction behind a pluggable [`Scorer`].

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::analyzer::citation_count;
use crate::analyzer::sentences::split_sentences;

pub const DEFAULT_INSTRUCTOR: &str = "Prof. Farnsworth";

const RUBRIC: &[(&str, u8)] = &[
    ("Clarity & structure", 4),
    ("Evidence quality", 2),
    ("Argument strength", 3),
    ("Citation format", 4),
    ("Grammar & style", 5),
];

/// Scores an essay in `[0, 100]`.
pub trait Scorer {
    fn score(&self, text: &str) -> f64;
}

/// Deterministic score from length, citation density and sentence length.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    const BASE: f64 = 60.0;
    const LENGTH_WEIGHT: f64 = 20.0;
    const FULL_LENGTH_WORDS: f64 = 1000.0;
    const CITATION_WEIGHT: f64 = 15.0;
    /// One citation per this many words earns the full citation weight.
    const WORDS_PER_CITATION: f64 = 250.0;
    const LONG_SENTENCE_WORDS: f64 = 30.0;
    const LONG_SENTENCE_PENALTY: f64 = 5.0;
}

impl Scorer for HeuristicScorer {
    fn score(&self, text: &str) -> f64 {
        let words = text.split_whitespace().count() as f64;
        if words == 0.0 {
            return 0.0;
        }
        let length = (words / Self::FULL_LENGTH_WORDS).min(1.0) * Self::LENGTH_WEIGHT;
        let wanted = (words / Self::WORDS_PER_CITATION).max(1.0);
        let citations = (citation_count(text) as f64 / wanted).min(1.0) * Self::CITATION_WEIGHT;
        let sentences = split_sentences(text).len().max(1) as f64;
        let penalty = if words / sentences > Self::LONG_SENTENCE_WORDS {
            Self::LONG_SENTENCE_PENALTY
        } else {
            0.0
        };
        (Self::BASE + length + citations - penalty).clamp(0.0, 100.0)
    }
}

/// Uniform whole-number score between 80 and 94, ignoring the text.
#[derive(Debug)]
pub struct RandomScorer {
    rng: Mutex<StdRng>,
}

impl Default for RandomScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomScorer {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Scorer for RandomScorer {
    fn score(&self, _text: &str) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f64::from(rng.random_range(80u32..95))
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct GradeCategory {
    pub name: String,
    /// Out of 5.
    pub score: u8,
    pub checked: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Instructor {
    pub name: String,
    pub initials: String,
}

impl Instructor {
    pub fn named(name: Option<&str>) -> Self {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => Self {
                name: name.to_string(),
                initials: name
                    .split_whitespace()
                    .filter_map(|w| w.chars().next())
                    .flat_map(char::to_uppercase)
                    .collect(),
            },
            None => Self {
                name: DEFAULT_INSTRUCTOR.to_string(),
                initials: "PF".to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct GradeReport {
    pub score: u32,
    pub feedback: String,
    pub categories: Vec<GradeCategory>,
    pub instructor: Instructor,
}

pub fn predict_grade(scorer: &dyn Scorer, text: &str, instructor: Option<&str>) -> GradeReport {
    let score = scorer.score(text).clamp(0.0, 100.0).round() as u32;
    tracing::debug!("grading: predicted {score}/100");
    GradeReport {
        score,
        feedback: feedback_for(score).to_string(),
        categories: RUBRIC
            .iter()
            .enumerate()
            .map(|(i, (name, score))| GradeCategory {
                name: (*name).to_string(),
                score: *score,
                checked: i == 0,
            })
            .collect(),
        instructor: Instructor::named(instructor),
    }
}

fn feedback_for(score: u32) -> &'static str {
    match score {
        90.. => "Excellent work! Your argument is specific, well-supported, and clearly organized.",
        80..=89 => {
            "Good news! You're on the right track. Focus on making your argument more specific and well-supported."
        }
        _ => "There's work to do. Strengthen your evidence with citations and tighten the structure of each section.",
    }
}
