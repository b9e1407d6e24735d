use std::collections::HashSet;

/// Clinical terms a keyword must mention to be kept.
const MEDICAL_TERMS: &[&str] = &[
    "pain", "injury", "symptom", "diagnosis", "treatment", "therapy", "session",
    "accident", "whiplash", "physiotherapy", "painkiller", "medication", "discomfort",
    "stiffness", "tenderness", "movement", "recovery", "prognosis", "examination",
    "headache", "dizziness", "nausea", "photophobia", "neurological",
    "tension", "persistent", "chronic", "acute", "condition", "disorder", "syndrome",
];

/// The smaller core list of symptom and treatment words.
const CORE_TERMS: &[&str] = &[
    "pain", "injury", "treatment", "therapy", "symptom", "diagnosis", "examination",
    "headache", "dizziness", "nausea",
];

/// Words too generic to ever be a keyword, or to appear inside one.
const GENERIC_WORDS: &[&str] = &[
    "that", "this", "the", "a", "an", "and", "or", "but", "if", "when", "where",
    "what", "which", "who", "how", "why", "afternoon", "morning", "evening", "night",
    "doctor", "patient", "physician", "bank", "thing", "way", "time", "day", "week",
    "month", "year", "today", "yesterday", "tomorrow", "daily", "your", "my", "their",
    "some", "any", "other", "more", "most", "very", "quite", "really", "just", "only",
];

/// Phrases that mention a clinical term but say nothing specific.
const WEAK_PHRASES: &[&str] = &[
    "your symptoms", "your condition", "your pain", "your treatment", "your recovery",
    "the accident", "the pain", "the treatment", "the condition", "the symptoms",
    "some discomfort", "some pain", "any pain", "any symptoms", "any treatment",
];

/// The curated word lists behind keyword filtering.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    medical_terms: Vec<String>,
    core_terms: Vec<String>,
    generic_words: HashSet<String>,
    weak_phrases: HashSet<String>,
}

impl Vocabulary {
    pub fn new(
        medical_terms: &[&str],
        core_terms: &[&str],
        generic_words: &[&str],
        weak_phrases: &[&str],
    ) -> Self {
        fn lower<C: FromIterator<String>>(items: &[&str]) -> C {
            items.iter().map(|s| s.trim().to_lowercase()).collect()
        }

        Self {
            medical_terms: lower(medical_terms),
            core_terms: lower(core_terms),
            generic_words: lower(generic_words),
            weak_phrases: lower(weak_phrases),
        }
    }

    /// The built-in clinical vocabulary.
    pub fn clinical() -> Self {
        Self::new(MEDICAL_TERMS, CORE_TERMS, GENERIC_WORDS, WEAK_PHRASES)
    }

    pub fn is_generic_word(&self, word: &str) -> bool {
        self.generic_words.contains(&word.to_lowercase())
    }

    /// True if any whitespace-separated word of `candidate` is generic.
    pub fn contains_generic_word(&self, candidate: &str) -> bool {
        candidate
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .any(|w| self.is_generic_word(w))
    }

    pub fn is_weak_phrase(&self, candidate: &str) -> bool {
        self.weak_phrases.contains(&candidate.trim().to_lowercase())
    }

    /// Passes the generic-word and weak-phrase exclusions.
    pub fn admits(&self, candidate: &str) -> bool {
        !self.contains_generic_word(candidate) && !self.is_weak_phrase(candidate)
    }

    /// Mentions a curated medical term or a core symptom/treatment word.
    pub fn is_clinical(&self, candidate: &str) -> bool {
        let lower = candidate.to_lowercase();
        self.medical_terms
            .iter()
            .chain(&self.core_terms)
            .any(|term| lower.contains(term.as_str()))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::clinical()
    }
}
