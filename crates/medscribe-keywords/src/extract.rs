use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::annotate::{Annotation, Annotator};
use crate::vocabulary::Vocabulary;

pub const DEFAULT_MAX_KEYWORDS: usize = 12;

/// Noun phrases must be longer than this many characters.
const MIN_PHRASE_CHARS: usize = 4;

/// Entities and single nouns must be longer than this many characters.
const MIN_TERM_CHARS: usize = 3;

/// Ranks clinically relevant terms found in a transcript.
///
/// Shared read-only across requests; cloning only bumps reference counts.
#[derive(Clone)]
pub struct KeywordExtractor {
    annotator: Option<Arc<dyn Annotator>>,
    vocabulary: Arc<Vocabulary>,
}

impl KeywordExtractor {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self {
            annotator: Some(annotator),
            vocabulary: Arc::new(Vocabulary::clinical()),
        }
    }

    /// An extractor with no annotation capability. Always returns nothing.
    pub fn disabled() -> Self {
        Self {
            annotator: None,
            vocabulary: Arc::new(Vocabulary::clinical()),
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Arc::new(vocabulary);
        self
    }

    pub fn is_available(&self) -> bool {
        self.annotator.is_some()
    }

    /// Extract at most `max_count` keywords from `text`.
    ///
    /// Order: clinical noun phrases, then clinical nouns (lemmatized), then
    /// named entities; each group sorted alphabetically, duplicates removed
    /// case-insensitively keeping the first occurrence. Deterministic for a
    /// given annotator.
    pub fn extract(&self, text: &str, max_count: usize) -> Vec<String> {
        let Some(annotator) = &self.annotator else {
            return Vec::new();
        };
        if max_count == 0 {
            return Vec::new();
        }

        let annotation = annotator.annotate(text);
        let phrases = self.phrases(&annotation);
        let nouns = self.nouns(&annotation);
        let entities = self.entities(&annotation);

        debug!(
            phrases = phrases.len(),
            nouns = nouns.len(),
            entities = entities.len(),
            "keyword candidates"
        );

        let mut seen = HashSet::new();
        phrases
            .into_iter()
            .chain(nouns)
            .chain(entities)
            .filter(|kw| seen.insert(kw.to_lowercase()))
            .take(max_count)
            .collect()
    }

    fn phrases(&self, annotation: &Annotation) -> BTreeSet<String> {
        annotation
            .noun_chunks
            .iter()
            .map(|chunk| chunk.trim().to_lowercase())
            .filter(|phrase| {
                phrase.chars().count() > MIN_PHRASE_CHARS
                    && self.vocabulary.admits(phrase)
                    && self.vocabulary.is_clinical(phrase)
            })
            .collect()
    }

    fn nouns(&self, annotation: &Annotation) -> BTreeSet<String> {
        annotation
            .tokens
            .iter()
            .filter(|t| {
                t.pos.is_nominal() && !t.is_stop && t.text.chars().count() > MIN_TERM_CHARS
            })
            .map(|t| t.lemma.trim().to_lowercase())
            .filter(|lemma| self.vocabulary.admits(lemma) && self.vocabulary.is_clinical(lemma))
            .collect()
    }

    fn entities(&self, annotation: &Annotation) -> BTreeSet<String> {
        annotation
            .entities
            .iter()
            .filter(|e| e.label.is_keyword_label())
            .map(|e| e.text.trim().to_string())
            .filter(|text| text.chars().count() > MIN_TERM_CHARS && self.vocabulary.admits(text))
            .collect()
    }
}
