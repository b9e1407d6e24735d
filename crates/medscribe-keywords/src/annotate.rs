//! The linguistic annotation contract consumed by the keyword extractor.

/// Coarse part-of-speech tags (Universal Dependencies naming).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    Conjunction,
    Numeral,
    Punctuation,
    Other,
}

impl PartOfSpeech {
    pub fn is_nominal(self) -> bool {
        matches!(self, Self::Noun | Self::ProperNoun)
    }
}

/// Named-entity types, following the OntoNotes label scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Person,
    /// Nationalities, religious or political groups.
    Norp,
    Facility,
    Org,
    /// Countries, cities, states.
    Gpe,
    Location,
    Product,
    Event,
    Date,
    Time,
    Quantity,
    Cardinal,
    Other,
}

impl EntityLabel {
    /// Entity types worth surfacing as keywords.
    pub const KEYWORD_LABELS: &'static [EntityLabel] = &[
        Self::Org,
        Self::Person,
        Self::Gpe,
        Self::Norp,
        Self::Product,
        Self::Date,
        Self::Time,
    ];

    pub fn is_keyword_label(self) -> bool {
        Self::KEYWORD_LABELS.contains(&self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Result of annotating one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub tokens: Vec<Token>,
    /// Base noun phrases, as surface text.
    pub noun_chunks: Vec<String>,
    pub entities: Vec<Entity>,
}

/// Tokenization, tagging, lemmatization, chunking and NER in one pass.
///
/// Implementations are shared across requests and must be read-only.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Annotation;
}
