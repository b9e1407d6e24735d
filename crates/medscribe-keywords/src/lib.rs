//! medscribe-keywords
//!
//! Clinical keyword extraction over a linguistic annotation of the
//! transcript. The annotation itself sits behind the [`annotate::Annotator`]
//! trait; [`rule::RuleAnnotator`] is the built-in lexicon-and-suffix
//! implementation.

pub mod annotate;
pub mod extract;
pub mod rule;
pub mod vocabulary;

pub use annotate::{Annotation, Annotator, Entity, EntityLabel, PartOfSpeech, Token};
pub use extract::{DEFAULT_MAX_KEYWORDS, KeywordExtractor};
pub use rule::RuleAnnotator;
pub use vocabulary::Vocabulary;
