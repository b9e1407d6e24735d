use std::sync::Arc;

use medscribe_keywords::{
    Annotation, Annotator, Entity, EntityLabel, KeywordExtractor, PartOfSpeech, Token,
};

/// Returns a fixed annotation regardless of input.
struct FixedAnnotator(Annotation);

impl Annotator for FixedAnnotator {
    fn annotate(&self, _text: &str) -> Annotation {
        self.0.clone()
    }
}

fn noun(text: &str, lemma: &str) -> Token {
    Token {
        text: text.to_string(),
        lemma: lemma.to_string(),
        pos: PartOfSpeech::Noun,
        is_stop: false,
    }
}

fn entity(text: &str, label: EntityLabel) -> Entity {
    Entity {
        text: text.to_string(),
        label,
    }
}

fn extractor(annotation: Annotation) -> KeywordExtractor {
    KeywordExtractor::new(Arc::new(FixedAnnotator(annotation)))
}

fn sample() -> Annotation {
    Annotation {
        tokens: vec![
            noun("headaches", "headache"),
            noun("physiotherapy", "physiotherapy"),
            noun("doctor", "doctor"),
            noun("pain", "pain"),
            Token {
                text: "painful".to_string(),
                lemma: "painful".to_string(),
                pos: PartOfSpeech::Adjective,
                is_stop: false,
            },
        ],
        noun_chunks: vec![
            "whiplash injury".to_string(),
            "the pain".to_string(),
            "your symptoms".to_string(),
            "lower back pain".to_string(),
            "the car".to_string(),
        ],
        entities: vec![
            entity("Janet Jones", EntityLabel::Person),
            entity("September 1st", EntityLabel::Date),
            entity("twelve", EntityLabel::Cardinal),
            entity("Leeds General Hospital", EntityLabel::Facility),
        ],
    }
}

#[test]
fn disabled_extractor_returns_nothing() {
    let extractor = KeywordExtractor::disabled();
    assert!(!extractor.is_available());
    assert!(extractor.extract("I have severe neck pain.", 12).is_empty());
}

#[test]
fn phrases_then_nouns_then_entities() {
    let keywords = extractor(sample()).extract("ignored", 12);
    assert_eq!(
        keywords,
        vec![
            "lower back pain",
            "whiplash injury",
            "headache",
            "pain",
            "physiotherapy",
            "Janet Jones",
            "September 1st",
        ]
    );
}

#[test]
fn generic_words_and_weak_phrases_are_excluded() {
    let keywords = extractor(sample()).extract("ignored", 12);
    assert!(!keywords.iter().any(|k| k == "doctor"));
    assert!(!keywords.iter().any(|k| k == "the pain"));
    assert!(!keywords.iter().any(|k| k == "your symptoms"));
}

#[test]
fn non_nominal_tokens_and_unlisted_entity_types_are_ignored() {
    let keywords = extractor(sample()).extract("ignored", 12);
    assert!(!keywords.iter().any(|k| k == "painful"));
    assert!(!keywords.iter().any(|k| k == "twelve"));
    assert!(!keywords.iter().any(|k| k.contains("Hospital")));
}

#[test]
fn max_count_truncates_in_priority_order() {
    let keywords = extractor(sample()).extract("ignored", 3);
    assert_eq!(keywords, vec!["lower back pain", "whiplash injury", "headache"]);
}

#[test]
fn zero_max_count_returns_nothing() {
    assert!(extractor(sample()).extract("ignored", 0).is_empty());
}

#[test]
fn duplicates_are_removed_case_insensitively() {
    let annotation = Annotation {
        tokens: vec![noun("Whiplash", "whiplash")],
        noun_chunks: vec!["Whiplash".to_string()],
        entities: vec![entity("WHIPLASH", EntityLabel::Product)],
    };
    let keywords = extractor(annotation).extract("ignored", 12);
    assert_eq!(keywords, vec!["whiplash"]);
}

#[test]
fn short_candidates_are_dropped() {
    let annotation = Annotation {
        tokens: vec![noun("ache", "ache"), noun("pain", "pain")],
        noun_chunks: vec!["pain".to_string()],
        entities: vec![entity("Tom", EntityLabel::Person)],
    };
    // "pain" is too short as a phrase but long enough as a noun.
    let keywords = extractor(annotation).extract("ignored", 12);
    assert_eq!(keywords, vec!["pain"]);
}

#[test]
fn extraction_is_deterministic() {
    let extractor = extractor(sample());
    let first = extractor.extract("ignored", 12);
    for _ in 0..5 {
        assert_eq!(extractor.extract("ignored", 12), first);
    }
}
