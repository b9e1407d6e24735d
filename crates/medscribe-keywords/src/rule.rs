//! A lightweight, dependency-free annotator for English clinical dialogue.
//!
//! Tagging is lexicon first, then capitalisation, then suffix rules. Noun
//! chunks are maximal determiner/adjective/numeral/noun runs ending in a
//! noun, with leading determiners and possessives dropped. Entities are
//! pattern based: honorific + name, multi-word proper names, organisations
//! by suffix, calendar dates, relative dates, durations and clock times.

use std::sync::LazyLock;

use regex::Regex;

use crate::annotate::{Annotation, Annotator, Entity, EntityLabel, PartOfSpeech, Token};

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:[ap]\.m\.)|[A-Za-z]+(?:[-'’][A-Za-z]+)*|\d+(?:[.:]\d+)*(?:st|nd|rd|th)?|[^\sA-Za-z\d]")
        .expect("Invalid token pattern")
});

const HONORIFICS: &[&str] = &["dr", "mr", "mrs", "ms", "miss", "prof"];

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december",
];

const WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "couple", "few", "several",
];

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "some", "any", "each", "every",
    "no", "another", "all", "both", "either", "neither",
];

const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "my", "your",
    "his", "her", "its", "our", "their", "mine", "yours", "ours", "theirs", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "what", "who",
    "whom", "which", "whose", "something", "anything", "nothing", "everything", "someone",
    "anyone", "everyone",
];

const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "of", "for", "with", "to", "from", "by", "about", "after", "before",
    "during", "since", "into", "onto", "over", "under", "through", "around", "between",
    "without", "until", "against", "across", "along", "behind", "within", "per",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "so", "because", "if", "when", "while", "although", "though",
    "than", "whether", "unless", "where", "how", "why",
];

const AUXILIARIES: &[&str] = &[
    "is", "am", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "can", "could", "will", "would", "should", "may", "might", "must",
    "shall",
];

const COMMON_VERBS: &[&str] = &[
    "feel", "feels", "felt", "get", "gets", "got", "go", "goes", "went", "gone", "take",
    "takes", "took", "taken", "think", "thought", "say", "says", "said", "know", "knew",
    "see", "saw", "seen", "come", "came", "make", "made", "hurt", "hurts", "give", "gave",
    "keep", "kept", "let", "put", "tell", "told", "seem", "seems", "need", "needs", "want",
    "wants", "sleep", "slept", "hit", "notice", "recommend", "suggest", "continue",
];

const ADVERBS: &[&str] = &[
    "not", "very", "really", "just", "also", "still", "now", "then", "here", "there",
    "again", "too", "quite", "only", "even", "ever", "never", "always", "sometimes",
    "already", "well", "ago", "soon", "often", "usually", "anymore",
];

const INTERJECTIONS: &[&str] = &[
    "yes", "yeah", "oh", "okay", "ok", "um", "uh", "hmm", "hello", "hi", "thanks",
    "thank", "please", "goodbye", "bye",
];

const ADJECTIVES: &[&str] = &[
    "good", "bad", "better", "worse", "best", "worst", "severe", "mild", "moderate",
    "chronic", "acute", "persistent", "sharp", "dull", "occasional", "constant", "full",
    "first", "second", "third", "last", "next", "new", "old", "great", "little", "many",
    "much", "more", "most", "other", "same", "different", "able", "sure", "fine", "sore",
    "stiff", "tender", "physical", "medical", "normal", "minor", "major", "slight",
    "lower", "upper", "intermittent", "long", "short", "high", "low",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ical", "ous", "ful", "less", "able", "ible", "ive"];

const NOUNS_ENDING_ING: &[&str] = &[
    "morning", "evening", "feeling", "swelling", "bleeding", "ringing", "tingling",
    "thing", "ceiling", "meeting", "building", "clothing", "training", "screening",
    "hearing", "vomiting", "spring", "string", "wedding",
];

const NOUNS_ENDING_LY: &[&str] = &["family", "belly", "ally", "assembly", "supply"];

const ORG_SUFFIXES: &[&str] = &[
    "hospital", "clinic", "center", "centre", "university", "institute", "pharmacy",
    "practice", "trust", "ltd", "inc",
];

const DATE_UNITS: &[&str] = &[
    "day", "days", "week", "weeks", "month", "months", "year", "years", "weekend",
];

const RELATIVE_DATE_MARKERS: &[&str] = &["last", "this", "next", "that"];

const RELATIVE_DATE_HEADS: &[&str] = &[
    "week", "month", "year", "weekend", "morning", "afternoon", "evening", "night",
];

const TIME_MARKERS: &[&str] = &["am", "pm", "a.m.", "p.m.", "o'clock"];

const STANDALONE_TIMES: &[&str] = &["noon", "midnight"];

fn is_in(list: &[&str], word: &str) -> bool {
    list.iter().any(|w| *w == word)
}

fn is_capitalized(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

fn is_honorific(text: &str) -> bool {
    is_in(HONORIFICS, &text.trim_end_matches('.').to_lowercase())
}

/// The built-in [`Annotator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleAnnotator;

impl RuleAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl Annotator for RuleAnnotator {
    fn annotate(&self, text: &str) -> Annotation {
        let tagged = tag(tokenize(text));
        Annotation {
            noun_chunks: noun_chunks(&tagged),
            entities: entities(&tagged),
            tokens: tagged.into_iter().map(Tagged::into_token).collect(),
        }
    }
}

struct RawToken<'a> {
    text: &'a str,
    sentence_start: bool,
}

struct Tagged<'a> {
    text: &'a str,
    lower: String,
    pos: PartOfSpeech,
    sentence_start: bool,
}

impl Tagged<'_> {
    fn is_possessive(&self) -> bool {
        self.pos == PartOfSpeech::Pronoun && is_in(POSSESSIVES, &self.lower)
    }

    fn is_chunk_member(&self) -> bool {
        matches!(
            self.pos,
            PartOfSpeech::Determiner
                | PartOfSpeech::Adjective
                | PartOfSpeech::Numeral
                | PartOfSpeech::Noun
                | PartOfSpeech::ProperNoun
        ) || self.is_possessive()
    }

    fn into_token(self) -> Token {
        let is_stop = is_stop_word(&self.lower);
        let lemma = match self.pos {
            PartOfSpeech::Noun => noun_lemma(&self.lower),
            _ => self.lower.clone(),
        };
        Token {
            text: self.text.to_string(),
            lemma,
            pos: self.pos,
            is_stop,
        }
    }
}

fn tokenize(text: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    let mut sentence_start = true;
    let mut prev_end = 0;
    let mut prev_text: Option<&str> = None;

    for m in TOKEN_PATTERN.find_iter(text) {
        if text[prev_end..m.start()].contains('\n') {
            sentence_start = true;
        }
        let token = m.as_str();
        tokens.push(RawToken {
            text: token,
            sentence_start,
        });
        sentence_start = match token {
            // "Dr." does not end a sentence.
            "." => !prev_text.is_some_and(is_honorific),
            "!" | "?" | ":" => true,
            _ => false,
        };
        prev_end = m.end();
        prev_text = Some(token);
    }

    tokens
}

fn tag(raw: Vec<RawToken<'_>>) -> Vec<Tagged<'_>> {
    let mut tagged: Vec<Tagged<'_>> = Vec::with_capacity(raw.len());
    for token in raw {
        let prev = tagged.last().map(|t| t.pos);
        let lower = token.text.to_lowercase();
        let pos = part_of_speech(&token, &lower, prev);
        tagged.push(Tagged {
            text: token.text,
            lower,
            pos,
            sentence_start: token.sentence_start,
        });
    }
    tagged
}

fn part_of_speech(token: &RawToken<'_>, lower: &str, prev: Option<PartOfSpeech>) -> PartOfSpeech {
    let text = token.text;
    let Some(first) = text.chars().next() else {
        return PartOfSpeech::Other;
    };

    if is_in(TIME_MARKERS, lower) {
        return PartOfSpeech::Other;
    }
    if !first.is_alphanumeric() {
        return PartOfSpeech::Punctuation;
    }
    if first.is_ascii_digit() {
        return PartOfSpeech::Numeral;
    }
    if text.contains(['\'', '’']) {
        return PartOfSpeech::Other;
    }
    if is_honorific(text) && is_capitalized(text) {
        return PartOfSpeech::ProperNoun;
    }
    let capitalized = is_capitalized(text);
    if capitalized && (is_in(MONTHS, lower) || is_in(WEEKDAYS, lower)) {
        return PartOfSpeech::ProperNoun;
    }

    let lexical = if is_in(NUMBER_WORDS, lower) {
        Some(PartOfSpeech::Numeral)
    } else if is_in(DETERMINERS, lower) {
        Some(PartOfSpeech::Determiner)
    } else if is_in(PRONOUNS, lower) {
        Some(PartOfSpeech::Pronoun)
    } else if is_in(ADPOSITIONS, lower) {
        Some(PartOfSpeech::Adposition)
    } else if is_in(CONJUNCTIONS, lower) {
        Some(PartOfSpeech::Conjunction)
    } else if is_in(AUXILIARIES, lower) || is_in(COMMON_VERBS, lower) {
        Some(PartOfSpeech::Verb)
    } else if is_in(ADVERBS, lower) {
        Some(PartOfSpeech::Adverb)
    } else if is_in(INTERJECTIONS, lower) {
        Some(PartOfSpeech::Other)
    } else {
        None
    };
    if let Some(pos) = lexical {
        return pos;
    }

    if capitalized && !token.sentence_start {
        return PartOfSpeech::ProperNoun;
    }
    if is_in(ADJECTIVES, lower) || ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return PartOfSpeech::Adjective;
    }
    if lower.len() > 4 && lower.ends_with("ly") && !is_in(NOUNS_ENDING_LY, lower) {
        return PartOfSpeech::Adverb;
    }
    if lower.len() > 5 && lower.ends_with("ing") {
        let after_modifier = matches!(
            prev,
            Some(PartOfSpeech::Determiner | PartOfSpeech::Adjective | PartOfSpeech::Pronoun)
        );
        return if is_in(NOUNS_ENDING_ING, lower) || after_modifier {
            PartOfSpeech::Noun
        } else {
            PartOfSpeech::Verb
        };
    }
    if lower.len() > 4 && lower.ends_with("ed") {
        return PartOfSpeech::Verb;
    }
    PartOfSpeech::Noun
}

fn is_stop_word(lower: &str) -> bool {
    [
        DETERMINERS,
        PRONOUNS,
        ADPOSITIONS,
        CONJUNCTIONS,
        AUXILIARIES,
        ADVERBS,
        NUMBER_WORDS,
    ]
    .iter()
    .any(|list| is_in(list, lower))
}

/// Singular form of a lowercase noun.
fn noun_lemma(lower: &str) -> String {
    let irregular = match lower {
        "children" => Some("child"),
        "feet" => Some("foot"),
        "teeth" => Some("tooth"),
        "men" => Some("man"),
        "women" => Some("woman"),
        "people" => Some("person"),
        _ => None,
    };
    if let Some(lemma) = irregular {
        return lemma.to_string();
    }

    if lower.len() > 4 && lower.ends_with("ies") {
        return format!("{}y", &lower[..lower.len() - 3]);
    }
    if lower.ends_with("sses")
        || lower.ends_with("xes")
        || lower.ends_with("shes")
        || (lower.ends_with("ches") && !lower.ends_with("aches"))
    {
        return lower[..lower.len() - 2].to_string();
    }
    let keeps_s = ["ss", "us", "is"].iter().any(|s| lower.ends_with(s));
    if lower.len() > 3 && lower.ends_with('s') && !keeps_s {
        return lower[..lower.len() - 1].to_string();
    }
    lower.to_string()
}

fn noun_chunks(tokens: &[Tagged<'_>]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut run: Vec<&Tagged<'_>> = Vec::new();

    for token in tokens {
        if token.sentence_start || !token.is_chunk_member() {
            flush_chunk(&mut run, &mut chunks);
        }
        if token.is_chunk_member() {
            run.push(token);
        }
    }
    flush_chunk(&mut run, &mut chunks);

    chunks
}

fn flush_chunk(run: &mut Vec<&Tagged<'_>>, chunks: &mut Vec<String>) {
    let start = run
        .iter()
        .position(|t| t.pos != PartOfSpeech::Determiner && !t.is_possessive());
    let end = run.iter().rposition(|t| t.pos.is_nominal());
    match (start, end) {
        (Some(start), Some(end)) if start <= end => {
            let words: Vec<&str> = run[start..=end].iter().map(|t| t.text).collect();
            chunks.push(words.join(" "));
        }
        _ => {}
    }
    run.clear();
}

fn entities(tokens: &[Tagged<'_>]) -> Vec<Entity> {
    let mut found = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let consumed = person_with_honorific(tokens, i, &mut found)
            .or_else(|| calendar_date(tokens, i, &mut found))
            .or_else(|| relative_date(tokens, i, &mut found))
            .or_else(|| clock_time(tokens, i, &mut found))
            .or_else(|| proper_name(tokens, i, &mut found));
        i += consumed.unwrap_or(1);
    }

    found
}

fn span_text(tokens: &[Tagged<'_>]) -> String {
    tokens
        .iter()
        .map(|t| t.text)
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" ,", ",")
}

fn proper_run_len(tokens: &[Tagged<'_>], start: usize) -> usize {
    tokens[start..]
        .iter()
        .take_while(|t| {
            t.pos == PartOfSpeech::ProperNoun
                && !is_honorific(t.text)
                && !is_in(MONTHS, &t.lower)
                && !is_in(WEEKDAYS, &t.lower)
        })
        .count()
}

fn is_year(text: &str) -> bool {
    text.len() == 4 && text.chars().all(|c| c.is_ascii_digit())
}

/// `Dr. Smith`, `Ms Janet Jones` → PERSON (the name only).
fn person_with_honorific(
    tokens: &[Tagged<'_>],
    i: usize,
    found: &mut Vec<Entity>,
) -> Option<usize> {
    let token = &tokens[i];
    if token.pos != PartOfSpeech::ProperNoun || !is_honorific(token.text) {
        return None;
    }
    let mut j = i + 1;
    if tokens.get(j).is_some_and(|t| t.text == ".") {
        j += 1;
    }
    let len = proper_run_len(tokens, j);
    if len == 0 {
        return None;
    }
    found.push(Entity {
        text: span_text(&tokens[j..j + len]),
        label: EntityLabel::Person,
    });
    Some(j + len - i)
}

/// `September 1st`, `March 3, 2024`, `last Tuesday`, `Friday` → DATE.
fn calendar_date(tokens: &[Tagged<'_>], i: usize, found: &mut Vec<Entity>) -> Option<usize> {
    let qualified = is_in(RELATIVE_DATE_MARKERS, &tokens[i].lower)
        && tokens
            .get(i + 1)
            .is_some_and(|t| t.pos == PartOfSpeech::ProperNoun && is_in(WEEKDAYS, &t.lower));
    let head = if qualified { i + 1 } else { i };
    let token = &tokens[head];
    if token.pos != PartOfSpeech::ProperNoun {
        return None;
    }

    let mut end = head + 1;
    if is_in(MONTHS, &token.lower) {
        let day_follows = tokens.get(end).is_some_and(|t| t.pos == PartOfSpeech::Numeral);
        // "May I ..." at the start of a sentence.
        if token.sentence_start && !day_follows {
            return None;
        }
        if day_follows {
            end += 1;
            let year_follows = tokens.get(end).is_some_and(|t| t.text == ",")
                && tokens.get(end + 1).is_some_and(|t| is_year(t.text));
            if year_follows {
                end += 2;
            }
        }
    } else if !is_in(WEEKDAYS, &token.lower) {
        return None;
    }

    found.push(Entity {
        text: span_text(&tokens[i..end]),
        label: EntityLabel::Date,
    });
    Some(end - i)
}

/// `last week`, `this morning`, `four weeks ago`, `3 months` → DATE.
fn relative_date(tokens: &[Tagged<'_>], i: usize, found: &mut Vec<Entity>) -> Option<usize> {
    let token = &tokens[i];
    let next = tokens.get(i + 1)?;

    let relative =
        is_in(RELATIVE_DATE_MARKERS, &token.lower) && is_in(RELATIVE_DATE_HEADS, &next.lower);
    let duration = token.pos == PartOfSpeech::Numeral && is_in(DATE_UNITS, &next.lower);
    if !relative && !duration {
        return None;
    }
    let mut end = i + 2;
    if tokens.get(end).is_some_and(|t| t.lower == "ago") {
        end += 1;
    }

    found.push(Entity {
        text: span_text(&tokens[i..end]),
        label: EntityLabel::Date,
    });
    Some(end - i)
}

/// `10 am`, `3:30 p.m.`, `noon` → TIME.
fn clock_time(tokens: &[Tagged<'_>], i: usize, found: &mut Vec<Entity>) -> Option<usize> {
    let token = &tokens[i];
    let len = if is_in(STANDALONE_TIMES, &token.lower) {
        1
    } else if token.pos == PartOfSpeech::Numeral
        && tokens
            .get(i + 1)
            .is_some_and(|t| is_in(TIME_MARKERS, &t.lower))
    {
        2
    } else {
        return None;
    };

    found.push(Entity {
        text: span_text(&tokens[i..i + len]),
        label: EntityLabel::Time,
    });
    Some(len)
}

/// Runs of two or more proper nouns: ORG when the last word is an
/// organisational suffix, otherwise PERSON.
fn proper_name(tokens: &[Tagged<'_>], i: usize, found: &mut Vec<Entity>) -> Option<usize> {
    let len = proper_run_len(tokens, i);
    if len < 2 {
        return None;
    }
    let span = &tokens[i..i + len];
    let label = if span
        .last()
        .is_some_and(|t| is_in(ORG_SUFFIXES, &t.lower))
    {
        EntityLabel::Org
    } else {
        EntityLabel::Person
    };
    found.push(Entity {
        text: span_text(span),
        label,
    });
    Some(len)
}
