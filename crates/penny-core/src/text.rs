//! Text normalization and tokenization for expense descriptions
//!
//! Raw bank descriptions are noisy ("STARBUCKS #1234 SEATTLE WA 06/02").
//! This module reduces them to a small set of stemmed, stopword-free tokens
//! so that the classifier sees "starbucks seattle" instead of the raw string.

use regex::Regex;

/// Minimum token length kept after cleaning. Shorter fragments ("wa", "st")
/// are almost always location or formatting noise.
const MIN_TOKEN_LEN: usize = 3;

/// Suffix rewrite rules, tried in order. First match wins.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ying", "y"),
    ("ied", "y"),
    ("ies", "y"),
    ("ing", ""),
    ("tion", "t"),
    ("sion", "d"),
    ("ment", ""),
    ("ence", "e"),
    ("ance", ""),
    ("ity", ""),
    ("ism", ""),
    ("est", ""),
    ("ed", ""),
    ("er", ""),
    ("es", ""),
    ("s", ""),
];

/// Words the stemmer must leave alone even though they end in a rule suffix.
const STEM_EXCEPTIONS: &[&str] = &[
    "business", "news", "paris", "this", "was", "is", "has", "gas", "bus", "series", "species",
    "analysis", "basis", "crisis", "thesis", "status", "virus", "bonus", "minus", "campus",
    "texas", "vegas", "express", "fitness", "wireless",
];

/// Irregular verb forms mapped straight to their base form.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("are", "be"),
    ("were", "be"),
    ("is", "be"),
    ("am", "be"),
    ("was", "be"),
    ("being", "be"),
    ("been", "be"),
    ("had", "have"),
    ("has", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("doing", "do"),
    ("done", "do"),
    ("went", "go"),
    ("going", "go"),
    ("goes", "go"),
    ("gone", "go"),
    ("made", "make"),
    ("making", "make"),
    ("makes", "make"),
    ("bought", "buy"),
    ("buying", "buy"),
    ("buys", "buy"),
    ("took", "take"),
    ("taking", "take"),
    ("takes", "take"),
    ("taken", "take"),
];

/// English stopwords plus transaction boilerplate that carries no category
/// signal ("payment", "card", "monthly", ...).
const STOPWORDS: &[&str] = &[
    // Core English
    "a", "an", "the", "and", "or", "but", "if", "of", "at", "by", "for", "with", "about", "to",
    "from", "in", "on", "is", "was", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "i", "you", "he", "she", "it", "we", "they", "my", "your", "his", "her", "its",
    "our", "their", "this", "that", "these", "those", "am", "are", "will", "would", "shall",
    "should", "can", "could", "may", "might", "must", "ought", "not", "no", "so", "than", "then",
    "too", "very", "just", "only", "own", "same", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such",
    // Transaction boilerplate
    "payment", "purchase", "paid", "pay", "transaction", "receipt", "invoice", "order", "bill",
    "subscription", "charge", "amount", "account", "credit", "debit", "card", "cash", "check",
    "transfer", "balance", "fee", "total", "expense", "cost", "price", "monthly", "annual",
    "quarterly", "recurring", "bought", "spend", "spent", "date", "money", "pos", "ach", "pending",
    "online", "web", "inc", "llc", "com",
];

/// Normalizes and tokenizes expense descriptions.
pub struct TextProcessor {
    strip_re: Regex,
    space_re: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        Self {
            // Anything that is not a letter or whitespace becomes a space.
            // Digits go too: store numbers and dates don't predict categories.
            strip_re: Regex::new(r"[^a-z\s]+").expect("valid regex"),
            space_re: Regex::new(r"\s+").expect("valid regex"),
        }
    }

    /// Lowercase, strip digits and punctuation, collapse whitespace
    ///
    /// Idempotent: `clean(clean(s)) == clean(s)`.
    pub fn clean(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = self.strip_re.replace_all(&lowered, " ");
        self.space_re.replace_all(&stripped, " ").trim().to_string()
    }

    /// Clean a description and reduce it to stemmed, stopword-free tokens
    ///
    /// May return an empty vector (all-numeric or all-boilerplate input);
    /// callers decide what an empty token list means.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.clean(text)
            .split_whitespace()
            .filter(|t| t.len() >= MIN_TOKEN_LEN && !is_stopword(t))
            .map(stem)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Reduce a word to a rough stem via suffix rewrite rules
///
/// Not linguistically perfect, but consistent: the same surface form always
/// maps to the same stem, which is all the classifier needs.
fn stem(word: &str) -> String {
    if STEM_EXCEPTIONS.contains(&word) {
        return word.to_string();
    }
    if let Some((_, base)) = IRREGULAR_FORMS.iter().find(|(form, _)| *form == word) {
        return base.to_string();
    }
    if word.len() <= MIN_TOKEN_LEN {
        return word.to_string();
    }

    let bytes = word.as_bytes();

    // Doubled-consonant forms: "stopped" -> "stop", "running" -> "run"
    if word.ends_with("ing") && word.len() > 5 {
        let c = bytes[word.len() - 4];
        if c == bytes[word.len() - 5] && !b"aeiou".contains(&c) {
            return word[..word.len() - 4].to_string();
        }
    }
    if word.ends_with("ed") && word.len() > 4 {
        let c = bytes[word.len() - 3];
        if c == bytes[word.len() - 4] && !b"aeiou".contains(&c) {
            return word[..word.len() - 3].to_string();
        }
    }

    for (suffix, replacement) in SUFFIX_RULES {
        if let Some(stripped) = word.strip_suffix(suffix) {
            if stripped.len() + replacement.len() >= 2 {
                return format!("{stripped}{replacement}");
            }
        }
    }

    word.to_string()
}
