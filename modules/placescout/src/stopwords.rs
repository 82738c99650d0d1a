//! Stop-word lists and the review-text filter that runs before summarization.

use std::collections::HashSet;

use placescout_common::StopWordMode;

const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't", "none", "never", "cannot", "can't",
];

const GERMAN: &[&str] = &[
    "aber", "alle", "allem", "allen", "aller", "alles", "als", "also", "am", "an", "ander",
    "andere", "anderen", "auch", "auf", "aus", "bei", "bin", "bis", "bist", "da", "damit",
    "dann", "das", "dass", "dein", "deine", "dem", "den", "denn", "der", "des", "dich", "die",
    "dies", "diese", "diesem", "diesen", "dieser", "dieses", "dir", "doch", "dort", "du",
    "durch", "ein", "eine", "einem", "einen", "einer", "eines", "er", "es", "etwas", "euch",
    "euer", "für", "gegen", "hab", "habe", "haben", "hat", "hatte", "hier", "hin", "ich", "ihm",
    "ihn", "ihr", "ihre", "im", "in", "ist", "ja", "jede", "jeder", "jetzt", "kann", "kein",
    "keine", "keinen", "keiner", "man", "mein", "meine", "mich", "mir", "mit", "nach", "nicht",
    "nichts", "nie", "noch", "nun", "nur", "ob", "oder", "ohne", "sehr", "sein", "seine", "sich",
    "sie", "sind", "so", "solche", "soll", "sondern", "über", "um", "und", "uns", "unser",
    "unter", "viel", "vom", "von", "vor", "war", "waren", "was", "weil", "wenn", "wer", "wie",
    "wir", "wird", "wo", "zu", "zum", "zur", "zwar", "zwischen",
];

/// Words whose removal flips the sentiment of a review.
const NEGATIONS: &[&str] = &[
    "no", "not", "nor", "none", "never", "nothing", "nobody", "nowhere", "neither", "cannot",
    "without", "kein", "keine", "keinen", "keiner", "nicht", "nichts", "nie", "ohne",
];

/// A language's stop-word list.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<&'static str>,
}

impl StopWords {
    pub fn english() -> Self {
        Self::from_list(ENGLISH)
    }

    /// Stop-words for an ISO 639-1 code. Unknown languages fall back to English.
    pub fn for_language(language: &str) -> Self {
        match language.split(['-', '_']).next().unwrap_or_default() {
            "de" => Self::from_list(GERMAN),
            _ => Self::english(),
        }
    }

    fn from_list(list: &[&'static str]) -> Self {
        Self {
            words: list.iter().copied().collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Drop stop-words from `text` according to `mode`.
    ///
    /// Word order and sentence terminators survive so the result can still be
    /// split into sentences.
    pub fn filter(&self, text: &str, mode: StopWordMode) -> String {
        if mode == StopWordMode::Off {
            return text.to_string();
        }
        let keep_negations = mode == StopWordMode::PreserveNegations;

        let mut kept: Vec<String> = Vec::new();
        for token in text.split_whitespace() {
            let core = normalize(token);
            let drop = !core.is_empty()
                && self.contains(&core)
                && !(keep_negations && is_negation(&core));

            if !drop {
                kept.push(token.to_string());
                continue;
            }

            // Keep the sentence boundary of a dropped final word.
            if let Some(terminator) = trailing_terminator(token) {
                if let Some(last) = kept.last_mut() {
                    if trailing_terminator(last).is_none() {
                        last.push(terminator);
                    }
                }
            }
        }
        kept.join(" ")
    }
}

pub fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

fn normalize(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .replace('’', "'")
        .to_lowercase()
}

fn trailing_terminator(token: &str) -> Option<char> {
    token
        .trim_end_matches(['"', '\'', ')'])
        .chars()
        .last()
        .filter(|c| matches!(c, '.' | '!' | '?'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserve_mode_keeps_not() {
        let out = StopWords::english().filter("The food was not good.", StopWordMode::PreserveNegations);
        assert_eq!(out, "food not good.");
    }

    #[test]
    fn plain_removal_drops_negations_too() {
        let out = StopWords::english().filter("The food was not good.", StopWordMode::Remove);
        assert_eq!(out, "food good.");
    }

    #[test]
    fn contractions_count_as_negations() {
        let out = StopWords::english().filter(
            "We didn’t like it and they weren't friendly.",
            StopWordMode::PreserveNegations,
        );
        assert!(out.contains("didn’t"), "got {out}");
        assert!(out.contains("weren't"), "got {out}");
        assert!(!out.to_lowercase().split(' ').any(|w| w == "we" || w == "and"));
    }

    #[test]
    fn off_mode_is_identity() {
        let text = "It is what it is.";
        assert_eq!(StopWords::english().filter(text, StopWordMode::Off), text);
    }

    #[test]
    fn dropped_last_word_keeps_sentence_end() {
        let out = StopWords::english().filter("Coffee we loved it. Staff rude.", StopWordMode::Remove);
        assert_eq!(out, "Coffee loved. Staff rude.");
    }

    #[test]
    fn german_list_selected_by_language_code() {
        let words = StopWords::for_language("de-DE");
        assert!(words.contains("und"));
        let out = words.filter("Das Essen war nicht gut.", StopWordMode::PreserveNegations);
        assert_eq!(out, "Essen nicht gut.");
    }
}
