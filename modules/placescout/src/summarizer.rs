//! Extractive review summaries via latent semantic analysis.
//!
//! Sentences are columns of a smoothed term-frequency matrix `A`. The right
//! singular vectors of `A` and their singular values come from the
//! eigen-decomposition of the sentence Gram matrix `AᵀA`, which is small
//! (one row per review sentence). A sentence's salience is the length of its
//! projection onto the strongest topics, `sqrt(Σ σ_k² · v_kj²)`.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::stopwords::StopWords;
use crate::traits::ReviewSummarizer;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+(?:['’]\p{L}+)*").expect("valid word regex"));

/// Weight given to every cell before scaling by term frequency.
const TF_SMOOTHING: f64 = 0.4;
const JACOBI_MAX_SWEEPS: usize = 100;
/// Off-diagonal mass, relative to the squared Frobenius norm, treated as converged.
const JACOBI_TOLERANCE: f64 = 1e-26;

pub struct LsaSummarizer {
    stop_words: StopWords,
    /// Fraction of topic dimensions kept, before the `min_dimensions` floor.
    reduction_ratio: f64,
    min_dimensions: usize,
}

impl Default for LsaSummarizer {
    fn default() -> Self {
        Self::new(StopWords::english())
    }
}

impl LsaSummarizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            reduction_ratio: 1.0,
            min_dimensions: 3,
        }
    }

    pub fn with_dimensions(mut self, reduction_ratio: f64, min_dimensions: usize) -> Self {
        self.reduction_ratio = reduction_ratio.clamp(0.0, 1.0);
        self.min_dimensions = min_dimensions.max(1);
        self
    }

    /// Salience per sentence, aligned with `sentences`. Empty when no sentence
    /// carries a non-stop-word term.
    pub fn rank(&self, sentences: &[String]) -> Vec<f64> {
        let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| self.terms(s)).collect();

        let mut dictionary: HashMap<&str, usize> = HashMap::new();
        for term in tokenized.iter().flatten() {
            let next = dictionary.len();
            dictionary.entry(term.as_str()).or_insert(next);
        }
        if dictionary.is_empty() {
            return Vec::new();
        }

        let matrix = term_frequency_matrix(&tokenized, &dictionary);
        let gram = gram_matrix(&matrix, sentences.len());
        let (eigenvalues, eigenvectors) = jacobi_eigen(gram);

        let mut order: Vec<usize> = (0..eigenvalues.len()).collect();
        order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

        let rank_dims = dictionary.len().min(sentences.len());
        let dimensions = ((rank_dims as f64 * self.reduction_ratio).ceil() as usize)
            .max(self.min_dimensions)
            .min(rank_dims);

        (0..sentences.len())
            .map(|j| {
                order
                    .iter()
                    .take(dimensions)
                    .map(|&k| eigenvalues[k].max(0.0) * eigenvectors[j][k].powi(2))
                    .sum::<f64>()
                    .sqrt()
            })
            .collect()
    }

    fn terms(&self, sentence: &str) -> Vec<String> {
        WORD.find_iter(sentence)
            .map(|m| m.as_str().replace('’', "'").to_lowercase())
            .filter(|w| !self.stop_words.contains(w))
            .collect()
    }
}

impl ReviewSummarizer for LsaSummarizer {
    fn summarize(&self, text: &str, sentence_count: usize) -> String {
        let sentences = split_sentences(text);
        if sentences.is_empty() || sentence_count == 0 {
            return String::new();
        }

        let ranks = self.rank(&sentences);
        if ranks.is_empty() {
            return String::new();
        }

        let mut by_rank: Vec<usize> = (0..sentences.len()).collect();
        // Stable sort keeps document order among equal ranks.
        by_rank.sort_by(|&a, &b| ranks[b].total_cmp(&ranks[a]));

        let mut chosen: Vec<usize> = by_rank.into_iter().take(sentence_count).collect();
        chosen.sort_unstable();

        chosen
            .into_iter()
            .map(|i| sentences[i].as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split on `.`, `!` or `?` followed by whitespace (or end of text), and on
/// line breaks. Fragments without a word are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    let mut flush = |current: &mut String| {
        let sentence = current.trim();
        if WORD.is_match(sentence) {
            sentences.push(sentence.to_string());
        }
        current.clear();
    };

    while let Some(c) = chars.next() {
        if c == '\n' {
            flush(&mut current);
            continue;
        }
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            while let Some(&next) = chars.peek() {
                if matches!(next, '.' | '!' | '?' | '"' | '\'' | ')' | '”') {
                    current.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            if chars.peek().map_or(true, |n| n.is_whitespace()) {
                flush(&mut current);
            }
        }
    }
    flush(&mut current);
    sentences
}

/// `matrix[term][sentence]`, each column scaled by its own most frequent term.
fn term_frequency_matrix(
    tokenized: &[Vec<String>],
    dictionary: &HashMap<&str, usize>,
) -> Vec<Vec<f64>> {
    let mut matrix = vec![vec![0.0; tokenized.len()]; dictionary.len()];
    for (col, terms) in tokenized.iter().enumerate() {
        for term in terms {
            if let Some(&row) = dictionary.get(term.as_str()) {
                matrix[row][col] += 1.0;
            }
        }
    }

    for col in 0..tokenized.len() {
        let max = matrix.iter().map(|row| row[col]).fold(0.0, f64::max);
        if max == 0.0 {
            continue;
        }
        for row in matrix.iter_mut() {
            row[col] = TF_SMOOTHING + (1.0 - TF_SMOOTHING) * row[col] / max;
        }
    }
    matrix
}

/// `AᵀA` for a term-by-sentence matrix.
fn gram_matrix(matrix: &[Vec<f64>], sentences: usize) -> Vec<Vec<f64>> {
    let mut gram = vec![vec![0.0; sentences]; sentences];
    for i in 0..sentences {
        for j in i..sentences {
            let dot: f64 = matrix.iter().map(|row| row[i] * row[j]).sum();
            gram[i][j] = dot;
            gram[j][i] = dot;
        }
    }
    gram
}

/// Cyclic Jacobi eigen-decomposition of a symmetric matrix.
///
/// Returns `(eigenvalues, eigenvectors)` where eigenvector `k` is column `k`
/// of the returned matrix.
fn jacobi_eigen(mut a: Vec<Vec<f64>>) -> (Vec<f64>, Vec<Vec<f64>>) {
    let n = a.len();
    let mut v: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    let scale: f64 = a.iter().flatten().map(|x| x * x).sum::<f64>().max(f64::MIN_POSITIVE);

    for _ in 0..JACOBI_MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|p| ((p + 1)..n).map(move |q| (p, q)))
            .map(|(p, q)| a[p][q] * a[p][q])
            .sum();
        if off <= JACOBI_TOLERANCE * scale {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                if a[p][q].abs() < f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for row in a.iter_mut() {
                    let (akp, akq) = (row[p], row[q]);
                    row[p] = c * akp - s * akq;
                    row[q] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[p][k], a[q][k]);
                    a[p][k] = c * apk - s * aqk;
                    a[q][k] = s * apk + c * aqk;
                }
                for row in v.iter_mut() {
                    let (vkp, vkq) = (row[p], row[q]);
                    row[p] = c * vkp - s * vkq;
                    row[q] = s * vkp + c * vkq;
                }
            }
        }
    }

    let eigenvalues = (0..n).map(|i| a[i][i]).collect();
    (eigenvalues, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<String> {
        split_sentences(text)
    }

    #[test]
    fn empty_text_gives_empty_summary() {
        assert_eq!(LsaSummarizer::default().summarize("", 3), "");
        assert_eq!(LsaSummarizer::default().summarize("   ", 3), "");
    }

    #[test]
    fn stop_words_only_gives_empty_summary() {
        assert_eq!(LsaSummarizer::default().summarize("It is. We are.", 3), "");
    }

    #[test]
    fn short_text_returns_every_sentence_in_order() {
        let summary = LsaSummarizer::default().summarize("Lovely tea. Quiet garden!", 3);
        assert_eq!(summary, "Lovely tea.\nQuiet garden!");
    }

    #[test]
    fn picks_most_salient_sentences_in_document_order() {
        let text = "Friendly staff served excellent espresso quickly. Okay. \
                    Cozy corner tables, soft music, fresh croissants daily.";
        let summary = LsaSummarizer::default().summarize(text, 2);
        assert_eq!(
            summary,
            "Friendly staff served excellent espresso quickly.\n\
             Cozy corner tables, soft music, fresh croissants daily."
        );
    }

    #[test]
    fn splits_on_terminators_followed_by_space() {
        let s = sentences("Rated 4.5 overall. Wow!! Really? \"Best bagels.\" Done");
        assert_eq!(
            s,
            vec![
                "Rated 4.5 overall.",
                "Wow!!",
                "Really?",
                "\"Best bagels.\"",
                "Done"
            ]
        );
    }

    #[test]
    fn full_rank_salience_is_sentence_norm() {
        let summarizer = LsaSummarizer::default();
        let s = sentences("Great coffee, great cake. Slow service. Coffee was cold but cake fresh.");
        let ranks = summarizer.rank(&s);

        let tokenized: Vec<Vec<String>> = s.iter().map(|x| summarizer.terms(x)).collect();
        let mut dictionary = HashMap::new();
        for term in tokenized.iter().flatten() {
            let next = dictionary.len();
            dictionary.entry(term.as_str()).or_insert(next);
        }
        let matrix = term_frequency_matrix(&tokenized, &dictionary);

        for (j, rank) in ranks.iter().enumerate() {
            let norm = matrix.iter().map(|row| row[j] * row[j]).sum::<f64>().sqrt();
            assert!((rank - norm).abs() < 1e-9, "sentence {j}: {rank} vs {norm}");
        }
    }

    #[test]
    fn jacobi_recovers_known_eigenpairs() {
        let (values, vectors) = jacobi_eigen(vec![vec![2.0, 1.0], vec![1.0, 2.0]]);
        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        assert!((sorted[0] - 1.0).abs() < 1e-12);
        assert!((sorted[1] - 3.0).abs() < 1e-12);

        let k = if values[0] > values[1] { 0 } else { 1 };
        let ratio = vectors[0][k] / vectors[1][k];
        assert!((ratio - 1.0).abs() < 1e-9, "dominant eigenvector ∝ (1, 1)");
    }

    #[test]
    fn single_topic_dimension_changes_ranking_input() {
        let s = sentences("Cheap beer. Cheap beer and loud music. Quiet library vibe.");
        let full = LsaSummarizer::default().rank(&s);
        let reduced = LsaSummarizer::default().with_dimensions(0.0, 1).rank(&s);
        assert_eq!(full.len(), reduced.len());
        for (f, r) in full.iter().zip(&reduced) {
            assert!(r <= &(f + 1e-9));
        }
    }
}
