// TF-IDF vectorizer for catalog free text
use ahash::{AHashMap, AHashSet};
use std::sync::OnceLock;

use crate::Vector;

/// Upper bound on the number of retained vocabulary terms
pub const MAX_VOCABULARY: usize = 500;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

fn stop_words() -> &'static AHashSet<&'static str> {
    static STOP_WORDS: OnceLock<AHashSet<&'static str>> = OnceLock::new();
    STOP_WORDS.get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
}

/// Returns true if `term` is an English stop word
pub fn is_stop_word(term: &str) -> bool {
    stop_words().contains(term)
}

/// TF-IDF vectorizer with a capped, corpus-wide vocabulary.
///
/// Terms are lowercase runs of at least two word characters (alphanumeric
/// or `_`). English stop words are dropped. The vocabulary keeps the
/// `max_features` terms with the highest aggregate count (ties broken by
/// term order) and lays columns out in lexicographic term order. Weights
/// are `count * idf` with smoothed `idf = ln((1 + n) / (1 + df)) + 1`,
/// and every row is L2-normalised.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: Vec<String>,
    index: AHashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    #[inline]
    #[must_use]
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: Vec::new(),
            index: AHashMap::new(),
            idf: Vec::new(),
        }
    }

    /// Tokenize text: lowercase, split on non-word characters, drop
    /// single-character tokens and stop words
    pub fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|s| s.chars().count() > 1)
            .filter(|s| !is_stop_word(s))
            .map(str::to_string)
            .collect()
    }

    fn term_counts(text: &str) -> AHashMap<String, u32> {
        let mut counts: AHashMap<String, u32> = AHashMap::new();
        for token in Self::tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }

    /// Learn vocabulary and idf weights from a corpus
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        let mut total_counts: AHashMap<String, u64> = AHashMap::new();
        let mut doc_freqs: AHashMap<String, u32> = AHashMap::new();

        for doc in documents {
            for (term, count) in Self::term_counts(doc.as_ref()) {
                *total_counts.entry(term.clone()).or_insert(0) += u64::from(count);
                *doc_freqs.entry(term).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, u64)> = total_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        vocabulary.sort();

        let n_docs = documents.len() as f64;
        self.idf = vocabulary
            .iter()
            .map(|term| {
                let df = doc_freqs.get(term).copied().unwrap_or(0) as f64;
                (((1.0 + n_docs) / (1.0 + df)).ln() + 1.0) as f32
            })
            .collect();
        self.index = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        self.vocabulary = vocabulary;
    }

    /// Weight a single document against the fitted vocabulary.
    /// Documents with no vocabulary terms map to the zero vector.
    pub fn transform(&self, document: &str) -> Vector {
        let mut weights = vec![0.0f32; self.vocabulary.len()];
        for (term, count) in Self::term_counts(document) {
            if let Some(&col) = self.index.get(&term) {
                weights[col] = count as f32 * self.idf[col];
            }
        }

        let mut vector = Vector::new(weights);
        vector.normalize();
        vector
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Vec<Vector> {
        self.fit(documents);
        documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    #[inline]
    #[must_use]
    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    #[inline]
    #[must_use]
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(MAX_VOCABULARY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens = TfidfVectorizer::tokenize("The Car has a sunroof, ABS & power_steering!");
        assert_eq!(tokens, vec!["car", "sunroof", "abs", "power_steering"]);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let mut tfidf = TfidfVectorizer::default();
        tfidf.fit(&["zebra apple", "mango apple"]);
        assert_eq!(tfidf.vocabulary(), &["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_vocabulary_cap_keeps_most_frequent() {
        let mut tfidf = TfidfVectorizer::new(2);
        tfidf.fit(&["alloy alloy alloy sunroof", "sunroof sunroof navigation", "leather"]);
        assert_eq!(tfidf.vocabulary(), &["alloy", "sunroof"]);
    }

    #[test]
    fn test_smoothed_idf() {
        let mut tfidf = TfidfVectorizer::default();
        tfidf.fit(&["alloy wheels", "alloy"]);
        let alloy = tfidf.vocabulary().iter().position(|t| t == "alloy").unwrap();
        let wheels = tfidf.vocabulary().iter().position(|t| t == "wheels").unwrap();
        assert!((tfidf.idf()[alloy] - 1.0).abs() < 1e-6);
        let expected = (3.0f64 / 2.0).ln() as f32 + 1.0;
        assert!((tfidf.idf()[wheels] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_rows_are_unit_length_or_zero() {
        let mut tfidf = TfidfVectorizer::default();
        let rows = tfidf.fit_transform(&["alloy wheels sunroof", "the and of", ""]);
        assert!((rows[0].norm() - 1.0).abs() < 1e-5);
        assert_eq!(rows[1].norm(), 0.0);
        assert_eq!(rows[2].norm(), 0.0);
        assert_eq!(rows[1].dim(), tfidf.len());
    }

    #[test]
    fn test_unseen_terms_ignored() {
        let mut tfidf = TfidfVectorizer::default();
        tfidf.fit(&["alloy wheels"]);
        let v = tfidf.transform("turbocharger");
        assert_eq!(v.norm(), 0.0);
    }
}
