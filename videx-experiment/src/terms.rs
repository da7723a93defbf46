use thiserror::Error;

/// Why a word was not accepted into a term list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationRejection {
    #[error("word is empty")]
    Empty,
    #[error("'{0}' is already in the list")]
    Duplicate(String),
    #[error("input is disabled while the video plays")]
    InputDisabled,
    #[error("at least {required} words are needed, got {got}")]
    TooFew { required: usize, got: usize },
}

/// Words entered since the last submission.
///
/// Keeps insertion order and rejects exact (case-sensitive) duplicates, so the
/// set never holds the same word twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingTerms {
    words: Vec<String>,
}

impl PendingTerms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trims and appends `word`, returning the stored form.
    pub fn add(&mut self, word: &str) -> Result<&str, AnnotationRejection> {
        let word = word.trim();
        if word.is_empty() {
            return Err(AnnotationRejection::Empty);
        }
        if self.contains(word) {
            return Err(AnnotationRejection::Duplicate(word.to_string()));
        }
        self.words.push(word.to_string());
        Ok(self.words.last().map(String::as_str).unwrap_or_default())
    }

    pub fn remove(&mut self, word: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|w| w != word);
        self.words.len() != before
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Empties the set, handing back the words in insertion order.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.words)
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut terms = PendingTerms::new();
        terms.add("calm").unwrap();
        terms.add("friendly").unwrap();
        terms.add("articulate").unwrap();
        assert_eq!(
            terms.iter().collect::<Vec<_>>(),
            vec!["calm", "friendly", "articulate"]
        );
    }

    #[test]
    fn duplicate_never_changes_contents() {
        let mut terms = PendingTerms::new();
        terms.add("calm").unwrap();
        let snapshot = terms.clone();
        assert_eq!(
            terms.add("calm"),
            Err(AnnotationRejection::Duplicate("calm".into()))
        );
        assert_eq!(terms.add("  calm "), Err(AnnotationRejection::Duplicate("calm".into())));
        assert_eq!(terms, snapshot);
    }

    #[test]
    fn duplicates_are_case_sensitive() {
        let mut terms = PendingTerms::new();
        terms.add("Calm").unwrap();
        assert!(terms.add("calm").is_ok());
        assert_eq!(terms.len(), 2);
    }

    #[test]
    fn blank_words_rejected() {
        let mut terms = PendingTerms::new();
        assert_eq!(terms.add("   "), Err(AnnotationRejection::Empty));
        assert!(terms.is_empty());
    }

    #[test]
    fn remove_then_re_add() {
        let mut terms = PendingTerms::new();
        terms.add("tense").unwrap();
        assert!(terms.remove("tense"));
        assert!(!terms.remove("tense"));
        assert!(terms.is_empty());
        assert_eq!(terms.add("tense"), Ok("tense"));
    }

    #[test]
    fn drain_empties() {
        let mut terms = PendingTerms::new();
        terms.add("a").unwrap();
        terms.add("b").unwrap();
        assert_eq!(terms.drain(), vec!["a".to_string(), "b".to_string()]);
        assert!(terms.is_empty());
    }
}
