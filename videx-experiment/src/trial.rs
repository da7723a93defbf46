use videx_core::AnnotationEntry;

/// Cumulative descriptor sequence of one trial
#[derive(Debug, Clone, Default)]
pub struct AnnotationLog {
    entries: Vec<AnnotationEntry>,
    batches: usize,
}

impl AnnotationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one submission. Every word shares `timestamp` and keeps its
    /// order. Returns the number of entries added.
    pub fn commit(&mut self, words: Vec<String>, timestamp: f64) -> usize {
        let added = words.len();
        if added == 0 {
            return 0;
        }
        self.entries.extend(
            words
                .into_iter()
                .map(|word| AnnotationEntry { word, timestamp }),
        );
        self.batches += 1;
        added
    }

    pub fn entries(&self) -> &[AnnotationEntry] {
        &self.entries
    }

    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn take(&mut self) -> Vec<AnnotationEntry> {
        self.batches = 0;
        std::mem::take(&mut self.entries)
    }
}
