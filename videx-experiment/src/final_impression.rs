use crate::terms::{AnnotationRejection, PendingTerms};

/// Closing word list the participant builds after each video
#[derive(Debug, Clone)]
pub struct FinalImpression {
    terms: PendingTerms,
    min_terms: usize,
    cannot_add_visible: bool,
}

impl Default for FinalImpression {
    fn default() -> Self {
        Self::new(2)
    }
}

impl FinalImpression {
    pub fn new(min_terms: usize) -> Self {
        Self {
            terms: PendingTerms::new(),
            min_terms,
            cannot_add_visible: false,
        }
    }

    pub fn add(&mut self, word: &str) -> Result<(), AnnotationRejection> {
        match self.terms.add(word) {
            Ok(_) => {
                self.cannot_add_visible = false;
                Ok(())
            }
            Err(e @ AnnotationRejection::Duplicate(_)) => {
                self.cannot_add_visible = true;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn remove(&mut self, word: &str) -> bool {
        self.terms.remove(word)
    }

    pub fn can_submit(&self) -> bool {
        self.terms.len() >= self.min_terms
    }

    pub fn cannot_add_visible(&self) -> bool {
        self.cannot_add_visible
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.terms.iter()
    }

    pub fn submit(mut self) -> Result<Vec<String>, AnnotationRejection> {
        if !self.can_submit() {
            return Err(AnnotationRejection::TooFew {
                required: self.min_terms,
                got: self.terms.len(),
            });
        }
        Ok(self.terms.drain())
    }
}
