//! Per-call argument evidence

use smallvec::SmallVec;

use crate::{ResolvedType, TypeCategory};

/// Already-resolved types of selected argument positions of one call
///
/// Built once per expression node and discarded after that node is
/// resolved. Only the positions a specification requires need to be present.
/// There is no in-place mutation: `with` consumes and returns the evidence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentEvidence {
    /// Sorted by argument index, unique
    entries: SmallVec<[(usize, ResolvedType); 4]>,
}

impl ArgumentEvidence {
    /// Create empty evidence
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the resolved type of the argument at `index`, replacing any
    /// previous entry for that index
    pub fn with(mut self, index: usize, resolved: impl Into<ResolvedType>) -> Self {
        let resolved = resolved.into();
        match self.entries.binary_search_by_key(&index, |(i, _)| *i) {
            Ok(pos) => self.entries[pos].1 = resolved,
            Err(pos) => self.entries.insert(pos, (index, resolved)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Category of the argument at `index`, if present
    pub fn category_at(&self, index: usize) -> Option<TypeCategory> {
        self.resolved_at(index).map(ResolvedType::category)
    }

    /// Full resolved type of the argument at `index`, if present
    pub fn resolved_at(&self, index: usize) -> Option<&ResolvedType> {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .ok()
            .map(|pos| &self.entries[pos].1)
    }
}

impl<R: Into<ResolvedType>> FromIterator<(usize, R)> for ArgumentEvidence {
    fn from_iter<I: IntoIterator<Item = (usize, R)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |evidence, (index, resolved)| evidence.with(index, resolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_evidence() {
        let evidence = ArgumentEvidence::new();
        assert!(evidence.is_empty());
        assert_eq!(evidence.category_at(0), None);
    }

    #[test]
    fn test_entries_sorted_and_replaced() {
        let evidence = ArgumentEvidence::new()
            .with(3, TypeCategory::Text)
            .with(0, TypeCategory::Integer)
            .with(3, ResolvedType::map_of(TypeCategory::Boolean));

        assert_eq!(evidence.len(), 2);
        assert_eq!(evidence.category_at(0), Some(TypeCategory::Integer));
        assert_eq!(evidence.category_at(3), Some(TypeCategory::Map));
        assert_eq!(
            evidence.resolved_at(3),
            Some(&ResolvedType::map_of(TypeCategory::Boolean))
        );
        assert_eq!(evidence.category_at(1), None);
    }

    #[test]
    fn test_collect_from_pairs() {
        let evidence: ArgumentEvidence =
            [(1, TypeCategory::Boolean), (0, TypeCategory::Numeric)].into_iter().collect();
        assert_eq!(evidence.category_at(0), Some(TypeCategory::Numeric));
        assert_eq!(evidence.category_at(1), Some(TypeCategory::Boolean));
    }
}
