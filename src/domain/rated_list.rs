use crate::domain::catalog::{Catalog, Choice};
use crate::domain::model::{RatedEntry, MAX_SCORE, MIN_SCORE};
use crate::utils::error::{FormError, Result};

/// Ordered list of rated catalog values where each value appears at most once.
///
/// Every mutation builds a new vector from the current one and swaps it in, so
/// a failed precondition leaves the list exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatedEntryList<V: Catalog> {
    entries: Vec<RatedEntry<V>>,
}

impl<V: Catalog> Default for RatedEntryList<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreField {
    Experience,
    Recommendation,
}

impl ScoreField {
    pub fn name(self) -> &'static str {
        match self {
            ScoreField::Experience => "experience",
            ScoreField::Recommendation => "recommendation",
        }
    }
}

impl<V: Catalog> RatedEntryList<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from existing rows, rejecting duplicate values.
    pub fn from_entries(entries: Vec<RatedEntry<V>>) -> Result<Self> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.value == entry.value) {
                return Err(FormError::DuplicateEntry {
                    value: entry.value.code().to_string(),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RatedEntry<V>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RatedEntry<V>> {
        self.entries.get(index)
    }

    pub fn position(&self, value: V) -> Option<usize> {
        self.entries.iter().position(|e| e.value == value)
    }

    pub fn contains(&self, value: V) -> bool {
        self.position(value).is_some()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Err(FormError::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }

    fn replace(&mut self, entries: Vec<RatedEntry<V>>) {
        self.entries = entries;
    }

    /// Appends `value` with both scores unrated.
    pub fn add_entry(&mut self, value: V) -> Result<()> {
        if self.contains(value) {
            return Err(FormError::DuplicateEntry {
                value: value.code().to_string(),
            });
        }

        let mut next = self.entries.clone();
        next.push(RatedEntry::unrated(value));
        self.replace(next);
        tracing::debug!("Added {} {}", V::NOUN, value.code());
        Ok(())
    }

    /// Renames the row at `index` in place, keeping its scores.
    pub fn change_entry_value(&mut self, index: usize, new_value: V) -> Result<()> {
        self.check_index(index)?;

        let taken_elsewhere = self
            .entries
            .iter()
            .enumerate()
            .any(|(i, e)| i != index && e.value == new_value);
        if taken_elsewhere {
            return Err(FormError::DuplicateEntry {
                value: new_value.code().to_string(),
            });
        }

        let next = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                if i == index {
                    RatedEntry {
                        value: new_value,
                        ..*e
                    }
                } else {
                    *e
                }
            })
            .collect();
        self.replace(next);
        Ok(())
    }

    /// Commits a finished slider drag for one score of the row at `index`.
    pub fn set_score(&mut self, index: usize, field: ScoreField, score: i32) -> Result<()> {
        self.check_index(index)?;
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(FormError::ScoreOutOfRange { score });
        }

        let next = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| match (i == index, field) {
                (true, ScoreField::Experience) => RatedEntry {
                    experience: score,
                    ..*e
                },
                (true, ScoreField::Recommendation) => RatedEntry {
                    recommendation: score,
                    ..*e
                },
                (false, _) => *e,
            })
            .collect();
        self.replace(next);
        Ok(())
    }

    pub fn set_experience(&mut self, index: usize, score: i32) -> Result<()> {
        self.set_score(index, ScoreField::Experience, score)
    }

    pub fn set_recommendation(&mut self, index: usize, score: i32) -> Result<()> {
        self.set_score(index, ScoreField::Recommendation, score)
    }

    /// Removes every row holding `value`. Returns whether anything was removed.
    pub fn remove_entry(&mut self, value: V) -> bool {
        let next: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.value != value)
            .copied()
            .collect();
        let removed = next.len() != self.entries.len();
        self.replace(next);
        removed
    }

    /// Catalog values not yet in the list, in catalog order.
    pub fn available_for_add(&self) -> Vec<V> {
        V::ALL
            .iter()
            .copied()
            .filter(|v| !self.contains(*v))
            .collect()
    }

    /// Candidates for the picker of the row at `index`: unused values plus the row's own.
    pub fn available_for_rename(&self, index: usize) -> Result<Vec<Choice<V>>> {
        self.check_index(index)?;
        let current = self.entries[index].value;

        Ok(V::ALL
            .iter()
            .copied()
            .filter(|v| *v == current || !self.contains(*v))
            .map(|v| Choice {
                value: v,
                selected: v == current,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Framework, Language};
    use crate::domain::model::UNRATED;

    fn list_of(values: &[(Language, i32, i32)]) -> RatedEntryList<Language> {
        RatedEntryList::from_entries(
            values
                .iter()
                .map(|&(value, experience, recommendation)| RatedEntry {
                    value,
                    experience,
                    recommendation,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_add_entry_appends_unrated() {
        for &value in Language::ALL {
            let mut list = RatedEntryList::new();
            list.add_entry(value).unwrap();
            let matching: Vec<_> = list.entries().iter().filter(|e| e.value == value).collect();
            assert_eq!(matching.len(), 1);
            assert_eq!(matching[0].experience, UNRATED);
            assert_eq!(matching[0].recommendation, UNRATED);
        }
    }

    #[test]
    fn test_add_duplicate_is_rejected_without_change() {
        let mut list = list_of(&[(Language::Python, 10, 20)]);
        let before = list.clone();
        assert!(matches!(
            list.add_entry(Language::Python),
            Err(FormError::DuplicateEntry { .. })
        ));
        assert_eq!(list, before);
    }

    #[test]
    fn test_available_for_add_excludes_selected() {
        let mut list = RatedEntryList::new();
        assert_eq!(list.available_for_add(), Language::ALL.to_vec());

        list.add_entry(Language::Go).unwrap();
        list.add_entry(Language::Python).unwrap();
        let available = list.available_for_add();
        assert_eq!(available.len(), Language::ALL.len() - list.len());
        assert!(!available.contains(&Language::Go));
        assert!(!available.contains(&Language::Python));
        assert_eq!(available.first(), Some(&Language::JavaScript));
    }

    #[test]
    fn test_available_for_rename_keeps_own_value_selected() {
        let list = list_of(&[(Language::Python, -1, -1), (Language::Go, -1, -1)]);
        let choices = list.available_for_rename(1).unwrap();

        assert!(choices.iter().all(|c| c.value != Language::Python));
        let own: Vec<_> = choices.iter().filter(|c| c.selected).collect();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].value, Language::Go);
        assert_eq!(choices.len(), Language::ALL.len() - 1);

        assert!(list.available_for_rename(2).is_err());
    }

    #[test]
    fn test_change_entry_value_keeps_scores_and_length() {
        let mut list = list_of(&[(Language::Python, 80, 30)]);
        list.change_entry_value(0, Language::Rust).unwrap();
        assert_eq!(list, list_of(&[(Language::Rust, 80, 30)]));
    }

    #[test]
    fn test_change_entry_value_to_own_value_is_noop() {
        let mut list = list_of(&[(Language::Python, 80, 30), (Language::Go, 1, 2)]);
        let before = list.clone();
        list.change_entry_value(1, Language::Go).unwrap();
        assert_eq!(list, before);
    }

    #[test]
    fn test_change_entry_value_rejects_taken_value() {
        let mut list = list_of(&[(Language::Python, 80, 30), (Language::Go, 1, 2)]);
        let before = list.clone();
        assert!(list.change_entry_value(0, Language::Go).is_err());
        assert!(matches!(
            list.change_entry_value(5, Language::C),
            Err(FormError::IndexOutOfBounds { index: 5, len: 2 })
        ));
        assert_eq!(list, before);
    }

    #[test]
    fn test_set_experience_only_touches_target_row() {
        let mut list = list_of(&[(Language::Python, -1, -1), (Language::Go, -1, -1)]);
        list.set_experience(0, 80).unwrap();
        assert_eq!(
            list,
            list_of(&[(Language::Python, 80, -1), (Language::Go, -1, -1)])
        );

        list.set_recommendation(1, 0).unwrap();
        assert_eq!(
            list,
            list_of(&[(Language::Python, 80, -1), (Language::Go, -1, 0)])
        );
    }

    #[test]
    fn test_set_score_rejects_out_of_range() {
        let mut list = list_of(&[(Language::Python, 50, 50)]);
        assert!(matches!(
            list.set_experience(0, 101),
            Err(FormError::ScoreOutOfRange { score: 101 })
        ));
        assert!(list.set_recommendation(0, -1).is_err());
        assert!(list.set_experience(1, 10).is_err());
        assert_eq!(list, list_of(&[(Language::Python, 50, 50)]));
    }

    #[test]
    fn test_remove_entry_preserves_order_and_is_idempotent() {
        let mut list = list_of(&[
            (Language::Python, 1, 1),
            (Language::Go, 2, 2),
            (Language::Rust, 3, 3),
        ]);
        assert!(list.remove_entry(Language::Go));
        let once = list.clone();
        assert_eq!(
            once,
            list_of(&[(Language::Python, 1, 1), (Language::Rust, 3, 3)])
        );

        assert!(!list.remove_entry(Language::Go));
        assert_eq!(list, once);
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let result = RatedEntryList::from_entries(vec![
            RatedEntry::unrated(Framework::React),
            RatedEntry::unrated(Framework::React),
        ]);
        assert!(result.is_err());
    }
}
