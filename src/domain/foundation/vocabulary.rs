//! Vocabulary tables mapping act and slot names to dense indices.

use std::collections::HashMap;

use super::ValidationError;

/// Immutable bijection between names and zero-based indices.
///
/// The index of a name is its position in the source list, which for file
/// based vocabularies is its line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Builds a vocabulary from an ordered list of names.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the list is empty, contains an empty
    /// name, or contains the same name twice.
    pub fn from_names<I, S>(field: &str, names: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(ValidationError::empty_field(field));
        }

        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("empty name at index {}", position),
                ));
            }
            if index.insert(name.clone(), position).is_some() {
                return Err(ValidationError::duplicate(field, name.clone()));
            }
        }

        Ok(Self { names, index })
    }

    /// Returns the index of a name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the name at an index, if in range.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Returns true if the name is part of the vocabulary.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed vocabulary.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
