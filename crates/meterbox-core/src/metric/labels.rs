//! Named label builder.
//!
//! Positional label values are easy to transpose at call sites. `Labels`
//! collects `(name, value)` pairs in any order and is resolved against the
//! family's label names into the canonical ordinal tuple.

use crate::error::RecordError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    pairs: Vec<(String, String)>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label pair.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Order values by `label_names`. Every pair must name a known label and
    /// every label must be present exactly once.
    pub(crate) fn resolve(&self, label_names: &[String]) -> Result<Vec<&str>, RecordError> {
        if let Some((name, _)) = self.pairs.iter().find(|(n, _)| !label_names.contains(n)) {
            return Err(RecordError::UnexpectedLabel(name.clone()));
        }

        let mut values = Vec::with_capacity(label_names.len());
        for name in label_names {
            let value = self
                .pairs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
                .ok_or_else(|| RecordError::MissingLabel(name.clone()))?;
            values.push(value);
        }

        // Only duplicated pairs are left to catch here.
        if self.pairs.len() != label_names.len() {
            return Err(RecordError::Arity {
                expected: label_names.len(),
                got: self.pairs.len(),
            });
        }
        Ok(values)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Labels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
