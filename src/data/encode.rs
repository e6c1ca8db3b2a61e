use std::collections::HashMap;

use crate::error::{PipelineError, Result};

/// Integer codes for a categorical column, assigned in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CategoryEncoder {
    labels: Vec<String>,
    codes: HashMap<String, i64>,
}

impl CategoryEncoder {
    /// Learn the distinct labels of `values`.
    pub fn fit<S: AsRef<str>>(values: &[S]) -> Self {
        let mut encoder = Self::default();
        for value in values {
            let value = value.as_ref();
            if !encoder.codes.contains_key(value) {
                encoder
                    .codes
                    .insert(value.to_string(), encoder.labels.len() as i64);
                encoder.labels.push(value.to_string());
            }
        }
        encoder
    }

    /// Code column for `values`; an unseen label is an error.
    pub fn encode<S: AsRef<str>>(&self, values: &[S]) -> Result<Vec<i64>> {
        values.iter().map(|v| self.code(v.as_ref())).collect()
    }

    pub fn code(&self, label: &str) -> Result<i64> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| PipelineError::UnknownCategory(label.to_string()))
    }

    /// Label for `code`; the inverse of [`CategoryEncoder::code`].
    pub fn decode(&self, code: i64) -> Result<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
            .ok_or(PipelineError::UnknownCode(code))
    }

    /// Distinct labels; a label's index is its code.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// `(label, code)` pairs in code order.
    pub fn mapping(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i as i64))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}
