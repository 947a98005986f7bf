use std::num::NonZeroUsize;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    #[must_use]
    pub const fn as_non_zero(self) -> NonZeroUsize {
        self.0
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PositiveUsize)
            .ok_or(ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        PositiveUsize::try_from(value)
    }
}

impl From<PositiveUsize> for NonZeroUsize {
    fn from(value: PositiveUsize) -> Self {
        value.0
    }
}

/// A non-empty, comma-separated label allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelList(Vec<String>);

impl LabelList {
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl std::str::FromStr for LabelList {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyLabelList);
        }
        let mut labels = Vec::new();
        for part in s.split(',') {
            let label = part.trim();
            if label.is_empty() {
                return Err(ValidationError::EmptyLabel {
                    value: s.to_owned(),
                });
            }
            if !labels.iter().any(|existing: &String| existing == label) {
                labels.push(label.to_owned());
            }
        }
        Ok(Self(labels))
    }
}
