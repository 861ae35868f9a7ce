//! Validated molecule descriptors.

use derive_more::{Deref, Display};
use serde::Serialize;

use crate::{Error, Result};

/// A trimmed, non-empty SMILES-like molecule descriptor.
///
/// The only way to obtain one is [`MoleculeQuery::parse`], so holders can
/// rely on the descriptor being non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize)]
#[serde(transparent)]
pub struct MoleculeQuery(String);

impl MoleculeQuery {
    /// Validates a raw descriptor taken from a request.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput)
    /// when the descriptor is absent or empty after trimming.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let Some(raw) = raw else {
            return Err(Error::invalid_input().with_message("SMILES string required"));
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_input().with_message("Empty SMILES string"));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the descriptor as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the query and returns the descriptor.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for MoleculeQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn trims_surrounding_whitespace() -> Result<()> {
        let query = MoleculeQuery::parse(Some("  CCO \n"))?;
        assert_eq!(query.as_str(), "CCO");
        Ok(())
    }

    #[test]
    fn rejects_missing_descriptor() {
        let error = MoleculeQuery::parse(None).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert_eq!(error.user_message(), "SMILES string required");
    }

    #[test]
    fn rejects_blank_descriptor() {
        for raw in ["", "   ", "\t\n"] {
            let error = MoleculeQuery::parse(Some(raw)).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidInput);
            assert_eq!(error.user_message(), "Empty SMILES string");
        }
    }
}
