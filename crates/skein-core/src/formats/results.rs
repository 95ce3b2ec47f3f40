//! # Results Log
//!
//! One row per computed diagram: `<diagram-name>,<polynomial>`.
//!
//! Other tooling splits rows on the first separator, so names may not contain
//! it and may not span lines. The plain polynomial rendering never contains
//! the separator.

use crate::polynomial::LaurentPoly;
use crate::primitives::RESULTS_LOG_SEPARATOR;
use crate::SkeinError;

/// A computed polynomial tagged with its diagram name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub name: String,
    pub polynomial: LaurentPoly,
}

impl ResultRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, polynomial: LaurentPoly) -> Self {
        Self {
            name: name.into(),
            polynomial,
        }
    }

    /// Render the log row, without a trailing newline.
    pub fn to_line(&self) -> Result<String, SkeinError> {
        if self.name.is_empty() {
            return Err(SkeinError::SerializationError(
                "results row needs a diagram name".to_string(),
            ));
        }
        if self
            .name
            .chars()
            .any(|ch| ch == RESULTS_LOG_SEPARATOR || ch == '\n' || ch == '\r')
        {
            return Err(SkeinError::SerializationError(format!(
                "diagram name {:?} cannot be written to the results log",
                self.name
            )));
        }
        Ok(format!(
            "{}{}{}",
            self.name, RESULTS_LOG_SEPARATOR, self.polynomial
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_format() {
        let poly = LaurentPoly::monomial(-1, -4, 0) + LaurentPoly::monomial(1, -2, 2);
        let record = ResultRecord::new("3_1", poly);
        assert_eq!(record.to_line().expect("row"), "3_1,-l^-4 + l^-2*m^2");
    }

    #[test]
    fn separator_in_name_rejected() {
        let record = ResultRecord::new("a,b", LaurentPoly::one());
        assert!(matches!(
            record.to_line(),
            Err(SkeinError::SerializationError(_))
        ));
        assert!(ResultRecord::new("a\nb", LaurentPoly::one()).to_line().is_err());
        assert!(ResultRecord::new("", LaurentPoly::one()).to_line().is_err());
    }
}
