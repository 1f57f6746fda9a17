//! Term vector component parameters.

use std::ops::{BitOr, BitOrAssign};

use crate::query::{QueryParam, param};

/// Set of requested term vector statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TermVectorOptions(u8);

impl TermVectorOptions {
    pub const NONE: Self = TermVectorOptions(0);
    pub const TERM_FREQUENCY: Self = TermVectorOptions(1);
    pub const DOCUMENT_FREQUENCY: Self = TermVectorOptions(1 << 1);
    pub const POSITIONS: Self = TermVectorOptions(1 << 2);
    pub const OFFSETS: Self = TermVectorOptions(1 << 3);
    /// Term frequency, document frequency and tf-idf together.
    pub const TF_IDF: Self = TermVectorOptions(1 << 4);
    pub const ALL: Self = TermVectorOptions(0b1_1111);

    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Wire flags, without duplicates.
    ///
    /// `ALL` collapses to `tv.all`; otherwise `TF_IDF` expands to
    /// `tv.tf`, `tv.df` and `tv.tf_idf`.
    pub fn wire_flags(self) -> Vec<&'static str> {
        if self.contains(Self::ALL) {
            return vec!["tv.all"];
        }

        let mut flags = Vec::new();
        let mut push = |flag: &'static str| {
            if !flags.contains(&flag) {
                flags.push(flag);
            }
        };
        if self.contains(Self::TF_IDF) {
            push("tv.tf");
            push("tv.df");
            push("tv.tf_idf");
        }
        if self.contains(Self::OFFSETS) {
            push("tv.offsets");
        }
        if self.contains(Self::POSITIONS) {
            push("tv.positions");
        }
        if self.contains(Self::DOCUMENT_FREQUENCY) {
            push("tv.df");
        }
        if self.contains(Self::TERM_FREQUENCY) {
            push("tv.tf");
        }
        flags
    }
}

impl BitOr for TermVectorOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        TermVectorOptions(self.0 | rhs.0)
    }
}

impl BitOrAssign for TermVectorOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Term vector request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVectorParameters {
    pub fields: Vec<String>,
    pub options: TermVectorOptions,
}

impl TermVectorParameters {
    pub fn new<I, S>(fields: I, options: TermVectorOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TermVectorParameters {
            fields: fields.into_iter().map(Into::into).collect(),
            options,
        }
    }

    pub(crate) fn parameters(&self) -> Vec<QueryParam> {
        let mut params = vec![param("tv", true)];
        if !self.fields.is_empty() {
            params.push(param("tv.fl", self.fields.join(",")));
        }
        params.extend(
            self.options
                .wire_flags()
                .into_iter()
                .map(|flag| param(flag, true)),
        );
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_takes_priority() {
        let options = TermVectorOptions::ALL | TermVectorOptions::OFFSETS;
        assert_eq!(options.wire_flags(), vec!["tv.all"]);
    }

    #[test]
    fn test_tf_idf_expands_and_dedups() {
        let options = TermVectorOptions::TF_IDF
            | TermVectorOptions::TERM_FREQUENCY
            | TermVectorOptions::DOCUMENT_FREQUENCY
            | TermVectorOptions::POSITIONS;
        assert_eq!(
            options.wire_flags(),
            vec!["tv.tf", "tv.df", "tv.tf_idf", "tv.positions"]
        );
    }

    #[test]
    fn test_single_flags() {
        assert_eq!(TermVectorOptions::OFFSETS.wire_flags(), vec!["tv.offsets"]);
        assert_eq!(
            (TermVectorOptions::TERM_FREQUENCY | TermVectorOptions::DOCUMENT_FREQUENCY)
                .wire_flags(),
            vec!["tv.df", "tv.tf"]
        );
        assert!(TermVectorOptions::NONE.wire_flags().is_empty());
    }

    #[test]
    fn test_parameters_without_fields() {
        let tv = TermVectorParameters::new(Vec::<String>::new(), TermVectorOptions::POSITIONS);
        assert_eq!(
            tv.parameters(),
            vec![
                ("tv".to_string(), "true".to_string()),
                ("tv.positions".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_parameters_with_fields() {
        let tv = TermVectorParameters::new(["title", "body"], TermVectorOptions::NONE);
        assert_eq!(
            tv.parameters(),
            vec![
                ("tv".to_string(), "true".to_string()),
                ("tv.fl".to_string(), "title,body".to_string()),
            ]
        );
    }
}
