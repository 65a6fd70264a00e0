//! Catalog quality validation module.
//!
//! Compares a translated catalog against the reference (English) catalog and
//! reports structural problems: changed shapes, lost or invented
//! placeholders, feature lists of a different length. Keys the translation
//! does not cover are only warnings, since partial catalogs fall back to the
//! previous language's text.

use crate::i18n::catalog::{Catalog, Node};
use crate::i18n::resolver::placeholders;
use std::collections::{BTreeMap, BTreeSet};

/// Validation report containing errors and warnings about a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that break rendering or interpolation
    pub errors: Vec<String>,

    /// Gaps and extras that only affect coverage
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// Validator for catalog structure.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Validate `candidate` against `reference`.
    ///
    /// Errors:
    /// - a key is text in one catalog and a list or section in the other
    /// - a text's `{{placeholder}}` set differs
    /// - a list has a different number of entries
    ///
    /// Warnings:
    /// - a reference key is missing from the candidate
    /// - the candidate has a key the reference does not
    pub fn validate(reference: &Catalog, candidate: &Catalog) -> ValidationReport {
        let mut report = ValidationReport::new();
        Self::compare_sections("", reference.sections(), candidate.sections(), &mut report);
        report
    }

    fn compare_sections(
        prefix: &str,
        reference: &BTreeMap<String, Node>,
        candidate: &BTreeMap<String, Node>,
        report: &mut ValidationReport,
    ) {
        for (name, expected) in reference {
            let key = join(prefix, name);
            match candidate.get(name) {
                Some(actual) => Self::compare_nodes(&key, expected, actual, report),
                None => report.warnings.push(format!("Missing key: {}", key)),
            }
        }

        for name in candidate.keys().filter(|name| !reference.contains_key(*name)) {
            report
                .warnings
                .push(format!("Key not in reference catalog: {}", join(prefix, name)));
        }
    }

    fn compare_nodes(key: &str, expected: &Node, actual: &Node, report: &mut ValidationReport) {
        match (expected, actual) {
            (Node::Text(expected), Node::Text(actual)) => {
                let expected_names: BTreeSet<_> = placeholders(expected).into_iter().collect();
                let actual_names: BTreeSet<_> = placeholders(actual).into_iter().collect();
                if expected_names != actual_names {
                    report.errors.push(format!(
                        "Placeholder mismatch at {}: reference has {:?}, translation has {:?}",
                        key, expected_names, actual_names
                    ));
                }
            }
            (Node::List(expected), Node::List(actual)) => {
                if expected.len() != actual.len() {
                    report.errors.push(format!(
                        "List length mismatch at {}: reference has {}, translation has {}",
                        key,
                        expected.len(),
                        actual.len()
                    ));
                }
            }
            (Node::Section(expected), Node::Section(actual)) => {
                Self::compare_sections(key, expected, actual, report);
            }
            (expected, actual) => {
                report.errors.push(format!(
                    "Shape mismatch at {}: reference is {}, translation is {}",
                    key,
                    expected.kind(),
                    actual.kind()
                ));
            }
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
