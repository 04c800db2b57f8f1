//! Data-shape checks for search data.
//!
//! Errors break the invariants a consumer relies on (unique non-empty keys,
//! at least one target, non-empty URLs). Warnings flag data that still loads
//! but was not written by the generator in the usual way.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::entry::SearchEntry;
use crate::key::decode_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    EmptyKey,
    DuplicateKey { first: usize },
    NoTargets,
    EmptyUrl { target: usize },
    MalformedKey { reason: String },
    OrdinalOutOfOrder { previous: u32, ordinal: u32 },
    KeyOutOfOrder { previous: String },
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::EmptyKey
            | IssueKind::DuplicateKey { .. }
            | IssueKind::NoTargets
            | IssueKind::EmptyUrl { .. } => Severity::Error,
            IssueKind::MalformedKey { .. }
            | IssueKind::OrdinalOutOfOrder { .. }
            | IssueKind::KeyOutOfOrder { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::EmptyKey => write!(f, "empty key"),
            IssueKind::DuplicateKey { first } => write!(f, "duplicate of entry {first}"),
            IssueKind::NoTargets => write!(f, "no targets"),
            IssueKind::EmptyUrl { target } => write!(f, "target {target} has an empty url"),
            IssueKind::MalformedKey { reason } => write!(f, "malformed key ({reason})"),
            IssueKind::OrdinalOutOfOrder { previous, ordinal } => {
                write!(f, "ordinal {ordinal} follows {previous}")
            }
            IssueKind::KeyOutOfOrder { previous } => {
                write!(f, "term sorts before previous term '{previous}'")
            }
        }
    }
}

/// One finding, located by entry position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub entry: usize,
    pub key: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity() {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: entry {} '{}': {}", self.entry, self.key, self.kind)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub entries: usize,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity() == Severity::Warning)
    }

    /// True when no errors were found. Warnings do not fail validation.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }
}

/// Check entries against the data-shape invariants.
pub fn validate(entries: &[SearchEntry]) -> ValidationReport {
    let mut issues = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
    let mut previous: Option<(u32, String)> = None;

    for (i, entry) in entries.iter().enumerate() {
        let mut push = |kind: IssueKind| {
            issues.push(Issue {
                entry: i,
                key: entry.key.clone(),
                kind,
            })
        };

        if entry.key.is_empty() {
            push(IssueKind::EmptyKey);
        } else if let Some(&first) = seen.get(entry.key.as_str()) {
            push(IssueKind::DuplicateKey { first });
        } else {
            seen.insert(&entry.key, i);
        }

        if entry.targets.is_empty() {
            push(IssueKind::NoTargets);
        }
        for (t, target) in entry.targets.iter().enumerate() {
            if target.url.is_empty() {
                push(IssueKind::EmptyUrl { target: t });
            }
        }

        if entry.key.is_empty() {
            continue;
        }
        match decode_key(&entry.key) {
            Ok(decoded) => {
                // Ordinals restart at zero in each per-letter file.
                if decoded.ordinal != 0 {
                    if let Some((prev_ordinal, prev_term)) = &previous {
                        if decoded.ordinal <= *prev_ordinal {
                            push(IssueKind::OrdinalOutOfOrder {
                                previous: *prev_ordinal,
                                ordinal: decoded.ordinal,
                            });
                        }
                        if decoded.term < *prev_term {
                            push(IssueKind::KeyOutOfOrder {
                                previous: prev_term.clone(),
                            });
                        }
                    }
                }
                previous = Some((decoded.ordinal, decoded.term));
            }
            Err(e) => push(IssueKind::MalformedKey {
                reason: e.to_string(),
            }),
        }
    }

    let report = ValidationReport {
        entries: entries.len(),
        issues,
    };
    for issue in report.warnings() {
        warn!(entry = issue.entry, key = %issue.key, "{}", issue.kind);
    }
    report
}
