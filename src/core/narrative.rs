//! Natural-language sentences over a package-count summary. Both builders
//! are independent; the templating layer decides where each lands.

use crate::core::prose::{list_text, plural_modules};
use crate::domain::model::PackageCountSummary;

/// Exclusion reasons in their fixed narrative order, with their EC tags.
const REASON_CLAUSES: &[(&str, &str)] = &[
    ("utility or tooling modules", "EC1"),
    ("missing documentation", "EC2"),
    ("being documentation only", "EC3"),
    ("being deprecated", "EC4"),
];

/// Sentence flagging unverified/unclassified leftovers, or empty when the
/// classification is complete. Keeps its trailing space so the template can
/// concatenate sentences directly.
pub fn incompleteness_note(summary: &PackageCountSummary) -> String {
    if !summary.incomplete {
        return String::new();
    }

    let mut clauses = Vec::new();
    if summary.unverified > 0 {
        clauses.push(format!("{} unverified modules", summary.unverified));
    }
    if summary.unclassified > 0 {
        clauses.push(format!("{} unclassified modules", summary.unclassified));
    }

    format!(
        "The classification was not complete, as there was {}. ",
        list_text(&clauses)
    )
}

/// Sentence describing how many modules were excluded and for which
/// reasons.
pub fn exclusion_note(summary: &PackageCountSummary) -> String {
    if summary.excluded == 0 {
        return "Of these modules no modules were excluded".to_string();
    }

    let reason_counts = [
        summary.excluded_util,
        summary.excluded_no_doc,
        summary.excluded_doc,
        summary.excluded_deprecated,
    ];
    let clauses: Vec<String> = REASON_CLAUSES
        .iter()
        .zip(reason_counts)
        .filter(|(_, count)| *count > 0)
        .map(|((reason, tag), count)| {
            format!("{} excluded for {} ({})", plural_modules(count), reason, tag)
        })
        .collect();

    let opening = format!("Of these modules, {} excluded.", plural_modules(summary.excluded));
    if clauses.is_empty() {
        // Possible when excluded modules carry a marker no reason bucket
        // claims; there is nothing to itemize.
        opening
    } else {
        format!("{} Including {}.", opening, list_text(&clauses))
    }
}
