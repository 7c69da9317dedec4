//! The classification aggregator: ranks subject areas across the whole
//! module table and resolves each against the taxonomy and the authored
//! commentary.

use crate::core::grouping::top_groups;
use crate::core::prose::list_text;
use crate::domain::model::{
    ClassifiedModule, GroupLimits, SubjectAreaSummary, SubjectBreakdown,
};
use crate::domain::taxonomy::{Commentary, SubjectNames};
use crate::utils::error::Result;

/// Builds one ranked summary per top subject area, richest areas first.
///
/// Exclusion-marked and unclassified modules are out of scope. Commentary
/// coverage is checked up front for every area that will appear in the
/// output, so a data-authoring gap aborts the build before any summary is
/// assembled.
pub fn summarize_subject_areas(
    modules: &[ClassifiedModule],
    names: &SubjectNames,
    commentary: &Commentary,
    limits: GroupLimits,
) -> Result<Vec<SubjectAreaSummary>> {
    let in_scope: Vec<&ClassifiedModule> = modules
        .iter()
        .filter(|m| !m.subject_code.is_unclassified() && !m.subject_code.is_exclusion_marker())
        .collect();

    let areas = top_groups(
        &in_scope,
        |m| m.subject_code.top_class().to_string(),
        limits.top_areas,
    );

    commentary.ensure_covers(areas.iter().map(|(code, _)| code.as_str()))?;

    let summaries = areas
        .into_iter()
        .map(|(code, members)| {
            let mids = named_breakdowns(
                top_groups(
                    &members,
                    |m| m.subject_code.mid_class().to_string(),
                    limits.mid_breakdowns,
                ),
                names,
            );
            let fines = named_breakdowns(
                top_groups(
                    &members,
                    |m| m.subject_code.as_str().to_string(),
                    limits.fine_breakdowns,
                ),
                names,
            );
            let itps = top_groups(&members, |m| m.itp.clone(), limits.top_itps);
            let itp_phrases: Vec<String> = itps
                .iter()
                .map(|(itp, group)| format!("*{}* with {} modules", itp, group.len()))
                .collect();
            // A zero ITP limit leaves no phrases to render.
            let top_itps = if itp_phrases.is_empty() {
                String::new()
            } else {
                list_text(&itp_phrases)
            };

            // Coverage was checked above, so the lookup cannot miss here.
            let commentary_text = commentary.get(&code).unwrap_or_default().to_string();

            SubjectAreaSummary {
                name: names.get(&code).unwrap_or(&code).to_string(),
                total: members.len(),
                mid_breakdown: breakdown_prose(&mids),
                fine_breakdown: breakdown_prose(&fines),
                top_itps,
                commentary: commentary_text,
                code,
            }
        })
        .collect();

    Ok(summaries)
}

/// Resolves ranked groups against the name table. Groups whose key has no
/// authored name are dropped, not reported.
fn named_breakdowns<T>(
    groups: Vec<(String, Vec<T>)>,
    names: &SubjectNames,
) -> Vec<SubjectBreakdown> {
    groups
        .into_iter()
        .filter_map(|(code, members)| {
            names.get(&code).map(|name| SubjectBreakdown {
                name: name.to_string(),
                count: members.len(),
                code,
            })
        })
        .collect()
}

fn breakdown_prose(breakdowns: &[SubjectBreakdown]) -> String {
    if breakdowns.is_empty() {
        return String::new();
    }
    let phrases: Vec<String> = breakdowns
        .iter()
        .map(|b| format!("*{}* ({}) with {} modules", b.name, b.code, b.count))
        .collect();
    list_text(&phrases)
}
