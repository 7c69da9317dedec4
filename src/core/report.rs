//! Assembles the full report record handed to the templating layer: header
//! prose about the surveyed ITPs, one summary per registered library, and
//! the ranked subject areas.

use crate::core::aggregate::summarize_subject_areas;
use crate::core::narrative::{exclusion_note, incompleteness_note};
use crate::core::partition::partition_by;
use crate::core::prose::list_text;
use crate::core::summary::summarize_package_counts;
use crate::domain::model::{
    ClassifiedModule, Dataset, GeneratorSummary, GroupLimits, LibrarySummary, MathNotationItp,
    Report,
};
use std::collections::HashSet;
use crate::domain::taxonomy::{Commentary, SubjectNames};
use crate::utils::error::{ReportError, Result};

/// Build date in the report's `%d %B %Y` convention, e.g. `07 March 2026`.
pub fn build_date() -> String {
    chrono::Utc::now().format("%d %B %Y").to_string()
}

pub fn assemble_report(
    data: &Dataset,
    names: &SubjectNames,
    commentary: &Commentary,
    limits: GroupLimits,
    date: &str,
) -> Result<Report> {
    if data.itps.is_empty() {
        return Err(ReportError::DatasetError {
            message: "ITP feature table is empty".to_string(),
        });
    }

    let mut itps = data.itps.clone();
    itps.sort_by(|a, b| a.name.cmp(&b.name));
    let itp_names: Vec<&str> = itps.iter().map(|itp| itp.name.as_str()).collect();

    let (with_counterexamples, without_counterexamples) =
        partition_by(itps.iter().collect(), |itp| itp.counterexamples != "No");
    let (with_notation, without_notation) =
        partition_by(itps.iter().collect(), |itp| itp.utf8_library);

    let counterexample_generators = generator_summaries(data);
    // An ITP can claim counterexample support in the feature table without
    // any generator actually integrating with it; this list is derived from
    // the integration table alone.
    let integrated: HashSet<&str> = data
        .integrations
        .iter()
        .map(|integration| integration.prover.as_str())
        .collect();
    let unintegrated: Vec<&crate::domain::model::Itp> = itps
        .iter()
        .filter(|itp| !integrated.contains(itp.name.as_str()))
        .collect();

    let libraries = library_summaries(data);
    let total_package_count = libraries.iter().map(|l| l.counts.total).sum();
    let verified_package_count = libraries.iter().map(|l| l.counts.verified).sum();

    let subject_areas = summarize_subject_areas(&data.modules, names, commentary, limits)?;

    let mut releases = data.releases.clone();
    releases.sort_by(|a, b| a.itp.cmp(&b.itp));

    Ok(Report {
        date: date.to_string(),
        itp_count: itps.len(),
        itp_names: list_text(&itp_names),
        counterexample_itps: with_counterexamples
            .iter()
            .map(|itp| itp.name.clone())
            .collect(),
        no_counterexample_itps: name_prose(&without_counterexamples),
        math_notation_itps: with_notation
            .iter()
            .map(|itp| MathNotationItp {
                name: itp.name.clone(),
                description: itp.math_notation.clone(),
            })
            .collect(),
        no_math_notation_itps: name_prose(&without_notation),
        counterexample_generator_count: counterexample_generators.len(),
        counterexample_generators,
        no_generator_itps: name_prose(&unintegrated),
        library_count: data.libraries.len(),
        total_package_count,
        verified_package_count,
        libraries,
        subject_areas,
        releases,
    })
}

/// One summary plus narratives per registered (ITP, section) pair, in
/// registry order sorted by ITP then section.
fn library_summaries(data: &Dataset) -> Vec<LibrarySummary> {
    let mut entries = data.libraries.clone();
    entries.sort_by(|a, b| (&a.itp, &a.section).cmp(&(&b.itp, &b.section)));

    entries
        .iter()
        .map(|entry| {
            let modules: Vec<ClassifiedModule> = data
                .modules
                .iter()
                .filter(|m| m.itp == entry.itp && m.library == entry.section)
                .cloned()
                .collect();
            let counts = summarize_package_counts(&modules);
            LibrarySummary {
                itp: entry.itp.clone(),
                library: entry.section.clone(),
                incompleteness_note: incompleteness_note(&counts),
                exclusion_note: exclusion_note(&counts),
                counts,
            }
        })
        .collect()
}

/// One summary per registered generator, sorted by name, with the provers
/// it integrates with rendered to prose. A generator nothing integrates
/// with gets an empty support string.
fn generator_summaries(data: &Dataset) -> Vec<GeneratorSummary> {
    let mut generators = data.generators.clone();
    generators.sort_by(|a, b| a.name.cmp(&b.name));

    generators
        .iter()
        .map(|generator| {
            let provers: Vec<&str> = data
                .integrations
                .iter()
                .filter(|integration| integration.name == generator.name)
                .map(|integration| integration.prover.as_str())
                .collect();
            GeneratorSummary {
                name: generator.name.clone(),
                description: generator.description.clone(),
                support: if provers.is_empty() {
                    String::new()
                } else {
                    list_text(&provers)
                },
            }
        })
        .collect()
}

fn name_prose(itps: &[&crate::domain::model::Itp]) -> String {
    if itps.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = itps.iter().map(|itp| itp.name.as_str()).collect();
    list_text(&names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        CounterexampleGenerator, CounterexampleIntegration, Itp, LibraryEntry, SubjectCode,
    };
    use crate::domain::taxonomy::{MscClass, MscSubclass};

    fn itp(name: &str, counterexamples: &str, utf8: bool) -> Itp {
        Itp {
            name: name.to_string(),
            counterexamples: counterexamples.to_string(),
            utf8_library: utf8,
            math_notation: format!("{} renders notation in its IDE", name),
        }
    }

    fn module(itp: &str, library: &str, code: &str, verified: bool) -> ClassifiedModule {
        ClassifiedModule {
            itp: itp.to_string(),
            library: library.to_string(),
            package: format!("{}.{}", library, code),
            subject_code: SubjectCode::new(code),
            verified,
        }
    }

    fn dataset() -> Dataset {
        Dataset {
            modules: vec![
                module("Lean", "mathlib", "68N15", true),
                module("Lean", "mathlib", "Exclude-Util", true),
                module("Lean", "mathlib", "", false),
                module("Coq", "stdlib", "03B35", true),
                module("Coq", "stdlib", "68N15", false),
            ],
            itps: vec![
                itp("Lean", "Yes", true),
                itp("Coq", "Yes", true),
                itp("Mizar", "No", false),
            ],
            libraries: vec![
                LibraryEntry {
                    itp: "Lean".to_string(),
                    section: "mathlib".to_string(),
                    url: "https://example.org/mathlib".to_string(),
                },
                LibraryEntry {
                    itp: "Coq".to_string(),
                    section: "stdlib".to_string(),
                    url: "https://example.org/stdlib".to_string(),
                },
            ],
            generators: vec![
                CounterexampleGenerator {
                    name: "nitpick".to_string(),
                    description: "Model finder".to_string(),
                },
                CounterexampleGenerator {
                    name: "quickchick".to_string(),
                    description: "Property-based tester".to_string(),
                },
            ],
            integrations: vec![
                CounterexampleIntegration {
                    name: "quickchick".to_string(),
                    prover: "Coq".to_string(),
                },
                CounterexampleIntegration {
                    name: "nitpick".to_string(),
                    prover: "Lean".to_string(),
                },
                CounterexampleIntegration {
                    name: "nitpick".to_string(),
                    prover: "Coq".to_string(),
                },
            ],
            releases: vec![],
            subject_names: Default::default(),
        }
    }

    fn names() -> SubjectNames {
        SubjectNames::from_taxonomy(&[
            MscClass {
                short_name: "Computer science".to_string(),
                code: "68".to_string(),
                subclassifications: vec![MscSubclass {
                    name: "Software".to_string(),
                    code: "68N".to_string(),
                    classifications: vec![],
                }],
                classifications: vec![],
            },
            MscClass {
                short_name: "Mathematical logic".to_string(),
                code: "03".to_string(),
                subclassifications: vec![],
                classifications: vec![],
            },
        ])
    }

    fn commentary() -> Commentary {
        Commentary::from_pairs([("68-XX", "CS note"), ("03-XX", "Logic note")])
    }

    fn assemble(data: &Dataset) -> Report {
        assemble_report(
            data,
            &names(),
            &commentary(),
            GroupLimits::default(),
            "01 January 2026",
        )
        .unwrap()
    }

    #[test]
    fn test_header_prose_sorts_itps() {
        let report = assemble(&dataset());
        assert_eq!(report.itp_count, 3);
        assert_eq!(report.itp_names, "Coq, Lean, and Mizar");
    }

    #[test]
    fn test_counterexample_and_notation_splits() {
        let report = assemble(&dataset());
        assert_eq!(report.counterexample_itps, vec!["Coq", "Lean"]);
        assert_eq!(report.no_counterexample_itps, "Mizar");
        assert_eq!(report.math_notation_itps.len(), 2);
        assert_eq!(report.no_math_notation_itps, "Mizar");
    }

    #[test]
    fn test_generator_summaries_sorted_with_support_prose() {
        let report = assemble(&dataset());
        assert_eq!(report.counterexample_generator_count, 2);
        assert_eq!(report.counterexample_generators[0].name, "nitpick");
        assert_eq!(report.counterexample_generators[0].support, "Lean and Coq");
        assert_eq!(report.counterexample_generators[1].support, "Coq");
    }

    #[test]
    fn test_unintegrated_itps_come_from_the_integration_table() {
        // Mizar appears in no integration row, so it lands in the
        // no-generator list even though its feature column is independent.
        let report = assemble(&dataset());
        assert_eq!(report.no_generator_itps, "Mizar");
    }

    #[test]
    fn test_generator_without_integrations_has_empty_support() {
        let mut data = dataset();
        data.integrations.clear();
        let report = assemble(&data);
        assert_eq!(report.counterexample_generators[0].support, "");
        assert_eq!(report.no_generator_itps, "Coq, Lean, and Mizar");
    }

    #[test]
    fn test_library_summaries_in_registry_order() {
        let report = assemble(&dataset());
        assert_eq!(report.libraries.len(), 2);
        assert_eq!(report.libraries[0].itp, "Coq");
        assert_eq!(report.libraries[1].itp, "Lean");

        let lean = &report.libraries[1];
        assert_eq!(lean.counts.total, 3);
        assert_eq!(lean.counts.excluded, 1);
        assert!(lean.counts.incomplete);
        assert!(lean
            .incompleteness_note
            .contains("1 unclassified modules"));
    }

    #[test]
    fn test_package_count_sums() {
        let report = assemble(&dataset());
        assert_eq!(report.total_package_count, 5);
        assert_eq!(report.verified_package_count, 3);
    }

    #[test]
    fn test_subject_areas_present_and_ranked() {
        let report = assemble(&dataset());
        assert_eq!(report.subject_areas.len(), 2);
        assert_eq!(report.subject_areas[0].code, "68");
    }

    #[test]
    fn test_empty_itp_table_is_a_dataset_error() {
        let mut data = dataset();
        data.itps.clear();
        let err = assemble_report(
            &data,
            &names(),
            &commentary(),
            GroupLimits::default(),
            "01 January 2026",
        )
        .unwrap_err();
        assert!(err.to_string().contains("ITP feature table"));
    }
}
