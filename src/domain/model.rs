use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Serde helper for the dataset's "Yes"/"No" flag columns.
pub mod yes_no {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "Yes" } else { "No" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.trim().eq_ignore_ascii_case("yes"))
    }
}

/// A Mathematics Subject Classification code, an exclusion marker, or an
/// unclassified sentinel. Every module's code is in exactly one of those
/// three states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectCode(String);

fn msc_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex::Regex::new(r"^[0-9]{2}([A-Z-]([0-9]{2}|[Xx]{2})?)?$").unwrap()
    })
}

impl SubjectCode {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank or one of the "not yet classified" sentinels.
    pub fn is_unclassified(&self) -> bool {
        matches!(self.0.trim(), "" | "NA" | "None" | "??-XX")
    }

    /// Carries one of the `Exclude-*` markers.
    pub fn is_exclusion_marker(&self) -> bool {
        self.0.starts_with("Exclude")
    }

    /// Coarse-grained code ("any minor" suffix) that still needs review.
    pub fn is_unsure(&self) -> bool {
        self.0.to_lowercase().ends_with("xx")
    }

    /// A well-formed MSC code such as `68`, `68N15`, `68Nxx` or `03-XX`.
    pub fn is_concrete(&self) -> bool {
        msc_pattern().is_match(&self.0)
    }

    /// 2-digit major class prefix.
    pub fn top_class(&self) -> &str {
        self.0.get(..2).unwrap_or(&self.0)
    }

    /// 3-character major-plus-minor prefix.
    pub fn mid_class(&self) -> &str {
        self.0.get(..3).unwrap_or(&self.0)
    }
}

impl std::fmt::Display for SubjectCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One row of the classified-modules dataset. Produced by the CSV loader,
/// consumed read-only by the summarizers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedModule {
    pub itp: String,
    pub library: String,
    pub package: String,
    #[serde(rename = "msc")]
    pub subject_code: SubjectCode,
    #[serde(with = "yes_no")]
    pub verified: bool,
}

/// One row of the ITP feature table (itps.csv).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itp {
    pub name: String,
    pub counterexamples: String,
    #[serde(with = "yes_no")]
    pub utf8_library: bool,
    pub math_notation: String,
}

/// One row of the library registry (libraries.csv): which (ITP, section)
/// groupings get a package-count summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub itp: String,
    pub section: String,
    pub url: String,
}

/// Latest published release of one ITP, as polled from the GitHub API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub itp: String,
    pub release_name: String,
    pub tag: String,
    pub published_at: DateTime<Utc>,
    pub url: String,
}

/// One row of the counterexample-generator registry
/// (counterExampleGenerators.csv).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterexampleGenerator {
    pub name: String,
    pub description: String,
}

/// One row of the integration table (counterExampleIntegrations.csv): the
/// named generator is usable from the named prover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterexampleIntegration {
    pub name: String,
    pub prover: String,
}

/// Everything the extract step hands to the transform step, including the
/// flattened subject-name table, so the transform never touches I/O.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub modules: Vec<ClassifiedModule>,
    pub itps: Vec<Itp>,
    pub libraries: Vec<LibraryEntry>,
    pub generators: Vec<CounterexampleGenerator>,
    pub integrations: Vec<CounterexampleIntegration>,
    pub releases: Vec<Release>,
    pub subject_names: crate::domain::taxonomy::SubjectNames,
}

/// How many groups each level of the subject-area aggregation keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupLimits {
    pub top_areas: usize,
    pub mid_breakdowns: usize,
    pub fine_breakdowns: usize,
    pub top_itps: usize,
}

impl Default for GroupLimits {
    fn default() -> Self {
        Self {
            top_areas: 10,
            mid_breakdowns: 3,
            fine_breakdowns: 2,
            top_itps: 3,
        }
    }
}

/// Bucket sizes for one (ITP, library) pair. Recomputed on every build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageCountSummary {
    pub total: usize,
    pub unclassified: usize,
    pub verified: usize,
    pub unverified: usize,
    pub excluded: usize,
    pub excluded_doc: usize,
    pub excluded_util: usize,
    pub excluded_no_doc: usize,
    pub excluded_deprecated: usize,
    pub sure: usize,
    pub unsure: usize,
    pub incomplete: bool,
    pub needs_review: bool,
}

/// A package-count summary plus its two narrative strings, ready for the
/// templating layer.
#[derive(Debug, Clone, Serialize)]
pub struct LibrarySummary {
    pub itp: String,
    pub library: String,
    #[serde(flatten)]
    pub counts: PackageCountSummary,
    pub incompleteness_note: String,
    pub exclusion_note: String,
}

/// One ranked group out of the top-K grouper, resolved against the
/// subject-name table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectBreakdown {
    pub code: String,
    pub name: String,
    pub count: usize,
}

/// One top-ranked 2-digit subject area with its sub-breakdowns rendered to
/// prose. Discarded after rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectAreaSummary {
    pub code: String,
    pub name: String,
    pub total: usize,
    pub mid_breakdown: String,
    pub fine_breakdown: String,
    pub top_itps: String,
    pub commentary: String,
}

/// One counterexample generator with its integration support rendered to
/// prose ("Coq and Isabelle").
#[derive(Debug, Clone, Serialize)]
pub struct GeneratorSummary {
    pub name: String,
    pub description: String,
    pub support: String,
}

/// ITPs whose libraries render mathematics notation, with the authored
/// description of how.
#[derive(Debug, Clone, Serialize)]
pub struct MathNotationItp {
    pub name: String,
    pub description: String,
}

/// The full assembled report: header prose, per-library summaries and the
/// ranked subject areas, handed to the external templating step.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub date: String,
    pub itp_count: usize,
    pub itp_names: String,
    pub counterexample_itps: Vec<String>,
    pub no_counterexample_itps: String,
    pub math_notation_itps: Vec<MathNotationItp>,
    pub no_math_notation_itps: String,
    pub counterexample_generator_count: usize,
    pub counterexample_generators: Vec<GeneratorSummary>,
    pub no_generator_itps: String,
    pub library_count: usize,
    pub total_package_count: usize,
    pub verified_package_count: usize,
    pub libraries: Vec<LibrarySummary>,
    pub subject_areas: Vec<SubjectAreaSummary>,
    pub releases: Vec<Release>,
}
