use crate::utils::error::{ReportError, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Top-level MSC class as authored in the taxonomy JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct MscClass {
    pub short_name: String,
    pub code: String,
    #[serde(default)]
    pub subclassifications: Vec<MscSubclass>,
    #[serde(default)]
    pub classifications: Vec<MscLeaf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MscSubclass {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub classifications: Vec<MscLeaf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MscLeaf {
    pub name: String,
    pub code: String,
}

/// Flat code → human-readable-name table covering all three granularities
/// (2-digit class, 3-char subclass, full code). Lookups are
/// case-insensitive; codes like `68Nxx` and `68NXX` name the same entry.
#[derive(Debug, Clone, Default)]
pub struct SubjectNames {
    names: HashMap<String, String>,
}

impl SubjectNames {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let classes: Vec<MscClass> = serde_json::from_slice(bytes)?;
        Ok(Self::from_taxonomy(&classes))
    }

    /// Builds the flat table by folding over the nested taxonomy. Returns a
    /// fresh mapping; the taxonomy itself is never mutated.
    pub fn from_taxonomy(classes: &[MscClass]) -> Self {
        let names = classes.iter().fold(HashMap::new(), |acc, class| {
            let acc = Self::insert(acc, &class.code, &class.short_name);
            let acc = class.classifications.iter().fold(acc, |acc, leaf| {
                Self::insert(acc, &leaf.code, &leaf.name)
            });
            class.subclassifications.iter().fold(acc, |acc, sub| {
                let acc = Self::insert(acc, &sub.code, &sub.name);
                sub.classifications
                    .iter()
                    .fold(acc, |acc, leaf| Self::insert(acc, &leaf.code, &leaf.name))
            })
        });
        Self { names }
    }

    fn insert(
        mut acc: HashMap<String, String>,
        code: &str,
        name: &str,
    ) -> HashMap<String, String> {
        acc.insert(code.to_lowercase(), name.to_string());
        acc
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(&code.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Hand-authored commentary on each subject area the data is known to
/// surface, keyed by `"{2-digit}-XX"`. Whenever the dataset pushes a new
/// area into the top ranks, an entry has to be written here before the
/// build will pass.
pub const AREA_COMMENTARY: &[(&str, &str)] = &[
    (
        "03-XX",
        "Logic and foundations dominate most proof libraries, since ITPs \
         bootstrap their own metatheory before anything else.",
    ),
    (
        "05-XX",
        "Combinatorics formalizations are mostly graph theory, driven by \
         verified algorithm work.",
    ),
    (
        "06-XX",
        "Order and lattice theory appears early in every library as the \
         substrate for fixpoint and domain constructions.",
    ),
    (
        "11-XX",
        "Number theory is a popular target for flagship formalization \
         efforts and competition-style developments.",
    ),
    (
        "13-XX",
        "Commutative algebra entries largely support the algebraic \
         geometry developments layered above them.",
    ),
    (
        "15-XX",
        "Linear algebra modules back both pure-mathematics developments \
         and verified numerical methods.",
    ),
    (
        "18-XX",
        "Category theory shows up disproportionately in dependently-typed \
         provers, where it doubles as a programming abstraction.",
    ),
    (
        "20-XX",
        "Group theory includes some of the largest single formalization \
         projects on record.",
    ),
    (
        "26-XX",
        "Real analysis is a prerequisite for most applied verification \
         work, so every mature library carries a version of it.",
    ),
    (
        "54-XX",
        "General topology tends to be formalized once, early, and then \
         reused across analysis developments.",
    ),
    (
        "68-XX",
        "Computer science is the single largest area, reflecting ITPs' \
         historical strength in program and hardware verification.",
    ),
];

/// The commentary table with its build-time coverage check.
#[derive(Debug, Clone)]
pub struct Commentary {
    entries: HashMap<String, String>,
}

impl Commentary {
    pub fn builtin() -> Self {
        Self::from_pairs(AREA_COMMENTARY.iter().copied())
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(code, text)| (code.to_string(), text.to_string()))
            .collect();
        Self { entries }
    }

    /// Looks up commentary by 2-digit major class.
    pub fn get(&self, top_class: &str) -> Option<&str> {
        self.entries
            .get(&format!("{}-XX", top_class))
            .map(String::as_str)
    }

    /// Verifies every top-ranked class has authored commentary before any
    /// summary is assembled. A gap is a data-authoring defect and aborts
    /// the build.
    pub fn ensure_covers<'a>(&self, top_classes: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let missing: Vec<String> = top_classes
            .into_iter()
            .filter(|class| self.get(class).is_none())
            .map(|class| format!("{}-XX", class))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ReportError::MissingCommentary {
                codes: missing.join(", "),
            })
        }
    }
}
