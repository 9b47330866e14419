use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordinal rating of how well a method addresses a quality or risk.
///
/// Declaration order gives the ordering used everywhere:
/// `Poor < Partial < Good < VeryGood`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CoverageLevel {
    Poor,
    Partial,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
}

impl CoverageLevel {
    /// Integer weight used for score contributions and best-of comparisons.
    /// Only the ordering of these values carries meaning.
    pub fn weight(self) -> u32 {
        match self {
            CoverageLevel::Poor => 1,
            CoverageLevel::Partial => 2,
            CoverageLevel::Good => 3,
            CoverageLevel::VeryGood => 4,
        }
    }

    /// True for levels that count as covered-but-weak rather than fully covered.
    pub fn is_partial(self) -> bool {
        matches!(self, CoverageLevel::Poor | CoverageLevel::Partial)
    }
}

/// Whether a method needs reference data (gold outputs) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceRequirement {
    #[serde(rename = "required")]
    Required,
    #[serde(rename = "optional")]
    Optional,
    #[serde(rename = "not applicable")]
    NotApplicable,
}

/// A use-case task type (e.g. "summarization", "qa").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier, e.g. "summarization"
    pub id: String,
    /// Display name, e.g. "Summarization"
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An output quality the user may care about (e.g. "fluency").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A deployment risk the user may care about (e.g. "hallucination").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Qualities whose improvement typically also mitigates this risk.
    /// Drives the risk-implied quality suggestions.
    #[serde(default)]
    pub related_qualities: Vec<String>,
}

/// A method category (e.g. "N-gram overlap metrics").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One quality or risk addressed by a method, with how well it is addressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCoverage {
    /// Quality or risk identifier
    pub id: String,
    pub coverage: CoverageLevel,
}

/// A literature or implementation reference attached to a method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bib_record: Option<String>,
}

/// An evaluation method from the catalogue (e.g. "ROUGE", "G-Eval").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// Stable identifier, e.g. "rouge", "g_eval"
    pub id: String,
    /// Display name, e.g. "ROUGE"
    pub name: String,
    /// Category identifier, e.g. "ngram_overlap"
    pub category: String,
    /// One-paragraph summary shown in listings
    pub description_short: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_long_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_implementation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_name: Option<String>,
    pub reference_requirement: ReferenceRequirement,
    /// Task ids this method is applicable to
    pub supported_tasks: Vec<String>,
    /// Qualities this method assesses; at most one entry per quality id
    #[serde(default)]
    pub assessed_qualities: Vec<MethodCoverage>,
    /// Risks this method helps identify; at most one entry per risk id
    #[serde(default)]
    pub identified_risks: Vec<MethodCoverage>,
    /// What the method outputs, e.g. "F1 score in [0, 1]"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_values: Option<String>,
    #[serde(default)]
    pub advantages: Vec<String>,
    #[serde(default)]
    pub disadvantages: Vec<String>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl Method {
    /// Coverage level at which this method assesses the given quality, if any.
    pub fn quality_coverage(&self, quality_id: &str) -> Option<CoverageLevel> {
        self.assessed_qualities
            .iter()
            .find(|c| c.id == quality_id)
            .map(|c| c.coverage)
    }

    /// Coverage level at which this method identifies the given risk, if any.
    pub fn risk_coverage(&self, risk_id: &str) -> Option<CoverageLevel> {
        self.identified_risks
            .iter()
            .find(|c| c.id == risk_id)
            .map(|c| c.coverage)
    }
}

/// A user's importance weighting for one quality or risk.
///
/// Importance 1 means "not selected" and is the implicit default for any id
/// absent from a rating list; 2-5 mean selected with increasing weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportanceRating {
    pub id: String,
    pub importance: u8,
}

/// Answer to the reference-data availability question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceAnswer {
    Yes,
    No,
}

/// The questionnaire answers driving ranking.
///
/// Field names on the wire match the original question ids, so an answers
/// snapshot persisted by an earlier session deserializes and re-ranks
/// identically. Missing keys default to `None`/empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideAnswers {
    /// Selected task id, if the task question was answered.
    #[serde(rename = "q_task_type", default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    /// Whether reference data is available for the use case.
    #[serde(rename = "q_references", default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ReferenceAnswer>,
    #[serde(rename = "q_risks", default)]
    pub risk_ratings: Vec<ImportanceRating>,
    #[serde(rename = "q_qualities", default)]
    pub quality_ratings: Vec<ImportanceRating>,
}

impl GuideAnswers {
    /// True when the user stated that no reference data is available.
    /// An unanswered question does not exclude reference-requiring methods.
    pub fn no_reference(&self) -> bool {
        self.references == Some(ReferenceAnswer::No)
    }
}

/// A catalogue method annotated with its relevance score for one ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMethod {
    #[serde(flatten)]
    pub method: Method,
    /// Weighted-sum relevance score; used for ordering only, never for
    /// inclusion or exclusion.
    pub score: u32,
}

/// Output of the ranking engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    /// Surviving methods, best score first; catalogue order among ties.
    pub methods: Vec<ScoredMethod>,
    /// Qualities the user rated significant, in rating order.
    pub desired_qualities: Vec<Quality>,
    /// Risks the user rated significant, in rating order.
    pub desired_risks: Vec<Risk>,
}

/// A quality suggested for attention because related risks were rated
/// significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpliedQuality {
    pub id: String,
    /// Risks that implied this quality, deduplicated, in encounter order.
    pub source_risks: Vec<String>,
    /// Highest importance among the implying risks.
    pub max_importance: u8,
}

/// Qualities and risks grouped for a coverage partition bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementSet {
    pub qualities: Vec<Quality>,
    pub risks: Vec<Risk>,
}

impl RequirementSet {
    pub fn is_empty(&self) -> bool {
        self.qualities.is_empty() && self.risks.is_empty()
    }
}

/// Output of the coverage analyzer.
///
/// Every significant requirement lands in exactly one bucket: absent from
/// `coverage` and listed in `uncovered`, or present at `Poor`/`Partial` and
/// listed in `partially_covered`, or present at `Good`/`VeryGood` and listed
/// in neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Best achieved coverage level per requirement id, across all selected
    /// methods that address it.
    pub coverage: BTreeMap<String, CoverageLevel>,
    pub uncovered: RequirementSet,
    pub partially_covered: RequirementSet,
}
