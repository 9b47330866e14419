/// Tool parameter and response types for the guide MCP server.
///
/// Kept separate from the engine model: parameters carry JSON schemas for
/// tool discovery, responses are flattened summaries sized for tool output.
use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use guide_engine::model::{CoverageLevel, ImportanceRating, ReferenceAnswer, ReferenceRequirement};

// --- Parameters ---

/// Importance weighting for one quality or risk.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RatingParam {
    /// Quality or risk identifier from the catalogue.
    pub id: String,
    /// Importance on a 1-5 scale; 1 means "not important" and is ignored.
    pub importance: u8,
}

impl From<RatingParam> for ImportanceRating {
    fn from(param: RatingParam) -> Self {
        ImportanceRating {
            id: param.id,
            importance: param.importance,
        }
    }
}

pub fn to_ratings(params: Vec<RatingParam>) -> Vec<ImportanceRating> {
    params.into_iter().map(ImportanceRating::from).collect()
}

/// Maps the optional reference-availability flag onto the questionnaire
/// answer: absent means the question was not answered.
pub fn to_reference_answer(references_available: Option<bool>) -> Option<ReferenceAnswer> {
    references_available.map(|available| {
        if available {
            ReferenceAnswer::Yes
        } else {
            ReferenceAnswer::No
        }
    })
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SuggestMethodsParams {
    /// Task type id for the use case (e.g. "summarization"). Omit to keep
    /// all methods regardless of task.
    pub task_type: Option<String>,
    /// Whether reference data (gold outputs) is available. When false,
    /// methods that require references are excluded.
    pub references_available: Option<bool>,
    /// Importance ratings for qualities the user cares about.
    #[serde(default)]
    pub quality_ratings: Vec<RatingParam>,
    /// Importance ratings for risks the user cares about.
    #[serde(default)]
    pub risk_ratings: Vec<RatingParam>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeCoverageParams {
    /// Ids of the methods the user has chosen.
    #[serde(default)]
    pub selected_method_ids: Vec<String>,
    /// Importance ratings for qualities the user cares about.
    #[serde(default)]
    pub quality_ratings: Vec<RatingParam>,
    /// Importance ratings for risks the user cares about.
    #[serde(default)]
    pub risk_ratings: Vec<RatingParam>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SuggestQualitiesParams {
    /// Importance ratings for risks the user cares about.
    #[serde(default)]
    pub risk_ratings: Vec<RatingParam>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetMethodParams {
    /// Method id such as "rouge" or "g_eval".
    pub method_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListMethodsParams {
    /// Optional category id to filter by (e.g. "llm_judge").
    pub category: Option<String>,
}

// --- Responses ---

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ItemSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MethodSuggestion {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Weighted relevance score; higher is more relevant. Ties keep
    /// catalogue order.
    pub score: u32,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SuggestMethodsResponse {
    /// Surviving methods, best score first.
    pub methods: Vec<MethodSuggestion>,
    pub desired_qualities: Vec<ItemSummary>,
    pub desired_risks: Vec<ItemSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RequirementSetResponse {
    pub qualities: Vec<ItemSummary>,
    pub risks: Vec<ItemSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeCoverageResponse {
    /// Best achieved coverage level per requirement id.
    pub coverage: BTreeMap<String, String>,
    /// Requirements no selected method addresses at all.
    pub uncovered: RequirementSetResponse,
    /// Requirements addressed only at "Poor" or "Partial".
    pub partially_covered: RequirementSetResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QualitySuggestion {
    pub id: String,
    pub name: String,
    /// Importance to pre-populate the qualities question with; the maximum
    /// importance among the implying risks.
    pub suggested_importance: u8,
    /// Risks that implied this quality ("recommended because of ...").
    pub source_risks: Vec<ItemSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SuggestQualitiesResponse {
    pub suggestions: Vec<QualitySuggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CoverageEntry {
    pub id: String,
    pub name: String,
    pub coverage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceInfo {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MethodDetailResponse {
    pub id: String,
    pub name: String,
    pub category: ItemSummary,
    pub description_short: String,
    pub reference_requirement: String,
    pub supported_tasks: Vec<ItemSummary>,
    pub assessed_qualities: Vec<CoverageEntry>,
    pub identified_risks: Vec<CoverageEntry>,
    pub output_values: Option<String>,
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
    pub references: Vec<ReferenceInfo>,
    pub link_implementation: Option<String>,
    pub link_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MethodSummary {
    pub id: String,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListMethodsResponse {
    pub methods: Vec<MethodSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReloadCatalogueResponse {
    /// Whether the catalogue content changed and was swapped in.
    pub reloaded: bool,
    /// Hex sha256 fingerprint of the catalogue files.
    pub fingerprint: String,
    pub method_count: usize,
}

/// Wire name of a coverage level ("Poor" ... "Very Good").
pub fn coverage_name(level: CoverageLevel) -> &'static str {
    match level {
        CoverageLevel::Poor => "Poor",
        CoverageLevel::Partial => "Partial",
        CoverageLevel::Good => "Good",
        CoverageLevel::VeryGood => "Very Good",
    }
}

/// Wire name of a reference requirement ("required" / "optional" /
/// "not applicable").
pub fn reference_requirement_name(requirement: ReferenceRequirement) -> &'static str {
    match requirement {
        ReferenceRequirement::Required => "required",
        ReferenceRequirement::Optional => "optional",
        ReferenceRequirement::NotApplicable => "not applicable",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_params_convert() {
        let ratings = to_ratings(vec![
            RatingParam {
                id: "fluency".to_string(),
                importance: 3,
            },
            RatingParam {
                id: "hallucination".to_string(),
                importance: 1,
            },
        ]);
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].id, "fluency");
        assert_eq!(ratings[1].importance, 1);
    }

    #[test]
    fn reference_flag_maps_onto_answer() {
        assert_eq!(to_reference_answer(None), None);
        assert_eq!(to_reference_answer(Some(true)), Some(ReferenceAnswer::Yes));
        assert_eq!(to_reference_answer(Some(false)), Some(ReferenceAnswer::No));
    }

    #[test]
    fn coverage_response_round_trips_through_json() {
        let response = AnalyzeCoverageResponse {
            coverage: BTreeMap::from([
                ("fluency".to_string(), "Good".to_string()),
                ("hallucination".to_string(), "Partial".to_string()),
            ]),
            uncovered: RequirementSetResponse::default(),
            partially_covered: RequirementSetResponse {
                qualities: vec![ItemSummary {
                    id: "coherence".to_string(),
                    name: "Coherence".to_string(),
                }],
                risks: Vec::new(),
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        let back: AnalyzeCoverageResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.coverage["fluency"], "Good");
        assert_eq!(back.coverage["hallucination"], "Partial");
        assert!(back.uncovered.qualities.is_empty());
        assert_eq!(back.partially_covered.qualities[0].id, "coherence");
    }

    #[test]
    fn method_suggestions_round_trip_through_json() {
        let response = SuggestMethodsResponse {
            methods: vec![MethodSuggestion {
                id: "rouge".to_string(),
                name: "ROUGE".to_string(),
                category: "ngram_overlap".to_string(),
                score: 9,
                summary: "n-gram overlap".to_string(),
            }],
            desired_qualities: vec![ItemSummary {
                id: "fluency".to_string(),
                name: "Fluency".to_string(),
            }],
            desired_risks: Vec::new(),
        };

        let json = serde_json::to_string(&response).unwrap();
        let back: SuggestMethodsResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.methods[0].id, "rouge");
        assert_eq!(back.methods[0].score, 9);
        assert_eq!(back.desired_qualities[0].name, "Fluency");
        assert!(back.desired_risks.is_empty());
    }

    #[test]
    fn names_match_catalogue_wire_format() {
        assert_eq!(coverage_name(CoverageLevel::VeryGood), "Very Good");
        assert_eq!(
            reference_requirement_name(ReferenceRequirement::NotApplicable),
            "not applicable"
        );
    }
}
