/// MCP server implementation for the evaluation-method guide.
///
/// Exposes six tools:
/// - `suggest_methods`: Rank catalogue methods against questionnaire answers
/// - `analyze_coverage`: Report how well chosen methods cover the requirements
/// - `suggest_qualities`: Qualities implied by the risks the user selected
/// - `get_method`: Full detail for one method by id
/// - `list_methods`: Browse methods, optionally by category
/// - `reload_catalogue`: Re-read the catalogue files if their content changed
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tokio::sync::RwLock;
use tracing::info;

use guide_engine::catalogue::Catalogue;
use guide_engine::model::{GuideAnswers, Quality, RequirementSet, Risk};
use guide_engine::{coverage, preferences, rank};

use crate::api::{
    AnalyzeCoverageParams, AnalyzeCoverageResponse, CoverageEntry, GetMethodParams, ItemSummary,
    ListMethodsParams, ListMethodsResponse, MethodDetailResponse, MethodSuggestion, MethodSummary,
    QualitySuggestion, ReferenceInfo, ReloadCatalogueResponse, RequirementSetResponse,
    SuggestMethodsParams, SuggestMethodsResponse, SuggestQualitiesParams,
    SuggestQualitiesResponse, coverage_name, reference_requirement_name, to_ratings,
    to_reference_answer,
};
use crate::loader::CatalogueLoader;

/// Shared application state, protected by RwLock for safe concurrent reads
/// and exclusive writes during catalogue reload.
pub struct GuideState {
    pub catalogue: Catalogue,
    pub fingerprint: String,
}

#[derive(Clone)]
pub struct GuideServer {
    state: Arc<RwLock<GuideState>>,
    loader: Arc<CatalogueLoader>,
    tool_router: ToolRouter<GuideServer>,
}

impl GuideServer {
    pub fn new(catalogue: Catalogue, fingerprint: String, loader: CatalogueLoader) -> Self {
        Self {
            state: Arc::new(RwLock::new(GuideState {
                catalogue,
                fingerprint,
            })),
            loader: Arc::new(loader),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl GuideServer {
    #[tool(
        description = "Rank the evaluation-method catalogue against questionnaire answers: task type, reference-data availability, and importance-weighted quality/risk selections. Returns surviving methods best-first with relevance scores."
    )]
    async fn suggest_methods(
        &self,
        Parameters(params): Parameters<SuggestMethodsParams>,
    ) -> Result<Json<SuggestMethodsResponse>, String> {
        let state = self.state.read().await;

        if let Some(task) = params.task_type.as_deref() {
            if state.catalogue.task(task).is_none() {
                let available: Vec<&str> =
                    state.catalogue.tasks().iter().map(|t| t.id.as_str()).collect();
                return Err(format!(
                    "unknown task: '{task}'. Available tasks: {}",
                    available.join(", ")
                ));
            }
        }

        let answers = GuideAnswers {
            task_type: params.task_type,
            references: to_reference_answer(params.references_available),
            quality_ratings: to_ratings(params.quality_ratings),
            risk_ratings: to_ratings(params.risk_ratings),
        };

        let suggestions = rank::rank(&state.catalogue, &answers);
        info!(
            methods = suggestions.methods.len(),
            "suggest_methods ranked catalogue"
        );

        Ok(Json(SuggestMethodsResponse {
            methods: suggestions
                .methods
                .into_iter()
                .map(|scored| MethodSuggestion {
                    id: scored.method.id,
                    name: scored.method.name,
                    category: scored.method.category,
                    score: scored.score,
                    summary: scored.method.description_short,
                })
                .collect(),
            desired_qualities: quality_summaries(&suggestions.desired_qualities),
            desired_risks: risk_summaries(&suggestions.desired_risks),
        }))
    }

    #[tool(
        description = "Report how well the selected methods cover the significant qualities and risks: best achieved coverage level per requirement, plus which requirements are uncovered or only partially covered."
    )]
    async fn analyze_coverage(
        &self,
        Parameters(params): Parameters<AnalyzeCoverageParams>,
    ) -> Result<Json<AnalyzeCoverageResponse>, String> {
        let state = self.state.read().await;

        let quality_ratings = to_ratings(params.quality_ratings);
        let risk_ratings = to_ratings(params.risk_ratings);

        let desired_qualities: Vec<Quality> = state
            .catalogue
            .qualities_by_ids(
                preferences::significant(&quality_ratings)
                    .iter()
                    .map(|r| r.id.as_str()),
            )
            .into_iter()
            .cloned()
            .collect();
        let desired_risks: Vec<Risk> = state
            .catalogue
            .risks_by_ids(
                preferences::significant(&risk_ratings)
                    .iter()
                    .map(|r| r.id.as_str()),
            )
            .into_iter()
            .cloned()
            .collect();

        let report = coverage::analyze(
            &state.catalogue,
            &params.selected_method_ids,
            &desired_qualities,
            &desired_risks,
            &quality_ratings,
            &risk_ratings,
        );

        Ok(Json(AnalyzeCoverageResponse {
            coverage: report
                .coverage
                .into_iter()
                .map(|(id, level)| (id, coverage_name(level).to_string()))
                .collect(),
            uncovered: requirement_set_response(&report.uncovered),
            partially_covered: requirement_set_response(&report.partially_covered),
        }))
    }

    #[tool(
        description = "Suggest qualities worth rating because related risks were rated significant. Returns each implied quality with the risks that implied it and a suggested importance to pre-populate the qualities question."
    )]
    async fn suggest_qualities(
        &self,
        Parameters(params): Parameters<SuggestQualitiesParams>,
    ) -> Result<Json<SuggestQualitiesResponse>, String> {
        let state = self.state.read().await;
        let risk_ratings = to_ratings(params.risk_ratings);
        let implied = preferences::implied_qualities(&state.catalogue, &risk_ratings);

        let suggestions = implied
            .into_iter()
            .filter_map(|implied| {
                // An implied quality missing from the catalogue is an omission,
                // not an error.
                let quality = state.catalogue.quality(&implied.id)?;
                let source_risks = implied
                    .source_risks
                    .iter()
                    .filter_map(|risk_id| state.catalogue.risk(risk_id))
                    .map(|risk| ItemSummary {
                        id: risk.id.clone(),
                        name: risk.name.clone(),
                    })
                    .collect();
                Some(QualitySuggestion {
                    id: quality.id.clone(),
                    name: quality.name.clone(),
                    suggested_importance: implied.max_importance,
                    source_risks,
                })
            })
            .collect();

        Ok(Json(SuggestQualitiesResponse { suggestions }))
    }

    #[tool(description = "Get the full catalogue entry for one evaluation method by id (e.g. 'rouge', 'g_eval').")]
    async fn get_method(
        &self,
        Parameters(params): Parameters<GetMethodParams>,
    ) -> Result<Json<MethodDetailResponse>, String> {
        let method_id = params.method_id.trim().to_string();
        if method_id.is_empty() {
            return Err("method_id must not be empty".to_string());
        }

        let state = self.state.read().await;
        let method = state
            .catalogue
            .methods()
            .iter()
            .find(|m| m.id.eq_ignore_ascii_case(&method_id))
            .ok_or_else(|| format!("method not found: {method_id}"))?;

        let category = state
            .catalogue
            .category(&method.category)
            .map(|c| ItemSummary {
                id: c.id.clone(),
                name: c.name.clone(),
            })
            .unwrap_or_else(|| ItemSummary {
                id: method.category.clone(),
                name: method.category.clone(),
            });

        let supported_tasks = method
            .supported_tasks
            .iter()
            .map(|task_id| {
                state
                    .catalogue
                    .task(task_id)
                    .map(|t| ItemSummary {
                        id: t.id.clone(),
                        name: t.name.clone(),
                    })
                    .unwrap_or_else(|| ItemSummary {
                        id: task_id.clone(),
                        name: task_id.clone(),
                    })
            })
            .collect();

        let assessed_qualities = method
            .assessed_qualities
            .iter()
            .map(|entry| CoverageEntry {
                id: entry.id.clone(),
                name: state
                    .catalogue
                    .quality(&entry.id)
                    .map_or_else(|| entry.id.clone(), |q| q.name.clone()),
                coverage: coverage_name(entry.coverage).to_string(),
            })
            .collect();

        let identified_risks = method
            .identified_risks
            .iter()
            .map(|entry| CoverageEntry {
                id: entry.id.clone(),
                name: state
                    .catalogue
                    .risk(&entry.id)
                    .map_or_else(|| entry.id.clone(), |r| r.name.clone()),
                coverage: coverage_name(entry.coverage).to_string(),
            })
            .collect();

        Ok(Json(MethodDetailResponse {
            id: method.id.clone(),
            name: method.name.clone(),
            category,
            description_short: method.description_short.clone(),
            reference_requirement: reference_requirement_name(method.reference_requirement)
                .to_string(),
            supported_tasks,
            assessed_qualities,
            identified_risks,
            output_values: method.output_values.clone(),
            advantages: method.advantages.clone(),
            disadvantages: method.disadvantages.clone(),
            references: method
                .references
                .iter()
                .map(|r| ReferenceInfo {
                    name: r.name.clone(),
                    url: r.url.clone(),
                })
                .collect(),
            link_implementation: method.link_implementation.clone(),
            link_name: method.link_name.clone(),
        }))
    }

    #[tool(description = "List catalogue methods, optionally filtered by category id (e.g. 'llm_judge', 'ngram_overlap').")]
    async fn list_methods(
        &self,
        Parameters(params): Parameters<ListMethodsParams>,
    ) -> Result<Json<ListMethodsResponse>, String> {
        let state = self.state.read().await;

        let category_filter = match params.category.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(category) => {
                let category = state
                    .catalogue
                    .category(category)
                    .ok_or_else(|| {
                        let available: Vec<&str> = state
                            .catalogue
                            .categories()
                            .iter()
                            .map(|c| c.id.as_str())
                            .collect();
                        format!(
                            "unknown category: '{category}'. Available categories: {}",
                            available.join(", ")
                        )
                    })?;
                Some(category.id.clone())
            }
        };

        let mut methods: Vec<MethodSummary> = state
            .catalogue
            .methods()
            .iter()
            .filter(|m| {
                category_filter
                    .as_deref()
                    .map_or(true, |category| m.category == category)
            })
            .map(|m| MethodSummary {
                id: m.id.clone(),
                name: m.name.clone(),
                category: m.category.clone(),
            })
            .collect();
        methods.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(Json(ListMethodsResponse { methods }))
    }

    #[tool(description = "Re-read the catalogue files from disk if their content changed since the last load.")]
    async fn reload_catalogue(&self) -> Result<Json<ReloadCatalogueResponse>, String> {
        let current_fingerprint = self
            .loader
            .fingerprint()
            .map_err(|e| format!("fingerprint failed: {e}"))?;

        {
            let state = self.state.read().await;
            if state.fingerprint == current_fingerprint {
                return Ok(Json(ReloadCatalogueResponse {
                    reloaded: false,
                    fingerprint: current_fingerprint,
                    method_count: state.catalogue.methods().len(),
                }));
            }
        }

        let (catalogue, fingerprint) = self
            .loader
            .load()
            .map_err(|e| format!("reload failed: {e}"))?;
        let method_count = catalogue.methods().len();

        let mut state = self.state.write().await;
        state.catalogue = catalogue;
        state.fingerprint = fingerprint.clone();
        info!(method_count, "catalogue reloaded");

        Ok(Json(ReloadCatalogueResponse {
            reloaded: true,
            fingerprint,
            method_count,
        }))
    }
}

fn quality_summaries(qualities: &[Quality]) -> Vec<ItemSummary> {
    qualities
        .iter()
        .map(|q| ItemSummary {
            id: q.id.clone(),
            name: q.name.clone(),
        })
        .collect()
}

fn risk_summaries(risks: &[Risk]) -> Vec<ItemSummary> {
    risks
        .iter()
        .map(|r| ItemSummary {
            id: r.id.clone(),
            name: r.name.clone(),
        })
        .collect()
}

fn requirement_set_response(set: &RequirementSet) -> RequirementSetResponse {
    RequirementSetResponse {
        qualities: quality_summaries(&set.qualities),
        risks: risk_summaries(&set.risks),
    }
}

#[tool_handler]
impl ServerHandler for GuideServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "guide-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "LLM evaluation-method guide. Use suggest_methods with task type, \
                 reference availability and importance-weighted quality/risk ratings \
                 to get a ranked method list; suggest_qualities to expand selected \
                 risks into related qualities; analyze_coverage to check how well a \
                 chosen method subset covers the requirements; get_method and \
                 list_methods to browse the catalogue; reload_catalogue after \
                 editing the data files."
                    .to_string(),
            ),
        }
    }
}
