/// Read-only catalogue of reference data: tasks, qualities, risks,
/// categories and evaluation methods.
///
/// Built once (from five JSON collections or from in-memory parts) and then
/// shared immutably by every engine call. Lookups are O(1) via id indexes;
/// unknown ids resolve to `None` or are dropped from batch lookups, never to
/// an error.
use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::CatalogueError;
use crate::model::{Category, Method, Quality, Risk, Task};

/// File names of the five collections inside a catalogue directory.
pub const CATALOGUE_FILES: &[&str] = &[
    "tasks.json",
    "qualities.json",
    "risks.json",
    "categories.json",
    "methods.json",
];

#[derive(Debug)]
pub struct Catalogue {
    tasks: Vec<Task>,
    qualities: Vec<Quality>,
    risks: Vec<Risk>,
    categories: Vec<Category>,
    methods: Vec<Method>,
    task_index: HashMap<String, usize>,
    quality_index: HashMap<String, usize>,
    risk_index: HashMap<String, usize>,
    category_index: HashMap<String, usize>,
    method_index: HashMap<String, usize>,
}

impl Catalogue {
    /// Build a catalogue from already-deserialized collections.
    ///
    /// Validates that ids are unique within each collection and that no
    /// method lists the same quality or risk twice.
    pub fn new(
        tasks: Vec<Task>,
        qualities: Vec<Quality>,
        risks: Vec<Risk>,
        categories: Vec<Category>,
        methods: Vec<Method>,
    ) -> Result<Self, CatalogueError> {
        let task_index = build_index("task", tasks.iter().map(|t| t.id.as_str()))?;
        let quality_index = build_index("quality", qualities.iter().map(|q| q.id.as_str()))?;
        let risk_index = build_index("risk", risks.iter().map(|r| r.id.as_str()))?;
        let category_index = build_index("category", categories.iter().map(|c| c.id.as_str()))?;
        let method_index = build_index("method", methods.iter().map(|m| m.id.as_str()))?;

        for method in &methods {
            check_unique_entries(&method.id, method.assessed_qualities.iter().map(|c| c.id.as_str()))?;
            check_unique_entries(&method.id, method.identified_risks.iter().map(|c| c.id.as_str()))?;
        }

        Ok(Self {
            tasks,
            qualities,
            risks,
            categories,
            methods,
            task_index,
            quality_index,
            risk_index,
            category_index,
            method_index,
        })
    }

    /// Load the five collection files from a catalogue directory.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogueError> {
        let tasks: Vec<Task> = read_collection(&dir.join("tasks.json"))?;
        let qualities: Vec<Quality> = read_collection(&dir.join("qualities.json"))?;
        let risks: Vec<Risk> = read_collection(&dir.join("risks.json"))?;
        let categories: Vec<Category> = read_collection(&dir.join("categories.json"))?;
        let methods: Vec<Method> = read_collection(&dir.join("methods.json"))?;

        let catalogue = Self::new(tasks, qualities, risks, categories, methods)?;
        info!(
            tasks = catalogue.tasks.len(),
            qualities = catalogue.qualities.len(),
            risks = catalogue.risks.len(),
            categories = catalogue.categories.len(),
            methods = catalogue.methods.len(),
            "catalogue loaded"
        );
        Ok(catalogue)
    }

    // --- Whole collections, in catalogue order ---

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn qualities(&self) -> &[Quality] {
        &self.qualities
    }

    pub fn risks(&self) -> &[Risk] {
        &self.risks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    // --- Single-id lookups ---

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.task_index.get(id).map(|&i| &self.tasks[i])
    }

    pub fn quality(&self, id: &str) -> Option<&Quality> {
        self.quality_index.get(id).map(|&i| &self.qualities[i])
    }

    pub fn risk(&self, id: &str) -> Option<&Risk> {
        self.risk_index.get(id).map(|&i| &self.risks[i])
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.category_index.get(id).map(|&i| &self.categories[i])
    }

    pub fn method(&self, id: &str) -> Option<&Method> {
        self.method_index.get(id).map(|&i| &self.methods[i])
    }

    // --- Batch lookups: preserve input order, silently drop unknown ids ---

    pub fn qualities_by_ids<'a, I>(&self, ids: I) -> Vec<&Quality>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter().filter_map(|id| self.quality(id)).collect()
    }

    pub fn risks_by_ids<'a, I>(&self, ids: I) -> Vec<&Risk>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter().filter_map(|id| self.risk(id)).collect()
    }

    pub fn methods_by_ids<'a, I>(&self, ids: I) -> Vec<&Method>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter().filter_map(|id| self.method(id)).collect()
    }
}

fn build_index<'a, I>(kind: &'static str, ids: I) -> Result<HashMap<String, usize>, CatalogueError>
where
    I: Iterator<Item = &'a str>,
{
    let mut index = HashMap::new();
    for (position, id) in ids.enumerate() {
        if index.insert(id.to_string(), position).is_some() {
            return Err(CatalogueError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(index)
}

fn check_unique_entries<'a, I>(method_id: &str, ids: I) -> Result<(), CatalogueError>
where
    I: Iterator<Item = &'a str>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogueError::DuplicateCoverageEntry {
                method_id: method_id.to_string(),
                entry_id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogueError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogueError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CatalogueError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{CoverageLevel, MethodCoverage, ReferenceRequirement};

    pub(crate) fn item(id: &str) -> Quality {
        Quality {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: None,
        }
    }

    pub(crate) fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: None,
        }
    }

    pub(crate) fn risk(id: &str, related: &[&str]) -> Risk {
        Risk {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: None,
            related_qualities: related.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub(crate) fn method(
        id: &str,
        tasks: &[&str],
        reference_requirement: ReferenceRequirement,
        qualities: &[(&str, CoverageLevel)],
        risks: &[(&str, CoverageLevel)],
    ) -> Method {
        Method {
            id: id.to_string(),
            name: id.to_uppercase(),
            category: "metrics".to_string(),
            description_short: format!("{id} method"),
            description_long_file: None,
            link_implementation: None,
            link_name: None,
            reference_requirement,
            supported_tasks: tasks.iter().map(|s| s.to_string()).collect(),
            assessed_qualities: qualities
                .iter()
                .map(|(qid, coverage)| MethodCoverage {
                    id: qid.to_string(),
                    coverage: *coverage,
                })
                .collect(),
            identified_risks: risks
                .iter()
                .map(|(rid, coverage)| MethodCoverage {
                    id: rid.to_string(),
                    coverage: *coverage,
                })
                .collect(),
            output_values: None,
            advantages: Vec::new(),
            disadvantages: Vec::new(),
            references: Vec::new(),
        }
    }

    pub(crate) fn small_catalogue() -> Catalogue {
        Catalogue::new(
            vec![task("summarization"), task("qa")],
            vec![item("fluency"), item("coherence"), item("relevance")],
            vec![
                risk("hallucination", &["relevance", "coherence"]),
                risk("omission", &["relevance"]),
            ],
            vec![Category {
                id: "metrics".to_string(),
                name: "Metrics".to_string(),
                description: None,
            }],
            vec![
                method(
                    "m1",
                    &["summarization"],
                    ReferenceRequirement::Required,
                    &[("fluency", CoverageLevel::Good)],
                    &[],
                ),
                method(
                    "m2",
                    &["qa"],
                    ReferenceRequirement::Optional,
                    &[("fluency", CoverageLevel::VeryGood)],
                    &[("hallucination", CoverageLevel::Partial)],
                ),
            ],
        )
        .expect("valid test catalogue")
    }

    #[test]
    fn lookup_by_id() {
        let catalogue = small_catalogue();
        assert_eq!(catalogue.quality("fluency").unwrap().name, "FLUENCY");
        assert_eq!(catalogue.method("m2").unwrap().supported_tasks, vec!["qa"]);
        assert!(catalogue.quality("nonexistent").is_none());
        assert!(catalogue.method("nonexistent").is_none());
    }

    #[test]
    fn batch_lookup_preserves_order_and_drops_misses() {
        let catalogue = small_catalogue();
        let found = catalogue.qualities_by_ids(["coherence", "missing", "fluency"]);
        let ids: Vec<&str> = found.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["coherence", "fluency"]);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = Catalogue::new(
            Vec::new(),
            vec![item("fluency"), item("fluency")],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate quality id: fluency"));
    }

    #[test]
    fn duplicate_method_coverage_entries_rejected() {
        let err = Catalogue::new(
            Vec::new(),
            vec![item("fluency")],
            Vec::new(),
            Vec::new(),
            vec![method(
                "m1",
                &[],
                ReferenceRequirement::Optional,
                &[
                    ("fluency", CoverageLevel::Good),
                    ("fluency", CoverageLevel::Poor),
                ],
                &[],
            )],
        )
        .unwrap_err();
        assert!(err.to_string().contains("m1"));
        assert!(err.to_string().contains("fluency"));
    }

    /// Integration test: load the real catalogue shipped in data/catalogue
    /// and verify cross-reference integrity.
    #[test]
    fn load_real_catalogue() {
        let dir = std::path::PathBuf::from("../../data/catalogue");
        if !dir.exists() {
            eprintln!("skipping load_real_catalogue: {} not found", dir.display());
            return;
        }

        let catalogue = Catalogue::load_dir(&dir).expect("load catalogue");
        assert!(!catalogue.tasks().is_empty());
        assert!(!catalogue.qualities().is_empty());
        assert!(!catalogue.risks().is_empty());
        assert!(!catalogue.categories().is_empty());
        assert!(catalogue.methods().len() >= 10);

        // Every id referenced by a method or risk must resolve.
        for method in catalogue.methods() {
            assert!(
                catalogue.category(&method.category).is_some(),
                "method {} references unknown category {}",
                method.id,
                method.category
            );
            for task_id in &method.supported_tasks {
                assert!(
                    catalogue.task(task_id).is_some(),
                    "method {} references unknown task {}",
                    method.id,
                    task_id
                );
            }
            for entry in &method.assessed_qualities {
                assert!(
                    catalogue.quality(&entry.id).is_some(),
                    "method {} assesses unknown quality {}",
                    method.id,
                    entry.id
                );
            }
            for entry in &method.identified_risks {
                assert!(
                    catalogue.risk(&entry.id).is_some(),
                    "method {} identifies unknown risk {}",
                    method.id,
                    entry.id
                );
            }
        }
        for risk in catalogue.risks() {
            for quality_id in &risk.related_qualities {
                assert!(
                    catalogue.quality(quality_id).is_some(),
                    "risk {} relates to unknown quality {}",
                    risk.id,
                    quality_id
                );
            }
        }
    }
}
