/// Ranking engine: hard-filter the method catalogue against the answers,
/// then order the survivors by a weighted coverage score.
use tracing::debug;

use crate::catalogue::Catalogue;
use crate::model::{GuideAnswers, ImportanceRating, Method, ScoredMethod, Suggestions};
use crate::preferences::is_significant;

/// Filter and rank the full method catalogue for the given answers.
///
/// A method survives iff it supports the selected task (or no task was
/// selected) and is not reference-requiring when the user has no reference
/// data. Categories, qualities and risks never exclude a method; they only
/// move it up or down the ranking. The sort is stable, so methods with equal
/// scores keep their catalogue order.
pub fn rank(catalogue: &Catalogue, answers: &GuideAnswers) -> Suggestions {
    let desired_quality_ids: Vec<&str> = answers
        .quality_ratings
        .iter()
        .filter(|r| is_significant(r))
        .map(|r| r.id.as_str())
        .collect();
    let desired_risk_ids: Vec<&str> = answers
        .risk_ratings
        .iter()
        .filter(|r| is_significant(r))
        .map(|r| r.id.as_str())
        .collect();

    let desired_qualities = catalogue
        .qualities_by_ids(desired_quality_ids)
        .into_iter()
        .cloned()
        .collect();
    let desired_risks = catalogue
        .risks_by_ids(desired_risk_ids)
        .into_iter()
        .cloned()
        .collect();

    let no_reference = answers.no_reference();
    let mut methods: Vec<ScoredMethod> = catalogue
        .methods()
        .iter()
        .filter(|method| survives_hard_filters(method, answers.task_type.as_deref(), no_reference))
        .map(|method| ScoredMethod {
            score: method_score(method, &answers.quality_ratings, &answers.risk_ratings),
            method: method.clone(),
        })
        .collect();

    // Stable sort: catalogue order is preserved among equal scores.
    methods.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(
        candidates = catalogue.methods().len(),
        surviving = methods.len(),
        "ranked methods"
    );

    Suggestions {
        methods,
        desired_qualities,
        desired_risks,
    }
}

fn survives_hard_filters(method: &Method, task_type: Option<&str>, no_reference: bool) -> bool {
    if let Some(task) = task_type {
        if !method.supported_tasks.iter().any(|t| t == task) {
            return false;
        }
    }
    if no_reference && method.reference_requirement == crate::model::ReferenceRequirement::Required
    {
        return false;
    }
    true
}

/// Weighted-sum relevance score: for every significant rating, the method's
/// coverage weight for that quality/risk times the rating's importance.
/// Unassessed ids contribute 0. Intentionally unnormalized, so methods
/// covering more of the requirements accumulate higher scores.
fn method_score(
    method: &Method,
    quality_ratings: &[ImportanceRating],
    risk_ratings: &[ImportanceRating],
) -> u32 {
    let quality_score: u32 = quality_ratings
        .iter()
        .filter(|r| is_significant(r))
        .map(|r| {
            method
                .quality_coverage(&r.id)
                .map_or(0, |level| level.weight() * u32::from(r.importance))
        })
        .sum();

    let risk_score: u32 = risk_ratings
        .iter()
        .filter(|r| is_significant(r))
        .map(|r| {
            method
                .risk_coverage(&r.id)
                .map_or(0, |level| level.weight() * u32::from(r.importance))
        })
        .sum();

    quality_score + risk_score
}
