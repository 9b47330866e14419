/// Coverage analysis: given the methods a user picked, how well is each
/// significant quality and risk actually addressed?
use std::collections::BTreeMap;

use crate::catalogue::Catalogue;
use crate::model::{
    CoverageLevel, CoverageReport, ImportanceRating, Method, Quality, RequirementSet, Risk,
};
use crate::preferences::is_significant;

/// Compute the coverage report for a selected subset of methods.
///
/// The significance threshold is re-applied to the desired lists against the
/// ratings, so callers may pass the full desired lists from an earlier
/// ranking run. Coverage per requirement is best-of across the selected
/// methods: multiple methods addressing the same quality do not stack, the
/// best single rating stands. Unknown selected method ids are dropped.
pub fn analyze(
    catalogue: &Catalogue,
    selected_method_ids: &[String],
    desired_qualities: &[Quality],
    desired_risks: &[Risk],
    quality_ratings: &[ImportanceRating],
    risk_ratings: &[ImportanceRating],
) -> CoverageReport {
    let selected = catalogue.methods_by_ids(selected_method_ids.iter().map(String::as_str));

    let significant_qualities: Vec<&Quality> = desired_qualities
        .iter()
        .filter(|q| has_significant_rating(&q.id, quality_ratings))
        .collect();
    let significant_risks: Vec<&Risk> = desired_risks
        .iter()
        .filter(|r| has_significant_rating(&r.id, risk_ratings))
        .collect();

    let mut coverage: BTreeMap<String, CoverageLevel> = BTreeMap::new();
    let mut uncovered = RequirementSet::default();
    let mut partially_covered = RequirementSet::default();

    for quality in significant_qualities {
        match best_coverage(&selected, |method| method.quality_coverage(&quality.id)) {
            Some(level) => {
                coverage.insert(quality.id.clone(), level);
                if level.is_partial() {
                    partially_covered.qualities.push(quality.clone());
                }
            }
            None => uncovered.qualities.push(quality.clone()),
        }
    }

    for risk in significant_risks {
        match best_coverage(&selected, |method| method.risk_coverage(&risk.id)) {
            Some(level) => {
                coverage.insert(risk.id.clone(), level);
                if level.is_partial() {
                    partially_covered.risks.push(risk.clone());
                }
            }
            None => uncovered.risks.push(risk.clone()),
        }
    }

    CoverageReport {
        coverage,
        uncovered,
        partially_covered,
    }
}

fn has_significant_rating(id: &str, ratings: &[ImportanceRating]) -> bool {
    ratings.iter().any(|r| r.id == id && is_significant(r))
}

/// Best coverage level any selected method achieves for one requirement.
fn best_coverage<F>(selected: &[&Method], coverage_of: F) -> Option<CoverageLevel>
where
    F: Fn(&Method) -> Option<CoverageLevel>,
{
    selected.iter().filter_map(|method| coverage_of(method)).max()
}
