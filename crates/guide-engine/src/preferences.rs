/// Preference resolution: which ratings actually matter, and which qualities
/// are implied by the risks the user selected.
use std::collections::HashMap;

use crate::catalogue::Catalogue;
use crate::model::{ImpliedQuality, ImportanceRating};

/// Importance 1 is the "not selected" default, so a rating matters only
/// above it. This predicate is the single source of truth for that
/// threshold; ranking and coverage both go through it.
pub fn is_significant(rating: &ImportanceRating) -> bool {
    rating.importance > 1
}

/// Ratings the user actually selected, in input order.
pub fn significant(ratings: &[ImportanceRating]) -> Vec<ImportanceRating> {
    ratings.iter().filter(|r| is_significant(r)).cloned().collect()
}

/// Expand significant risk ratings into the qualities their mitigation
/// typically also improves.
///
/// Multiple risks implying the same quality merge into one record carrying
/// the deduplicated implying risks (encounter order) and the maximum
/// importance among them. Output order follows first encounter across the
/// input risk list; unknown risk ids and risks with no related qualities
/// contribute nothing.
pub fn implied_qualities(
    catalogue: &Catalogue,
    risk_ratings: &[ImportanceRating],
) -> Vec<ImpliedQuality> {
    let mut implied: Vec<ImpliedQuality> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for rating in risk_ratings.iter().filter(|r| is_significant(r)) {
        let Some(risk) = catalogue.risk(&rating.id) else {
            continue;
        };

        for quality_id in &risk.related_qualities {
            match positions.get(quality_id) {
                Some(&position) => {
                    let entry = &mut implied[position];
                    if !entry.source_risks.contains(&risk.id) {
                        entry.source_risks.push(risk.id.clone());
                    }
                    if rating.importance > entry.max_importance {
                        entry.max_importance = rating.importance;
                    }
                }
                None => {
                    positions.insert(quality_id.clone(), implied.len());
                    implied.push(ImpliedQuality {
                        id: quality_id.clone(),
                        source_risks: vec![risk.id.clone()],
                        max_importance: rating.importance,
                    });
                }
            }
        }
    }

    implied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::tests::small_catalogue;

    fn rating(id: &str, importance: u8) -> ImportanceRating {
        ImportanceRating {
            id: id.to_string(),
            importance,
        }
    }

    #[test]
    fn importance_one_is_not_significant() {
        let ratings = vec![rating("a", 1), rating("b", 2), rating("c", 5)];
        let kept = significant(&ratings);
        let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn single_risk_implies_its_related_qualities() {
        let catalogue = small_catalogue();
        let implied = implied_qualities(&catalogue, &[rating("omission", 4)]);
        assert_eq!(implied.len(), 1);
        assert_eq!(implied[0].id, "relevance");
        assert_eq!(implied[0].source_risks, vec!["omission"]);
        assert_eq!(implied[0].max_importance, 4);
    }

    #[test]
    fn overlapping_risks_merge_with_max_importance() {
        let catalogue = small_catalogue();
        // hallucination → relevance, coherence; omission → relevance
        let implied = implied_qualities(
            &catalogue,
            &[rating("hallucination", 3), rating("omission", 5)],
        );
        let ids: Vec<&str> = implied.iter().map(|q| q.id.as_str()).collect();
        // First-encountered order across the input risk list.
        assert_eq!(ids, vec!["relevance", "coherence"]);

        let relevance = &implied[0];
        assert_eq!(relevance.source_risks, vec!["hallucination", "omission"]);
        assert_eq!(relevance.max_importance, 5);

        let coherence = &implied[1];
        assert_eq!(coherence.source_risks, vec!["hallucination"]);
        assert_eq!(coherence.max_importance, 3);
    }

    #[test]
    fn insignificant_and_unknown_risks_contribute_nothing() {
        let catalogue = small_catalogue();
        let implied = implied_qualities(
            &catalogue,
            &[rating("hallucination", 1), rating("no_such_risk", 5)],
        );
        assert!(implied.is_empty());
    }
}
