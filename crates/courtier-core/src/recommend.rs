//! Active recommendation selection
//!
//! The backend returns recommendation lists pre-ranked, so the picker takes
//! the first entry and never re-sorts. An empty list is not an error:
//! callers substitute a generic placeholder product instead of failing.

use crate::models::Recommendation;

/// Product wording used when a client has no recommendation to pitch
pub const PLACEHOLDER_PRODUCT: &str = "the recommended product";

/// Select the active recommendation for pitch generation
pub fn pick_active(recs: &[Recommendation]) -> Option<&Recommendation> {
    recs.first()
}

/// Product name to pitch for the picked recommendation
pub fn product_for(rec: Option<&Recommendation>) -> &str {
    match rec {
        Some(r) if !r.product.trim().is_empty() => &r.product,
        Some(r) => r.label.as_deref().unwrap_or(PLACEHOLDER_PRODUCT),
        None => PLACEHOLDER_PRODUCT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecommendationStatus;

    fn rec(product: &str, score: Option<f64>) -> Recommendation {
        Recommendation {
            product: product.to_string(),
            label: None,
            score,
            status: RecommendationStatus::Pending,
            contacts: vec![],
            messages: vec![],
            raw: None,
        }
    }

    #[test]
    fn picks_the_first_entry_without_resorting() {
        let recs = vec![rec("Auto", Some(10.0)), rec("Santé", Some(99.0))];
        let active = pick_active(&recs).unwrap();
        assert_eq!(active.product, "Auto");
    }

    #[test]
    fn empty_list_yields_no_pick_and_a_placeholder_product() {
        let recs: Vec<Recommendation> = vec![];
        assert!(pick_active(&recs).is_none());
        assert_eq!(product_for(None), PLACEHOLDER_PRODUCT);
    }

    #[test]
    fn blank_product_falls_back_to_label() {
        let mut r = rec("  ", None);
        r.label = Some("Assurance Vie".into());
        assert_eq!(product_for(Some(&r)), "Assurance Vie");
    }
}
