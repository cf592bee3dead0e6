//! Personalised reduction tips.
//!
//! Picks advice for whichever category contributes most to a footprint.

use crate::aggregate::FootprintSummary;

/// Shown when nothing has been logged yet.
pub const ONBOARDING_TIP: &str = "Start logging your activities to get personalized tips!";

/// Shown when the dominant category has no specific advice.
pub const GENERIC_TIP: &str = "Keep up the great work on reducing your carbon footprint!";

const ADVICE: &[(&str, &str)] = &[
    (
        "transport",
        "Your transport emissions are high. Consider carpooling, using public transport, or cycling for shorter trips.",
    ),
    (
        "electricity",
        "Electricity usage is a major part of your footprint. Try switching to LED bulbs and unplugging devices when not in use.",
    ),
    (
        "food",
        "Your diet has a significant impact. Reducing meat consumption, especially red meat, can lower your footprint.",
    ),
    (
        "waste",
        "To reduce waste emissions, focus on recycling and composting. Avoid single-use plastics whenever possible.",
    ),
];

/// Advice for a category label, matched case-insensitively.
#[must_use]
pub fn advice_for(label: &str) -> Option<&'static str> {
    let key = label.to_lowercase();
    ADVICE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, advice)| *advice)
}

/// Select tips for a footprint summary.
///
/// Always returns exactly one tip: onboarding for an empty summary,
/// otherwise advice for the dominant category.
#[must_use]
pub fn select_tips(summary: &FootprintSummary) -> Vec<String> {
    let Some(dominant) = summary.dominant_category() else {
        return vec![ONBOARDING_TIP.to_string()];
    };
    let tip = advice_for(dominant.label()).unwrap_or(GENERIC_TIP);
    vec![tip.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::Category;

    fn summary(entries: &[(Category, f64)]) -> FootprintSummary {
        let mut summary = FootprintSummary::default();
        for (category, value) in entries {
            summary.per_category.insert(*category, *value);
            summary.total += value;
        }
        summary
    }

    #[test]
    fn test_empty_summary_gets_onboarding() {
        assert_eq!(select_tips(&FootprintSummary::default()), vec![ONBOARDING_TIP]);
    }

    #[test]
    fn test_food_dominant() {
        let tips = select_tips(&summary(&[(Category::Food, 50.0), (Category::Transport, 5.0)]));
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0], advice_for("food").unwrap());
        assert!(tips[0].contains("meat"));
    }

    #[test]
    fn test_each_category_has_advice() {
        for category in Category::ALL {
            assert!(advice_for(category.label()).is_some(), "{category}");
            let tips = select_tips(&summary(&[(category, 1.0)]));
            assert_ne!(tips[0], GENERIC_TIP);
            assert_ne!(tips[0], ONBOARDING_TIP);
        }
    }

    #[test]
    fn test_advice_lookup_case_insensitive() {
        assert_eq!(advice_for("Transport"), advice_for("transport"));
        assert_eq!(advice_for("WASTE"), advice_for("waste"));
    }

    #[test]
    fn test_unknown_label_has_no_advice() {
        assert!(advice_for("plastic").is_none());
    }

    #[test]
    fn test_tie_picks_first_category() {
        let tips = select_tips(&summary(&[
            (Category::Waste, 8.0),
            (Category::Transport, 8.0),
        ]));
        assert_eq!(tips[0], advice_for("transport").unwrap());
    }
}
