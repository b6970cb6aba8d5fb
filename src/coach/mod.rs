// src/coach/mod.rs — Rule-based fallback coach
//
// Produces a coaching response from keyword matches alone: no I/O, no
// randomness. Used whenever AI analysis is unavailable or not allowed.

mod templates;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::usage::Plan;
use templates::{
    BASE_NEXT_STEPS, BRIEF_SCENARIO_NOTE, COACHING_TIPS, COMPLEX_SCENARIO_NOTE,
};

/// Scenarios longer than this get a note suggesting decomposition.
pub const COMPLEX_SCENARIO_CHARS: usize = 200;
/// Scenarios shorter than this get a note asking for more detail.
pub const BRIEF_SCENARIO_CHARS: usize = 50;

/// Business area a scenario is filed under. Declaration order is the
/// tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Financial,
    Market,
    Operational,
    Strategic,
    Risk,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Financial,
        Category::Market,
        Category::Operational,
        Category::Strategic,
        Category::Risk,
    ];

    pub fn keywords(&self) -> &'static [&'static str] {
        templates::keywords(*self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Financial => "financial",
            Category::Market => "market",
            Category::Operational => "operational",
            Category::Strategic => "strategic",
            Category::Risk => "risk",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    fn from_matches(count: usize) -> Self {
        match count {
            0 => Confidence::Low,
            1 | 2 => Confidence::Medium,
            _ => Confidence::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingResponse {
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
    pub opportunities: Vec<String>,
    pub next_steps: Vec<String>,
    pub is_fallback: bool,
    pub confidence: Confidence,
    pub category: Category,
    pub matched_keywords: Vec<String>,
}

/// Keyword hits for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore {
    pub category: Category,
    pub matches: Vec<&'static str>,
}

/// Score every category against the scenario, in declaration order.
pub fn score(scenario: &str) -> Vec<CategoryScore> {
    let lower = scenario.to_lowercase();
    Category::ALL
        .iter()
        .map(|&category| CategoryScore {
            category,
            matches: category
                .keywords()
                .iter()
                .copied()
                .filter(|kw| lower.contains(kw))
                .collect(),
        })
        .collect()
}

/// Highest match count wins; on a tie the earlier-declared category stays.
fn primary(scores: Vec<CategoryScore>) -> CategoryScore {
    scores
        .into_iter()
        .reduce(|best, next| {
            if next.matches.len() > best.matches.len() {
                next
            } else {
                best
            }
        })
        .unwrap_or(CategoryScore {
            category: Category::Financial,
            matches: Vec::new(),
        })
}

pub fn analyze(scenario: &str) -> CoachingResponse {
    let winner = primary(score(scenario));
    let template = templates::template(winner.category);

    CoachingResponse {
        analysis: customize_analysis(scenario, template.analysis, &winner.matches),
        recommendations: to_strings(template.recommendations),
        risk_factors: to_strings(template.risk_factors),
        opportunities: to_strings(template.opportunities),
        next_steps: BASE_NEXT_STEPS
            .iter()
            .chain(template.next_steps.iter())
            .map(|s| s.to_string())
            .collect(),
        is_fallback: true,
        confidence: Confidence::from_matches(winner.matches.len()),
        category: winner.category,
        matched_keywords: to_strings(&winner.matches),
    }
}

fn customize_analysis(scenario: &str, base: &str, matches: &[&str]) -> String {
    let mut analysis = base.to_string();

    if !matches.is_empty() {
        analysis.push_str(&format!(
            " Key areas identified in your scenario include: {}.",
            matches.join(", ")
        ));
    }

    let length = scenario.chars().count();
    if length > COMPLEX_SCENARIO_CHARS {
        analysis.push_str(COMPLEX_SCENARIO_NOTE);
    } else if length < BRIEF_SCENARIO_CHARS {
        analysis.push_str(BRIEF_SCENARIO_NOTE);
    }

    analysis
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn coaching_tips() -> Vec<String> {
    to_strings(&COACHING_TIPS)
}

/// Upsell line shown next to fallback answers.
pub fn upgrade_message(plan: Plan) -> &'static str {
    match plan {
        Plan::Free => "Upgrade to Basic plan for AI-powered insights and analysis. Get personalized recommendations from Claude AI.",
        Plan::Basic => "Upgrade to Premium for unlimited AI analysis and advanced strategic planning tools.",
        Plan::Premium => "You're on our Premium plan! Contact support if you need additional capacity.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_financial_medium() {
        let r = analyze("Our revenue is flat and cash flow is tight this quarter, what now?");
        assert_eq!(r.category, Category::Financial);
        assert_eq!(r.confidence, Confidence::Medium);
        assert_eq!(r.matched_keywords, vec!["revenue", "cash flow"]);
        assert!(r.is_fallback);
    }

    #[test]
    fn test_high_confidence() {
        let r = analyze("We need compliance review, a security audit and a crisis plan before launch.");
        assert_eq!(r.category, Category::Risk);
        assert_eq!(r.confidence, Confidence::High);
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        // one market keyword, one strategic keyword
        let r = analyze("A bigger brand could drive growth for the whole company next year.");
        assert_eq!(r.category, Category::Market);
        assert_eq!(r.confidence, Confidence::Medium);

        // one operational, one risk
        let r = analyze("Hiring more people may expose us to liability in several new regions.");
        assert_eq!(r.category, Category::Operational);
    }

    #[test]
    fn test_no_matches_is_low_and_financial() {
        let r = analyze("Hello there");
        assert_eq!(r.category, Category::Financial);
        assert_eq!(r.confidence, Confidence::Low);
        assert!(r.matched_keywords.is_empty());
        assert!(!r.analysis.contains("Key areas identified"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let r = analyze("REVENUE, PROFIT and BUDGET are all under pressure this year for us.");
        assert_eq!(r.category, Category::Financial);
        assert_eq!(r.confidence, Confidence::High);
    }

    #[test]
    fn test_short_scenario_asks_for_detail() {
        let r = analyze("Cut costs?");
        assert!(r.analysis.ends_with(BRIEF_SCENARIO_NOTE));
        assert!(r.analysis.contains("Key areas identified in your scenario include: cost."));
    }

    #[test]
    fn test_long_scenario_suggests_breakdown() {
        let text = "We are weighing an acquisition of a smaller rival. ".repeat(5);
        assert!(text.chars().count() > COMPLEX_SCENARIO_CHARS);
        let r = analyze(&text);
        assert_eq!(r.category, Category::Strategic);
        assert!(r.analysis.ends_with(COMPLEX_SCENARIO_NOTE));
        assert!(!r.analysis.contains(BRIEF_SCENARIO_NOTE));
    }

    #[test]
    fn test_mid_length_has_no_length_note() {
        let text = "Our team wants to automate the onboarding workflow next quarter.";
        let n = text.chars().count();
        assert!((BRIEF_SCENARIO_CHARS..=COMPLEX_SCENARIO_CHARS).contains(&n));
        let r = analyze(text);
        assert!(!r.analysis.contains(BRIEF_SCENARIO_NOTE));
        assert!(!r.analysis.contains(COMPLEX_SCENARIO_NOTE));
    }

    #[test]
    fn test_next_steps_are_base_plus_category() {
        let r = analyze("Our competitor cut pricing on their flagship product last week.");
        assert_eq!(r.category, Category::Market);
        assert_eq!(r.next_steps.len(), 5);
        assert_eq!(r.next_steps[0], BASE_NEXT_STEPS[0]);
        assert_eq!(
            r.next_steps[3],
            "Conduct market research to validate your assumptions"
        );
    }

    #[test]
    fn test_template_lists_are_populated() {
        for category in Category::ALL {
            let t = templates::template(category);
            assert_eq!(t.recommendations.len(), 4, "{category}");
            assert_eq!(t.risk_factors.len(), 3, "{category}");
            assert_eq!(t.opportunities.len(), 3, "{category}");
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Partnership talks with a supplier could cut our cost base.";
        assert_eq!(analyze(text), analyze(text));
    }

    #[test]
    fn test_score_reports_every_category_in_order() {
        let scores = score("customer demand");
        let order: Vec<_> = scores.iter().map(|s| s.category).collect();
        assert_eq!(order, Category::ALL.to_vec());
        assert_eq!(scores[1].matches, vec!["customer", "demand"]);
    }

    #[test]
    fn test_coaching_tips_static() {
        let tips = coaching_tips();
        assert_eq!(tips.len(), 8);
        assert_eq!(tips, coaching_tips());
    }

    #[test]
    fn test_upgrade_message_per_plan() {
        assert_eq!(
            upgrade_message(Plan::Free),
            "Upgrade to Basic plan for AI-powered insights and analysis. Get personalized recommendations from Claude AI."
        );
        assert_eq!(
            upgrade_message(Plan::Basic),
            "Upgrade to Premium for unlimited AI analysis and advanced strategic planning tools."
        );
        assert_eq!(
            upgrade_message(Plan::Premium),
            "You're on our Premium plan! Contact support if you need additional capacity."
        );
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let json = serde_json::to_value(analyze("budget")).unwrap();
        assert_eq!(json["isFallback"], true);
        assert_eq!(json["confidence"], "medium");
        assert!(json["riskFactors"].is_array());
        assert!(json["nextSteps"].is_array());
    }
}
