// src/coach/templates.rs — Static keyword and advice tables

use super::Category;

/// Keywords matched (as lower-case substrings) against a scenario.
pub(crate) fn keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Financial => &[
            "revenue",
            "profit",
            "cost",
            "budget",
            "expense",
            "investment",
            "roi",
            "cash flow",
            "funding",
        ],
        Category::Market => &[
            "competitor",
            "market share",
            "customer",
            "demand",
            "pricing",
            "product",
            "service",
            "brand",
        ],
        Category::Operational => &[
            "process",
            "efficiency",
            "automation",
            "workflow",
            "team",
            "hiring",
            "training",
            "technology",
        ],
        Category::Strategic => &[
            "growth",
            "expansion",
            "partnership",
            "acquisition",
            "innovation",
            "disruption",
            "transformation",
        ],
        Category::Risk => &[
            "compliance",
            "regulation",
            "security",
            "liability",
            "reputation",
            "crisis",
            "contingency",
        ],
    }
}

pub(crate) struct Template {
    pub analysis: &'static str,
    pub recommendations: &'static [&'static str],
    pub risk_factors: &'static [&'static str],
    pub opportunities: &'static [&'static str],
    pub next_steps: [&'static str; 2],
}

pub(crate) const BASE_NEXT_STEPS: [&str; 3] = [
    "Document your current situation and desired outcomes",
    "Identify key stakeholders who should be involved in decision-making",
    "Set clear timelines and milestones for implementation",
];

pub(crate) const COMPLEX_SCENARIO_NOTE: &str = " Given the complexity of your scenario, consider breaking it down into smaller, manageable components for better analysis.";

pub(crate) const BRIEF_SCENARIO_NOTE: &str =
    " Consider providing more details about your scenario to enable more comprehensive analysis.";

pub(crate) const COACHING_TIPS: [&str; 8] = [
    "Break complex scenarios into smaller, manageable components",
    "Always consider multiple perspectives and stakeholder viewpoints",
    "Focus on actionable insights rather than theoretical analysis",
    "Regularly review and adjust your strategies based on outcomes",
    "Document lessons learned for future scenario planning",
    "Consider both short-term and long-term implications",
    "Involve subject matter experts when dealing with specialized areas",
    "Use data and evidence to support your decision-making process",
];

pub(crate) fn template(category: Category) -> &'static Template {
    match category {
        Category::Financial => &FINANCIAL,
        Category::Market => &MARKET,
        Category::Operational => &OPERATIONAL,
        Category::Strategic => &STRATEGIC,
        Category::Risk => &RISK,
    }
}

static FINANCIAL: Template = Template {
    analysis: "This scenario involves financial considerations that could impact your organization's fiscal health.",
    recommendations: &[
        "Conduct a thorough financial analysis including cash flow projections",
        "Review budget allocations and identify potential cost savings",
        "Consider diversifying revenue streams to reduce financial risk",
        "Establish clear financial KPIs to track performance",
    ],
    risk_factors: &[
        "Potential budget overruns or unexpected expenses",
        "Cash flow disruptions during implementation",
        "Market volatility affecting financial projections",
    ],
    opportunities: &[
        "Improved financial efficiency and cost management",
        "New revenue generation possibilities",
        "Enhanced financial planning and forecasting capabilities",
    ],
    next_steps: [
        "Review your financial statements and cash flow projections",
        "Consult with financial advisors or accountants if needed",
    ],
};

static MARKET: Template = Template {
    analysis: "This scenario relates to market dynamics and competitive positioning that could affect your business strategy.",
    recommendations: &[
        "Conduct comprehensive market research and competitive analysis",
        "Develop customer feedback mechanisms and satisfaction surveys",
        "Create differentiation strategies to stand out from competitors",
        "Monitor market trends and adjust strategies accordingly",
    ],
    risk_factors: &[
        "Increased competition and market saturation",
        "Changing customer preferences and demands",
        "Potential loss of market share to competitors",
    ],
    opportunities: &[
        "Market expansion and new customer acquisition",
        "Innovation opportunities to meet unmet needs",
        "Strategic partnerships and collaboration possibilities",
    ],
    next_steps: [
        "Conduct market research to validate your assumptions",
        "Gather customer feedback and competitive intelligence",
    ],
};

static OPERATIONAL: Template = Template {
    analysis: "This scenario involves operational aspects that could impact your organization's efficiency and productivity.",
    recommendations: &[
        "Evaluate current processes and identify improvement opportunities",
        "Invest in training and development for your team",
        "Consider technology solutions to enhance operational efficiency",
        "Establish clear performance metrics and monitoring systems",
    ],
    risk_factors: &[
        "Operational disruptions during transition periods",
        "Resistance to change from team members",
        "Technology integration challenges and learning curves",
    ],
    opportunities: &[
        "Improved operational efficiency and productivity",
        "Enhanced team capabilities and skill development",
        "Streamlined processes and reduced operational costs",
    ],
    next_steps: [
        "Map out current processes and identify bottlenecks",
        "Assess team capabilities and training needs",
    ],
};

static STRATEGIC: Template = Template {
    analysis: "This scenario involves strategic decisions that could significantly impact your organization's future direction.",
    recommendations: &[
        "Develop a comprehensive strategic plan with clear objectives",
        "Engage stakeholders in strategic planning discussions",
        "Create implementation timelines with measurable milestones",
        "Regularly review and adjust strategies based on outcomes",
    ],
    risk_factors: &[
        "Strategic misalignment with organizational capabilities",
        "Resource constraints limiting strategic execution",
        "Market changes rendering strategies obsolete",
    ],
    opportunities: &[
        "Significant growth and expansion possibilities",
        "Competitive advantages through strategic positioning",
        "Long-term sustainability and market leadership",
    ],
    next_steps: [
        "Align the scenario with your organization's mission and values",
        "Consider long-term implications and strategic fit",
    ],
};

static RISK: Template = Template {
    analysis: "This scenario involves risk management considerations that require careful planning and mitigation strategies.",
    recommendations: &[
        "Conduct thorough risk assessment and impact analysis",
        "Develop comprehensive risk mitigation and contingency plans",
        "Establish monitoring systems for early risk detection",
        "Create crisis management protocols and response procedures",
    ],
    risk_factors: &[
        "Regulatory compliance challenges and penalties",
        "Reputation damage from poor risk management",
        "Operational disruptions from unforeseen events",
    ],
    opportunities: &[
        "Enhanced organizational resilience and preparedness",
        "Improved risk management capabilities",
        "Competitive advantage through superior risk management",
    ],
    next_steps: [
        "Identify potential risks and their likelihood/impact",
        "Develop contingency plans for high-risk scenarios",
    ],
};
