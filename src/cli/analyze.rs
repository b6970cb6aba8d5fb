// src/cli/analyze.rs — One-shot scenario analysis and tips

use crate::api::types::SuggestResponse;
use crate::coach::{self, CoachingResponse};
use crate::core::{ScenarioOutcome, ScenarioService};
use crate::infra::config::Config;
use crate::provider::resolver::Credentials;
use crate::usage::Plan;

pub struct AnalyzeOptions {
    pub plan: Option<Plan>,
    pub opt_in: bool,
    pub provider: Option<String>,
    pub json: bool,
}

pub async fn run_analyze(config: &Config, scenario: &str, opts: AnalyzeOptions) -> anyhow::Result<()> {
    if scenario.trim().is_empty() {
        anyhow::bail!("Scenario cannot be empty");
    }

    let mut service = ScenarioService::from_config(config, &Credentials::from_env());
    if let Some(plan) = opts.plan {
        service = service.with_default_plan(plan);
    }
    if opts.provider.is_some() {
        service = service.with_preferred_provider(opts.provider);
    }

    let token = service.ensure_session(None);
    if opts.opt_in {
        service.opt_in(Some(&token));
    }

    let outcome = service.analyze_scenario(Some(&token), scenario).await;
    if opts.json {
        let response = SuggestResponse::from_outcome(scenario.to_string(), outcome);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn print_outcome(outcome: &ScenarioOutcome) {
    match &outcome.provider {
        Some(provider) => println!("AI analysis ({provider}):"),
        None => println!("Coach analysis (AI: {}):", outcome.ai_status),
    }
    println!();
    println!("{}", outcome.analysis);

    if let Some(coaching) = &outcome.coaching {
        print_coaching(coaching);
    }
    if let Some(msg) = &outcome.upgrade_message {
        println!();
        println!("{msg}");
    }
    if let Some(usage) = &outcome.usage {
        println!();
        println!(
            "Usage: {}/{} calls, {}/{} tokens ({} plan)",
            usage.calls_used, usage.calls_limit, usage.tokens_used, usage.tokens_limit, usage.plan
        );
    }
}

fn print_coaching(coaching: &CoachingResponse) {
    let sections = [
        ("Recommendations", &coaching.recommendations),
        ("Risk factors", &coaching.risk_factors),
        ("Opportunities", &coaching.opportunities),
        ("Next steps", &coaching.next_steps),
    ];
    for (title, items) in sections {
        println!();
        println!("{title}:");
        for item in items {
            println!("  - {item}");
        }
    }
    println!();
    println!(
        "Category: {} (confidence: {:?})",
        coaching.category, coaching.confidence
    );
}

pub fn run_tips() {
    for tip in coach::coaching_tips() {
        println!("  - {tip}");
    }
}
