//! cli::commands::check
//!
//! Evaluate the gate: match a rule and check its review requirement.
//!
//! # Design
//!
//! The command loads and validates the rules file before touching the
//! network, fetches the PR and its reviews concurrently, matches a rule on
//! the configured condition value, resolves the matched rule's teams, and
//! evaluates fulfillment. An unfulfilled rule is the intended negative
//! outcome: it exits non-zero with the unmet principals, without an error
//! cause chain.
//!
//! # Example
//!
//! ```bash
//! reviewgate check --owner octocat --repo hello-world --pr 42 \
//!     --config .github/reviewers.yml --token "$GITHUB_TOKEN"
//! ```

use anyhow::{bail, Context as _, Result};

use crate::cli::args::GateArgs;
use crate::core::config::Config;
use crate::core::fulfillment::evaluate;
use crate::core::resolve::resolve_teams;
use crate::forge::github::GitHubForge;
use crate::forge::{approved_logins, Forge};
use crate::ui::output::{self, Verbosity};

/// Run the check command.
pub async fn check(args: &GateArgs, verbosity: Verbosity) -> Result<()> {
    let config = Config::load(&args.config)
        .with_context(|| format!("invalid gate configuration ({})", args.config.display()))?;
    let forge = build_forge(args);
    run_check(&forge, &config, args.number, verbosity).await
}

/// Evaluate the gate against any forge implementation.
///
/// Split out from [`check`] so integration tests can drive it with the mock
/// forge.
pub async fn run_check(
    forge: &dyn Forge,
    config: &Config,
    number: u64,
    verbosity: Verbosity,
) -> Result<()> {
    // Independent reads; fetch them concurrently.
    let (pr, reviews) = tokio::join!(forge.get_pull_request(number), forge.list_reviews(number));
    let pr = pr.with_context(|| format!("could not retrieve pull request #{}", number))?;
    let reviews =
        reviews.with_context(|| format!("could not retrieve reviews of pull request #{}", number))?;

    let condition = config.condition.select(&pr);
    output::debug(
        format!("matching rules against {} '{}'", config.condition, condition),
        verbosity,
    );

    let rule = config.rules.find_matching(condition)?;
    output::debug(
        format!(
            "matched {} rule with reviewers: {}",
            rule.quantifier,
            rule.reviewers
                .iter()
                .map(|p| p.spec())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        verbosity,
    );

    // Teams must be materialized before evaluation.
    let rule = resolve_teams(forge, rule).await?;

    let approved = approved_logins(&reviews);
    output::debug(
        format!("approving reviewers: [{}]", approved.join(", ")),
        verbosity,
    );

    let outcome = evaluate(&rule, &approved);
    if outcome.satisfied {
        output::print(
            format!("rule is fulfilled for pull request #{}", pr.number),
            verbosity,
        );
        Ok(())
    } else if outcome.unmet.is_empty() {
        bail!("rule is not fulfilled for pull request #{}", pr.number);
    } else {
        bail!(
            "rule is not fulfilled for pull request #{}: missing approval from {}",
            pr.number,
            outcome.unmet.join(", ")
        );
    }
}

/// Build the GitHub forge from command arguments.
fn build_forge(args: &GateArgs) -> GitHubForge {
    match &args.api_base {
        Some(base) => GitHubForge::with_api_base(&args.token, &args.owner, &args.repo, base),
        None => GitHubForge::new(&args.token, &args.owner, &args.repo),
    }
}
