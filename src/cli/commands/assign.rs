//! cli::commands::assign
//!
//! Set the matched rule's reviewers on the pull request.
//!
//! # Design
//!
//! Assign mode runs the same config-load and rule-match pipeline as check,
//! then splits the matched rule's principals into user logins and team
//! slugs and requests them on the PR. Reviewers already requested on the PR
//! are overwritten. No fulfillment evaluation happens in this mode.
//!
//! # Example
//!
//! ```bash
//! reviewgate assign --owner octocat --repo hello-world --pr 42 \
//!     --config .github/reviewers.yml --token "$GITHUB_TOKEN"
//! ```

use anyhow::{Context as _, Result};

use crate::cli::args::GateArgs;
use crate::core::config::Config;
use crate::forge::github::GitHubForge;
use crate::forge::Forge;
use crate::ui::output::{self, Verbosity};

/// Run the assign command.
pub async fn assign(args: &GateArgs, verbosity: Verbosity) -> Result<()> {
    let config = Config::load(&args.config)
        .with_context(|| format!("invalid gate configuration ({})", args.config.display()))?;
    let forge = match &args.api_base {
        Some(base) => GitHubForge::with_api_base(&args.token, &args.owner, &args.repo, base),
        None => GitHubForge::new(&args.token, &args.owner, &args.repo),
    };
    run_assign(&forge, &config, args.number, verbosity).await
}

/// Assign the matched rule's reviewers via any forge implementation.
pub async fn run_assign(
    forge: &dyn Forge,
    config: &Config,
    number: u64,
    verbosity: Verbosity,
) -> Result<()> {
    let pr = forge
        .get_pull_request(number)
        .await
        .with_context(|| format!("could not retrieve pull request #{}", number))?;

    let condition = config.condition.select(&pr);
    let rule = config.rules.find_matching(condition)?;

    let users = rule.user_logins();
    let teams = rule.team_slugs();
    output::debug(
        format!(
            "requesting reviewers on #{}: users [{}], teams [{}]",
            number,
            users.join(", "),
            teams.join(", ")
        ),
        verbosity,
    );

    forge
        .request_reviewers(number, users, teams)
        .await
        .with_context(|| {
            format!(
                "the reviewers for pull request #{} could not be set",
                number
            )
        })?;

    output::print(
        format!("reviewers set on pull request #{}", pr.number),
        verbosity,
    );
    Ok(())
}
