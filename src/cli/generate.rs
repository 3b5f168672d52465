//! Generate command implementation

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use std::path::PathBuf;

use super::utils::parse_csv;
use crate::age::humanize_age;
use crate::config::{credentials, load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{Affiliation, BadgeStats, Config};
use crate::github::{GithubClient, QueryCounter, Transport};
use crate::loc::LocAggregator;
use crate::render::{badge_fields, existing_templates, render_file};
use crate::utils::{timed, Timings};

#[derive(Args)]
pub struct GenerateArgs {
    /// Config file (TOML or YAML). Defaults to readme-stats.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ignore cached rows and walk every repository again
    #[arg(long)]
    pub force_refresh: bool,

    /// Directory holding the per-user LOC cache file
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Repository affiliations for LOC and contribution counts (comma-separated)
    #[arg(short, long, value_name = "LIST")]
    pub affiliations: Option<String>,

    /// SVG template to rewrite (repeatable). Defaults to dark-mode.svg and light-mode.svg
    #[arg(short, long = "template", value_name = "SVG")]
    pub templates: Vec<PathBuf>,

    /// Compute and print the values without touching the templates
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let root = std::env::current_dir()?;
    let config = load_config(&root, args.config.as_deref())?;
    let config = merge_cli_with_config(
        config,
        CliOverrides {
            cache_dir: args.cache_dir,
            force_refresh: args.force_refresh,
            affiliations: parse_csv(&args.affiliations),
            templates: args.templates,
        },
    )?;
    let creds = credentials(&config)?;
    let client =
        GithubClient::new(&creds.token, &creds.user_name, &config.graphql_url, &config.rest_url);

    println!("Calculation times:");
    let mut timings = Timings::new();
    let stats = collect_stats(&client, &config, Local::now().date_naive(), &mut timings)?;

    if args.dry_run {
        print_fields(&stats);
    } else {
        let templates = existing_templates(&config.templates);
        for missing in config.templates.iter().filter(|t| !templates.contains(t)) {
            tracing::warn!("Template not found, skipping: {}", missing.display());
        }
        for template in templates {
            render_file(template, &stats)?;
        }
    }

    println!("{:<21}{:>11.4} s", "Total function time:", timings.total().as_secs_f64());
    print_query_counts(client.counter());
    Ok(())
}

/// Gather every badge value, printing the time each step took.
pub(crate) fn collect_stats<T: Transport>(
    client: &GithubClient<T>,
    config: &Config,
    today: NaiveDate,
    timings: &mut Timings,
) -> Result<BadgeStats> {
    let account = timings.measure("account data", || client.account())?;

    let birthday = config.birthday.unwrap_or_else(|| account.created_at.date_naive());
    let age = timings.measure("age calculation", || humanize_age(birthday, today));

    let aggregator = LocAggregator::new(client, &account.id, &config.cache_dir)
        .comment_size(config.comment_size)
        .policy(config.resync)
        .force_refresh(config.force_refresh)
        .archive(config.archive.as_ref());
    let (report, elapsed) = timed(|| aggregator.run(&config.affiliations));
    let report = report?;
    timings.record(if report.fully_cached { "LOC (cached)" } else { "LOC (no cache)" }, elapsed);

    let owned = timings.measure("stars & repos", || client.repository_stats(&[Affiliation::Owner]))?;
    let contributed =
        timings.measure("contributed repos", || client.repository_count(&config.affiliations))?;
    let followers = timings.measure("followers", || client.followers())?;

    let (pull_requests, issues) = timings.measure("PR/issue counts", || {
        client.pr_issue_counts().unwrap_or_else(|e| {
            tracing::warn!("Could not fetch PR/issue data: {}", e);
            (0, 0)
        })
    });

    Ok(BadgeStats {
        age,
        commits: report.totals.commits,
        stars: owned.stars,
        repos: owned.total_count,
        contributed: contributed + report.archived_repos,
        followers,
        loc: report.totals,
        pull_requests,
        issues,
    })
}

fn print_fields(stats: &BadgeStats) {
    println!("{}", style("Badge values:").bold());
    for field in badge_fields(stats) {
        println!("{:<28}{}", format!("   {}:", field.id), field.text);
    }
}

fn print_query_counts(counter: &QueryCounter) {
    println!("Total GitHub API calls: {:>9}", counter.total());
    for (kind, count) in counter.snapshot() {
        println!("{:<28}{:>6}", format!("   {kind}:"), count);
    }
}
