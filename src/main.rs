use anyhow::Result;
use clap::Parser;
use std::fs;
use std::path::Path;

use ci_release::changelog::{ChangelogRenderer, Headings, RenderOptions};
use ci_release::classifier::CommitClassifier;
use ci_release::config;
use ci_release::domain::latest_release_tag;
use ci_release::git::{self, Git2Repository, ReleaseRepository};
use ci_release::grammar::GrammarRules;
use ci_release::manifest;
use ci_release::ui;
use ci_release::warning::ReleaseWarning;

#[derive(clap::Parser)]
#[command(
    name = "ci-release",
    about = "Compute the next version and changelog from conventional commits, then publish a release tag"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short,
        long,
        default_value = "package.json",
        help = "Path to the package manifest"
    )]
    manifest: String,

    #[arg(long, help = "Repository URL used for commit links (overrides config)")]
    repo_url: Option<String>,

    #[arg(long, help = "Git remote to push the release tag to (overrides config)")]
    remote: Option<String>,

    #[arg(long, help = "Write the rendered changelog to this file")]
    changelog_out: Option<String>,

    #[arg(short, long, help = "Skip confirmation prompts")]
    force: bool,

    #[arg(long, help = "Preview the release without making changes")]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    // Open the repository at the working directory
    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    // Read the manifest: the current version drives stability and the
    // initial-release base, so a broken manifest stops everything
    let manifest_path = Path::new(&args.manifest);
    let package = match manifest::read_manifest(manifest_path) {
        Ok(info) => info,
        Err(e) => {
            ui::display_error(&format!("Failed to read manifest: {}", e));
            std::process::exit(1);
        }
    };

    // Find the latest release tag by prefix-matched version lookup
    let prefix = config.release.tag_prefix.clone();
    let tags = match repo.list_tags() {
        Ok(tags) => tags,
        Err(e) => {
            ui::display_error(&format!("Failed to list tags: {}", e));
            std::process::exit(1);
        }
    };
    let latest = match latest_release_tag(&tags, &prefix) {
        Ok(latest) => latest,
        Err(e) => {
            ui::display_error(&format!("Failed to resolve latest release tag: {}", e));
            std::process::exit(1);
        }
    };
    let latest_tag_name = latest.as_ref().map(|(tag, _)| tag.name.clone());
    let cutoff = latest.as_ref().map(|(tag, _)| tag.commit_sha.clone());

    // Fetch paginated history; stops early once the cutoff page arrives
    ui::display_status("Fetching commit history...");
    let commits = match git::fetch_history(&repo, cutoff.as_deref(), config.release.page_size) {
        Ok(commits) => commits,
        Err(e) => {
            ui::display_error(&format!("Failed to fetch commit history: {}", e));
            std::process::exit(1);
        }
    };

    // Classify
    let repo_url = args
        .repo_url
        .clone()
        .unwrap_or_else(|| config.release.repo_url.clone());
    let rules = GrammarRules::new(config.grammar.ignored_types.clone());
    let classifier = CommitClassifier::with_rules(repo_url, rules);
    let result = classifier.classify(&commits, cutoff.as_deref(), &package.version);

    if result.using_in_existing_env {
        if let Some(tag) = &latest_tag_name {
            ui::display_warning(&ReleaseWarning::AdoptedRepository {
                latest_tag: tag.clone(),
            });
        }
    }

    ui::display_classification(&result);

    let next = match result.next_version {
        Some(next) => next,
        None => {
            if let Some(tag) = &latest_tag_name {
                ui::display_warning(&ReleaseWarning::NoNewCommits {
                    latest_tag: tag.clone(),
                });
            }
            ui::display_status("No releasable changes; nothing to publish.");
            return Ok(());
        }
    };

    // Render the changelog
    let renderer = ChangelogRenderer::new(RenderOptions {
        headings: Headings {
            breaking: config.changelog.breaking_heading.clone(),
            features: config.changelog.features_heading.clone(),
            fixes: config.changelog.fixes_heading.clone(),
        },
        package: package.name.clone(),
    });
    let changelog = renderer.render(&result.buckets);

    let tag_name = format!("{}{}", prefix, next);
    ui::display_proposed_release(latest_tag_name.as_deref(), &next, &tag_name);
    println!("\n{}\n", changelog);

    if args.dry_run {
        ui::display_status("Dry run: no files written, no tag created.");
        return Ok(());
    }

    if !args.force && !ui::confirm_action(&format!("Release {}?", tag_name))? {
        println!("Release cancelled by user.");
        return Ok(());
    }

    // Persist the new version
    if let Err(e) = manifest::write_version(manifest_path, &next) {
        ui::display_error(&format!("Failed to write manifest: {}", e));
        std::process::exit(1);
    }
    ui::display_success(&format!("Updated {} to version {}", args.manifest, next));

    // Optionally write the changelog file
    if let Some(path) = &args.changelog_out {
        if let Err(e) = fs::write(path, format!("{}\n", changelog)) {
            ui::display_error(&format!("Failed to write changelog: {}", e));
            std::process::exit(1);
        }
        ui::display_success(&format!("Wrote changelog to {}", path));
    }

    // Tag the current HEAD
    let head = match repo.head_sha() {
        Ok(sha) => sha,
        Err(e) => {
            ui::display_error(&format!("Failed to resolve HEAD: {}", e));
            std::process::exit(1);
        }
    };
    if let Err(e) = repo.create_tag(&tag_name, &head) {
        ui::display_error(&format!("Failed to create tag '{}': {}", tag_name, e));
        std::process::exit(1);
    }
    ui::display_success(&format!("Created tag: {}", tag_name));

    // Push the tag unless the user declines
    let remote = args
        .remote
        .clone()
        .unwrap_or_else(|| config.release.remote.clone());
    let should_push = if args.force {
        true
    } else {
        ui::confirm_action(&format!("Push tag {} to '{}'?", tag_name, remote))?
    };

    if should_push {
        if let Err(e) = repo.push_tag(&remote, &tag_name) {
            ui::display_error(&format!("Failed to push tag '{}': {}", tag_name, e));
            std::process::exit(1);
        }
        ui::display_success(&format!("Pushed tag: {} to {}", tag_name, remote));
    } else {
        ui::display_status(&format!(
            "To push this tag later, run: git push {} {}",
            remote, tag_name
        ));
    }

    Ok(())
}
