use std::path::PathBuf;

use anyhow::{bail, Result};
use arbor_adapters::default_registry;
use arbor_core::{
    detect_monorepo, patch_tsconfig_files, ArborConfig, BootstrapResult, Bootstrapper,
    ProgressReporter, Strategy, TracingReporter,
};

use super::progress_reporter::CliProgressReporter;
use crate::formatting::{
    print_error, print_info, print_section_header, print_success, print_summary_box,
    print_warning, SectionStyle,
};

pub fn cmd_bootstrap(
    worktree: PathBuf,
    source: PathBuf,
    strategy: Option<Strategy>,
    json: bool,
) -> Result<()> {
    if !worktree.is_dir() {
        bail!("Worktree '{}' is not a directory", worktree.display());
    }

    let mut config = ArborConfig::load(&source)?.bootstrap;
    if let Some(strategy) = strategy {
        config = config.with_strategy(strategy);
    }

    let registry = default_registry();
    let bootstrapper = Bootstrapper::new(&registry);

    let results = if json {
        bootstrapper.bootstrap_with_config(
            &worktree,
            &source,
            &config,
            Some(&TracingReporter),
        )
    } else {
        let reporter = CliProgressReporter::new();
        let results = bootstrapper.bootstrap_with_config(
            &worktree,
            &source,
            &config,
            Some(&reporter as &dyn ProgressReporter),
        );
        reporter.finish();
        results
    };

    let failed: Vec<&BootstrapResult> = results.iter().filter(|r| !r.success).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results, failed.is_empty());
    }

    if !failed.is_empty() {
        let names: Vec<&str> = failed.iter().map(|r| r.environment.as_str()).collect();
        bail!(
            "{} ecosystem(s) failed to bootstrap: {}",
            failed.len(),
            names.join(", ")
        );
    }

    Ok(())
}

fn print_results(results: &[BootstrapResult], all_succeeded: bool) {
    println!();
    if all_succeeded {
        print_section_header("[Bootstrap complete]", SectionStyle::Success);
    } else {
        print_section_header("[Bootstrap finished with failures]", SectionStyle::Error);
    }

    if results.is_empty() {
        print_warning("No ecosystems detected in source checkout");
        return;
    }

    for result in results {
        let line = format!("{} ({}): {}", result.environment, result.strategy, result.message);
        if result.success {
            print_success(&line);
        } else {
            print_error(&line);
        }
        match result.tsconfig_patched {
            Some(true) => print_info("Added workspace path mappings to tsconfig.json"),
            Some(false) => print_info("tsconfig.json path mappings already up to date"),
            None => {}
        }
    }

    let succeeded = results.iter().filter(|r| r.success).count();
    let succeeded_str = succeeded.to_string();
    let failed_str = (results.len() - succeeded).to_string();
    println!();
    print_summary_box(
        "Summary",
        &[("Succeeded:", succeeded_str.as_str()), ("Failed:", failed_str.as_str())],
    );
}

pub fn cmd_patch(worktree: PathBuf, json: bool) -> Result<()> {
    let info = detect_monorepo(&worktree);
    if !info.is_monorepo {
        if json {
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            print_warning("Not a monorepo, nothing to patch");
        }
        return Ok(());
    }

    let summary = patch_tsconfig_files(&worktree, &info.packages);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_section_header("[Patching tsconfig.json files]", SectionStyle::Primary);
    for path in &summary.patched {
        print_success(&path.display().to_string());
    }
    for path in &summary.skipped {
        print_warning(&format!("Skipped {}", path.display()));
    }

    let scanned = summary.scanned.len().to_string();
    let patched = summary.patched.len().to_string();
    let skipped = summary.skipped.len().to_string();
    println!();
    print_summary_box(
        "Summary",
        &[
            ("Scanned:", scanned.as_str()),
            ("Patched:", patched.as_str()),
            ("Skipped:", skipped.as_str()),
        ],
    );

    Ok(())
}

pub fn cmd_cleanup(worktree: PathBuf) -> Result<()> {
    let registry = default_registry();
    Bootstrapper::new(&registry).cleanup(&worktree);
    print_success(&format!(
        "Removed dependency links from {}",
        worktree.display()
    ));
    Ok(())
}
