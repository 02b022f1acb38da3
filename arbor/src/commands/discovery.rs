use std::path::PathBuf;

use anyhow::Result;
use arbor_adapters::default_registry;
use arbor_core::detect_monorepo;

use crate::formatting::{
    print_key_value, print_section_header, print_table, print_warning, SectionStyle,
};

pub fn cmd_detect(path: PathBuf, json: bool) -> Result<()> {
    let registry = default_registry();
    let detected = registry.detect_environments(&path);

    if json {
        println!("{}", serde_json::to_string_pretty(&detected)?);
        return Ok(());
    }

    print_section_header("[Detected ecosystems]", SectionStyle::Primary);
    if detected.is_empty() {
        print_warning("No ecosystems detected");
        return Ok(());
    }

    let rows = detected
        .iter()
        .map(|detection| {
            let display_name = registry
                .get(&detection.name)
                .map(|adapter| adapter.display_name().to_string())
                .unwrap_or_else(|| detection.name.clone());
            vec![
                detection.name.clone(),
                display_name,
                detection
                    .package_manager
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
                detection.marker_files.join(", "),
            ]
        })
        .collect();
    print_table(
        &["Ecosystem", "Name", "Package manager", "Markers"],
        rows,
    );

    Ok(())
}

pub fn cmd_monorepo(path: PathBuf, json: bool) -> Result<()> {
    let info = detect_monorepo(&path);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    print_section_header("[Monorepo]", SectionStyle::Primary);
    let Some(kind) = info.kind else {
        print_warning("Not a monorepo");
        return Ok(());
    };

    print_key_value("Type:", kind.as_str());
    if let Some(manifest) = &info.root_package_json {
        print_key_value("Root manifest:", &manifest.display().to_string());
    }
    println!();

    if info.packages.is_empty() {
        print_warning("No workspace packages found");
        return Ok(());
    }

    let rows = info
        .packages
        .iter()
        .map(|package| {
            vec![
                package.name.clone(),
                package.path.display().to_string(),
                package
                    .entry_point
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(&["Package", "Path", "Entry point"], rows);

    Ok(())
}
