use anyhow::Context;
use opsdiag_core::{config::Config, io, paths};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let project_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "opsdiag".to_string());

    println!("Initializing opsdiag in: {}", root.display());

    let dir = paths::opsdiag_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    if paths::config_path(root).exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
    } else {
        Config::new(&project_name)
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    }

    // Empty stores so the layout is visible before anything is recorded.
    for (rel, seed) in [(paths::FEEDBACK_FILE, "[]\n"), (paths::REGISTRY_FILE, "[]\n")] {
        let created = io::write_if_missing(&root.join(rel), seed.as_bytes())
            .with_context(|| format!("failed to write {rel}"))?;
        let tag = if created { "created:" } else { "exists: " };
        println!("  {tag} {rel}");
    }

    println!("\nopsdiag initialized for '{project_name}'.");
    Ok(())
}
