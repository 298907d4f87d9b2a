//! `precis summarize`

use std::path::Path;

use anyhow::{Result, anyhow};

use precis_server::{ConfigOverrides, load_config, load_summarizer};

use super::util::resolve_input;

pub async fn run(
    input: Option<&str>,
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    quiet: bool,
) -> Result<()> {
    // 1. Resolve input
    let text = resolve_input(input)?;

    if text.trim().is_empty() {
        return Err(anyhow!("Input text is empty. Nothing to summarize."));
    }

    // 2. Resolve config
    let mut config = load_config(config_path)?;
    overrides.apply(&mut config);
    config.validate()?;

    // 3. Load model
    if !quiet {
        eprintln!("Loading model from '{}'...", config.model.dir.display());
    }
    let summarizer = load_summarizer(&config)?;

    // 4. Generate summary
    if !quiet {
        eprintln!("Summarizing {} characters...", text.len());
        eprintln!();
    }
    let summary = tokio::task::spawn_blocking(move || summarizer.summarize(&text)).await??;

    // 5. Output
    println!("{}", summary);

    Ok(())
}
