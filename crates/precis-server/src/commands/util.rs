use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Text to summarize for the one-shot command.
///
/// An argument naming an existing file is read from disk; any other argument
/// is the article itself. With no argument the article comes from stdin.
pub fn resolve_input(input: Option<&str>) -> Result<String> {
    let Some(arg) = input else {
        let mut article = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut article)
            .context("reading article from stdin")?;
        if article.trim().is_empty() {
            bail!("stdin was empty; give the article as an argument, a file, or piped text");
        }
        return Ok(article);
    };

    let path = Path::new(arg);
    if path.is_file() {
        std::fs::read_to_string(path).with_context(|| format!("reading article from {}", arg))
    } else {
        Ok(arg.to_string())
    }
}
