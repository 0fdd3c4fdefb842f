use std::collections::HashSet;

use anyhow::{Result, bail};
use scrub_config::Config;
use scrub_core::{Annotation, AnnotationHistory, RedactStyle, SystemMint};
use scrub_detect::PiiRegion;
use scrub_engine::commit_redactions;

use crate::cli::RedactArgs;

pub fn handle(args: RedactArgs, config: &Config) -> Result<()> {
    let regions: Vec<PiiRegion> =
        serde_json::from_str(&std::fs::read_to_string(&args.regions)?)?;

    let manual: Vec<Annotation> = match &args.manual {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Vec::new(),
    };

    let style = match &args.style {
        Some(name) => parse_style(name)?,
        None => config.redaction.default_style,
    };

    let selected: HashSet<usize> = args.select.iter().copied().collect();

    let mut history = AnnotationHistory::with_depth(config.history.max_undo_depth);
    let mut mint = SystemMint;
    commit_redactions(&mut history, &regions, &selected, style, manual, &mut mint);
    println!("{}", serde_json::to_string_pretty(history.annotations())?);
    Ok(())
}

fn parse_style(name: &str) -> Result<RedactStyle> {
    match name {
        "blur" => Ok(RedactStyle::Blur),
        "pixelate" => Ok(RedactStyle::Pixelate),
        "blackbox" => Ok(RedactStyle::Blackbox),
        other => bail!("unknown redaction style '{other}' (expected blur, pixelate or blackbox)"),
    }
}
