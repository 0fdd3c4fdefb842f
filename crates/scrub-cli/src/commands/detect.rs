use std::time::Duration;

use anyhow::Result;
use scrub_config::Config;
use scrub_engine::{ImageSource, PiiScanner, StaticOcr, load_word_dump};

use crate::cli::DetectArgs;

pub async fn handle(args: DetectArgs, config: &Config) -> Result<()> {
    let recognized = load_word_dump(&args.words)?;
    let timeout = Duration::from_millis(args.timeout_ms.unwrap_or(config.ocr.timeout_ms));

    let scanner = PiiScanner::with_timeout(StaticOcr::new(recognized), timeout);
    let detection = scanner.detect(&ImageSource::Path(args.words)).await?;

    println!("{}", serde_json::to_string_pretty(&detection)?);
    Ok(())
}
