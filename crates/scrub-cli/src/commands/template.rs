use std::path::PathBuf;

use anyhow::{Result, anyhow};
use scrub_annotate::{Template, apply_template, builtin_templates, load_templates};
use scrub_core::SystemMint;

use crate::cli::TemplateCommands;

pub fn handle(cmd: TemplateCommands) -> Result<()> {
    match cmd {
        TemplateCommands::List { file } => list(file),
        TemplateCommands::Show { id, file } => show(id, file),
        TemplateCommands::Apply {
            id,
            width,
            height,
            file,
        } => apply(id, width, height, file),
    }
}

fn templates(file: Option<PathBuf>) -> Result<Vec<Template>> {
    match file {
        Some(path) => Ok(load_templates(&path)?),
        None => Ok(builtin_templates()),
    }
}

fn find(id: &str, file: Option<PathBuf>) -> Result<Template> {
    templates(file)?
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow!("no template with id '{id}'"))
}

fn list(file: Option<PathBuf>) -> Result<()> {
    for template in templates(file)? {
        println!("{} - {}", template.id, template.name);
        println!("    {} ({} shapes)", template.description, template.shapes.len());
    }
    Ok(())
}

fn show(id: String, file: Option<PathBuf>) -> Result<()> {
    let template = find(&id, file)?;
    println!("{}", serde_json::to_string_pretty(&template)?);
    Ok(())
}

fn apply(id: String, width: f64, height: f64, file: Option<PathBuf>) -> Result<()> {
    let template = find(&id, file)?;

    let mut mint = SystemMint;
    let annotations = apply_template(&template, width, height, &mut mint);
    println!("{}", serde_json::to_string_pretty(&annotations)?);
    Ok(())
}
