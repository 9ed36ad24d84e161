//! Extract command - show the blocks of a single markdown file

use crate::cli::output::{colors, print_header, print_output};
use crate::cli::OutputFormat;
use crate::core::indexer::{document_from_source, extract_blocks, DocumentScope};
use crate::core::types::Block;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Markdown file to split into blocks
    pub file: PathBuf,

    /// Section id (defaults to the file stem)
    #[arg(long)]
    pub section: Option<String>,

    /// Treat the file as this subsection of the section
    #[arg(long)]
    pub subsection: Option<String>,
}

/// Execute the extract command
pub fn execute(args: ExtractArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(&args.file)
        .map_err(|e| format!("Cannot read '{}': {}", args.file.display(), e))?;

    let stem = args
        .file
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("'{}' has no file name", args.file.display()))?
        .to_string();

    let blocks = blocks_for(&raw, &stem, args.section, args.subsection);

    match format {
        OutputFormat::Human => {
            print_header(&format!("{} block(s)", blocks.len()));
            for block in &blocks {
                println!(
                    "\n{} {} {}",
                    colors::block_id(&block.id),
                    colors::dim(&format!("[{}]", block.kind.as_str())),
                    colors::label(&block.title)
                );
                for line in block.content.lines().take(3) {
                    println!("    {}", colors::dim(line));
                }
            }
        }
        OutputFormat::Json => print_output(&blocks, format),
    }

    Ok(())
}

/// Blocks of one file, placed in the handbook tree by its ids
fn blocks_for(raw: &str, stem: &str, section: Option<String>, subsection: Option<String>) -> Vec<Block> {
    match subsection {
        Some(sub) => {
            let section = section.unwrap_or_else(|| stem.to_string());
            let document = document_from_source(&sub, raw);
            let scope = DocumentScope::section(section.clone(), section).subsection(sub, document.title);
            extract_blocks(&document.content, &scope)
        }
        None => {
            let id = section.unwrap_or_else(|| stem.to_string());
            let document = document_from_source(&id, raw);
            let scope = DocumentScope::section(id, document.title);
            extract_blocks(&document.content, &scope)
        }
    }
}
