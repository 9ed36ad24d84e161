// Test fixtures for integration testing

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Documents loaded from `TestCorpus::handbook()`
#[allow(dead_code)] // Used in integration tests
pub const HANDBOOK_DOCUMENT_COUNT: usize = 4;

/// Blocks extracted from `TestCorpus::handbook()`
#[allow(dead_code)] // Used in integration tests
pub const HANDBOOK_BLOCK_COUNT: usize = 9;

const ABOUT: &str = "---
title: About this handbook
order: 0
final: true
---
# About this handbook

This handbook explains how we grow fruit.

## Contact
Write to the orchard team.
";

const ORCHARD: &str = "---
title: Orchard
order: 1
final: true
---
Orchard
=======
Everything about trees.

## Apple Trees
Apples need **full sun**. See [pruning](/orchard/pruning).

Young apple trees need water.

## Pests
Watch for the codling moth.

## All Sidebar Content Below

graft:
Heading: Grafting
Joining a scion to a rootstock.

rootstock:
The lower part of a grafted tree that provides the roots.
";

const PRUNING: &str = "---
title: Pruning
order: 2
---
## Winter Pruning
Prune apple trees while they are dormant.
";

const GARDEN: &str = "---
title: Garden
order: 3
---
## Vegetables
Tomatoes (cherry) need support.
";

/// Synthetic handbook corpus on disk
#[allow(dead_code)] // Used in integration tests
pub struct TestCorpus {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl TestCorpus {
    /// Four documents, two drawer entries, plus directories the walker
    /// must skip (drawer folder, hidden folder, section without file)
    #[allow(dead_code)] // Used in integration tests
    pub fn handbook() -> Self {
        Self::with_files(&[
            ("about/about.md", ABOUT),
            ("orchard/orchard.md", ORCHARD),
            ("orchard/pruning/pruning.md", PRUNING),
            ("orchard/drawer/drawer.md", "## Hidden\nzucchini"),
            ("garden/garden.md", GARDEN),
            (".drafts/.drafts.md", "## Draft\nzucchini"),
            ("empty/notes.txt", "zucchini"),
        ])
    }

    /// Create a larger corpus (sections with subsections)
    #[allow(dead_code)] // Used in integration tests
    pub fn generated(sections: usize, subsections: usize) -> Self {
        let mut files = Vec::new();
        for s in 0..sections {
            let id = format!("section-{s}");
            files.push((
                format!("{id}/{id}.md"),
                generated_document(&format!("Section {s}"), s as f64),
            ));
            for u in 0..subsections {
                let sub = format!("sub-{u}");
                files.push((
                    format!("{id}/{sub}/{sub}.md"),
                    generated_document(&format!("Subsection {s}.{u}"), u as f64),
                ));
            }
        }

        let specs: Vec<(&str, &str)> = files
            .iter()
            .map(|(p, c)| (p.as_str(), c.as_str()))
            .collect();
        Self::with_files(&specs)
    }

    /// Create with custom files
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();

        for (path, content) in files {
            let full_path = dir.path().join(path);
            std::fs::create_dir_all(full_path.parent().unwrap()).unwrap();
            std::fs::write(&full_path, content).unwrap();
            paths.push(full_path);
        }

        Self { dir, files: paths }
    }

    /// Get path to the corpus root
    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

fn generated_document(title: &str, order: f64) -> String {
    let mut doc = format!("---\ntitle: {title}\norder: {order}\n---\n{title}\n\nOverview of {title}.\n");
    for h in 0..5 {
        doc.push_str(&format!(
            "\n## Topic {h}\nNotes on topic {h} with *emphasis*, `code` and a [link](/x).\n\nMore words about apples and pears.\n"
        ));
    }
    doc
}
