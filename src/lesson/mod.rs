//! Lesson content: the static blocks a lesson view renders
//!
//! A lesson is a TOML file with a title and an ordered list of blocks. Only
//! `reveal` and `snippet` blocks are interactive; they get a [`WidgetId`]
//! from their `id` key, or from their position when the author left it out.
//!
//! ```toml
//! title = "Request and Response DTOs"
//!
//! [[blocks]]
//! kind = "reveal"
//! id = "q1"
//! question = "Why not return the entity?"
//! answer = "It leaks persistence concerns."
//!
//! [[blocks]]
//! kind = "snippet"
//! id = "dto"
//! language = "java"
//! code = "public record ShortenUrlRequest(String originalUrl) {}"
//! ```

mod bundled;

use crate::widgets::WidgetId;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

pub use bundled::URL_SHORTENER_DTO;

/// One lesson page
#[derive(Debug, Clone, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub summary: Option<String>,
    pub blocks: Vec<Block>,
}

/// A unit of lesson content
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Plain paragraph
    Prose { text: String },
    /// Simple grid, every row as wide as `headers`
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Question with a hidden answer
    Reveal {
        id: Option<String>,
        question: String,
        answer: String,
    },
    /// Copyable code
    Snippet {
        id: Option<String>,
        title: Option<String>,
        language: Option<String>,
        code: String,
    },
}

impl Block {
    /// Identifier of an interactive block at position `index`
    pub fn widget_id(&self, index: usize) -> Option<WidgetId> {
        match self {
            Block::Reveal { id, .. } | Block::Snippet { id, .. } => Some(
                id.as_ref()
                    .map(WidgetId::from)
                    .unwrap_or(WidgetId::Index(index)),
            ),
            Block::Prose { .. } | Block::Table { .. } => None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Block::Reveal { .. } | Block::Snippet { .. })
    }
}

impl Lesson {
    /// Parse and check a lesson from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let lesson: Lesson = toml::from_str(contents).context("Invalid lesson format")?;
        lesson.validate()?;
        Ok(lesson)
    }

    /// Load a lesson file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lesson {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// The lesson compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::from_toml(URL_SHORTENER_DTO).context("Bundled lesson is broken")
    }

    /// Positions of the blocks the reader can act on, in display order
    pub fn interactive_blocks(&self) -> Vec<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.is_interactive())
            .map(|(index, _)| index)
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.blocks.is_empty() {
            bail!("Lesson '{}' has no blocks", self.title);
        }

        let mut seen = HashSet::new();
        for (index, block) in self.blocks.iter().enumerate() {
            if let Some(id) = block.widget_id(index) {
                if !seen.insert(id.clone()) {
                    bail!("Duplicate block id '{}' (block {})", id, index);
                }
            }

            if let Block::Table { headers, rows } = block {
                if let Some(row) = rows.iter().position(|row| row.len() != headers.len()) {
                    bail!(
                        "Table in block {} has {} columns but row {} has {}",
                        index,
                        headers.len(),
                        row,
                        rows[row].len()
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_lesson_loads() {
        let lesson = Lesson::bundled().expect("bundled lesson should parse");
        assert_eq!(lesson.title, "Request and Response DTOs");

        let ids: Vec<WidgetId> = lesson
            .interactive_blocks()
            .into_iter()
            .filter_map(|i| lesson.blocks[i].widget_id(i))
            .collect();
        assert!(ids.contains(&WidgetId::from("dto")));
        assert!(ids.contains(&WidgetId::from("q1")));
    }

    #[test]
    fn test_missing_id_falls_back_to_index() {
        let lesson = Lesson::from_toml(
            r#"
title = "t"

[[blocks]]
kind = "prose"
text = "intro"

[[blocks]]
kind = "reveal"
question = "q?"
answer = "a"
"#,
        )
        .unwrap();

        assert_eq!(lesson.blocks[0].widget_id(0), None);
        assert_eq!(lesson.blocks[1].widget_id(1), Some(WidgetId::Index(1)));
        assert_eq!(lesson.interactive_blocks(), vec![1]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Lesson::from_toml(
            r#"
title = "t"

[[blocks]]
kind = "snippet"
id = "dto"
code = "a"

[[blocks]]
kind = "reveal"
id = "dto"
question = "q"
answer = "a"
"#,
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("Duplicate block id 'dto'"));
    }

    #[test]
    fn test_ragged_table_rejected() {
        let err = Lesson::from_toml(
            r#"
title = "t"

[[blocks]]
kind = "table"
headers = ["a", "b"]
rows = [["1", "2"], ["3"]]
"#,
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("row 1 has 1"));
    }

    #[test]
    fn test_empty_lesson_rejected() {
        assert!(Lesson::from_toml("title = \"t\"\nblocks = []\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "title = \"Entities\"\n\n[[blocks]]\nkind = \"snippet\"\nid = \"entity\"\ncode = \"@Entity class ShortUrl {{}}\"\n"
        )
        .unwrap();

        let lesson = Lesson::load(file.path()).unwrap();
        assert_eq!(
            lesson.blocks[0],
            Block::Snippet {
                id: Some("entity".to_string()),
                title: None,
                language: None,
                code: "@Entity class ShortUrl {}".to_string(),
            }
        );
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = Lesson::load(Path::new("/nonexistent/lesson.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/lesson.toml"));
    }
}
