// 💾 Persistence Adapter - load/save boundary to the backing text file
//
// The on-disk format is a JavaScript literal so the file can be consumed
// directly by a static leaderboard page:
//
//   const teachers = [
//     { "name": "Hafeeza", "absences": 0 },
//     ...
//   ];
//
// The loader only cares about the array between the first '[' and the
// last ']', so surrounding text is tolerated. A missing or unparseable
// file is never an error - the built-in default roster is used instead.

use crate::roster::Teacher;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default backing file, resolved against the working directory
pub const DEFAULT_DATA_FILE: &str = "leaderboard-data.js";

/// Names seeded into a fresh roster (all with zero absences)
const DEFAULT_NAMES: [&str; 16] = [
    "Hafeeza", "Krishna", "Seema", "Amjadh", "Vinoth", "Abraham", "Anthony", "Sumathi", "Azima",
    "Hamzath", "Sareena", "Haritha", "Raeshma", "Sanika", "Sudhesh", "Adhu",
];

/// The built-in fallback roster: 16 named records, zero absences each
pub fn default_teachers() -> Vec<Teacher> {
    DEFAULT_NAMES.into_iter().map(Teacher::new).collect()
}

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Narrow load/save interface so the roster logic can be exercised
/// without touching the real filesystem.
pub trait RosterStore {
    /// Load the roster, substituting the default list when the backing
    /// data is missing or malformed.
    fn load(&self) -> Vec<Teacher>;

    /// Overwrite the backing data with the full roster.
    fn save(&mut self, teachers: &[Teacher]) -> Result<()>;
}

// ============================================================================
// DOCUMENT FORMAT
// ============================================================================

/// Extract and parse the JSON array embedded in the document text.
/// Returns None when no array is found or it fails to parse.
fn parse_document(content: &str) -> Option<Vec<Teacher>> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    if end < start {
        return None;
    }

    serde_json::from_str(&content[start..=end]).ok()
}

/// Render the full document: JS prefix + pretty-printed JSON array
fn render_document(teachers: &[Teacher]) -> Result<String> {
    let json = serde_json::to_string_pretty(teachers)
        .context("Failed to serialize teacher records")?;

    Ok(format!("const teachers = {};", json))
}

// ============================================================================
// FILE STORE
// ============================================================================

/// Store backed by a real file on disk
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterStore for FileStore {
    fn load(&self) -> Vec<Teacher> {
        match fs::read_to_string(&self.path) {
            Ok(content) => parse_document(&content).unwrap_or_else(default_teachers),
            Err(_) => default_teachers(),
        }
    }

    fn save(&mut self, teachers: &[Teacher]) -> Result<()> {
        let document = render_document(teachers)?;

        // Unconditional overwrite, no atomic rename
        fs::write(&self.path, document)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// In-memory stand-in for tests. Holds the rendered document text, so a
/// round trip goes through the same parse/render path as the file store.
#[derive(Default)]
pub struct MemoryStore {
    document: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Pre-seed the store with raw document text
    pub fn with_document(document: impl Into<String>) -> Self {
        MemoryStore {
            document: Some(document.into()),
        }
    }

    /// Raw document text, as a file would contain it
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

impl RosterStore for MemoryStore {
    fn load(&self) -> Vec<Teacher> {
        self.document
            .as_deref()
            .and_then(parse_document)
            .unwrap_or_else(default_teachers)
    }

    fn save(&mut self, teachers: &[Teacher]) -> Result<()> {
        self.document = Some(render_document(teachers)?);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;
    use std::collections::HashSet;

    #[test]
    fn test_default_roster_shape() {
        let teachers = default_teachers();

        assert_eq!(teachers.len(), 16, "Default roster must have 16 entries");
        for teacher in &teachers {
            assert_eq!(teacher.absences, 0);
        }

        let names: Vec<&str> = teachers.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"Hafeeza"));
        assert!(names.contains(&"Adhu"));
    }

    #[test]
    fn test_parse_document_with_surrounding_text() {
        let content = r#"// generated file - do not edit
const teachers = [
  { "name": "Hafeeza", "absences": 3 },
  { "name": "Krishna", "absences": 0 }
];
// trailing comment"#;

        let teachers = parse_document(content).unwrap();
        assert_eq!(teachers.len(), 2);
        assert_eq!(teachers[0].name, "Hafeeza");
        assert_eq!(teachers[0].absences, 3);
    }

    #[test]
    fn test_parse_document_rejects_garbage() {
        assert!(parse_document("").is_none());
        assert!(parse_document("no array here").is_none());
        assert!(parse_document("const teachers = [not json];").is_none());
        // ']' before '[' - brackets present but no array between them
        assert!(parse_document("] backwards [").is_none());
    }

    #[test]
    fn test_parse_document_rejects_negative_absences() {
        // u32 deserialization fails on a negative count, so the loader
        // falls back to defaults rather than admitting a bad record
        let content = r#"const teachers = [{ "name": "X", "absences": -1 }];"#;
        assert!(parse_document(content).is_none());
    }

    #[test]
    fn test_memory_store_defaults_when_empty() {
        let store = MemoryStore::new();

        let teachers = store.load();
        assert_eq!(teachers.len(), 16);
    }

    #[test]
    fn test_memory_store_defaults_on_corrupt_document() {
        let store = MemoryStore::with_document("const teachers = oops;");

        let teachers = store.load();
        assert_eq!(teachers.len(), 16, "Corrupt document should fall back");
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let mut roster = Roster::new(store.load());

        roster.increment("Hafeeza");
        roster.increment("Hafeeza");
        roster.add("NewTeacher").unwrap();

        store.save(roster.records()).unwrap();

        // Document carries the JS wrapper
        let document = store.document().unwrap();
        assert!(document.starts_with("const teachers = ["));
        assert!(document.ends_with("];"));

        // Reload reproduces the same {name, absences} set
        let reloaded = store.load();
        let before: HashSet<(String, u32)> = roster
            .records()
            .iter()
            .map(|t| (t.name.clone(), t.absences))
            .collect();
        let after: HashSet<(String, u32)> = reloaded
            .iter()
            .map(|t| (t.name.clone(), t.absences))
            .collect();

        assert_eq!(before, after, "Round trip must preserve all records");
    }

    #[test]
    fn test_file_store_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!(
            "absence-tracker-missing-{}.js",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let store = FileStore::new(&path);
        let teachers = store.load();

        assert_eq!(teachers.len(), 16);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "absence-tracker-roundtrip-{}.js",
            std::process::id()
        ));

        let mut store = FileStore::new(&path);
        let mut roster = Roster::new(default_teachers());
        roster.increment("Krishna");

        store.save(roster.records()).unwrap();
        let reloaded = store.load();

        assert_eq!(reloaded.len(), 16);
        let krishna = reloaded.iter().find(|t| t.name == "Krishna").unwrap();
        assert_eq!(krishna.absences, 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let mut store = MemoryStore::new();
        let mut roster = Roster::new(default_teachers());

        store.save(roster.records()).unwrap();
        let first = store.document().unwrap().to_string();

        roster.increment("Seema");
        store.save(roster.records()).unwrap();
        let second = store.document().unwrap();

        assert_ne!(first, second, "Save must replace the whole document");
    }
}
