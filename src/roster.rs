// 🧑‍🏫 Roster - In-memory teacher absence records
// Ordered collection of {name, absences} pairs, unique by name
// (case-insensitive). Records are never deleted, only added and mutated.

use serde::{Deserialize, Serialize};

// ============================================================================
// TEACHER RECORD
// ============================================================================

/// A single teacher record: name plus running absence count.
///
/// `absences` is `u32`, so the "never below zero" invariant holds by
/// construction; `decrement` is responsible for the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub name: String,
    pub absences: u32,
}

impl Teacher {
    /// Create a fresh record with zero absences
    pub fn new(name: impl Into<String>) -> Self {
        Teacher {
            name: name.into(),
            absences: 0,
        }
    }
}

// ============================================================================
// ROSTER
// ============================================================================

/// The full ordered collection of teacher records.
///
/// Storage order is insertion order (load order, then appends); the
/// display order comes from `sorted_view()`. Name uniqueness is enforced
/// case-insensitively at `add` time only. Lookups used by increment and
/// decrement are exact, case-sensitive matches - deliberately preserved
/// asymmetry, see DESIGN.md.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    teachers: Vec<Teacher>,
}

impl Roster {
    /// Build a roster from loaded records
    pub fn new(teachers: Vec<Teacher>) -> Self {
        Roster { teachers }
    }

    /// Records in storage order
    pub fn records(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn len(&self) -> usize {
        self.teachers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty()
    }

    /// Find a record by exact name
    pub fn get(&self, name: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.name == name)
    }

    /// Increment the absence count of the first record whose name matches
    /// exactly. Returns false when no record matches.
    pub fn increment(&mut self, name: &str) -> bool {
        match self.teachers.iter_mut().find(|t| t.name == name) {
            Some(teacher) => {
                teacher.absences += 1;
                true
            }
            None => false,
        }
    }

    /// Decrement the absence count of the first record whose name matches
    /// exactly, flooring at zero. A record already at zero is left
    /// unchanged (still reported as found). Returns false when no record
    /// matches.
    pub fn decrement(&mut self, name: &str) -> bool {
        match self.teachers.iter_mut().find(|t| t.name == name) {
            Some(teacher) => {
                if teacher.absences > 0 {
                    teacher.absences -= 1;
                }
                true
            }
            None => false,
        }
    }

    /// Set every record's absence count back to zero
    pub fn reset_all(&mut self) {
        for teacher in &mut self.teachers {
            teacher.absences = 0;
        }
    }

    /// Append a new record with zero absences.
    ///
    /// Rejected when a record with the same name (ignoring case) already
    /// exists; the roster is left unchanged in that case.
    pub fn add(&mut self, name: &str) -> Result<(), String> {
        let exists = self
            .teachers
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name));

        if exists {
            return Err(format!("Teacher '{}' already exists!", name));
        }

        self.teachers.push(Teacher::new(name));
        Ok(())
    }

    /// Records sorted descending by absence count, for display.
    ///
    /// The sort is stable, so records with equal counts keep their
    /// storage order relative to each other.
    pub fn sorted_view(&self) -> Vec<Teacher> {
        let mut view = self.teachers.clone();
        view.sort_by(|a, b| b.absences.cmp(&a.absences));
        view
    }
}

// ============================================================================
// TESTS
// ============================================================================
