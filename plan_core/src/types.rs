//! Core domain types for training plans.
//!
//! The model is a tree owned by value:
//! - A [`Plan`] owns an ordered list of [`Exercise`]s
//! - An [`Exercise`] owns an ordered list of logged [`Entry`]s
//!
//! Records never point back at their parent. Identities are random v4 UUIDs
//! wrapped in one newtype per record kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identity Types
// ============================================================================

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh identity
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

record_id!(
    /// Identity of a [`Plan`]
    PlanId
);
record_id!(
    /// Identity of an [`Exercise`]
    ExerciseId
);
record_id!(
    /// Identity of an [`Entry`]
    EntryId
);

// ============================================================================
// Validated Input
// ============================================================================

/// Planned targets for a new exercise, already validated
#[derive(Clone, Debug, PartialEq)]
pub struct NewExercise {
    pub name: String,
    pub planned_sets: u32,
    pub planned_reps: u32,
    pub planned_weight: f64,
}

/// Values for a new log entry, already validated
#[derive(Clone, Debug, PartialEq)]
pub struct NewEntry {
    pub set_number: u32,
    pub weight: f64,
    pub reps: u32,
}

// ============================================================================
// Records
// ============================================================================

/// One recorded performance of an exercise. Immutable once created.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    id: EntryId,
    set_number: u32,
    weight: f64,
    reps: u32,
    logged_at: DateTime<Utc>,
}

impl Entry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn set_number(&self) -> u32 {
        self.set_number
    }

    /// Weight used, in the configured unit
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    pub fn logged_at(&self) -> DateTime<Utc> {
        self.logged_at
    }
}

/// A named activity with planned targets and a log of entries
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    id: ExerciseId,
    name: String,
    planned_sets: u32,
    planned_reps: u32,
    planned_weight: f64,
    entries: Vec<Entry>,
}

impl Exercise {
    /// Create an exercise with no entries
    pub fn new(input: NewExercise) -> Self {
        Self {
            id: ExerciseId::new(),
            name: input.name,
            planned_sets: input.planned_sets,
            planned_reps: input.planned_reps,
            planned_weight: input.planned_weight,
            entries: Vec::new(),
        }
    }

    pub fn id(&self) -> ExerciseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn planned_sets(&self) -> u32 {
        self.planned_sets
    }

    pub fn planned_reps(&self) -> u32 {
        self.planned_reps
    }

    pub fn planned_weight(&self) -> f64 {
        self.planned_weight
    }

    /// Logged entries, oldest first
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Append an entry stamped with the current time
    pub fn log_entry(&mut self, input: NewEntry) -> EntryId {
        self.log_entry_at(input, Utc::now())
    }

    /// Append an entry with an explicit timestamp
    pub fn log_entry_at(&mut self, input: NewEntry, logged_at: DateTime<Utc>) -> EntryId {
        let entry = Entry {
            id: EntryId::new(),
            set_number: input.set_number,
            weight: input.weight,
            reps: input.reps,
            logged_at,
        };
        let id = entry.id;
        self.entries.push(entry);
        tracing::debug!("Logged entry {} for exercise {}", id, self.id);
        id
    }
}

/// A named, ordered collection of exercises
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    id: PlanId,
    name: String,
    exercises: Vec<Exercise>,
}

impl Plan {
    /// Create an empty plan. Any name is accepted, including "".
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlanId::new(),
            name: name.into(),
            exercises: Vec::new(),
        }
    }

    pub fn id(&self) -> PlanId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn exercise(&self, id: ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn exercise_mut(&mut self, id: ExerciseId) -> Option<&mut Exercise> {
        self.exercises.iter_mut().find(|e| e.id == id)
    }

    /// Append a new exercise with an empty log
    pub fn add_exercise(&mut self, input: NewExercise) -> ExerciseId {
        let exercise = Exercise::new(input);
        let id = exercise.id;
        tracing::debug!("Added exercise {} ({:?}) to plan {}", id, exercise.name, self.id);
        self.exercises.push(exercise);
        id
    }
}
