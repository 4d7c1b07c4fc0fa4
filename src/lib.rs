#![forbid(unsafe_code)]
//! Frameplan — planification de personnes sur des cadres d'événements.
//!
//! - Cadres datés propriétaires de leurs assignations.
//! - Statuts par jour (`Mixed`) plutôt qu'un statut unique par plage.
//! - Détection de doubles réservations, à titre d'avertissement.
//! - Snapshot JSON à plat pour la persistance.

pub mod migration;
pub mod model;
pub mod ranges;
pub mod scheduler;
pub mod snapshot;
pub mod storage;
pub mod summary;

pub use migration::{migrate_legacy, migrate_legacy_files, validate_snapshot};
pub use model::{
    Assignment, AssignmentId, AssignmentStatus, DailyStatuses, EventFrame, EventFrameId,
    NewAssignment, NewEventFrame, NewPersonGroup, PersonGroup, PersonGroupId, Schedule,
};
pub use ranges::{format_date_dmy, format_date_ranges, format_span_dmy};
pub use scheduler::{
    CheckScope, Conflict, ConflictReport, MutationOutcome, SchedError, Scheduler, StoreOptions,
    UpdateContext,
};
pub use snapshot::{ImportReport, Snapshot};
pub use storage::{JsonStorage, Storage};
pub use summary::{status_summary, status_summary_with, CatalanLabels, StatusLabels, WireLabels};
