mod assignment;
mod conflicts;
mod frames;
mod mutate;
mod types;
pub(crate) mod util;

pub use types::{
    CheckScope, Conflict, ConflictReport, MutationOutcome, SchedError, StoreOptions,
    UpdateContext,
};

use crate::model::{
    Assignment, AssignmentId, AssignmentStatus, EventFrame, EventFrameId, NewAssignment,
    NewEventFrame, NewPersonGroup, PersonGroup, PersonGroupId, Schedule,
};
use crate::snapshot::{self, ImportReport, Snapshot};
use chrono::NaiveDate;

/// Scheduler : état autoritaire en mémoire (cadres, assignations, personnes).
///
/// Chaque mutation s'exécute entièrement avant de rendre la main ; une
/// mutation refusée laisse l'état intact.
#[derive(Debug, Default)]
pub struct Scheduler {
    schedule: Schedule,
    opts: StoreOptions,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(opts: StoreOptions) -> Self {
        Self {
            schedule: Schedule::default(),
            opts,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn event_frames(&self) -> &[EventFrame] {
        &self.schedule.event_frames
    }
    pub fn people_groups(&self) -> &[PersonGroup] {
        &self.schedule.people_groups
    }

    pub fn event_frame(&self, id: &EventFrameId) -> Option<&EventFrame> {
        self.schedule.find_event_frame(id)
    }
    pub fn person_group(&self, id: &PersonGroupId) -> Option<&PersonGroup> {
        self.schedule.find_person_group(id)
    }
    pub fn assignment(&self, frame: &EventFrameId, id: &AssignmentId) -> Option<&Assignment> {
        self.event_frame(frame)?.find_assignment(id)
    }
    pub fn assignments_for_person<'a>(
        &'a self,
        person: &'a PersonGroupId,
    ) -> impl Iterator<Item = &'a Assignment> + 'a {
        self.schedule
            .assignments()
            .filter(move |a| &a.person_group_id == person)
    }

    pub fn add_event_frame(&mut self, data: NewEventFrame) -> Result<EventFrame, SchedError> {
        frames::add_event_frame(self, data)
    }

    pub fn update_event_frame(&mut self, record: EventFrame) -> Result<(), SchedError> {
        frames::update_event_frame(self, record)
    }

    pub fn delete_event_frame(&mut self, id: &EventFrameId) -> Option<EventFrame> {
        frames::delete_event_frame(self, id)
    }

    pub fn set_personnel_complete(
        &mut self,
        id: &EventFrameId,
        complete: bool,
    ) -> Result<(), SchedError> {
        frames::set_personnel_complete(self, id, complete)
    }

    pub fn add_person_group(&mut self, data: NewPersonGroup) -> PersonGroup {
        frames::add_person_group(self, data)
    }

    pub fn update_person_group(&mut self, record: PersonGroup) -> Result<(), SchedError> {
        frames::update_person_group(self, record)
    }

    pub fn delete_person_group(&mut self, id: &PersonGroupId) -> Option<PersonGroup> {
        frames::delete_person_group(self, id)
    }

    pub fn add_assignment(&mut self, frame: &EventFrameId, data: NewAssignment) -> MutationOutcome {
        assignment::add_assignment(self, frame, data)
    }

    pub fn update_assignment(&mut self, record: Assignment, ctx: UpdateContext) -> MutationOutcome {
        assignment::update_assignment(self, record, ctx)
    }

    pub fn delete_assignment(
        &mut self,
        frame: &EventFrameId,
        id: &AssignmentId,
    ) -> Option<Assignment> {
        assignment::delete_assignment(self, frame, id)
    }

    /// Change le statut global ; les surcharges journalières disparaissent.
    pub fn set_assignment_status(
        &mut self,
        frame: &EventFrameId,
        id: &AssignmentId,
        status: AssignmentStatus,
    ) -> MutationOutcome {
        mutate::set_assignment_status(self, frame, id, status)
    }

    /// Surcharge le statut d'un seul jour ; l'assignation passe en `Mixed`.
    pub fn set_daily_status(
        &mut self,
        frame: &EventFrameId,
        id: &AssignmentId,
        date: NaiveDate,
        status: AssignmentStatus,
    ) -> MutationOutcome {
        mutate::set_daily_status(self, frame, id, date, status)
    }

    /// Conflits qu'introduirait `candidate` (sans rien modifier).
    pub fn check_conflicts(
        &self,
        candidate: &Assignment,
        scope: CheckScope,
    ) -> Option<ConflictReport> {
        conflicts::detect_for(&self.schedule, candidate, scope)
    }

    /// Détecte les doubles réservations sur tout le planning courant.
    pub fn audit_conflicts(&self) -> Vec<ConflictReport> {
        conflicts::audit(self)
    }

    pub fn export_snapshot(&self) -> Snapshot {
        snapshot::export(&self.schedule)
    }

    /// Reconstruit l'arbre depuis un snapshot ; `None` vide le store.
    pub fn import_snapshot(&mut self, doc: Option<Snapshot>) -> ImportReport {
        let (schedule, report) = snapshot::import(doc);
        self.schedule = schedule;
        report
    }
}
