use crate::model::{AssignmentId, AssignmentStatus, EventFrameId, PersonGroupId};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Options du store
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    /// Refuse une assignation qui déborde de l'étendue de son cadre.
    pub enforce_frame_bounds: bool,
}

/// Contexte d'une mise à jour d'assignation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateContext {
    /// Jour dont la surcharge vient de changer : seul ce jour est vérifié.
    pub changed_date: Option<NaiveDate>,
}

impl UpdateContext {
    pub fn full_range() -> Self {
        Self::default()
    }
    pub fn single_date(date: NaiveDate) -> Self {
        Self {
            changed_date: Some(date),
        }
    }
}

/// Jours à contrôler pour une candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckScope {
    FullSpan,
    SingleDate(NaiveDate),
}

impl From<UpdateContext> for CheckScope {
    fn from(ctx: UpdateContext) -> Self {
        ctx.changed_date.map_or(Self::FullSpan, Self::SingleDate)
    }
}

/// Une assignation existante qui occupe déjà la personne.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub event_frame: EventFrameId,
    pub event_frame_name: String,
    pub assignment: AssignmentId,
}

/// Premier jour en conflit et toutes les assignations qui l'occupent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport {
    pub person: PersonGroupId,
    pub date: NaiveDate,
    pub conflicts: Vec<Conflict>,
}

impl ConflictReport {
    pub fn message(&self) -> String {
        let details = self
            .conflicts
            .iter()
            .map(|c| format!("\"{}\" on {}", c.event_frame_name, self.date))
            .collect::<Vec<_>>()
            .join(", ");
        format!("conflict detected: person already assigned to {details}")
    }
}

/// Résultat d'une mutation d'assignation.
///
/// `message` signale un échec (rien n'est appliqué), `warning_message` une
/// mutation appliquée accompagnée d'un avertissement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<AssignmentId>,
}

impl MutationOutcome {
    pub fn applied(assignment_id: AssignmentId, warning: Option<String>) -> Self {
        Self {
            success: true,
            message: None,
            warning_message: warning,
            assignment_id: Some(assignment_id),
        }
    }

    pub fn failed<S: Into<String>>(message: S) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            warning_message: None,
            assignment_id: None,
        }
    }
}

impl From<SchedError> for MutationOutcome {
    fn from(err: SchedError) -> Self {
        Self::failed(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    #[error("invalid date range: end must not be before start")]
    InvalidDateRange,
    #[error("frame not found")]
    UnknownEventFrame(EventFrameId),
    #[error("person not found: {0}")]
    UnknownPersonGroup(PersonGroupId),
    #[error("assignment not found: {0}")]
    UnknownAssignment(AssignmentId),
    #[error("assignment dates must fall within the event frame ({start} to {end})")]
    OutsideEventFrame { start: NaiveDate, end: NaiveDate },
    #[error("invalid daily status: {0}")]
    InvalidDailyStatus(AssignmentStatus),
    #[error("date {0} is outside the assignment span")]
    DateOutsideAssignment(NaiveDate),
}
