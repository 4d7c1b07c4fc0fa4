//! Forme à plat, sérialisable, de l'arbre cadres → assignations.

use crate::model::{
    Assignment, AssignmentId, AssignmentStatus, EventFrame, PersonGroup, Schedule,
};
use crate::scheduler::util;
use serde::{Deserialize, Deserializer, Serialize};

/// Document d'échange : seul format durable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub people_groups: Vec<PersonGroup>,
    /// Enregistrements des cadres, sans leurs assignations.
    #[serde(default)]
    pub event_frames: Vec<EventFrame>,
    #[serde(default, deserialize_with = "stored_assignments")]
    pub assignments: Vec<Assignment>,
}

/// Assignation telle qu'écrite par les anciennes versions, qui marquaient
/// les plages journalières par `isMixedStatus` au lieu du statut `Mixed`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAssignment {
    #[serde(flatten)]
    assignment: Assignment,
    #[serde(default)]
    is_mixed_status: Option<bool>,
}

impl From<StoredAssignment> for Assignment {
    fn from(stored: StoredAssignment) -> Self {
        let mut assignment = stored.assignment;
        if stored.is_mixed_status == Some(true) {
            assignment.status = AssignmentStatus::Mixed;
        }
        assignment
    }
}

fn stored_assignments<'de, D>(deserializer: D) -> Result<Vec<Assignment>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Vec::<StoredAssignment>::deserialize(deserializer)?;
    Ok(stored.into_iter().map(Assignment::from).collect())
}

/// Bilan d'un import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Assignations ignorées car leur `eventFrameId` n'existe pas.
    pub dropped: Vec<AssignmentId>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

pub(crate) fn export(schedule: &Schedule) -> Snapshot {
    let assignments = schedule.assignments().cloned().collect();
    let event_frames = schedule
        .event_frames
        .iter()
        .map(|ef| EventFrame {
            assignments: Vec::new(),
            ..ef.clone()
        })
        .collect();

    Snapshot {
        people_groups: schedule.people_groups.clone(),
        event_frames,
        assignments,
    }
}

pub(crate) fn import(doc: Option<Snapshot>) -> (Schedule, ImportReport) {
    let mut report = ImportReport::default();
    let Some(doc) = doc else {
        return (Schedule::default(), report);
    };

    let mut frames: Vec<EventFrame> = doc
        .event_frames
        .into_iter()
        .map(|mut ef| {
            ef.assignments.clear();
            ef
        })
        .collect();

    for mut assignment in doc.assignments {
        let Some(frame) = frames
            .iter_mut()
            .find(|ef| ef.id == assignment.event_frame_id)
        else {
            #[cfg(feature = "logging")]
            tracing::warn!(
                assignment = %assignment.id,
                frame = %assignment.event_frame_id,
                "assignment references a missing event frame, skipped"
            );
            report.dropped.push(assignment.id);
            continue;
        };
        if assignment.status != AssignmentStatus::Mixed {
            assignment.daily_statuses = None;
        }
        frame.assignments.push(assignment);
    }

    for frame in frames.iter_mut() {
        util::sort_assignments(&mut frame.assignments);
    }
    util::sort_event_frames(&mut frames);

    let mut people_groups = doc.people_groups;
    util::sort_people_groups(&mut people_groups);

    (
        Schedule {
            people_groups,
            event_frames: frames,
        },
        report,
    )
}
