//! Migration de l'ancien format (trois fichiers, ids numériques) et
//! validation d'un snapshot.

use crate::model::{
    Assignment, AssignmentId, AssignmentStatus, EventFrame, EventFrameId, PersonGroup,
    PersonGroupId,
};
use crate::snapshot::Snapshot;
use anyhow::Context;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Ancien `people.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyPeople {
    #[serde(default)]
    pub people: Vec<LegacyPerson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPerson {
    pub id: i64,
    pub name: String,
    pub role: Option<String>,
    pub tel1: Option<String>,
    pub tel2: Option<String>,
    pub email: Option<String>,
    pub web: Option<String>,
    pub notes: Option<String>,
}

/// Ancien `events.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEvents {
    #[serde(default)]
    pub event_frames: Vec<LegacyEventFrame>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEventFrame {
    pub id: i64,
    pub event_name: String,
    pub location: Option<String>,
    pub general_start_date: NaiveDate,
    pub general_end_date: Option<NaiveDate>,
    pub notes_general: Option<String>,
    pub is_personnel_complete: Option<bool>,
}

/// Ancien `assignments.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyAssignments {
    #[serde(default)]
    pub assignments: Vec<LegacyAssignment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAssignment {
    pub id: i64,
    pub event_frame_id: i64,
    pub person_id: i64,
    pub assignment_start_date: NaiveDate,
    pub assignment_end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub notes_assignment: Option<String>,
}

/// Convertit les trois documents hérités en snapshot courant.
pub fn migrate_legacy(
    people: LegacyPeople,
    events: LegacyEvents,
    assignments: LegacyAssignments,
) -> Snapshot {
    let people_groups = people
        .people
        .into_iter()
        .map(|p| PersonGroup {
            id: PersonGroupId::new(p.id.to_string()),
            name: p.name,
            role: p.role.unwrap_or_default(),
            tel1: p.tel1.unwrap_or_default(),
            tel2: p.tel2.unwrap_or_default(),
            email: p.email.unwrap_or_default(),
            web: p.web.unwrap_or_default(),
            notes: p.notes.unwrap_or_default(),
        })
        .collect();

    let event_frames = events
        .event_frames
        .into_iter()
        .map(|e| EventFrame {
            id: EventFrameId::new(e.id.to_string()),
            name: e.event_name,
            place: e.location.unwrap_or_default(),
            start_date: e.general_start_date,
            end_date: e.general_end_date.unwrap_or(e.general_start_date),
            general_notes: e.notes_general.unwrap_or_default(),
            personnel_complete: e.is_personnel_complete.unwrap_or(false),
            google_event_id: None,
            google_calendar_id: None,
            last_modified: None,
            last_sync: None,
            tech_sheet: None,
            assignments: Vec::new(),
        })
        .collect();

    let assignments = assignments
        .assignments
        .into_iter()
        .map(|a| Assignment {
            id: AssignmentId::new(a.id.to_string()),
            person_group_id: PersonGroupId::new(a.person_id.to_string()),
            event_frame_id: EventFrameId::new(a.event_frame_id.to_string()),
            start_date: a.assignment_start_date,
            end_date: a.assignment_end_date.unwrap_or(a.assignment_start_date),
            status: legacy_status(a.status.as_deref()),
            notes: a.notes_assignment.unwrap_or_default(),
            daily_statuses: None,
        })
        .collect();

    Snapshot {
        people_groups,
        event_frames,
        assignments,
    }
}

fn legacy_status(raw: Option<&str>) -> AssignmentStatus {
    match raw.map(str::trim) {
        Some("Sí") | Some("Si") | Some("Yes") => AssignmentStatus::Yes,
        Some("No") => AssignmentStatus::No,
        _ => AssignmentStatus::Pending,
    }
}

/// Lit les trois fichiers hérités ; un fichier absent compte comme vide.
pub fn migrate_legacy_files<P: AsRef<Path>>(
    people: Option<P>,
    events: Option<P>,
    assignments: Option<P>,
) -> anyhow::Result<Snapshot> {
    let people: LegacyPeople = read_optional(people)?;
    let events: LegacyEvents = read_optional(events)?;
    let assignments: LegacyAssignments = read_optional(assignments)?;
    Ok(migrate_legacy(people, events, assignments))
}

fn read_optional<T, P>(path: Option<P>) -> anyhow::Result<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let Some(path) = path else {
        return Ok(T::default());
    };
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))
}

/// Liste les références pendantes et les plages inversées d'un snapshot.
pub fn validate_snapshot(doc: &Snapshot) -> Vec<String> {
    let mut errors = Vec::new();
    let frames: HashSet<&EventFrameId> = doc.event_frames.iter().map(|e| &e.id).collect();
    let people: HashSet<&PersonGroupId> = doc.people_groups.iter().map(|p| &p.id).collect();

    for a in &doc.assignments {
        if !frames.contains(&a.event_frame_id) {
            errors.push(format!(
                "assignment {} references a missing event frame: {}",
                a.id, a.event_frame_id
            ));
        }
        if !people.contains(&a.person_group_id) {
            errors.push(format!(
                "assignment {} references a missing person: {}",
                a.id, a.person_group_id
            ));
        }
        if a.end_date < a.start_date {
            errors.push(format!("assignment {} ends before it starts", a.id));
        }
    }

    for e in &doc.event_frames {
        if e.end_date < e.start_date {
            errors.push(format!("event frame {} ends before it starts", e.id));
        }
    }

    errors
}
