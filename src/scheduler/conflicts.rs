use super::{CheckScope, Conflict, ConflictReport, Scheduler};
use crate::model::{Assignment, AssignmentStatus, Schedule};
use chrono::NaiveDate;

/// `existing` occupe-t-elle la personne le jour `date` ?
///
/// Un jour `Mixed` sans surcharge n'occupe pas.
fn occupies(existing: &Assignment, date: NaiveDate) -> bool {
    if !existing.covers(date) {
        return false;
    }
    match existing.status {
        AssignmentStatus::Yes | AssignmentStatus::Pending => true,
        AssignmentStatus::Mixed => override_on(existing, date)
            .is_some_and(|status| status != AssignmentStatus::No),
        AssignmentStatus::No => false,
    }
}

/// Statut que la candidate réclame pour `date` ; `None` si elle ne l'occupe pas.
fn candidate_status_on(candidate: &Assignment, date: NaiveDate) -> Option<AssignmentStatus> {
    let status = match candidate.status {
        AssignmentStatus::Mixed => override_on(candidate, date)?,
        blanket => blanket,
    };
    (status != AssignmentStatus::No).then_some(status)
}

fn override_on(assignment: &Assignment, date: NaiveDate) -> Option<AssignmentStatus> {
    assignment
        .daily_statuses
        .as_ref()
        .and_then(|daily| daily.get(&date).copied())
}

pub(super) fn detect_for(
    schedule: &Schedule,
    candidate: &Assignment,
    scope: CheckScope,
) -> Option<ConflictReport> {
    if candidate.status == AssignmentStatus::No {
        return None;
    }

    let others: Vec<&Assignment> = schedule
        .assignments()
        .filter(|a| a.person_group_id == candidate.person_group_id && a.id != candidate.id)
        .collect();
    if others.is_empty() {
        return None;
    }

    let dates: Vec<NaiveDate> = match scope {
        CheckScope::FullSpan => candidate.days().collect(),
        CheckScope::SingleDate(date) => vec![date],
    };

    dates
        .into_iter()
        .filter(|date| candidate_status_on(candidate, *date).is_some())
        .find_map(|date| {
            let conflicts: Vec<Conflict> = others
                .iter()
                .filter(|existing| occupies(existing, date))
                .map(|existing| Conflict {
                    event_frame: existing.event_frame_id.clone(),
                    event_frame_name: schedule
                        .find_event_frame(&existing.event_frame_id)
                        .map(|ef| ef.name.clone())
                        .unwrap_or_else(|| existing.event_frame_id.as_str().to_string()),
                    assignment: existing.id.clone(),
                })
                .collect();
            (!conflicts.is_empty()).then(|| ConflictReport {
                person: candidate.person_group_id.clone(),
                date,
                conflicts,
            })
        })
}

pub(super) fn audit(scheduler: &Scheduler) -> Vec<ConflictReport> {
    let schedule = &scheduler.schedule;
    let out: Vec<ConflictReport> = schedule
        .assignments()
        .filter_map(|a| detect_for(schedule, a, CheckScope::FullSpan))
        .collect();

    #[cfg(feature = "logging")]
    for report in &out {
        tracing::debug!(
            person = %report.person,
            date = %report.date,
            frames = report.conflicts.len(),
            "double booking"
        );
    }

    out
}
