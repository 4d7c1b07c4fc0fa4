use super::{util, SchedError, Scheduler};
use crate::model::{
    EventFrame, EventFrameId, NewEventFrame, NewPersonGroup, PersonGroup, PersonGroupId,
};

pub(super) fn add_event_frame(
    scheduler: &mut Scheduler,
    data: NewEventFrame,
) -> Result<EventFrame, SchedError> {
    if !util::valid_span(data.start_date, data.end_date) {
        return Err(SchedError::InvalidDateRange);
    }

    let frame = EventFrame {
        id: EventFrameId::random(),
        name: data.name,
        place: data.place,
        start_date: data.start_date,
        end_date: data.end_date,
        general_notes: data.general_notes,
        personnel_complete: false,
        google_event_id: None,
        google_calendar_id: None,
        last_modified: None,
        last_sync: None,
        tech_sheet: None,
        assignments: Vec::new(),
    };

    scheduler.schedule.event_frames.push(frame.clone());
    util::sort_event_frames(&mut scheduler.schedule.event_frames);

    #[cfg(feature = "logging")]
    tracing::debug!(frame = %frame.id, name = %frame.name, "event frame added");

    Ok(frame)
}

/// Remplace l'enregistrement du cadre ; ses assignations restent en place.
pub(super) fn update_event_frame(
    scheduler: &mut Scheduler,
    mut record: EventFrame,
) -> Result<(), SchedError> {
    if !util::valid_span(record.start_date, record.end_date) {
        return Err(SchedError::InvalidDateRange);
    }
    let Some(pos) = util::find_frame_index(&scheduler.schedule.event_frames, &record.id) else {
        return Err(SchedError::UnknownEventFrame(record.id));
    };

    let frames = &mut scheduler.schedule.event_frames;
    record.assignments = std::mem::take(&mut frames[pos].assignments);
    frames[pos] = record;
    util::sort_event_frames(frames);
    Ok(())
}

pub(super) fn delete_event_frame(
    scheduler: &mut Scheduler,
    id: &EventFrameId,
) -> Option<EventFrame> {
    let pos = util::find_frame_index(&scheduler.schedule.event_frames, id)?;
    let removed = scheduler.schedule.event_frames.remove(pos);

    #[cfg(feature = "logging")]
    tracing::debug!(
        frame = %removed.id,
        assignments = removed.assignments.len(),
        "event frame deleted"
    );

    Some(removed)
}

pub(super) fn set_personnel_complete(
    scheduler: &mut Scheduler,
    id: &EventFrameId,
    complete: bool,
) -> Result<(), SchedError> {
    let frame = scheduler
        .schedule
        .find_event_frame_mut(id)
        .ok_or_else(|| SchedError::UnknownEventFrame(id.clone()))?;
    frame.personnel_complete = complete;
    Ok(())
}

pub(super) fn add_person_group(scheduler: &mut Scheduler, data: NewPersonGroup) -> PersonGroup {
    let person = PersonGroup {
        id: PersonGroupId::random(),
        name: data.name,
        role: data.role,
        tel1: data.tel1,
        tel2: data.tel2,
        email: data.email,
        web: data.web,
        notes: data.notes,
    };
    scheduler.schedule.people_groups.push(person.clone());
    util::sort_people_groups(&mut scheduler.schedule.people_groups);
    person
}

pub(super) fn update_person_group(
    scheduler: &mut Scheduler,
    record: PersonGroup,
) -> Result<(), SchedError> {
    let people = &mut scheduler.schedule.people_groups;
    let Some(slot) = people.iter_mut().find(|p| p.id == record.id) else {
        return Err(SchedError::UnknownPersonGroup(record.id));
    };
    *slot = record;
    util::sort_people_groups(people);
    Ok(())
}

/// Supprime la personne et toutes ses assignations, quel que soit le cadre.
pub(super) fn delete_person_group(
    scheduler: &mut Scheduler,
    id: &PersonGroupId,
) -> Option<PersonGroup> {
    let people = &mut scheduler.schedule.people_groups;
    let removed = people
        .iter()
        .position(|p| &p.id == id)
        .map(|pos| people.remove(pos));

    #[cfg(feature = "logging")]
    let before = scheduler.schedule.assignments().count();

    for frame in scheduler.schedule.event_frames.iter_mut() {
        frame.assignments.retain(|a| &a.person_group_id != id);
    }

    #[cfg(feature = "logging")]
    tracing::debug!(
        person = %id,
        assignments = before - scheduler.schedule.assignments().count(),
        "person group deleted"
    );

    removed
}
