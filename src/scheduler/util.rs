use crate::model::{Assignment, AssignmentId, EventFrame, EventFrameId, PersonGroup};
use chrono::NaiveDate;

pub(crate) fn sort_event_frames(frames: &mut [EventFrame]) {
    frames.sort_by(|a, b| {
        b.start_date
            .cmp(&a.start_date)
            .then_with(|| a.name.cmp(&b.name))
    });
}

pub(crate) fn sort_people_groups(people: &mut [PersonGroup]) {
    people.sort_by(|a, b| a.name.cmp(&b.name));
}

pub(crate) fn sort_assignments(assignments: &mut [Assignment]) {
    assignments.sort_by_key(|a| a.start_date);
}

pub(crate) fn valid_span(start: NaiveDate, end: NaiveDate) -> bool {
    start <= end
}

pub(crate) fn find_frame_index(frames: &[EventFrame], id: &EventFrameId) -> Option<usize> {
    frames.iter().position(|ef| &ef.id == id)
}

pub(crate) fn find_assignment_index(
    assignments: &[Assignment],
    id: &AssignmentId,
) -> Option<usize> {
    assignments.iter().position(|a| &a.id == id)
}
