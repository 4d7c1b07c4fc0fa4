#![forbid(unsafe_code)]
use chrono::NaiveDate;
use frameplan::{
    Assignment, AssignmentId, AssignmentStatus, CheckScope, DailyStatuses, EventFrameId,
    NewAssignment, NewEventFrame, NewPersonGroup, PersonGroupId, Scheduler, StoreOptions,
    UpdateContext,
};

#[test]
fn overlapping_pending_assignment_warns_but_commits() {
    let (mut s, person, a, b) = two_frames();

    let first = s.add_assignment(
        &a,
        assign(&person, "2025-05-10", "2025-05-12", AssignmentStatus::Yes),
    );
    assert!(first.success);
    assert!(first.warning_message.is_none());

    let second = s.add_assignment(
        &b,
        assign(&person, "2025-05-11", "2025-05-13", AssignmentStatus::Pending),
    );
    assert!(second.success);
    assert!(second.message.is_none());
    let warning = second.warning_message.unwrap();
    assert!(warning.contains("\"Frame A\""), "{warning}");
    assert!(warning.contains("2025-05-11"), "{warning}");
    assert!(!warning.contains("2025-05-12"), "{warning}");

    assert_eq!(s.event_frame(&b).unwrap().assignments.len(), 1);
}

#[test]
fn declined_assignment_never_warns() {
    let (mut s, person, a, b) = two_frames();
    s.add_assignment(&a, assign(&person, "2025-05-10", "2025-05-12", AssignmentStatus::Yes));

    let out = s.add_assignment(
        &b,
        assign(&person, "2025-05-11", "2025-05-13", AssignmentStatus::No),
    );
    assert!(out.success);
    assert!(out.warning_message.is_none());
    assert_eq!(s.event_frame(&b).unwrap().assignments.len(), 1);
}

#[test]
fn declined_existing_assignment_does_not_occupy() {
    let (mut s, person, a, b) = two_frames();
    s.add_assignment(&a, assign(&person, "2025-05-10", "2025-05-12", AssignmentStatus::No));

    let out = s.add_assignment(
        &b,
        assign(&person, "2025-05-11", "2025-05-13", AssignmentStatus::Yes),
    );
    assert!(out.warning_message.is_none());
}

#[test]
fn editing_an_assignment_never_conflicts_with_itself() {
    let (mut s, person, a, _) = two_frames();
    let out = s.add_assignment(
        &a,
        assign(&person, "2025-05-10", "2025-05-12", AssignmentStatus::Yes),
    );
    let id = out.assignment_id.unwrap();

    let mut edited = s.assignment(&a, &id).unwrap().clone();
    edited.notes = "arrive early".into();
    let out = s.update_assignment(edited, UpdateContext::full_range());
    assert!(out.success);
    assert!(out.warning_message.is_none());
    assert_eq!(s.assignment(&a, &id).unwrap().notes, "arrive early");
}

#[test]
fn other_people_are_ignored() {
    let (mut s, person, a, b) = two_frames();
    let other = s.add_person_group(NewPersonGroup::named("Bernat")).id;
    s.add_assignment(&a, assign(&person, "2025-05-10", "2025-05-12", AssignmentStatus::Yes));

    let out = s.add_assignment(
        &b,
        assign(&other, "2025-05-11", "2025-05-13", AssignmentStatus::Yes),
    );
    assert!(out.warning_message.is_none());
}

#[test]
fn missing_frame_is_a_hard_failure() {
    let (mut s, person, _, _) = two_frames();
    let out = s.add_assignment(
        &EventFrameId::new("missing"),
        assign(&person, "2025-05-10", "2025-05-12", AssignmentStatus::Yes),
    );
    assert!(!out.success);
    assert_eq!(out.message.as_deref(), Some("frame not found"));
    assert!(out.assignment_id.is_none());
    assert_eq!(s.schedule().assignments().count(), 0);
}

#[test]
fn single_day_edit_only_checks_that_day() {
    let (mut s, person, a, b) = two_frames();
    s.add_assignment(&a, assign(&person, "2025-05-10", "2025-05-12", AssignmentStatus::Yes));
    let out = s.add_assignment(
        &b,
        assign(&person, "2025-05-11", "2025-05-13", AssignmentStatus::Yes),
    );
    assert!(out.warning_message.is_some());
    let id = out.assignment_id.unwrap();

    let out = s.set_daily_status(&b, &id, d("2025-05-13"), AssignmentStatus::Yes);
    assert!(out.success);
    assert!(out.warning_message.is_none());

    let out = s.set_daily_status(&b, &id, d("2025-05-12"), AssignmentStatus::No);
    assert!(out.warning_message.is_none());

    let out = s.set_daily_status(&b, &id, d("2025-05-11"), AssignmentStatus::Pending);
    let warning = out.warning_message.unwrap();
    assert!(warning.contains("2025-05-11"), "{warning}");
}

#[test]
fn mixed_day_without_override_is_free() {
    let (mut s, person, a, b) = two_frames();
    let out = s.add_assignment(
        &a,
        assign(&person, "2025-05-10", "2025-05-12", AssignmentStatus::Pending),
    );
    let id = out.assignment_id.unwrap();

    let mut mixed = s.assignment(&a, &id).unwrap().clone();
    mixed.status = AssignmentStatus::Mixed;
    mixed.daily_statuses = Some(DailyStatuses::from([(
        d("2025-05-10"),
        AssignmentStatus::No,
    )]));
    assert!(s.update_assignment(mixed, UpdateContext::full_range()).success);

    let out = s.add_assignment(
        &b,
        assign(&person, "2025-05-11", "2025-05-11", AssignmentStatus::Yes),
    );
    assert!(out.warning_message.is_none());
}

#[test]
fn mixed_override_occupies_its_day() {
    let (mut s, person, a, b) = two_frames();
    let out = s.add_assignment(
        &a,
        assign(&person, "2025-05-10", "2025-05-12", AssignmentStatus::No),
    );
    let id = out.assignment_id.unwrap();
    s.set_daily_status(&a, &id, d("2025-05-12"), AssignmentStatus::Yes);

    let out = s.add_assignment(
        &b,
        assign(&person, "2025-05-11", "2025-05-13", AssignmentStatus::Yes),
    );
    let warning = out.warning_message.unwrap();
    assert!(warning.contains("2025-05-12"), "{warning}");
}

#[test]
fn audit_reports_both_sides_of_a_double_booking() {
    let (mut s, person, a, b) = two_frames();
    s.add_assignment(&a, assign(&person, "2025-05-10", "2025-05-12", AssignmentStatus::Yes));
    s.add_assignment(&b, assign(&person, "2025-05-11", "2025-05-13", AssignmentStatus::Pending));

    let reports = s.audit_conflicts();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.date == d("2025-05-11")));
    assert!(reports.iter().all(|r| r.person == person));
}

#[test]
fn frame_bounds_are_only_enforced_on_request() {
    let mut lax = Scheduler::new();
    let person = lax.add_person_group(NewPersonGroup::named("Anna")).id;
    let frame = lax
        .add_event_frame(NewEventFrame::new("Frame", d("2025-05-10"), d("2025-05-12")))
        .unwrap()
        .id;
    let out = lax.add_assignment(
        &frame,
        assign(&person, "2025-05-09", "2025-05-12", AssignmentStatus::Yes),
    );
    assert!(out.success);

    let mut strict = Scheduler::with_options(StoreOptions {
        enforce_frame_bounds: true,
    });
    let person = strict.add_person_group(NewPersonGroup::named("Anna")).id;
    let frame = strict
        .add_event_frame(NewEventFrame::new("Frame", d("2025-05-10"), d("2025-05-12")))
        .unwrap()
        .id;
    let out = strict.add_assignment(
        &frame,
        assign(&person, "2025-05-09", "2025-05-12", AssignmentStatus::Yes),
    );
    assert!(!out.success);
    assert!(out.message.unwrap().contains("within the event frame"));
    assert!(strict.event_frame(&frame).unwrap().assignments.is_empty());
}

#[test]
fn inverted_range_is_rejected() {
    let (mut s, person, a, _) = two_frames();
    let out = s.add_assignment(
        &a,
        assign(&person, "2025-05-12", "2025-05-10", AssignmentStatus::Yes),
    );
    assert!(!out.success);
    assert!(s.event_frame(&a).unwrap().assignments.is_empty());
}

#[test]
fn updating_an_unknown_assignment_fails() {
    let (mut s, person, a, _) = two_frames();
    let out = s.add_assignment(
        &a,
        assign(&person, "2025-05-10", "2025-05-12", AssignmentStatus::Yes),
    );
    let mut ghost = s.assignment(&a, &out.assignment_id.unwrap()).unwrap().clone();
    ghost.id = AssignmentId::new("ghost");

    let out = s.update_assignment(ghost, UpdateContext::full_range());
    assert!(!out.success);
    assert!(out.message.unwrap().contains("assignment not found"));
    assert_eq!(s.event_frame(&a).unwrap().assignments.len(), 1);
}

#[test]
fn dry_run_check_respects_scope_and_leaves_state_alone() {
    let (mut s, person, a, b) = two_frames();
    s.add_assignment(
        &a,
        assign(&person, "2025-05-10", "2025-05-12", AssignmentStatus::Yes),
    );
    let before = s.export_snapshot();

    let candidate = Assignment {
        id: AssignmentId::new("candidate"),
        person_group_id: person.clone(),
        event_frame_id: b.clone(),
        start_date: d("2025-05-11"),
        end_date: d("2025-05-13"),
        status: AssignmentStatus::Pending,
        notes: String::new(),
        daily_statuses: None,
    };

    let report = s.check_conflicts(&candidate, CheckScope::FullSpan).unwrap();
    assert_eq!(report.date, d("2025-05-11"));
    assert_eq!(report.person, person);
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.conflicts[0].event_frame, a);
    assert_eq!(report.conflicts[0].event_frame_name, "Frame A");

    let report = s
        .check_conflicts(&candidate, CheckScope::SingleDate(d("2025-05-12")))
        .unwrap();
    assert_eq!(report.date, d("2025-05-12"));
    assert!(s
        .check_conflicts(&candidate, CheckScope::SingleDate(d("2025-05-13")))
        .is_none());

    assert_eq!(s.export_snapshot(), before);
    assert!(s.event_frame(&b).unwrap().assignments.is_empty());
}

fn two_frames() -> (Scheduler, PersonGroupId, EventFrameId, EventFrameId) {
    let mut s = Scheduler::new();
    let person = s.add_person_group(NewPersonGroup::named("Anna")).id;
    let a = s
        .add_event_frame(NewEventFrame::new("Frame A", d("2025-05-10"), d("2025-05-12")))
        .unwrap()
        .id;
    let b = s
        .add_event_frame(NewEventFrame::new("Frame B", d("2025-05-11"), d("2025-05-13")))
        .unwrap()
        .id;
    (s, person, a, b)
}

fn assign(
    person: &PersonGroupId,
    start: &str,
    end: &str,
    status: AssignmentStatus,
) -> NewAssignment {
    NewAssignment::new(person.clone(), d(start), d(end), status)
}

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}
