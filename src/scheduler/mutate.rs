use super::{MutationOutcome, SchedError, Scheduler, UpdateContext};
use crate::model::{AssignmentId, AssignmentStatus, DailyStatuses, EventFrameId};
use chrono::NaiveDate;

pub(super) fn set_assignment_status(
    scheduler: &mut Scheduler,
    frame: &EventFrameId,
    id: &AssignmentId,
    status: AssignmentStatus,
) -> MutationOutcome {
    let Some(current) = scheduler.assignment(frame, id) else {
        return SchedError::UnknownAssignment(id.clone()).into();
    };

    let mut next = current.clone();
    next.status = status;
    next.daily_statuses = None;
    scheduler.update_assignment(next, UpdateContext::full_range())
}

pub(super) fn set_daily_status(
    scheduler: &mut Scheduler,
    frame: &EventFrameId,
    id: &AssignmentId,
    date: NaiveDate,
    status: AssignmentStatus,
) -> MutationOutcome {
    if !status.is_daily_value() {
        return SchedError::InvalidDailyStatus(status).into();
    }
    let Some(current) = scheduler.assignment(frame, id) else {
        return SchedError::UnknownAssignment(id.clone()).into();
    };
    if !current.covers(date) {
        return SchedError::DateOutsideAssignment(date).into();
    }

    let mut next = current.clone();
    let mut daily = next.daily_statuses.take().unwrap_or_default();
    if current.status != AssignmentStatus::Mixed {
        seed_missing_days(&mut daily, current.days(), current.status);
    }
    daily.insert(date, status);

    next.status = AssignmentStatus::Mixed;
    next.daily_statuses = Some(daily);
    scheduler.update_assignment(next, UpdateContext::single_date(date))
}

/// Remplit chaque jour sans entrée avec le statut global précédent.
fn seed_missing_days(
    daily: &mut DailyStatuses,
    days: impl Iterator<Item = NaiveDate>,
    fill: AssignmentStatus,
) {
    for day in days {
        daily.entry(day).or_insert(fill);
    }
}
