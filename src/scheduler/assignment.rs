use super::{conflicts, util, CheckScope, MutationOutcome, SchedError, Scheduler, UpdateContext};
use crate::model::{Assignment, AssignmentId, EventFrameId, NewAssignment};

pub(super) fn add_assignment(
    scheduler: &mut Scheduler,
    frame_id: &EventFrameId,
    data: NewAssignment,
) -> MutationOutcome {
    let candidate = Assignment {
        id: AssignmentId::random(),
        person_group_id: data.person_group_id,
        event_frame_id: frame_id.clone(),
        start_date: data.start_date,
        end_date: data.end_date,
        status: data.status,
        notes: data.notes,
        daily_statuses: None,
    };

    let pos = match scheduler.validate(&candidate) {
        Ok(pos) => pos,
        Err(err) => return err.into(),
    };

    let warning = conflicts::detect_for(&scheduler.schedule, &candidate, CheckScope::FullSpan)
        .map(|report| report.message());

    let id = candidate.id.clone();
    let frame = &mut scheduler.schedule.event_frames[pos];
    frame.assignments.push(candidate);
    util::sort_assignments(&mut frame.assignments);

    #[cfg(feature = "logging")]
    tracing::debug!(
        assignment = %id,
        frame = %frame_id,
        conflict = warning.is_some(),
        "assignment added"
    );

    MutationOutcome::applied(id, warning)
}

/// Remplacement complet ; le cadre d'appartenance ne change jamais.
pub(super) fn update_assignment(
    scheduler: &mut Scheduler,
    mut record: Assignment,
    ctx: UpdateContext,
) -> MutationOutcome {
    record.normalize_daily_statuses();

    let pos = match scheduler.validate(&record) {
        Ok(pos) => pos,
        Err(err) => return err.into(),
    };
    let Some(slot) =
        util::find_assignment_index(&scheduler.schedule.event_frames[pos].assignments, &record.id)
    else {
        return SchedError::UnknownAssignment(record.id).into();
    };

    let warning = conflicts::detect_for(&scheduler.schedule, &record, ctx.into())
        .map(|report| report.message());

    let id = record.id.clone();
    let frame = &mut scheduler.schedule.event_frames[pos];
    frame.assignments[slot] = record;
    util::sort_assignments(&mut frame.assignments);

    #[cfg(feature = "logging")]
    tracing::debug!(assignment = %id, conflict = warning.is_some(), "assignment updated");

    MutationOutcome::applied(id, warning)
}

pub(super) fn delete_assignment(
    scheduler: &mut Scheduler,
    frame_id: &EventFrameId,
    id: &AssignmentId,
) -> Option<Assignment> {
    let frame = scheduler.schedule.find_event_frame_mut(frame_id)?;
    let pos = util::find_assignment_index(&frame.assignments, id)?;
    Some(frame.assignments.remove(pos))
}

impl Scheduler {
    /// Contrôles bloquants communs à l'ajout et à la mise à jour ; renvoie
    /// l'index du cadre propriétaire.
    fn validate(&self, candidate: &Assignment) -> Result<usize, SchedError> {
        let frames = &self.schedule.event_frames;
        let pos = util::find_frame_index(frames, &candidate.event_frame_id)
            .ok_or_else(|| SchedError::UnknownEventFrame(candidate.event_frame_id.clone()))?;

        if !util::valid_span(candidate.start_date, candidate.end_date) {
            return Err(SchedError::InvalidDateRange);
        }

        let frame = &frames[pos];
        if self.opts.enforce_frame_bounds
            && !frame.contains_span(candidate.start_date, candidate.end_date)
        {
            return Err(SchedError::OutsideEventFrame {
                start: frame.start_date,
                end: frame.end_date,
            });
        }

        Ok(pos)
    }
}
