use crate::model::{Assignment, AssignmentStatus, Schedule};
use crate::ranges::{format_date_dmy, format_date_ranges};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Libellés d'affichage des statuts (les comparaisons restent sur l'enum).
pub trait StatusLabels {
    fn label(&self, status: AssignmentStatus) -> &str;
}

/// Jetons d'échange : `Pending`, `Yes`, `No`, `Mixed`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WireLabels;

impl StatusLabels for WireLabels {
    fn label(&self, status: AssignmentStatus) -> &str {
        status.as_str()
    }
}

/// Libellés catalans (Pendent, Sí, No, Mixt).
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalanLabels;

impl StatusLabels for CatalanLabels {
    fn label(&self, status: AssignmentStatus) -> &str {
        match status {
            AssignmentStatus::Pending => "Pendent",
            AssignmentStatus::Yes => "Sí",
            AssignmentStatus::No => "No",
            AssignmentStatus::Mixed => "Mixt",
        }
    }
}

/// Texte d'état d'une assignation : `"(Yes)"` ou
/// `"(Mixed: Yes [14/05-15/05] No [16/05])"`.
pub fn status_summary(assignment: &Assignment) -> String {
    status_summary_with(assignment, &WireLabels)
}

pub fn status_summary_with(assignment: &Assignment, labels: &dyn StatusLabels) -> String {
    let daily = match (assignment.status, assignment.daily_statuses.as_ref()) {
        (AssignmentStatus::Mixed, Some(daily)) => daily,
        (status, _) => return format!("({})", labels.label(status)),
    };

    let parts: Vec<String> = [
        AssignmentStatus::Yes,
        AssignmentStatus::No,
        AssignmentStatus::Pending,
    ]
    .into_iter()
    .filter_map(|status| {
        let dates: Vec<NaiveDate> = daily
            .iter()
            .filter(|(_, s)| **s == status)
            .map(|(d, _)| *d)
            .collect();
        (!dates.is_empty())
            .then(|| format!("{} [{}]", labels.label(status), format_date_ranges(dates)))
    })
    .collect();

    let mixed = labels.label(AssignmentStatus::Mixed);
    if parts.is_empty() {
        format!("({mixed})")
    } else {
        format!("({mixed}: {})", parts.join(" "))
    }
}

/// Vue jour par jour (un jour `Mixed` sans surcharge s'affiche `Pending`).
pub fn day_statuses(assignment: &Assignment) -> Vec<(NaiveDate, AssignmentStatus)> {
    assignment
        .days()
        .filter_map(|d| assignment.day_status(d).map(|s| (d, s)))
        .collect()
}

/// Ligne de rapport : une assignation dans son cadre.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub event_frame_name: String,
    pub event_frame_place: String,
    pub event_frame_start: NaiveDate,
    pub event_frame_end: NaiveDate,
    pub person_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: AssignmentStatus,
    pub status_text: String,
    pub notes: String,
    pub general_notes: String,
}

pub fn summary_rows(schedule: &Schedule) -> Vec<SummaryRow> {
    schedule
        .event_frames
        .iter()
        .flat_map(|ef| {
            ef.assignments.iter().map(move |a| SummaryRow {
                event_frame_name: ef.name.clone(),
                event_frame_place: ef.place.clone(),
                event_frame_start: ef.start_date,
                event_frame_end: ef.end_date,
                person_name: schedule
                    .find_person_group(&a.person_group_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
                start_date: a.start_date,
                end_date: a.end_date,
                status: a.status,
                status_text: status_summary(a),
                notes: a.notes.clone(),
                general_notes: ef.general_notes.clone(),
            })
        })
        .collect()
}

/// Par cadre : date de début décroissante puis nom.
pub fn group_by_event(rows: &[SummaryRow]) -> Vec<(String, Vec<SummaryRow>)> {
    let mut groups = group(rows, |r| r.event_frame_name.clone());
    groups.sort_by(|(a_name, a_rows), (b_name, b_rows)| {
        b_rows[0]
            .event_frame_start
            .cmp(&a_rows[0].event_frame_start)
            .then_with(|| a_name.cmp(b_name))
    });
    groups
}

/// Par date de début d'assignation (`dd/mm/yyyy`), la plus récente d'abord.
pub fn group_by_start_date(rows: &[SummaryRow]) -> Vec<(String, Vec<SummaryRow>)> {
    let mut by_date: BTreeMap<NaiveDate, Vec<SummaryRow>> = BTreeMap::new();
    for row in rows {
        by_date.entry(row.start_date).or_default().push(row.clone());
    }
    by_date
        .into_iter()
        .rev()
        .map(|(date, rows)| (format_date_dmy(date), rows))
        .collect()
}

/// Par personne, ordre alphabétique.
pub fn group_by_person(rows: &[SummaryRow]) -> Vec<(String, Vec<SummaryRow>)> {
    let mut groups = group(rows, |r| r.person_name.clone());
    groups.sort_by(|(a, _), (b, _)| a.cmp(b));
    groups
}

fn group<F>(rows: &[SummaryRow], key: F) -> Vec<(String, Vec<SummaryRow>)>
where
    F: Fn(&SummaryRow) -> String,
{
    let mut out: Vec<(String, Vec<SummaryRow>)> = Vec::new();
    for row in rows {
        let k = key(row);
        match out.iter_mut().find(|(name, _)| *name == k) {
            Some((_, bucket)) => bucket.push(row.clone()),
            None => out.push((k, vec![row.clone()])),
        }
    }
    out
}
