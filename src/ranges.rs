//! Mise en forme compacte de dates calendaires.

use chrono::{Datelike, NaiveDate};

/// Itère les jours de `[start, end]` inclus (vide si `end < start`).
pub fn dates_in_span(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .take_while(move |d| *d <= end)
}

/// Compresse un ensemble de dates en plages contiguës.
///
/// `["2025-05-14", "2025-05-15", "2025-05-17"]` devient `"14/05-15/05, 17/05"`.
/// L'ordre d'entrée est indifférent et les doublons sont ignorés.
pub fn format_date_ranges<I>(dates: I) -> String
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut sorted: Vec<NaiveDate> = dates.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut runs: Vec<(NaiveDate, NaiveDate)> = Vec::new();
    for date in sorted {
        match runs.last_mut() {
            Some((_, end)) if end.succ_opt() == Some(date) => *end = date,
            _ => runs.push((date, date)),
        }
    }

    runs.iter()
        .map(|(start, end)| {
            if start == end {
                format_day_month(*start)
            } else {
                format!("{}-{}", format_day_month(*start), format_day_month(*end))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `dd/mm`
pub fn format_day_month(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.day(), date.month())
}

/// `dd/mm/yyyy`
pub fn format_date_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `dd/mm/yyyy - dd/mm/yyyy`, ou une seule date si la plage tient sur un jour.
pub fn format_span_dmy(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        format_date_dmy(start)
    } else {
        format!("{} - {}", format_date_dmy(start), format_date_dmy(end))
    }
}
