use crate::ranges;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Identifiant fort pour PersonGroup
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonGroupId(String);

impl PersonGroupId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour EventFrame
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventFrameId(String);

impl EventFrameId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventFrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour Assignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssignmentId(String);

impl AssignmentId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Statut de disponibilité d'une assignation.
///
/// Les jetons sérialisés (`Pending`, `Yes`, `No`, `Mixed`) sont le format
/// d'échange ; l'affichage localisé passe par [`crate::summary::StatusLabels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentStatus {
    Pending,
    Yes,
    No,
    Mixed,
}

impl AssignmentStatus {
    pub const ALL: [AssignmentStatus; 4] = [Self::Pending, Self::Yes, Self::No, Self::Mixed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Mixed => "Mixed",
        }
    }

    /// Valeur acceptée comme surcharge journalière (Mixed ne l'est pas).
    pub fn is_daily_value(self) -> bool {
        !matches!(self, Self::Mixed)
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown status: {s}"))
    }
}

/// Surcharges par jour d'une assignation `Mixed`.
pub type DailyStatuses = BTreeMap<NaiveDate, AssignmentStatus>;

/// Personne ou groupe planifiable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonGroup {
    pub id: PersonGroupId,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub tel1: String,
    #[serde(default)]
    pub tel2: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub web: String,
    #[serde(default)]
    pub notes: String,
}

/// Données de création d'un PersonGroup (l'id est généré par le store).
#[derive(Debug, Clone, Default)]
pub struct NewPersonGroup {
    pub name: String,
    pub role: String,
    pub tel1: String,
    pub tel2: String,
    pub email: String,
    pub web: String,
    pub notes: String,
}

impl NewPersonGroup {
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Cadre d'événement daté, propriétaire de ses assignations.
///
/// La liste `assignments` n'est jamais sérialisée : le snapshot transporte les
/// assignations à plat, chacune portant son `eventFrameId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFrame {
    pub id: EventFrameId,
    pub name: String,
    #[serde(default)]
    pub place: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub general_notes: String,
    #[serde(default)]
    pub personnel_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_calendar_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_sheet: Option<serde_json::Value>,
    #[serde(skip)]
    pub assignments: Vec<Assignment>,
}

impl EventFrame {
    /// Vrai si `[start, end]` tient dans l'étendue du cadre.
    pub fn contains_span(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= start && end <= self.end_date
    }

    pub fn find_assignment(&self, id: &AssignmentId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| &a.id == id)
    }
}

/// Données de création d'un EventFrame.
#[derive(Debug, Clone)]
pub struct NewEventFrame {
    pub name: String,
    pub place: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub general_notes: String,
}

impl NewEventFrame {
    pub fn new<S: Into<String>>(name: S, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            place: String::new(),
            start_date,
            end_date,
            general_notes: String::new(),
        }
    }
}

/// Lien entre un PersonGroup et un EventFrame sur une plage de jours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub person_group_id: PersonGroupId,
    pub event_frame_id: EventFrameId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: AssignmentStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_statuses: Option<DailyStatuses>,
}

impl Assignment {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        ranges::dates_in_span(self.start_date, self.end_date)
    }

    /// Statut affiché pour un jour de la plage : la surcharge si elle existe,
    /// `Pending` pour un jour `Mixed` sans surcharge, sinon le statut global.
    pub fn day_status(&self, date: NaiveDate) -> Option<AssignmentStatus> {
        if !self.covers(date) {
            return None;
        }
        match self.status {
            AssignmentStatus::Mixed => Some(
                self.daily_statuses
                    .as_ref()
                    .and_then(|daily| daily.get(&date).copied())
                    .unwrap_or(AssignmentStatus::Pending),
            ),
            blanket => Some(blanket),
        }
    }

    /// Applique l'invariant : pas de surcharges hors `Mixed`, une table
    /// (éventuellement vide) en `Mixed`.
    pub fn normalize_daily_statuses(&mut self) {
        if self.status == AssignmentStatus::Mixed {
            self.daily_statuses.get_or_insert_with(DailyStatuses::new);
        } else {
            self.daily_statuses = None;
        }
    }
}

/// Données de création d'une assignation (jamais de surcharges journalières).
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub person_group_id: PersonGroupId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: AssignmentStatus,
    pub notes: String,
}

impl NewAssignment {
    pub fn new(
        person_group_id: PersonGroupId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: AssignmentStatus,
    ) -> Self {
        Self {
            person_group_id,
            start_date,
            end_date,
            status,
            notes: String::new(),
        }
    }
}

/// Arbre complet : personnes + cadres (avec leurs assignations).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub people_groups: Vec<PersonGroup>,
    pub event_frames: Vec<EventFrame>,
}

impl Schedule {
    pub fn find_person_group(&self, id: &PersonGroupId) -> Option<&PersonGroup> {
        self.people_groups.iter().find(|p| &p.id == id)
    }
    pub fn find_event_frame(&self, id: &EventFrameId) -> Option<&EventFrame> {
        self.event_frames.iter().find(|ef| &ef.id == id)
    }
    pub fn find_event_frame_mut(&mut self, id: &EventFrameId) -> Option<&mut EventFrame> {
        self.event_frames.iter_mut().find(|ef| &ef.id == id)
    }
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.event_frames.iter().flat_map(|ef| ef.assignments.iter())
    }
}
