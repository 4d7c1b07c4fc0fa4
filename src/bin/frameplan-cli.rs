#![forbid(unsafe_code)]
use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use frameplan::{
    format_span_dmy, migrate_legacy_files,
    model::{
        AssignmentId, AssignmentStatus, EventFrameId, NewAssignment, NewEventFrame,
        NewPersonGroup,
    },
    scheduler::{MutationOutcome, Scheduler, StoreOptions},
    storage::{JsonStorage, Storage},
    summary::{self, CatalanLabels, StatusLabels, WireLabels},
    validate_snapshot,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification de personnes sur des cadres d'événements
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du planning (snapshot)
    #[arg(long, global = true, default_value = "frameplan.json")]
    data: String,

    /// Refuse les assignations qui débordent de leur cadre
    #[arg(long, global = true)]
    strict_bounds: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer un cadre d'événement
    AddFrame {
        #[arg(long)]
        name: String,
        /// YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,
        /// YYYY-MM-DD (par défaut : start)
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        place: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Supprimer un cadre et ses assignations
    DeleteFrame {
        #[arg(long)]
        frame: String,
    },

    /// Marquer le personnel d'un cadre comme complet (ou non)
    Complete {
        #[arg(long)]
        frame: String,
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        done: bool,
    },

    /// Ajouter une personne ou un groupe
    AddPerson {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        role: String,
        #[arg(long, default_value = "")]
        email: String,
    },

    /// Supprimer une personne et toutes ses assignations
    DeletePerson {
        #[arg(long)]
        person: String,
    },

    /// Assigner une personne (par nom) à un cadre
    Assign {
        #[arg(long)]
        frame: String,
        #[arg(long)]
        person: String,
        /// YYYY-MM-DD (par défaut : début du cadre)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// YYYY-MM-DD (par défaut : fin du cadre)
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long, default_value = "Pending")]
        status: AssignmentStatus,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Changer le statut global d'une assignation
    SetStatus {
        #[arg(long)]
        frame: String,
        #[arg(long)]
        assignment: String,
        #[arg(long)]
        status: AssignmentStatus,
    },

    /// Changer le statut d'un seul jour
    SetDay {
        #[arg(long)]
        frame: String,
        #[arg(long)]
        assignment: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        status: AssignmentStatus,
    },

    /// Retirer une assignation
    Unassign {
        #[arg(long)]
        frame: String,
        #[arg(long)]
        assignment: String,
    },

    /// Lister les cadres et leurs assignations
    List {
        /// Libellés catalans
        #[arg(long)]
        catalan: bool,
        /// Détail jour par jour
        #[arg(long)]
        days: bool,
    },

    /// Lister les personnes
    People,

    /// Vérifier les doubles réservations
    Check,

    /// Rapport groupé
    Report {
        /// event | person | date
        #[arg(long, default_value = "event")]
        by: String,
    },

    /// Migrer l'ancien format (trois fichiers JSON) vers --data
    Migrate {
        #[arg(long)]
        people: Option<String>,
        #[arg(long)]
        events: Option<String>,
        #[arg(long)]
        assignments: Option<String>,
    },

    /// Valider les références du snapshot
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.data)?;
    let mut scheduler = Scheduler::with_options(StoreOptions {
        enforce_frame_bounds: cli.strict_bounds,
    });
    let stored = storage.load()?;
    let stored_errors = match (&cli.cmd, &stored) {
        (Commands::Validate, Some(doc)) => validate_snapshot(doc),
        _ => Vec::new(),
    };
    let report = scheduler.import_snapshot(stored);
    for id in &report.dropped {
        eprintln!("warning: assignment {id} dropped (missing event frame)");
    }

    let code = match cli.cmd {
        Commands::AddFrame {
            name,
            start,
            end,
            place,
            notes,
        } => {
            let mut data = NewEventFrame::new(name, start, end.unwrap_or(start));
            data.place = place;
            data.general_notes = notes;
            let frame = scheduler.add_event_frame(data)?;
            storage.save(&scheduler.export_snapshot())?;
            println!("{}", frame.id);
            0
        }
        Commands::DeleteFrame { frame } => {
            match scheduler.delete_event_frame(&EventFrameId::new(frame)) {
                Some(removed) => println!(
                    "deleted {} ({} assignment(s))",
                    removed.name,
                    removed.assignments.len()
                ),
                None => println!("nothing to delete"),
            }
            storage.save(&scheduler.export_snapshot())?;
            0
        }
        Commands::Complete { frame, done } => {
            scheduler.set_personnel_complete(&EventFrameId::new(frame), done)?;
            storage.save(&scheduler.export_snapshot())?;
            0
        }
        Commands::AddPerson { name, role, email } => {
            let mut data = NewPersonGroup::named(name);
            data.role = role;
            data.email = email;
            let person = scheduler.add_person_group(data);
            storage.save(&scheduler.export_snapshot())?;
            println!("{}", person.id);
            0
        }
        Commands::DeletePerson { person } => {
            let id = scheduler
                .people_groups()
                .iter()
                .find(|p| p.name == person || p.id.as_str() == person)
                .map(|p| p.id.clone())
                .ok_or_else(|| anyhow!("unknown person: {person}"))?;
            scheduler.delete_person_group(&id);
            storage.save(&scheduler.export_snapshot())?;
            0
        }
        Commands::Assign {
            frame,
            person,
            start,
            end,
            status,
            notes,
        } => {
            let frame_id = EventFrameId::new(frame);
            let person_id = scheduler
                .people_groups()
                .iter()
                .find(|p| p.name == person || p.id.as_str() == person)
                .map(|p| p.id.clone())
                .ok_or_else(|| anyhow!("unknown person: {person}"))?;
            let (frame_start, frame_end) = scheduler
                .event_frame(&frame_id)
                .map(|ef| (ef.start_date, ef.end_date))
                .ok_or_else(|| anyhow!("frame not found"))?;
            let mut data = NewAssignment::new(
                person_id,
                start.unwrap_or(frame_start),
                end.unwrap_or(frame_end),
                status,
            );
            data.notes = notes;
            let outcome = scheduler.add_assignment(&frame_id, data);
            report_outcome(&outcome)?;
            storage.save(&scheduler.export_snapshot())?;
            0
        }
        Commands::SetStatus {
            frame,
            assignment,
            status,
        } => {
            let outcome = scheduler.set_assignment_status(
                &EventFrameId::new(frame),
                &AssignmentId::new(assignment),
                status,
            );
            report_outcome(&outcome)?;
            storage.save(&scheduler.export_snapshot())?;
            0
        }
        Commands::SetDay {
            frame,
            assignment,
            date,
            status,
        } => {
            let outcome = scheduler.set_daily_status(
                &EventFrameId::new(frame),
                &AssignmentId::new(assignment),
                date,
                status,
            );
            report_outcome(&outcome)?;
            storage.save(&scheduler.export_snapshot())?;
            0
        }
        Commands::Unassign { frame, assignment } => {
            scheduler
                .delete_assignment(&EventFrameId::new(frame), &AssignmentId::new(assignment))
                .ok_or_else(|| anyhow!("assignment not found"))?;
            storage.save(&scheduler.export_snapshot())?;
            0
        }
        Commands::List { catalan, days } => {
            let labels: &dyn StatusLabels = if catalan { &CatalanLabels } else { &WireLabels };
            for ef in scheduler.event_frames() {
                println!(
                    "{} | {} | {}{}",
                    ef.id,
                    ef.name,
                    format_span_dmy(ef.start_date, ef.end_date),
                    if ef.personnel_complete { " | complete" } else { "" }
                );
                for a in &ef.assignments {
                    let who = scheduler
                        .person_group(&a.person_group_id)
                        .map(|p| p.name.as_str())
                        .unwrap_or("N/A");
                    println!(
                        "  {} | {} | {} {}",
                        a.id,
                        who,
                        format_span_dmy(a.start_date, a.end_date),
                        summary::status_summary_with(a, labels)
                    );
                    if days {
                        for (date, status) in summary::day_statuses(a) {
                            println!("    {date} {}", labels.label(status));
                        }
                    }
                }
            }
            0
        }
        Commands::People => {
            for p in scheduler.people_groups() {
                println!("{} | {} | {}", p.id, p.name, p.role);
            }
            0
        }
        Commands::Check => {
            let reports = scheduler.audit_conflicts();
            if reports.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", reports.len());
                for r in &reports {
                    let who = scheduler
                        .person_group(&r.person)
                        .map(|p| p.name.as_str())
                        .unwrap_or("N/A");
                    eprintln!("{who}: {}", r.message());
                }
                // Code 2 = WARNING
                2
            }
        }
        Commands::Report { by } => {
            let rows = summary::summary_rows(scheduler.schedule());
            let groups = match by.as_str() {
                "event" => summary::group_by_event(&rows),
                "person" => summary::group_by_person(&rows),
                "date" => summary::group_by_start_date(&rows),
                other => bail!("unknown grouping: {other} (expected event, person or date)"),
            };
            for (key, rows) in groups {
                println!("{key}");
                for r in rows {
                    println!(
                        "  {} | {} | {} {}",
                        r.event_frame_name,
                        r.person_name,
                        format_span_dmy(r.start_date, r.end_date),
                        r.status_text
                    );
                }
            }
            0
        }
        Commands::Migrate {
            people,
            events,
            assignments,
        } => {
            let snapshot = migrate_legacy_files(people, events, assignments)?;
            let errors = validate_snapshot(&snapshot);
            for e in &errors {
                eprintln!("warning: {e}");
            }
            let report = scheduler.import_snapshot(Some(snapshot));
            storage.save(&scheduler.export_snapshot())?;
            println!(
                "migrated {} frame(s), {} person(s), {} dropped assignment(s)",
                scheduler.event_frames().len(),
                scheduler.people_groups().len(),
                report.dropped.len()
            );
            0
        }
        Commands::Validate => {
            if stored_errors.is_empty() {
                println!("OK: snapshot is consistent");
                0
            } else {
                for e in &stored_errors {
                    eprintln!("{e}");
                }
                2
            }
        }
    };

    std::process::exit(code);
}

/// Affiche l'avertissement éventuel ; un échec dur interrompt la commande.
fn report_outcome(outcome: &MutationOutcome) -> Result<()> {
    if !outcome.success {
        bail!(outcome
            .message
            .clone()
            .unwrap_or_else(|| "operation failed".to_string()));
    }
    if let Some(warning) = &outcome.warning_message {
        eprintln!("warning: {warning}");
    }
    if let Some(id) = &outcome.assignment_id {
        println!("{id}");
    }
    Ok(())
}
