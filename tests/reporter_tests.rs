use chrono::{Duration, NaiveDate};
use rworkwatch::config::Config;
use rworkwatch::core::edit::{EditLogic, EditRequest};
use rworkwatch::db::repository::ReportRepository;
use rworkwatch::errors::AppError;
use rworkwatch::models::status::Status;
use rworkwatch::models::work_session::{Break, WorkSession};

mod common;
use common::{FailingNotifier, RecordingNotifier, jan, reporter_in, reporter_with};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

#[test]
fn work_break_work_off_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let r = reporter_in(dir.path(), Box::new(notifier.clone()));

    r.handle_activity_at(jan(15, 9, 0)).unwrap();
    assert_eq!(r.snapshot().unwrap().status, Status::Working);
    assert_eq!(
        r.daily_report(day(15)).unwrap(),
        vec![WorkSession::open(jan(15, 9, 0))]
    );

    r.poll_at(jan(15, 9, 36)).unwrap();
    assert_eq!(r.snapshot().unwrap().status, Status::Breaking);
    let report = r.daily_report(day(15)).unwrap();
    assert_eq!(report[0].breaks, vec![Break::open(jan(15, 9, 0))]);

    r.handle_activity_at(jan(15, 10, 0)).unwrap();
    assert_eq!(r.snapshot().unwrap().status, Status::Working);
    let report = r.daily_report(day(15)).unwrap();
    assert_eq!(report[0].breaks[0].end_at, Some(jan(15, 10, 0)));

    // Idle again: a break anchored at 10:00, then the session ends there too.
    r.poll_at(jan(15, 10, 36)).unwrap();
    assert_eq!(r.snapshot().unwrap().status, Status::Breaking);
    r.poll_at(jan(15, 14, 1)).unwrap();

    let snap = r.snapshot().unwrap();
    assert_eq!(snap.status, Status::Off);
    assert_eq!(snap.last_activity_at, Some(jan(15, 10, 0)));

    let report = r.daily_report(day(15)).unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].end_at, Some(jan(15, 10, 0)));
    assert_eq!(
        report[0].breaks,
        vec![Break {
            start_at: jan(15, 9, 0),
            end_at: Some(jan(15, 10, 0)),
        }]
    );

    assert_eq!(
        notifier.titles(),
        vec![
            "Work started",
            "Break started",
            "Break ended",
            "Break started",
            "Work ended"
        ]
    );
}

#[test]
fn poll_inside_thresholds_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let r = reporter_in(dir.path(), Box::new(RecordingNotifier::default()));

    r.handle_activity_at(jan(15, 9, 0)).unwrap();
    r.poll_at(jan(15, 9, 35)).unwrap();
    assert_eq!(r.snapshot().unwrap().status, Status::Working);
    assert!(r.daily_report(day(15)).unwrap()[0].breaks.is_empty());
}

#[test]
fn working_past_shift_end_rolls_over() {
    let dir = tempfile::tempdir().unwrap();
    let r = reporter_in(dir.path(), Box::new(RecordingNotifier::default()));

    r.handle_activity_at(jan(15, 22, 0)).unwrap();
    r.handle_activity_at(jan(15, 23, 30)).unwrap();

    r.poll_at(jan(16, 6, 0)).unwrap();

    assert_eq!(r.snapshot().unwrap().status, Status::Off);
    let yesterday = r.daily_report(day(15)).unwrap();
    assert_eq!(yesterday.len(), 1);
    assert_eq!(yesterday[0].end_at, Some(jan(15, 23, 30)));
    assert!(r.daily_report(day(16)).unwrap().is_empty());
}

#[test]
fn rollover_while_breaking_drops_the_open_break() {
    let dir = tempfile::tempdir().unwrap();
    let r = reporter_in(dir.path(), Box::new(RecordingNotifier::default()));

    r.handle_activity_at(jan(15, 23, 0)).unwrap();
    r.poll_at(jan(16, 0, 0)).unwrap();
    assert_eq!(r.snapshot().unwrap().status, Status::Breaking);

    r.poll_at(jan(16, 5, 1)).unwrap();

    assert_eq!(r.snapshot().unwrap().status, Status::Off);
    let report = r.daily_report(day(15)).unwrap();
    assert_eq!(report[0].end_at, Some(jan(15, 23, 0)));
    assert!(report[0].breaks.is_empty());
}

#[test]
fn activity_on_new_day_while_working_keeps_open_session() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let r = reporter_in(dir.path(), Box::new(notifier.clone()));

    r.handle_activity_at(jan(15, 23, 30)).unwrap();
    r.handle_activity_at(jan(16, 8, 0)).unwrap();

    let snap = r.snapshot().unwrap();
    assert_eq!(snap.status, Status::Working);
    assert_eq!(snap.last_activity_at, Some(jan(16, 8, 0)));
    assert_eq!(
        r.daily_report(day(15)).unwrap(),
        vec![WorkSession::open(jan(15, 23, 30))]
    );
    assert!(r.daily_report(day(16)).unwrap().is_empty());
    assert_eq!(notifier.titles(), vec!["Work started"]);
}

#[test]
fn activity_before_shift_belongs_to_previous_day() {
    let dir = tempfile::tempdir().unwrap();
    let r = reporter_in(dir.path(), Box::new(RecordingNotifier::default()));

    r.handle_activity_at(jan(16, 2, 0)).unwrap();

    assert_eq!(r.daily_report(day(15)).unwrap().len(), 1);
    assert!(r.daily_report(day(16)).unwrap().is_empty());
}

#[test]
fn off_never_jumps_to_breaking() {
    let dir = tempfile::tempdir().unwrap();
    let r = reporter_in(dir.path(), Box::new(RecordingNotifier::default()));

    r.poll_at(jan(15, 9, 0)).unwrap();
    r.poll_at(jan(15, 20, 0)).unwrap();

    let snap = r.snapshot().unwrap();
    assert_eq!(snap.status, Status::Off);
    assert_eq!(snap.last_activity_at, None);
    assert!(r.daily_report(day(15)).unwrap().is_empty());
}

#[test]
fn second_poll_at_same_instant_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let r = reporter_in(dir.path(), Box::new(notifier.clone()));

    r.handle_activity_at(jan(15, 9, 0)).unwrap();
    r.poll_at(jan(15, 9, 36)).unwrap();
    let after_first = r.daily_report(day(15)).unwrap();

    r.poll_at(jan(15, 9, 36)).unwrap();

    assert_eq!(r.daily_report(day(15)).unwrap(), after_first);
    assert_eq!(r.snapshot().unwrap().status, Status::Breaking);
    assert_eq!(notifier.titles().len(), 2);
}

#[test]
fn working_without_last_activity_is_inconsistent() {
    let dir = tempfile::tempdir().unwrap();
    let r = reporter_in(dir.path(), Box::new(RecordingNotifier::default()));
    r.with_repo(|repo| repo.set_status(Status::Working)).unwrap();

    let err = r.poll_at(jan(15, 9, 0)).unwrap_err();

    assert!(matches!(err, AppError::Consistency(_)));
    assert_eq!(r.snapshot().unwrap().status, Status::Working);
    assert!(r.daily_report(day(15)).unwrap().is_empty());
}

#[test]
fn notifier_failure_does_not_block_transitions() {
    let dir = tempfile::tempdir().unwrap();
    let r = reporter_in(dir.path(), Box::new(FailingNotifier));

    r.handle_activity_at(jan(15, 9, 0)).unwrap();
    r.poll_at(jan(15, 10, 0)).unwrap();

    assert_eq!(r.snapshot().unwrap().status, Status::Breaking);
}

#[test]
fn save_and_update_replace_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let r = reporter_in(dir.path(), Box::new(RecordingNotifier::default()));

    let report = vec![WorkSession {
        start_at: jan(15, 9, 0),
        end_at: Some(jan(15, 17, 0)),
        breaks: vec![],
    }];
    r.save_daily_report(day(15), &report).unwrap();
    assert_eq!(r.daily_report(day(15)).unwrap(), report);

    let failed = r.update_daily_report(day(15), |rep, _| {
        rep.clear();
        Err(AppError::InvalidSession(3))
    });
    assert!(failed.is_err());
    assert_eq!(r.daily_report(day(15)).unwrap(), report);

    let entries = r.with_repo(|repo| repo.log_entries()).unwrap();
    assert!(entries.iter().any(|e| e.operation == "edit"));
}

#[test]
fn transitions_are_written_to_internal_log() {
    let dir = tempfile::tempdir().unwrap();
    let r = reporter_in(dir.path(), Box::new(RecordingNotifier::default()));

    r.handle_activity_at(jan(15, 9, 0)).unwrap();
    r.poll_at(jan(15, 9, 36)).unwrap();
    r.handle_activity_at(jan(15, 9, 40)).unwrap();
    r.poll_at(jan(15, 10, 16)).unwrap();
    r.poll_at(jan(15, 13, 41)).unwrap();

    let ops: Vec<String> = r
        .with_repo(|repo| repo.log_entries())
        .unwrap()
        .into_iter()
        .map(|e| e.operation)
        .filter(|op| op != "migration_applied")
        .collect();

    assert_eq!(
        ops,
        vec!["work_start", "break_start", "break_end", "break_start", "work_end"]
    );
}

#[test]
fn unreachable_threshold_never_fires() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Config::default().settings().unwrap();
    settings.start_break_interval = Duration::days(100_000_000);
    let r = reporter_with(dir.path(), Box::new(RecordingNotifier::default()), &settings);

    r.handle_activity_at(jan(15, 9, 0)).unwrap();
    r.poll_at(jan(15, 23, 0)).unwrap();

    assert_eq!(r.snapshot().unwrap().status, Status::Working);
    assert!(r.daily_report(day(15)).unwrap()[0].breaks.is_empty());
}

#[test]
fn idle_working_with_empty_report_stays_working() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let r = reporter_in(dir.path(), Box::new(notifier.clone()));
    r.with_repo(|repo| {
        repo.set_status(Status::Working)?;
        repo.set_last_activity_at(jan(15, 9, 0))
    })
    .unwrap();

    r.poll_at(jan(15, 9, 36)).unwrap();

    assert_eq!(r.snapshot().unwrap().status, Status::Working);
    assert!(r.daily_report(day(15)).unwrap().is_empty());
    assert!(notifier.titles().is_empty());
}

#[test]
fn activity_while_breaking_without_open_break_resumes_work() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let r = reporter_in(dir.path(), Box::new(notifier.clone()));
    let report = vec![WorkSession::open(jan(15, 9, 0))];
    r.with_repo(|repo| {
        repo.set_status(Status::Breaking)?;
        repo.set_last_activity_at(jan(15, 9, 0))?;
        repo.set_daily_report(day(15), &report)
    })
    .unwrap();

    r.handle_activity_at(jan(15, 10, 0)).unwrap();

    assert_eq!(r.snapshot().unwrap().status, Status::Working);
    assert_eq!(r.daily_report(day(15)).unwrap(), report);
    assert_eq!(notifier.titles(), vec!["Break ended"]);
}

#[test]
fn finishing_with_empty_report_only_turns_off() {
    let dir = tempfile::tempdir().unwrap();
    let r = reporter_in(dir.path(), Box::new(RecordingNotifier::default()));
    r.with_repo(|repo| {
        repo.set_status(Status::Breaking)?;
        repo.set_last_activity_at(jan(15, 9, 0))
    })
    .unwrap();

    r.poll_at(jan(15, 13, 1)).unwrap();

    assert_eq!(r.snapshot().unwrap().status, Status::Off);
    assert!(r.daily_report(day(15)).unwrap().is_empty());
}

#[test]
fn recording_session_cannot_be_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let r = reporter_in(dir.path(), Box::new(RecordingNotifier::default()));

    r.handle_activity_at(jan(15, 9, 0)).unwrap();
    r.poll_at(jan(15, 9, 36)).unwrap();
    r.poll_at(jan(15, 13, 1)).unwrap();
    assert_eq!(r.snapshot().unwrap().status, Status::Off);
    r.handle_activity_at(jan(15, 15, 0)).unwrap();

    let delete = EditRequest {
        session: 2,
        delete: true,
        ..Default::default()
    };
    let err = EditLogic::edit(&r, day(15), &delete).unwrap_err();
    assert!(matches!(err, AppError::SessionInProgress(2)));

    r.poll_at(jan(15, 15, 36)).unwrap();

    let report = r.daily_report(day(15)).unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].end_at, Some(jan(15, 9, 0)));
    assert!(report[0].breaks.is_empty());
    assert_eq!(report[1].breaks, vec![Break::open(jan(15, 15, 0))]);
}

#[test]
fn closed_session_is_not_reopened_after_removing_the_open_one() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let r = reporter_in(dir.path(), Box::new(notifier.clone()));
    let closed = WorkSession {
        start_at: jan(15, 9, 0),
        end_at: Some(jan(15, 9, 40)),
        breaks: vec![],
    };
    r.with_repo(|repo| {
        repo.set_status(Status::Working)?;
        repo.set_last_activity_at(jan(15, 15, 0))?;
        repo.set_daily_report(day(15), &vec![closed.clone()])
    })
    .unwrap();

    r.poll_at(jan(15, 15, 36)).unwrap();
    assert_eq!(r.snapshot().unwrap().status, Status::Working);

    r.with_repo(|repo| repo.set_status(Status::Breaking)).unwrap();
    r.poll_at(jan(15, 19, 1)).unwrap();

    assert_eq!(r.snapshot().unwrap().status, Status::Off);
    assert_eq!(r.daily_report(day(15)).unwrap(), vec![closed]);
    assert_eq!(notifier.titles(), vec!["Work ended"]);
}

