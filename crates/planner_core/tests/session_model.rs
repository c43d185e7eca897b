use planner_core::{parse_duration, SessionDraft, StudySession, ValidationError};
use uuid::Uuid;

fn draft(subject: &str, duration: u32, date: &str) -> SessionDraft {
    SessionDraft {
        subject: subject.to_string(),
        duration,
        date: date.to_string(),
    }
}

#[test]
fn from_draft_assigns_given_id_and_copies_fields() {
    let id = Uuid::new_v4();
    let session = StudySession::from_draft(id, draft("Calculus", 45, "2024-06-01"));

    assert_eq!(session.id, id);
    assert_eq!(session.subject, "Calculus");
    assert_eq!(session.duration, 45);
    assert_eq!(session.date, "2024-06-01");
}

#[test]
fn draft_validation_rejects_zero_duration_and_blank_fields() {
    assert_eq!(
        draft("Calculus", 0, "2024-06-01").validate(),
        Err(ValidationError::NonPositiveDuration)
    );
    assert_eq!(
        draft("  ", 45, "2024-06-01").validate(),
        Err(ValidationError::MissingField { field: "subject" })
    );
    assert_eq!(
        draft("Calculus", 45, "").validate(),
        Err(ValidationError::MissingField { field: "date" })
    );
    assert!(draft("Calculus", 45, "2024-06-01").validate().is_ok());
}

#[test]
fn parse_duration_accepts_positive_integers_only() {
    assert_eq!(parse_duration("45"), Some(45));
    assert_eq!(parse_duration(" 90 "), Some(90));
    assert_eq!(parse_duration("0"), None);
    assert_eq!(parse_duration("-30"), None);
    assert_eq!(parse_duration("ninety"), None);
    assert_eq!(parse_duration(""), None);
    assert_eq!(parse_duration("45.5"), None);
}

#[test]
fn date_parses_calendar_dates_and_rfc3339_timestamps() {
    let plain = StudySession::from_draft(Uuid::new_v4(), draft("Physics", 60, "2024-06-02"));
    assert!(plain.date_parsed().is_some());

    let timestamped = StudySession::from_draft(
        Uuid::new_v4(),
        draft("Physics", 60, "2024-06-02T14:30:00+02:00"),
    );
    assert!(timestamped.date_parsed().is_some());

    let bogus = StudySession::from_draft(Uuid::new_v4(), draft("Physics", 60, "someday"));
    assert!(bogus.date_parsed().is_none());
}

#[test]
fn serialization_round_trips_wire_fields() {
    let id = Uuid::parse_str("22222222-3333-4444-8555-666666666666").unwrap();
    let session = StudySession::from_draft(id, draft("Calculus", 45, "2024-06-01"));

    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["subject"], "Calculus");
    assert_eq!(json["duration"], 45);
    assert_eq!(json["date"], "2024-06-01");

    let decoded: StudySession = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, session);
}
