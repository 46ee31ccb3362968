//! Integration tests for attendance recording.

mod helpers;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use registrar::{AttendanceStatus, AttendanceSubmission, ErrorKind, RecordId};

use helpers::TestApp;

fn days(entries: &[(&str, AttendanceStatus)]) -> BTreeMap<NaiveDate, AttendanceStatus> {
    entries
        .iter()
        .map(|(date, status)| (date.parse().unwrap(), *status))
        .collect()
}

fn submission(user_id: RecordId, entries: &[(&str, AttendanceStatus)]) -> AttendanceSubmission {
    AttendanceSubmission {
        user_id,
        days: days(entries),
    }
}

#[tokio::test]
async fn test_teacher_records_attendance_for_a_student() {
    let app = TestApp::new().await;
    let teacher = app.teacher("nabila@school.edu").await;
    let student = app.student("amina@school.edu", "A").await;

    let record = app
        .registrar
        .attendance
        .record(
            &teacher,
            submission(
                student.account_id(),
                &[
                    ("2026-08-17", AttendanceStatus::Present),
                    ("2026-08-18", AttendanceStatus::Late),
                ],
            ),
        )
        .await
        .unwrap();

    assert_eq!(record.user_id, student.account_id());
    assert_eq!(record.updated_by, teacher.account_id());
    assert_eq!(
        record.days,
        days(&[
            ("2026-08-17", AttendanceStatus::Present),
            ("2026-08-18", AttendanceStatus::Late),
        ])
    );
}

#[tokio::test]
async fn test_resubmission_replaces_the_whole_day_map() {
    let app = TestApp::new().await;
    let teacher = app.teacher("nabila@school.edu").await;
    let student = app.student("amina@school.edu", "A").await;

    app.registrar
        .attendance
        .record(
            &teacher,
            submission(
                student.account_id(),
                &[
                    ("2026-08-17", AttendanceStatus::Present),
                    ("2026-08-18", AttendanceStatus::Absent),
                ],
            ),
        )
        .await
        .unwrap();

    let replaced = app
        .registrar
        .attendance
        .record(
            &teacher,
            submission(
                student.account_id(),
                &[("2026-08-19", AttendanceStatus::Late)],
            ),
        )
        .await
        .unwrap();

    // Old days are gone, not merged in.
    assert_eq!(
        replaced.days,
        days(&[("2026-08-19", AttendanceStatus::Late)])
    );

    let listed = app.registrar.attendance.list(&teacher).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], replaced);
}

#[tokio::test]
async fn test_students_cannot_record_attendance() {
    let app = TestApp::new().await;
    let student = app.student("amina@school.edu", "A").await;

    let err = app
        .registrar
        .attendance
        .record(
            &student,
            submission(
                student.account_id(),
                &[("2026-08-17", AttendanceStatus::Present)],
            ),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(
        err.message,
        "Only Admins and Teachers can create attendance records"
    );
}

#[tokio::test]
async fn test_students_see_only_their_own_attendance() {
    let app = TestApp::new().await;
    let teacher = app.teacher("nabila@school.edu").await;
    let amina = app.student("amina@school.edu", "A").await;
    let badal = app.student("badal@school.edu", "A").await;

    for student_id in [amina.account_id(), badal.account_id()] {
        app.registrar
            .attendance
            .record(
                &teacher,
                submission(student_id, &[("2026-08-17", AttendanceStatus::Present)]),
            )
            .await
            .unwrap();
    }

    let listed = app.registrar.attendance.list(&amina).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].user_id, amina.account_id());

    let own = app
        .registrar
        .attendance
        .for_student(&amina, amina.account_id())
        .await
        .unwrap();
    assert_eq!(own.user_id, amina.account_id());

    let err = app
        .registrar
        .attendance
        .for_student(&amina, badal.account_id())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(err.message, "You may only view your own attendance");
}

#[tokio::test]
async fn test_admin_sees_every_students_attendance() {
    let app = TestApp::new().await;
    let admin = app.admin("head@school.edu").await;
    let teacher = app.teacher("nabila@school.edu").await;
    let amina = app.student("amina@school.edu", "A").await;
    let badal = app.student("badal@school.edu", "B").await;

    for student_id in [amina.account_id(), badal.account_id()] {
        app.registrar
            .attendance
            .record(
                &teacher,
                submission(student_id, &[("2026-08-17", AttendanceStatus::Absent)]),
            )
            .await
            .unwrap();
    }

    let listed = app.registrar.attendance.list(&admin).await.unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn test_empty_submission_is_rejected() {
    let app = TestApp::new().await;
    let teacher = app.teacher("nabila@school.edu").await;
    let student = app.student("amina@school.edu", "A").await;

    let err = app
        .registrar
        .attendance
        .record(&teacher, submission(student.account_id(), &[]))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_attendance_target_must_be_an_existing_student() {
    let app = TestApp::new().await;
    let teacher = app.teacher("nabila@school.edu").await;
    let other_teacher = app.teacher("rafiq@school.edu").await;

    let not_student = app
        .registrar
        .attendance
        .record(
            &teacher,
            submission(
                other_teacher.account_id(),
                &[("2026-08-17", AttendanceStatus::Present)],
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(not_student.kind, ErrorKind::Validation);
    assert_eq!(
        not_student.message,
        "Attendance can only be recorded for student accounts"
    );

    let unknown = app
        .registrar
        .attendance
        .record(
            &teacher,
            submission(999, &[("2026-08-17", AttendanceStatus::Present)]),
        )
        .await
        .unwrap_err();
    assert_eq!(unknown.kind, ErrorKind::NotFound);
    assert_eq!(unknown.message, "Account 999 not found");
}

#[tokio::test]
async fn test_unrecorded_student_reads_as_not_found() {
    let app = TestApp::new().await;
    let teacher = app.teacher("nabila@school.edu").await;
    let student = app.student("amina@school.edu", "A").await;

    let err = app
        .registrar
        .attendance
        .for_student(&teacher, student.account_id())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
