//! Integration tests for marks submission and grade derivation.

mod helpers;

use registrar::{ErrorKind, Grade, MarksSubmission, RecordId, Subject};

use helpers::TestApp;

fn submission(user_id: RecordId, subject: Subject, marks: u8) -> MarksSubmission {
    MarksSubmission {
        user_id,
        subject,
        marks,
    }
}

#[tokio::test]
async fn test_submitting_marks_derives_the_grade() {
    let app = TestApp::new().await;
    let teacher = app.teacher("nabila@school.edu").await;
    let student = app.student("amina@school.edu", "A").await;

    let record = app
        .registrar
        .marks
        .submit(&teacher, submission(student.account_id(), Subject::Math, 89))
        .await
        .unwrap();

    assert_eq!(record.user_id, student.account_id());
    assert_eq!(record.subject, Subject::Math);
    assert_eq!(record.marks, 89);
    assert_eq!(record.grade, Grade::B);
    assert_eq!(record.updated_by, teacher.account_id());
}

#[tokio::test]
async fn test_resubmission_overwrites_the_subject_entry() {
    let app = TestApp::new().await;
    let teacher = app.teacher("nabila@school.edu").await;
    let student = app.student("amina@school.edu", "A").await;

    app.registrar
        .marks
        .submit(&teacher, submission(student.account_id(), Subject::Math, 55))
        .await
        .unwrap();
    app.registrar
        .marks
        .submit(&teacher, submission(student.account_id(), Subject::Math, 90))
        .await
        .unwrap();
    app.registrar
        .marks
        .submit(
            &teacher,
            submission(student.account_id(), Subject::English, 72),
        )
        .await
        .unwrap();

    let listed = app.registrar.marks.list(&teacher).await.unwrap();
    assert_eq!(listed.len(), 2);

    let math = listed
        .iter()
        .find(|mark| mark.subject == Subject::Math)
        .unwrap();
    assert_eq!(math.marks, 90);
    assert_eq!(math.grade, Grade::A);

    let english = listed
        .iter()
        .find(|mark| mark.subject == Subject::English)
        .unwrap();
    assert_eq!(english.grade, Grade::C);
}

#[tokio::test]
async fn test_marks_above_one_hundred_are_rejected() {
    let app = TestApp::new().await;
    let teacher = app.teacher("nabila@school.edu").await;
    let student = app.student("amina@school.edu", "A").await;

    let err = app
        .registrar
        .marks
        .submit(
            &teacher,
            submission(student.account_id(), Subject::Math, 101),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "Marks must be between 0 and 100");
}

#[tokio::test]
async fn test_students_cannot_submit_marks() {
    let app = TestApp::new().await;
    let student = app.student("amina@school.edu", "A").await;

    let err = app
        .registrar
        .marks
        .submit(
            &student,
            submission(student.account_id(), Subject::Math, 100),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(err.message, "Only Admins and Teachers can create marks");
}

#[tokio::test]
async fn test_students_see_only_their_own_marks() {
    let app = TestApp::new().await;
    let teacher = app.teacher("nabila@school.edu").await;
    let amina = app.student("amina@school.edu", "A").await;
    let badal = app.student("badal@school.edu", "A").await;

    app.registrar
        .marks
        .submit(&teacher, submission(amina.account_id(), Subject::Math, 81))
        .await
        .unwrap();
    app.registrar
        .marks
        .submit(&teacher, submission(badal.account_id(), Subject::Math, 64))
        .await
        .unwrap();

    let listed = app.registrar.marks.list(&amina).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].user_id, amina.account_id());

    let own = app
        .registrar
        .marks
        .for_student(&amina, amina.account_id())
        .await
        .unwrap();
    assert_eq!(own.len(), 1);

    let err = app
        .registrar
        .marks
        .for_student(&amina, badal.account_id())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(err.message, "You may only view your own marks");
}

#[tokio::test]
async fn test_marks_target_must_be_an_existing_student() {
    let app = TestApp::new().await;
    let teacher = app.teacher("nabila@school.edu").await;
    let other_teacher = app.teacher("rafiq@school.edu").await;

    let not_student = app
        .registrar
        .marks
        .submit(
            &teacher,
            submission(other_teacher.account_id(), Subject::Math, 70),
        )
        .await
        .unwrap_err();
    assert_eq!(not_student.kind, ErrorKind::Validation);
    assert_eq!(
        not_student.message,
        "Marks can only be submitted for student accounts"
    );

    let unknown = app
        .registrar
        .marks
        .submit(&teacher, submission(999, Subject::Math, 70))
        .await
        .unwrap_err();
    assert_eq!(unknown.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_grade_boundaries_through_the_service() {
    let app = TestApp::new().await;
    let teacher = app.teacher("nabila@school.edu").await;
    let student = app.student("amina@school.edu", "A").await;

    let expectations = [
        (Subject::Math, 90, Grade::A),
        (Subject::English, 89, Grade::B),
        (Subject::Science, 79, Grade::C),
        (Subject::History, 69, Grade::D),
        (Subject::Geography, 59, Grade::F),
    ];

    for (subject, marks, expected) in expectations {
        let record = app
            .registrar
            .marks
            .submit(&teacher, submission(student.account_id(), subject, marks))
            .await
            .unwrap();
        assert_eq!(record.grade, expected, "marks {marks}");
    }
}
