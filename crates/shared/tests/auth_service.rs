mod common;

use chrono::Duration;
use common::{
    ADMIN_EMAIL, FakeHasher, MemorySessions, RecordingEmail, UserStore, doctor, notifications,
    registry,
};
use shared::{
    abstract_trait::{AuthServiceTrait, DoctorAdminServiceTrait, SessionStoreTrait},
    domain::requests::{LoginRequest, RegisterDoctorRequest},
    errors::ServiceError,
    service::{AuthService, AuthServiceDeps, DoctorAdminService, DoctorAdminServiceDeps},
};
use std::sync::Arc;

struct Harness {
    users: Arc<UserStore>,
    sessions: Arc<MemorySessions>,
    email: Arc<RecordingEmail>,
    auth: AuthService,
}

async fn harness(users: UserStore) -> Harness {
    let users = Arc::new(users);
    let sessions = Arc::new(MemorySessions::default());
    let email = Arc::new(RecordingEmail::default());

    let auth = AuthService::new(AuthServiceDeps {
        query: users.clone(),
        command: users.clone(),
        hash: Arc::new(FakeHasher),
        sessions: sessions.clone(),
        email: email.clone(),
        notifications: notifications(),
        session_ttl: Duration::hours(24),
        registry: registry(),
    })
    .await;

    Harness {
        users,
        sessions,
        email,
        auth,
    }
}

async fn doctor_admin(h: &Harness) -> DoctorAdminService {
    DoctorAdminService::new(DoctorAdminServiceDeps {
        query: h.users.clone(),
        command: h.users.clone(),
        sessions: h.sessions.clone(),
        email: h.email.clone(),
        notifications: notifications(),
        registry: registry(),
    })
    .await
}

fn registration(email: &str) -> RegisterDoctorRequest {
    RegisterDoctorRequest {
        first_name: "Lisa".into(),
        last_name: "Cuddy".into(),
        email: email.into(),
        password: "secret123".into(),
        confirm_password: "secret123".into(),
        license_number: "  GMC-778812 ".into(),
        phone: None,
        specialty: Some("Endocrinology".into()),
        clinic_name: Some("Princeton Plainsboro".into()),
        address: None,
    }
}

fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn registration_waits_for_approval_and_notifies_both_sides() {
    let h = harness(UserStore::default()).await;

    let response = h
        .auth
        .register(&registration(" Lisa.Cuddy@PPTH.example "))
        .await
        .unwrap();

    assert_eq!(response.data.email, "lisa.cuddy@ppth.example");
    assert_eq!(response.data.license_number, "GMC-778812");
    assert!(!response.data.is_approved);

    let stored = h.users.get(response.data.id).unwrap();
    assert_eq!(stored.password, "hashed:secret123");

    assert_eq!(
        h.email.recipients(),
        vec!["lisa.cuddy@ppth.example".to_string(), ADMIN_EMAIL.to_string()]
    );
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let h = harness(UserStore::with(vec![doctor(1, "house@ppth.example", true)])).await;

    let err = h
        .auth
        .register(&registration("HOUSE@ppth.example"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert!(h.email.recipients().is_empty());
}

#[tokio::test]
async fn unapproved_doctor_cannot_log_in() {
    let h = harness(UserStore::with(vec![doctor(1, "house@ppth.example", false)])).await;

    let err = h
        .auth
        .login(&login("house@ppth.example", "secret123"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotApproved));
    assert!(h.sessions.sessions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let h = harness(UserStore::with(vec![doctor(1, "house@ppth.example", true)])).await;

    let wrong_password = h
        .auth
        .login(&login("house@ppth.example", "vicodin"))
        .await
        .unwrap_err();
    let unknown = h
        .auth
        .login(&login("wilson@ppth.example", "secret123"))
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, ServiceError::InvalidCredentials));
    assert!(matches!(unknown, ServiceError::InvalidCredentials));
}

#[tokio::test]
async fn login_stores_a_doctor_session() {
    let h = harness(UserStore::with(vec![doctor(7, "house@ppth.example", true)])).await;

    let authenticated = h
        .auth
        .login(&login("House@PPTH.example", "secret123"))
        .await
        .unwrap();

    assert_eq!(authenticated.ttl_seconds, 24 * 3600);
    let stored = h
        .sessions
        .get_session(&authenticated.session.session_id)
        .await
        .unwrap();
    assert_eq!(stored.doctor_id(), Some(7));

    h.auth
        .logout(&authenticated.session.session_id)
        .await
        .unwrap();
    assert!(
        h.sessions
            .get_session(&authenticated.session.session_id)
            .await
            .is_none()
    );
}

#[tokio::test]
async fn approval_unlocks_login_and_mails_the_doctor() {
    let h = harness(UserStore::with(vec![doctor(3, "chase@ppth.example", false)])).await;

    let admin = doctor_admin(&h).await;

    let approved = admin.approve(3).await.unwrap();
    assert!(approved.data.is_approved);
    assert_eq!(h.email.recipients(), vec!["chase@ppth.example".to_string()]);

    assert!(
        h.auth
            .login(&login("chase@ppth.example", "secret123"))
            .await
            .is_ok()
    );

    admin.revoke(3).await.unwrap();
    assert!(matches!(
        h.auth
            .login(&login("chase@ppth.example", "secret123"))
            .await
            .unwrap_err(),
        ServiceError::NotApproved
    ));
}

#[tokio::test]
async fn revoking_approval_ends_open_sessions() {
    let h = harness(UserStore::with(vec![
        doctor(9, "foreman@ppth.example", true),
        doctor(10, "taub@ppth.example", true),
    ]))
    .await;
    let admin = doctor_admin(&h).await;

    let revoked = h
        .auth
        .login(&login("foreman@ppth.example", "secret123"))
        .await
        .unwrap()
        .session;
    let second_device = h
        .auth
        .login(&login("foreman@ppth.example", "secret123"))
        .await
        .unwrap()
        .session;
    let colleague = h
        .auth
        .login(&login("taub@ppth.example", "secret123"))
        .await
        .unwrap()
        .session;

    admin.revoke(9).await.unwrap();

    assert!(h.sessions.get_session(&revoked.session_id).await.is_none());
    assert!(
        h.sessions
            .get_session(&second_device.session_id)
            .await
            .is_none()
    );
    assert!(h.sessions.get_session(&colleague.session_id).await.is_some());
}

#[tokio::test]
async fn deleting_a_doctor_ends_their_sessions() {
    let h = harness(UserStore::with(vec![doctor(11, "kutner@ppth.example", true)])).await;
    let admin = doctor_admin(&h).await;

    let session = h
        .auth
        .login(&login("kutner@ppth.example", "secret123"))
        .await
        .unwrap()
        .session;

    admin.delete(11).await.unwrap();

    assert!(h.users.get(11).is_none());
    assert!(h.sessions.get_session(&session.session_id).await.is_none());
}

#[tokio::test]
async fn doctors_with_orders_cannot_be_deleted() {
    let h = harness(UserStore::with(vec![doctor(12, "cameron@ppth.example", true)])).await;
    h.users.mark_ordered(12);
    let admin = doctor_admin(&h).await;

    let session = h
        .auth
        .login(&login("cameron@ppth.example", "secret123"))
        .await
        .unwrap()
        .session;

    let err = admin.delete(12).await.unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert!(h.users.get(12).is_some());
    assert!(h.sessions.get_session(&session.session_id).await.is_some());
}
