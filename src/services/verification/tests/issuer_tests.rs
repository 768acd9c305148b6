use std::sync::Arc;

use chrono::Duration;

use super::{
    mocks::{t0, InMemoryCodeStore, RecordingNotifier, SeededCodeGenerator},
    Harness,
};
use crate::{
    config::VerificationSettings,
    domain::entities::verification::verification_code::{is_well_formed_code, CodeState},
    services::verification::{
        code_generator::SecureCodeGenerator, errors::VerificationError, issuer::VERIFICATION_SUBJECT,
    },
};

#[actix_web::test]
async fn test_issue_code_persists_and_sends() {
    let h = Harness::new();
    let user = h.identities.add_user("ada@example.com");

    let issued = h.issuer.issue_code(&user, 10).await.unwrap();

    assert_eq!(issued.expires_at, t0() + Duration::minutes(10));

    let stored = h.codes.get(&issued.code_id).unwrap();
    assert_eq!(stored.user_id, user.id.unwrap());
    assert_eq!(stored.state_at(t0()), CodeState::Issued);
    assert!(!stored.revoked);

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(sent[0].subject, VERIFICATION_SUBJECT);
    assert!(sent[0].body.contains(&stored.code));
}

#[actix_web::test]
async fn test_codes_are_six_digits_in_range() {
    let h = Harness::build(
        InMemoryCodeStore::new(),
        RecordingNotifier::new(),
        Arc::new(SecureCodeGenerator),
        &VerificationSettings::default(),
    );
    let user = h.identities.add_user("ada@example.com");

    for _ in 0..200 {
        let issued = h.issuer.issue_code(&user, 10).await.unwrap();
        let code = h.codes.code_value(&issued.code_id);
        assert!(is_well_formed_code(&code), "malformed code {code}");
    }
}

#[actix_web::test]
async fn test_non_positive_ttl_is_rejected() {
    let h = Harness::new();
    let user = h.identities.add_user("ada@example.com");

    for ttl in [0, -5] {
        let result = h.issuer.issue_code(&user, ttl).await;
        assert!(matches!(result, Err(VerificationError::InvalidTtl(t)) if t == ttl));
    }
    assert_eq!(h.codes.len(), 0);
    assert!(h.notifier.sent().is_empty());
}

#[actix_web::test]
async fn test_dispatch_failure_keeps_the_stored_code() {
    let h = Harness::build(
        InMemoryCodeStore::new(),
        RecordingNotifier::failing(),
        Arc::new(SeededCodeGenerator::new(1)),
        &VerificationSettings::default(),
    );
    let user = h.identities.add_user("ada@example.com");

    let result = h.issuer.issue_code(&user, 10).await;

    let (code_id, expires_at, reason) = match result {
        Err(VerificationError::NotificationDispatchFailed { code_id, expires_at, reason }) => {
            (code_id, expires_at, reason)
        }
        other => panic!("expected dispatch failure, got {other:?}"),
    };
    assert_eq!(expires_at, t0() + Duration::minutes(10));
    assert!(reason.contains("mail relay"));

    let stored = h.codes.get(&code_id).expect("code should not be rolled back");
    assert!(stored.is_usable_at(t0()));

    // 메일이 오지 않았어도 저장된 코드로는 인증할 수 있다
    h.coordinator
        .verify("ada@example.com", &stored.code, t0() + Duration::minutes(1))
        .await
        .unwrap();
}

#[actix_web::test]
async fn test_storage_failure_is_reported() {
    let h = Harness::build(
        InMemoryCodeStore::failing(),
        RecordingNotifier::new(),
        Arc::new(SeededCodeGenerator::new(1)),
        &VerificationSettings::default(),
    );
    let user = h.identities.add_user("ada@example.com");

    let result = h.issuer.issue_code(&user, 10).await;

    assert!(matches!(result, Err(VerificationError::Storage(_))));
    assert!(h.notifier.sent().is_empty());
}

#[actix_web::test]
async fn test_reissue_revokes_prior_codes_when_enabled() {
    let settings = VerificationSettings { invalidate_prior_on_reissue: true, ..Default::default() };
    let h = Harness::build(
        InMemoryCodeStore::new(),
        RecordingNotifier::new(),
        Arc::new(SeededCodeGenerator::new(9)),
        &settings,
    );
    let user = h.identities.add_user("ada@example.com");

    let first = h.issuer.issue_code(&user, 10).await.unwrap();
    let second = h.issuer.issue_code(&user, 10).await.unwrap();

    assert!(h.codes.get(&first.code_id).unwrap().revoked);
    assert!(!h.codes.get(&second.code_id).unwrap().revoked);

    let first_code = h.codes.code_value(&first.code_id);
    let second_code = h.codes.code_value(&second.code_id);
    let now = t0() + Duration::minutes(1);

    if first_code != second_code {
        let result = h.coordinator.verify("ada@example.com", &first_code, now).await;
        assert!(matches!(result, Err(VerificationError::CodeInvalid)));
    }
    h.coordinator.verify("ada@example.com", &second_code, now).await.unwrap();
}
