mod mocks;
mod issuer_tests;

use std::sync::Arc;

use crate::config::VerificationSettings;
use mocks::{FixedClock, InMemoryCodeStore, InMemoryIdentityStore, RecordingNotifier, SeededCodeGenerator};

use super::{
    coordinator::VerificationCoordinator,
    issuer::CodeIssuer,
    traits::CodeGenerator,
};

/// 발급기와 검증기가 같은 저장소와 시계를 공유하는 테스트 구성
struct Harness {
    codes: Arc<InMemoryCodeStore>,
    identities: Arc<InMemoryIdentityStore>,
    notifier: Arc<RecordingNotifier>,
    clock: Arc<FixedClock>,
    issuer: CodeIssuer,
    coordinator: VerificationCoordinator,
}

impl Harness {
    fn new() -> Self {
        Self::build(
            InMemoryCodeStore::new(),
            RecordingNotifier::new(),
            Arc::new(SeededCodeGenerator::new(42)),
            &VerificationSettings::default(),
        )
    }

    fn build(
        codes: InMemoryCodeStore,
        notifier: RecordingNotifier,
        generator: Arc<dyn CodeGenerator>,
        settings: &VerificationSettings,
    ) -> Self {
        let codes = Arc::new(codes);
        let identities = Arc::new(InMemoryIdentityStore::new());
        let notifier = Arc::new(notifier);
        let clock = Arc::new(FixedClock::at(mocks::t0()));

        let issuer = CodeIssuer::new(
            codes.clone(),
            notifier.clone(),
            generator,
            clock.clone(),
            settings,
        );
        let coordinator = VerificationCoordinator::new(identities.clone(), codes.clone());

        Self { codes, identities, notifier, clock, issuer, coordinator }
    }

    /// 같은 저장소를 쓰되 다른 생성기를 가진 발급기
    fn issuer_with(&self, generator: Arc<dyn CodeGenerator>) -> CodeIssuer {
        CodeIssuer::new(
            self.codes.clone(),
            self.notifier.clone(),
            generator,
            self.clock.clone(),
            &VerificationSettings::default(),
        )
    }
}
