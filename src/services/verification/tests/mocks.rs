//! 메모리 기반 협력자 구현

use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    task::{Context, Poll},
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use mongodb::bson::oid::ObjectId;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    core::errors::{AppError, AppResult},
    domain::entities::{
        users::user::User,
        verification::verification_code::{to_bson_datetime, VerificationCode},
    },
    services::verification::{
        code_generator::generate_code_with,
        traits::{Clock, CodeGenerator, IdentityStore, Notifier, VerificationCodeStore},
    },
};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

/// 첫 폴링에서 한 번 양보하는 future. 동시 요청이 조회 단계에서 엇갈리게 만듭니다.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

#[derive(Default)]
pub struct InMemoryCodeStore {
    codes: Arc<Mutex<HashMap<ObjectId, VerificationCode>>>,
    yield_on_lookup: bool,
    pub should_fail: bool,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn yielding() -> Self {
        Self { yield_on_lookup: true, ..Self::default() }
    }

    pub fn failing() -> Self {
        Self { should_fail: true, ..Self::default() }
    }

    pub fn get(&self, id: &ObjectId) -> Option<VerificationCode> {
        self.codes.lock().unwrap().get(id).cloned()
    }

    pub fn code_value(&self, id: &ObjectId) -> String {
        self.get(id).map(|c| c.code).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.codes.lock().unwrap().len()
    }

    fn check(&self) -> AppResult<()> {
        if self.should_fail {
            Err(AppError::DatabaseError("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl VerificationCodeStore for InMemoryCodeStore {
    async fn create(&self, mut code: VerificationCode) -> AppResult<ObjectId> {
        self.check()?;
        let id = ObjectId::new();
        code.id = Some(id);
        self.codes.lock().unwrap().insert(id, code);
        Ok(id)
    }

    async fn find_active(&self, user_id: &ObjectId, code: &str) -> AppResult<Option<VerificationCode>> {
        self.check()?;
        let found = self
            .codes
            .lock()
            .unwrap()
            .values()
            .find(|c| &c.user_id == user_id && c.code == code && !c.consumed && !c.revoked)
            .cloned();

        if self.yield_on_lookup {
            YieldOnce(false).await;
        }
        Ok(found)
    }

    async fn mark_consumed(&self, id: &ObjectId, at: DateTime<Utc>) -> AppResult<bool> {
        self.check()?;
        let mut codes = self.codes.lock().unwrap();
        match codes.get_mut(id) {
            Some(code) if !code.consumed && !code.revoked => {
                code.consumed = true;
                code.consumed_at = Some(to_bson_datetime(at));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_active(&self, user_id: &ObjectId) -> AppResult<u64> {
        self.check()?;
        let mut revoked = 0;
        for code in self.codes.lock().unwrap().values_mut() {
            if &code.user_id == user_id && !code.consumed && !code.revoked {
                code.revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}

#[derive(Default)]
pub struct InMemoryIdentityStore {
    users: Arc<Mutex<HashMap<ObjectId, User>>>,
    fail_updates: AtomicBool,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, email: &str) -> User {
        let mut user = User::new(
            email.to_string(),
            "Ada".to_string(),
            "Lovelace".to_string(),
            "$2b$04$hash".to_string(),
        );
        user.id = Some(ObjectId::new());
        self.users.lock().unwrap().insert(user.id.unwrap(), user.clone());
        user
    }

    pub fn is_verified(&self, email: &str) -> bool {
        self.users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.email == email && u.is_email_verified)
    }

    /// 이후의 `mark_verified` 호출을 저장소 오류로 만듭니다
    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().values().find(|u| u.email == email).cloned())
    }

    async fn mark_verified(&self, user_id: &ObjectId) -> AppResult<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("users collection unavailable".to_string()));
        }
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound("user".to_string()))?;
        user.is_email_verified = true;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    pub should_fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { should_fail: true, ..Self::default() }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        if self.should_fail {
            return Err(AppError::ExternalServiceError("mail relay refused connection".to_string()));
        }
        self.sent.lock().unwrap().push(SentMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// 같은 시드면 같은 코드 순서를 내는 생성기
pub struct SeededCodeGenerator {
    rng: Mutex<StdRng>,
}

impl SeededCodeGenerator {
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl CodeGenerator for SeededCodeGenerator {
    fn generate(&self) -> String {
        generate_code_with(&mut *self.rng.lock().unwrap())
    }
}
