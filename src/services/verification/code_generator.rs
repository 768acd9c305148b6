//! 인증 코드 생성기와 시스템 시계

use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, Rng};

use super::traits::{Clock, CodeGenerator};
use crate::domain::entities::verification::verification_code::{CODE_MAX, CODE_MIN};

/// 주어진 난수원으로 100000-999999 범위의 코드를 뽑습니다.
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
}

/// 운영체제 CSPRNG(`OsRng`) 기반 생성기
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureCodeGenerator;

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = OsRng;
        generate_code_with(&mut rng)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
