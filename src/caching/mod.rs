//! 캐싱 계층 모듈
//!
//! Redis 기반 JSON 캐시입니다. 사용자 조회 캐시와 인증 코드 재발송 쿨다운 마커를
//! 저장합니다. 인증 코드 자체는 캐시하지 않습니다.
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
