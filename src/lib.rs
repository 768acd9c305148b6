//! 계정 서비스 백엔드
//!
//! 회원가입과 이메일 인증 코드(OTP) 기반 계정 활성화를 제공하는 Rust 서비스입니다.
//! 싱글톤 매크로 기반 의존성 주입 위에 MongoDB(영구 저장)와 Redis(캐시, 쿨다운)를
//! 사용합니다.
//!
//! # Features
//!
//! - **회원가입**: 이메일 정규화, bcrypt 비밀번호 해싱, 가입 직후 인증 코드 발송
//! - **인증 코드 발급**: OS CSPRNG 기반 6자리 코드, 설정 가능한 TTL
//! - **인증 코드 검증**: 만료 확인, 원자적 1회 사용 처리, 계정 인증 상태 전환
//! - **재발송**: 사용자별 쿨다운, 선택적 이전 코드 무효화
//! - **메일 발송**: 콘솔/HTTP API 백엔드, 재시도
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/v1/accounts/*
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증, 응답 매핑
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐      ┌──────────────────────────────┐
//! │    Services     │ ───▶ │ verification core            │
//! └─────────────────┘      │ CodeIssuer / Coordinator     │
//!          │               │ (trait 기반, 저장소 비의존)  │
//!          ▼               └──────────────────────────────┘
//! ┌─────────────────┐
//! │  Repositories   │ ← IdentityStore / VerificationCodeStore 구현
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │
//! └─────────────────┘
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
