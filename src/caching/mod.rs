//! 캐싱 계층 모듈
//!
//! 프로세스 메모리 안에서 자격 증명을 보관합니다. 재시작 후 복원은 하지 않습니다.
//!
//! # 주요 기능
//!
//! - 잠금 없는 읽기, 값 전체 원자적 교체 (`arc-swap`)
//! - 안전 여유를 적용한 생존 판단
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::SessionState;
//!
//! let state = SessionState::new();
//! state.install("session-id", 3600);
//! assert!(state.is_authenticated());
//! ```

pub mod credential_cell;
pub mod session_state;

pub use credential_cell::CredentialCell;
pub use session_state::SessionState;
