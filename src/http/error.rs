//! 외부 HTTP 호출 실패 분류
//!
//! reqwest가 돌려주는 구체적인 에러 타입 대신, 재시도 정책이 판단에 사용할 수 있는
//! 닫힌 열거형 [`ErrorKind`]로 모든 실패를 분류합니다.
//!
//! | ErrorKind | 의미 | 기본 재시도 |
//! |-----------|------|-------------|
//! | `TransportReset` | 응답 완료 전 연결이 끊김 | O |
//! | `IoFailure` | 소켓/연결 수준 I/O 오류 | O (정책별) |
//! | `Timeout` | 호출 시간 예산 초과 | O |
//! | `RemoteRejection` | 2xx가 아닌 애플리케이션 응답 | X |
//! | `Serialization` | 응답 본문 해석 실패 | X |
//! | `InvalidRequest` | 요청 자체를 만들 수 없음 | X |

use std::error::Error as StdError;
use std::fmt;
use std::io;

use thiserror::Error;

/// 재시도 판단에 사용되는 실패 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TransportReset,
    IoFailure,
    Timeout,
    RemoteRejection,
    Serialization,
    InvalidRequest,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::TransportReset => "transport_reset",
            ErrorKind::IoFailure => "io_failure",
            ErrorKind::Timeout => "timeout",
            ErrorKind::RemoteRejection => "remote_rejection",
            ErrorKind::Serialization => "serialization",
            ErrorKind::InvalidRequest => "invalid_request",
        }
    }

    /// 네트워크 계층의 일시적 실패인지 여부
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorKind::TransportReset | ErrorKind::IoFailure | ErrorKind::Timeout
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request Executor가 호출자에게 돌려주는 에러
///
/// 재시도가 모두 소진된 경우에도 "재시도 소진" 같은 합성 에러가 아니라
/// 마지막으로 발생한 실제 실패가 그대로 전달됩니다.
#[derive(Error, Debug)]
pub enum RequestError {
    /// 응답이 끝나기 전에 연결이 끊김 (connection reset, premature close)
    #[error("Connection closed before response completed: {0}")]
    TransportReset(String),

    #[error("I/O failure: {0}")]
    Io(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    /// 원격 서버가 2xx가 아닌 상태 코드로 응답
    #[error("Remote rejected request with status {status}: {body}")]
    RemoteRejection { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RequestError {
    /// 에러를 닫힌 분류 체계로 변환합니다.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RequestError::TransportReset(_) => ErrorKind::TransportReset,
            RequestError::Io(_) => ErrorKind::IoFailure,
            RequestError::Timeout(_) => ErrorKind::Timeout,
            RequestError::RemoteRejection { .. } => ErrorKind::RemoteRejection,
            RequestError::Serialization(_) => ErrorKind::Serialization,
            RequestError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// 원격 거절인 경우 HTTP 상태 코드
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::RemoteRejection { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        classify(&err)
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Serialization(err.to_string())
    }
}

/// hyper가 응답 도중 연결 종료를 보고할 때 사용하는 메시지
const PREMATURE_CLOSE_MARKERS: [&str; 3] = [
    "connection closed before message completed",
    "IncompleteMessage",
    "connection reset",
];

/// reqwest 에러를 원인 체인까지 확인하여 분류합니다.
pub fn classify(err: &reqwest::Error) -> RequestError {
    let detail = describe_chain(err);

    if err.is_timeout() {
        return RequestError::Timeout(detail);
    }

    if let Some(kind) = find_io_error_kind(err) {
        return match kind {
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => RequestError::TransportReset(detail),
            io::ErrorKind::TimedOut => RequestError::Timeout(detail),
            _ => RequestError::Io(detail),
        };
    }

    if PREMATURE_CLOSE_MARKERS.iter().any(|marker| detail.contains(marker)) {
        return RequestError::TransportReset(detail);
    }

    if let Some(status) = err.status() {
        return RequestError::RemoteRejection {
            status: status.as_u16(),
            body: detail,
        };
    }

    if err.is_decode() {
        return RequestError::Serialization(detail);
    }

    if err.is_connect() || err.is_request() || err.is_body() {
        return RequestError::Io(detail);
    }

    RequestError::InvalidRequest(detail)
}

fn find_io_error_kind(err: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        source = cause.source();
    }
    None
}

fn describe_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            RequestError::TransportReset("reset".into()).kind(),
            ErrorKind::TransportReset
        );
        assert_eq!(RequestError::Io("refused".into()).kind(), ErrorKind::IoFailure);
        assert_eq!(RequestError::Timeout("30s".into()).kind(), ErrorKind::Timeout);
        assert_eq!(
            RequestError::RemoteRejection { status: 400, body: String::new() }.kind(),
            ErrorKind::RemoteRejection
        );
    }

    #[test]
    fn test_only_network_kinds_are_transient() {
        assert!(ErrorKind::TransportReset.is_transient());
        assert!(ErrorKind::IoFailure.is_transient());
        assert!(ErrorKind::Timeout.is_transient());
        assert!(!ErrorKind::RemoteRejection.is_transient());
        assert!(!ErrorKind::Serialization.is_transient());
        assert!(!ErrorKind::InvalidRequest.is_transient());
    }

    #[test]
    fn test_rejection_exposes_status() {
        let err = RequestError::RemoteRejection { status: 404, body: "missing".into() };
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
        assert_eq!(RequestError::Io("x".into()).status(), None);
    }

    #[tokio::test]
    async fn test_refused_connection_is_io_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = reqwest::Client::new()
            .get(format!("http://{}", addr))
            .send()
            .await
            .expect_err("connection must be refused");

        assert_eq!(classify(&err).kind(), ErrorKind::IoFailure);
    }
}
