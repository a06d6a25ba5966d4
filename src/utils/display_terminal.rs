//! 부트스트랩 터미널 출력
//!
//! 서비스 시작 시 연결할 BrightPattern 엔드포인트와 호출 지점별 재시도 정책을
//! 한눈에 보여줍니다. 로그와 별개로 stdout에 직접 출력합니다.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ BrightPattern Session Service                        │
//! └──────────────────────────────────────────────────────┘
//! [1] Remote endpoints
//!    ├─ oauth              https://tenant/configapi/v2/oauth/token
//!    ├─ session            https://tenant/configapi/v2/auth
//! [2] Retry policies
//!    ├─ oauth_token        retries=2 backoff=300ms timeout=15s on [transport_reset, io_failure, timeout]
//! ```

use crate::http::RetryPolicy;

const BANNER_WIDTH: usize = 56;

/// 제목 한 줄짜리 상자를 만듭니다. 제목이 너무 길면 상자를 넘어갑니다.
pub fn render_banner(title: &str) -> String {
    let inner = BANNER_WIDTH - 2;
    let rule = "─".repeat(inner);
    format!(
        "┌{rule}┐\n│ {title:<width$} │\n└{rule}┘",
        rule = rule,
        title = title,
        width = inner - 2
    )
}

pub fn print_banner(title: &str) {
    println!("{}", render_banner(title));
}

pub fn print_step(step: u8, description: &str) {
    println!("[{}] {}", step, description);
}

/// 라벨과 원격 URL을 정렬해 출력합니다.
pub fn print_endpoint(label: &str, url: &str) {
    println!("   ├─ {:<18} {}", label, url);
}

/// 정책 하나를 `retries=.. backoff=.. timeout=.. on [..]` 형태로 요약합니다.
pub fn describe_policy(name: &str, policy: &RetryPolicy) -> String {
    let kinds = policy
        .retryable_kinds()
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{:<18} retries={} backoff={:?} timeout={:?} on [{}]",
        name,
        policy.max_retries(),
        policy.base_delay(),
        policy.timeout(),
        kinds
    )
}

pub fn print_retry_policies(policies: &[(&str, RetryPolicy)]) {
    for (name, policy) in policies {
        println!("   ├─ {}", describe_policy(name, policy));
    }
}

/// 등록된 서비스 수와 바인딩 주소를 출력합니다.
pub fn print_ready(services: usize, bind_address: &str) {
    println!();
    print_banner("Credential services ready");
    println!("   services registered : {}", services);
    println!("   listening on        : http://{}", bind_address);
    println!();
}
