//! BrightPattern 구독 요청/응답 DTO
//!
//! 실제 API는 숫자 키 `"1"` 아래에 `agent_grids` 배열을 두는 구조를 받습니다.
//!
//! ```json
//! {
//!   "1": {
//!     "agent_grids": [
//!       {
//!         "id": "1",
//!         "team_ids": ["..."],
//!         "limit": 1000,
//!         "columns": [{"id": "1", "statName": "first_last_name"}],
//!         "order": [{"by": "1", "dir": "DESC"}],
//!         "service_ids": [],
//!         "my_subteam_only": false,
//!         "logged_in_agents_only": true
//!       }
//!     ]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use validator::Validate;

/// `agent_grids` 기반 구독 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubscriptionRequest {
    #[validate(length(min = 1, message = "agent_grids는 비어 있을 수 없습니다"), nested)]
    pub agent_grids: Vec<AgentGrid>,
}

impl SubscriptionRequest {
    /// API가 요구하는 `{"1": {"agent_grids": [...]}}` 형태로 감쌉니다.
    pub fn into_wire_body(self) -> Value {
        json!({ "1": { "agent_grids": self.agent_grids } })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AgentGrid {
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "grid id는 1~50자여야 합니다"))]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_ids: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(default)]
    #[validate(length(min = 1, message = "columns는 비어 있을 수 없습니다"))]
    pub columns: Vec<GridColumn>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<GridOrder>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_ids: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_subteam_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_agents_only: Option<bool>,
}

/// 통계 컬럼 정의 (`{"id": "1", "statName": "first_last_name"}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridColumn {
    pub id: String,
    #[serde(rename = "statName")]
    pub stat_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridOrder {
    pub by: String,
    pub dir: String,
}

/// 구독 응답 - 알려진 필드 외의 값은 `others`에 그대로 보존됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    #[serde(rename = "subscriptionId", default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(rename = "expiresAt", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,

    #[serde(flatten)]
    pub others: Map<String, Value>,
}
