//! Response envelope shared by all chat endpoints
//!
//! Store-layer failures still answer `code: 0`; only the payload carries the
//! outcome.

use serde::Serialize;

use crate::models::ChatEntry;

pub const MSG_WELCOME: &str = "欢迎访问";
pub const MSG_STORE_OK: &str = "信息存储成功";
pub const MSG_STORE_FAILED: &str = "信息存储失败";
pub const MSG_HISTORY_OK: &str = "获取用户聊天记录成功";

/// Code for a handled request, whatever the store outcome.
pub const CODE_OK: i32 = 0;
/// Code for a request rejected before reaching the store.
pub const CODE_REJECTED: i32 = 1;

/// `{"code": .., "msg": .., "data": ..}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub code: i32,
    pub msg: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(msg: impl Into<String>, data: T) -> Self {
        Self {
            code: CODE_OK,
            msg: msg.into(),
            data,
        }
    }
}

impl Envelope<&'static str> {
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self {
            code: CODE_REJECTED,
            msg: msg.into(),
            data: "",
        }
    }
}

/// `data` of `/store_content`
#[derive(Debug, Serialize)]
pub struct StoreStatus {
    pub status: bool,
}

/// `data` of `/get_chat_history`
#[derive(Debug, Serialize)]
pub struct ChatHistory {
    pub chat_history: Vec<ChatEntry>,
}
