use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;
pub mod report;

pub use report::{Comment, Report, ReportStatus};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中持久化会话令牌的键
pub const STORAGE_TOKEN_KEY: &str = "fixmycity_token";
/// LocalStorage 中持久化用户记录（JSON）的键
pub const STORAGE_USER_KEY: &str = "fixmycity_user";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 已认证用户的档案记录
///
/// 字段名与后端返回的 JSON 载荷一致（`id_user`、`user_name` 等）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id_user: u64,
    pub user_name: String,
    pub user_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    /// 头像占位符使用的首字母
    pub fn initial(&self) -> String {
        self.user_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_roundtrips_through_json() {
        let user = User {
            id_user: 7,
            user_name: "Ann".into(),
            user_email: "ann@example.com".into(),
            user_photo: None,
            role: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn user_parses_payload_with_extra_fields() {
        // 后端载荷可能携带未知字段，客户端必须容忍
        let json = r#"{"id_user":1,"user_name":"Ann","user_email":"a@b.c","user_birthday":"2000-01-01"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_name, "Ann");
        assert!(user.role.is_none());
    }

    #[test]
    fn initial_is_uppercased_first_char() {
        let mut user = User {
            id_user: 1,
            user_name: "ann louis".into(),
            user_email: String::new(),
            user_photo: None,
            role: None,
        };
        assert_eq!(user.initial(), "A");
        user.user_name.clear();
        assert_eq!(user.initial(), "?");
    }
}
