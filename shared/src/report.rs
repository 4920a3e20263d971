//! 报告与评论模型
//!
//! 报告实体由后端独占所有；客户端只反映服务端状态，
//! 并在写入确认后对本地副本打补丁。

use serde::{Deserialize, Serialize};

use crate::User;
use crate::date::Timestamp;

// =========================================================
// 状态生命周期
// =========================================================

/// 报告状态生命周期：Pending → In Progress → Fixed
///
/// 线上格式沿用后端的状态枚举（`PENDING` / `DIPROSES` / `SELESAI`）；
/// 未知字符串视为反序列化错误，客户端绝不替后端发明状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "DIPROSES")]
    InProgress,
    #[serde(rename = "SELESAI")]
    Fixed,
}

impl ReportStatus {
    /// 状态下拉菜单使用的全量列表，按生命周期顺序排列
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Pending,
        ReportStatus::InProgress,
        ReportStatus::Fixed,
    ];

    /// 界面显示标签
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Fixed => "Fixed",
        }
    }

    /// 状态徽章的样式类（daisyUI badge）
    pub fn badge_class(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "badge badge-error",
            ReportStatus::InProgress => "badge badge-warning",
            ReportStatus::Fixed => "badge badge-success",
        }
    }

    /// 线上格式的字符串值
    pub fn as_wire(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::InProgress => "DIPROSES",
            ReportStatus::Fixed => "SELESAI",
        }
    }
}

// =========================================================
// 实体
// =========================================================

/// 基础设施损坏报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Report {
    /// 提交者显示名
    pub fn author_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.user_name.as_str())
            .unwrap_or("Unknown")
    }

    /// 信息流的搜索与状态过滤
    ///
    /// 搜索词不区分大小写，匹配描述、标题、提交者或地点；
    /// `status` 为 `None` 时表示不按状态过滤。
    pub fn matches(&self, search: &str, status: Option<ReportStatus>) -> bool {
        if let Some(wanted) = status {
            if self.status != wanted {
                return false;
            }
        }
        let term = search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.description.to_lowercase().contains(&term)
            || self.title.to_lowercase().contains(&term)
            || self.author_name().to_lowercase().contains(&term)
            || self.location.to_lowercase().contains(&term)
    }
}

/// 报告下的评论
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(rename = "reportId")]
    pub report_id: u64,
    pub user_name: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(desc: &str, location: &str, status: ReportStatus) -> Report {
        Report {
            id: 1,
            title: "Broken sidewalk".into(),
            description: desc.into(),
            location: location.into(),
            image: None,
            status,
            user: Some(User {
                id_user: 2,
                user_name: "John Doe".into(),
                user_email: "john@example.com".into(),
                user_photo: None,
                role: None,
            }),
            created_at: None,
            comments: Vec::new(),
        }
    }

    #[test]
    fn status_uses_backend_wire_names() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::InProgress).unwrap(),
            "\"DIPROSES\""
        );
        let parsed: ReportStatus = serde_json::from_str("\"SELESAI\"").unwrap();
        assert_eq!(parsed, ReportStatus::Fixed);
    }

    #[test]
    fn unknown_status_is_an_error_not_a_default() {
        let parsed: Result<ReportStatus, _> = serde_json::from_str("\"ARCHIVED\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn status_labels_and_badges() {
        assert_eq!(ReportStatus::Pending.label(), "Pending");
        assert_eq!(ReportStatus::InProgress.label(), "In Progress");
        assert_eq!(ReportStatus::Fixed.badge_class(), "badge badge-success");
    }

    #[test]
    fn matches_is_case_insensitive_across_fields() {
        let r = report("Deep pothole near the school", "Main Street", ReportStatus::Pending);
        assert!(r.matches("POTHOLE", None));
        assert!(r.matches("john", None));
        assert!(r.matches("main street", None));
        assert!(!r.matches("bridge", None));
    }

    #[test]
    fn matches_combines_search_and_status() {
        let r = report("Deep pothole", "Main Street", ReportStatus::Fixed);
        assert!(r.matches("pothole", Some(ReportStatus::Fixed)));
        assert!(!r.matches("pothole", Some(ReportStatus::Pending)));
        // 空搜索词只按状态过滤
        assert!(r.matches("  ", Some(ReportStatus::Fixed)));
    }

    #[test]
    fn report_parses_minimal_payload() {
        let json = r#"{"id":3,"title":"t","description":"d","location":"l","status":"PENDING"}"#;
        let r: Report = serde_json::from_str(json).unwrap();
        assert_eq!(r.status, ReportStatus::Pending);
        assert!(r.comments.is_empty());
        assert_eq!(r.author_name(), "Unknown");
    }
}
