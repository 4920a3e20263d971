//! 时间类型模块
//!
//! `Timestamp` 是可序列化的毫秒时间戳。后端在不同接口里既可能返回
//! 毫秒数字也可能返回 RFC 3339 字符串，反序列化时两种都接受。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    /// 当前时间
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// 从 RFC 3339 字符串解析，失败返回 None
    pub fn parse(s: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Self(dt.timestamp_millis()))
    }

    /// 信息流卡片使用的相对时间文案，如 "4 hours ago"
    ///
    /// `now` 之前的时间正常计算；时钟偏差导致的未来时间归为 "just now"。
    pub fn relative_to(&self, now: Timestamp) -> String {
        let secs = (now.0 - self.0) / 1000;
        if secs < 60 {
            return "just now".to_string();
        }
        let (amount, unit) = if secs < 3600 {
            (secs / 60, "minute")
        } else if secs < 86_400 {
            (secs / 3600, "hour")
        } else {
            (secs / 86_400, "day")
        };
        if amount == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", amount, unit)
        }
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a millisecond timestamp or an RFC 3339 string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
        Ok(Timestamp(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
        Ok(Timestamp(v as i64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Timestamp, E> {
        Ok(Timestamp(v as i64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
        Timestamp::parse(v).ok_or_else(|| E::custom(format!("invalid timestamp: {v}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_millis_and_rfc3339() {
        let from_num: Timestamp = serde_json::from_str("1700000000000").unwrap();
        assert_eq!(from_num.as_millis(), 1_700_000_000_000);

        let from_str: Timestamp = serde_json::from_str("\"2023-11-14T22:13:20Z\"").unwrap();
        assert_eq!(from_str, from_num);
    }

    #[test]
    fn rejects_garbage_strings() {
        let bad: Result<Timestamp, _> = serde_json::from_str("\"yesterday\"");
        assert!(bad.is_err());
    }

    #[test]
    fn relative_age_buckets() {
        let now = Timestamp::new(1_000_000_000);
        let ago = |secs: i64| Timestamp::new(now.as_millis() - secs * 1000);

        assert_eq!(ago(5).relative_to(now), "just now");
        assert_eq!(ago(60).relative_to(now), "1 minute ago");
        assert_eq!(ago(15 * 60).relative_to(now), "15 minutes ago");
        assert_eq!(ago(4 * 3600).relative_to(now), "4 hours ago");
        assert_eq!(ago(3 * 86_400).relative_to(now), "3 days ago");
    }

    #[test]
    fn future_timestamps_clamp_to_just_now() {
        let now = Timestamp::new(1_000_000);
        let future = Timestamp::new(2_000_000);
        assert_eq!(future.relative_to(now), "just now");
    }
}
