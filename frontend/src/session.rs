//! 会话持久化模块
//!
//! 会话（令牌 + 用户记录）以两个键的形式存放在浏览器 LocalStorage 中，
//! 两个键必须同时写入、同时清除。通过 `SessionBackend` trait 与具体
//! 存储解耦，测试时注入内存实现。

use fixmycity_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY, User};

/// 会话状态机的三个状态
///
/// 应用启动时处于 `Initializing`，首次本地读取完成后进入
/// `Authenticated` 或 `Unauthenticated`，此后只在 login/logout 之间迁移。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Initializing,
    Unauthenticated,
    Authenticated,
}

/// 客户端本地持有的已认证身份
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// 不透明的 Bearer 凭据
    pub token: String,
    pub user: User,
}

/// 会话存储后端
///
/// 生产环境由 LocalStorage 实现；操作失败以 `false`/`None` 表达，
/// 不会 panic。
pub trait SessionBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// 会话存储
///
/// 唯一允许读写会话键的组件。不变量：令牌和用户记录要么都在、
/// 要么都不在——任何残缺组合视为损坏并立即清除。
pub struct SessionStore<B: SessionBackend> {
    backend: B,
}

impl<B: SessionBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// 从存储恢复会话
    ///
    /// 损坏的数据（用户记录不可解析、键残缺）不致命：清除存储并
    /// 返回 `None`，调用方降级为未登录状态。重复调用结果一致。
    pub fn load(&self) -> Option<Session> {
        let token = self.backend.get(STORAGE_TOKEN_KEY);
        let raw_user = self.backend.get(STORAGE_USER_KEY);
        match (token, raw_user) {
            (Some(token), Some(raw)) => match serde_json_wasm::from_str::<User>(&raw) {
                Ok(user) => Some(Session { token, user }),
                Err(_) => {
                    self.clear();
                    None
                }
            },
            (None, None) => None,
            // 残缺的一半视为损坏
            _ => {
                self.clear();
                None
            }
        }
    }

    /// 持久化会话，两个键一起写入
    ///
    /// 任一写入失败时回滚为全空，保证不变量成立。
    pub fn save(&self, session: &Session) -> bool {
        let raw_user = match serde_json_wasm::to_string(&session.user) {
            Ok(v) => v,
            Err(_) => return false,
        };
        if !self.backend.set(STORAGE_TOKEN_KEY, &session.token) {
            self.clear();
            return false;
        }
        if !self.backend.set(STORAGE_USER_KEY, &raw_user) {
            self.clear();
            return false;
        }
        true
    }

    /// 清除两个会话键
    pub fn clear(&self) {
        self.backend.remove(STORAGE_TOKEN_KEY);
        self.backend.remove(STORAGE_USER_KEY);
    }
}

#[cfg(test)]
mod tests;
