//! 认证模块
//!
//! 管理会话状态（"谁在登录"的唯一事实来源），与路由系统解耦。
//! 路由服务通过注入的会话状态信号来求值守卫决策。
//! 会话持久化委托给 `session::SessionStore`，本模块是唯一写入方。

use leptos::prelude::*;

use crate::api::FixMyCityApi;
use crate::session::{Session, SessionStatus, SessionStore};
use crate::web::LocalStorage;
use fixmycity_shared::User;

fn session_store() -> SessionStore<LocalStorage> {
    SessionStore::new(LocalStorage)
}

/// 会话状态
#[derive(Clone)]
pub struct AuthState {
    /// 认证客户端实例（仅在认证成功后存在，内部持有令牌）
    pub api: Option<FixMyCityApi>,
    /// 当前用户记录（与 `api` 同生共死）
    pub user: Option<User>,
    /// 是否仍在等待首次本地读取
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            api: None,
            user: None,
            is_loading: true,
        }
    }
}

impl AuthState {
    /// 派生值：当且仅当发布了用户记录时为已登录
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// 当前会话状态机状态
    pub fn status(&self) -> SessionStatus {
        if self.is_loading {
            SessionStatus::Initializing
        } else if self.user.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 获取会话状态信号（用于路由服务注入）
    pub fn status_signal(&self) -> Signal<SessionStatus> {
        let state = self.state;
        Signal::derive(move || state.get().status())
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化会话状态
///
/// 应用挂载时同步读取一次 LocalStorage，不触网。损坏的数据由
/// SessionStore 清除并降级为未登录。之后所有读取都走内存信号，
/// 不再直接读存储。
pub fn init_auth(ctx: &AuthContext) {
    let restored = session_store().load();
    ctx.set_state.update(|state| {
        if let Some(Session { token, user }) = restored {
            state.api = Some(FixMyCityApi::with_token(token));
            state.user = Some(user);
        }
        state.is_loading = false;
    });
}

/// 登录：持久化会话并发布已认证状态
///
/// 凭据由登录页通过 `POST /login` 换取后交给本函数；认证本身
/// 不在此处发生，失败的登录永远不会走到这里。
pub fn login(ctx: &AuthContext, user: User, token: String) {
    let persisted = session_store().save(&Session {
        token: token.clone(),
        user: user.clone(),
    });
    if !persisted {
        // 持久化失败时内存会话仍然有效，只是刷新后丢失
        web_sys::console::warn_1(&"[Auth] Session could not be persisted.".into());
    }
    ctx.set_state.update(|state| {
        state.api = Some(FixMyCityApi::with_token(token));
        state.user = Some(user);
        state.is_loading = false;
    });
}

/// 仅清除本地会话，不通知服务端
///
/// 用于服务端已判定会话失效（401/403）的场景。
pub fn clear_session(ctx: &AuthContext) {
    session_store().clear();
    ctx.set_state.update(|state| {
        state.api = None;
        state.user = None;
        state.is_loading = false;
    });
}

/// 注销：尽力通知服务端，随后无条件清除本地会话
///
/// 网络失败只记录日志，成功与失败路径都汇合到本地清除；
/// 重复注销是无操作。导航由路由服务的会话状态监听自动处理。
pub async fn logout(ctx: &AuthContext) {
    let api = ctx.state.get_untracked().api;
    if let Some(api) = api {
        if let Err(e) = api.logout().await {
            web_sys::console::warn_1(&format!("[Auth] Logout notification failed: {}", e).into());
        }
    }
    clear_session(ctx);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id_user: 1,
            user_name: "Ann".into(),
            user_email: "ann@example.com".into(),
            user_photo: None,
            role: None,
        }
    }

    #[test]
    fn fresh_state_is_initializing() {
        let state = AuthState::default();
        assert_eq!(state.status(), SessionStatus::Initializing);
        assert!(!state.is_logged_in());
    }

    #[test]
    fn resolved_state_without_user_is_unauthenticated() {
        let state = AuthState {
            api: None,
            user: None,
            is_loading: false,
        };
        assert_eq!(state.status(), SessionStatus::Unauthenticated);
        assert!(!state.is_logged_in());
    }

    #[test]
    fn authenticated_state_has_both_api_and_user() {
        let state = AuthState {
            api: Some(FixMyCityApi::with_token("abc".into())),
            user: Some(user()),
            is_loading: false,
        };
        assert_eq!(state.status(), SessionStatus::Authenticated);
        assert!(state.is_logged_in());
        assert!(state.api.is_some());
    }
}
