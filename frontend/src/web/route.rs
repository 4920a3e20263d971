//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、守卫规则，以及在渲染之前求值的
//! 声明式守卫决策。

use std::fmt::Display;

use crate::session::SessionStatus;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 落地页 (默认路由)
    #[default]
    Landing,
    /// 登录页面
    Login,
    /// 注册页面
    SignUp,
    /// 报告提交表单
    Report,
    /// 控制面板 (需要认证)
    Dashboard,
    /// 社区信息流 (需要认证)
    Feed,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Landing,
            "/login" => Self::Login,
            "/signup" => Self::SignUp,
            "/report" => Self::Report,
            "/dashboard" => Self::Dashboard,
            "/feed" => Self::Feed,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::SignUp => "/signup",
            Self::Report => "/report",
            Self::Dashboard => "/dashboard",
            Self::Feed => "/feed",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Feed)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 守卫决策
// =========================================================

/// 守卫决策：在渲染之前求值，由路由服务和路由出口共同消费
///
/// 守卫本身不执行任何导航副作用，保持可单元测试。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话尚未解析完成：渲染中性加载指示，既不渲染受保护视图也不重定向
    Wait,
    /// 允许渲染目标视图
    Render,
    /// 重定向到登录页；`from` 记录原始目标，登录成功后尽力返回
    RedirectToLogin { from: AppRoute },
}

/// 对目标路由求值守卫决策
///
/// 纯函数：相同输入永远产生相同决策。
pub fn evaluate_guard(route: AppRoute, status: SessionStatus) -> GuardDecision {
    if !route.requires_auth() {
        return GuardDecision::Render;
    }
    match status {
        SessionStatus::Initializing => GuardDecision::Wait,
        SessionStatus::Authenticated => GuardDecision::Render,
        SessionStatus::Unauthenticated => GuardDecision::RedirectToLogin { from: route },
    }
}

#[cfg(test)]
mod tests;
