//! FixMyCity 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `session`: 会话持久化（纯逻辑，可原生测试）
//! - `auth`: 认证状态管理（唯一事实来源）
//! - `web::route`: 路由定义与守卫决策（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `api`: 后端客户端
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod dashboard;
    pub mod feed;
    mod icons;
    pub mod landing;
    pub mod login;
    pub mod navbar;
    pub mod report_form;
    pub mod signup;
}
mod session;
mod validate;

use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::feed::FeedPage;
use crate::components::landing::LandingPage;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::report_form::ReportFormPage;
use crate::components::signup::SignUpPage;

use leptos::prelude::*;

// 原生 Web API 封装模块
pub(crate) mod web {
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::SignUp => view! { <SignUpPage /> }.into_any(),
        AppRoute::Report => view! { <ReportFormPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Feed => view! { <FeedPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 初始化会话状态（同步读取 LocalStorage，一次性）
    init_auth(&auth_ctx);

    // 3. 获取会话状态信号，用于注入路由服务（解耦）
    let status = auth_ctx.status_signal();

    view! {
        // 4. 路由器组件：注入会话信号实现守卫
        <Router status=status>
            <div class="min-h-screen flex flex-col bg-base-200">
                <Navbar />
                <main class="flex-1">
                    <RouterOutlet matcher=route_matcher />
                </main>
            </div>
        </Router>
    }
}
