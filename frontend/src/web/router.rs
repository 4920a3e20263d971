//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 导航流程为"请求 -> 守卫求值 -> 写入 History -> 更新信号"；
//! 守卫决策本身在 `route` 模块中以纯函数求值。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardDecision, evaluate_guard};
use crate::session::SessionStatus;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 写入 History 状态
///
/// 用户发起的导航用 pushState，守卫重定向用 replaceState，
/// 避免后退按钮落回被拦截的地址。
fn write_history(path: &str, replace: bool) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = if replace {
                history.replace_state_with_url(&JsValue::NULL, "", Some(path))
            } else {
                history.push_state_with_url(&JsValue::NULL, "", Some(path))
            };
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 会话状态以注入的信号提供，路由层不直接依赖认证模块。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话状态（注入的信号，实现解耦）
    status: Signal<SessionStatus>,
    /// 守卫拦截时记录的原始目标，登录成功后用于返回
    return_to: RwSignal<Option<AppRoute>>,
}

impl RouterService {
    fn new(status: Signal<SessionStatus>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            status,
            return_to: RwSignal::new(None),
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 会话状态信号（供路由出口求值守卫）
    pub fn status(&self) -> Signal<SessionStatus> {
        self.status
    }

    /// 取出登录前被守卫拦截的目标路由（取出即清空）
    pub fn take_return_to(&self) -> Option<AppRoute> {
        self.return_to.try_update(|v| v.take()).flatten()
    }

    /// 导航到目标路由（用户发起，pushState）
    pub fn navigate(&self, target: AppRoute) {
        self.apply(target, false);
    }

    /// 守卫求值后写入 History 并更新路由信号
    fn apply(&self, target: AppRoute, replace: bool) {
        let status = self.status.get_untracked();

        // 已认证用户访问登录页时直接送往面板（或被拦截前的目标）
        if target.should_redirect_when_authenticated() && status == SessionStatus::Authenticated {
            let redirect = self
                .take_return_to()
                .unwrap_or_else(AppRoute::auth_success_redirect);
            write_history(redirect.to_path(), replace);
            self.set_route.set(redirect);
            return;
        }

        match evaluate_guard(target, status) {
            // Wait 时路由照常写入，出口组件负责渲染加载指示；
            // 会话解析完成后由 setup_session_redirect 补救
            GuardDecision::Render | GuardDecision::Wait => {
                write_history(target.to_path(), replace);
                self.set_route.set(target);
            }
            GuardDecision::RedirectToLogin { from } => {
                web_sys::console::log_1(&"[Router] Access denied. Redirecting to login.".into());
                self.return_to.set(Some(from));
                let redirect = AppRoute::auth_failure_redirect();
                write_history(redirect.to_path(), replace);
                self.set_route.set(redirect);
            }
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let service = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 时也执行守卫逻辑，重定向用 replaceState
            let target = AppRoute::from_path(&current_path());
            service.apply(target, true);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置会话状态变化时的自动重定向
    ///
    /// 初始本地读取完成、登录、注销都会触发一次重新求值。
    fn setup_session_redirect(&self) {
        let service = *self;

        Effect::new(move |_| {
            let status = service.status.get();
            let route = service.current_route.get_untracked();

            match status {
                SessionStatus::Initializing => {}
                SessionStatus::Authenticated => {
                    // 用户刚登录，如果在登录页则返回拦截前的目标或面板
                    if route.should_redirect_when_authenticated() {
                        let redirect = service
                            .take_return_to()
                            .unwrap_or_else(AppRoute::auth_success_redirect);
                        write_history(redirect.to_path(), false);
                        service.set_route.set(redirect);
                        web_sys::console::log_1(
                            &"[Router] Session resolved: logged in, leaving login page.".into(),
                        );
                    }
                }
                SessionStatus::Unauthenticated => {
                    // 用户注销或会话失效，受保护页面重定向到登录
                    if let GuardDecision::RedirectToLogin { from } = evaluate_guard(route, status) {
                        service.return_to.set(Some(from));
                        let redirect = AppRoute::auth_failure_redirect();
                        write_history(redirect.to_path(), true);
                        service.set_route.set(redirect);
                        web_sys::console::log_1(
                            &"[Router] Session resolved: logged out, redirecting to login.".into(),
                        );
                    }
                }
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(status: Signal<SessionStatus>) -> RouterService {
    let router = RouterService::new(status);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话状态信号
    status: Signal<SessionStatus>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(status);

    children()
}

/// 路由出口组件
///
/// 对当前路由求值守卫决策：`Render` 渲染匹配视图，其余情况
/// （会话初始化中、重定向落地前的瞬间）渲染中性加载指示，
/// 绝不渲染受保护视图。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        match evaluate_guard(current, router.status().get()) {
            GuardDecision::Render => matcher(current),
            GuardDecision::Wait | GuardDecision::RedirectToLogin { .. } => view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any(),
        }
    }
}
