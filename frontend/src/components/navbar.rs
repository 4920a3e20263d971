use crate::auth::{logout, use_auth};
use crate::components::icons::{LogOut, Wrench};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 导航链接
///
/// 走路由服务而不是原生跳转，守卫在 navigate 中求值。
#[component]
fn NavLink(route: AppRoute, label: &'static str) -> impl IntoView {
    let router = use_router();
    let is_active = move || router.current_route().get() == route;

    view! {
        <a
            href=route.to_path()
            class=move || {
                if is_active() {
                    "btn btn-ghost btn-sm text-primary"
                } else {
                    "btn btn-ghost btn-sm"
                }
            }
            on:click=move |ev: leptos::web_sys::MouseEvent| {
                ev.prevent_default();
                router.navigate(route);
            }
        >
            {label}
        </a>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth_ctx = use_auth();
    let router = use_router();

    let user_name = move || {
        auth_ctx
            .state
            .get()
            .user
            .map(|u| u.user_name)
            .unwrap_or_default()
    };
    let is_logged_in = move || auth_ctx.state.get().is_logged_in();
    let is_loading = move || auth_ctx.state.get().is_loading;
    let (is_logging_out, set_is_logging_out) = signal(false);

    let on_logout = move |_| {
        if is_logging_out.get() {
            return;
        }
        set_is_logging_out.set(true);
        spawn_local(async move {
            logout(&auth_ctx).await;
            set_is_logging_out.set(false);
            // 注销后回到首页；受保护页面的重定向由路由服务兜底
            router.navigate(AppRoute::Landing);
        });
    };

    view! {
        <div class="navbar bg-base-100 shadow-md sticky top-0 z-50">
            <div class="navbar-start">
                <a
                    href="/"
                    class="btn btn-ghost text-xl gap-2"
                    on:click=move |ev: leptos::web_sys::MouseEvent| {
                        ev.prevent_default();
                        router.navigate(AppRoute::Landing);
                    }
                >
                    <span class="text-primary">
                        <Wrench attr:class="h-6 w-6" />
                    </span>
                    <span class="font-bold">"FixMyCity"</span>
                </a>
            </div>

            <div class="navbar-end gap-2">
                // 会话仍在恢复时不渲染任何账号相关入口，避免闪烁
                <Show when=move || !is_loading()>
                    <Show
                        when=is_logged_in
                        fallback=move || {
                            view! {
                                <NavLink route=AppRoute::Login label="Login" />
                                <a
                                    href="/signup"
                                    class="btn btn-primary btn-sm"
                                    on:click=move |ev: leptos::web_sys::MouseEvent| {
                                        ev.prevent_default();
                                        router.navigate(AppRoute::SignUp);
                                    }
                                >
                                    "Sign Up"
                                </a>
                            }
                        }
                    >
                        <NavLink route=AppRoute::Feed label="Community" />
                        <NavLink route=AppRoute::Dashboard label="Dashboard" />
                        <NavLink route=AppRoute::Report label="Report Issue" />
                        <span class="hidden sm:inline text-sm text-base-content/70 px-2">
                            {user_name}
                        </span>
                        <button
                            class="btn btn-ghost btn-sm gap-1"
                            disabled=move || is_logging_out.get()
                            on:click=on_logout
                        >
                            <LogOut attr:class="h-4 w-4" />
                            "Logout"
                        </button>
                    </Show>
                </Show>
            </div>
        </div>
    }
}
