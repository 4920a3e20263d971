use crate::api::FixMyCityApi;
use crate::auth::{login, use_auth};
use crate::components::icons::{AlertCircle, Lock, Mail, Wrench};
use crate::validate::is_valid_email;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let email_value = email.get().trim().to_string();
        let password_value = password.get();

        if !is_valid_email(&email_value) {
            set_error_msg.set(Some("Please enter a valid email address".to_string()));
            return;
        }
        if password_value.is_empty() {
            set_error_msg.set(Some("Please enter your password".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            // 登录页不需要令牌，用匿名客户端
            match FixMyCityApi::new().login(email_value, password_value).await {
                Ok(response) => {
                    // 发布会话；离开登录页由路由服务的会话监听处理，
                    // 会自动回到被拦截前的目标页
                    login(&auth_ctx, response.data, response.token);
                }
                Err(e) => {
                    set_error_msg.set(Some(e.to_string()));
                    set_is_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Wrench attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Welcome back"</h1>
                        <p class="text-base-content/70">"Sign in to report and track issues"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <AlertCircle attr:class="h-5 w-5 shrink-0" />
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <label class="input input-bordered flex items-center gap-2">
                                <Mail attr:class="h-4 w-4 opacity-70" />
                                <input
                                    id="email"
                                    type="email"
                                    class="grow"
                                    placeholder="you@example.com"
                                    on:input=move |ev| set_email.set(event_target_value(&ev))
                                    prop:value=email
                                    required
                                />
                            </label>
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <label class="input input-bordered flex items-center gap-2">
                                <Lock attr:class="h-4 w-4 opacity-70" />
                                <input
                                    id="password"
                                    type="password"
                                    class="grow"
                                    placeholder="••••••••"
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                    required
                                />
                            </label>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || {
                                    if is_submitting.get() {
                                        view! {
                                            <span class="loading loading-spinner"></span>
                                            "Signing in..."
                                        }
                                            .into_any()
                                    } else {
                                        "Sign In".into_any()
                                    }
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2 text-base-content/70">
                            "Don't have an account? "
                            <a
                                href="/signup"
                                class="link link-primary"
                                on:click=move |ev: leptos::web_sys::MouseEvent| {
                                    ev.prevent_default();
                                    router.navigate(AppRoute::SignUp);
                                }
                            >
                                "Sign up"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
