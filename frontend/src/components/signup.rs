use crate::api::FixMyCityApi;
use crate::components::icons::{AlertCircle, CheckCircle, Lock, Mail, UserRound};
use crate::validate::{is_strong_password, is_valid_email, is_valid_full_name};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use fixmycity_shared::protocol::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

/// 逐字段校验，返回第一个错误
fn validate_form(
    name: &str,
    birthday: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Option<&'static str> {
    if !is_valid_full_name(name) {
        return Some("Full name may only contain letters and spaces");
    }
    if birthday.is_empty() {
        return Some("Please enter your date of birth");
    }
    if !is_valid_email(email) {
        return Some("Please enter a valid email address");
    }
    if !is_strong_password(password) {
        return Some(
            "Password must be at least 8 letters or digits and include uppercase, lowercase and a number",
        );
    }
    if password != confirm {
        return Some("Passwords do not match");
    }
    None
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let router = use_router();

    let (name, set_name) = signal(String::new());
    let (birthday, set_birthday) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let name_value = name.get().trim().to_string();
        let birthday_value = birthday.get();
        let email_value = email.get().trim().to_string();
        let password_value = password.get();

        if let Some(problem) = validate_form(
            &name_value,
            &birthday_value,
            &email_value,
            &password_value,
            &confirm.get(),
        ) {
            set_error_msg.set(Some(problem.to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let request = RegisterRequest {
                user_name: name_value,
                user_birthday: birthday_value,
                user_email: email_value,
                user_password: password_value,
            };
            match FixMyCityApi::new().register(request).await {
                Ok(_) => {
                    // 注册不自动登录，短暂展示成功提示后引导用户走登录页
                    set_success_msg
                        .set(Some("Account created. You can sign in now.".to_string()));
                    set_timeout(
                        move || router.navigate(AppRoute::Login),
                        Duration::from_millis(1500),
                    );
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
                    <h1 class="text-3xl font-bold">"Create your account"</h1>
                    <p class="text-base-content/70 mt-2">
                        "Join your neighbors in making the city better"
                    </p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <AlertCircle attr:class="h-5 w-5 shrink-0" />
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <Show when=move || success_msg.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <CheckCircle attr:class="h-5 w-5 shrink-0" />
                                <span>{move || success_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Full name"</span>
                            </label>
                            <label class="input input-bordered flex items-center gap-2">
                                <UserRound attr:class="h-4 w-4 opacity-70" />
                                <input
                                    id="name"
                                    type="text"
                                    class="grow"
                                    placeholder="Ann Louis"
                                    on:input=move |ev| set_name.set(event_target_value(&ev))
                                    prop:value=name
                                    required
                                />
                            </label>
                        </div>
                        <div class="form-control">
                            <label class="label" for="birthday">
                                <span class="label-text">"Date of birth"</span>
                            </label>
                            <input
                                id="birthday"
                                type="date"
                                class="input input-bordered"
                                on:input=move |ev| set_birthday.set(event_target_value(&ev))
                                prop:value=birthday
                                required
                            />
                        </div>
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
                                    placeholder="At least 8 characters"
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                    required
                                />
                            </label>
                        </div>
                        <div class="form-control">
                            <label class="label" for="confirm">
                                <span class="label-text">"Confirm password"</span>
                            </label>
                            <label class="input input-bordered flex items-center gap-2">
                                <Lock attr:class="h-4 w-4 opacity-70" />
                                <input
                                    id="confirm"
                                    type="password"
                                    class="grow"
                                    placeholder="Repeat your password"
                                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                                    prop:value=confirm
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
                                            "Creating account..."
                                        }
                                            .into_any()
                                    } else {
                                        "Sign Up".into_any()
                                    }
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2 text-base-content/70">
                            "Already have an account? "
                            <a
                                href="/login"
                                class="link link-primary"
                                on:click=move |ev: leptos::web_sys::MouseEvent| {
                                    ev.prevent_default();
                                    router.navigate(AppRoute::Login);
                                }
                            >
                                "Sign in"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
