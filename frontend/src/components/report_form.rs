use crate::api::ReportDraft;
use crate::auth::{clear_session, use_auth};
use crate::components::icons::{AlertCircle, CheckCircle, MapPin, Upload};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

#[component]
pub fn ReportFormPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let router = use_router();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (location, set_location) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    // 文件输入走 DOM 引用，不走受控信号
    let file_input: NodeRef<html::Input> = NodeRef::new();

    let is_logged_in = move || auth_ctx.state.get().is_logged_in();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        // 表单可浏览，提交需要登录
        let state = auth_ctx.state.get_untracked();
        let (Some(api), Some(user)) = (state.api, state.user) else {
            set_error_msg.set(Some("Please sign in before submitting a report".to_string()));
            return;
        };

        let title_value = title.get().trim().to_string();
        let description_value = description.get().trim().to_string();
        let location_value = location.get().trim().to_string();
        if title_value.is_empty() || description_value.is_empty() || location_value.is_empty() {
            set_error_msg.set(Some("Please fill in all required fields".to_string()));
            return;
        }

        let image = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let draft = ReportDraft {
                title: title_value,
                description: description_value,
                location: location_value,
                user_id: user.id_user,
                image,
            };
            match api.submit_report(draft).await {
                Ok(_) => {
                    set_success_msg
                        .set(Some("Report submitted. Redirecting to your dashboard...".to_string()));
                    set_timeout(
                        move || router.navigate(AppRoute::Dashboard),
                        Duration::from_millis(1500),
                    );
                }
                Err(e) => {
                    if e.is_auth_failure() {
                        // 服务端已判定会话失效，清除本地并交给守卫
                        clear_session(&auth_ctx);
                    }
                    set_error_msg.set(Some(e.to_string()));
                    set_is_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="max-w-2xl mx-auto px-4 py-10">
            <div class="text-center mb-6">
                <h1 class="text-3xl font-bold">"Report an Issue"</h1>
                <p class="text-base-content/70 mt-2">
                    "Tell us what's broken and where. The city team will pick it up."
                </p>
            </div>

            <Show when=move || !is_logged_in()>
                <div role="alert" class="alert alert-warning mb-4">
                    <AlertCircle attr:class="h-5 w-5 shrink-0" />
                    <span>"You need an account to submit a report."</span>
                    <a
                        href="/login"
                        class="btn btn-sm"
                        on:click=move |ev: leptos::web_sys::MouseEvent| {
                            ev.prevent_default();
                            router.navigate(AppRoute::Login);
                        }
                    >
                        "Sign In"
                    </a>
                </div>
            </Show>

            <div class="card bg-base-100 shadow-xl">
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
                        <label class="label" for="title">
                            <span class="label-text">"Title"</span>
                        </label>
                        <input
                            id="title"
                            type="text"
                            class="input input-bordered"
                            placeholder="Broken street light on Main St"
                            on:input=move |ev| set_title.set(event_target_value(&ev))
                            prop:value=title
                            required
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="description">
                            <span class="label-text">"Description"</span>
                        </label>
                        <textarea
                            id="description"
                            class="textarea textarea-bordered h-28"
                            placeholder="Describe the problem in a few sentences"
                            on:input=move |ev| set_description.set(event_target_value(&ev))
                            prop:value=description
                            required
                        ></textarea>
                    </div>
                    <div class="form-control">
                        <label class="label" for="location">
                            <span class="label-text">
                                <span class="inline-flex items-center gap-1">
                                    <MapPin attr:class="h-4 w-4" />
                                    "Location"
                                </span>
                            </span>
                        </label>
                        <input
                            id="location"
                            type="text"
                            class="input input-bordered"
                            placeholder="Corner of Main St and 5th Ave"
                            on:input=move |ev| set_location.set(event_target_value(&ev))
                            prop:value=location
                            required
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="image">
                            <span class="label-text">
                                <span class="inline-flex items-center gap-1">
                                    <Upload attr:class="h-4 w-4" />
                                    "Photo (optional)"
                                </span>
                            </span>
                        </label>
                        <input
                            id="image"
                            type="file"
                            accept="image/*"
                            class="file-input file-input-bordered"
                            node_ref=file_input
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button
                            class="btn btn-primary"
                            disabled=move || is_submitting.get() || !is_logged_in()
                        >
                            {move || {
                                if is_submitting.get() {
                                    view! {
                                        <span class="loading loading-spinner"></span>
                                        "Submitting..."
                                    }
                                        .into_any()
                                } else {
                                    "Submit Report".into_any()
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
