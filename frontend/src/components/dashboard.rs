use crate::auth::{clear_session, use_auth};
use crate::components::icons::{AlertCircle, CheckCircle, MapPin};
use fixmycity_shared::date::Timestamp;
use fixmycity_shared::{Report, ReportStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

/// 短暂显示后自动消失的提示条
#[derive(Clone)]
struct Toast {
    message: String,
    is_error: bool,
}

fn show_toast(set_toast: WriteSignal<Option<Toast>>, message: String, is_error: bool) {
    set_toast.set(Some(Toast { message, is_error }));
    set_timeout(move || set_toast.set(None), Duration::from_millis(3000));
}

#[component]
fn StatusSelect(
    report_id: u64,
    current: ReportStatus,
    on_change: Callback<(u64, ReportStatus)>,
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <select
            class="select select-bordered select-sm"
            disabled=move || disabled.get()
            on:change=move |ev| {
                let value = event_target_value(&ev);
                if let Some(status) = ReportStatus::ALL.iter().find(|s| s.as_wire() == value) {
                    on_change.run((report_id, *status));
                }
            }
        >
            {ReportStatus::ALL
                .iter()
                .map(|status| {
                    view! {
                        <option value=status.as_wire() selected=*status == current>
                            {status.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

#[component]
fn ReportCard(
    report: Report,
    on_status_change: Callback<(u64, ReportStatus)>,
    on_delete: Callback<u64>,
    busy: Signal<bool>,
) -> impl IntoView {
    let id = report.id;
    let posted = report
        .created_at
        .map(|ts| ts.relative_to(Timestamp::now()));

    view! {
        <div class="card bg-base-100 shadow-md">
            {report
                .image
                .clone()
                .map(|src| {
                    view! {
                        <figure class="h-40 overflow-hidden">
                            <img src=src alt=report.title.clone() class="w-full object-cover" />
                        </figure>
                    }
                })}
            <div class="card-body">
                <div class="flex items-start justify-between gap-2">
                    <h2 class="card-title">{report.title.clone()}</h2>
                    <span class=report.status.badge_class()>{report.status.label()}</span>
                </div>
                <p class="text-base-content/70">{report.description.clone()}</p>
                <p class="text-sm text-base-content/60 inline-flex items-center gap-1">
                    <MapPin attr:class="h-4 w-4" />
                    {report.location.clone()}
                </p>
                <p class="text-xs text-base-content/50">
                    {report.author_name().to_string()}
                    {posted.map(|p| format!(" · {}", p))}
                </p>
                <div class="card-actions justify-between items-center mt-2">
                    <StatusSelect
                        report_id=id
                        current=report.status
                        on_change=on_status_change
                        disabled=busy
                    />
                    <button
                        class="btn btn-ghost btn-sm text-error"
                        disabled=move || busy.get()
                        on:click=move |_| on_delete.run(id)
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth_ctx = use_auth();

    let (reports, set_reports) = signal(Vec::<Report>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);
    let (toast, set_toast) = signal(Option::<Toast>::None);
    let (is_mutating, set_is_mutating) = signal(false);

    let api = move || auth_ctx.state.get_untracked().api;

    // 挂载时加载一次；守卫保证此处已认证
    Effect::new(move |done: Option<()>| {
        if done.is_some() {
            return;
        }
        let Some(api) = api() else {
            return;
        };
        spawn_local(async move {
            match api.reports().await {
                Ok(list) => set_reports.set(list),
                Err(e) => {
                    if e.is_auth_failure() {
                        clear_session(&auth_ctx);
                        return;
                    }
                    set_load_error.set(Some(e.to_string()));
                }
            }
            set_is_loading.set(false);
        });
    });

    // 状态更新：服务端确认后才改写本地列表
    let on_status_change = Callback::new(move |(id, status): (u64, ReportStatus)| {
        let Some(api) = api() else {
            return;
        };
        set_is_mutating.set(true);
        spawn_local(async move {
            match api.update_status(id, status).await {
                Ok(()) => {
                    set_reports.update(|list| {
                        if let Some(report) = list.iter_mut().find(|r| r.id == id) {
                            report.status = status;
                        }
                    });
                    show_toast(
                        set_toast,
                        format!("Report marked as {}", status.label()),
                        false,
                    );
                }
                Err(e) => {
                    if e.is_auth_failure() {
                        clear_session(&auth_ctx);
                        return;
                    }
                    show_toast(set_toast, e.to_string(), true);
                }
            }
            set_is_mutating.set(false);
        });
    });

    // 删除：同样只在服务端确认后移除
    let on_delete = Callback::new(move |id: u64| {
        let Some(api) = api() else {
            return;
        };
        set_is_mutating.set(true);
        spawn_local(async move {
            match api.delete_report(id).await {
                Ok(()) => {
                    set_reports.update(|list| list.retain(|r| r.id != id));
                    show_toast(set_toast, "Report deleted".to_string(), false);
                }
                Err(e) => {
                    if e.is_auth_failure() {
                        clear_session(&auth_ctx);
                        return;
                    }
                    show_toast(set_toast, e.to_string(), true);
                }
            }
            set_is_mutating.set(false);
        });
    });

    let busy: Signal<bool> = Signal::derive(move || is_mutating.get());

    view! {
        <div class="max-w-6xl mx-auto px-4 py-8">
            <div class="mb-6">
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-base-content/70 mt-1">"Track and manage reported issues"</p>
            </div>

            <Show when=move || toast.get().is_some()>
                <div class="toast toast-top toast-end z-50">
                    {move || {
                        toast
                            .get()
                            .map(|t| {
                                let class = if t.is_error {
                                    "alert alert-error"
                                } else {
                                    "alert alert-success"
                                };
                                view! {
                                    <div class=class>
                                        {if t.is_error {
                                            view! { <AlertCircle attr:class="h-5 w-5" /> }.into_any()
                                        } else {
                                            view! { <CheckCircle attr:class="h-5 w-5" /> }.into_any()
                                        }}
                                        <span>{t.message}</span>
                                    </div>
                                }
                            })
                    }}
                </div>
            </Show>

            <Show when=move || load_error.get().is_some()>
                <div role="alert" class="alert alert-error mb-4">
                    <AlertCircle attr:class="h-5 w-5 shrink-0" />
                    <span>{move || load_error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show
                when=move || !is_loading.get()
                fallback=|| {
                    view! {
                        <div class="flex justify-center py-20">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                }
            >
                <Show
                    when=move || !reports.get().is_empty()
                    fallback=|| {
                        view! {
                            <div class="text-center py-20 text-base-content/60">
                                <p class="text-lg">"No reports yet."</p>
                                <p class="text-sm mt-1">
                                    "Issues you and your neighbors report will show up here."
                                </p>
                            </div>
                        }
                    }
                >
                    <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                        <For
                            each=move || reports.get()
                            key=|report| (report.id, report.status)
                            children=move |report| {
                                view! {
                                    <ReportCard
                                        report=report
                                        on_status_change=on_status_change
                                        on_delete=on_delete
                                        busy=busy
                                    />
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
