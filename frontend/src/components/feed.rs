use crate::auth::{clear_session, use_auth};
use crate::components::icons::{AlertCircle, MapPin, MessageSquare, Search};
use fixmycity_shared::date::Timestamp;
use fixmycity_shared::{Comment, Report, ReportStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 信息流卡片，带可展开的评论区
#[component]
fn FeedCard(report: Report, comments_updated: Callback<(u64, Comment)>) -> impl IntoView {
    let auth_ctx = use_auth();
    let report_id = report.id;

    let (expanded, set_expanded) = signal(false);
    let (draft, set_draft) = signal(String::new());
    let (is_posting, set_is_posting) = signal(false);
    let (post_error, set_post_error) = signal(Option::<String>::None);
    let (comments, set_comments) = signal(report.comments.clone());

    let posted = report
        .created_at
        .map(|ts| ts.relative_to(Timestamp::now()));
    let comment_count = move || comments.get().len();

    let on_post = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = draft.get().trim().to_string();
        if text.is_empty() {
            return;
        }
        let Some(api) = auth_ctx.state.get_untracked().api else {
            set_post_error.set(Some("Please sign in to comment".to_string()));
            return;
        };
        set_is_posting.set(true);
        set_post_error.set(None);
        spawn_local(async move {
            // 评论只在服务端确认后进入本地列表
            match api.add_comment(report_id, text).await {
                Ok(comment) => {
                    set_comments.update(|list| list.push(comment.clone()));
                    comments_updated.run((report_id, comment));
                    set_draft.set(String::new());
                }
                Err(e) => {
                    if e.is_auth_failure() {
                        clear_session(&auth_ctx);
                        return;
                    }
                    set_post_error.set(Some(e.to_string()));
                }
            }
            set_is_posting.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-md">
            {report
                .image
                .clone()
                .map(|src| {
                    view! {
                        <figure class="h-48 overflow-hidden">
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
                    {report.author_name().to_string()} {posted.map(|p| format!(" · {}", p))}
                </p>

                <div class="card-actions mt-2">
                    <button
                        class="btn btn-ghost btn-sm gap-1"
                        on:click=move |_| set_expanded.update(|v| *v = !*v)
                    >
                        <MessageSquare attr:class="h-4 w-4" />
                        {move || format!("{} comments", comment_count())}
                    </button>
                </div>

                <Show when=move || expanded.get()>
                    <div class="border-t border-base-200 pt-3 mt-1 space-y-2">
                        // 只显示最近 4 条，最新在前
                        <For
                            each=move || {
                                comments.get().into_iter().rev().take(4).collect::<Vec<_>>()
                            }
                            key=|comment| comment.id
                            children=|comment| {
                                view! {
                                    <div class="bg-base-200 rounded-lg px-3 py-2">
                                        <span class="text-sm font-semibold">
                                            {comment.user_name.clone()}
                                        </span>
                                        <p class="text-sm text-base-content/80">
                                            {comment.text.clone()}
                                        </p>
                                    </div>
                                }
                            }
                        />

                        <Show when=move || post_error.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-1">
                                <AlertCircle attr:class="h-4 w-4 shrink-0" />
                                <span>{move || post_error.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <form class="flex gap-2" on:submit=on_post>
                            <input
                                type="text"
                                class="input input-bordered input-sm grow"
                                placeholder="Add a comment..."
                                on:input=move |ev| set_draft.set(event_target_value(&ev))
                                prop:value=draft
                            />
                            <button
                                class="btn btn-primary btn-sm"
                                disabled=move || is_posting.get()
                            >
                                {move || if is_posting.get() { "..." } else { "Post" }}
                            </button>
                        </form>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
pub fn FeedPage() -> impl IntoView {
    let auth_ctx = use_auth();

    let (reports, set_reports) = signal(Vec::<Report>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);
    let (search, set_search) = signal(String::new());
    let (status_filter, set_status_filter) = signal(Option::<ReportStatus>::None);

    // 挂载时加载一次；守卫保证此处已认证
    Effect::new(move |done: Option<()>| {
        if done.is_some() {
            return;
        }
        let Some(api) = auth_ctx.state.get_untracked().api else {
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

    // 卡片内确认的新评论同步回主列表，过滤重算时不丢失
    let comments_updated = Callback::new(move |(report_id, comment): (u64, Comment)| {
        set_reports.update(|list| {
            if let Some(report) = list.iter_mut().find(|r| r.id == report_id) {
                report.comments.push(comment);
            }
        });
    });

    let filtered = move || {
        let term = search.get();
        let wanted = status_filter.get();
        reports
            .get()
            .into_iter()
            .filter(|r| r.matches(&term, wanted))
            .collect::<Vec<_>>()
    };

    view! {
        <div class="max-w-3xl mx-auto px-4 py-8">
            <div class="mb-6">
                <h1 class="text-3xl font-bold">"Community Feed"</h1>
                <p class="text-base-content/70 mt-1">
                    "See what your neighbors have reported"
                </p>
            </div>

            <div class="flex flex-col sm:flex-row gap-3 mb-6">
                <label class="input input-bordered flex items-center gap-2 grow">
                    <Search attr:class="h-4 w-4 opacity-70" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search reports..."
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        prop:value=search
                    />
                </label>
                <select
                    class="select select-bordered"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        set_status_filter
                            .set(ReportStatus::ALL.iter().find(|s| s.as_wire() == value).copied());
                    }
                >
                    <option value="">"All statuses"</option>
                    {ReportStatus::ALL
                        .iter()
                        .map(|status| {
                            view! { <option value=status.as_wire()>{status.label()}</option> }
                        })
                        .collect_view()}
                </select>
            </div>

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
                    when=move || !filtered().is_empty()
                    fallback=|| {
                        view! {
                            <div class="text-center py-20 text-base-content/60">
                                <p class="text-lg">"No reports match your filters."</p>
                            </div>
                        }
                    }
                >
                    <div class="space-y-6">
                        <For
                            each=filtered
                            // 评论走卡片内部信号，不参与 key，避免发帖后卡片重建折叠
                            key=|report| (report.id, report.status)
                            children=move |report| {
                                view! { <FeedCard report=report comments_updated=comments_updated /> }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
