use crate::auth::use_auth;
use crate::components::icons::{CheckCircle, MapPin, MessageSquare};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;

#[component]
fn FeatureCard(
    icon: AnyView,
    title: &'static str,
    description: &'static str,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body items-center text-center">
                <div class="p-3 bg-primary/10 rounded-2xl text-primary">{icon}</div>
                <h3 class="card-title">{title}</h3>
                <p class="text-base-content/70">{description}</p>
            </div>
        </div>
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let router = use_router();

    // 已登录直接进入报告页，否则先走登录
    let on_report = move |_| {
        let target = if auth_ctx.state.get_untracked().is_logged_in() {
            AppRoute::Report
        } else {
            AppRoute::Login
        };
        router.navigate(target);
    };

    view! {
        <div class="hero min-h-[60vh] bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-2xl">
                    <h1 class="text-5xl font-bold">
                        "See a problem? " <span class="text-primary">"Fix your city."</span>
                    </h1>
                    <p class="py-6 text-lg text-base-content/70">
                        "Report potholes, broken street lights, and other public issues. \
                         Track their status until they are fixed."
                    </p>
                    <button class="btn btn-primary btn-lg" on:click=on_report>
                        "Report an Issue"
                    </button>
                </div>
            </div>
        </div>

        <div class="max-w-5xl mx-auto px-4 py-12 grid gap-6 md:grid-cols-3">
            <FeatureCard
                icon=view! { <MapPin attr:class="h-8 w-8" /> }.into_any()
                title="Pin the Problem"
                description="Describe the issue and tell us where it is. Add a photo so crews know what to look for."
            />
            <FeatureCard
                icon=view! { <MessageSquare attr:class="h-8 w-8" /> }.into_any()
                title="Discuss with Neighbors"
                description="Browse reports from your community and add comments with extra details."
            />
            <FeatureCard
                icon=view! { <CheckCircle attr:class="h-8 w-8" /> }.into_any()
                title="Track Until Fixed"
                description="Every report moves from Pending to In Progress to Fixed. Watch it happen."
            />
        </div>
    }
}
