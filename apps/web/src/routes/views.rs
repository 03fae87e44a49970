//! Maps component keys from the route table to views. Keys without a
//! dedicated view render a generic page titled after the route.

use crate::{
    features::auth::state::use_auth,
    routes::{NotFoundContent, use_href},
};
use leptos::prelude::*;
use leptos_router::components::A;
use navgate::Resolution;

fn summary(component: &str) -> &'static str {
    match component {
        "HomeView" => "Plan, assess and track your business in one place.",
        "DashboardOverview" => "Your key figures at a glance.",
        "PricingView" => "Plans for teams of every size.",
        "ROI" => "Estimate the return on your next investment.",
        "Business" => "Tools for growing businesses.",
        "AboutView" => "Who we are and what we build.",
        "AssessmentView" => "Start or continue a business assessment.",
        "AssessBusiness" => "Work through the assessment step by step.",
        "Analysis" => "Market analysis and benchmarks.",
        "TrendSeeker" => "Explore emerging market trends.",
        "Trends" => "Trends you follow.",
        "Settings" => "Manage your account preferences.",
        "SignUp" => "Create an account to get started.",
        "ForgotPassword" => "We will email you a link to reset your password.",
        "ResetPassword" => "Choose a new password.",
        _ => "",
    }
}

#[component]
pub fn RouteView(resolution: Resolution) -> impl IntoView {
    let Resolution {
        component,
        title,
        redirected_from,
        ..
    } = resolution;

    match component.as_str() {
        "NotFoundView" => view! { <NotFoundContent /> }.into_any(),
        "Login" => view! { <LoginView redirected_from=redirected_from /> }.into_any(),
        "Profile" => view! { <ProfileView /> }.into_any(),
        other => view! { <PageView title=title summary=summary(other) /> }.into_any(),
    }
}

#[component]
fn PageView(title: String, summary: &'static str) -> impl IntoView {
    view! {
        <section class="max-w-3xl mx-auto space-y-4">
            <h1 class="text-3xl font-bold text-gray-900 dark:text-white">{title}</h1>
            <p class="text-gray-500 dark:text-gray-400">{summary}</p>
        </section>
    }
}

#[component]
fn LoginView(redirected_from: Option<String>) -> impl IntoView {
    let signup = use_href("/signup");
    let forgot = use_href("/forgot-password");

    view! {
        <section class="max-w-md mx-auto space-y-4">
            <h1 class="text-3xl font-bold text-gray-900 dark:text-white">"Sign in"</h1>
            {redirected_from
                .map(|from| {
                    view! {
                        <p class="text-sm text-gray-500 dark:text-gray-400">
                            "Sign in to continue to " <code>{from}</code>
                        </p>
                    }
                })}
            <div class="flex gap-4 text-sm">
                <A href=signup {..} class="text-blue-700 hover:underline dark:text-blue-500">
                    "Create an account"
                </A>
                <A href=forgot {..} class="text-blue-700 hover:underline dark:text-blue-500">
                    "Forgot password?"
                </A>
            </div>
        </section>
    }
}

#[component]
fn ProfileView() -> impl IntoView {
    let snapshot = use_auth().snapshot;
    let display_name = move || {
        snapshot
            .get()
            .user()
            .map(|user| {
                user.display_name
                    .clone()
                    .or_else(|| user.email.clone())
                    .unwrap_or_else(|| user.uid.clone())
            })
            .unwrap_or_default()
    };

    view! {
        <section class="max-w-3xl mx-auto space-y-4">
            <h1 class="text-3xl font-bold text-gray-900 dark:text-white">"Profile"</h1>
            <p class="text-gray-500 dark:text-gray-400">"Signed in as " {display_name}</p>
        </section>
    }
}
