use leptos::prelude::*;

/// Indeterminate progress indicator, announced to screen readers as `label`.
#[component]
pub fn Spinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    let label = label.unwrap_or_else(|| "Loading".to_string());

    view! {
        <div class="flex flex-col items-center gap-3" role="status" aria-live="polite">
            <div
                class="inline-block h-7 w-7 animate-spin rounded-full border-4 border-blue-200 border-t-blue-600"
                aria-hidden="true"
            ></div>
            <span class="sr-only">{label}</span>
        </div>
    }
}
