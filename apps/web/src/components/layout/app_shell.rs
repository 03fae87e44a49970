//! Shared layout wrapper with navigation and content container. Links are
//! plain client-side navigations; the outlet applies the guard to each one.

use crate::{features::auth::state::use_auth, routes::use_href};
use leptos::prelude::*;
use leptos_router::components::A;

const LINK_CLASS: &str = "block py-2 px-3 text-gray-900 rounded hover:bg-gray-100 md:hover:bg-transparent md:border-0 md:hover:text-blue-700 md:p-0 dark:text-white md:dark:hover:text-blue-500 dark:hover:bg-gray-700 dark:hover:text-white md:dark:hover:bg-transparent";

/// Public links first, then the ones behind sign-in.
const NAV_LINKS: [(&str, &str); 5] = [
    ("/pricing", "Pricing"),
    ("/analysis", "Analysis"),
    ("/about", "About"),
    ("/dashboard", "Dashboard"),
    ("/settings", "Settings"),
];

/// Wraps routes with a header and main content container.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let toggle_menu = move |_| {
        set_menu_open.update(|open| *open = !*open);
    };
    let is_authenticated = use_auth().is_authenticated;
    let home = use_href("/");
    let login = use_href("/login");
    let profile = use_href("/profile");

    let links = NAV_LINKS
        .iter()
        .map(|(path, label)| {
            view! {
                <li>
                    <A
                        href=use_href(path)
                        {..}
                        class=LINK_CLASS
                        on:click=move |_| set_menu_open.set(false)
                    >
                        {*label}
                    </A>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-gray-200 dark:bg-gray-900">
                <div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4">
                    <A
                        href=home
                        {..}
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                        on:click=move |_| set_menu_open.set(false)
                    >
                        <span class="font-semibold whitespace-nowrap dark:text-white">
                            "navgate"
                        </span>
                    </A>
                    <button
                        type="button"
                        class="inline-flex items-center p-2 w-10 h-10 justify-center text-sm text-gray-500 rounded-lg md:hidden hover:bg-gray-100 focus:outline-none focus:ring-2 focus:ring-gray-200 dark:text-gray-400 dark:hover:bg-gray-700 dark:focus:ring-gray-600"
                        aria-controls="navbar-default"
                        aria-expanded=move || menu_open.get().to_string()
                        on:click=toggle_menu
                    >
                        <span class="sr-only">"Open main menu"</span>
                        <svg
                            class="w-5 h-5"
                            aria-hidden="true"
                            xmlns="http://www.w3.org/2000/svg"
                            fill="none"
                            viewBox="0 0 17 14"
                        >
                            <path
                                stroke="currentColor"
                                stroke-linecap="round"
                                stroke-linejoin="round"
                                stroke-width="2"
                                d="M1 1h15M1 7h15M1 13h15"
                            ></path>
                        </svg>
                    </button>
                    <div
                        id="navbar-default"
                        class="w-full md:block md:w-auto"
                        class:hidden=move || !menu_open.get()
                    >
                        <ul class="font-medium flex flex-col p-4 md:p-0 mt-4 border border-gray-100 rounded-lg bg-gray-50 md:flex-row md:space-x-8 rtl:space-x-reverse md:mt-0 md:border-0 md:bg-white dark:bg-gray-800 md:dark:bg-gray-900 dark:border-gray-700">
                            {links}
                            <li>
                                <Show
                                    when=move || is_authenticated.get()
                                    fallback={
                                        let login = login.clone();
                                        move || {
                                            view! {
                                                <A
                                                    href=login.clone()
                                                    {..}
                                                    class=LINK_CLASS
                                                    on:click=move |_| set_menu_open.set(false)
                                                >
                                                    "Sign In"
                                                </A>
                                            }
                                        }
                                    }
                                >
                                    <A
                                        href=profile.clone()
                                        {..}
                                        class=LINK_CLASS
                                        on:click=move |_| set_menu_open.set(false)
                                    >
                                        "Profile"
                                    </A>
                                </Show>
                            </li>
                        </ul>
                    </div>
                </div>
            </header>
            <main class="flex-1">
                <div class="container mx-auto p-4 mt-6">
                    {children()}
                </div>
            </main>
        </div>
    }
}
