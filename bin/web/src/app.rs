//! Main Leptos application component and navigation wiring.
//!
//! `leptos_router` owns the URL and the history stack; the BankDash route
//! table decides what each URL means. On the client every location change
//! runs the [`Navigator`], which applies the sign-in guard. A guard or table
//! redirect replaces the current history entry.

use crate::pages::page_view;
use crate::user::{CurrentUser, get_current_user, get_navigation_config, use_current_user};
use bankdash_platform_access::AuthStateHandle;
use bankdash_routing::{
    APP_NAME, DocumentTitle, MenuItem, NavigationIntent, Navigator, Page, RouteTable,
    ScrollTarget, dashboard_routes,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    NavigateOptions,
    components::{Route, Router, Routes},
    hooks::{use_location, use_navigate},
    path,
};
use std::sync::Arc;

/// Document title sink backed by a signal rendered through `<Title>`.
struct SignalTitle(RwSignal<String>);

impl DocumentTitle for SignalTitle {
    fn set_title(&self, title: &str) {
        self.0.set(title.to_string());
    }
}

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let title = RwSignal::new(APP_NAME.to_string());

    let table = match dashboard_routes() {
        Ok(table) => Arc::new(table),
        Err(report) => {
            tracing::error!(error = %report, "route table is invalid");
            return view! { <p class="fatal">"BankDash could not start."</p> }.into_any();
        }
    };

    // Every path renders the shell; the route table resolves it.
    let shell = move || view! { <Shell table=table.clone() title=title/> };

    view! {
        <Title text=move || title.get()/>
        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=path!("/") view=shell.clone()/>
                <Route path=path!("/*any") view=shell/>
            </Routes>
        </Router>
    }
    .into_any()
}

/// Page chrome plus the page the navigator committed.
#[component]
fn Shell(table: Arc<RouteTable>, title: RwSignal<String>) -> impl IntoView {
    let location = use_location();
    let navigate = use_navigate();
    let page = RwSignal::new(None::<Page>);
    let navigator = RwSignal::new(None::<Arc<Navigator>>);

    let auth = AuthStateHandle::new();
    let user: CurrentUser = Resource::new(|| (), |_| get_current_user());
    provide_context(user);
    let settings = Resource::new(|| (), |_| get_navigation_config());

    // The auth state becomes ready once the session lookup answers.
    {
        let auth = auth.clone();
        Effect::new(move |_| {
            if let Some(result) = user.get() {
                auth.resolve(result.ok().flatten());
            }
        });
    }

    {
        let table = table.clone();
        Effect::new(move |_| {
            let Some(result) = settings.get() else {
                return;
            };
            let config = result.unwrap_or_default();
            match Navigator::new(
                table.clone(),
                Arc::new(auth.clone()),
                Arc::new(SignalTitle(title)),
            ) {
                Ok(created) => {
                    navigator.set(Some(Arc::new(
                        created.with_ready_timeout(config.ready_timeout()),
                    )));
                }
                Err(report) => tracing::error!(error = %report, "navigator unavailable"),
            }
        });
    }

    Effect::new(move |_| {
        let target = target_of(
            &location.pathname.get(),
            &location.search.get(),
            &location.hash.get(),
        );
        let Some(navigator) = navigator.get() else {
            return;
        };

        let navigate = navigate.clone();
        spawn_local(async move {
            match navigator.navigate(NavigationIntent::to(&target)).await {
                Ok(navigation) => {
                    if navigation.was_redirected() {
                        navigate(
                            &navigation.full_path(),
                            NavigateOptions {
                                replace: true,
                                ..Default::default()
                            },
                        );
                    }
                    page.set(navigation.page());
                    apply_scroll(navigation.scroll().clone());
                }
                Err(report) => {
                    tracing::error!(error = %report, to = %target, "navigation failed");
                }
            }
        });
    });

    let menu = table.menu();
    let with_chrome =
        move || page.get().is_some_and(|p| !matches!(p, Page::Login | Page::Register));

    view! {
        {move || with_chrome().then(|| view! { <Header/> })}
        <div class="layout">
            {move || with_chrome().then(|| view! { <Sidebar items=menu.clone()/> })}
            <main class="container">
                {move || match page.get() {
                    Some(page) => page_view(page),
                    None => view! { <p class="loading">"Loading..."</p> }.into_any(),
                }}
            </main>
        </div>
    }
}

/// Header with the signed-in user's name and a sign-out link.
#[component]
fn Header() -> impl IntoView {
    let user = use_current_user();

    view! {
        <header class="header">
            <div class="header-left">
                <a href="/index" class="logo">{APP_NAME}</a>
            </div>
            <div class="header-right">
                <Suspense fallback=move || view! { <span>"Loading..."</span> }>
                    {move || {
                        user.get().map(|result| match result {
                            Ok(Some(identity)) => view! {
                                <span class="user-name">{identity.greeting_name().to_string()}</span>
                            }.into_any(),
                            Ok(None) | Err(_) => view! { <span></span> }.into_any(),
                        })
                    }}
                </Suspense>
                <a href="/auth/logout" rel="external">"Log out"</a>
            </div>
        </header>
    }
}

/// Navigation menu built from route metadata.
#[component]
fn Sidebar(items: Vec<MenuItem>) -> impl IntoView {
    view! {
        <nav class="sidebar">
            {items
                .into_iter()
                .map(|item| {
                    view! {
                        <a href=item.path class="menu-item">
                            <span class=format!("icon icon-{}", item.icon)></span>
                            <span>{item.title}</span>
                        </a>
                    }
                })
                .collect_view()}
        </nav>
    }
}

/// Reassembles the router's location parts into one full path.
fn target_of(pathname: &str, search: &str, hash: &str) -> String {
    let mut target = pathname.to_string();
    let search = search.trim_start_matches('?');
    if !search.is_empty() {
        target.push('?');
        target.push_str(search);
    }
    let hash = hash.trim_start_matches('#');
    if !hash.is_empty() {
        target.push('#');
        target.push_str(hash);
    }
    target
}

#[cfg(feature = "hydrate")]
fn apply_scroll(target: ScrollTarget) {
    request_animation_frame(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        match target {
            ScrollTarget::Element { id, smooth } => {
                let Some(element) = window.document().and_then(|d| d.get_element_by_id(&id))
                else {
                    return;
                };
                let options = web_sys::ScrollIntoViewOptions::new();
                if smooth {
                    options.set_behavior(web_sys::ScrollBehavior::Smooth);
                }
                element.scroll_into_view_with_scroll_into_view_options(&options);
            }
            ScrollTarget::Position(position) => {
                let options = web_sys::ScrollToOptions::new();
                options.set_left(position.left);
                options.set_top(position.top);
                window.scroll_to_with_scroll_to_options(&options);
            }
        }
    });
}

#[cfg(not(feature = "hydrate"))]
fn apply_scroll(_target: ScrollTarget) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_joins_search_and_hash() {
        assert_eq!(
            target_of("/transactions", "?page=2", "#latest"),
            "/transactions?page=2#latest"
        );
        assert_eq!(target_of("/transactions", "page=2", "latest"), "/transactions?page=2#latest");
    }

    #[test]
    fn target_omits_empty_parts() {
        assert_eq!(target_of("/index", "", ""), "/index");
        assert_eq!(target_of("/index", "?", "#"), "/index");
    }

    #[test]
    fn signal_title_writes_through() {
        let owner = Owner::new();
        owner.with(|| {
            let title = RwSignal::new(APP_NAME.to_string());
            SignalTitle(title).set_title("Transfer");
            assert_eq!(title.get_untracked(), "Transfer");
        });
    }
}
