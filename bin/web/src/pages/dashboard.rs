//! Dashboard overview page.

use crate::user::use_current_user;
use leptos::prelude::*;

/// The landing page for signed-in users.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let user = use_current_user();

    view! {
        <div class="dashboard-page">
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    user.get().map(|result| {
                        let greeting = match result {
                            Ok(Some(identity)) => format!("Welcome back, {}!", identity.greeting_name()),
                            Ok(None) | Err(_) => "Welcome!".to_string(),
                        };
                        view! {
                            <div>
                                <h1>{greeting}</h1>
                                <p>"Here is an overview of your accounts."</p>
                            </div>
                        }
                    })
                }}
            </Suspense>
            <section class="quick-links">
                <a href="/transfer" class="link-button">"Send money"</a>
            </section>
        </div>
    }
}
