//! Profile and settings pages.

use crate::user::use_current_user;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

/// Settings sections reachable at `/settings/:section`.
const SECTIONS: [(&str, &str); 3] = [
    ("profile", "Edit profile"),
    ("preferences", "Preferences"),
    ("security", "Security"),
];

/// The signed-in user's profile.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let user = use_current_user();

    view! {
        <div class="profile-page">
            <h1>"Profile"</h1>
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    user.get().map(|result| match result {
                        Ok(Some(identity)) => view! {
                            <div class="setting-row">
                                <label>"Name"</label>
                                <span>{identity.display_name().unwrap_or("Not set").to_string()}</span>
                            </div>
                            <div class="setting-row">
                                <label>"Email"</label>
                                <span>{identity.email().unwrap_or("Not set").to_string()}</span>
                            </div>
                        }.into_any(),
                        Ok(None) | Err(_) => view! {
                            <p>"Failed to load your profile. Please try again."</p>
                        }.into_any(),
                    })
                }}
            </Suspense>
        </div>
    }
}

/// Settings with one tab per section.
#[component]
pub fn SettingsPage() -> impl IntoView {
    let pathname = use_location().pathname;
    let active = move || {
        pathname
            .get()
            .strip_prefix("/settings/")
            .map(str::to_string)
            .unwrap_or_else(|| SECTIONS[0].0.to_string())
    };

    view! {
        <div class="settings-page">
            <h1>"Settings"</h1>
            <nav class="settings-tabs">
                {SECTIONS
                    .into_iter()
                    .map(|(section, label)| {
                        let class = move || {
                            if active() == section { "tab active" } else { "tab" }
                        };
                        view! { <a href=format!("/settings/{section}") class=class>{label}</a> }
                    })
                    .collect_view()}
            </nav>
            <section class="settings-section">
                {move || {
                    let active = active();
                    SECTIONS
                        .iter()
                        .find(|(section, _)| *section == active)
                        .map(|(_, label)| view! { <h2>{*label}</h2> }.into_any())
                        .unwrap_or_else(|| view! { <p>"Unknown settings section."</p> }.into_any())
                }}
            </section>
        </div>
    }
}
