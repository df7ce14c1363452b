//! Login page component.

use bankdash_routing::REDIRECT_PARAM;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

/// Email and password sign-in form.
///
/// The `redirect` query parameter is posted back with the form so the
/// server can return the user to the page they were headed for.
#[component]
pub fn LoginPage() -> impl IntoView {
    let query = use_query_map();
    let redirect = move || query.read().get(REDIRECT_PARAM).unwrap_or_default();
    let error = move || query.read().get("error");
    let register_href = move || {
        let redirect = redirect();
        if redirect.is_empty() {
            "/register".to_string()
        } else {
            bankdash_routing::Location::parse("/register")
                .with_query(REDIRECT_PARAM, &redirect)
                .full_path()
        }
    };

    view! {
        <div class="login-page">
            <div class="login-box">
                <h1>"Log in to BankDash"</h1>
                {move || error().map(|message| view! { <p class="form-error">{message}</p> })}
                <form method="post" action="/auth/login">
                    <input type="hidden" name="redirect" prop:value=redirect/>
                    <label for="email">"Email"</label>
                    <input type="email" id="email" name="email" required=true autocomplete="email"/>
                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        name="password"
                        required=true
                        autocomplete="current-password"
                    />
                    <button type="submit" class="login-button">"Log in"</button>
                </form>
                <p>
                    "No account yet? "
                    <a href=register_href>"Create one"</a>
                </p>
            </div>
        </div>
    }
}
