//! Registration page component.

use bankdash_routing::REDIRECT_PARAM;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

/// Account creation form.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let query = use_query_map();
    let redirect = move || query.read().get(REDIRECT_PARAM).unwrap_or_default();
    let error = move || query.read().get("error");

    view! {
        <div class="login-page">
            <div class="login-box">
                <h1>"Create your BankDash account"</h1>
                {move || error().map(|message| view! { <p class="form-error">{message}</p> })}
                <form method="post" action="/auth/register">
                    <input type="hidden" name="redirect" prop:value=redirect/>
                    <label for="email">"Email"</label>
                    <input type="email" id="email" name="email" required=true autocomplete="email"/>
                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        name="password"
                        required=true
                        minlength="6"
                        autocomplete="new-password"
                    />
                    <button type="submit" class="login-button">"Register"</button>
                </form>
                <p>
                    "Already registered? "
                    <a href="/login">"Log in"</a>
                </p>
            </div>
        </div>
    }
}
