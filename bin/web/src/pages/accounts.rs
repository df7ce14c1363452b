//! Money-movement and account overview pages.
//!
//! These render static placeholders; account data comes from the hosted
//! document database once wired.

use leptos::prelude::*;

#[component]
pub fn TransferPage() -> impl IntoView {
    view! {
        <div class="transfer-page">
            <h1>"Transfer"</h1>
            <p>"Send money to a saved contact or a new recipient."</p>
        </div>
    }
}

#[component]
pub fn TransactionsPage() -> impl IntoView {
    view! {
        <div class="transactions-page">
            <h1>"Transactions"</h1>
            <p id="latest">"Your most recent activity appears here."</p>
        </div>
    }
}

#[component]
pub fn InvestmentsPage() -> impl IntoView {
    view! {
        <div class="investments-page">
            <h1>"Investments"</h1>
            <p>"Track your portfolio and yearly returns."</p>
        </div>
    }
}

#[component]
pub fn CreditCardsPage() -> impl IntoView {
    view! {
        <div class="credit-cards-page">
            <h1>"Credit Cards"</h1>
            <p>"Manage your cards and spending limits."</p>
        </div>
    }
}
