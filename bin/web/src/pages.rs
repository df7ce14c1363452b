//! Page components for the dashboard.
//!
//! Each page is a Leptos component rendered for one [`Page`] of the route
//! table. Which page shows is decided by the navigator, not by the router.

pub mod accounts;
pub mod dashboard;
pub mod login;
pub mod register;
pub mod settings;

pub use accounts::{CreditCardsPage, InvestmentsPage, TransactionsPage, TransferPage};
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use register::RegisterPage;
pub use settings::{ProfilePage, SettingsPage};

use bankdash_routing::Page;
use leptos::prelude::*;

/// Renders the component for `page`.
pub fn page_view(page: Page) -> AnyView {
    match page {
        Page::Dashboard => view! { <DashboardPage/> }.into_any(),
        Page::Login => view! { <LoginPage/> }.into_any(),
        Page::Register => view! { <RegisterPage/> }.into_any(),
        Page::Transfer => view! { <TransferPage/> }.into_any(),
        Page::Transactions => view! { <TransactionsPage/> }.into_any(),
        Page::Profile => view! { <ProfilePage/> }.into_any(),
        Page::Investments => view! { <InvestmentsPage/> }.into_any(),
        Page::CreditCards => view! { <CreditCardsPage/> }.into_any(),
        Page::Settings => view! { <SettingsPage/> }.into_any(),
    }
}
