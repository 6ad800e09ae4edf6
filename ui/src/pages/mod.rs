pub mod admin;
pub mod auction_detail;
pub mod auction_form;
pub mod auctions;
pub mod home;
pub mod not_found;
pub mod options;
pub mod properties;
pub mod property_detail;
pub mod property_form;
pub mod vehicle_detail;
pub mod vehicle_form;
pub mod vehicles;

pub use admin::AdminPage;
pub use auction_detail::AuctionDetailPage;
pub use auction_form::AuctionFormPage;
pub use auctions::AuctionsPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use properties::PropertiesPage;
pub use property_detail::PropertyDetailPage;
pub use property_form::PropertyFormPage;
pub use vehicle_detail::VehicleDetailPage;
pub use vehicle_form::VehicleFormPage;
pub use vehicles::VehiclesPage;

use crate::Route;
use yew::prelude::*;
use yew_router::prelude::*;

/// Label/value line of a detail page.
fn detail_row(label: &str, value: String) -> Html {
    html! {
        <div class="flex justify-between py-2 text-sm">
            <dt class="text-neutral-600 dark:text-neutral-400">{label}</dt>
            <dd class="font-medium text-right">{value}</dd>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct LoadErrorBannerProps {
    error: Option<String>,
}

/// Shown when an edit form couldn't fetch its record. The form stays usable
/// with empty fields.
#[function_component]
fn LoadErrorBanner(props: &LoadErrorBannerProps) -> Html {
    match &props.error {
        Some(error) => html! {
            <div class="mb-6 p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
            </div>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
struct FormActionsProps {
    busy: bool,
    cancel: Route,
}

#[function_component]
fn FormActions(props: &FormActionsProps) -> Html {
    html! {
        <div class="flex justify-end gap-3 pt-4 border-t border-neutral-200 dark:border-neutral-700">
            <Link<Route> to={props.cancel.clone()} classes="px-4 py-2 rounded-md border border-neutral-300 dark:border-neutral-600">
                {"Cancelar"}
            </Link<Route>>
            <button
                type="submit"
                disabled={props.busy}
                class="px-4 py-2 rounded-md bg-neutral-900 text-white dark:bg-white dark:text-neutral-900 disabled:opacity-50"
            >
                {if props.busy { "Guardando..." } else { "Guardar" }}
            </button>
        </div>
    }
}
