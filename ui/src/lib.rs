use payloads::APIClient;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod contexts;
mod hooks;
mod logs;
mod pages;
mod previews;
mod state;
mod utils;

use components::{MainLayout, ToastContainer};
use contexts::ToastProvider;

/// Backend address: `BACKEND_URL` at build time, else the page's origin.
pub fn backend_address() -> String {
    option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .or_else(|| {
            web_sys::window().and_then(|window| window.location().origin().ok())
        })
        .unwrap_or_default()
}

pub fn get_api_client() -> APIClient {
    APIClient::new(backend_address())
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    html! {
        <BrowserRouter>
            <ToastProvider>
                <MainLayout>
                    <Switch<Route> render={switch} />
                </MainLayout>
                <ToastContainer />
            </ToastProvider>
        </BrowserRouter>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/inmobiliaria")]
    Properties,
    #[at("/inmobiliaria/:id")]
    PropertyDetail { id: String },
    #[at("/subastas")]
    Auctions,
    #[at("/subastas/:id")]
    AuctionDetail { id: String },
    #[at("/martillero")]
    Vehicles,
    #[at("/martillero/:id")]
    VehicleDetail { id: String },
    #[at("/admin")]
    Admin,
    #[at("/admin/inmobiliaria/nueva")]
    CreateProperty,
    #[at("/admin/inmobiliaria/:id/editar")]
    EditProperty { id: String },
    #[at("/admin/subastas/nueva")]
    CreateAuction,
    #[at("/admin/subastas/:id/editar")]
    EditAuction { id: String },
    #[at("/admin/martillero/nuevo")]
    CreateVehicle,
    #[at("/admin/martillero/:id/editar")]
    EditVehicle { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    use pages::*;

    match routes {
        Route::Home => html! { <HomePage /> },
        Route::Properties => html! { <PropertiesPage /> },
        Route::PropertyDetail { id } => html! { <PropertyDetailPage {id} /> },
        Route::Auctions => html! { <AuctionsPage /> },
        Route::AuctionDetail { id } => html! { <AuctionDetailPage {id} /> },
        Route::Vehicles => html! { <VehiclesPage /> },
        Route::VehicleDetail { id } => html! { <VehicleDetailPage {id} /> },
        Route::Admin => html! { <AdminPage /> },
        Route::CreateProperty => html! { <PropertyFormPage /> },
        Route::EditProperty { id } => {
            html! { <PropertyFormPage id={Some(id)} /> }
        }
        Route::CreateAuction => html! { <AuctionFormPage /> },
        Route::EditAuction { id } => {
            html! { <AuctionFormPage id={Some(id)} /> }
        }
        Route::CreateVehicle => html! { <VehicleFormPage /> },
        Route::EditVehicle { id } => {
            html! { <VehicleFormPage id={Some(id)} /> }
        }
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
