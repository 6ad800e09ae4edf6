use crate::Route;
use yew::prelude::*;
use yew_router::prelude::*;

const LINK_CLASS: &str = "text-sm font-medium text-neutral-600 \
    dark:text-neutral-300 hover:text-neutral-900 dark:hover:text-white";

#[function_component]
pub fn Header() -> Html {
    html! {
        <header class="bg-white dark:bg-neutral-800 border-b border-neutral-200 dark:border-neutral-700">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <Link<Route> to={Route::Home} classes="text-xl font-semibold text-neutral-900 dark:text-white">
                        {"Inmobiliaria & Martillero"}
                    </Link<Route>>
                    <nav class="flex items-center space-x-6">
                        <Link<Route> to={Route::Properties} classes={LINK_CLASS}>
                            {"Propiedades"}
                        </Link<Route>>
                        <Link<Route> to={Route::Auctions} classes={LINK_CLASS}>
                            {"Subastas"}
                        </Link<Route>>
                        <Link<Route> to={Route::Vehicles} classes={LINK_CLASS}>
                            {"Vehículos"}
                        </Link<Route>>
                        <Link<Route> to={Route::Admin} classes={LINK_CLASS}>
                            {"Administración"}
                        </Link<Route>>
                    </nav>
                </div>
            </div>
        </header>
    }
}
