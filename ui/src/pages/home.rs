use crate::Route;
use crate::hooks::use_title;
use yew::prelude::*;
use yew_router::prelude::*;

fn section(to: Route, title: &str, text: &str) -> Html {
    html! {
        <Link<Route> {to} classes="block p-6 rounded-lg border border-neutral-200 dark:border-neutral-700 hover:shadow-md transition-shadow">
            <h2 class="text-xl font-semibold mb-2">{title}</h2>
            <p class="text-neutral-600 dark:text-neutral-400">{text}</p>
        </Link<Route>>
    }
}

#[function_component]
pub fn HomePage() -> Html {
    use_title("Inicio");
    html! {
        <div class="space-y-10">
            <div class="text-center space-y-3">
                <h1 class="text-4xl font-bold">{"Inmobiliaria & Martillero"}</h1>
                <p class="text-lg text-neutral-600 dark:text-neutral-400">
                    {"Propiedades en venta y alquiler, subastas y vehículos."}
                </p>
            </div>
            <div class="grid gap-6 md:grid-cols-3">
                {section(Route::Properties, "Propiedades", "Casas, departamentos y terrenos.")}
                {section(Route::Auctions, "Subastas", "Lotes activos, próximos y finalizados.")}
                {section(Route::Vehicles, "Vehículos", "Autos, camionetas y motos disponibles.")}
            </div>
        </div>
    }
}
