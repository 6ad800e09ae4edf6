use payloads::{ListingId, Vehicle};
use yew::prelude::*;
use yew_router::prelude::*;

use super::detail_row;
use super::options::{
    FUELS, TRANSMISSIONS, VEHICLE_KINDS, VEHICLE_STATUSES, Options, label_of,
};
use crate::Route;
use crate::components::MediaGallery;
use crate::hooks::{use_title, use_vehicle};
use crate::utils::format_price;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub id: String,
}

#[function_component]
pub fn VehicleDetailPage(props: &Props) -> Html {
    let vehicle = use_vehicle(ListingId::from(props.id.as_str()));
    let title = vehicle
        .data
        .as_ref()
        .map(Vehicle::display_name)
        .unwrap_or_else(|| "Vehículo".to_string());
    use_title(&title);

    html! {
        <div class="space-y-6">
            <Link<Route> to={Route::Vehicles} classes="text-sm underline">
                {"← Volver a vehículos"}
            </Link<Route>>
            {vehicle.render("el vehículo", |vehicle, _, _| details(vehicle))}
        </div>
    }
}

fn optional_row(label: &str, options: Options, value: Option<&str>) -> Html {
    match value {
        Some(value) => detail_row(label, label_of(options, value)),
        None => html! {},
    }
}

fn details(vehicle: &Vehicle) -> Html {
    html! {
        <div class="grid gap-8 lg:grid-cols-2">
            <MediaGallery items={vehicle.media.items()} title={vehicle.display_name()} />
            <div class="space-y-4">
                <h1 class="text-3xl font-bold">{vehicle.display_name()}</h1>
                <p class="text-2xl font-semibold">{format_price(vehicle.precio)}</p>
                <dl class="divide-y divide-neutral-200 dark:divide-neutral-700">
                    {optional_row("Estado", VEHICLE_STATUSES, vehicle.estado.as_deref())}
                    {optional_row("Tipo", VEHICLE_KINDS, vehicle.tipo.as_deref())}
                    if let Some(km) = vehicle.kilometraje {
                        {detail_row("Kilometraje", format!("{km} km"))}
                    }
                    {optional_row("Combustible", FUELS, vehicle.combustible.as_deref())}
                    {optional_row("Transmisión", TRANSMISSIONS, vehicle.transmision.as_deref())}
                    if let Some(color) = &vehicle.color {
                        {detail_row("Color", color.clone())}
                    }
                </dl>
                if let Some(descripcion) = &vehicle.descripcion {
                    <p class="whitespace-pre-line text-neutral-700 dark:text-neutral-300">{descripcion}</p>
                }
            </div>
        </div>
    }
}
