use payloads::{Selection, Vehicle};
use yew::prelude::*;
use yewdux::prelude::*;

use super::options::{VEHICLE_KINDS, VEHICLE_STATUSES, label_of};
use crate::Route;
use crate::components::{FilterSelect, ListingCard};
use crate::hooks::{use_title, use_vehicles};
use crate::state::State;
use crate::utils::format_price;

#[function_component]
pub fn VehiclesPage() -> Html {
    use_title("Vehículos");
    let vehicles = use_vehicles();
    let (state, dispatch) = use_store::<State>();
    let filter = state.vehicle_filter.clone();

    let on_kind = dispatch.reduce_mut_callback_with(|s, kind: Selection| {
        s.vehicle_filter.kind = kind;
    });
    let on_status = dispatch.reduce_mut_callback_with(|s, status: Selection| {
        s.vehicle_filter.status = status;
    });

    html! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">{"Vehículos"}</h1>
            <div class="flex flex-wrap gap-4">
                <FilterSelect
                    label="Tipo"
                    value={filter.kind.clone()}
                    options={VEHICLE_KINDS.to_vec()}
                    onchange={on_kind}
                />
                <FilterSelect
                    label="Estado"
                    value={filter.status.clone()}
                    options={VEHICLE_STATUSES.to_vec()}
                    onchange={on_status}
                />
            </div>
            {vehicles.render("los vehículos", |items, _, _| {
                let visible = filter.apply(items);
                if visible.is_empty() {
                    return html! {
                        <p class="text-neutral-600 dark:text-neutral-400">
                            {"No hay vehículos que coincidan con la búsqueda."}
                        </p>
                    };
                }
                html! {
                    <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                        {for visible.into_iter().map(card)}
                    </div>
                }
            })}
        </div>
    }
}

fn card(vehicle: &Vehicle) -> Html {
    let mileage = vehicle
        .kilometraje
        .map(|km| format!("{km} km"))
        .unwrap_or_default();
    let badge = vehicle
        .estado
        .as_deref()
        .map(|estado| AttrValue::from(label_of(VEHICLE_STATUSES, estado)));

    html! {
        <ListingCard
            key={vehicle.id.to_string()}
            to={Route::VehicleDetail { id: vehicle.id.to_string() }}
            title={vehicle.display_name()}
            subtitle={mileage}
            price={format_price(vehicle.precio)}
            cover={vehicle.media.cover()}
            {badge}
        />
    }
}
