use payloads::{ListingId, Property};
use yew::prelude::*;
use yew_router::prelude::*;

use super::detail_row;
use super::options::{OPERATIONS, PROPERTY_KINDS, label_of};
use crate::Route;
use crate::components::MediaGallery;
use crate::hooks::{use_property, use_title};
use crate::utils::format_price;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub id: String,
}

#[function_component]
pub fn PropertyDetailPage(props: &Props) -> Html {
    let property = use_property(ListingId::from(props.id.as_str()));
    let title = property
        .data
        .as_ref()
        .map(|p| p.titulo.clone())
        .unwrap_or_else(|| "Propiedad".to_string());
    use_title(&title);

    html! {
        <div class="space-y-6">
            <Link<Route> to={Route::Properties} classes="text-sm underline">
                {"← Volver a propiedades"}
            </Link<Route>>
            {property.render("la propiedad", |property, _, _| details(property))}
        </div>
    }
}

fn details(property: &Property) -> Html {
    html! {
        <div class="grid gap-8 lg:grid-cols-2">
            <MediaGallery items={property.media.items()} title={property.titulo.clone()} />
            <div class="space-y-4">
                <h1 class="text-3xl font-bold">{&property.titulo}</h1>
                <p class="text-2xl font-semibold">{format_price(property.precio)}</p>
                <dl class="divide-y divide-neutral-200 dark:divide-neutral-700">
                    {detail_row("Operación", label_of(OPERATIONS, &property.operacion))}
                    {detail_row("Tipo", label_of(PROPERTY_KINDS, &property.tipo))}
                    {detail_row("Dirección", property.direccion.clone())}
                    if let Some(metros) = property.metros {
                        {detail_row("Superficie", format!("{metros} m²"))}
                    }
                    if let Some(habitaciones) = property.habitaciones {
                        {detail_row("Habitaciones", habitaciones.to_string())}
                    }
                </dl>
                if let Some(descripcion) = &property.descripcion {
                    <p class="whitespace-pre-line text-neutral-700 dark:text-neutral-300">{descripcion}</p>
                }
            </div>
        </div>
    }
}
