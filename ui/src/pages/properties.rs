use payloads::{Property, Selection};
use yew::prelude::*;
use yewdux::prelude::*;

use super::options::{OPERATIONS, PROPERTY_KINDS, label_of};
use crate::Route;
use crate::components::{FilterSelect, ListingCard};
use crate::hooks::{use_properties, use_title};
use crate::state::State;
use crate::utils::format_price;

#[function_component]
pub fn PropertiesPage() -> Html {
    use_title("Propiedades");
    let properties = use_properties();
    let (state, dispatch) = use_store::<State>();
    let filter = state.property_filter.clone();

    let on_kind = dispatch.reduce_mut_callback_with(|s, kind: Selection| {
        s.property_filter.kind = kind;
    });
    let on_operation =
        dispatch.reduce_mut_callback_with(|s, operation: Selection| {
            s.property_filter.operation = operation;
        });

    html! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">{"Propiedades"}</h1>
            <div class="flex flex-wrap gap-4">
                <FilterSelect
                    label="Tipo"
                    value={filter.kind.clone()}
                    options={PROPERTY_KINDS.to_vec()}
                    onchange={on_kind}
                />
                <FilterSelect
                    label="Operación"
                    value={filter.operation.clone()}
                    options={OPERATIONS.to_vec()}
                    onchange={on_operation}
                />
            </div>
            {properties.render("las propiedades", |items, _, _| {
                let visible = filter.apply(items);
                if visible.is_empty() {
                    return html! {
                        <p class="text-neutral-600 dark:text-neutral-400">
                            {"No hay propiedades que coincidan con la búsqueda."}
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

fn card(property: &Property) -> Html {
    html! {
        <ListingCard
            key={property.id.to_string()}
            to={Route::PropertyDetail { id: property.id.to_string() }}
            title={property.titulo.clone()}
            subtitle={property.direccion.clone()}
            price={format_price(property.precio)}
            cover={property.media.cover()}
            badge={Some(AttrValue::from(label_of(OPERATIONS, &property.operacion)))}
        />
    }
}
