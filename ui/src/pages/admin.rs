use payloads::{ClientError, ListingId};
use std::future::Future;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::contexts::use_toast;
use crate::hooks::{use_auctions, use_properties, use_title, use_vehicles};
use crate::utils::format_price;

/// One line of an admin table.
#[derive(Clone, PartialEq)]
struct Row {
    id: ListingId,
    title: String,
    detail: String,
    edit: Route,
}

#[derive(Properties, PartialEq)]
struct SectionProps {
    title: AttrValue,
    create: Route,
    rows: Option<Vec<Row>>,
    error: Option<String>,
    on_delete: Callback<ListingId>,
}

#[function_component]
fn Section(props: &SectionProps) -> Html {
    let body = match (&props.rows, &props.error) {
        (Some(rows), _) if rows.is_empty() => html! {
            <p class="py-4 text-neutral-500">{"Sin registros"}</p>
        },
        (Some(rows), _) => html! {
            <table class="w-full text-sm">
                <tbody class="divide-y divide-neutral-200 dark:divide-neutral-700">
                    {for rows.iter().map(|row| {
                        let on_delete = {
                            let id = row.id.clone();
                            props.on_delete.reform(move |_: MouseEvent| id.clone())
                        };
                        html! {
                            <tr key={row.id.to_string()}>
                                <td class="py-2 pr-4 font-medium">{&row.title}</td>
                                <td class="py-2 pr-4 text-neutral-600 dark:text-neutral-400">{&row.detail}</td>
                                <td class="py-2 text-right space-x-3 whitespace-nowrap">
                                    <Link<Route> to={row.edit.clone()} classes="underline">
                                        {"Editar"}
                                    </Link<Route>>
                                    <button
                                        type="button"
                                        onclick={on_delete}
                                        class="text-red-600 dark:text-red-400 hover:underline"
                                    >
                                        {"Eliminar"}
                                    </button>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        },
        (None, Some(error)) => html! {
            <p class="py-4 text-red-600 dark:text-red-400">{error}</p>
        },
        (None, None) => html! {
            <p class="py-4 text-neutral-500">{"Cargando..."}</p>
        },
    };

    html! {
        <section class="space-y-3">
            <div class="flex items-center justify-between border-b border-neutral-200 dark:border-neutral-700 pb-2">
                <h2 class="text-xl font-semibold">{&props.title}</h2>
                <Link<Route> to={props.create.clone()} classes="px-3 py-1.5 rounded-md text-sm bg-neutral-900 text-white dark:bg-white dark:text-neutral-900">
                    {"Nuevo"}
                </Link<Route>>
            </div>
            {body}
        </section>
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Delete callback: asks first, then reports through a toast and refetches.
#[hook]
fn use_delete<F, Fut>(noun: &'static str, refetch: Callback<()>, delete: F) -> Callback<ListingId>
where
    F: Fn(ListingId) -> Fut + 'static,
    Fut: Future<Output = Result<(), ClientError>> + 'static,
{
    let toast = use_toast();
    Callback::from(move |id: ListingId| {
        if !confirm(&format!("¿Eliminar {noun}?")) {
            return;
        }
        let toast = toast.clone();
        let refetch = refetch.clone();
        let request = delete(id);
        yew::platform::spawn_local(async move {
            match request.await {
                Ok(()) => toast.success(format!("Se eliminó {noun}")),
                Err(e) => {
                    toast.error(e.user_message(&format!("Error al eliminar {noun}")))
                }
            }
            refetch.emit(());
        });
    })
}

#[function_component]
pub fn AdminPage() -> Html {
    use_title("Administración");
    let properties = use_properties();
    let auctions = use_auctions();
    let vehicles = use_vehicles();

    let delete_property =
        use_delete("la propiedad", properties.refetch.clone(), |id| async move {
            crate::get_api_client().delete_property(&id).await
        });
    let delete_auction =
        use_delete("la subasta", auctions.refetch.clone(), |id| async move {
            crate::get_api_client().delete_auction(&id).await
        });
    let delete_vehicle =
        use_delete("el vehículo", vehicles.refetch.clone(), |id| async move {
            crate::get_api_client().delete_vehicle(&id).await
        });

    let property_rows: Option<Vec<Row>> = properties.data.as_ref().map(|items| {
        items
            .iter()
            .map(|p| Row {
                id: p.id.clone(),
                title: p.titulo.clone(),
                detail: format!("{} · {}", p.operacion, format_price(p.precio)),
                edit: Route::EditProperty { id: p.id.to_string() },
            })
            .collect()
    });
    let auction_rows: Option<Vec<Row>> = auctions.data.as_ref().map(|items| {
        items
            .iter()
            .map(|a| Row {
                id: a.id.clone(),
                title: a.titulo.clone(),
                detail: format!("{} · {}", a.estado, format_price(a.precio_inicial)),
                edit: Route::EditAuction { id: a.id.to_string() },
            })
            .collect()
    });
    let vehicle_rows: Option<Vec<Row>> = vehicles.data.as_ref().map(|items| {
        items
            .iter()
            .map(|v| Row {
                id: v.id.clone(),
                title: v.display_name(),
                detail: format!(
                    "{} · {}",
                    v.estado.as_deref().unwrap_or("-"),
                    format_price(v.precio)
                ),
                edit: Route::EditVehicle { id: v.id.to_string() },
            })
            .collect()
    });

    html! {
        <div class="space-y-10">
            <h1 class="text-3xl font-bold">{"Administración"}</h1>
            <Section
                title="Propiedades"
                create={Route::CreateProperty}
                rows={property_rows}
                error={properties.error.clone()}
                on_delete={delete_property}
            />
            <Section
                title="Subastas"
                create={Route::CreateAuction}
                rows={auction_rows}
                error={auctions.error.clone()}
                on_delete={delete_auction}
            />
            <Section
                title="Vehículos"
                create={Route::CreateVehicle}
                rows={vehicle_rows}
                error={vehicles.error.clone()}
                on_delete={delete_vehicle}
            />
        </div>
    }
}
