//! Vehicle create/edit form. Vehicles have no media, so the session is held
//! directly instead of going through `use_media_form`; the lifetime rules
//! are the same.

use forms::{LoadError, SubmitError, SubmitState, VehicleFormSession};
use forms::session::save_vehicle;
use futures::future::Abortable;
use payloads::ListingId;
use payloads::requests::VehicleForm;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

use super::options::{
    FUELS, TRANSMISSIONS, VEHICLE_KINDS, VEHICLE_STATUSES, with_blank,
};
use super::{FormActions, LoadErrorBanner};
use crate::Route;
use crate::components::{SelectField, TextArea, TextField};
use crate::contexts::use_toast;
use crate::get_api_client;
use crate::hooks::use_title;
use crate::utils::{input_text, parse_decimal, parse_number};

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Record to edit. None creates a new one.
    #[prop_or_default]
    pub id: Option<String>,
}

fn setter(
    session: &Rc<RefCell<VehicleFormSession>>,
    refresh: &Callback<()>,
    apply: fn(&mut VehicleForm, String),
) -> Callback<String> {
    let session = session.clone();
    let refresh = refresh.clone();
    Callback::from(move |value: String| {
        apply(&mut session.borrow_mut().form, value);
        refresh.emit(());
    })
}

#[function_component]
pub fn VehicleFormPage(props: &Props) -> Html {
    let id = props.id.as_deref().map(ListingId::from);
    use_title(if id.is_some() { "Editar vehículo" } else { "Nuevo vehículo" });
    let navigator = use_navigator();
    let toast = use_toast();
    let session = use_mut_ref(VehicleFormSession::new);
    let trigger = use_force_update();
    let refresh = Callback::from(move |_| trigger.force_update());

    {
        let session = session.clone();
        let refresh = refresh.clone();
        let toast = toast.clone();
        use_effect_with(id.clone(), move |id| {
            let mut next = VehicleFormSession::new();
            let load = id.clone().map(|id| (next.begin_load(id.clone()), id));
            *session.borrow_mut() = next;
            refresh.emit(());

            if let Some((registration, id)) = load {
                let weak = Rc::downgrade(&session);
                yew::platform::spawn_local(async move {
                    let client = get_api_client();
                    let outcome =
                        Abortable::new(client.get_vehicle(&id), registration)
                            .await;
                    let Some(session) = weak.upgrade() else {
                        return;
                    };
                    let result = session.borrow_mut().finish_load(outcome);
                    if let Err(LoadError::Failed(message)) = result {
                        toast.error(message);
                    }
                    refresh.emit(());
                });
            }
        });
    }

    let on_submit = {
        let session = session.clone();
        let refresh = refresh.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let prepared = session.borrow_mut().prepare();
            refresh.emit(());
            let pending = match prepared {
                Ok(pending) => pending,
                Err(e) => {
                    toast.error(e.to_string());
                    return;
                }
            };

            let edited = pending.target.clone();
            let weak = Rc::downgrade(&session);
            let refresh = refresh.clone();
            let toast = toast.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                let client = get_api_client();
                let outcome = pending
                    .run(|target, body| save_vehicle(&client, target, body))
                    .await;
                let Some(session) = weak.upgrade() else {
                    return;
                };
                let result = session.borrow_mut().finish(outcome);
                refresh.emit(());
                match result {
                    Ok(saved) => {
                        toast.success("Vehículo guardado");
                        let Some(navigator) = &navigator else {
                            return;
                        };
                        match saved.map(|vehicle| vehicle.id).or(edited) {
                            Some(id) => navigator.push(&Route::VehicleDetail {
                                id: id.to_string(),
                            }),
                            None => navigator.push(&Route::Vehicles),
                        }
                    }
                    Err(SubmitError::Cancelled) => {}
                    Err(e) => toast.error(e.to_string()),
                }
            });
        })
    };

    let field = |apply: fn(&mut VehicleForm, String)| {
        setter(&session, &refresh, apply)
    };
    let current = session.borrow();
    let form = &current.form;
    let busy = *current.state() == SubmitState::Submitting;

    html! {
        <div class="max-w-3xl mx-auto">
            <h1 class="text-2xl font-bold mb-6">
                {if id.is_some() { "Editar vehículo" } else { "Nuevo vehículo" }}
            </h1>
            <LoadErrorBanner error={current.load_error().map(str::to_string)} />
            <form onsubmit={on_submit} class="space-y-5">
                <div class="grid gap-5 sm:grid-cols-2">
                    <TextField
                        id="marca" label="Marca" required=true disabled={busy}
                        value={form.marca.clone()}
                        onchange={field(|f, v| f.marca = v)}
                    />
                    <TextField
                        id="modelo" label="Modelo" required=true disabled={busy}
                        value={form.modelo.clone()}
                        onchange={field(|f, v| f.modelo = v)}
                    />
                    <TextField
                        id="anio" label="Año" kind="number" disabled={busy}
                        value={input_text(form.anio)}
                        onchange={field(|f, v| f.anio = parse_number(&v))}
                    />
                    <TextField
                        id="precio" label="Precio" kind="number" required=true disabled={busy}
                        value={input_text(form.precio)}
                        onchange={field(|f, v| f.precio = parse_decimal(&v))}
                    />
                    <TextField
                        id="kilometraje" label="Kilometraje" kind="number" disabled={busy}
                        value={input_text(form.kilometraje)}
                        onchange={field(|f, v| f.kilometraje = parse_number(&v))}
                    />
                    <TextField
                        id="color" label="Color" disabled={busy}
                        value={form.color.clone()}
                        onchange={field(|f, v| f.color = v)}
                    />
                    <SelectField
                        id="combustible" label="Combustible" disabled={busy}
                        value={form.combustible.clone()}
                        options={with_blank(FUELS)}
                        onchange={field(|f, v| f.combustible = v)}
                    />
                    <SelectField
                        id="transmision" label="Transmisión" disabled={busy}
                        value={form.transmision.clone()}
                        options={with_blank(TRANSMISSIONS)}
                        onchange={field(|f, v| f.transmision = v)}
                    />
                    <SelectField
                        id="tipo" label="Tipo" disabled={busy}
                        value={form.tipo.clone()}
                        options={with_blank(VEHICLE_KINDS)}
                        onchange={field(|f, v| f.tipo = v)}
                    />
                    <SelectField
                        id="estado" label="Estado" disabled={busy}
                        value={form.estado.clone()}
                        options={with_blank(VEHICLE_STATUSES)}
                        onchange={field(|f, v| f.estado = v)}
                    />
                </div>
                <TextArea
                    id="descripcion" label="Descripción" disabled={busy}
                    value={form.descripcion.clone()}
                    onchange={field(|f, v| f.descripcion = v)}
                />
                <FormActions {busy} cancel={Route::Admin} />
            </form>
        </div>
    }
}
