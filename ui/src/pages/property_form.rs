use forms::SubmitState;
use payloads::requests::FileField;
use payloads::{ListingId, Property};
use yew::prelude::*;
use yew_router::prelude::*;

use super::options::{OPERATIONS, PROPERTY_KINDS, with_blank};
use super::{FormActions, LoadErrorBanner};
use crate::Route;
use crate::components::{
    MediaEntry, MediaPicker, SelectField, TextArea, TextField,
};
use crate::contexts::use_toast;
use crate::hooks::{use_media_form, use_title};
use crate::utils::{input_text, parse_decimal, parse_number};

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Record to edit. None creates a new one.
    #[prop_or_default]
    pub id: Option<String>,
}

#[function_component]
pub fn PropertyFormPage(props: &Props) -> Html {
    let id = props.id.as_deref().map(ListingId::from);
    use_title(if id.is_some() { "Editar propiedad" } else { "Nueva propiedad" });
    let navigator = use_navigator();
    let toast = use_toast();

    let on_saved = {
        let edited = id.clone();
        Callback::from(move |saved: Option<Property>| {
            toast.success("Propiedad guardada");
            let Some(navigator) = &navigator else {
                return;
            };
            match saved.map(|property| property.id).or(edited.clone()) {
                Some(id) => navigator.push(&Route::PropertyDetail {
                    id: id.to_string(),
                }),
                None => navigator.push(&Route::Properties),
            }
        })
    };
    let handle = use_media_form(id.clone(), FileField::Archivos, on_saved);

    let session = handle.session.borrow();
    let form = &session.form;
    let busy = *session.state() == SubmitState::Submitting;
    let entries: Vec<MediaEntry> =
        session.media.entries().iter().map(MediaEntry::from).collect();

    html! {
        <div class="max-w-3xl mx-auto">
            <h1 class="text-2xl font-bold mb-6">
                {if id.is_some() { "Editar propiedad" } else { "Nueva propiedad" }}
            </h1>
            <LoadErrorBanner error={session.load_error().map(str::to_string)} />
            <form onsubmit={handle.on_submit.clone()} class="space-y-5">
                <TextField
                    id="titulo" label="Título" required=true disabled={busy}
                    value={form.titulo.clone()}
                    onchange={handle.field(|f, v| f.titulo = v)}
                />
                <TextArea
                    id="descripcion" label="Descripción" disabled={busy}
                    value={form.descripcion.clone()}
                    onchange={handle.field(|f, v| f.descripcion = v)}
                />
                <div class="grid gap-5 sm:grid-cols-2">
                    <TextField
                        id="precio" label="Precio" kind="number" required=true disabled={busy}
                        value={input_text(form.precio)}
                        onchange={handle.field(|f, v| f.precio = parse_decimal(&v))}
                    />
                    <SelectField
                        id="operacion" label="Operación" disabled={busy}
                        value={form.operacion.clone()}
                        options={with_blank(OPERATIONS)}
                        onchange={handle.field(|f, v| f.operacion = v)}
                    />
                    <SelectField
                        id="tipo" label="Tipo" disabled={busy}
                        value={form.tipo.clone()}
                        options={with_blank(PROPERTY_KINDS)}
                        onchange={handle.field(|f, v| f.tipo = v)}
                    />
                    <TextField
                        id="direccion" label="Dirección" required=true disabled={busy}
                        value={form.direccion.clone()}
                        onchange={handle.field(|f, v| f.direccion = v)}
                    />
                    <TextField
                        id="metros" label="Superficie (m²)" kind="number" disabled={busy}
                        value={input_text(form.metros)}
                        onchange={handle.field(|f, v| f.metros = parse_decimal(&v))}
                    />
                    <TextField
                        id="habitaciones" label="Habitaciones" kind="number" disabled={busy}
                        value={input_text(form.habitaciones)}
                        onchange={handle.field(|f, v| f.habitaciones = parse_number(&v))}
                    />
                </div>
                <MediaPicker
                    {entries}
                    full={session.media.is_full()}
                    on_add={handle.on_add.clone()}
                    on_remove={handle.on_remove.clone()}
                    disabled={busy}
                />
                <FormActions {busy} cancel={Route::Admin} />
            </form>
        </div>
    }
}
