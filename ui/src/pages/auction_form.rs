use forms::SubmitState;
use payloads::requests::FileField;
use payloads::{Auction, ListingId};
use yew::prelude::*;
use yew_router::prelude::*;

use super::options::{AUCTION_CATEGORIES, AUCTION_STATUSES, with_blank};
use super::{FormActions, LoadErrorBanner};
use crate::Route;
use crate::components::{
    MediaEntry, MediaPicker, SelectField, TextArea, TextField,
};
use crate::contexts::use_toast;
use crate::hooks::{use_media_form, use_title};
use crate::utils::time::{from_input_value, to_input_value};
use crate::utils::{input_text, parse_decimal, parse_number};

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Record to edit. None creates a new one.
    #[prop_or_default]
    pub id: Option<String>,
}

#[function_component]
pub fn AuctionFormPage(props: &Props) -> Html {
    let id = props.id.as_deref().map(ListingId::from);
    use_title(if id.is_some() { "Editar subasta" } else { "Nueva subasta" });
    let navigator = use_navigator();
    let toast = use_toast();

    let on_saved = {
        let edited = id.clone();
        Callback::from(move |saved: Option<Auction>| {
            toast.success("Subasta guardada");
            let Some(navigator) = &navigator else {
                return;
            };
            match saved.map(|auction| auction.id).or(edited.clone()) {
                Some(id) => navigator.push(&Route::AuctionDetail {
                    id: id.to_string(),
                }),
                None => navigator.push(&Route::Auctions),
            }
        })
    };
    // the auctions endpoint reads uploads from `imagenes`
    let handle = use_media_form(id.clone(), FileField::Imagenes, on_saved);

    let session = handle.session.borrow();
    let form = &session.form;
    let busy = *session.state() == SubmitState::Submitting;
    let entries: Vec<MediaEntry> =
        session.media.entries().iter().map(MediaEntry::from).collect();

    html! {
        <div class="max-w-3xl mx-auto">
            <h1 class="text-2xl font-bold mb-6">
                {if id.is_some() { "Editar subasta" } else { "Nueva subasta" }}
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
                        id="inicio" label="Inicio" kind="datetime-local" required=true disabled={busy}
                        value={to_input_value(form.inicio_fecha)}
                        onchange={handle.field(|f, v| f.inicio_fecha = from_input_value(&v))}
                    />
                    <TextField
                        id="fin" label="Cierre" kind="datetime-local" required=true disabled={busy}
                        value={to_input_value(form.fin_fecha)}
                        onchange={handle.field(|f, v| f.fin_fecha = from_input_value(&v))}
                    />
                    <TextField
                        id="precio-inicial" label="Precio inicial" kind="number" required=true disabled={busy}
                        value={input_text(form.precio_inicial)}
                        onchange={handle.field(|f, v| f.precio_inicial = parse_decimal(&v))}
                    />
                    <TextField
                        id="precio-actual" label="Precio actual" kind="number" disabled={busy}
                        placeholder={AttrValue::Static("Igual al precio inicial")}
                        value={input_text(form.precio_actual)}
                        onchange={handle.field(|f, v| f.precio_actual = parse_decimal(&v))}
                    />
                    <SelectField
                        id="estado" label="Estado" disabled={busy}
                        value={form.estado.clone()}
                        options={AUCTION_STATUSES.to_vec()}
                        onchange={handle.field(|f, v| f.estado = v)}
                    />
                    <SelectField
                        id="categoria" label="Categoría" disabled={busy}
                        value={form.categoria.clone()}
                        options={with_blank(AUCTION_CATEGORIES)}
                        onchange={handle.field(|f, v| f.categoria = v)}
                    />
                    <TextField
                        id="ofertas" label="Ofertas" kind="number" disabled={busy}
                        value={form.ofertas.to_string()}
                        onchange={handle.field(|f, v| f.ofertas = parse_number(&v).unwrap_or(0))}
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
