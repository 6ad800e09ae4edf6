use payloads::{Auction, ListingId};
use yew::prelude::*;
use yew_router::prelude::*;

use super::detail_row;
use super::options::{AUCTION_CATEGORIES, AUCTION_STATUSES, label_of};
use crate::Route;
use crate::components::MediaGallery;
use crate::hooks::{use_auction, use_title};
use crate::utils::{format_price, time::format_timestamp};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub id: String,
}

#[function_component]
pub fn AuctionDetailPage(props: &Props) -> Html {
    let auction = use_auction(ListingId::from(props.id.as_str()));
    let title = auction
        .data
        .as_ref()
        .map(|a| a.titulo.clone())
        .unwrap_or_else(|| "Subasta".to_string());
    use_title(&title);

    html! {
        <div class="space-y-6">
            <Link<Route> to={Route::Auctions} classes="text-sm underline">
                {"← Volver a subastas"}
            </Link<Route>>
            {auction.render("la subasta", |auction, _, _| details(auction))}
        </div>
    }
}

fn details(auction: &Auction) -> Html {
    let current = auction.precio_actual.unwrap_or(auction.precio_inicial);
    let date = |ts: Option<jiff::Timestamp>| {
        ts.map(format_timestamp).unwrap_or_else(|| "A confirmar".into())
    };

    html! {
        <div class="grid gap-8 lg:grid-cols-2">
            <MediaGallery items={auction.media.items()} title={auction.titulo.clone()} />
            <div class="space-y-4">
                <h1 class="text-3xl font-bold">{&auction.titulo}</h1>
                <p class="text-2xl font-semibold">{format_price(current)}</p>
                <dl class="divide-y divide-neutral-200 dark:divide-neutral-700">
                    {detail_row("Estado", label_of(AUCTION_STATUSES, &auction.estado))}
                    if let Some(categoria) = &auction.categoria {
                        {detail_row("Categoría", label_of(AUCTION_CATEGORIES, categoria))}
                    }
                    {detail_row("Precio inicial", format_price(auction.precio_inicial))}
                    {detail_row("Ofertas", auction.ofertas.to_string())}
                    {detail_row("Inicio", date(auction.inicio_fecha))}
                    {detail_row("Cierre", date(auction.fin_fecha))}
                </dl>
                if let Some(descripcion) = &auction.descripcion {
                    <p class="whitespace-pre-line text-neutral-700 dark:text-neutral-300">{descripcion}</p>
                }
            </div>
        </div>
    }
}
