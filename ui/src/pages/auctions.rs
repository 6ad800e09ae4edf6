use payloads::{Auction, Selection};
use yew::prelude::*;
use yewdux::prelude::*;

use super::options::{AUCTION_CATEGORIES, AUCTION_STATUSES, label_of};
use crate::Route;
use crate::components::{FilterSelect, ListingCard};
use crate::hooks::{use_auctions, use_title};
use crate::state::State;
use crate::utils::{format_price, time::format_timestamp};

#[function_component]
pub fn AuctionsPage() -> Html {
    use_title("Subastas");
    let auctions = use_auctions();
    let (state, dispatch) = use_store::<State>();
    let filter = state.auction_filter.clone();

    let on_category = dispatch.reduce_mut_callback_with(|s, kind: Selection| {
        s.auction_filter.kind = kind;
    });
    let on_status = dispatch.reduce_mut_callback_with(|s, status: Selection| {
        s.auction_filter.status = status;
    });

    html! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">{"Subastas"}</h1>
            <div class="flex flex-wrap gap-4">
                <FilterSelect
                    label="Categoría"
                    value={filter.kind.clone()}
                    options={AUCTION_CATEGORIES.to_vec()}
                    onchange={on_category}
                />
                <FilterSelect
                    label="Estado"
                    value={filter.status.clone()}
                    options={AUCTION_STATUSES.to_vec()}
                    onchange={on_status}
                />
            </div>
            {auctions.render("las subastas", |items, _, _| {
                let visible = filter.apply(items);
                if visible.is_empty() {
                    return html! {
                        <p class="text-neutral-600 dark:text-neutral-400">
                            {"No hay subastas que coincidan con la búsqueda."}
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

fn card(auction: &Auction) -> Html {
    let closes = auction
        .fin_fecha
        .map(|end| format!("Cierra {}", format_timestamp(end)))
        .unwrap_or_else(|| "Sin fecha de cierre".to_string());
    let price = auction.precio_actual.unwrap_or(auction.precio_inicial);

    html! {
        <ListingCard
            key={auction.id.to_string()}
            to={Route::AuctionDetail { id: auction.id.to_string() }}
            title={auction.titulo.clone()}
            subtitle={closes}
            price={format_price(price)}
            cover={auction.media.cover()}
            badge={Some(AttrValue::from(label_of(AUCTION_STATUSES, &auction.estado)))}
        />
    }
}
