use crate::Route;
use crate::utils::media_url;
use payloads::{MediaItem, MediaKind};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ListingCardProps {
    pub to: Route,
    pub title: AttrValue,
    pub subtitle: AttrValue,
    pub price: AttrValue,
    pub cover: Option<MediaItem>,
    /// Small tag in the corner, e.g. "venta" or "finalizada".
    #[prop_or_default]
    pub badge: Option<AttrValue>,
}

#[function_component]
pub fn ListingCard(props: &ListingCardProps) -> Html {
    let cover = match &props.cover {
        Some(item) if item.kind == MediaKind::Image => html! {
            <img src={media_url(&item.url)} alt={props.title.clone()} class="w-full h-48 object-cover" />
        },
        Some(item) => html! {
            <video src={media_url(&item.url)} muted=true class="w-full h-48 object-cover" />
        },
        None => html! {
            <div class="flex items-center justify-center w-full h-48 bg-neutral-100 dark:bg-neutral-800 text-neutral-400">
                {"Sin imagen"}
            </div>
        },
    };

    html! {
        <Link<Route> to={props.to.clone()} classes="block rounded-lg overflow-hidden border border-neutral-200 dark:border-neutral-700 hover:shadow-md transition-shadow">
            <div class="relative">
                {cover}
                if let Some(badge) = &props.badge {
                    <span class="absolute top-2 left-2 px-2 py-0.5 rounded text-xs font-medium bg-white/90 dark:bg-neutral-900/90">
                        {badge}
                    </span>
                }
            </div>
            <div class="p-4 space-y-1">
                <h3 class="font-semibold text-neutral-900 dark:text-neutral-100 truncate">{&props.title}</h3>
                <p class="text-sm text-neutral-600 dark:text-neutral-400 truncate">{&props.subtitle}</p>
                <p class="text-lg font-bold text-neutral-900 dark:text-white">{&props.price}</p>
            </div>
        </Link<Route>>
    }
}
