use crate::utils::media_url;
use payloads::{MediaItem, MediaKind};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MediaGalleryProps {
    pub items: Vec<MediaItem>,
    pub title: AttrValue,
}

/// Main viewer plus a thumbnail strip to switch between stored media.
#[function_component]
pub fn MediaGallery(props: &MediaGalleryProps) -> Html {
    let selected = use_state(|| 0usize);

    let Some(current) = props.items.get(*selected).or(props.items.first())
    else {
        return html! {
            <div class="flex items-center justify-center h-64 rounded-lg bg-neutral-100 dark:bg-neutral-800 text-neutral-500">
                {"Sin imágenes"}
            </div>
        };
    };

    let main = match current.kind {
        MediaKind::Video => html! {
            <video src={media_url(&current.url)} controls=true class="w-full max-h-[32rem] rounded-lg bg-black" />
        },
        MediaKind::Image => html! {
            <img src={media_url(&current.url)} alt={props.title.clone()} class="w-full max-h-[32rem] object-contain rounded-lg bg-neutral-100 dark:bg-neutral-800" />
        },
    };

    html! {
        <div class="space-y-3">
            {main}
            if props.items.len() > 1 {
                <div class="flex gap-2 overflow-x-auto">
                    {for props.items.iter().enumerate().map(|(index, item)| {
                        let onclick = {
                            let selected = selected.clone();
                            Callback::from(move |_| selected.set(index))
                        };
                        let border = if index == *selected {
                            "border-neutral-900 dark:border-white"
                        } else {
                            "border-transparent"
                        };
                        html! {
                            <button
                                type="button"
                                key={item.name.clone()}
                                title={item.name.clone()}
                                {onclick}
                                class={format!("flex-shrink-0 w-20 h-16 rounded border-2 overflow-hidden {border}")}
                            >
                                if item.kind == MediaKind::Video {
                                    <span class="flex items-center justify-center w-full h-full bg-neutral-800 text-white text-xs">
                                        {"▶ video"}
                                    </span>
                                } else {
                                    <img src={media_url(&item.url)} alt={item.name.clone()} class="w-full h-full object-cover" />
                                }
                            </button>
                        }
                    })}
                </div>
            }
        </div>
    }
}
