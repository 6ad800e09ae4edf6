use crate::utils::media_url;
use forms::StagedFile;
use payloads::{MAX_FILE_SIZE_BYTES, MAX_STAGED_FILES, MediaKind, UploadFile};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

/// What the picker shows for one staged entry.
#[derive(Clone, PartialEq)]
pub struct MediaEntry {
    pub name: String,
    pub kind: MediaKind,
    pub locator: String,
    pub is_new: bool,
}

impl From<&StagedFile> for MediaEntry {
    fn from(file: &StagedFile) -> Self {
        Self {
            name: file.display_name.clone(),
            kind: file.kind,
            locator: if file.is_new() {
                file.locator().to_string()
            } else {
                media_url(file.locator())
            },
            is_new: file.is_new(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct MediaPickerProps {
    pub entries: Vec<MediaEntry>,
    /// Stops further picks once the form holds the maximum.
    pub full: bool,
    pub on_add: Callback<Vec<UploadFile>>,
    pub on_remove: Callback<usize>,
    #[prop_or_default]
    pub disabled: bool,
}

async fn read_file(file: File) -> Option<UploadFile> {
    let buffer = match JsFuture::from(file.array_buffer()).await {
        Ok(buffer) => buffer,
        Err(e) => {
            tracing::error!("Could not read {}: {e:?}", file.name());
            return None;
        }
    };
    let data = js_sys::Uint8Array::new(&buffer).to_vec();
    Some(UploadFile::new(file.name(), file.type_(), data))
}

/// File input plus the ordered list of staged media with previews.
#[function_component]
pub fn MediaPicker(props: &MediaPickerProps) -> Html {
    let on_change = {
        let on_add = props.on_add.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(list) = input.files() else {
                return;
            };
            let files: Vec<File> =
                (0..list.length()).filter_map(|i| list.get(i)).collect();
            // allow picking the same file again after removing it
            input.set_value("");

            let on_add = on_add.clone();
            yew::platform::spawn_local(async move {
                let mut picked = Vec::with_capacity(files.len());
                for file in files {
                    if let Some(upload) = read_file(file).await {
                        picked.push(upload);
                    }
                }
                if !picked.is_empty() {
                    on_add.emit(picked);
                }
            });
        })
    };

    html! {
        <div class="space-y-3">
            <label class="block text-sm font-medium text-neutral-700 dark:text-neutral-300">
                {"Imágenes y videos"}
            </label>
            <input
                type="file"
                multiple=true
                accept="image/*,video/*"
                disabled={props.full || props.disabled}
                onchange={on_change}
                class="block w-full text-sm text-neutral-600 dark:text-neutral-400"
            />
            <p class="text-xs text-neutral-500 dark:text-neutral-400">
                {format!(
                    "Imágenes y videos, hasta {}MB por archivo, máximo {} archivos",
                    MAX_FILE_SIZE_BYTES / (1024 * 1024),
                    MAX_STAGED_FILES,
                )}
            </p>
            if !props.entries.is_empty() {
                <ul class="grid grid-cols-2 sm:grid-cols-4 gap-3">
                    {for props.entries.iter().enumerate().map(|(index, entry)| {
                        let on_remove = props.on_remove.reform(move |_: MouseEvent| index);
                        html! {
                            <li key={format!("{index}-{}", entry.locator)} class="relative rounded-md overflow-hidden border border-neutral-200 dark:border-neutral-700">
                                {preview(entry)}
                                <div class="flex items-center justify-between px-2 py-1 text-xs">
                                    <span class="truncate" title={entry.name.clone()}>
                                        {&entry.name}
                                    </span>
                                    if entry.is_new {
                                        <span class="ml-1 text-green-700 dark:text-green-400">{"nuevo"}</span>
                                    }
                                </div>
                                <button
                                    type="button"
                                    title="Quitar"
                                    disabled={props.disabled}
                                    onclick={on_remove}
                                    class="absolute top-1 right-1 px-2 rounded bg-black/60 text-white hover:bg-black/80"
                                >
                                    {"×"}
                                </button>
                            </li>
                        }
                    })}
                </ul>
            }
        </div>
    }
}

fn preview(entry: &MediaEntry) -> Html {
    match entry.kind {
        MediaKind::Video => html! {
            <video src={entry.locator.clone()} class="w-full h-28 object-cover" muted=true />
        },
        MediaKind::Image => html! {
            <img src={entry.locator.clone()} alt={entry.name.clone()} class="w-full h-28 object-cover" />
        },
    }
}
