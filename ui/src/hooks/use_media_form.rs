//! State of the property and auction admin forms.
//!
//! The session lives in a `use_mut_ref` cell owned by the component. Spawned
//! requests only keep a `Weak` to it, so unmounting the form drops the
//! session, which aborts whatever is in flight and revokes every preview
//! URL. A response that arrives afterwards finds nothing to update.

use forms::{LoadError, MediaFormSession, MediaListing, SubmitError};
use futures::future::Abortable;
use payloads::requests::FileField;
use payloads::{ListingId, MAX_STAGED_FILES, UploadFile};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

use crate::contexts::use_toast;
use crate::get_api_client;
use crate::previews::BlobUrlPreviews;

pub struct MediaFormHandle<R: MediaListing> {
    pub session: Rc<RefCell<MediaFormSession<R>>>,
    pub on_add: Callback<Vec<UploadFile>>,
    pub on_remove: Callback<usize>,
    pub on_submit: Callback<SubmitEvent>,
    refresh: Callback<()>,
}

impl<R: MediaListing + 'static> MediaFormHandle<R>
where
    R::Form: 'static,
{
    /// Callback writing an input's value into the form fields.
    pub fn field(&self, apply: fn(&mut R::Form, String)) -> Callback<String> {
        let session = self.session.clone();
        let refresh = self.refresh.clone();
        Callback::from(move |value: String| {
            apply(&mut session.borrow_mut().form, value);
            refresh.emit(());
        })
    }
}

fn fresh_session<R: MediaListing>(
    file_field: FileField,
) -> MediaFormSession<R> {
    MediaFormSession::new(Rc::new(BlobUrlPreviews)).with_file_field(file_field)
}

/// Form session for creating (`id` is None) or editing a record with media.
/// `on_saved` runs after a successful submit, with the stored record when
/// the backend sent it back.
#[hook]
pub fn use_media_form<R>(
    id: Option<ListingId>,
    file_field: FileField,
    on_saved: Callback<Option<R>>,
) -> MediaFormHandle<R>
where
    R: MediaListing + 'static,
    R::Form: 'static,
{
    let session = use_mut_ref(|| fresh_session::<R>(file_field));
    let toast = use_toast();
    let trigger = use_force_update();
    let refresh = Callback::from(move |_| trigger.force_update());

    // Start over whenever the edited record changes. Replacing the session
    // drops the old one.
    {
        let session = session.clone();
        let refresh = refresh.clone();
        let toast = toast.clone();
        use_effect_with(id, move |id| {
            let mut next = fresh_session::<R>(file_field);
            let load = id
                .clone()
                .map(|id| (next.begin_load(id.clone()), id));
            *session.borrow_mut() = next;
            refresh.emit(());

            if let Some((registration, id)) = load {
                let weak = Rc::downgrade(&session);
                yew::platform::spawn_local(async move {
                    let client = get_api_client();
                    let outcome =
                        Abortable::new(R::fetch(&client, &id), registration)
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

    let on_add = {
        let session = session.clone();
        let refresh = refresh.clone();
        let toast = toast.clone();
        Callback::from(move |files: Vec<UploadFile>| {
            let picked = files.len();
            let result = session.borrow_mut().add_files(files);
            match result {
                Ok(added) if added < picked => toast.error(format!(
                    "Se permiten como máximo {MAX_STAGED_FILES} archivos"
                )),
                Ok(_) => {}
                Err(e) => toast.error(e.to_string()),
            }
            refresh.emit(());
        })
    };

    let on_remove = {
        let session = session.clone();
        let refresh = refresh.clone();
        Callback::from(move |index: usize| {
            let removed = session.borrow_mut().media.remove_at(index);
            if let Some(name) = removed {
                tracing::debug!("Removed {name} from the form");
            }
            refresh.emit(());
        })
    };

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

            let weak = Rc::downgrade(&session);
            let refresh = refresh.clone();
            let toast = toast.clone();
            let on_saved = on_saved.clone();
            yew::platform::spawn_local(async move {
                let client = get_api_client();
                let outcome = pending
                    .run(|target, submission| {
                        R::save(&client, target, submission)
                    })
                    .await;
                let Some(session) = weak.upgrade() else {
                    return;
                };
                let result = session.borrow_mut().finish(outcome);
                refresh.emit(());
                match result {
                    Ok(saved) => on_saved.emit(saved),
                    Err(SubmitError::Cancelled) => {}
                    Err(e) => toast.error(e.to_string()),
                }
            });
        })
    };

    MediaFormHandle {
        session,
        on_add,
        on_remove,
        on_submit,
        refresh,
    }
}
