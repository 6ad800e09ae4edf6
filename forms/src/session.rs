//! Create/edit sessions of the admin forms.
//!
//! A session lives as long as the form is mounted. It owns the field values,
//! the staged media and the submit state; dropping it aborts whatever request
//! is still in flight and releases every preview.
//!
//! Each session can be driven in one call (`load`, `submit`) or in two steps
//! (`begin_load`/`finish_load`, `prepare`/`finish`) when the caller has to
//! release its borrow of the session while the request runs.

use crate::media::{MediaStaging, StagingError};
use crate::preview::PreviewAllocator;
use crate::submission::{
    Cancellation, LoadError, LoadTracker, Outcome, Pending, SubmitError,
    SubmitState, SubmitTracker,
};
use futures::future::{AbortRegistration, Abortable};
use payloads::requests::{
    AuctionForm, FileField, FormFields, MultipartSubmission, PropertyForm,
    VehicleBody, VehicleForm,
};
use payloads::responses::MediaRefs;
use payloads::{
    APIClient, Auction, Blanks, ClientError, ListingId, Property, UploadFile,
    Vehicle,
};
use std::rc::Rc;

/// A stored record whose form uploads media as multipart.
pub trait MediaListing: Sized {
    type Form: FormFields + Default + for<'a> From<&'a Self>;

    /// Used in messages, e.g. "Error al cargar la propiedad".
    const NOUN: &'static str;

    fn id(&self) -> &ListingId;

    fn media(&self) -> &MediaRefs;

    fn fetch(
        client: &APIClient,
        id: &ListingId,
    ) -> impl Future<Output = Result<Self, ClientError>>;

    /// Create or update. `None` when the backend accepted the write without
    /// echoing the record.
    fn save(
        client: &APIClient,
        target: Option<ListingId>,
        submission: MultipartSubmission,
    ) -> impl Future<Output = Result<Option<Self>, ClientError>>;
}

impl MediaListing for Property {
    type Form = PropertyForm;
    const NOUN: &'static str = "la propiedad";

    fn id(&self) -> &ListingId {
        &self.id
    }

    fn media(&self) -> &MediaRefs {
        &self.media
    }

    async fn fetch(
        client: &APIClient,
        id: &ListingId,
    ) -> Result<Self, ClientError> {
        client.get_property(id).await
    }

    async fn save(
        client: &APIClient,
        target: Option<ListingId>,
        submission: MultipartSubmission,
    ) -> Result<Option<Self>, ClientError> {
        match target {
            Some(id) => client.update_property(&id, submission).await,
            None => client.create_property(submission).await,
        }
    }
}

impl MediaListing for Auction {
    type Form = AuctionForm;
    const NOUN: &'static str = "la subasta";

    fn id(&self) -> &ListingId {
        &self.id
    }

    fn media(&self) -> &MediaRefs {
        &self.media
    }

    async fn fetch(
        client: &APIClient,
        id: &ListingId,
    ) -> Result<Self, ClientError> {
        client.get_auction(id).await
    }

    async fn save(
        client: &APIClient,
        target: Option<ListingId>,
        submission: MultipartSubmission,
    ) -> Result<Option<Self>, ClientError> {
        match target {
            Some(id) => client.update_auction(&id, submission).await,
            None => client.create_auction(submission).await,
        }
    }
}

fn save_fallback(noun: &str, editing: bool) -> String {
    if editing {
        format!("Error al actualizar {noun}")
    } else {
        format!("Error al crear {noun}")
    }
}

fn load_fallback(noun: &str) -> String {
    format!("Error al cargar {noun}")
}

fn blanks(editing: Option<&ListingId>) -> Blanks {
    match editing {
        Some(_) => Blanks::Clear,
        None => Blanks::Omit,
    }
}

/// Form session of a listing with media: field values plus staged files.
pub struct MediaFormSession<R: MediaListing> {
    pub form: R::Form,
    pub media: MediaStaging,
    file_field: FileField,
    editing: Option<ListingId>,
    submits: SubmitTracker,
    loads: LoadTracker,
}

pub type PropertyFormSession = MediaFormSession<Property>;
pub type AuctionFormSession = MediaFormSession<Auction>;

impl<R: MediaListing> MediaFormSession<R> {
    /// Empty session for creating a record.
    pub fn new(previews: Rc<dyn PreviewAllocator>) -> Self {
        Self {
            form: R::Form::default(),
            media: MediaStaging::new(previews),
            file_field: FileField::default(),
            editing: None,
            submits: SubmitTracker::default(),
            loads: LoadTracker::default(),
        }
    }

    /// Send new files under another multipart field name.
    pub fn with_file_field(mut self, file_field: FileField) -> Self {
        self.file_field = file_field;
        self
    }

    pub fn editing(&self) -> Option<&ListingId> {
        self.editing.as_ref()
    }

    pub fn state(&self) -> &SubmitState {
        self.submits.state()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.loads.error()
    }

    /// Switch that aborts the submit in flight.
    pub fn cancellation(&self) -> Cancellation {
        self.submits.cancellation()
    }

    pub fn add_files(
        &mut self,
        files: impl IntoIterator<Item = UploadFile>,
    ) -> Result<usize, StagingError> {
        self.media.append(files)
    }

    /// Prefill the fields and the stored media from a fetched record.
    pub fn fill_from(&mut self, record: &R) {
        self.form = R::Form::from(record);
        self.media.initialize_from_remote(record.media());
        self.editing = Some(record.id().clone());
    }

    /// Start editing `id`. The fetch is aborted if the session is cancelled
    /// or dropped.
    pub fn begin_load(&mut self, id: ListingId) -> AbortRegistration {
        self.editing = Some(id);
        self.loads.begin()
    }

    pub fn finish_load(&mut self, outcome: Outcome<R>) -> Result<(), LoadError> {
        let record = self.loads.finish(outcome, &load_fallback(R::NOUN))?;
        self.fill_from(&record);
        Ok(())
    }

    pub async fn load(
        &mut self,
        client: &APIClient,
        id: ListingId,
    ) -> Result<(), LoadError> {
        let registration = self.begin_load(id.clone());
        let outcome =
            Abortable::new(R::fetch(client, &id), registration).await;
        self.finish_load(outcome)
    }

    /// Validate and build the request. Only newly picked files are sent; an
    /// edit sends every field so cleared values reach the backend.
    pub fn prepare(
        &mut self,
    ) -> Result<Pending<MultipartSubmission>, SubmitError> {
        self.submits.ensure_ready()?;
        if let Err(e) = self.form.validate() {
            return Err(self.submits.reject(e));
        }
        let submission = MultipartSubmission::with_blanks(
            &self.form,
            blanks(self.editing.as_ref()),
            self.file_field,
            self.media.new_files(),
        );
        let registration = self.submits.begin()?;
        Ok(Pending::new(self.editing.clone(), submission, registration))
    }

    /// Apply the outcome of a prepared request. On success every preview is
    /// released and the session is done, whether or not the stored record
    /// came back.
    pub fn finish(
        &mut self,
        outcome: Outcome<Option<R>>,
    ) -> Result<Option<R>, SubmitError> {
        let fallback = save_fallback(R::NOUN, self.editing.is_some());
        self.submits
            .finish(outcome, &fallback, || self.media.release_all())
    }

    pub async fn submit(
        &mut self,
        client: &APIClient,
    ) -> Result<Option<R>, SubmitError> {
        let pending = self.prepare()?;
        let outcome = pending
            .run(|target, submission| R::save(client, target, submission))
            .await;
        self.finish(outcome)
    }

    /// Abort any request in flight. Staged media is kept.
    pub fn cancel(&mut self) {
        self.loads.cancel();
        self.submits.cancel();
    }
}

impl<R: MediaListing> Drop for MediaFormSession<R> {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Form session of a vehicle. Vehicles carry no media and are sent as JSON.
#[derive(Default)]
pub struct VehicleFormSession {
    pub form: VehicleForm,
    editing: Option<ListingId>,
    submits: SubmitTracker,
    loads: LoadTracker,
}

const VEHICLE_NOUN: &str = "el vehículo";

fn current_year() -> i32 {
    i32::from(jiff::Zoned::now().year())
}

impl VehicleFormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(&self) -> Option<&ListingId> {
        self.editing.as_ref()
    }

    pub fn state(&self) -> &SubmitState {
        self.submits.state()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.loads.error()
    }

    pub fn cancellation(&self) -> Cancellation {
        self.submits.cancellation()
    }

    pub fn fill_from(&mut self, vehicle: &Vehicle) {
        self.form = VehicleForm::from(vehicle);
        self.editing = Some(vehicle.id.clone());
    }

    pub fn begin_load(&mut self, id: ListingId) -> AbortRegistration {
        self.editing = Some(id);
        self.loads.begin()
    }

    pub fn finish_load(
        &mut self,
        outcome: Outcome<Vehicle>,
    ) -> Result<(), LoadError> {
        let vehicle = self.loads.finish(outcome, &load_fallback(VEHICLE_NOUN))?;
        self.fill_from(&vehicle);
        Ok(())
    }

    pub async fn load(
        &mut self,
        client: &APIClient,
        id: ListingId,
    ) -> Result<(), LoadError> {
        let registration = self.begin_load(id.clone());
        let outcome =
            Abortable::new(client.get_vehicle(&id), registration).await;
        self.finish_load(outcome)
    }

    pub fn prepare(&mut self) -> Result<Pending<VehicleBody>, SubmitError> {
        self.submits.ensure_ready()?;
        if let Err(e) = self.form.validate(current_year()) {
            return Err(self.submits.reject(e));
        }
        let body = self.form.body(blanks(self.editing.as_ref()));
        let registration = self.submits.begin()?;
        Ok(Pending::new(self.editing.clone(), body, registration))
    }

    pub fn finish(
        &mut self,
        outcome: Outcome<Option<Vehicle>>,
    ) -> Result<Option<Vehicle>, SubmitError> {
        let fallback = save_fallback(VEHICLE_NOUN, self.editing.is_some());
        self.submits.finish(outcome, &fallback, || ())
    }

    pub async fn submit(
        &mut self,
        client: &APIClient,
    ) -> Result<Option<Vehicle>, SubmitError> {
        let pending = self.prepare()?;
        let outcome = pending
            .run(|target, body| save_vehicle(client, target, body))
            .await;
        self.finish(outcome)
    }

    pub fn cancel(&mut self) {
        self.loads.cancel();
        self.submits.cancel();
    }
}

impl Drop for VehicleFormSession {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub async fn save_vehicle(
    client: &APIClient,
    target: Option<ListingId>,
    body: VehicleBody,
) -> Result<Option<Vehicle>, ClientError> {
    match target {
        Some(id) => client.update_vehicle(&id, &body).await,
        None => client.create_vehicle(&body).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::MemoryPreviews;
    use payloads::ValidationError;

    fn image(name: &str) -> UploadFile {
        UploadFile::new(name, "image/png", vec![1])
    }

    #[test]
    fn invalid_form_is_rejected_before_sending() {
        let previews = MemoryPreviews::new();
        let mut session = PropertyFormSession::new(previews.clone());
        session.add_files([image("a.png")]).unwrap();

        let error = session.prepare().err();
        assert_eq!(
            error,
            Some(SubmitError::Invalid(ValidationError::MissingField(
                "título"
            )))
        );
        assert!(matches!(session.state(), SubmitState::Failed(_)));
        assert_eq!(previews.outstanding(), 1);
    }

    #[test]
    fn prepare_sends_only_new_files() {
        let previews = MemoryPreviews::new();
        let mut session =
            AuctionFormSession::new(previews).with_file_field(FileField::Imagenes);
        session.form.titulo = "Lote 3".into();
        session.form.precio_inicial = Some(1000.into());
        session.form.inicio_fecha = Some("2025-01-01T00:00:00Z".parse().unwrap());
        session.form.fin_fecha = Some("2025-01-02T00:00:00Z".parse().unwrap());
        session.media.initialize_from_remote(&MediaRefs {
            urls: vec!["https://cdn/x.jpg".into()],
            ..Default::default()
        });
        session.add_files([image("b.png")]).unwrap();

        let pending = session.prepare().unwrap();
        assert_eq!(pending.target, None);
        assert_eq!(pending.body.file_field, FileField::Imagenes);
        assert_eq!(pending.body.files.len(), 1);
        assert_eq!(pending.body.files[0].file_name, "b.png");
        assert_eq!(session.state(), &SubmitState::Submitting);
        assert_eq!(session.prepare().err(), Some(SubmitError::InProgress));
    }

    #[test]
    fn success_releases_previews() {
        let previews = MemoryPreviews::new();
        let mut session = PropertyFormSession::new(previews.clone());
        session.form = PropertyForm {
            titulo: "Casa".into(),
            precio: Some(10.into()),
            tipo: "casa".into(),
            operacion: "venta".into(),
            direccion: "Calle 2".into(),
            ..Default::default()
        };
        session.add_files([image("a.png"), image("b.png")]).unwrap();
        let _pending = session.prepare().unwrap();

        let property = Property {
            id: ListingId::from("p1"),
            titulo: "Casa".into(),
            descripcion: None,
            precio: 10.into(),
            tipo: "casa".into(),
            operacion: "venta".into(),
            direccion: "Calle 2".into(),
            metros: None,
            habitaciones: None,
            media: MediaRefs::default(),
        };
        let saved = session.finish(Ok(Ok(Some(property)))).unwrap();
        assert_eq!(saved.map(|p| p.id), Some(ListingId::from("p1")));
        assert_eq!(previews.outstanding(), 0);
        assert_eq!(previews.released(), 2);
        assert_eq!(session.state(), &SubmitState::Succeeded);
    }

    #[test]
    fn success_without_echoed_record_still_releases_previews() {
        let previews = MemoryPreviews::new();
        let mut session = PropertyFormSession::new(previews.clone());
        session.form = PropertyForm {
            titulo: "Casa".into(),
            precio: Some(10.into()),
            tipo: "casa".into(),
            operacion: "venta".into(),
            direccion: "Calle 2".into(),
            ..Default::default()
        };
        session.add_files([image("a.png")]).unwrap();
        let _pending = session.prepare().unwrap();

        assert_eq!(session.finish(Ok(Ok(None))).map(|p| p.is_none()), Ok(true));
        assert_eq!(previews.outstanding(), 0);
        assert_eq!(session.state(), &SubmitState::Succeeded);
    }

    #[test]
    fn dropping_session_releases_previews() {
        let previews = MemoryPreviews::new();
        let mut session = PropertyFormSession::new(previews.clone());
        session.add_files([image("a.png")]).unwrap();
        drop(session);
        assert_eq!(previews.outstanding(), 0);
    }

    #[test]
    fn vehicle_year_is_checked_against_current_year() {
        let mut session = VehicleFormSession::new();
        session.form = VehicleForm {
            marca: "Ford".into(),
            modelo: "Falcon".into(),
            precio: Some(9000.into()),
            anio: Some(current_year() + 2),
            ..Default::default()
        };
        assert!(matches!(
            session.prepare(),
            Err(SubmitError::Invalid(ValidationError::InvalidYear(_)))
        ));
        session.form.anio = Some(1980);
        assert!(session.prepare().is_ok());
    }
}
