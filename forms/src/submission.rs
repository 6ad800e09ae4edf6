//! Submit lifecycle shared by the admin forms.
//!
//! `Idle → Submitting → Succeeded | Failed`. A failed submit can be sent
//! again; a successful one is final for the session. Every in-flight request
//! is registered with a [`Cancellation`] so it can be aborted when the form
//! goes away, and a completion that arrives after that is never applied.

use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};
use payloads::{ClientError, ListingId, ValidationError};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    /// Holds the message shown to the user.
    Failed(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Ya hay un envío en curso")]
    InProgress,
    #[error("El formulario ya fue enviado")]
    AlreadySubmitted,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The backend refused the request or couldn't be reached.
    #[error("{0}")]
    Rejected(String),
    #[error("Envío cancelado")]
    Cancelled,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("{0}")]
    Failed(String),
    #[error("Carga cancelada")]
    Cancelled,
}

/// Abort switch for the request a session currently has in flight.
#[derive(Clone, Default)]
pub struct Cancellation {
    current: Arc<Mutex<Option<AbortHandle>>>,
}

impl Cancellation {
    /// Register a new request, aborting any previous one.
    pub fn arm(&self) -> AbortRegistration {
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.slot().replace(handle) {
            previous.abort();
        }
        registration
    }

    /// Forget the current request without aborting it.
    pub fn disarm(&self) {
        self.slot().take();
    }

    /// Abort the request in flight. Returns whether there was one.
    pub fn cancel(&self) -> bool {
        match self.slot().take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<AbortHandle>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Result of an abortable request.
pub type Outcome<T> = Result<Result<T, ClientError>, Aborted>;

/// A request prepared by a session, ready to be sent.
///
/// `target` is the record being edited, or `None` when creating.
pub struct Pending<B> {
    pub target: Option<ListingId>,
    pub body: B,
    registration: AbortRegistration,
}

impl<B> Pending<B> {
    pub(crate) fn new(
        target: Option<ListingId>,
        body: B,
        registration: AbortRegistration,
    ) -> Self {
        Self {
            target,
            body,
            registration,
        }
    }

    /// Send the request with `send`, stopping early if it is cancelled.
    pub async fn run<T, F, Fut>(self, send: F) -> Outcome<T>
    where
        F: FnOnce(Option<ListingId>, B) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        Abortable::new(send(self.target, self.body), self.registration).await
    }
}

/// Fetch of the record an edit form starts from.
#[derive(Default)]
pub struct LoadTracker {
    cancellation: Cancellation,
    error: Option<String>,
}

impl LoadTracker {
    pub fn begin(&mut self) -> AbortRegistration {
        self.error = None;
        self.cancellation.arm()
    }

    /// The fetched record, or the message to show instead. The form keeps
    /// its current values on failure.
    pub fn finish<T>(
        &mut self,
        outcome: Outcome<T>,
        fallback: &str,
    ) -> Result<T, LoadError> {
        match outcome {
            Err(Aborted) => Err(LoadError::Cancelled),
            Ok(result) => {
                self.cancellation.disarm();
                result.map_err(|e| {
                    tracing::warn!("Load failed: {e}");
                    let message = e.user_message(fallback);
                    self.error = Some(message.clone());
                    LoadError::Failed(message)
                })
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn cancel(&self) -> bool {
        self.cancellation.cancel()
    }
}

/// State machine plus cancellation of one form's submits.
#[derive(Default)]
pub struct SubmitTracker {
    state: SubmitState,
    cancellation: Cancellation,
}

impl SubmitTracker {
    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn cancellation(&self) -> Cancellation {
        self.cancellation.clone()
    }

    /// Fails unless a new submit may start.
    pub fn ensure_ready(&self) -> Result<(), SubmitError> {
        match self.state {
            SubmitState::Submitting => Err(SubmitError::InProgress),
            SubmitState::Succeeded => Err(SubmitError::AlreadySubmitted),
            SubmitState::Idle | SubmitState::Failed(_) => Ok(()),
        }
    }

    /// A check failed before anything was sent.
    pub fn reject(&mut self, error: ValidationError) -> SubmitError {
        self.state = SubmitState::Failed(error.to_string());
        SubmitError::Invalid(error)
    }

    pub fn begin(&mut self) -> Result<AbortRegistration, SubmitError> {
        self.ensure_ready()?;
        self.state = SubmitState::Submitting;
        Ok(self.cancellation.arm())
    }

    /// Record the outcome of the request started by [`Self::begin`].
    ///
    /// `on_success` runs only if the request completed while still wanted.
    /// Failures are turned into a user message, falling back to `fallback`.
    pub fn finish<T>(
        &mut self,
        outcome: Outcome<T>,
        fallback: &str,
        on_success: impl FnOnce(),
    ) -> Result<T, SubmitError> {
        if self.state != SubmitState::Submitting {
            tracing::debug!("Ignoring completion of a cancelled submit");
            return Err(SubmitError::Cancelled);
        }
        self.cancellation.disarm();
        match outcome {
            Err(Aborted) => {
                self.state = SubmitState::Idle;
                Err(SubmitError::Cancelled)
            }
            Ok(Ok(record)) => {
                on_success();
                self.state = SubmitState::Succeeded;
                Ok(record)
            }
            Ok(Err(e)) => {
                tracing::warn!("Submit failed: {e}");
                let message = e.user_message(fallback);
                self.state = SubmitState::Failed(message.clone());
                Err(SubmitError::Rejected(message))
            }
        }
    }

    /// Abort the request in flight, if any, and go back to idle.
    pub fn cancel(&mut self) -> bool {
        let aborted = self.cancellation.cancel();
        if self.state == SubmitState::Submitting {
            self.state = SubmitState::Idle;
        }
        aborted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::StatusCode;

    fn api_error(body: &str) -> ClientError {
        ClientError::APIError(StatusCode::BAD_REQUEST, body.into())
    }

    #[test]
    fn failed_submit_can_be_retried() {
        let mut tracker = SubmitTracker::default();
        tracker.begin().unwrap();
        assert_eq!(tracker.begin().unwrap_err(), SubmitError::InProgress);

        let result = tracker.finish::<()>(
            Ok(Err(api_error(r#"{"error":"Título duplicado"}"#))),
            "Error al guardar",
            || panic!("not a success"),
        );
        assert_eq!(
            result,
            Err(SubmitError::Rejected("Título duplicado".into()))
        );
        assert_eq!(
            tracker.state(),
            &SubmitState::Failed("Título duplicado".into())
        );

        tracker.begin().unwrap();
        let mut released = false;
        tracker
            .finish(Ok(Ok(7)), "Error al guardar", || released = true)
            .unwrap();
        assert!(released);
        assert_eq!(tracker.state(), &SubmitState::Succeeded);
        assert_eq!(tracker.begin().unwrap_err(), SubmitError::AlreadySubmitted);
    }

    #[test]
    fn late_completion_is_ignored_after_cancel() {
        let mut tracker = SubmitTracker::default();
        tracker.begin().unwrap();
        assert!(tracker.cancel());
        assert_eq!(tracker.state(), &SubmitState::Idle);

        let result =
            tracker.finish(Ok(Ok(1)), "Error al guardar", || panic!("applied"));
        assert_eq!(result, Err(SubmitError::Cancelled));
        assert_eq!(tracker.state(), &SubmitState::Idle);
    }

    #[test]
    fn arming_aborts_previous_request() {
        let cancellation = Cancellation::default();
        let first = cancellation.arm();
        let _second = cancellation.arm();
        let aborted = futures::executor::block_on(Abortable::new(
            async { 1 },
            first,
        ));
        assert_eq!(aborted, Err(Aborted));
        assert!(cancellation.cancel());
        assert!(!cancellation.cancel());
    }

    #[test]
    fn load_failure_keeps_message() {
        let mut loads = LoadTracker::default();
        loads.begin();
        let result = loads.finish::<()>(
            Ok(Err(api_error("Not Found"))),
            "Error al cargar la propiedad",
        );
        assert_eq!(
            result,
            Err(LoadError::Failed("Error al cargar la propiedad".into()))
        );
        assert_eq!(loads.error(), Some("Error al cargar la propiedad"));

        loads.begin();
        assert_eq!(loads.error(), None);
        assert!(loads.cancel());
        assert_eq!(loads.finish::<()>(Err(Aborted), "x"), Err(LoadError::Cancelled));
    }

    #[test]
    fn validation_failure_is_shown() {
        let mut tracker = SubmitTracker::default();
        let error =
            tracker.reject(ValidationError::MissingField("título"));
        assert!(matches!(error, SubmitError::Invalid(_)));
        assert_eq!(
            tracker.state(),
            &SubmitState::Failed("El campo título es obligatorio".into())
        );
        assert!(tracker.ensure_ready().is_ok());
    }
}
