use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use log::{debug, info, warn};

use super::{
    contact::{Candidate, Contact, ContactId},
    contact_service::RemoteContactService,
    phone_format,
};

/// Lifecycle of the most recent remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl Status {
    pub fn is_pending(&self) -> bool {
        matches!(self, Status::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle        => "idle",
            Status::Loading     => "loading",
            Status::Succeeded   => "succeeded",
            Status::Failed      => "failed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Local rejection of an add, raised before any remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    DuplicateName,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName      => write!(f, "empty name"),
            ValidationError::DuplicateName  => write!(f, "duplicate name"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactStats {
    pub total           : usize,
    pub shown           : usize,
    pub has_active_filter: bool,
}

/// Contacts whose lower-cased name contains the trimmed, lower-cased
/// filter. An empty filter keeps everything. Order is preserved.
pub fn filter_contacts<'a>(items: &'a [Contact], filter: &str) -> Vec<&'a Contact> {
    let query = filter.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }

    items.iter()
        .filter(|c| c.name().to_lowercase().contains(&query))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactCollectionState {
    items   : Vec<Contact>,
    filter  : String,
    status  : Status,
    error   : Option<String>,
}

impl ContactCollectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Contact] {
        &self.items
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filtered_contacts(&self) -> Vec<&Contact> {
        filter_contacts(&self.items, &self.filter)
    }

    pub fn stats(&self) -> ContactStats {
        ContactStats {
            total: self.items.len(),
            shown: self.filtered_contacts().len(),
            has_active_filter: !self.filter.trim().is_empty(),
        }
    }

    pub fn contact(&self, id: &ContactId) -> Option<&Contact> {
        self.items.iter().find(|c| c.id() == id)
    }

    fn validate(&self, name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.items.iter().any(|c| c.has_name(name)) {
            return Err(ValidationError::DuplicateName);
        }
        Ok(())
    }

    fn begin(&mut self) {
        self.status = Status::Loading;
        self.error = None;
    }

    fn fail(&mut self, reason: String) {
        self.status = Status::Failed;
        self.error = Some(reason);
    }

    fn succeed(&mut self) {
        self.status = Status::Succeeded;
        self.error = None;
    }
}

struct Shared {
    state   : ContactCollectionState,
    attached: bool,
    // Bumped on detach; results of operations begun in an older session
    // are dropped.
    session : u64,
}

/// Owner of the contact collection state.
///
/// Cloning yields another handle on the same state. Remote operations hold
/// no lock while awaiting the service, so overlapping operations resolve
/// independently and the last one to resolve decides `status`/`error`.
#[derive(Clone)]
pub struct ContactStore {
    shared  : Arc<Mutex<Shared>>,
    service : Arc<dyn RemoteContactService>,
}

impl ContactStore {
    pub fn new(service: Arc<dyn RemoteContactService>) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                state   : ContactCollectionState::new(),
                attached: false,
                session : 0,
            })),
            service,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, op: &str) -> u64 {
        let mut shared = self.lock();
        shared.state.begin();
        debug!("{op}: status -> loading");
        shared.session
    }

    fn finish<F>(&self, op: &str, session: u64, apply: F)
    where
        F: FnOnce(&mut ContactCollectionState),
    {
        let mut shared = self.lock();
        if shared.session != session {
            debug!("{op}: store detached, result discarded");
            return;
        }
        apply(&mut shared.state);
        debug!("{op}: status -> {}", shared.state.status);
    }

    /// Loads contacts when a presentation layer attaches. Repeated calls
    /// while attached do nothing; the store reloads after a detach.
    pub async fn attach(&self) {
        let first = {
            let mut shared = self.lock();
            let first = !shared.attached;
            shared.attached = true;
            first
        };

        if first {
            info!("Contact store attached, loading contacts");
            self.load().await;
        }
    }

    /// Drops the results of every operation still in flight.
    pub fn detach(&self) {
        let mut shared = self.lock();
        shared.session += 1;
        shared.attached = false;
        info!("Contact store detached");
    }

    pub async fn load(&self) {
        let session = self.begin("load");
        let result = self.service.list().await;

        self.finish("load", session, |state| match result {
            Ok(items) => {
                debug!("load: {} contacts", items.len());
                state.items = items;
                state.succeed();
            },
            Err(e) => {
                warn!("Loading contacts error: {e}");
                state.fail(e.to_string());
            }
        });
    }

    /// Validates the candidate against the local snapshot, then creates it
    /// remotely with the trimmed name and formatted number. Only validation
    /// failures are returned; remote failures land in the state.
    pub async fn add(&self, candidate: &Candidate) -> Result<(), ValidationError> {
        let name = candidate.name().trim().to_string();
        let number = phone_format::format(candidate.number());

        let session = {
            let mut shared = self.lock();
            shared.state.validate(&name).map_err(|e| {
                debug!("add: rejected {:?}: {e}", candidate.name());
                e
            })?;
            shared.state.begin();
            debug!("add: status -> loading");
            shared.session
        };

        let result = self.service.create(&name, &number).await;

        self.finish("add", session, |state| match result {
            Ok(contact) => {
                debug!("add: created {}", contact);
                state.items.push(contact);
                state.succeed();
            },
            Err(e) => {
                warn!("Adding contact {name} error: {e}");
                state.fail(e.to_string());
            }
        });
        Ok(())
    }

    pub async fn remove(&self, id: &ContactId) {
        let session = self.begin("remove");
        let result = self.service.delete(id).await;

        self.finish("remove", session, |state| match result {
            Ok(()) => {
                state.items.retain(|c| c.id() != id);
                state.succeed();
            },
            Err(e) => {
                warn!("Deleting contact {id} error: {e}");
                state.fail(e.to_string());
            }
        });
    }

    pub fn set_filter(&self, text: &str) {
        self.lock().state.filter = text.to_string();
    }

    pub fn snapshot(&self) -> ContactCollectionState {
        self.lock().state.clone()
    }

    pub fn items(&self) -> Vec<Contact> {
        self.lock().state.items.clone()
    }

    pub fn filtered_contacts(&self) -> Vec<Contact> {
        self.lock().state
            .filtered_contacts()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn filter(&self) -> String {
        self.lock().state.filter.clone()
    }

    pub fn status(&self) -> Status {
        self.lock().state.status
    }

    pub fn error(&self) -> Option<String> {
        self.lock().state.error.clone()
    }
}
