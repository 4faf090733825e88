use async_trait::async_trait;

use crate::error::Result;
use super::contact::{Contact, ContactId};

/// Remote store holding the contact collection.
///
/// Implementations report failures through [`crate::Error`]; its `Display`
/// text becomes the reason the store shows to the user.
#[async_trait]
pub trait RemoteContactService: Send + Sync {
    async fn list(&self) -> Result<Vec<Contact>>;
    async fn create(&self, name: &str, number: &str) -> Result<Contact>;
    async fn delete(&self, id: &ContactId) -> Result<()>;
}
