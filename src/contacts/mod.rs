pub mod contact;
pub mod phone_format;
pub mod contact_service;
pub mod api_client;
pub mod contact_store;

pub use self::{
    contact::{Contact, ContactId, Candidate},
    contact_service::RemoteContactService,
    api_client::HttpContactService,
    contact_store::{
        ContactStore,
        ContactCollectionState,
        ContactStats,
        Status,
        ValidationError,
    },
};
