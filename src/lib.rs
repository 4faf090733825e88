pub mod core;
pub mod contacts;

pub use crate::core::{
    error::{self, Error},
    config,
    logger,
    default_configuration as configuration,
};

pub use crate::contacts::{
    phone_format,
    Contact,
    ContactId,
    Candidate,
    ContactStore,
    ContactCollectionState,
    ContactStats,
    Status,
    ValidationError,
    RemoteContactService,
    HttpContactService,
};
