#[cfg(test)]
mod core {
    mod config;
}

#[cfg(test)]
mod contacts {
    mod api_client;
    mod contact_store;
}

use std::sync::Arc;
use phonebook::{ContactStore, HttpContactService};
use wiremock::MockServer;

// helper functions
fn collection_url(server: &MockServer) -> String {
    format!("{}/contacts", server.uri())
}

fn http_store(server: &MockServer) -> ContactStore {
    let service = HttpContactService::new(&collection_url(server)).unwrap();
    ContactStore::new(Arc::new(service))
}
