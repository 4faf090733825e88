use std::time::Duration;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use crate::{
    Error,
    error::Result,
    config::Config,
};

use super::{
    contact::{Contact, ContactId},
    contact_service::RemoteContactService,
};

/// [`RemoteContactService`] over a REST collection endpoint:
/// `GET`/`POST` on the collection url and `DELETE` on `{url}/{id}`.
pub struct HttpContactService {
    collection_url  : Url,
    client          : Client,
}

impl HttpContactService {
    pub fn new(collection_url: &str) -> Result<Self> {
        Self::with_timeout(collection_url, None)
    }

    pub fn from_config(cfg: &dyn Config) -> Result<Self> {
        Self::build(cfg.api_url().clone(), cfg.request_timeout())
    }

    pub fn with_timeout(collection_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let url = Url::parse(collection_url)?;
        Self::build(url, timeout)
    }

    fn build(collection_url: Url, timeout: Option<Duration>) -> Result<Self> {
        if collection_url.cannot_be_a_base() {
            return Err(Error::Argument(format!("Invalid url: {} can not be a base", collection_url)));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            Error::State(format!("Http error: building http client error {e}"))
        })?;

        Ok(Self {
            collection_url,
            client,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    pub(crate) fn item_url(&self, id: &ContactId) -> Result<Url> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Argument(format!("Invalid url: {} can not be a base", self.collection_url)))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }
}

fn check_status(rsp: Response) -> Result<Response> {
    let status = rsp.status();
    if status.is_success() {
        return Ok(rsp);
    }
    Err(Error::Protocol(format!("Request failed with status code {}", status.as_u16())))
}

fn send_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Network(format!("Http error: request timed out {e}"))
    } else {
        Error::Network(format!("Http error: sending http request error {e}"))
    }
}

#[async_trait]
impl RemoteContactService for HttpContactService {
    async fn list(&self) -> Result<Vec<Contact>> {
        debug!("GET {}", self.collection_url);
        let rsp = self.client.get(self.collection_url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(send_error)?;

        check_status(rsp)?
            .json::<Vec<Contact>>()
            .await
            .map_err(|e| {
            Error::Protocol(format!("Http error: deserialize json error {e}"))
        })
    }

    async fn create(&self, name: &str, number: &str) -> Result<Contact> {
        #[derive(Serialize)]
        struct RequestData<'a> {
            name    : &'a str,
            number  : &'a str,
        }

        debug!("POST {} name={}", self.collection_url, name);
        let rsp = self.client.post(self.collection_url.clone())
            .json(&RequestData { name, number })
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(send_error)?;

        check_status(rsp)?
            .json::<Contact>()
            .await
            .map_err(|e| {
            Error::Protocol(format!("Http error: deserialize json error {e}"))
        })
    }

    async fn delete(&self, id: &ContactId) -> Result<()> {
        let url = self.item_url(id)?;
        debug!("DELETE {}", url);
        let rsp = self.client.delete(url)
            .send()
            .await
            .map_err(send_error)?;

        check_status(rsp).map(|_| ())
    }
}
