// SPDX-License-Identifier: Apache-2.0

use textbridge_vision::{Client, Credentials, Url};

/// Handle on the OCR provider: holds the service's default credential
/// context and constructs one client per call.
///
/// Custom credentials are passed explicitly into the client constructor;
/// no ambient process state is swapped, so concurrent requests cannot
/// interfere.
#[derive(Debug)]
pub struct Provider {
    credentials: Credentials,
    endpoint: Option<Url>,
}

impl Provider {
    /// A provider addressing the stock endpoint.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: None,
        }
    }

    /// A provider addressing `endpoint` instead of the stock one.
    pub fn with_endpoint(credentials: Credentials, endpoint: Url) -> Self {
        Self {
            credentials,
            endpoint: Some(endpoint),
        }
    }

    fn client(&self, credentials: Credentials) -> Client {
        let builder = Client::builder(credentials);
        match &self.endpoint {
            Some(endpoint) => builder.endpoint(endpoint.clone()).build(),
            None => builder.build(),
        }
    }

    /// A client bound to the service's default credential context.
    pub fn free_tier(&self) -> Client {
        self.client(self.credentials.clone())
    }

    /// A client bound to a caller-supplied credential context.
    pub fn with_credentials(&self, credentials: Credentials) -> Client {
        self.client(credentials)
    }
}
