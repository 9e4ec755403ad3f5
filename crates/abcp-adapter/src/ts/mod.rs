/*
[INPUT]:  Borrowed core client
[OUTPUT]: ts namespace accessors with admin gating
[POS]:    Entry point for the trade stock endpoint family
[UPDATE]: When adding new ts endpoint groups
*/

pub mod admin;
pub mod client;

use crate::http::client::AbcpClient;
use crate::http::error::{AbcpError, Result};

pub use admin::TsAdmin;
pub use client::TsClient;

/// The trade stock endpoint family: `ts/…` for clients, `cp/ts/…` for
/// administrators.
pub struct Ts<'a> {
    client: &'a AbcpClient,
}

impl<'a> Ts<'a> {
    pub(crate) fn new(client: &'a AbcpClient) -> Self {
        Self { client }
    }

    /// Client-side methods, available to any valid credentials.
    pub fn client(&self) -> TsClient<'a> {
        TsClient::new(self.client)
    }

    /// Administrative methods. Refused unless the credentials are an `api@`
    /// login for this shop.
    pub fn admin(&self) -> Result<TsAdmin<'a>> {
        if self.client.is_admin() {
            Ok(TsAdmin::new(self.client))
        } else {
            Err(AbcpError::not_enough_rights(
                "ts admin methods require an api@ administrator login",
            ))
        }
    }
}
