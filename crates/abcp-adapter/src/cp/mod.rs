/*
[INPUT]:  Borrowed core client
[OUTPUT]: cp namespace accessors with admin gating
[POS]:    Entry point for the cp endpoint family
[UPDATE]: When adding new cp endpoint groups
*/

pub mod admin;
pub mod client;

use crate::http::client::AbcpClient;
use crate::http::error::{AbcpError, Result};

pub use admin::CpAdmin;
pub use client::CpClient;

/// The `cp/…` endpoint family.
pub struct Cp<'a> {
    client: &'a AbcpClient,
}

impl<'a> Cp<'a> {
    pub(crate) fn new(client: &'a AbcpClient) -> Self {
        Self { client }
    }

    /// Client-side methods, available to any valid credentials.
    pub fn client(&self) -> CpClient<'a> {
        CpClient::new(self.client)
    }

    /// Administrative methods. Refused unless the credentials are an `api@`
    /// login for this shop.
    pub fn admin(&self) -> Result<CpAdmin<'a>> {
        if self.client.is_admin() {
            Ok(CpAdmin::new(self.client))
        } else {
            Err(AbcpError::not_enough_rights(
                "cp admin methods require an api@ administrator login",
            ))
        }
    }
}
