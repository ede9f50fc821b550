// SPDX-License-Identifier: Apache-2.0

use crate::{
    boot_lookup_id, ias_without_addresses, DhcpError, DhcpV6AddressPool,
    DhcpV6BootConfig, DhcpV6LeaseTimer, DhcpV6Message, DhcpV6MessageType,
    DhcpV6ServerConfig, ErrorKind,
};

/// Outcome of `DhcpV6PacketBuilder::build_response()` when the request is
/// not rejected.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DhcpV6Response {
    Reply(DhcpV6Message),
    /// Address allocation failed. The reply carries the failure as
    /// NoAddrsAvail status and should still be sent to the client.
    ReplyWithFailure(DhcpV6Message, DhcpError),
    /// Message type this server does not answer.
    Ignored,
}

impl DhcpV6Response {
    pub fn message(&self) -> Option<&DhcpV6Message> {
        match self {
            Self::Reply(m) | Self::ReplyWithFailure(m, _) => Some(m),
            Self::Ignored => None,
        }
    }

    pub fn error(&self) -> Option<&DhcpError> {
        match self {
            Self::ReplyWithFailure(_, e) => Some(e),
            _ => None,
        }
    }
}

/// Builds DHCPv6 responses for boot clients.
///
/// Holds no per-request state, a single instance can be shared between
/// threads.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DhcpV6PacketBuilder {
    pub(crate) server_duid: Vec<u8>,
    pub(crate) preferred_time_sec: u32,
    pub(crate) valid_time_sec: u32,
    pub(crate) timer: DhcpV6LeaseTimer,
}

impl DhcpV6PacketBuilder {
    pub fn new(config: &DhcpV6ServerConfig) -> Result<Self, DhcpError> {
        config.validate()?;
        Ok(Self {
            server_duid: config.server_duid.to_vec(),
            preferred_time_sec: config.preferred_time_sec,
            valid_time_sec: config.valid_time_sec,
            timer: DhcpV6LeaseTimer::new(config.preferred_time_sec),
        })
    }

    pub fn lease_timer(&self) -> DhcpV6LeaseTimer {
        self.timer
    }

    /// Build the response to `request`.
    ///
    /// Returns `Err` when no reply should be sent: missing or malformed
    /// client ID, `boot_config` found no boot URL for the client, or a
    /// nested reply option exceeds the DHCPv6 option length limit.
    /// Allocation failures still produce a reply, see
    /// `DhcpV6Response::ReplyWithFailure`.
    pub fn build_response<B, P>(
        &self,
        request: &DhcpV6Message,
        boot_config: &B,
        address_pool: &P,
    ) -> Result<DhcpV6Response, DhcpError>
    where
        B: DhcpV6BootConfig + ?Sized,
        P: DhcpV6AddressPool + ?Sized,
    {
        let xid = request.xid;
        let arch = request.options.client_arch_type();
        match request.msg_type {
            DhcpV6MessageType::Solicit => {
                let client_id = get_client_id(request)?;
                let boot_url =
                    boot_config.boot_url(boot_lookup_id(client_id)?, arch)?;
                let iaids = request.options.ia_na_ids();
                let reservation =
                    address_pool.reserve_addresses(client_id, &iaids);
                if let Some(e) = reservation.error {
                    log::warn!(
                        "Failed to reserve addresses for client {client_id:?}: \
                         {e}"
                    );
                    return Ok(DhcpV6Response::ReplyWithFailure(
                        self.gen_advertise_no_addrs(xid, client_id, &e),
                        e,
                    ));
                }
                log::debug!(
                    "Advertising {} addresses to client {client_id:?}",
                    reservation.associations.len()
                );
                Ok(DhcpV6Response::Reply(self.gen_advertise(
                    xid,
                    client_id,
                    arch,
                    &reservation.associations,
                    &boot_url,
                    boot_config.preference(),
                    &boot_config.recursive_dns(),
                )?))
            }
            DhcpV6MessageType::Request => {
                let client_id = get_client_id(request)?;
                let boot_url =
                    boot_config.boot_url(boot_lookup_id(client_id)?, arch)?;
                let iaids = request.options.ia_na_ids();
                let reservation =
                    address_pool.reserve_addresses(client_id, &iaids);
                let ias_without_addrs =
                    ias_without_addresses(&reservation.associations, &iaids);
                log::debug!(
                    "Replying client {client_id:?} with {} leased and {} \
                     failed IA_NA",
                    reservation.associations.len(),
                    ias_without_addrs.len()
                );
                let reply = self.gen_reply(
                    xid,
                    client_id,
                    arch,
                    &reservation.associations,
                    &ias_without_addrs,
                    &boot_url,
                    &boot_config.recursive_dns(),
                    reservation.error.as_ref(),
                )?;
                Ok(match reservation.error {
                    Some(e) => {
                        log::warn!(
                            "Failed to reserve addresses for client \
                             {client_id:?}: {e}"
                        );
                        DhcpV6Response::ReplyWithFailure(reply, e)
                    }
                    None => DhcpV6Response::Reply(reply),
                })
            }
            DhcpV6MessageType::InformationRequest => {
                let client_id = get_client_id(request)?;
                let boot_url =
                    boot_config.boot_url(boot_lookup_id(client_id)?, arch)?;
                Ok(DhcpV6Response::Reply(self.gen_information_request_reply(
                    xid,
                    client_id,
                    arch,
                    &boot_url,
                    &boot_config.recursive_dns(),
                )?))
            }
            DhcpV6MessageType::Release => {
                let client_id = get_client_id(request)?;
                // Release is always acknowledged.
                if let Err(e) = address_pool
                    .release_addresses(client_id, &request.options.ia_na_ids())
                {
                    log::warn!(
                        "Failed to release addresses of client \
                         {client_id:?}: {e}"
                    );
                }
                Ok(DhcpV6Response::Reply(
                    self.gen_release_reply(xid, client_id),
                ))
            }
            msg_type => {
                log::debug!("Ignoring DHCPv6 {msg_type} message");
                Ok(DhcpV6Response::Ignored)
            }
        }
    }
}

fn get_client_id(request: &DhcpV6Message) -> Result<&[u8], DhcpError> {
    request.options.client_id().ok_or_else(|| {
        DhcpError::new(
            ErrorKind::InvalidDhcpMessage,
            format!(
                "DHCPv6 {} message has no OPTION_CLIENTID",
                request.msg_type
            ),
        )
    })
}
