// SPDX-License-Identifier: Apache-2.0

use std::net::{Ipv6Addr, SocketAddr, SocketAddrV6};

use crate::{DhcpError, DhcpV6Duid, ErrorKind};

pub(crate) const SERVER_PORT: u16 = 547;

const DEFAULT_PREFERRED_TIME_SEC: u32 = 3600;
const DEFAULT_VALID_TIME_SEC: u32 = 7200;

#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6ServerConfig {
    /// Sent as OPTION_SERVERID in every reply.
    pub server_duid: DhcpV6Duid,
    /// Preferred lifetime of every leased address. T1 and T2 are derived
    /// from it.
    pub preferred_time_sec: u32,
    pub valid_time_sec: u32,
    /// Only used by `DhcpV6Server`.
    pub listen_addr: SocketAddr,
}

impl Default for DhcpV6ServerConfig {
    fn default() -> Self {
        Self {
            server_duid: DhcpV6Duid::default(),
            preferred_time_sec: DEFAULT_PREFERRED_TIME_SEC,
            valid_time_sec: DEFAULT_VALID_TIME_SEC,
            listen_addr: SocketAddr::V6(SocketAddrV6::new(
                Ipv6Addr::UNSPECIFIED,
                SERVER_PORT,
                0,
                0,
            )),
        }
    }
}

impl DhcpV6ServerConfig {
    pub fn new(
        server_duid: DhcpV6Duid,
        preferred_time_sec: u32,
        valid_time_sec: u32,
    ) -> Self {
        Self {
            server_duid,
            preferred_time_sec,
            valid_time_sec,
            ..Default::default()
        }
    }

    pub fn set_server_duid(&mut self, duid: DhcpV6Duid) -> &mut Self {
        self.server_duid = duid;
        self
    }

    pub fn set_lifetimes(
        &mut self,
        preferred_time_sec: u32,
        valid_time_sec: u32,
    ) -> &mut Self {
        self.preferred_time_sec = preferred_time_sec;
        self.valid_time_sec = valid_time_sec;
        self
    }

    pub fn set_listen_addr(&mut self, addr: SocketAddr) -> &mut Self {
        self.listen_addr = addr;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), DhcpError> {
        if self.server_duid.is_empty() {
            return Err(DhcpError::new(
                ErrorKind::InvalidArgument,
                "Server DUID should not be empty".to_string(),
            ));
        }
        // RFC 8415 21.6: preferred lifetime must not be greater than the
        // valid lifetime.
        if self.preferred_time_sec > self.valid_time_sec {
            return Err(DhcpError::new(
                ErrorKind::InvalidArgument,
                format!(
                    "Preferred lifetime {} is greater than valid lifetime {}",
                    self.preferred_time_sec, self.valid_time_sec
                ),
            ));
        }
        Ok(())
    }
}
