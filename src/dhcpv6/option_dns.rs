// SPDX-License-Identifier: Apache-2.0

use std::net::Ipv6Addr;

use crate::{
    buffer::{Buffer, BufferMut},
    DhcpError, DhcpV6OptionCode, DhcpV6RawOption, ErrorContext,
};

/// RFC 3646 OPTION_DNS_SERVERS
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct DhcpV6OptionDnsServers {
    pub servers: Vec<Ipv6Addr>,
}

impl DhcpV6OptionDnsServers {
    pub fn new(servers: &[Ipv6Addr]) -> Self {
        Self {
            servers: servers.to_vec(),
        }
    }

    pub fn parse_data(data: &[u8]) -> Result<Self, DhcpError> {
        let mut buf = Buffer::new(data);
        let mut servers = Vec::new();
        while !buf.is_empty() {
            servers.push(
                buf.get_ipv6()
                    .context("Invalid DHCPv6 option OPTION_DNS_SERVERS")?,
            );
        }
        Ok(Self { servers })
    }

    pub fn to_raw_option(&self) -> DhcpV6RawOption {
        let mut buf = BufferMut::with_capacity(self.servers.len() * 16);
        for srv in self.servers.iter() {
            buf.write_ipv6(*srv);
        }
        DhcpV6RawOption::new(DhcpV6OptionCode::DnsServers, buf.data)
    }
}
