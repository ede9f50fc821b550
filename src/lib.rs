// SPDX-License-Identifier: Apache-2.0

mod buffer;
mod dhcpv6;
mod error;
mod traits;

#[cfg(test)]
mod integ_tests;

pub use crate::dhcpv6::{
    boot_lookup_id, ias_without_addresses, DhcpV6ClientArchType, DhcpV6Duid,
    DhcpV6DuidEnterpriseNumber, DhcpV6DuidLinkLayerAddr,
    DhcpV6DuidLinkLayerAddrPlusTime, DhcpV6IaNaPayload,
    DhcpV6IdentityAssociation, DhcpV6LeaseTimer, DhcpV6Message,
    DhcpV6MessageType, DhcpV6OptionCode, DhcpV6OptionDnsServers,
    DhcpV6OptionIaAddr, DhcpV6OptionIaNa, DhcpV6OptionStatus,
    DhcpV6OptionStatusCode, DhcpV6OptionVendorClass, DhcpV6Options,
    DhcpV6PacketBuilder, DhcpV6RawOption, DhcpV6Reservation, DhcpV6Response,
    DhcpV6Server, DhcpV6ServerConfig,
};
pub use crate::error::{DhcpError, ErrorKind};
pub(crate) use crate::error::ErrorContext;
pub use crate::traits::{DhcpV6AddressPool, DhcpV6BootConfig};
