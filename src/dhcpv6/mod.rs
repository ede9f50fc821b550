// SPDX-License-Identifier: Apache-2.0

mod arch;
mod builder;
mod config;
mod duid;
mod lease;
mod msg;
mod option;
mod option_dns;
mod option_ia;
mod option_status;
mod option_vendor;
mod reply;
mod server;
mod time;

pub use self::{
    arch::DhcpV6ClientArchType,
    builder::{DhcpV6PacketBuilder, DhcpV6Response},
    config::DhcpV6ServerConfig,
    duid::{
        boot_lookup_id, DhcpV6Duid, DhcpV6DuidEnterpriseNumber,
        DhcpV6DuidLinkLayerAddr, DhcpV6DuidLinkLayerAddrPlusTime,
    },
    lease::{
        ias_without_addresses, DhcpV6IdentityAssociation, DhcpV6Reservation,
    },
    msg::{DhcpV6Message, DhcpV6MessageType},
    option::{DhcpV6OptionCode, DhcpV6Options, DhcpV6RawOption},
    option_dns::DhcpV6OptionDnsServers,
    option_ia::{DhcpV6IaNaPayload, DhcpV6OptionIaAddr, DhcpV6OptionIaNa},
    option_status::{DhcpV6OptionStatus, DhcpV6OptionStatusCode},
    option_vendor::DhcpV6OptionVendorClass,
    server::DhcpV6Server,
    time::DhcpV6LeaseTimer,
};
