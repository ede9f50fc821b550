// SPDX-License-Identifier: Apache-2.0

use std::{collections::HashSet, net::Ipv6Addr};

use crate::DhcpError;

/// Address granted by the address pool to one identity association.
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6IdentityAssociation {
    pub iaid: Vec<u8>,
    pub address: Ipv6Addr,
}

impl DhcpV6IdentityAssociation {
    pub fn new(iaid: &[u8], address: Ipv6Addr) -> Self {
        Self {
            iaid: iaid.to_vec(),
            address,
        }
    }
}

/// Outcome of `DhcpV6AddressPool::reserve_addresses()`.
///
/// `associations` may be non-empty even when `error` is set, meaning only
/// part of the requested identity associations got an address.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[non_exhaustive]
pub struct DhcpV6Reservation {
    pub associations: Vec<DhcpV6IdentityAssociation>,
    pub error: Option<DhcpError>,
}

impl DhcpV6Reservation {
    pub fn new(
        associations: Vec<DhcpV6IdentityAssociation>,
        error: Option<DhcpError>,
    ) -> Self {
        Self {
            associations,
            error,
        }
    }

    pub fn granted(associations: Vec<DhcpV6IdentityAssociation>) -> Self {
        Self::new(associations, None)
    }

    pub fn failed(error: DhcpError) -> Self {
        Self::new(Vec::new(), Some(error))
    }
}

/// Requested IAIDs which got no address, in request order.
pub fn ias_without_addresses(
    granted: &[DhcpV6IdentityAssociation],
    requested: &[Vec<u8>],
) -> Vec<Vec<u8>> {
    let with_addr: HashSet<&[u8]> =
        granted.iter().map(|a| a.iaid.as_slice()).collect();
    let mut reported: HashSet<&[u8]> = HashSet::new();
    let mut ret = Vec::new();

    for iaid in requested {
        if !with_addr.contains(iaid.as_slice())
            && reported.insert(iaid.as_slice())
        {
            ret.push(iaid.clone());
        }
    }
    ret
}
