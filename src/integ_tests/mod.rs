// SPDX-License-Identifier: Apache-2.0

#[cfg(test)]
mod dhcpv6_async;

mod env;
