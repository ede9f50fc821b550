// SPDX-License-Identifier: Apache-2.0

/// Renew(T1) and rebind(T2) timers shared by every IA_NA a builder emits.
///
/// T1 is 0.5 and T2 is 0.8 times the preferred lifetime as recommended by
/// RFC 8415 section 21.4. T2 is derived from the preferred lifetime directly
/// instead of from T1.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct DhcpV6LeaseTimer {
    pub t1_sec: u32,
    pub t2_sec: u32,
}

impl DhcpV6LeaseTimer {
    pub fn new(preferred_time_sec: u32) -> Self {
        let preferred = u64::from(preferred_time_sec);
        Self {
            t1_sec: preferred_time_sec / 2,
            // Never larger than `preferred_time_sec`, hence fits in u32.
            t2_sec: (preferred * 4 / 5) as u32,
        }
    }
}
