// SPDX-License-Identifier: Apache-2.0

// https://www.iana.org/assignments/dhcpv6-parameters/ "Processor
// Architecture Types", referenced by RFC 5970 OPTION_CLIENT_ARCH_TYPE.
const ARCH_X86_BIOS: u16 = 0x00;
const ARCH_X86_UEFI: u16 = 0x06;
const ARCH_X64_UEFI: u16 = 0x07;
const ARCH_EBC: u16 = 0x09;
const ARCH_ARM32_UEFI: u16 = 0x0a;
const ARCH_ARM64_UEFI: u16 = 0x0b;
const ARCH_X86_UEFI_HTTP: u16 = 0x0f;
const ARCH_X64_UEFI_HTTP: u16 = 0x10;
const ARCH_ARM64_UEFI_HTTP: u16 = 0x13;

/// Client system architecture type (RFC 5970)
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash, Default)]
pub enum DhcpV6ClientArchType {
    #[default]
    X86Bios,
    X86Uefi,
    X64Uefi,
    Ebc,
    Arm32Uefi,
    Arm64Uefi,
    X86UefiHttp,
    /// x64 UEFI HTTP boot client, answered with the `HTTPClient` vendor
    /// class.
    X64UefiHttp,
    Arm64UefiHttp,
    Other(u16),
}

impl From<DhcpV6ClientArchType> for u16 {
    fn from(v: DhcpV6ClientArchType) -> u16 {
        match v {
            DhcpV6ClientArchType::X86Bios => ARCH_X86_BIOS,
            DhcpV6ClientArchType::X86Uefi => ARCH_X86_UEFI,
            DhcpV6ClientArchType::X64Uefi => ARCH_X64_UEFI,
            DhcpV6ClientArchType::Ebc => ARCH_EBC,
            DhcpV6ClientArchType::Arm32Uefi => ARCH_ARM32_UEFI,
            DhcpV6ClientArchType::Arm64Uefi => ARCH_ARM64_UEFI,
            DhcpV6ClientArchType::X86UefiHttp => ARCH_X86_UEFI_HTTP,
            DhcpV6ClientArchType::X64UefiHttp => ARCH_X64_UEFI_HTTP,
            DhcpV6ClientArchType::Arm64UefiHttp => ARCH_ARM64_UEFI_HTTP,
            DhcpV6ClientArchType::Other(d) => d,
        }
    }
}

impl From<u16> for DhcpV6ClientArchType {
    fn from(d: u16) -> Self {
        match d {
            ARCH_X86_BIOS => Self::X86Bios,
            ARCH_X86_UEFI => Self::X86Uefi,
            ARCH_X64_UEFI => Self::X64Uefi,
            ARCH_EBC => Self::Ebc,
            ARCH_ARM32_UEFI => Self::Arm32Uefi,
            ARCH_ARM64_UEFI => Self::Arm64Uefi,
            ARCH_X86_UEFI_HTTP => Self::X86UefiHttp,
            ARCH_X64_UEFI_HTTP => Self::X64UefiHttp,
            ARCH_ARM64_UEFI_HTTP => Self::Arm64UefiHttp,
            _ => Self::Other(d),
        }
    }
}

impl std::fmt::Display for DhcpV6ClientArchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X86Bios => write!(f, "x86_bios"),
            Self::X86Uefi => write!(f, "x86_uefi"),
            Self::X64Uefi => write!(f, "x64_uefi"),
            Self::Ebc => write!(f, "ebc"),
            Self::Arm32Uefi => write!(f, "arm32_uefi"),
            Self::Arm64Uefi => write!(f, "arm64_uefi"),
            Self::X86UefiHttp => write!(f, "x86_uefi_http"),
            Self::X64UefiHttp => write!(f, "x64_uefi_http"),
            Self::Arm64UefiHttp => write!(f, "arm64_uefi_http"),
            Self::Other(d) => write!(f, "other({d})"),
        }
    }
}
