// SPDX-License-Identifier: Apache-2.0

use std::{
    net::{Ipv6Addr, SocketAddr, SocketAddrV6},
    sync::Arc,
    time::Duration,
};

use tokio::net::UdpSocket;

use super::env::{
    gen_request, gen_request_of, init_log, test_config, TestAddressPool,
    TestBootConfig, ADDR_A, IAID_A, OTHER_CLIENT_MAC, TEST_XID,
};
use crate::{
    DhcpV6ClientArchType, DhcpV6Message, DhcpV6MessageType, DhcpV6OptionCode,
    DhcpV6Server,
};

const LOOPBACK_ANY_PORT: SocketAddr =
    SocketAddr::V6(SocketAddrV6::new(Ipv6Addr::LOCALHOST, 0, 0, 0));

// Reply carrying this boot URL is larger than any UDP datagram
const UNSENDABLE_BOOT_URL_LEN: usize = 65500;

async fn start_server(
    boot_config: TestBootConfig,
) -> Option<Arc<DhcpV6Server<TestBootConfig, TestAddressPool>>> {
    let mut config = test_config();
    config.set_listen_addr(LOOPBACK_ANY_PORT);
    match DhcpV6Server::new(
        &config,
        Arc::new(boot_config),
        Arc::new(TestAddressPool::new(&[(&IAID_A[..], ADDR_A)])),
    )
    .await
    {
        Ok(srv) => Some(Arc::new(srv)),
        Err(e) => {
            log::warn!("Skipping test, IPv6 loopback unavailable: {e}");
            None
        }
    }
}

async fn recv_reply(cli: &UdpSocket) -> DhcpV6Message {
    let mut buffer = vec![0u8; 65535];
    let received =
        tokio::time::timeout(Duration::from_secs(5), cli.recv(&mut buffer))
            .await
            .expect("Timeout on waiting DHCPv6 reply")
            .unwrap();
    DhcpV6Message::parse(&buffer[..received]).unwrap()
}

#[tokio::test]
async fn test_server_reply_over_udp() {
    init_log();
    let Some(srv) = start_server(TestBootConfig::default()).await else {
        return;
    };
    let srv_addr = srv.local_addr().unwrap();
    let srv_clone = srv.clone();
    tokio::spawn(async move { srv_clone.run().await });

    let cli = UdpSocket::bind(LOOPBACK_ANY_PORT).await.unwrap();
    let request = gen_request(
        DhcpV6MessageType::Solicit,
        &[&IAID_A],
        DhcpV6ClientArchType::X64UefiHttp,
    );
    cli.send_to(&request.emit().unwrap(), srv_addr).await.unwrap();

    let reply = recv_reply(&cli).await;
    assert_eq!(reply.msg_type, DhcpV6MessageType::Advertise);
    assert_eq!(reply.xid, TEST_XID);
    assert_eq!(reply.options.get_all(DhcpV6OptionCode::IANA).len(), 1);
}

#[tokio::test]
async fn test_server_keeps_serving_after_failed_send() {
    init_log();
    let boot_config = TestBootConfig {
        boot_urls: vec![(
            OTHER_CLIENT_MAC.to_vec(),
            "x".repeat(UNSENDABLE_BOOT_URL_LEN),
        )],
        ..Default::default()
    };
    let Some(srv) = start_server(boot_config).await else {
        return;
    };
    let srv_addr = srv.local_addr().unwrap();
    let srv_clone = srv.clone();
    let handle = tokio::spawn(async move { srv_clone.run().await });

    let cli = UdpSocket::bind(LOOPBACK_ANY_PORT).await.unwrap();
    // Encodes fine but cannot be sent as one UDP datagram
    let unsendable = gen_request_of(
        DhcpV6MessageType::InformationRequest,
        &OTHER_CLIENT_MAC,
        [0x01, 0x02, 0x03],
        &[],
        DhcpV6ClientArchType::X86Bios,
    );
    let reply = srv.handle_packet(&unsendable.emit().unwrap()).unwrap();
    assert!(reply.len() > UNSENDABLE_BOOT_URL_LEN);
    cli.send_to(&unsendable.emit().unwrap(), srv_addr).await.unwrap();

    let request = gen_request(
        DhcpV6MessageType::Solicit,
        &[&IAID_A],
        DhcpV6ClientArchType::X64UefiHttp,
    );
    cli.send_to(&request.emit().unwrap(), srv_addr).await.unwrap();

    let reply = recv_reply(&cli).await;
    assert_eq!(reply.msg_type, DhcpV6MessageType::Advertise);
    assert_eq!(reply.xid, TEST_XID);
    handle.abort();
}

#[tokio::test]
async fn test_server_process_one() {
    init_log();
    let Some(srv) = start_server(TestBootConfig::default()).await else {
        return;
    };
    let srv_addr = srv.local_addr().unwrap();
    let cli = UdpSocket::bind(LOOPBACK_ANY_PORT).await.unwrap();
    let request = gen_request(
        DhcpV6MessageType::InformationRequest,
        &[],
        DhcpV6ClientArchType::X64UefiHttp,
    );
    cli.send_to(&request.emit().unwrap(), srv_addr).await.unwrap();

    srv.process_one().await.unwrap();

    let reply = recv_reply(&cli).await;
    assert_eq!(reply.msg_type, DhcpV6MessageType::Reply);
    assert_eq!(reply.xid, TEST_XID);
}

#[tokio::test]
async fn test_server_drops_invalid_packet() {
    init_log();
    let Some(srv) = start_server(TestBootConfig::default()).await else {
        return;
    };
    assert_eq!(srv.handle_packet(&[0x01, 0x02]), None);
    // Advertise is never answered
    let advertise = gen_request(
        DhcpV6MessageType::Advertise,
        &[&IAID_A],
        DhcpV6ClientArchType::X86Bios,
    );
    assert_eq!(srv.handle_packet(&advertise.emit().unwrap()), None);
    let solicit = gen_request(
        DhcpV6MessageType::Solicit,
        &[&IAID_A],
        DhcpV6ClientArchType::X86Bios,
    );
    assert!(srv.handle_packet(&solicit.emit().unwrap()).is_some());
}

#[tokio::test]
async fn test_server_drops_oversized_reply() {
    init_log();
    let boot_config = TestBootConfig {
        boot_urls: vec![(OTHER_CLIENT_MAC.to_vec(), "x".repeat(70000))],
        ..Default::default()
    };
    let Some(srv) = start_server(boot_config).await else {
        return;
    };
    let request = gen_request_of(
        DhcpV6MessageType::InformationRequest,
        &OTHER_CLIENT_MAC,
        TEST_XID,
        &[],
        DhcpV6ClientArchType::X86Bios,
    );
    assert_eq!(srv.handle_packet(&request.emit().unwrap()), None);

    // 5000 DNS servers need 80000 bytes in OPTION_DNS_SERVERS
    let boot_config = TestBootConfig {
        dns_servers: (0..5000u128)
            .map(|i| Ipv6Addr::from((0x2001_0db8u128 << 96) + i))
            .collect(),
        ..Default::default()
    };
    let Some(srv) = start_server(boot_config).await else {
        return;
    };
    let request = gen_request(
        DhcpV6MessageType::InformationRequest,
        &[],
        DhcpV6ClientArchType::X86Bios,
    );
    assert_eq!(srv.handle_packet(&request.emit().unwrap()), None);
}

#[tokio::test]
async fn test_server_receives_large_datagram() {
    init_log();
    let Some(srv) = start_server(TestBootConfig::default()).await else {
        return;
    };
    let srv_addr = srv.local_addr().unwrap();
    let srv_clone = srv.clone();
    let handle = tokio::spawn(async move { srv_clone.run().await });

    let cli = UdpSocket::bind(LOOPBACK_ANY_PORT).await.unwrap();
    let mut request = gen_request(
        DhcpV6MessageType::InformationRequest,
        &[],
        DhcpV6ClientArchType::X86Bios,
    );
    // Trailing unknown option makes the datagram larger than the link MTU
    // of Ethernet
    request
        .options
        .add_raw(DhcpV6OptionCode::Other(65000), vec![0xff; 8000]);
    cli.send_to(&request.emit().unwrap(), srv_addr).await.unwrap();

    let reply = recv_reply(&cli).await;
    assert_eq!(reply.msg_type, DhcpV6MessageType::Reply);
    assert_eq!(reply.xid, TEST_XID);
    handle.abort();
}
