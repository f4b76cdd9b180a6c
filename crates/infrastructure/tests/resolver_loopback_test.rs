mod helpers;

use fnet_application::ports::NetStack;
use fnet_application::use_cases::dns::{DnsParams, DnsResolver, ResolverState};
use fnet_domain::config::DnsConfig;
use fnet_domain::AddressFamily;
use fnet_infrastructure::{MonotonicClock, PollScheduler, UdpSocketProvider};
use helpers::dns_server_mock::{Behaviour, MockDnsServer};
use std::cell::RefCell;
use std::net::{IpAddr, Ipv4Addr};
use std::rc::Rc;
use std::time::{Duration, Instant};

type Outcome = Rc<RefCell<Option<Vec<IpAddr>>>>;

fn stack(scheduler: &Rc<PollScheduler>) -> NetStack {
    NetStack::new(
        Rc::new(UdpSocketProvider::new()),
        scheduler.clone(),
        Rc::new(MonotonicClock::new(1)),
    )
}

fn resolve(
    scheduler: &Rc<PollScheduler>,
    resolver: &DnsResolver,
    server: std::net::SocketAddr,
    deadline: Duration,
) -> Option<Vec<IpAddr>> {
    let outcome = Outcome::default();
    let sink = outcome.clone();
    resolver
        .init(DnsParams {
            addr_family: AddressFamily::Inet,
            server,
            host_name: "loopback.test".to_string(),
            handler: Box::new(move |_, addrs| *sink.borrow_mut() = Some(addrs.to_vec())),
        })
        .unwrap();

    let started = Instant::now();
    while outcome.borrow().is_none() && started.elapsed() < deadline {
        scheduler.run_pass();
        std::thread::sleep(Duration::from_millis(1));
    }
    let result = outcome.borrow_mut().take();
    result
}

#[test]
fn test_resolves_against_loopback_server() {
    let server = MockDnsServer::start(Behaviour::Answer(Ipv4Addr::new(127, 0, 0, 42)), 1).unwrap();
    let scheduler = Rc::new(PollScheduler::new(4));
    let resolver = DnsResolver::new(stack(&scheduler), DnsConfig::default());

    let addrs = resolve(&scheduler, &resolver, server.addr(), Duration::from_secs(5));

    assert_eq!(addrs, Some(vec![IpAddr::V4(Ipv4Addr::new(127, 0, 0, 42))]));
    assert_eq!(resolver.state(), ResolverState::Disabled);
    assert!(scheduler.is_empty());
    assert_eq!(server.join(), 1);
}

#[test]
fn test_spoofed_reply_is_skipped() {
    let server =
        MockDnsServer::start(Behaviour::SpoofFirst(Ipv4Addr::new(127, 0, 0, 7)), 1).unwrap();
    let scheduler = Rc::new(PollScheduler::new(4));
    let resolver = DnsResolver::new(stack(&scheduler), DnsConfig::default());

    let addrs = resolve(&scheduler, &resolver, server.addr(), Duration::from_secs(5));
    assert_eq!(addrs, Some(vec![IpAddr::V4(Ipv4Addr::new(127, 0, 0, 7))]));
    server.join();
}

#[test]
fn test_silent_server_exhausts_retransmissions() {
    let server = MockDnsServer::start(Behaviour::Silent, 3).unwrap();
    let scheduler = Rc::new(PollScheduler::new(4));
    let config = DnsConfig {
        retransmission_timeout_secs: 0,
        retransmission_max: 2,
        ..DnsConfig::default()
    };
    let resolver = DnsResolver::new(stack(&scheduler), config);

    let addrs = resolve(&scheduler, &resolver, server.addr(), Duration::from_secs(5));
    assert_eq!(addrs, Some(vec![]));
    assert_eq!(server.join(), 3);
}
