use super::Runtime;
use crate::driver::drive_until;
use clap::Args;
use fnet_application::ports::NetworkInterface;
use fnet_application::use_cases::dns::{DnsParams, DnsResolver};
use fnet_domain::{AddressFamily, Config};
use std::net::{IpAddr, SocketAddr};
use tokio::sync::oneshot;

#[derive(Args)]
pub struct ResolveArgs {
    /// Host name to resolve
    pub host: String,

    /// Address family to ask for (4 or 6)
    #[arg(short = 'f', long, default_value = "4")]
    pub family: AddressFamily,

    /// DNS server; defaults to the interface's DNS server
    #[arg(short = 's', long)]
    pub server: Option<IpAddr>,
}

/// IPv6 DNS server of the interface first, then the IPv4 one.
pub fn default_server(netif: &dyn NetworkInterface) -> Option<IpAddr> {
    netif
        .ip6_dns(0)
        .map(IpAddr::V6)
        .or_else(|| netif.ip4_dns().map(IpAddr::V4))
}

pub async fn run(config: &Config, args: ResolveArgs) -> anyhow::Result<()> {
    let runtime = Runtime::new(config);

    let server = match args.server.or_else(|| default_server(runtime.netif.as_ref())) {
        Some(server) => server,
        None => anyhow::bail!("DNS server is unknown"),
    };

    let resolver = DnsResolver::new(runtime.stack.clone(), config.dns.clone());
    let (tx, rx) = oneshot::channel();

    resolver.init(DnsParams {
        addr_family: args.family,
        server: SocketAddr::new(server, 0),
        host_name: args.host.clone(),
        handler: Box::new(move |family, addrs| {
            let _ = tx.send((family, addrs.to_vec()));
        }),
    })?;

    println!("Resolving  : {}", args.host);
    println!("DNS Server : {}", server);
    println!("Press Ctrl-C to cancel.");

    match drive_until(&runtime.scheduler, runtime.period, rx).await {
        Some(Ok((family, addrs))) if !addrs.is_empty() => {
            for addr in addrs {
                println!("Resolved address ({}) : {}", family, addr);
            }
        }
        Some(_) => println!("Resolution is FAILED"),
        None => {
            resolver.release();
            println!("Cancelled");
        }
    }

    Ok(())
}
