use super::Runtime;
use crate::driver::drive_until;
use clap::Args;
use fnet_application::use_cases::llmnr::{LlmnrParams, LlmnrServer};
use fnet_domain::{AddressFamily, Config};
use std::future;
use tracing::info;

#[derive(Args)]
pub struct LlmnrArgs {
    /// Host name to answer for; defaults to the interface name
    #[arg(short = 'n', long)]
    pub host_name: Option<String>,

    /// Address family to listen on (4 or 6); both when omitted
    #[arg(short = 'f', long)]
    pub family: Option<AddressFamily>,

    /// Answer TTL in seconds; 0 uses the configured default
    #[arg(short = 't', long, default_value_t = 0)]
    pub ttl: u32,
}

pub async fn run(config: &Config, args: LlmnrArgs) -> anyhow::Result<()> {
    let runtime = Runtime::new(config);
    let server = LlmnrServer::new(runtime.stack.clone(), config.llmnr.clone());

    let host_name = args.host_name.unwrap_or_else(|| config.netif.name.clone());
    let desc = server.init(LlmnrParams {
        netif: runtime.netif.clone(),
        host_name: host_name.clone(),
        host_name_ttl: args.ttl,
        addr_family: args.family,
    })?;

    println!("LLMNR host name : {}", host_name);
    println!("Press Ctrl-C to stop.");

    drive_until(&runtime.scheduler, runtime.period, future::pending::<()>()).await;

    server.release(desc);
    info!(host = %host_name, "LLMNR responder stopped");
    println!("Cancelled");
    Ok(())
}
