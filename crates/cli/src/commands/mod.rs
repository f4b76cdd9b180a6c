pub mod llmnr;
pub mod resolve;

use fnet_application::ports::NetStack;
use fnet_domain::Config;
use fnet_infrastructure::{MonotonicClock, PollScheduler, StaticNetif, UdpSocketProvider};
use std::rc::Rc;
use std::time::Duration;

/// Host-backed stack shared by the commands.
pub struct Runtime {
    pub scheduler: Rc<PollScheduler>,
    pub stack: NetStack,
    pub netif: Rc<StaticNetif>,
    pub period: Duration,
}

impl Runtime {
    pub fn new(config: &Config) -> Self {
        let scheduler = Rc::new(PollScheduler::new(config.poll.max_services));
        let stack = NetStack::new(
            Rc::new(UdpSocketProvider::new()),
            scheduler.clone(),
            Rc::new(MonotonicClock::new(config.poll.period_ms)),
        );

        Self {
            scheduler,
            stack,
            netif: Rc::new(StaticNetif::new(config.netif.clone())),
            period: Duration::from_millis(config.poll.period_ms),
        }
    }
}
