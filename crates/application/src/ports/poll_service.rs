use fnet_domain::DomainError;
use std::rc::Rc;

/// A state machine stepped by the scheduler.
///
/// `poll` must not block. It may register or unregister services,
/// itself included.
pub trait PollService {
    fn poll(&self);
}

/// Slot a service occupies in the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PollDesc(pub usize);

pub trait PollRegistry {
    fn register(&self, service: Rc<dyn PollService>) -> Result<PollDesc, DomainError>;

    /// Removes the service in `desc`. Unknown or free slots are ignored.
    fn unregister(&self, desc: PollDesc);
}
