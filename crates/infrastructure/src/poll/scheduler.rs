use fnet_application::ports::{PollDesc, PollRegistry, PollService};
use fnet_domain::DomainError;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

/// Cooperative scheduler with a fixed number of service slots.
///
/// Each pass polls every registered service once, in slot order. Services
/// may register or unregister (themselves included) while being polled;
/// a service registered during a pass is first polled on a later pass if
/// it lands in a slot already visited.
pub struct PollScheduler {
    slots: RefCell<Vec<Option<Rc<dyn PollService>>>>,
}

impl PollScheduler {
    pub fn new(max_services: usize) -> Self {
        Self {
            slots: RefCell::new(vec![None; max_services]),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.slots.borrow().iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn run_pass(&self) {
        for index in 0..self.capacity() {
            // Release the slot table before polling so the service can
            // change registrations.
            let service = self.slots.borrow()[index].clone();
            if let Some(service) = service {
                service.poll();
            }
        }
    }
}

impl PollRegistry for PollScheduler {
    fn register(&self, service: Rc<dyn PollService>) -> Result<PollDesc, DomainError> {
        let mut slots = self.slots.borrow_mut();
        match slots.iter().position(|slot| slot.is_none()) {
            Some(index) => {
                slots[index] = Some(service);
                debug!(slot = index, "Poll service registered");
                Ok(PollDesc(index))
            }
            None => {
                warn!(capacity = slots.len(), "Poll scheduler is full");
                Err(DomainError::ServiceRegistrationFailed(format!(
                    "all {} poll slots are in use",
                    slots.len()
                )))
            }
        }
    }

    fn unregister(&self, desc: PollDesc) {
        if let Some(slot) = self.slots.borrow_mut().get_mut(desc.0) {
            if slot.take().is_some() {
                debug!(slot = desc.0, "Poll service unregistered");
            }
        }
    }
}
