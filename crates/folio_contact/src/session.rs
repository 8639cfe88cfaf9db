//! Shared contact form driven by an async delivery service

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crate::delivery::DeliveryService;
use crate::form::{ContactForm, SubmitBlocked, SubmitResult};

/// What a call to [`ContactSession::submit`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Delivery was attempted and settled with this result
    Settled(SubmitResult),
    /// Nothing was sent
    Blocked(SubmitBlocked),
}

type Clock = Rc<dyn Fn() -> Instant>;

/// Lowers the submitting guard if a submit future is dropped mid-delivery
struct InFlight<'a> {
    form: &'a RefCell<ContactForm>,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Ok(mut form) = self.form.try_borrow_mut() {
            form.abort_submit();
        }
    }
}

/// A form shared between event handlers plus the service that delivers it
pub struct ContactSession<S> {
    form: Rc<RefCell<ContactForm>>,
    service: Rc<S>,
    clock: Clock,
}

impl<S> Clone for ContactSession<S> {
    fn clone(&self) -> Self {
        Self {
            form: Rc::clone(&self.form),
            service: Rc::clone(&self.service),
            clock: Rc::clone(&self.clock),
        }
    }
}

impl<S: DeliveryService> ContactSession<S> {
    pub fn new(service: S) -> Self {
        Self::with_form(Rc::new(RefCell::new(ContactForm::new())), service)
    }

    /// Drive an existing shared form
    pub fn with_form(form: Rc<RefCell<ContactForm>>, service: S) -> Self {
        Self {
            form,
            service: Rc::new(service),
            clock: Rc::new(Instant::now),
        }
    }

    /// Replace the time source used to start the success banner
    pub fn with_clock(mut self, clock: impl Fn() -> Instant + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }

    pub fn form(&self) -> &Rc<RefCell<ContactForm>> {
        &self.form
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Validate, deliver and settle
    ///
    /// Re-entrant calls while a delivery is in flight return
    /// [`SubmitBlocked::InFlight`] without contacting the service. Dropping
    /// the future before delivery settles leaves the form ready to submit
    /// again.
    pub async fn submit(&self) -> SubmitOutcome {
        let fields = match self.form.borrow_mut().begin_submit() {
            Ok(fields) => fields,
            Err(blocked) => return SubmitOutcome::Blocked(blocked),
        };
        let mut guard = InFlight {
            form: &self.form,
            settled: false,
        };

        let outcome = self.service.deliver(&fields).await;

        let now = (self.clock)();
        let result = self.form.borrow_mut().finish_submit(outcome, now).clone();
        guard.settled = true;
        SubmitOutcome::Settled(result)
    }
}
