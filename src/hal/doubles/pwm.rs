use crate::hal::pwm::{Pwm, PwmParams};
use std::{cell::RefCell, rc::Rc, vec::Vec};

/// PWM slice double that records every programmed counter setting.
#[derive(Clone, Debug, Default)]
pub struct MockPwm {
    history: Rc<RefCell<Vec<PwmParams>>>,
}

impl MockPwm {
    pub fn new() -> Self { Self::default() }

    /// Every `(wrap, level)` pair programmed so far, in order.
    pub fn emitted(&self) -> Vec<PwmParams> { self.history.borrow().clone() }

    pub fn last(&self) -> Option<PwmParams> { self.history.borrow().last().copied() }

    pub fn emission_count(&self) -> usize { self.history.borrow().len() }
}

impl Pwm for MockPwm {
    fn set(&mut self, params: PwmParams) { self.history.borrow_mut().push(params); }
}
