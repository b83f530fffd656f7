use crate::hal::gpio::{InputPin, OutputPin};
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
    vec::Vec,
};

/// Output pin double that records every level change. Clones share
/// state, so keep one clone to inspect after moving the other into the
/// device under test.
#[derive(Clone, Debug, Default)]
pub struct MockOutputPin {
    state: Rc<Cell<bool>>,
    changes: Rc<RefCell<Vec<bool>>>,
}

impl MockOutputPin {
    pub fn new() -> Self { Self::default() }

    pub fn is_high(&self) -> bool { self.state.get() }

    pub fn is_low(&self) -> bool { !self.state.get() }

    /// Every level written to the pin, in order.
    pub fn changes(&self) -> Vec<bool> { self.changes.borrow().clone() }
}

impl OutputPin for MockOutputPin {
    fn set_low(&mut self) {
        self.state.set(false);
        self.changes.borrow_mut().push(false);
    }

    fn set_high(&mut self) {
        self.state.set(true);
        self.changes.borrow_mut().push(true);
    }
}

/// Input pin double fed from a queue of scripted samples; once the
/// queue runs dry the pin reads high, matching a released pull-up
/// button. Each read consumes one sample.
#[derive(Clone, Debug, Default)]
pub struct MockInputPin {
    levels: Rc<RefCell<VecDeque<bool>>>,
}

impl MockInputPin {
    pub fn new() -> Self { Self::default() }

    /// Queues raw samples, `false` meaning pressed (active low).
    pub fn queue_levels(&self, levels: &[bool]) {
        self.levels.borrow_mut().extend(levels.iter().copied());
    }

    /// Queues a clean press: enough low samples to get through the
    /// settle re-read and `held_reads` release polls, then a release.
    pub fn queue_press(&self, held_reads: usize) {
        self.queue_levels(&[false, false]);
        self.levels.borrow_mut().extend(core::iter::repeat(false).take(held_reads));
        self.queue_levels(&[true]);
    }

    fn sample(&self) -> bool { self.levels.borrow_mut().pop_front().unwrap_or(true) }
}

impl InputPin for MockInputPin {
    fn is_high(&self) -> bool { self.sample() }

    fn is_low(&self) -> bool { !self.sample() }
}
