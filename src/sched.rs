//! # Priority task scheduling
//!
//! A fixed set of long-lived tasks dispatched strictly by priority on
//! a single processor. Each task is an endless loop unrolled into a
//! `run` pass that returns how long the task yields before its next
//! pass; that returned delay is the task's only scheduling point, so
//! context switches happen exactly where the original blocking delays
//! sat. Whenever several tasks are due at once the highest priority
//! wins, which is what bounds button latency: the button monitor
//! outranks the LED and siren tasks and therefore runs the moment it
//! is due, regardless of what the other two are up to.
//!
//! Tasks are created once at startup and never destroyed. Suspension
//! removes a task from dispatch without touching its state; resuming
//! makes it eligible again exactly where it stopped.
use crate::error::Error;
use crate::hal::time::{Delay, Milliseconds, Now};
use static_assertions::const_assert;

/// Capacity of the task table: the three firmware tasks plus one spare.
pub const MAX_TASKS: usize = 4;
const_assert!(MAX_TASKS >= 3);

/// Time the idle context sleeps when every task is suspended.
const IDLE_SLICE: Milliseconds = Milliseconds(10);

/// Scheduling state of a task. At most one task is `Running` at any
/// instant; a `Suspended` task performs no side effects and makes no
/// progress until resumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum TaskState {
    Running,
    Ready,
    Suspended,
}

/// Fixed task priority; higher values preempt lower ones at every
/// dispatch point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(pub u8);

/// Non-owning reference to a scheduled task. The scheduler keeps the
/// task itself; handles only carry identity, so a controller task can
/// suspend and resume its targets without owning them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskHandle(usize);

/// One pass of a task's endless loop.
pub trait Task {
    /// Runs the task until its next delay, returning how long it
    /// yields the processor. The table is shared in so the pass can
    /// issue suspend/resume against other tasks' handles.
    fn run(&mut self, table: &mut TaskTable) -> Milliseconds;
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    name: &'static str,
    priority: Priority,
    state: TaskState,
    /// Deadline on the wrapping millisecond timeline since scheduler
    /// start.
    wake_at: Milliseconds,
}

/// The scheduler's task state table, the one structure shared between
/// the dispatch loop and whichever task is currently running.
pub struct TaskTable {
    slots: [Option<Slot>; MAX_TASKS],
}

impl TaskTable {
    pub(crate) fn new() -> Self { Self { slots: [None; MAX_TASKS] } }

    pub(crate) fn register(
        &mut self,
        name: &'static str,
        priority: Priority,
    ) -> Result<TaskHandle, Error> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.is_none())
            .ok_or(Error::ConfigurationError("task table is full"))?;
        self.slots[index] = Some(Slot {
            name,
            priority,
            state: TaskState::Ready,
            wake_at: Milliseconds(0),
        });
        Ok(TaskHandle(index))
    }

    /// Removes a task from dispatch. Suspending an already suspended
    /// task is a no-op; an unregistered handle is a programming error,
    /// asserted in development builds and ignored otherwise.
    pub fn suspend(&mut self, handle: TaskHandle) {
        match self.slot_mut(handle) {
            Some(slot) if slot.state != TaskState::Suspended => {
                slot.state = TaskState::Suspended;
                fw_info!("task {=str} suspended", slot.name);
            }
            Some(_) => {}
            None => debug_assert!(false, "suspend on an unregistered task handle"),
        }
    }

    /// Returns a suspended task to dispatch, continuing from wherever
    /// it was frozen. Resuming a task that is not suspended is a no-op.
    pub fn resume(&mut self, handle: TaskHandle) {
        match self.slot_mut(handle) {
            Some(slot) if slot.state == TaskState::Suspended => {
                slot.state = TaskState::Ready;
                fw_info!("task {=str} resumed", slot.name);
            }
            Some(_) => {}
            None => debug_assert!(false, "resume on an unregistered task handle"),
        }
    }

    pub fn state(&self, handle: TaskHandle) -> Option<TaskState> {
        self.slots[handle.0].as_ref().map(|slot| slot.state)
    }

    pub fn name(&self, handle: TaskHandle) -> Option<&'static str> {
        self.slots[handle.0].as_ref().map(|slot| slot.name)
    }

    fn slot_mut(&mut self, handle: TaskHandle) -> Option<&mut Slot> {
        self.slots.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Highest-priority task that is due at `now`, ties broken by
    /// registration order.
    fn next_due(&self, now: Milliseconds) -> Option<TaskHandle> {
        let mut best: Option<(usize, Priority)> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(slot) = slot else { continue };
            if slot.state != TaskState::Ready || !now.has_reached(slot.wake_at) {
                continue;
            }
            if best.map_or(true, |(_, priority)| slot.priority > priority) {
                best = Some((index, slot.priority));
            }
        }
        best.map(|(index, _)| TaskHandle(index))
    }

    /// Time from `now` until the earliest deadline among tasks still
    /// eligible for dispatch.
    fn next_wake(&self, now: Milliseconds) -> Option<Milliseconds> {
        self.slots
            .iter()
            .flatten()
            .filter(|slot| slot.state == TaskState::Ready)
            .map(|slot| slot.wake_at.since(now))
            .min()
    }

    fn mark_running(&mut self, handle: TaskHandle) {
        if let Some(slot) = self.slot_mut(handle) {
            slot.state = TaskState::Running;
        }
    }

    fn finish_pass(&mut self, handle: TaskHandle, wake_at: Milliseconds) {
        if let Some(slot) = self.slot_mut(handle) {
            slot.wake_at = wake_at;
            if slot.state == TaskState::Running {
                slot.state = TaskState::Ready;
            }
        }
    }
}

/// Priority dispatcher over a fixed set of borrowed tasks.
pub struct Scheduler<'tasks, C: Now> {
    clock: C,
    started: C::I,
    table: TaskTable,
    tasks: [Option<&'tasks mut dyn Task>; MAX_TASKS],
}

impl<'tasks, C: Now> Scheduler<'tasks, C> {
    pub fn new(clock: C) -> Self {
        let started = clock.now();
        Self { clock, started, table: TaskTable::new(), tasks: [None, None, None, None] }
    }

    /// Registers a task under a fixed priority, returning its handle.
    /// Fails once the table is full; tasks are never removed.
    pub fn add(
        &mut self,
        name: &'static str,
        priority: Priority,
        task: &'tasks mut dyn Task,
    ) -> Result<TaskHandle, Error> {
        let handle = self.table.register(name, priority)?;
        self.tasks[handle.index()] = Some(task);
        fw_info!("task {=str} registered", name);
        Ok(handle)
    }

    pub fn table(&self) -> &TaskTable { &self.table }

    pub fn table_mut(&mut self) -> &mut TaskTable { &mut self.table }

    fn elapsed(&self) -> Milliseconds { self.clock.now() - self.started }

    /// Runs one pass of the highest-priority task that is due,
    /// returning its handle, or `None` when every task is suspended or
    /// still waiting out its delay.
    pub fn dispatch(&mut self) -> Option<TaskHandle> {
        let now = self.elapsed();
        let handle = self.table.next_due(now)?;
        self.table.mark_running(handle);
        let Self { table, tasks, .. } = self;
        let requested = match tasks[handle.index()].as_mut() {
            Some(task) => task.run(table),
            // register() fills both arrays in step, so a slot without
            // a task body is unreachable.
            None => {
                debug_assert!(false, "task table slot without a task body");
                IDLE_SLICE
            }
        };
        let after = self.elapsed();
        self.table.finish_pass(handle, after + requested);
        Some(handle)
    }

    /// Dispatches forever. When nothing is due the idle context sleeps
    /// until the earliest deadline, or for a fixed slice when every
    /// task is suspended. Never returns; the tasks are the entire
    /// lifetime of the program.
    pub fn run<D: Delay>(mut self, mut idle: D) -> ! {
        loop {
            if self.dispatch().is_some() {
                continue;
            }
            let now = self.elapsed();
            match self.table.next_wake(now) {
                Some(Milliseconds(0)) => {}
                Some(remaining) => idle.delay_ms(remaining),
                None => idle.delay_ms(IDLE_SLICE),
            }
        }
    }
}

impl TaskHandle {
    fn index(self) -> usize { self.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::doubles::time::SimClock;

    struct TickTask {
        runs: usize,
        delay: Milliseconds,
    }

    impl TickTask {
        fn new(delay: Milliseconds) -> Self { Self { runs: 0, delay } }
    }

    impl Task for TickTask {
        fn run(&mut self, _table: &mut TaskTable) -> Milliseconds {
            self.runs += 1;
            self.delay
        }
    }

    #[test]
    fn dispatch_order_follows_priority() {
        let clock = SimClock::new();
        let mut low = TickTask::new(Milliseconds(10));
        let mut mid = TickTask::new(Milliseconds(10));
        let mut high = TickTask::new(Milliseconds(10));

        let mut scheduler = Scheduler::new(clock.clone());
        let low_handle = scheduler.add("low", Priority(1), &mut low).unwrap();
        let mid_handle = scheduler.add("mid", Priority(2), &mut mid).unwrap();
        let high_handle = scheduler.add("high", Priority(3), &mut high).unwrap();

        // All three are due at startup; they must run highest first.
        assert_eq!(scheduler.dispatch(), Some(high_handle));
        assert_eq!(scheduler.dispatch(), Some(mid_handle));
        assert_eq!(scheduler.dispatch(), Some(low_handle));
        assert_eq!(scheduler.dispatch(), None);

        clock.advance(Milliseconds(10));
        assert_eq!(scheduler.dispatch(), Some(high_handle));
    }

    #[test]
    fn nothing_runs_before_its_delay_expires() {
        let clock = SimClock::new();
        let mut task = TickTask::new(Milliseconds(300));
        {
            let mut scheduler = Scheduler::new(clock.clone());
            scheduler.add("slow", Priority(1), &mut task).unwrap();
            assert!(scheduler.dispatch().is_some());
            clock.advance(Milliseconds(299));
            assert_eq!(scheduler.dispatch(), None);
            clock.advance(Milliseconds(1));
            assert!(scheduler.dispatch().is_some());
        }
        assert_eq!(task.runs, 2);
    }

    #[test]
    fn dispatch_survives_the_clock_counter_wrapping_around() {
        let clock = SimClock::new();
        // Park the clock just short of the u32 millisecond boundary,
        // so the task's first deadline lands on the far side of it.
        clock.advance(Milliseconds(u32::MAX - 100));
        let mut task = TickTask::new(Milliseconds(300));
        {
            let mut scheduler = Scheduler::new(clock.clone());
            scheduler.add("patient", Priority(1), &mut task).unwrap();
            assert!(scheduler.dispatch().is_some());

            clock.advance(Milliseconds(150));
            assert_eq!(scheduler.dispatch(), None);
            clock.advance(Milliseconds(150));
            assert!(scheduler.dispatch().is_some());
        }
        assert_eq!(task.runs, 2);
    }

    #[test]
    fn suspended_tasks_make_no_progress_until_resumed() {
        let clock = SimClock::new();
        let mut task = TickTask::new(Milliseconds(10));
        {
            let mut scheduler = Scheduler::new(clock.clone());
            let handle = scheduler.add("worker", Priority(1), &mut task).unwrap();
            assert!(scheduler.dispatch().is_some());

            scheduler.table_mut().suspend(handle);
            assert_eq!(scheduler.table().state(handle), Some(TaskState::Suspended));
            for _ in 0..5 {
                clock.advance(Milliseconds(10));
                assert_eq!(scheduler.dispatch(), None);
            }

            scheduler.table_mut().resume(handle);
            assert_eq!(scheduler.table().state(handle), Some(TaskState::Ready));
            assert_eq!(scheduler.dispatch(), Some(handle));
        }
        assert_eq!(task.runs, 2);
    }

    #[test]
    fn suspend_and_resume_are_idempotent() {
        let clock = SimClock::new();
        let mut task = TickTask::new(Milliseconds(10));
        let mut scheduler = Scheduler::new(clock);
        let handle = scheduler.add("worker", Priority(1), &mut task).unwrap();

        scheduler.table_mut().resume(handle); // already running: no-op
        assert_eq!(scheduler.table().state(handle), Some(TaskState::Ready));
        scheduler.table_mut().suspend(handle);
        scheduler.table_mut().suspend(handle);
        assert_eq!(scheduler.table().state(handle), Some(TaskState::Suspended));
        scheduler.table_mut().resume(handle);
        assert_eq!(scheduler.table().state(handle), Some(TaskState::Ready));
    }

    #[test]
    fn the_table_rejects_registration_past_capacity() {
        let clock = SimClock::new();
        let mut tasks: Vec<TickTask> =
            (0..=MAX_TASKS).map(|_| TickTask::new(Milliseconds(10))).collect();
        let mut scheduler = Scheduler::new(clock);
        let mut handles = Vec::new();
        for (index, task) in tasks.iter_mut().enumerate() {
            let result = scheduler.add("filler", Priority(index as u8), task);
            if index < MAX_TASKS {
                handles.push(result.unwrap());
            } else {
                assert_eq!(result, Err(Error::ConfigurationError("task table is full")));
            }
        }
        assert_eq!(handles.len(), MAX_TASKS);
        assert_eq!(scheduler.table().name(handles[0]), Some("filler"));
    }
}
