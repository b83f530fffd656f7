//! Time units and clock interfaces.
use core::ops::{Add as Adds, Sub as Subtracts};

/// Abstract point in time. Useful for time periods.
///
/// Any implementer of Instant can be subtracted with
/// itself to obtain a span of milliseconds.
///
/// Any implementer of Instant can be added with
/// milliseconds to obtain another instant.
pub trait Instant
where
    Self: Copy + Clone,
    Self: Subtracts<Output = Milliseconds>,
    Self: Adds<Milliseconds, Output = Self>,
{
}

/// Access to a monotonic clock.
pub trait Now {
    type I: Instant;
    fn now(&self) -> Self::I;
}

/// A blocking delay. The only suspension point the tasks use besides
/// the pacing delay they request from the scheduler.
pub trait Delay {
    fn delay_ms(&mut self, duration: Milliseconds);
}

/// A millisecond count. Points in time live on a timeline that wraps
/// at `u32::MAX` (about 49.7 days); [`Milliseconds::since`] and
/// [`Milliseconds::has_reached`] are the wrap-aware operations the
/// scheduler compares deadlines with.
#[derive(Clone, Copy, Debug, PartialOrd, Ord, PartialEq, Eq)]
pub struct Milliseconds(pub u32);

/// Hertz
#[derive(Clone, Copy, Debug, PartialOrd, Ord, PartialEq, Eq)]
pub struct Hertz(pub u32);

impl Milliseconds {
    /// Distance forward from `earlier` to `self` on the wrapping
    /// timeline.
    pub fn since(self, earlier: Milliseconds) -> Milliseconds {
        Milliseconds(self.0.wrapping_sub(earlier.0))
    }

    /// Whether `deadline` has passed as of `self`. A deadline counts
    /// as reached once it lies no more than half the `u32` range in
    /// the past, which keeps dispatch correct across the counter wrap
    /// as long as no deadline is set more than ~24.8 days ahead.
    pub fn has_reached(self, deadline: Milliseconds) -> bool {
        self.0.wrapping_sub(deadline.0) < u32::MAX / 2
    }
}

impl Adds for Milliseconds {
    type Output = Milliseconds;
    fn add(self, rhs: Milliseconds) -> Milliseconds { Milliseconds(self.0.wrapping_add(rhs.0)) }
}

/// Extension trait that adds convenience methods to the `u32` type
pub trait U32Ext {
    /// Wrap in `Hertz`
    fn hz(self) -> Hertz;

    /// Wrap in `Milliseconds`
    fn ms(self) -> Milliseconds;
}

impl U32Ext for u32 {
    fn hz(self) -> Hertz { Hertz(self) }

    fn ms(self) -> Milliseconds { Milliseconds(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_constructors_wrap_their_values() {
        assert_eq!(400.hz(), Hertz(400));
        assert_eq!(50.ms(), Milliseconds(50));
    }

    #[test]
    fn deadlines_survive_the_millisecond_counter_wrap() {
        let now = Milliseconds(u32::MAX - 100);
        let deadline = now + 300.ms();
        assert_eq!(deadline, Milliseconds(199));
        assert_eq!(deadline.since(now), Milliseconds(300));

        assert!(!now.has_reached(deadline));
        assert!(!(now + 299.ms()).has_reached(deadline));
        assert!((now + 300.ms()).has_reached(deadline));
        assert!((now + 301.ms()).has_reached(deadline));
    }
}
