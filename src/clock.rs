//! The current time, from the OS or from somewhere more predictable.

use std::fmt;

#[cfg(target_os = "redox")]
extern crate syscall as redox_syscall;


#[cfg(any(target_os = "macos", target_os = "ios"))]
extern {
    fn gettimeofday(tp: *mut libc::timeval, tzp: *mut libc::timezone) -> libc::c_int;
}

#[cfg(all(unix, not(target_os = "macos"), not(target_os = "ios"), not(target_os = "redox")))]
use libc::clock_gettime;


/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the millisecond of the second.
#[cfg(any(target_os = "macos", target_os = "ios"))]
unsafe fn sys_time() -> (i64, i16) {
    use std::ptr::null_mut;

    let mut tv = libc::timeval { tv_sec: 0, tv_usec: 0 };
    let _ = gettimeofday(&mut tv, null_mut());
    (tv.tv_sec, (tv.tv_usec / 1000) as i16)
}

#[cfg(windows)] use winapi::shared::minwindef::FILETIME;
#[cfg(windows)] const HECTONANOSECS_IN_SEC: i64 = 10_000_000;
#[cfg(windows)] const HECTONANOSEC_TO_UNIX_EPOCH: i64 = 11_644_473_600 * HECTONANOSECS_IN_SEC;

#[cfg(windows)]
unsafe fn sys_time() -> (i64, i16) {
    use winapi::um::sysinfoapi::GetSystemTimeAsFileTime;

    let mut ft = std::mem::zeroed();
    GetSystemTimeAsFileTime(&mut ft);

    let t = file_time_as_u64(&ft) as i64 - HECTONANOSEC_TO_UNIX_EPOCH;
    (t / HECTONANOSECS_IN_SEC, ((t % HECTONANOSECS_IN_SEC) / 10_000) as i16)
}

#[cfg(windows)]
fn file_time_as_u64(ft: &FILETIME) -> u64 {
    (u64::from(ft.dwHighDateTime) << 32) | u64::from(ft.dwLowDateTime)
}

#[cfg(not(any(target_os = "macos", target_os = "ios", target_os = "redox", windows)))]
unsafe fn sys_time() -> (i64, i16) {
    let mut tv = libc::timespec { tv_sec: 0, tv_nsec: 0 };
    let _ = clock_gettime(libc::CLOCK_REALTIME, &mut tv);
    (tv.tv_sec as i64, (tv.tv_nsec / 1_000_000) as i16)
}

#[cfg(target_os = "redox")]
unsafe fn sys_time() -> (i64, i16) {
    let mut ts = redox_syscall::TimeSpec::default();
    let _ = redox_syscall::clock_gettime(redox_syscall::CLOCK_REALTIME, &mut ts);
    (ts.tv_sec, (ts.tv_nsec / 1_000_000) as i16)
}


/// The number of milliseconds since the Unix epoch, according to the OS.
pub fn current_time_millis() -> i64 {
    let (seconds, millis) = unsafe { sys_time() };
    seconds.saturating_mul(1000).saturating_add(i64::from(millis))
}


/// A source of “now”. Code that needs the current time can take one of
/// these so that tests can pin it down.
pub trait MillisProvider: fmt::Debug + Send + Sync {

    /// The current instant, in milliseconds since the Unix epoch.
    fn millis(&self) -> i64;
}

/// Reads the OS clock.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct SystemMillisProvider;

impl MillisProvider for SystemMillisProvider {
    fn millis(&self) -> i64 {
        current_time_millis()
    }
}

/// Always returns the same instant.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct FixedMillisProvider {
    pub millis: i64,
}

impl MillisProvider for FixedMillisProvider {
    fn millis(&self) -> i64 {
        self.millis
    }
}

/// Reads the OS clock, shifted by a constant amount.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct OffsetMillisProvider {
    pub offset: i64,
}

impl MillisProvider for OffsetMillisProvider {
    fn millis(&self) -> i64 {
        current_time_millis().saturating_add(self.offset)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sanity_check() {
        assert!((0, 0) != unsafe { sys_time() })
    }

    #[test]
    fn after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(current_time_millis() > 1_577_836_800_000);
    }

    #[test]
    fn fixed() {
        let provider = FixedMillisProvider { millis: 42 };
        assert_eq!(provider.millis(), 42);
    }

    #[test]
    fn offset() {
        let provider = OffsetMillisProvider { offset: -86_400_000 };
        let now = current_time_millis();
        let shifted = provider.millis();
        assert!(shifted < now);
        assert!(shifted >= now - 86_400_000);
    }
}
