//! CPU pinning for the measurement thread.
//!
//! Keeps the scheduler from migrating the sweep between cores while kernels
//! are timed. Linux uses `sched_setaffinity` through libc; other platforms
//! get a guard that never pins.

#[cfg(target_os = "linux")]
mod platform {
    /// Saved affinity mask of the calling thread
    pub struct SavedMask(libc::cpu_set_t);

    pub fn current_cpu() -> Option<usize> {
        let cpu = unsafe { libc::sched_getcpu() };
        (cpu >= 0).then_some(cpu as usize)
    }

    pub fn save() -> Option<SavedMask> {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            if libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) == 0 {
                Some(SavedMask(set))
            } else {
                None
            }
        }
    }

    pub fn pin(core_id: usize) -> bool {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore(saved: &SavedMask) -> bool {
        unsafe {
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &saved.0) == 0
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub struct SavedMask;

    pub fn current_cpu() -> Option<usize> {
        None
    }
    pub fn save() -> Option<SavedMask> {
        None
    }
    pub fn pin(_core_id: usize) -> bool {
        false
    }
    pub fn restore(_saved: &SavedMask) -> bool {
        true
    }
}

/// RAII guard: pins the current thread on creation, restores the previous
/// affinity on drop.
///
/// ```ignore
/// {
///     let _pin = CpuPinGuard::new();
///     // ... timed sweep ...
/// } // original affinity restored here
/// ```
pub struct CpuPinGuard {
    core: Option<usize>,
    saved: Option<platform::SavedMask>,
}

impl CpuPinGuard {
    /// Pin to the core the thread is currently running on.
    pub fn new() -> Self {
        match platform::current_cpu() {
            Some(core) => Self::with_core(core),
            None => Self::unpinned(),
        }
    }

    /// Pin to a specific core.
    pub fn with_core(core_id: usize) -> Self {
        let Some(saved) = platform::save() else {
            return Self::unpinned();
        };
        if platform::pin(core_id) {
            Self {
                core: Some(core_id),
                saved: Some(saved),
            }
        } else {
            Self::unpinned()
        }
    }

    fn unpinned() -> Self {
        Self {
            core: None,
            saved: None,
        }
    }

    /// Core the thread is pinned to, if pinning succeeded.
    pub fn core_id(&self) -> Option<usize> {
        self.core
    }

    pub fn is_pinned(&self) -> bool {
        self.core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            if !platform::restore(&saved) {
                tracing::warn!("failed to restore CPU affinity after sweep");
            }
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_reports_consistent_state() {
        let guard = CpuPinGuard::new();
        assert_eq!(guard.is_pinned(), guard.core_id().is_some());
    }

    #[test]
    fn test_guard_drop_restores() {
        {
            let _guard = CpuPinGuard::new();
        }
        // A second guard after restore must still be constructible.
        let again = CpuPinGuard::new();
        assert_eq!(again.is_pinned(), again.core_id().is_some());
    }
}
