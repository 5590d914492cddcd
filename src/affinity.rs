// CPU pinning for the measurement thread
//
// Pinning the sampler to one core removes cross-core migration and
// per-core frequency differences from the timing distributions. The guard
// restores the thread's previous affinity mask on drop, so a pinned run
// leaves the process schedulable exactly as it found it.
//
// Linux-only. Requesting a pin anywhere else, or naming a core the kernel
// rejects, is a hard error: measuring unpinned after the caller asked for
// pinning would silently change what the numbers mean.

use crate::error::{HarnessError, Result};

#[cfg(target_os = "linux")]
use nix::sched::{sched_getaffinity, sched_setaffinity, CpuSet};
#[cfg(target_os = "linux")]
use nix::unistd::Pid;

/// Scoped affinity pin for the calling thread
#[cfg(target_os = "linux")]
#[derive(Debug)]
pub struct AffinityGuard {
    previous: CpuSet,
}

#[cfg(target_os = "linux")]
impl AffinityGuard {
    /// Pin the calling thread to `cpu`, remembering the current mask.
    pub fn pin(cpu: usize) -> Result<Self> {
        // Pid 0 addresses the calling thread, not the process
        let tid = Pid::from_raw(0);

        let previous = sched_getaffinity(tid)
            .map_err(|e| HarnessError::Affinity(format!("reading current affinity mask: {e}")))?;

        let mut target = CpuSet::new();
        target.set(cpu).map_err(|e| {
            HarnessError::Affinity(format!("cpu {cpu} is outside the representable mask: {e}"))
        })?;

        sched_setaffinity(tid, &target)
            .map_err(|e| HarnessError::Affinity(format!("pinning to cpu {cpu}: {e}")))?;

        tracing::debug!(cpu, "pinned measurement thread");
        Ok(Self { previous })
    }
}

#[cfg(target_os = "linux")]
impl Drop for AffinityGuard {
    fn drop(&mut self) {
        if let Err(e) = sched_setaffinity(Pid::from_raw(0), &self.previous) {
            tracing::warn!(error = %e, "failed to restore previous cpu affinity");
        }
    }
}

/// Stub for platforms without sched_setaffinity
#[cfg(not(target_os = "linux"))]
#[derive(Debug)]
pub struct AffinityGuard {}

#[cfg(not(target_os = "linux"))]
impl AffinityGuard {
    pub fn pin(cpu: usize) -> Result<Self> {
        Err(HarnessError::Affinity(format!(
            "cpu pinning (requested cpu {cpu}) is only supported on linux"
        )))
    }
}
