//! GPU inventory
//!
//! Best-effort detection of how many GPUs a run can allocate. Records ask
//! for devices through `run_cfg.num_gpus`; this is the other side of that
//! request.

use std::process::Command;

/// GPUs available to the current process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpuInventory {
    pub num_gpus: u32,
}

impl GpuInventory {
    /// Inventory with a known device count, for tests and for harnesses
    /// that manage placement themselves
    pub fn with_gpus(num_gpus: u32) -> Self {
        Self { num_gpus }
    }

    /// Whether a request for `requested` devices fits this inventory
    pub fn can_fit(&self, requested: u32) -> bool {
        requested <= self.num_gpus
    }
}

/// Detect the inventory (best effort).
///
/// CUDA_VISIBLE_DEVICES wins when set — an empty value means the process
/// was given no devices. Otherwise nvidia-smi is asked to list devices.
/// Detection failure means zero, never an error.
pub fn detect_inventory() -> GpuInventory {
    if let Ok(visible) = std::env::var("CUDA_VISIBLE_DEVICES") {
        let num_gpus = count_visible_devices(&visible);
        tracing::debug!("CUDA_VISIBLE_DEVICES set: {} device(s) visible", num_gpus);
        return GpuInventory { num_gpus };
    }

    if let Some(num_gpus) = count_nvidia_smi_devices() {
        tracing::debug!("nvidia-smi reports {} device(s)", num_gpus);
        return GpuInventory { num_gpus };
    }

    tracing::debug!("No GPU detected");
    GpuInventory::default()
}

// =============================================================================
// CUDA_VISIBLE_DEVICES parsing
// =============================================================================

/// Count entries in a CUDA_VISIBLE_DEVICES value.
///
/// "" -> 0, "0" -> 1, "0,1" -> 2. A "-1" entry hides devices in CUDA, so
/// it contributes nothing. UUID entries ("GPU-...") count like indices.
fn count_visible_devices(value: &str) -> u32 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && *entry != "-1")
        .count() as u32
}

// =============================================================================
// nvidia-smi probing
// =============================================================================

/// Ask nvidia-smi to list devices, one "GPU N: ..." line each
fn count_nvidia_smi_devices() -> Option<u32> {
    let output = Command::new("nvidia-smi").arg("-L").output().ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Some(count_gpu_lines(&stdout))
}

fn count_gpu_lines(listing: &str) -> u32 {
    listing
        .lines()
        .filter(|line| line.trim_start().starts_with("GPU "))
        .count() as u32
}
