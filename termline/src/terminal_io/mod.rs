// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod input_device;
pub mod output_device;

// Re-export.
pub use input_device::*;
pub use output_device::*;
