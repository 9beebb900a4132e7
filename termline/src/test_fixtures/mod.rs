// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures used to run whole readline sessions in tests: an in-memory output sink,
//! a scripted byte reader, and a raw mode driver that counts its calls.

// Attach sources.
pub mod mock_raw_mode_driver;
pub mod output_device_ext;
pub mod scripted_reader;
pub mod stdout_mock;

// Re-export.
pub use mock_raw_mode_driver::*;
pub use output_device_ext::*;
pub use scripted_reader::*;
pub use stdout_mock::*;
