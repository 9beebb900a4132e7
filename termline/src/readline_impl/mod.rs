// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod history;
pub mod key_event_reader;
pub mod line_buffer;
pub mod line_editor;
pub mod readline;

// Re-export.
pub use history::*;
pub use key_event_reader::*;
pub use line_buffer::*;
pub use line_editor::*;
pub use readline::*;
