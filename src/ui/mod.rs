//! # User Interface Module
//!
//! Dear ImGui overlay for the simulator: a one-line hint while running and,
//! while paused, the instructions plus the editable parameter table.
//!
//! - [`UiManager`] wires ImGui into winit and wgpu
//! - [`panel`] holds the widgets themselves

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::{hint_overlay, instructions, parameter_table, PanelColumn};
