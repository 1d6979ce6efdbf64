//! egui rendering: side-panel controls, top bar, status text and charts.

pub mod panels;
pub mod plot;
