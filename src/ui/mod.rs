/// egui rendering of the session: toolbar, panel cards and charts.
pub mod panels;
pub mod plot;
