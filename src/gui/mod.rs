//! GUI module - User interface components

mod app;
mod control_panel;
mod table_viewer;

pub use app::MovieExplorerApp;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use table_viewer::TableViewer;
