mod left_panel;
mod main_panel;

pub use left_panel::{LeftPanel, PanelAction};
pub use main_panel::MainPanel;
