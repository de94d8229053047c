pub mod card_body;
pub mod card_display;
pub mod detail_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use card_body::{CardBody, CardBodyProps, SPINNER_FRAMES};
pub use card_display::{CardDisplay, CardDisplayProps, present};
pub use detail_panel::{DetailPanel, DetailPanelProps};
