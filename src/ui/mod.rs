pub mod controls;
pub mod elements;
pub mod layers_control;
pub mod legend;
pub mod popup;

pub use controls::ControlManager;
pub use elements::Position;
pub use layers_control::LayersControl;
pub use legend::LegendControl;
pub use popup::PopupContent;
