mod cards;
mod filters;
mod popup;
mod status_bar;

pub use cards::CardGridWidget;
pub use filters::FilterPanelWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
