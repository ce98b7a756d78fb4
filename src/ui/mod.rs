pub mod dialogs;
pub mod link_overlay;
pub mod theme;
pub mod timeline_chart;
pub mod toolbar;
