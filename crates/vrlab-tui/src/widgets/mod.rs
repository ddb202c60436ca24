pub mod filter_input;
pub mod filter_tabs;
pub mod item_card;
pub mod pane_chrome;
pub mod progress_bar;
pub mod scrollable_list;
pub mod static_noise;
pub mod status_bar;
pub mod toast;
