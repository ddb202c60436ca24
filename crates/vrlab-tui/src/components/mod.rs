pub mod catalog_view;
pub mod course_page;
pub mod desktop;
pub mod help_overlay;
pub mod launcher;
pub mod project_gallery;
pub mod qr_modal;
pub mod retro_tv;
