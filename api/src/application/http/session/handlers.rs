pub mod analyze_image;
pub mod change_image;
pub mod get_session;
pub mod reset_session;
pub mod select_image;
pub mod submit_manual;
pub mod toggle_details;
pub mod update_ratio;
