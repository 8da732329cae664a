pub mod analysis;
pub mod chat_widget;
pub mod dashboard;
pub mod home;
pub mod meme_reaction;
pub mod navbar;
pub mod signup;
pub mod toasts;
pub mod upload;
