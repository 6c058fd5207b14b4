pub mod health;
pub mod playback;
pub mod speech;
pub mod voices;
