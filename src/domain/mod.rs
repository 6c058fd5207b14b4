pub mod audio;
pub mod speech;
pub mod take;
pub mod transport;
pub mod voice;
