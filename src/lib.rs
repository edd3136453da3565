pub mod draw;
pub mod game;
pub mod logging;
pub mod replay;
pub mod session;
pub mod settings;
