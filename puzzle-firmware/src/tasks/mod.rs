// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Spiel-Loop und Link Task kommunizieren über Embassy Channels (siehe lib.rs).

pub mod game;
pub mod link;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use game::{GameHardware, game_task};
pub use link::{ChannelLink, LinkStatus, link_task};
pub use wifi::{access_point_task, net_task};
