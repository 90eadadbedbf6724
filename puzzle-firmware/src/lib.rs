// Library-Root: Hardware-Anbindung des Puzzles
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von puzzle-core
pub use puzzle_core::Command;

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::config::LINK_QUEUE_DEPTH;

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Spiel-Loop und Link Task laufen auf demselben Executor und tauschen
// Kommandos nur über diese Queues aus. Der Spiel-Loop nutzt ausschließlich
// try_send/try_receive und blockiert dadurch nie.

/// Queue für Link-Kommandos (in beide Richtungen je eine)
pub type CommandChannel = Channel<NoopRawMutex, Command, LINK_QUEUE_DEPTH>;

/// Sender für Link-Kommandos
/// - Spiel → Link Task (ausgehend)
/// - Link Task → Spiel (eingehend)
pub type CommandSender = Sender<'static, NoopRawMutex, Command, LINK_QUEUE_DEPTH>;

/// Receiver für Link-Kommandos
pub type CommandReceiver = Receiver<'static, NoopRawMutex, Command, LINK_QUEUE_DEPTH>;
