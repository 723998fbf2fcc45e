pub mod constants;

mod animation;
mod battle;
mod config;
mod damage;
mod event;
mod fighter;
mod input;
mod roster;
mod scheduler;

pub use animation::*;
pub use battle::*;
pub use config::*;
pub use damage::*;
pub use event::*;
pub use fighter::*;
pub use input::*;
pub use roster::*;
pub use scheduler::*;
