//! Navigation stack state: level ids, the level registry, gating and pops.

pub mod context;
pub mod handle;
pub mod id;
pub mod level;
pub mod shared;
pub mod store;

pub use context::Context;
pub use handle::LevelHandle;
pub use id::{LevelId, LevelIdGenerator};
pub use level::{Gate, Level, Payload, gate, require_flag};
pub use shared::SharedStack;
pub use store::{PopOutcome, PushOutcome, StackEvent, StackStore, SubscriptionId};
