//! `ck-script` — everything between "an event was raised" and "its body ran".
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`queue`]       | `ScriptEvent`, `ScriptEventQueue` (FIFO mailbox, drained per tick) |
//! | [`engine`]      | `Interpreter` and `ScriptEngine` traits                         |
//! | [`env`]         | `ScriptEnv` — what a running script may touch                   |
//! | [`pool`]        | `InterpreterPool` — recycled interpreter instances              |
//! | [`scriptorium`] | `Scriptorium` — installed scripts keyed by classifier + number  |
//! | [`compiler`]    | `ScriptCompiler` trait, `CompiledUnit`, `ScriptInstall`         |
//! | [`bootstrap`]   | `discover_bootstrap`, `bootstrap_files`                         |
//! | [`native`]      | Closure-backed engine and a line-oriented manifest compiler     |
//! | [`error`]       | `ScriptError`, `ScriptResult<T>`                                |
//!
//! The scripting language itself is a collaborator: the kernel only sees an
//! opaque `Script` type, and runs it through an [`Interpreter`] bound to one
//! agent for one event.

pub mod bootstrap;
pub mod compiler;
pub mod engine;
pub mod env;
pub mod error;
pub mod native;
pub mod pool;
pub mod queue;
pub mod scriptorium;


pub use bootstrap::{bootstrap_files, discover_bootstrap, BOOTSTRAP_DIR, SCRIPT_EXTENSION};
pub use compiler::{CompiledUnit, ScriptCompiler, ScriptInstall};
pub use engine::{Interpreter, ScriptEngine};
pub use env::ScriptEnv;
pub use error::{ScriptError, ScriptResult};
pub use native::{NativeCompiler, NativeEngine, NativeFrame, NativeInterpreter, NativeScript};
pub use pool::InterpreterPool;
pub use queue::{ScriptEvent, ScriptEventQueue};
pub use scriptorium::Scriptorium;
