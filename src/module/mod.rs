//! Module loading from the archive.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    require(specifier)                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  provided override? ──────────────────────────► value       │
//! │                                                             │
//! │  Bare("fs")                                                 │
//! │    ├─► NativeLoader::load ────────────────────► value       │
//! │    └─► not found: ./<dir>/node_modules/<name> ─┐            │
//! │                                                │            │
//! │  Relative("./x") ◄─────────────────────────────┘            │
//! │    ├─► ./x            (fatal if it names .js/.json)         │
//! │    ├─► ./x.js         (not found falls through)             │
//! │    └─► ./x/package.json ─► main ─► entry  (always fatal)    │
//! │                                                             │
//! │  source ─► Executor::execute(source, ModuleLoader) ► value  │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is cached: every call re-reads and re-executes. There is no cycle
//! detection, so a module that requires itself recurses until the stack runs
//! out.

mod executor;
mod loader;
mod native;
mod resolve;

pub use executor::{Executor, JsonExecutor};
pub use loader::ModuleLoader;
pub use native::{MapNativeLoader, NativeLoader, NoNativeModules};
