//! Built-in verbs of the local interpreter.

mod backend;
mod cat;
mod cd;
mod clear;
mod echo;
mod help;
mod ls;
mod mkdir;
mod pwd;
mod rm;
mod sysinfo;
mod top;
mod touch;

use super::ToolRegistry;

pub use backend::Backend;
pub use cat::Cat;
pub use cd::Cd;
pub use clear::Clear;
pub use echo::Echo;
pub use help::Help;
pub use ls::Ls;
pub use mkdir::Mkdir;
pub use pwd::Pwd;
pub use rm::Rm;
pub use sysinfo::{SysInfo, SysReport};
pub use top::Top;
pub use touch::Touch;

/// Register every built-in, in `help` order.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(Help);
    registry.register(Ls);
    registry.register(Cd);
    registry.register(Mkdir);
    registry.register(Touch);
    registry.register(Cat);
    registry.register(Rm);
    registry.register(Echo);
    registry.register(Pwd);
    registry.register(Clear);
    registry.register(Top::new("top"));
    registry.register(Top::new("htop"));
    for report in SysReport::ALL {
        registry.register(SysInfo::new(report));
    }
    registry.register(Backend);
}

#[cfg(test)]
pub(crate) fn args(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
