pub mod html;
pub mod logging;
pub mod output;
pub mod signals;
pub mod terminal;

pub use html::HtmlRegion;
pub use output::{OutputFormatter, OutputMode};
pub use signals::GracefulShutdown;
pub use terminal::{TerminalNotifier, TerminalRegion, TerminalView};
