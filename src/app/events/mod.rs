//! Intent-, Command- und Notification-Typen für den Datenfluss
//! Host → Intent → Command → Handler → Event → Host.

mod command;
mod intent;
mod notification;

pub use command::AppCommand;
pub use intent::{AppIntent, Key, Modifiers};
pub use notification::EditorEvent;
