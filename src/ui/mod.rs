pub mod input_translator;
pub mod session;
pub mod text_view;

pub use input_translator::{InputEvent, InputTranslator};
pub use session::{app_channel, spawn_input_reader, AppEvent, Session};
pub use text_view::TextView;
