mod repository;
mod script;
mod view;

pub use repository::ScriptRepository;
pub use script::{Script, ScriptId};
pub use view::LibraryView;
