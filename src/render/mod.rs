mod editor;
mod library;
mod prompter;
mod renderer;

pub use renderer::Renderer;
