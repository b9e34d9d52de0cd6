use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::sync::mpsc;

mod config;
mod editor;
mod exec;
mod input;
mod render;
mod syntax;
mod theme;

use config::{ConfigEngine, SessionState};
use editor::Editor;
use render::Renderer;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Config script first, so settings apply from the first frame
    let mut config = ConfigEngine::new();
    if let Err(e) = config.load_default() {
        eprintln!("[config] {}", e);
    }
    let settings = config.settings();

    // A file or directory argument wins over the remembered session
    let session = SessionState::load();
    let (project_root, open_path) = match env::args().nth(1).map(PathBuf::from) {
        Some(path) if path.is_dir() => (path, None),
        Some(path) => {
            let root = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (root, Some(path))
        }
        None => (
            session
                .project_root
                .clone()
                .or_else(|| env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from(".")),
            session.last_file.clone(),
        ),
    };

    let autosave_secs = settings.autosave_secs.max(1);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut editor = Editor::new(project_root, settings, events_tx);
    if let Some(path) = open_path {
        editor.open_file(path);
    }

    Renderer::setup()?;
    let mut renderer = Renderer::new()?;
    editor.adjust_scroll(renderer.text_height(&editor));
    renderer.render(&editor)?;

    let mut term_events = EventStream::new();
    let mut autosave = tokio::time::interval(Duration::from_secs(autosave_secs));

    while editor.running {
        tokio::select! {
            Some(Ok(event)) = term_events.next() => {
                if let Event::Resize(w, h) = &event {
                    renderer.resize(*w, *h);
                }
                input::handle_event(&mut editor, event);
            }
            Some(exec_event) = events_rx.recv() => {
                editor.handle_exec_event(exec_event);
            }
            _ = autosave.tick() => {
                editor.autosave();
            }
        }
        editor.adjust_scroll(renderer.text_height(&editor));
        renderer.render(&editor)?;
    }

    Renderer::teardown()?;

    // Remember where we were for next launch
    let state = SessionState {
        project_root: Some(editor.project_root.clone()),
        last_file: editor.buffer.path().map(Path::to_path_buf),
    };
    if let Err(e) = state.save() {
        eprintln!("[session] {}", e);
    }

    Ok(())
}
