use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc::UnboundedSender;

use crate::config::Settings;
use crate::exec::{
    self, ConsoleSink, ExecEvent, ExecutionPolicy, Orchestrator, ProcessLauncher, SubmitOutcome,
    SystemLauncher, TerminalBuffer,
};
use crate::syntax::Highlighter;

use super::{BottomTab, Buffer, Cursor, FileTree, Mode};

/// Download pages behind the `:toolchain` command, one per supported
/// language toolchain.
const TOOLCHAIN_PAGES: &[(&str, &str)] = &[
    ("python", "https://www.python.org/downloads/"),
    ("java", "https://www.oracle.com/java/technologies/downloads/"),
    ("cpp", "https://www.mingw-w64.org/downloads/"),
    ("ruby", "https://www.ruby-lang.org/en/downloads/"),
    ("php", "https://www.php.net/downloads"),
    ("node", "https://nodejs.org/en/download"),
    ("html", "https://code.visualstudio.com/"),
];

/// The whole editing session: buffer, explorer, bottom tabs, and the
/// process orchestration state. Everything the window used to keep as
/// implicit globals lives here explicitly.
pub struct Editor {
    pub buffer: Buffer,
    pub cursor: Cursor,
    pub mode: Mode,
    pub command_buffer: String,
    pub running: bool,
    pub message: Option<String>,
    pub file_tree: FileTree,
    pub scroll_offset: usize,
    pub project_root: PathBuf,
    pub bottom_tab: BottomTab,
    pub console: ConsoleSink,
    pub terminal: TerminalBuffer,
    pub exec: Orchestrator,
    pub settings: Settings,
    pub highlighter: Highlighter,
    /// Mode to return to when a command finishes, so `:rename` and
    /// `:delete` know whether they target the explorer selection.
    return_mode: Mode,
}

impl Editor {
    pub fn new(
        project_root: PathBuf,
        settings: Settings,
        events: UnboundedSender<ExecEvent>,
    ) -> Self {
        Self::with_launcher(project_root, settings, Box::new(SystemLauncher), events)
    }

    pub fn with_launcher(
        project_root: PathBuf,
        settings: Settings,
        launcher: Box<dyn ProcessLauncher>,
        events: UnboundedSender<ExecEvent>,
    ) -> Self {
        let mut policy = ExecutionPolicy::new();
        for (ext, program) in &settings.interpreters {
            policy.set_interpreter(ext, program);
        }

        Self {
            buffer: Buffer::new(),
            cursor: Cursor::new(),
            mode: Mode::default(),
            command_buffer: String::new(),
            running: true,
            message: None,
            file_tree: FileTree::new(project_root.clone(), settings.show_hidden_files),
            scroll_offset: 0,
            project_root,
            bottom_tab: BottomTab::default(),
            console: ConsoleSink::new(),
            terminal: TerminalBuffer::new(),
            exec: Orchestrator::new(policy, launcher, events),
            settings,
            highlighter: Highlighter::new(),
            return_mode: Mode::Normal,
        }
    }

    // Messages

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Adjust scroll offset to keep the cursor inside the viewport
    pub fn adjust_scroll(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if self.cursor.line < self.scroll_offset {
            self.scroll_offset = self.cursor.line;
        }
        if self.cursor.line >= self.scroll_offset + viewport_height {
            self.scroll_offset = self.cursor.line - viewport_height + 1;
        }
    }

    // File operations

    pub fn open_file(&mut self, path: PathBuf) {
        match Buffer::from_file(path.clone()) {
            Ok(buffer) => {
                self.buffer = buffer;
                self.cursor = Cursor::new();
                self.scroll_offset = 0;
                self.highlighter.set_language_from_path(&path);
                self.reparse();
                self.mode = Mode::Normal;
            }
            Err(e) => {
                self.set_message(format!("Failed to open {}: {}", path.display(), e));
            }
        }
    }

    /// Create an empty file in the project root and open it. An existing
    /// file of the same name is truncated.
    pub fn new_file(&mut self, name: &str) {
        let path = self.project_root.join(name);
        if let Err(e) = fs::write(&path, "") {
            self.set_message(format!("Failed to create {}: {}", path.display(), e));
            return;
        }
        self.file_tree.refresh();
        self.open_file(path);
    }

    pub fn save_current(&mut self) {
        match self.buffer.save() {
            Ok(()) => self.set_message("Written"),
            Err(e) => self.set_message(format!("Error: {}", e)),
        }
    }

    /// Timer-driven save of the current file; quiet on success.
    pub fn autosave(&mut self) {
        if self.buffer.is_dirty() && self.buffer.path().is_some() {
            if let Err(e) = self.buffer.save() {
                self.set_message(format!("Auto-save failed: {}", e));
            }
        }
    }

    pub fn set_project_root(&mut self, root: PathBuf) {
        if !root.is_dir() {
            self.set_message(format!("{} is not a directory", root.display()));
            return;
        }
        self.project_root = root.clone();
        self.file_tree.set_root(root);
    }

    fn rename(&mut self, new_name: &str) {
        if self.return_mode == Mode::Explorer {
            self.rename_selection(new_name);
        } else {
            self.rename_current_file(new_name);
        }
    }

    fn rename_selection(&mut self, new_name: &str) {
        let old = self.file_tree.selected_entry().map(|e| e.path.clone());
        match self.file_tree.rename_selected(new_name) {
            Ok(dest) => {
                // Keep the open buffer pointing at the moved file.
                if old.as_deref() == self.buffer.path() {
                    self.buffer.set_path(dest.clone());
                }
                self.set_message(format!("Renamed to {}", dest.display()));
            }
            Err(e) => self.set_message(format!("Rename failed: {}", e)),
        }
    }

    /// Rename the file behind the current buffer. Conflicts leave the
    /// filesystem unchanged; the user retries with another name.
    fn rename_current_file(&mut self, new_name: &str) {
        let Some(old) = self.buffer.path().map(Path::to_path_buf) else {
            self.set_message("No file to rename");
            return;
        };
        if old.file_name().is_some_and(|n| n == new_name) {
            self.set_message("Name is unchanged");
            return;
        }

        let dest = old.parent().unwrap_or(&self.project_root).join(new_name);
        if dest.exists() {
            self.set_message(format!("Rename failed: {} already exists", dest.display()));
            return;
        }

        match fs::rename(&old, &dest) {
            Ok(()) => {
                self.buffer.set_path(dest.clone());
                self.file_tree.refresh();
                self.set_message(format!("Renamed to {}", dest.display()));
            }
            Err(e) => {
                self.set_message(format!("Failed to rename {}: {}", old.display(), e));
            }
        }
    }

    fn delete(&mut self) {
        if self.return_mode != Mode::Explorer {
            self.set_message("Select a file in the explorer to delete");
            return;
        }
        match self.file_tree.delete_selected() {
            Ok(path) => self.set_message(format!("Deleted {}", path.display())),
            Err(e) => self.set_message(format!("Delete failed: {}", e)),
        }
    }

    // Running code

    /// Run the current file through its toolchain. Both bottom buffers are
    /// cleared first and the Output tab takes the foreground.
    pub fn run_current_file(&mut self) {
        let Some(path) = self.buffer.path().map(Path::to_path_buf) else {
            self.set_message("No file to run");
            return;
        };
        self.console.clear();
        self.terminal.clear();
        self.exec.run_file(&path, &mut self.console);
        self.bottom_tab = BottomTab::Output;
    }

    /// Relay one process event into the console.
    pub fn handle_exec_event(&mut self, event: ExecEvent) {
        self.exec.handle_event(event, &mut self.console);
    }

    /// Line-submit in the terminal tab: feed the running process or run a
    /// one-shot shell command.
    pub fn submit_terminal_line(&mut self) {
        let (current, launcher) = self.exec.parts_mut();
        let outcome = exec::submit_line(&mut self.terminal, current, launcher, &self.project_root);
        if outcome == SubmitOutcome::Forwarded {
            self.bottom_tab = BottomTab::Output;
        }
    }

    // Git menu

    pub fn git_commit(&mut self, message: &str) {
        let result = exec::git::commit(self.exec.launcher(), &self.project_root, message);
        self.append_git_result(result);
    }

    pub fn git_push(&mut self) {
        let result = exec::git::push(self.exec.launcher(), &self.project_root);
        self.append_git_result(result);
    }

    pub fn git_pull(&mut self) {
        let result = exec::git::pull(self.exec.launcher(), &self.project_root);
        self.append_git_result(result);
    }

    fn append_git_result(&mut self, result: std::io::Result<exec::Completed>) {
        match result {
            Ok(done) => {
                self.console
                    .append_line(&format!("{}\n{}", done.stdout, done.stderr));
            }
            Err(e) => self.console.append_line(&format!("git failed: {}", e)),
        }
    }

    /// Open the download page for a language toolchain.
    pub fn open_toolchain_page(&mut self, lang: &str) {
        let Some((_, url)) = TOOLCHAIN_PAGES.iter().find(|(name, _)| *name == lang) else {
            let known: Vec<&str> = TOOLCHAIN_PAGES.iter().map(|(name, _)| *name).collect();
            self.set_message(format!("Unknown toolchain (try: {})", known.join(", ")));
            return;
        };
        match self.exec.launcher().open_external(url) {
            Ok(()) => self.set_message(format!("Opened {}", url)),
            Err(e) => self.set_message(format!("Failed to open {}: {}", url, e)),
        }
    }

    /// Report which highlight grammars are present on disk.
    fn report_grammars(&mut self) {
        let installed = self.highlighter.installed_grammars();
        if installed.is_empty() {
            let dir = self.highlighter.grammars_dir().to_path_buf();
            self.set_message(format!("No grammars installed in {}", dir.display()));
        } else {
            let names: Vec<&str> = installed.iter().map(|lang| lang.name()).collect();
            self.set_message(format!("Grammars: {}", names.join(", ")));
        }
    }

    // Modes and views

    pub fn enter_insert_mode(&mut self) {
        self.mode = Mode::Insert;
    }

    pub fn enter_normal_mode(&mut self) {
        self.mode = Mode::Normal;
        self.command_buffer.clear();
        self.clamp_cursor_col();
    }

    pub fn enter_command_mode(&mut self) {
        self.return_mode = self.mode;
        self.mode = Mode::Command;
        self.command_buffer.clear();
    }

    pub fn toggle_explorer(&mut self) {
        if self.mode == Mode::Explorer {
            self.mode = Mode::Normal;
        } else {
            self.file_tree.refresh();
            self.mode = Mode::Explorer;
        }
    }

    pub fn open_selected_file(&mut self) {
        if let Some(path) = self.file_tree.select() {
            self.open_file(path);
        }
    }

    pub fn focus_terminal(&mut self) {
        self.bottom_tab = BottomTab::Terminal;
        self.mode = Mode::Terminal;
    }

    pub fn show_output(&mut self) {
        self.bottom_tab = BottomTab::Output;
    }

    // Command line

    pub fn execute_command(&mut self) {
        let input = self.command_buffer.trim().to_string();
        self.command_buffer.clear();
        self.mode = self.return_mode;

        let (cmd, arg) = match input.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (input.as_str(), ""),
        };

        match cmd {
            "" => {}
            "q" | "quit" => self.quit(),
            "w" | "write" => self.save_current(),
            "wq" => match self.buffer.save() {
                Ok(()) => self.quit(),
                Err(e) => self.set_message(format!("Error: {}", e)),
            },
            "run" => self.run_current_file(),
            "new" if !arg.is_empty() => self.new_file(arg),
            "open" if !arg.is_empty() => self.open_file(PathBuf::from(arg)),
            "root" if !arg.is_empty() => self.set_project_root(PathBuf::from(arg)),
            "rename" if !arg.is_empty() => self.rename(arg),
            "delete" => self.delete(),
            "commit" if !arg.is_empty() => self.git_commit(arg),
            "push" => self.git_push(),
            "pull" => self.git_pull(),
            "toolchain" if !arg.is_empty() => self.open_toolchain_page(arg),
            "grammars" => self.report_grammars(),
            "theme" if !arg.is_empty() => {
                self.settings.theme = arg.to_string();
            }
            _ => self.set_message(format!("Unknown command: {}", input)),
        }
    }

    // Cursor motions

    pub fn move_left(&mut self) {
        self.cursor.move_left();
    }

    pub fn move_right(&mut self) {
        let line_len = self.buffer.line_len(self.cursor.line);
        self.cursor.move_right(line_len);
    }

    pub fn move_up(&mut self) {
        self.cursor.move_up();
        self.clamp_cursor_col();
    }

    pub fn move_down(&mut self) {
        self.cursor.move_down(self.buffer.line_count());
        self.clamp_cursor_col();
    }

    fn clamp_cursor_col(&mut self) {
        let line_len = self.buffer.line_len(self.cursor.line);
        self.cursor.clamp_col(line_len);
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor.col = 0;
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor.col = self.buffer.line_len(self.cursor.line);
    }

    pub fn move_to_first_line(&mut self) {
        self.cursor.line = 0;
        self.clamp_cursor_col();
    }

    pub fn move_to_last_line(&mut self) {
        self.cursor.line = self.buffer.line_count().saturating_sub(1);
        self.clamp_cursor_col();
    }

    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    /// Move to the start of the next word (w)
    pub fn move_word_forward(&mut self) {
        let line_count = self.buffer.line_count();

        // Leave the current word, then skip separators
        while let Some(c) = self.buffer.char_at(self.cursor.line, self.cursor.col) {
            if !Self::is_word_char(c) {
                break;
            }
            self.cursor.col += 1;
        }
        loop {
            match self.buffer.char_at(self.cursor.line, self.cursor.col) {
                Some(c) if Self::is_word_char(c) => break,
                Some(_) => self.cursor.col += 1,
                None if self.cursor.line + 1 < line_count => {
                    self.cursor.line += 1;
                    self.cursor.col = 0;
                }
                None => break,
            }
        }
    }

    /// Move to the start of the previous word (b)
    pub fn move_word_backward(&mut self) {
        // Step left once, wrapping to the previous line end
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.col = self.buffer.line_len(self.cursor.line).saturating_sub(1);
        } else {
            return;
        }

        // Skip separators, then rewind to the word start
        while self.cursor.col > 0 {
            match self.buffer.char_at(self.cursor.line, self.cursor.col) {
                Some(c) if Self::is_word_char(c) => break,
                _ => self.cursor.col -= 1,
            }
        }
        while self.cursor.col > 0 {
            match self.buffer.char_at(self.cursor.line, self.cursor.col - 1) {
                Some(c) if Self::is_word_char(c) => self.cursor.col -= 1,
                _ => break,
            }
        }
    }

    // Insert-mode entry points

    /// Append after cursor (a)
    pub fn append(&mut self) {
        let line_len = self.buffer.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            self.cursor.col += 1;
        }
        self.enter_insert_mode();
    }

    /// Append at end of line (A)
    pub fn append_end_of_line(&mut self) {
        self.cursor.col = self.buffer.line_len(self.cursor.line);
        self.enter_insert_mode();
    }

    /// Open line below (o)
    pub fn open_line_below(&mut self) {
        let line_len = self.buffer.line_len(self.cursor.line);
        self.buffer.insert_newline(self.cursor.line, line_len);
        self.cursor.line += 1;
        self.cursor.col = 0;
        self.reparse();
        self.enter_insert_mode();
    }

    /// Open line above (O)
    pub fn open_line_above(&mut self) {
        self.cursor.col = 0;
        self.buffer.insert_newline(self.cursor.line, 0);
        self.reparse();
        self.enter_insert_mode();
    }

    // Text editing

    pub fn insert_char(&mut self, ch: char) {
        self.buffer.insert_char(self.cursor.line, self.cursor.col, ch);
        self.cursor.col += 1;
        self.reparse();
    }

    pub fn delete_char_backward(&mut self) {
        if self.cursor.col > 0 {
            self.buffer
                .delete_char_backward(self.cursor.line, self.cursor.col);
            self.cursor.col -= 1;
        } else if self.cursor.line > 0 {
            let prev_line_len = self.buffer.line_len(self.cursor.line - 1);
            self.buffer
                .delete_char_backward(self.cursor.line, self.cursor.col);
            self.cursor.line -= 1;
            self.cursor.col = prev_line_len;
        }
        self.reparse();
    }

    pub fn insert_newline(&mut self) {
        self.buffer.insert_newline(self.cursor.line, self.cursor.col);
        self.cursor.line += 1;
        self.cursor.col = 0;
        self.reparse();
    }

    fn reparse(&mut self) {
        self.highlighter.parse(&self.buffer.contents());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::Completed;
    use crate::exec::launcher::fake::FakeLauncher;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    struct SharedLauncher(Arc<FakeLauncher>);

    impl ProcessLauncher for SharedLauncher {
        fn spawn(
            &self,
            cmd: &crate::exec::CommandSpec,
            events: UnboundedSender<ExecEvent>,
        ) -> std::io::Result<crate::exec::ProcessHandle> {
            self.0.spawn(cmd, events)
        }

        fn run_blocking(
            &self,
            cmd: &crate::exec::CommandSpec,
        ) -> std::io::Result<Completed> {
            self.0.run_blocking(cmd)
        }

        fn run_shell(&self, line: &str, cwd: &Path) -> std::io::Result<Completed> {
            self.0.run_shell(line, cwd)
        }

        fn open_external(&self, target: &str) -> std::io::Result<()> {
            self.0.open_external(target)
        }
    }

    fn editor_with_fake() -> (Editor, Arc<FakeLauncher>) {
        let launcher = Arc::new(FakeLauncher::new());
        let (tx, _rx) = mpsc::unbounded_channel();
        let editor = Editor::with_launcher(
            PathBuf::from("."),
            Settings::default(),
            Box::new(SharedLauncher(Arc::clone(&launcher))),
            tx,
        );
        (editor, launcher)
    }

    fn with_open_file(editor: &mut Editor, path: &str, text: &str) {
        editor.buffer = Buffer::from_text(text);
        editor.buffer.set_path(PathBuf::from(path));
    }

    #[test]
    fn run_clears_both_buffers_and_surfaces_output_tab() {
        let (mut editor, launcher) = editor_with_fake();
        with_open_file(&mut editor, "foo.py", "print('hi')\n");
        editor.console.append("stale output");
        editor.terminal.insert_char('x');
        editor.bottom_tab = BottomTab::Terminal;

        editor.run_current_file();

        assert!(editor.terminal.is_empty());
        assert!(!editor.console.text().contains("stale"));
        assert_eq!(editor.bottom_tab, BottomTab::Output);
        assert_eq!(launcher.spawn_count(), 1);
    }

    #[test]
    fn run_without_a_file_only_sets_a_message() {
        let (mut editor, launcher) = editor_with_fake();
        editor.run_current_file();

        assert!(editor.message.is_some());
        assert_eq!(launcher.spawn_count(), 0);
    }

    #[test]
    fn forwarded_terminal_line_switches_to_output_tab() {
        let (mut editor, launcher) = editor_with_fake();
        with_open_file(&mut editor, "loop.py", "");
        editor.run_current_file();

        editor.focus_terminal();
        for ch in "answer".chars() {
            editor.terminal.insert_char(ch);
        }
        editor.submit_terminal_line();

        assert_eq!(editor.bottom_tab, BottomTab::Output);
        assert_eq!(launcher.stdin.contents(), b"answer\n");
        assert!(launcher.shell_lines.lock().unwrap().is_empty());
    }

    #[test]
    fn one_shot_terminal_line_stays_on_terminal_tab() {
        let (mut editor, launcher) = editor_with_fake();
        launcher.script_shell(Completed {
            stdout: "ok\n".to_string(),
            stderr: String::new(),
        });
        editor.focus_terminal();
        for ch in "echo ok".chars() {
            editor.terminal.insert_char(ch);
        }
        editor.submit_terminal_line();

        assert_eq!(editor.bottom_tab, BottomTab::Terminal);
        assert!(editor.terminal.text().contains("ok"));
        assert!(editor.console.is_empty());
    }

    #[test]
    fn git_commit_output_lands_in_console() {
        let (mut editor, launcher) = editor_with_fake();
        launcher.script_blocking(
            "git",
            Completed {
                stdout: "1 file changed".to_string(),
                stderr: String::new(),
            },
        );

        editor.git_commit("tidy up");

        assert!(editor.console.text().contains("1 file changed"));
        let blocked = launcher.blocked.lock().unwrap();
        assert_eq!(blocked[0].args, vec!["commit", "-am", "tidy up"]);
    }

    #[test]
    fn toolchain_command_opens_the_download_page() {
        let (mut editor, launcher) = editor_with_fake();
        editor.open_toolchain_page("ruby");

        let opened = launcher.opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].contains("ruby-lang.org"));
    }

    #[test]
    fn unknown_toolchain_opens_nothing() {
        let (mut editor, launcher) = editor_with_fake();
        editor.open_toolchain_page("fortran");

        assert!(launcher.opened.lock().unwrap().is_empty());
        assert!(editor.message.is_some());
    }

    #[test]
    fn command_mode_returns_to_the_mode_it_came_from() {
        let (mut editor, _launcher) = editor_with_fake();
        editor.mode = Mode::Explorer;
        editor.enter_command_mode();
        assert_eq!(editor.mode, Mode::Command);

        editor.command_buffer = "nonsense".to_string();
        editor.execute_command();
        assert_eq!(editor.mode, Mode::Explorer);
    }

    #[test]
    fn unknown_command_sets_a_message() {
        let (mut editor, _launcher) = editor_with_fake();
        editor.enter_command_mode();
        editor.command_buffer = "frobnicate now".to_string();
        editor.execute_command();
        assert_eq!(
            editor.message.as_deref(),
            Some("Unknown command: frobnicate now")
        );
    }

    #[test]
    fn quit_command_stops_the_editor() {
        let (mut editor, _launcher) = editor_with_fake();
        editor.enter_command_mode();
        editor.command_buffer = "q".to_string();
        editor.execute_command();
        assert!(!editor.running);
    }

    #[test]
    fn theme_command_updates_settings() {
        let (mut editor, _launcher) = editor_with_fake();
        editor.enter_command_mode();
        editor.command_buffer = "theme gruvbox-dark".to_string();
        editor.execute_command();
        assert_eq!(editor.settings.theme, "gruvbox-dark");
    }

    #[test]
    fn delete_outside_explorer_is_refused() {
        let (mut editor, _launcher) = editor_with_fake();
        editor.enter_command_mode();
        editor.command_buffer = "delete".to_string();
        editor.execute_command();
        assert!(editor.message.as_deref().is_some_and(|m| m.contains("explorer")));
    }

    #[test]
    fn rename_conflict_reports_and_keeps_the_old_path() {
        let scratch = std::env::temp_dir().join(format!(
            "scriptbliss-editor-rename-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&scratch);
        fs::create_dir_all(&scratch).unwrap();
        fs::write(scratch.join("a.py"), "print(1)").unwrap();
        fs::write(scratch.join("b.py"), "print(2)").unwrap();

        let (mut editor, _launcher) = editor_with_fake();
        editor.set_project_root(scratch.clone());
        editor.open_file(scratch.join("a.py"));

        editor.enter_command_mode();
        editor.command_buffer = "rename b.py".to_string();
        editor.execute_command();

        assert!(editor.message.as_deref().is_some_and(|m| m.contains("exists")));
        assert_eq!(editor.buffer.path(), Some(scratch.join("a.py").as_path()));
        assert_eq!(
            fs::read_to_string(scratch.join("b.py")).unwrap(),
            "print(2)"
        );

        let _ = fs::remove_dir_all(&scratch);
    }

    #[test]
    fn movement_clamps_to_shorter_lines() {
        let (mut editor, _launcher) = editor_with_fake();
        editor.buffer = Buffer::from_text("hello world\nhi");
        editor.cursor.col = 10;
        editor.move_down();
        assert_eq!(editor.cursor.line, 1);
        assert_eq!(editor.cursor.col, 2);
    }

    #[test]
    fn word_forward_lands_on_next_word() {
        let (mut editor, _launcher) = editor_with_fake();
        editor.buffer = Buffer::from_text("foo bar");
        editor.move_word_forward();
        assert_eq!(editor.cursor.col, 4);
    }

    #[test]
    fn word_backward_returns_to_word_start() {
        let (mut editor, _launcher) = editor_with_fake();
        editor.buffer = Buffer::from_text("foo bar");
        editor.cursor.col = 6;
        editor.move_word_backward();
        assert_eq!(editor.cursor.col, 4);
    }
}
