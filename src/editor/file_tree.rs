use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failures of the explorer's file operations, surfaced as status messages.
#[derive(Debug)]
pub enum FileOpError {
    /// Destination already exists; the filesystem was left untouched.
    Conflict(PathBuf),
    /// Rename to the same name; nothing to do.
    Unchanged,
    NothingSelected,
    IsDirectory(PathBuf),
    Io(io::Error),
}

impl fmt::Display for FileOpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOpError::Conflict(path) => {
                write!(f, "{} already exists", path.display())
            }
            FileOpError::Unchanged => write!(f, "Name is unchanged"),
            FileOpError::NothingSelected => write!(f, "No entry selected"),
            FileOpError::IsDirectory(path) => {
                write!(f, "{} is a directory", path.display())
            }
            FileOpError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl From<io::Error> for FileOpError {
    fn from(e: io::Error) -> Self {
        FileOpError::Io(e)
    }
}

#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub depth: usize,
}

/// The explorer pane: a flattened view of the project directory.
pub struct FileTree {
    pub entries: Vec<TreeEntry>,
    pub selected: usize,
    root: PathBuf,
    expanded: HashSet<PathBuf>,
    show_hidden: bool,
}

impl FileTree {
    pub fn new(root: PathBuf, show_hidden: bool) -> Self {
        let mut tree = Self {
            entries: Vec::new(),
            selected: 0,
            root,
            expanded: HashSet::new(),
            show_hidden,
        };
        tree.refresh();
        tree
    }

    /// Re-root the tree (the Open Folder action).
    pub fn set_root(&mut self, root: PathBuf) {
        self.root = root;
        self.expanded.clear();
        self.selected = 0;
        self.refresh();
    }

    pub fn refresh(&mut self) {
        self.entries.clear();
        self.build_tree(&self.root.clone(), 0);
        if self.selected >= self.entries.len() {
            self.selected = self.entries.len().saturating_sub(1);
        }
    }

    fn build_tree(&mut self, dir: &Path, depth: usize) {
        let Ok(read_dir) = fs::read_dir(dir) else {
            return;
        };

        let mut entries: Vec<TreeEntry> = read_dir
            .filter_map(|e| e.ok())
            .map(|e| {
                let path = e.path();
                let is_dir = path.is_dir();
                let name = e.file_name().to_string_lossy().to_string();
                TreeEntry {
                    name,
                    path,
                    is_dir,
                    depth,
                }
            })
            .filter(|e| self.show_hidden || !e.name.starts_with('.'))
            .collect();

        // Directories first, then alphabetically
        entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        });

        for entry in entries {
            let is_expanded = self.expanded.contains(&entry.path);
            let entry_path = entry.path.clone();
            let is_dir = entry.is_dir;
            self.entries.push(entry);

            if is_dir && is_expanded {
                self.build_tree(&entry_path, depth + 1);
            }
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn selected_entry(&self) -> Option<&TreeEntry> {
        self.entries.get(self.selected)
    }

    pub fn is_expanded(&self, path: &Path) -> bool {
        self.expanded.contains(path)
    }

    /// Activate the selection: toggle a directory, or yield a file path.
    pub fn select(&mut self) -> Option<PathBuf> {
        let entry = self.entries.get(self.selected).cloned()?;
        if entry.is_dir {
            if !self.expanded.remove(&entry.path) {
                self.expanded.insert(entry.path);
            }
            self.refresh();
            None
        } else {
            Some(entry.path)
        }
    }

    /// Rename the selected entry within its directory. Refuses when the
    /// destination exists or the name is unchanged, leaving the filesystem
    /// untouched so the caller can re-prompt.
    pub fn rename_selected(&mut self, new_name: &str) -> Result<PathBuf, FileOpError> {
        let entry = self
            .selected_entry()
            .cloned()
            .ok_or(FileOpError::NothingSelected)?;

        if entry.name == new_name {
            return Err(FileOpError::Unchanged);
        }

        let dest = entry
            .path
            .parent()
            .unwrap_or(&self.root)
            .join(new_name);
        if dest.exists() {
            return Err(FileOpError::Conflict(dest));
        }

        fs::rename(&entry.path, &dest)?;
        self.refresh();
        Ok(dest)
    }

    /// Delete the selected file. Directories are refused.
    pub fn delete_selected(&mut self) -> Result<PathBuf, FileOpError> {
        let entry = self
            .selected_entry()
            .cloned()
            .ok_or(FileOpError::NothingSelected)?;

        if entry.is_dir {
            return Err(FileOpError::IsDirectory(entry.path));
        }

        fs::remove_file(&entry.path)?;
        self.refresh();
        Ok(entry.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scratch directory that cleans up after itself.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new(tag: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "scriptbliss-tree-{}-{}",
                tag,
                std::process::id()
            ));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn touch(&self, name: &str) -> PathBuf {
            let path = self.0.join(name);
            fs::write(&path, "").unwrap();
            path
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn select_by_name(tree: &mut FileTree, name: &str) {
        tree.selected = tree
            .entries
            .iter()
            .position(|e| e.name == name)
            .expect("entry present");
    }

    #[test]
    fn lists_files_sorted_with_directories_first() {
        let scratch = Scratch::new("list");
        scratch.touch("zeta.py");
        fs::create_dir(scratch.0.join("alpha")).unwrap();
        scratch.touch("beta.rb");

        let tree = FileTree::new(scratch.0.clone(), false);
        let names: Vec<&str> = tree.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta.rb", "zeta.py"]);
    }

    #[test]
    fn hidden_files_are_filtered_unless_enabled() {
        let scratch = Scratch::new("hidden");
        scratch.touch(".secret");
        scratch.touch("visible.py");

        let tree = FileTree::new(scratch.0.clone(), false);
        assert_eq!(tree.entries.len(), 1);

        let tree = FileTree::new(scratch.0.clone(), true);
        assert_eq!(tree.entries.len(), 2);
    }

    #[test]
    fn rename_moves_the_file() {
        let scratch = Scratch::new("rename");
        scratch.touch("old.py");

        let mut tree = FileTree::new(scratch.0.clone(), false);
        select_by_name(&mut tree, "old.py");
        let dest = tree.rename_selected("new.py").unwrap();

        assert!(dest.exists());
        assert!(!scratch.0.join("old.py").exists());
    }

    #[test]
    fn rename_conflict_leaves_filesystem_unchanged() {
        let scratch = Scratch::new("conflict");
        scratch.touch("a.py");
        fs::write(scratch.0.join("b.py"), "keep me").unwrap();

        let mut tree = FileTree::new(scratch.0.clone(), false);
        select_by_name(&mut tree, "a.py");
        let result = tree.rename_selected("b.py");

        assert!(matches!(result, Err(FileOpError::Conflict(_))));
        assert!(scratch.0.join("a.py").exists());
        assert_eq!(fs::read_to_string(scratch.0.join("b.py")).unwrap(), "keep me");
    }

    #[test]
    fn rename_to_same_name_is_rejected() {
        let scratch = Scratch::new("same");
        scratch.touch("a.py");

        let mut tree = FileTree::new(scratch.0.clone(), false);
        select_by_name(&mut tree, "a.py");
        assert!(matches!(
            tree.rename_selected("a.py"),
            Err(FileOpError::Unchanged)
        ));
    }

    #[test]
    fn delete_removes_the_selected_file() {
        let scratch = Scratch::new("delete");
        let path = scratch.touch("gone.py");

        let mut tree = FileTree::new(scratch.0.clone(), false);
        select_by_name(&mut tree, "gone.py");
        tree.delete_selected().unwrap();

        assert!(!path.exists());
        assert!(tree.entries.is_empty());
    }

    #[test]
    fn delete_refuses_directories() {
        let scratch = Scratch::new("deldir");
        fs::create_dir(scratch.0.join("keep")).unwrap();

        let mut tree = FileTree::new(scratch.0.clone(), false);
        select_by_name(&mut tree, "keep");
        assert!(matches!(
            tree.delete_selected(),
            Err(FileOpError::IsDirectory(_))
        ));
        assert!(scratch.0.join("keep").exists());
    }

    #[test]
    fn selecting_a_directory_toggles_expansion() {
        let scratch = Scratch::new("expand");
        fs::create_dir(scratch.0.join("sub")).unwrap();
        fs::write(scratch.0.join("sub").join("inner.py"), "").unwrap();

        let mut tree = FileTree::new(scratch.0.clone(), false);
        select_by_name(&mut tree, "sub");

        assert!(tree.select().is_none());
        assert_eq!(tree.entries.len(), 2); // sub + inner.py

        select_by_name(&mut tree, "sub");
        assert!(tree.select().is_none());
        assert_eq!(tree.entries.len(), 1);
    }

    #[test]
    fn selecting_a_file_returns_its_path() {
        let scratch = Scratch::new("select");
        let path = scratch.touch("main.py");

        let mut tree = FileTree::new(scratch.0.clone(), false);
        select_by_name(&mut tree, "main.py");
        assert_eq!(tree.select(), Some(path));
    }
}
