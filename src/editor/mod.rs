mod buffer;
mod cursor;
mod editor;
mod file_tree;
mod mode;

pub use buffer::Buffer;
pub use cursor::Cursor;
pub use editor::Editor;
pub use file_tree::{FileOpError, FileTree, TreeEntry};
pub use mode::{BottomTab, Mode};
