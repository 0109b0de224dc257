mod helpers;
mod items;
mod shell;

pub(crate) use items::{cmd_add, cmd_clear, cmd_delete, cmd_edit, cmd_list};
pub(crate) use shell::cmd_shell;
