
//! The native primitive set. `register_all` is called once from
//! `VM::new`, after `return` has already claimed id 1.

pub mod control_words;
pub mod arithmetic_words;
pub mod stack_words;
pub mod io_words;
pub mod introspection_words;
pub mod misc_words;

use crate::runtime::terminal;
use crate::runtime::vm::VM;

pub fn register_all(vm: &mut VM)
{
    control_words::register_control_words(vm);
    arithmetic_words::register_arithmetic_words(vm);
    stack_words::register_stack_words(vm);
    io_words::register_io_words(vm);
    introspection_words::register_introspection_words(vm);
    misc_words::register_misc_words(vm);
    terminal::register_terminal_words(vm);
}
