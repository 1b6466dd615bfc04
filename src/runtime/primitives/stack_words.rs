
//! Value-stack manipulation: `dup`, `drop`, `swap`.

use crate::runtime::process::Process;
use crate::runtime::signal::Signal;
use crate::runtime::vm::VM;

fn word_dup(process: &mut Process, vm: &mut VM)
{
    match process.top()
    {
        Some(v) => process.push(v),
        None => vm.emit_signal(process, Signal::ValueStackUnderflow)
    }
}

fn word_drop(process: &mut Process, vm: &mut VM)
{
    if process.pop().is_none()
    {
        vm.emit_signal(process, Signal::ValueStackUnderflow);
    }
}

fn word_swap(process: &mut Process, vm: &mut VM)
{
    let b = match process.pop()
    {
        Some(v) => v,
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    let a = match process.pop()
    {
        Some(v) => v,
        None =>
        {
            // Restore `b` so the stack is untouched on underflow.
            process.push(b);
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    process.push(b);
    process.push(a);
}


pub fn register_stack_words(vm: &mut VM)
{
    vm.dictionary_mut().add_native("dup", word_dup, false);
    vm.dictionary_mut().add_native("drop", word_drop, false);
    vm.dictionary_mut().add_native("swap", word_swap, false);
}
