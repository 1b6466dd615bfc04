
//! `bye`, `exit`, `deb.set`.

use crate::runtime::process::Process;
use crate::runtime::signal::Signal;
use crate::runtime::vm::VM;

fn word_bye(process: &mut Process, vm: &mut VM)
{
    vm.emit_signal(process, Signal::Exit);
}

fn word_exit(process: &mut Process, vm: &mut VM)
{
    let status = match process.pop()
    {
        Some(v) => v.as_i32(),
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    std::process::exit(status);
}

fn word_deb_set(process: &mut Process, vm: &mut VM)
{
    match process.pop()
    {
        Some(v) => vm.set_verbose_debugging(v.as_i32() != 0),
        None => vm.emit_signal(process, Signal::ValueStackUnderflow)
    }
}


pub fn register_misc_words(vm: &mut VM)
{
    vm.dictionary_mut().add_native("bye", word_bye, false);
    vm.dictionary_mut().add_native("exit", word_exit, false);
    vm.dictionary_mut().add_native("deb.set", word_deb_set, false);
}
