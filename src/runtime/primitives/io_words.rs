
//! Output words: `.`, `.c`, `.s`.

use crate::runtime::process::Process;
use crate::runtime::signal::Signal;
use crate::runtime::vm::VM;

fn word_print_i32(process: &mut Process, vm: &mut VM)
{
    match process.pop()
    {
        Some(v) => println!("{}", v.as_i32()),
        None => vm.emit_signal(process, Signal::ValueStackUnderflow)
    }
}

fn word_print_char(process: &mut Process, vm: &mut VM)
{
    match process.pop()
    {
        Some(v) => print!("{}", (v.as_u32() as u8) as char),
        None => vm.emit_signal(process, Signal::ValueStackUnderflow)
    }
}

fn word_print_stack(process: &mut Process, _vm: &mut VM)
{
    print!("[ ");

    for v in process.value_stack()
    {
        print!("{} ", v.as_i32());
    }

    println!("]");
}


pub fn register_io_words(vm: &mut VM)
{
    vm.dictionary_mut().add_native(".", word_print_i32, false);
    vm.dictionary_mut().add_native(".c", word_print_char, false);
    vm.dictionary_mut().add_native(".s", word_print_stack, false);
}
