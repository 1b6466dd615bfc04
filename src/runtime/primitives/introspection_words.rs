
//! Introspection/mutation of the five conceptual arrays: value stack (`V`),
//! return stack (`R`), code segment (`W`), const-data segment (`CD`), and
//! local stack (`L`). Plus the code-emission helpers `code.size`, `W>`,
//! `CD>`, and the user-raised exception `e>`.

use crate::runtime::data_structures::value::Value;
use crate::runtime::process::Process;
use crate::runtime::signal::Signal;
use crate::runtime::vm::VM;

fn pop_addr(process: &mut Process, vm: &mut VM) -> Option<u32>
{
    match process.pop()
    {
        Some(v) => Some(v.as_u32()),
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            None
        }
    }
}


// --- V: the value stack itself -------------------------------------------

fn word_v_top(process: &mut Process, _vm: &mut VM)
{
    let top = (process.value_stack().len() as u32).wrapping_sub(1);
    process.push(Value::from_u32(top));
}

fn word_v_fetch(process: &mut Process, vm: &mut VM)
{
    let addr = match pop_addr(process, vm) { Some(a) => a, None => return };

    match process.value_stack().get(addr as usize).copied()
    {
        Some(v) => process.push(v),
        None => vm.emit_signal(process, Signal::ValueStackUnderflow)
    }
}

fn word_v_store(process: &mut Process, vm: &mut VM)
{
    let addr = match pop_addr(process, vm) { Some(a) => a, None => return };

    let value = match process.pop()
    {
        Some(v) => v,
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    if (addr as usize) < process.value_stack().len()
    {
        process.value_stack_mut()[addr as usize] = value;
    }
    else
    {
        vm.emit_signal(process, Signal::ValueStackUnderflow);
    }
}


// --- R: the return stack (R@/R! expose/replace the caller ip field) -----

fn word_r_top(process: &mut Process, _vm: &mut VM)
{
    let top = (process.return_depth() as u32).wrapping_sub(1);
    process.push(Value::from_u32(top));
}

fn word_r_fetch(process: &mut Process, vm: &mut VM)
{
    let addr = match pop_addr(process, vm) { Some(a) => a, None => return };

    match process.return_frame(addr as usize)
    {
        Some(frame) => process.push(Value::from_u32(frame.ip)),
        None => vm.emit_signal(process, Signal::WordIdOutOfRange)
    }
}

fn word_r_store(process: &mut Process, vm: &mut VM)
{
    let addr = match pop_addr(process, vm) { Some(a) => a, None => return };

    let value = match process.pop()
    {
        Some(v) => v,
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    if !process.set_return_frame_ip(addr as usize, value.as_u32())
    {
        vm.emit_signal(process, Signal::WordIdOutOfRange);
    }
}


// --- W: the code segment --------------------------------------------------

fn word_w_top(process: &mut Process, vm: &mut VM)
{
    let top = vm.code().size().wrapping_sub(1);
    process.push(Value::from_u32(top));
}

fn word_w_fetch(process: &mut Process, vm: &mut VM)
{
    let addr = match pop_addr(process, vm) { Some(a) => a, None => return };

    if addr < vm.code().size()
    {
        process.push(Value::from_u32(vm.code().fetch(addr)));
    }
    else
    {
        vm.emit_signal(process, Signal::WordIdOutOfRange);
    }
}

fn word_w_store(process: &mut Process, vm: &mut VM)
{
    let addr = match pop_addr(process, vm) { Some(a) => a, None => return };

    let value = match process.pop()
    {
        Some(v) => v,
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    if addr < vm.code().size()
    {
        vm.code_mut().store(addr, value.as_u32());
    }
    else
    {
        vm.emit_signal(process, Signal::WordIdOutOfRange);
    }
}

fn word_code_size(process: &mut Process, vm: &mut VM)
{
    process.push(Value::from_u32(vm.code().size()));
}

fn word_w_emit(process: &mut Process, vm: &mut VM)
{
    match process.pop()
    {
        Some(v) => { vm.code_mut().emit(v.as_u32()); },
        None => vm.emit_signal(process, Signal::ValueStackUnderflow)
    }
}


// --- CD: the const-data segment -------------------------------------------

fn word_cd_top(process: &mut Process, vm: &mut VM)
{
    let top = vm.const_data().size().wrapping_sub(1);
    process.push(Value::from_u32(top));
}

fn word_cd_fetch(process: &mut Process, vm: &mut VM)
{
    let addr = match pop_addr(process, vm) { Some(a) => a, None => return };

    if addr < vm.const_data().size()
    {
        process.push(vm.const_data().fetch(addr));
    }
    else
    {
        vm.emit_signal(process, Signal::WordIdOutOfRange);
    }
}

fn word_cd_store(process: &mut Process, vm: &mut VM)
{
    let addr = match pop_addr(process, vm) { Some(a) => a, None => return };

    let value = match process.pop()
    {
        Some(v) => v,
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    if addr < vm.const_data().size()
    {
        vm.const_data_mut().store(addr, value);
    }
    else
    {
        vm.emit_signal(process, Signal::WordIdOutOfRange);
    }
}

fn word_cd_emit(process: &mut Process, vm: &mut VM)
{
    match process.pop()
    {
        Some(v) => { vm.const_data_mut().emit(v); },
        None => vm.emit_signal(process, Signal::ValueStackUnderflow)
    }
}


// --- L: the local stack, addressed relative to the current `lp` ----------

fn word_l_fetch(process: &mut Process, vm: &mut VM)
{
    let addr = match pop_addr(process, vm) { Some(a) => a, None => return };
    let index = process.lp().wrapping_add(addr);

    match process.local_stack().get(index as usize).copied()
    {
        Some(v) => process.push(v),
        None => vm.emit_signal(process, Signal::WordIdOutOfRange)
    }
}

fn word_l_store(process: &mut Process, vm: &mut VM)
{
    let addr = match pop_addr(process, vm) { Some(a) => a, None => return };

    let value = match process.pop()
    {
        Some(v) => v,
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    let index = process.lp().wrapping_add(addr);

    if (index as usize) < process.local_stack().len()
    {
        process.local_stack_mut()[index as usize] = value;
    }
    else
    {
        vm.emit_signal(process, Signal::WordIdOutOfRange);
    }
}


// --- user-raised exceptions ------------------------------------------------

fn word_raise_exception(process: &mut Process, vm: &mut VM)
{
    match process.pop()
    {
        Some(v) => vm.emit_signal(process, Signal::Exception { code: v.as_i32(), data: 0 }),
        None => vm.emit_signal(process, Signal::ValueStackUnderflow)
    }
}


pub fn register_introspection_words(vm: &mut VM)
{
    vm.dictionary_mut().add_native("V&", word_v_top, false);
    vm.dictionary_mut().add_native("V@", word_v_fetch, false);
    vm.dictionary_mut().add_native("V!", word_v_store, false);

    vm.dictionary_mut().add_native("R&", word_r_top, false);
    vm.dictionary_mut().add_native("R@", word_r_fetch, false);
    vm.dictionary_mut().add_native("R!", word_r_store, false);

    vm.dictionary_mut().add_native("W&", word_w_top, false);
    vm.dictionary_mut().add_native("W@", word_w_fetch, false);
    vm.dictionary_mut().add_native("W!", word_w_store, false);
    vm.dictionary_mut().add_native("code.size", word_code_size, false);
    vm.dictionary_mut().add_native("W>", word_w_emit, false);

    vm.dictionary_mut().add_native("CD&", word_cd_top, false);
    vm.dictionary_mut().add_native("CD@", word_cd_fetch, false);
    vm.dictionary_mut().add_native("CD!", word_cd_store, false);
    vm.dictionary_mut().add_native("CD>", word_cd_emit, false);

    vm.dictionary_mut().add_native("L@", word_l_fetch, false);
    vm.dictionary_mut().add_native("L!", word_l_store, false);

    vm.dictionary_mut().add_native("e>", word_raise_exception, false);
}
