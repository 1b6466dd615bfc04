
//! Control flow and literals: `lit.i32`, `return`, `#`, `branch`, `?branch`.

use crate::runtime::data_structures::dictionary::FunctionBody;
use crate::runtime::data_structures::value::Value;
use crate::runtime::process::Process;
use crate::runtime::signal::Signal;
use crate::runtime::vm::VM;

/// Consumes the trailing code cell as an `i32` literal and pushes it. This
/// is also what `VM::step` calls directly when it sees the raw `0` marker,
/// so the two paths (calling `lit.i32` by name vs. hitting the marker
/// in-line) behave identically.
pub fn lit_i32(process: &mut Process, vm: &mut VM)
{
    let payload = vm.fetch(process);
    process.push(Value::from_bits(payload));
}

pub fn return_word(process: &mut Process, vm: &mut VM)
{
    vm.set_ret(process);
}

pub fn call_indirect(process: &mut Process, vm: &mut VM)
{
    let id = match process.pop()
    {
        Some(v) => v.as_u32(),
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    if id > vm.dictionary().len() as u32
    {
        vm.emit_signal(process, Signal::WordIdOutOfRange);
        return;
    }

    match vm.dictionary().function(id).map(|f| f.body)
    {
        Some(FunctionBody::Native(native)) => native(process, vm),
        Some(FunctionBody::Interpreted { start, .. }) =>
        {
            if start < 0
            {
                vm.emit_signal(process, Signal::WordNotImplemented);
            }
            else
            {
                vm.set_call(process, id);
                // Once outside this native call, `wp` gets incremented by
                // the caller's step loop -- pre-decrement to land on the
                // callee's first instruction.
                process.wp = process.wp.wrapping_sub(1);
            }
        },
        None => vm.emit_signal(process, Signal::WordIdOutOfRange)
    }
}

pub fn branch(process: &mut Process, vm: &mut VM)
{
    let addr = match process.pop()
    {
        Some(v) => v.as_i32(),
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    let addr = addr.wrapping_sub(1);
    vm.set_branch(process, addr as u32);
}

pub fn branch_if(process: &mut Process, vm: &mut VM)
{
    let addr = match process.pop()
    {
        Some(v) => v.as_i32(),
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    let cond = match process.pop()
    {
        Some(v) => v.as_i32(),
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    if cond != 0
    {
        vm.set_branch(process, addr.wrapping_sub(1) as u32);
    }
}


pub fn register_control_words(vm: &mut VM)
{
    vm.dictionary_mut().add_native("lit.i32", lit_i32, false);
    vm.dictionary_mut().add_native("#", call_indirect, false);
    vm.dictionary_mut().add_native("branch", branch, false);
    vm.dictionary_mut().add_native("?branch", branch_if, false);
}


#[cfg(test)]
mod tests
{
    use super::*;
    use crate::runtime::process::RetFrame;

    #[test]
    fn lit_i32_pushes_the_payload_cell_and_leaves_wp_on_it()
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        vm.code_mut().emit(0);
        vm.code_mut().emit(42);
        process.wp = 0;

        lit_i32(&mut process, &mut vm);

        assert_eq!(process.pop().unwrap().as_i32(), 42);
        assert_eq!(process.wp, 1);
    }

    #[test]
    fn return_word_restores_callers_wp_and_lp()
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        process.return_stack.push(RetFrame { word: 999, ip: 7, lp: 3, catch: None });
        process.wp = 50;
        process.lp = 10;

        return_word(&mut process, &mut vm);

        assert_eq!(process.wp, 7);
        assert_eq!(process.lp, 3);
        assert_eq!(process.return_depth(), 0);
    }

    #[test]
    fn call_indirect_raises_underflow_when_stack_is_empty()
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        call_indirect(&mut process, &mut vm);

        assert_eq!(process.signal(), Signal::ValueStackUnderflow);
    }

    #[test]
    fn call_indirect_raises_word_id_out_of_range_for_unknown_id()
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        process.push(Value::from_u32(999_999));
        call_indirect(&mut process, &mut vm);

        assert_eq!(process.signal(), Signal::WordIdOutOfRange);
    }

    #[test]
    fn call_indirect_dispatches_to_a_native_word()
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        let not_id = vm.dictionary().find("not").expect("not should be registered");

        process.push(Value::from_i32(0));
        process.push(Value::from_u32(not_id));

        call_indirect(&mut process, &mut vm);

        assert_eq!(process.pop().unwrap().as_i32(), -1);
    }

    #[test]
    fn call_indirect_sets_wp_to_start_minus_one_for_an_interpreted_word()
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        let start = vm.code_mut().emit(1);
        let word_id = vm.dictionary_mut().add_interpreted("probe", start);

        process.push(Value::from_u32(word_id));
        process.wp = 5;

        call_indirect(&mut process, &mut vm);

        assert_eq!(process.wp, start.wrapping_sub(1));
        assert_eq!(process.return_depth(), 1);
    }

    #[test]
    fn branch_sets_wp_to_addr_minus_one()
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        process.push(Value::from_i32(42));
        branch(&mut process, &mut vm);

        assert_eq!(process.wp, 41);
    }

    #[test]
    fn branch_if_only_branches_when_condition_is_nonzero()
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        process.wp = 5;
        process.push(Value::from_i32(0));
        process.push(Value::from_i32(42));
        branch_if(&mut process, &mut vm);
        assert_eq!(process.wp, 5, "a false condition must not move wp");

        process.push(Value::from_i32(7));
        process.push(Value::from_i32(42));
        branch_if(&mut process, &mut vm);
        assert_eq!(process.wp, 41);
    }

    #[test]
    fn branch_if_raises_underflow_on_empty_stack()
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        branch_if(&mut process, &mut vm);

        assert_eq!(process.signal(), Signal::ValueStackUnderflow);
    }
}
