
//! Integer arithmetic, comparison, and logic words. All operate on the
//! `i32` view of `Value`; arithmetic wraps on overflow rather than panicking.

use crate::runtime::data_structures::value::Value;
use crate::runtime::process::Process;
use crate::runtime::signal::{ error_codes, Signal };
use crate::runtime::vm::VM;

fn pop2(process: &mut Process, vm: &mut VM) -> Option<(i32, i32)>
{
    let b = match process.pop()
    {
        Some(v) => v.as_i32(),
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return None;
        }
    };

    let a = match process.pop()
    {
        Some(v) => v.as_i32(),
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return None;
        }
    };

    Some((a, b))
}

fn pop2_u32(process: &mut Process, vm: &mut VM) -> Option<(u32, u32)>
{
    let b = match process.pop()
    {
        Some(v) => v.as_u32(),
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return None;
        }
    };

    let a = match process.pop()
    {
        Some(v) => v.as_u32(),
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return None;
        }
    };

    Some((a, b))
}

fn word_add(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2(process, vm)
    {
        process.push(Value::from_i32(a.wrapping_add(b)));
    }
}

fn word_sub(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2(process, vm)
    {
        process.push(Value::from_i32(a.wrapping_sub(b)));
    }
}

fn word_mul(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2(process, vm)
    {
        process.push(Value::from_i32(a.wrapping_mul(b)));
    }
}

fn word_div(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2(process, vm)
    {
        if b == 0
        {
            vm.emit_signal(process, Signal::Exception { code: error_codes::DIVIDE_BY_ZERO, data: 0 });
        }
        else
        {
            process.push(Value::from_i32(a.wrapping_div(b)));
        }
    }
}

fn word_mod(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2(process, vm)
    {
        if b == 0
        {
            vm.emit_signal(process, Signal::Exception { code: error_codes::DIVIDE_BY_ZERO, data: 0 });
        }
        else
        {
            process.push(Value::from_i32(a.wrapping_rem(b)));
        }
    }
}

fn word_eq(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2(process, vm)
    {
        process.push(Value::from(a == b));
    }
}

fn word_ne(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2(process, vm)
    {
        process.push(Value::from(a != b));
    }
}

fn word_gt(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2(process, vm)
    {
        process.push(Value::from(a > b));
    }
}

fn word_lt(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2(process, vm)
    {
        process.push(Value::from(a < b));
    }
}

fn word_ge(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2(process, vm)
    {
        process.push(Value::from(a >= b));
    }
}

fn word_le(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2(process, vm)
    {
        process.push(Value::from(a <= b));
    }
}

fn word_not(process: &mut Process, vm: &mut VM)
{
    let a = match process.pop()
    {
        Some(v) => v.as_i32(),
        None =>
        {
            vm.emit_signal(process, Signal::ValueStackUnderflow);
            return;
        }
    };

    // Logical negation producing the Forth -1/0 boolean encoding, matching
    // `eloraiby/cppForth`'s `Primitives::notBW` (`!v.u32`): the
    // control-flow words `if`/`until` compiled into bootstrap.f depend on
    // `not` flipping between "true" and "false" against `?branch`'s
    // cond != 0 test, not on a bitwise complement of arbitrary flag bits.
    process.push(Value::from(a == 0));
}

fn word_and(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2_u32(process, vm)
    {
        process.push(Value::from_u32(a & b));
    }
}

fn word_or(process: &mut Process, vm: &mut VM)
{
    if let Some((a, b)) = pop2_u32(process, vm)
    {
        process.push(Value::from_u32(a | b));
    }
}


pub fn register_arithmetic_words(vm: &mut VM)
{
    vm.dictionary_mut().add_native("+", word_add, false);
    vm.dictionary_mut().add_native("-", word_sub, false);
    vm.dictionary_mut().add_native("*", word_mul, false);
    vm.dictionary_mut().add_native("/", word_div, false);
    vm.dictionary_mut().add_native("%", word_mod, false);
    vm.dictionary_mut().add_native("==", word_eq, false);
    vm.dictionary_mut().add_native("=/=", word_ne, false);
    vm.dictionary_mut().add_native(">", word_gt, false);
    vm.dictionary_mut().add_native("<", word_lt, false);
    vm.dictionary_mut().add_native(">=", word_ge, false);
    vm.dictionary_mut().add_native("<=", word_le, false);
    vm.dictionary_mut().add_native("not", word_not, false);
    vm.dictionary_mut().add_native("and", word_and, false);
    vm.dictionary_mut().add_native("or", word_or, false);
}


#[cfg(test)]
mod tests
{
    use super::*;
    use test_case::test_case;

    fn eval(words: &[(&str, fn(&mut Process, &mut VM))], inputs: &[i32]) -> Vec<i32>
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        for v in inputs
        {
            process.push(Value::from_i32(*v));
        }

        for (_, f) in words
        {
            f(&mut process, &mut vm);
        }

        process.value_stack().iter().map(|v| v.as_i32()).collect()
    }

    #[test_case(2, 3, 5 ; "positive addition")]
    #[test_case(-1, 1, 0 ; "addition crossing zero")]
    fn addition(a: i32, b: i32, expected: i32)
    {
        let result = eval(&[ ("+", word_add) ], &[ a, b ]);
        assert_eq!(result, vec![ expected ]);
    }

    #[test]
    fn division_by_zero_raises_exception_and_does_not_push()
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        process.push(Value::from_i32(10));
        process.push(Value::from_i32(0));

        word_div(&mut process, &mut vm);

        assert_eq!(process.signal(), Signal::Exception { code: error_codes::DIVIDE_BY_ZERO, data: 0 });
        assert!(process.value_stack().is_empty());
    }

    #[test]
    fn comparisons_use_forth_boolean_encoding()
    {
        let result = eval(&[ (">", word_gt) ], &[ 5, 3 ]);
        assert_eq!(result, vec![ -1 ]);

        let result = eval(&[ (">", word_gt) ], &[ 3, 5 ]);
        assert_eq!(result, vec![ 0 ]);
    }

    #[test]
    fn and_or_are_bitwise_on_the_u32_view()
    {
        let result = eval(&[ ("and", word_and) ], &[ 0b1100, 0b1010 ]);
        assert_eq!(result, vec![ 0b1000 ]);

        let result = eval(&[ ("or", word_or) ], &[ 0b1100, 0b1010 ]);
        assert_eq!(result, vec![ 0b1110 ]);
    }

    #[test]
    fn not_is_logical_negation_not_bitwise_complement()
    {
        let result = eval(&[ ("not", word_not) ], &[ 0 ]);
        assert_eq!(result, vec![ -1 ]);

        let result = eval(&[ ("not", word_not) ], &[ 1 ]);
        assert_eq!(result, vec![ 0 ]);
    }
}
