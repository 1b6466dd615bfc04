
//! Terminal-provided primitives: `:` `;` `'` `immediate` `locals` `see`
//! `stream.peek` `stream.getch`.

use crate::runtime::data_structures::dictionary::FunctionBody;
use crate::runtime::data_structures::value::Value;
use crate::runtime::process::Process;
use crate::runtime::signal::{ error_codes, Signal };
use crate::runtime::terminal::streams::Mode;
use crate::runtime::terminal::{ next_token, parse_integer, report_word_not_found };
use crate::runtime::vm::VM;


fn word_start_word(process: &mut Process, vm: &mut VM)
{
    let name = match next_token(process)
    {
        Some(name) => name,
        None => return
    };

    if parse_integer(&name).is_some()
    {
        vm.emit_signal(process, Signal::Exception { code: error_codes::INT_IS_NO_WORD, data: 0 });
        return;
    }

    let start = vm.code().size();
    vm.dictionary_mut().add_interpreted(&name, start);

    if let Some(stream) = process.current_stream()
    {
        stream.borrow_mut().set_mode(Mode::Compile);
    }
}

fn word_end_word(process: &mut Process, vm: &mut VM)
{
    vm.code_mut().emit(1);

    if let Some(stream) = process.current_stream()
    {
        stream.borrow_mut().set_mode(Mode::Eval);
    }
}

fn word_immediate(_process: &mut Process, vm: &mut VM)
{
    let id = vm.dictionary().last_id();
    vm.dictionary_mut().set_immediate(id);
}

fn word_locals(process: &mut Process, vm: &mut VM)
{
    let token = match next_token(process)
    {
        Some(token) => token,
        None => return
    };

    let count = match parse_integer(&token)
    {
        Some(value) => value.as_u32(),
        None =>
        {
            vm.emit_signal(process, Signal::Exception { code: error_codes::LOCAL_IS_NOT_INT, data: 0 });
            return;
        }
    };

    let id = vm.dictionary().last_id();
    vm.dictionary_mut().set_local_count(id, count);
}

fn word_tick(process: &mut Process, vm: &mut VM)
{
    let token = match next_token(process)
    {
        Some(token) => token,
        None => return
    };

    match vm.dictionary().find(&token)
    {
        Some(id) =>
        {
            vm.code_mut().emit(0);
            vm.code_mut().emit(id);
        },
        None => report_word_not_found(vm, process, &token)
    }
}

fn word_see(process: &mut Process, vm: &mut VM)
{
    let token = match next_token(process)
    {
        Some(token) => token,
        None => return
    };

    let id = match vm.dictionary().find(&token)
    {
        Some(id) => id,
        None =>
        {
            report_word_not_found(vm, process, &token);
            return;
        }
    };

    let func = match vm.dictionary().function(id)
    {
        Some(func) => func.clone(),
        None => return
    };

    print!("[{}] : {} ", id, func.name);

    match func.body
    {
        FunctionBody::Native(_) => print!("<native>"),
        FunctionBody::Interpreted { start, .. } =>
        {
            if start < 0
            {
                print!("<undefined>");
            }
            else
            {
                let mut cursor = start as u32;

                while vm.code().fetch(cursor) != 1
                {
                    if vm.code().fetch(cursor) == 0
                    {
                        cursor += 1;
                        print!("{} ", vm.code().fetch(cursor));
                    }
                    else
                    {
                        let word_id = vm.code().fetch(cursor);
                        let name = vm.dictionary()
                                     .function(word_id)
                                     .map(|f| f.name.clone())
                                     .unwrap_or_else(|| "?".to_string());

                        print!("@{}:{} ", cursor, name);
                    }

                    cursor += 1;
                }
            }
        }
    }

    if func.is_immediate
    {
        print!(" immediate");
    }

    println!();
}

fn word_stream_peek(process: &mut Process, _vm: &mut VM)
{
    let ch = process.current_stream().map(|s| s.borrow_mut().peek_char()).unwrap_or(0);
    process.push(Value::from_u32(ch));
}

fn word_stream_getch(process: &mut Process, _vm: &mut VM)
{
    let ch = process.current_stream().map(|s| s.borrow_mut().get_char()).unwrap_or(0);
    process.push(Value::from_u32(ch));
}


pub fn register_terminal_words(vm: &mut VM)
{
    vm.dictionary_mut().add_native(":", word_start_word, false);
    vm.dictionary_mut().add_native(";", word_end_word, true);
    vm.dictionary_mut().add_native("immediate", word_immediate, true);
    vm.dictionary_mut().add_native("locals", word_locals, true);
    vm.dictionary_mut().add_native("'", word_tick, true);
    vm.dictionary_mut().add_native("see", word_see, false);
    vm.dictionary_mut().add_native("stream.peek", word_stream_peek, false);
    vm.dictionary_mut().add_native("stream.getch", word_stream_getch, false);
}
