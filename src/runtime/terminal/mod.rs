
//! The terminal: a Process (see `process::Terminal`) driven by
//! `VM::load_stream`, plus the reader/compiler primitives (`:`, `;`, `'`,
//! `immediate`, `locals`, `see`, `stream.peek`, `stream.getch`) that make
//! definition and evaluation possible.

pub mod streams;
pub mod terminal_words;

use crate::runtime::data_structures::value::Value;
use crate::runtime::process::Process;
use crate::runtime::signal::{ error_codes, Signal };
use crate::runtime::vm::VM;
use streams::is_space;

pub use terminal_words::register_terminal_words;

/// Skips whitespace, then reads a maximal run of non-whitespace characters
/// from the process's current stream. Returns `None` on an empty/exhausted
/// stream without advancing further than the trailing whitespace already
/// consumed.
pub fn next_token(process: &mut Process) -> Option<String>
{
    let stream = process.current_stream()?;

    loop
    {
        let c = stream.borrow_mut().peek_char();

        if c != 0 && is_space(c)
        {
            stream.borrow_mut().get_char();
        }
        else
        {
            break;
        }
    }

    let mut token = String::new();

    loop
    {
        let c = stream.borrow_mut().peek_char();

        if c == 0 || is_space(c)
        {
            break;
        }

        let ch = stream.borrow_mut().get_char();
        token.push(ch as u8 as char);
    }

    if token.is_empty()
    {
        None
    }
    else
    {
        Some(token)
    }
}

/// An "integer" is a non-empty run of ASCII digits. Value is computed by
/// standard decimal accumulation; overflow wraps in 32-bit unsigned.
pub fn parse_integer(token: &str) -> Option<Value>
{
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let mut value: u32 = 0;

    for b in token.bytes()
    {
        value = value.wrapping_mul(10).wrapping_add((b - b'0') as u32);
    }

    Some(Value::from_u32(value))
}

/// Prints the offending token to stderr, raises the `WORD_NOT_FOUND`
/// exception (whose backtrace dump comes from `emit_signal`).
pub fn report_word_not_found(vm: &mut VM, process: &mut Process, token: &str)
{
    eprintln!("ERROR: word not found ({})", token);
    vm.emit_signal(process, Signal::Exception { code: error_codes::WORD_NOT_FOUND, data: 0 });
}
