
//! The VM: owns the dictionary, the code and const-data segments, and the
//! debug flag. Hosts all processes -- it is a passive container, never
//! holding a Process of its own; lifetimes are controlled by the embedder.

use crate::runtime::data_structures::code_segment::{ CodeSegment, ConstDataSegment };
use crate::runtime::data_structures::dictionary::{ Dictionary, FunctionBody };
use crate::runtime::data_structures::value::Value;
use crate::runtime::primitives;
use crate::runtime::process::{ Process, RetFrame };
use crate::runtime::signal::Signal;
use crate::runtime::terminal;
use crate::runtime::terminal::streams::{ Mode, SharedStream };

pub struct VM
{
    pub(crate) dictionary: Dictionary,
    pub(crate) code: CodeSegment,
    pub(crate) const_data: ConstDataSegment,
    pub(crate) debug: bool
}


impl VM
{
    pub fn new() -> VM
    {
        let mut vm = VM
        {
            dictionary: Dictionary::new(),
            code: CodeSegment::new(),
            const_data: ConstDataSegment::new(),
            debug: false
        };

        // `return` must be the very first word registered so it lands on
        // id 1, matching the reserved meaning of the compiled `;` cell.
        let return_id = vm.dictionary.add_native("return", primitives::control_words::return_word, false);
        debug_assert_eq!(return_id, 1);

        primitives::register_all(&mut vm);

        vm
    }

    pub fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    pub fn code(&self) -> &CodeSegment
    {
        &self.code
    }

    pub fn const_data(&self) -> &ConstDataSegment
    {
        &self.const_data
    }

    pub(crate) fn dictionary_mut(&mut self) -> &mut Dictionary
    {
        &mut self.dictionary
    }

    pub(crate) fn code_mut(&mut self) -> &mut CodeSegment
    {
        &mut self.code
    }

    pub(crate) fn const_data_mut(&mut self) -> &mut ConstDataSegment
    {
        &mut self.const_data
    }

    pub fn is_verbose_debugging(&self) -> bool
    {
        self.debug
    }

    pub fn set_verbose_debugging(&mut self, on: bool)
    {
        self.debug = on;
    }

    /// Reads the cell immediately after `process.wp`, advancing `wp` to it.
    /// Used to consume an inline literal (or a `'`-captured word id)
    /// following the `0` marker.
    pub(crate) fn fetch(&self, process: &mut Process) -> u32
    {
        process.wp = process.wp.wrapping_add(1);
        self.code.fetch(process.wp)
    }

    pub(crate) fn set_call(&mut self, process: &mut Process, word: u32)
    {
        let local_count = match self.dictionary.function(word).map(|f| f.body)
        {
            Some(FunctionBody::Interpreted { start, local_count }) =>
            {
                process.return_stack.push(RetFrame
                {
                    word,
                    ip: process.wp,
                    lp: process.lp,
                    catch: None
                });

                process.wp = start as u32;
                process.lp = process.local_stack.len() as u32;

                local_count
            },
            _ => 0
        };

        process.local_stack.resize(process.local_stack.len() + local_count as usize, Value::default());
    }

    pub(crate) fn set_ret(&mut self, process: &mut Process)
    {
        let frame = match process.return_stack.pop()
        {
            Some(frame) => frame,
            None => return
        };

        let local_count = match self.dictionary.function(frame.word).map(|f| f.body)
        {
            Some(FunctionBody::Interpreted { local_count, .. }) => local_count,
            _ => 0
        };

        let new_len = process.local_stack.len().saturating_sub(local_count as usize);
        process.local_stack.truncate(new_len);

        process.wp = frame.ip;
        process.lp = frame.lp;
    }

    pub(crate) fn set_branch(&self, process: &mut Process, addr: u32)
    {
        process.wp = addr;
    }

    fn trace_step(&self, process: &Process, word: u32)
    {
        let name = self.dictionary.function(word).map(|f| f.name.as_str()).unwrap_or("?");
        print!("    @{} -- {}", process.wp, name);

        if word == 0
        {
            print!(" {}", self.code.fetch(process.wp + 1));
        }

        println!();
    }

    /// Executes one word at `wp`. Primitives that change control flow leave
    /// `wp` compensated by one so the trailing increment below lands on the
    /// intended target.
    pub fn step(&mut self, process: &mut Process)
    {
        if !process.signal.is_none()
        {
            // Signal idempotence: stepping with a signal already set is a
            // no-op and makes no further progress.
            return;
        }

        let cell = self.code.fetch(process.wp);

        if cell == 0
        {
            if self.debug
            {
                self.trace_step(process, cell);
            }

            primitives::control_words::lit_i32(process, self);
            process.wp = process.wp.wrapping_add(1);
            return;
        }

        if cell > self.dictionary.len() as u32
        {
            self.emit_signal(process, Signal::WordIdOutOfRange);
            return;
        }

        if self.debug
        {
            self.trace_step(process, cell);
        }

        let body = match self.dictionary.function(cell).map(|f| f.body)
        {
            Some(body) => body,
            None =>
            {
                self.emit_signal(process, Signal::WordIdOutOfRange);
                return;
            }
        };

        match body
        {
            FunctionBody::Native(native) =>
            {
                native(process, self);
                process.wp = process.wp.wrapping_add(1);
            },
            FunctionBody::Interpreted { start, .. } =>
            {
                if start < 0
                {
                    self.emit_signal(process, Signal::WordNotImplemented);
                }
                else
                {
                    self.set_call(process, cell);
                }
            }
        }
    }

    /// Executes a single word to completion.
    pub fn run_call(&mut self, process: &mut Process, word: u32)
    {
        if word > self.dictionary.len() as u32
        {
            self.emit_signal(process, Signal::WordIdOutOfRange);
            return;
        }

        let body = match self.dictionary.function(word).map(|f| f.body)
        {
            Some(body) => body,
            None =>
            {
                self.emit_signal(process, Signal::WordIdOutOfRange);
                return;
            }
        };

        match body
        {
            FunctionBody::Native(native) => native(process, self),
            FunctionBody::Interpreted { start, .. } =>
            {
                if start < 0
                {
                    self.emit_signal(process, Signal::WordNotImplemented);
                    return;
                }

                let rs_pos = process.return_stack.len();

                self.set_call(process, word);

                while process.return_stack.len() != rs_pos && process.signal.is_none()
                {
                    self.step(process);
                }
            }
        }
    }

    /// Records `sig` on `process` and prints a backtrace (word id + name per
    /// frame) to standard error.
    pub fn emit_signal(&mut self, process: &mut Process, sig: Signal)
    {
        process.signal = sig;

        for frame in process.return_stack.iter().rev()
        {
            let name = self.dictionary.function(frame.word).map(|f| f.name.as_str()).unwrap_or("?");
            eprintln!("\t@[{}] - {}", frame.word, name);
        }
    }

    /// Drives the terminal reader/compiler over `stream`: tokenises until
    /// the stream is exhausted (or a non-recoverable signal is raised),
    /// either executing words immediately (Eval mode) or compiling them into
    /// the code segment (Compile mode).
    pub fn load_stream(&mut self, process: &mut Process, stream: SharedStream)
    {
        process.push_stream(stream);

        loop
        {
            let current = match process.current_stream()
            {
                Some(s) => s,
                None => break
            };

            if current.borrow_mut().peek_char() == 0
            {
                break;
            }

            if !process.signal.is_none()
            {
                break;
            }

            let token = match terminal::next_token(process)
            {
                Some(tok) => tok,
                None => break
            };

            let mode = current.borrow().mode();

            match mode
            {
                Mode::Eval => self.eval_token(process, &token),
                Mode::Compile => self.compile_token(process, &token)
            }

            if let Signal::Exception { code, .. } = process.signal
            {
                if code == crate::runtime::signal::error_codes::WORD_NOT_FOUND
                {
                    // Reported already; recover so an interactive session
                    // can keep going past the error.
                    process.clear_signal();

                    if let Some(s) = process.current_stream()
                    {
                        s.borrow_mut().set_mode(Mode::Eval);
                    }
                }
            }
        }

        process.pop_stream();
    }

    fn eval_token(&mut self, process: &mut Process, token: &str)
    {
        if let Some(value) = terminal::parse_integer(token)
        {
            process.push(value);
            return;
        }

        match self.dictionary.find(token)
        {
            Some(id) => self.run_call(process, id),
            None => terminal::report_word_not_found(self, process, token)
        }
    }

    fn compile_token(&mut self, process: &mut Process, token: &str)
    {
        if let Some(value) = terminal::parse_integer(token)
        {
            self.code.emit(0);
            self.code.emit(value.as_u32());
            return;
        }

        match self.dictionary.find(token)
        {
            Some(id) =>
            {
                let is_immediate = self.dictionary.function(id).map(|f| f.is_immediate).unwrap_or(false);

                if is_immediate
                {
                    self.run_call(process, id);
                }
                else
                {
                    self.code.emit(id);
                }
            },
            None => terminal::report_word_not_found(self, process, token)
        }
    }
}


impl Default for VM
{
    fn default() -> Self
    {
        VM::new()
    }
}


#[cfg(test)]
mod tests
{
    use super::*;
    use crate::runtime::terminal::streams::{ shared, StringStream };

    #[test]
    fn step_with_a_signal_already_set_makes_no_progress()
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        process.signal = Signal::WordIdOutOfRange;
        let wp_before = process.wp;

        vm.step(&mut process);

        assert_eq!(process.signal, Signal::WordIdOutOfRange);
        assert_eq!(process.wp, wp_before);
    }

    #[test]
    fn local_frame_is_balanced_after_a_completed_call()
    {
        let mut vm = VM::new();
        let mut process = Process::new(0);

        vm.load_stream(&mut process, shared(StringStream::new(": with-locals locals 1 ;")));
        assert_eq!(process.signal(), Signal::None);

        let depth_before = process.local_depth();

        vm.load_stream(&mut process, shared(StringStream::new("with-locals")));

        assert_eq!(process.signal(), Signal::None);
        assert_eq!(process.local_depth(), depth_before);
    }
}
