
//! The execution context: instruction pointer, local pointer, the three
//! stacks, and the current signal. A `Process` runs the code segment one
//! word at a time via `VM::step`/`VM::run_call`.

use crate::runtime::data_structures::value::Value;
use crate::runtime::signal::Signal;
use crate::runtime::terminal::streams::SharedStream;

/// A return-stack entry: the calling word, the caller's instruction pointer
/// (to resume at), the saved local pointer, and an optional exception-catch
/// pointer. No `catch`/`throw` word is specified yet, so `catch` is always
/// `None` -- the field exists so the data model matches spec.md §3 and is
/// ready for a future catch mechanism.
#[derive(Clone, Copy)]
pub struct RetFrame
{
    pub word: u32,
    pub ip: u32,
    pub lp: u32,
    pub catch: Option<u32>
}


/// A Terminal is a Process with a non-empty stream stack. Rust has no struct
/// inheritance, so "subclassing" is represented by Process always carrying
/// the (possibly empty) stream stack; this alias lets call sites spell out
/// the intent.
pub type Terminal = Process;


pub struct Process
{
    pid: u32,

    pub(crate) wp: u32,
    pub(crate) lp: u32,

    pub(crate) value_stack: Vec<Value>,
    pub(crate) return_stack: Vec<RetFrame>,
    pub(crate) local_stack: Vec<Value>,

    pub(crate) signal: Signal,

    /// Stack of input streams. Empty for a plain worker Process; the
    /// Terminal role pushes/pops streams as `load_stream` is entered/left.
    pub(crate) streams: Vec<SharedStream>
}


impl Process
{
    pub fn new(pid: u32) -> Self
    {
        Process
        {
            pid,
            wp: 0,
            lp: 0,
            value_stack: Vec::new(),
            return_stack: Vec::new(),
            local_stack: Vec::new(),
            signal: Signal::None,
            streams: Vec::new()
        }
    }

    pub fn pid(&self) -> u32
    {
        self.pid
    }

    pub fn wp(&self) -> u32
    {
        self.wp
    }

    pub fn lp(&self) -> u32
    {
        self.lp
    }

    pub fn signal(&self) -> Signal
    {
        self.signal
    }

    pub fn clear_signal(&mut self)
    {
        self.signal = Signal::None;
    }

    pub fn value_stack(&self) -> &[Value]
    {
        &self.value_stack
    }

    pub(crate) fn value_stack_mut(&mut self) -> &mut [Value]
    {
        &mut self.value_stack
    }

    pub fn return_depth(&self) -> usize
    {
        self.return_stack.len()
    }

    pub(crate) fn return_frame(&self, index: usize) -> Option<&RetFrame>
    {
        self.return_stack.get(index)
    }

    pub(crate) fn set_return_frame_ip(&mut self, index: usize, ip: u32) -> bool
    {
        match self.return_stack.get_mut(index)
        {
            Some(frame) => { frame.ip = ip; true },
            None => false
        }
    }

    pub fn local_depth(&self) -> usize
    {
        self.local_stack.len()
    }

    pub(crate) fn local_stack(&self) -> &[Value]
    {
        &self.local_stack
    }

    pub(crate) fn local_stack_mut(&mut self) -> &mut Vec<Value>
    {
        &mut self.local_stack
    }

    pub fn push(&mut self, value: Value)
    {
        self.value_stack.push(value);
    }

    pub fn top(&self) -> Option<Value>
    {
        self.value_stack.last().copied()
    }

    pub fn pop(&mut self) -> Option<Value>
    {
        self.value_stack.pop()
    }

    pub fn current_stream(&self) -> Option<SharedStream>
    {
        self.streams.last().cloned()
    }

    pub fn push_stream(&mut self, stream: SharedStream)
    {
        self.streams.push(stream);
    }

    pub fn pop_stream(&mut self) -> Option<SharedStream>
    {
        self.streams.pop()
    }
}
