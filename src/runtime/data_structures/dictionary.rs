
//! The word dictionary: an ordered list of functions plus a name -> id map.

use std::collections::HashMap;

use crate::runtime::process::Process;
use crate::runtime::vm::VM;

/// Signature of a native (Rust-implemented) word. Receives the calling
/// process and the owning VM so it can mutate the dictionary/segments (for
/// the handful of compile-time words) as well as the process's own stacks.
pub type NativeFn = fn(&mut Process, &mut VM);


#[derive(Clone, Copy)]
pub enum FunctionBody
{
    /// A native word. The function pointer gives O(1) dispatch from a 32-bit id.
    Native(NativeFn),

    /// An interpreted (user-defined) word. `start` is the code-segment index
    /// of the first instruction, or `-1` if the word has been declared but
    /// never given a body. `local_count` is the local-stack frame size.
    Interpreted { start: i32, local_count: u32 }
}


#[derive(Clone)]
pub struct Function
{
    pub name: String,
    pub is_immediate: bool,
    pub body: FunctionBody
}


impl Function
{
    pub fn is_native(&self) -> bool
    {
        matches!(self.body, FunctionBody::Native(_))
    }
}


/// The ordered function table and its name index.
///
/// Index 0 is a reserved placeholder standing in for the literal marker cell;
/// it is never returned by `add_native`/`add_interpreted` and never resolves
/// through `find`. Id 1 is reserved for `return` and must be the first real
/// word registered during primitive initialisation, so that `emit(1)`
/// (written by the `;` word) always terminates a definition.
pub struct Dictionary
{
    functions: Vec<Function>,
    name_to_id: HashMap<String, u32>
}


impl Dictionary
{
    pub fn new() -> Dictionary
    {
        Dictionary
        {
            functions: vec![ Function
            {
                name: "<literal-marker>".to_string(),
                is_immediate: false,
                body: FunctionBody::Interpreted { start: -1, local_count: 0 }
            } ],
            name_to_id: HashMap::new()
        }
    }

    pub fn add_native(&mut self, name: &str, native: NativeFn, is_immediate: bool) -> u32
    {
        let id = self.functions.len() as u32;

        self.functions.push(Function
        {
            name: name.to_string(),
            is_immediate,
            body: FunctionBody::Native(native)
        });

        self.name_to_id.insert(name.to_string(), id);

        id
    }

    /// `start` is the code-segment length at the moment the definition began.
    pub fn add_interpreted(&mut self, name: &str, start: u32) -> u32
    {
        let id = self.functions.len() as u32;

        self.functions.push(Function
        {
            name: name.to_string(),
            is_immediate: false,
            body: FunctionBody::Interpreted { start: start as i32, local_count: 0 }
        });

        // Redefinition shadows: the old entry (and any compiled references
        // to it) stays valid, only the name binding moves.
        self.name_to_id.insert(name.to_string(), id);

        id
    }

    pub fn set_immediate(&mut self, id: u32)
    {
        if let Some(func) = self.functions.get_mut(id as usize)
        {
            func.is_immediate = true;
        }
    }

    pub fn set_local_count(&mut self, id: u32, n: u32)
    {
        if let Some(func) = self.functions.get_mut(id as usize)
        {
            if let FunctionBody::Interpreted { local_count, .. } = &mut func.body
            {
                *local_count = n;
            }
        }
    }

    pub fn find(&self, name: &str) -> Option<u32>
    {
        self.name_to_id.get(name).copied()
    }

    pub fn function(&self, id: u32) -> Option<&Function>
    {
        if id == 0
        {
            return None;
        }

        self.functions.get(id as usize)
    }

    pub fn last_id(&self) -> u32
    {
        (self.functions.len() - 1) as u32
    }

    pub fn len(&self) -> usize
    {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.functions.len() <= 1
    }
}


#[cfg(test)]
mod tests
{
    use super::*;

    fn noop(_process: &mut Process, _vm: &mut VM) {}

    #[test]
    fn id_zero_is_never_a_valid_dictionary_id()
    {
        let dict = Dictionary::new();
        assert!(dict.function(0).is_none());
    }

    #[test]
    fn redefinition_rebinds_name_without_deleting_old_entry()
    {
        let mut dict = Dictionary::new();
        let first = dict.add_native("foo", noop, false);
        let second = dict.add_native("foo", noop, false);

        assert_ne!(first, second);
        assert_eq!(dict.find("foo"), Some(second));
        assert!(dict.function(first).is_some());
    }
}
