
//! Host-facing errors: everything that happens *outside* the in-band
//! `Signal` channel (bootstrap file loading, CLI setup). Modeled on
//! `cstrainge-rsorth`'s `ScriptError` / `error::Result<T>` pair: a plain
//! message type, no external error crate.

use std::error::Error;
use std::fmt::{ self, Debug, Display, Formatter };


pub type Result<T> = std::result::Result<T, CoreError>;


#[derive(Clone)]
pub struct CoreError
{
    message: String
}


impl Error for CoreError
{
}


impl Display for CoreError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self.message)
    }
}


impl Debug for CoreError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl CoreError
{
    pub fn new(message: String) -> CoreError
    {
        CoreError { message }
    }

    pub fn new_as_result<T>(message: String) -> Result<T>
    {
        Err(CoreError::new(message))
    }
}


impl From<std::io::Error> for CoreError
{
    fn from(err: std::io::Error) -> Self
    {
        CoreError::new(format!("{}", err))
    }
}
