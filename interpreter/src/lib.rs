// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

mod console;
mod environment;
mod error;
mod interpreter;
mod value;

pub use jaolang::*;

pub use self::{
    console::{BufferedConsole, Console, StdConsole},
    environment::Environment,
    error::{ErrorPrinter, RuntimeError, TypeError},
    interpreter::Interpreter,
    value::Value,
};
