// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod file_location;
mod file_range;
mod ranged;
mod source_code;

pub use self::{
    file_location::FileLocation,
    file_range::FileRange,
    ranged::Ranged,
    source_code::SourceCode,
};
