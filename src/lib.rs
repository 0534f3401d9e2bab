// Copyright @yucwang 2021

pub mod core;
pub mod fitting;
pub mod io;
pub mod materials;
pub mod math;

#[cfg(feature = "python")]
mod python;
