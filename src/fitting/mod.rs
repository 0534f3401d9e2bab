// Copyright @yucwang 2026

pub mod albedo;
pub mod ltc_fit;
pub mod nelder_mead;
