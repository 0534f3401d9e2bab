// Copyright @yucwang 2026

pub mod ltc;
pub mod sggx;
pub mod single_scatter_sggx;
