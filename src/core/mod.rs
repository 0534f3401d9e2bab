// Copyright @yucwang 2021

pub mod brdf;
pub mod config_loader;
pub mod rng;
