/* Copyright 2020 @Yuchen Wong */

use nalgebra as na;

pub type Float = f64;

pub type Vector2f = na::Vector2<Float>;
pub type Vector3f = na::Vector3<Float>;
pub type Matrix3f = na::Matrix3<Float>;

pub const PI: Float = std::f64::consts::PI;
pub const INV_PI: Float = std::f64::consts::FRAC_1_PI;
pub const INV_TWO_PI: Float = 0.5 * std::f64::consts::FRAC_1_PI;
pub const INV_FOUR_PI: Float = 0.25 * std::f64::consts::FRAC_1_PI;
pub const HALF_PI: Float = std::f64::consts::FRAC_PI_2;
