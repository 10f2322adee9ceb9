//! Oriented-box geometry shared by every element.

pub mod element;
pub mod object_box;
